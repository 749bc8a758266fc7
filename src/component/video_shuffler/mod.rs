//! 隨機片段組合元件
//!
//! 流程：
//! A. 取得第一個素材的解析度與幀率（ffprobe）
//! B. 規劃片段（隨機取樣或依場景變換切割）
//! C. 逐一重新編碼為統一格式
//! D. 隨機重排
//! E. 串流複製合併並清理暫存檔

mod concatenator;
mod engine;
mod error;
mod ffmpeg_command;
mod main;
mod model;
mod pipeline;
mod progress;
mod scene_detector;
mod segment_extractor;
mod segment_planner;
mod shuffler;

pub use concatenator::{build_manifest, concatenate_clips, manifest_line};
pub use engine::{FfmpegEngine, MediaEngine};
pub use error::PipelineError;
pub use ffmpeg_command::{
    ExtractRequest, build_concat_command, build_extract_command, build_scene_command,
};
pub use main::VideoShuffler;
pub use model::{CutPoint, Segment, SourceFile, TargetFormat};
pub use pipeline::{Pipeline, PipelineOptions, PipelineOutput, PipelineState, run_pipeline};
pub use progress::{
    ConsoleProgress, NoProgress, ProgressEvent, ProgressSink, parse_overall_percent,
};
pub use scene_detector::{detect_cuts, parse_scene_output};
pub use segment_extractor::extract_segment;
pub use segment_planner::{
    MIN_SEGMENT_DURATION, PlanMode, PlanOptions, plan_segments, scene_boundaries,
    total_duration,
};
pub use shuffler::shuffle_clips;
