mod engine_runner;
mod ffprobe_info;
mod path_validator;
mod run_workspace;
mod video_scanner;

pub use engine_runner::{EngineOutput, RunError, run_command};
pub use ffprobe_info::{
    FALLBACK_FRAME_RATE, FFPROBE_BIN, VideoInfo, ffprobe_command, get_video_info,
    parse_ffprobe_output,
};
pub use path_validator::{ensure_directory_exists, validate_directory_exists};
pub use run_workspace::{RunWorkspace, timestamp_millis, unique_output_path};
pub use video_scanner::{VideoFileInfo, scan_video_files};
