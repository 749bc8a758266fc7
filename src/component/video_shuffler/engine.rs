use super::error::PipelineError;
use super::ffmpeg_command::{ExtractRequest, build_concat_command, build_extract_command};
use super::model::CutPoint;
use super::scene_detector::detect_cuts;
use crate::config::EncodeSettings;
use crate::tools::{VideoInfo, get_video_info, run_command};
use log::error;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 外部轉檔引擎提供給流程的操作
pub trait MediaEngine {
    fn probe(&self, path: &Path) -> Result<VideoInfo, PipelineError>;

    /// 回傳的時間點未排序，也可能重複
    fn detect_cuts(&self, path: &Path) -> Result<Vec<CutPoint>, PipelineError>;

    fn extract(
        &self,
        request: &ExtractRequest<'_>,
        sequence_index: usize,
    ) -> Result<(), PipelineError>;

    fn concatenate(
        &self,
        manifest: &Path,
        duration_cap: f64,
        output: &Path,
    ) -> Result<(), PipelineError>;
}

/// 透過 ffmpeg / ffprobe 子程序實作的引擎
pub struct FfmpegEngine {
    encoding: EncodeSettings,
    shutdown_signal: Arc<AtomicBool>,
}

impl FfmpegEngine {
    #[must_use]
    pub const fn new(encoding: EncodeSettings, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            encoding,
            shutdown_signal,
        }
    }
}

impl MediaEngine for FfmpegEngine {
    fn probe(&self, path: &Path) -> Result<VideoInfo, PipelineError> {
        get_video_info(path).map_err(|e| PipelineError::Probe {
            path: path.to_path_buf(),
            reason: format!("{e:#}"),
        })
    }

    fn detect_cuts(&self, path: &Path) -> Result<Vec<CutPoint>, PipelineError> {
        detect_cuts(path, self.encoding.scene_threshold, &self.shutdown_signal)
    }

    fn extract(
        &self,
        request: &ExtractRequest<'_>,
        sequence_index: usize,
    ) -> Result<(), PipelineError> {
        let wrap = |diagnostics: String| PipelineError::Extraction {
            sequence_index,
            diagnostics,
        };

        let cmd = build_extract_command(request, &self.encoding);
        let output = run_command(cmd, &self.shutdown_signal)
            .map_err(|e| PipelineError::from_run(e, wrap))?;

        if !output.success() {
            error!(
                "片段 #{sequence_index} 擷取失敗 ({}):\n{}",
                output.status, output.diagnostics
            );
            return Err(wrap(output.diagnostics));
        }

        Ok(())
    }

    fn concatenate(
        &self,
        manifest: &Path,
        duration_cap: f64,
        output: &Path,
    ) -> Result<(), PipelineError> {
        let wrap = |diagnostics: String| PipelineError::Concatenation { diagnostics };

        let cmd = build_concat_command(manifest, duration_cap, output);
        let result = run_command(cmd, &self.shutdown_signal)
            .map_err(|e| PipelineError::from_run(e, wrap))?;

        if !result.success() {
            error!("合併失敗 ({}):\n{}", result.status, result.diagnostics);
            return Err(wrap(result.diagnostics));
        }

        Ok(())
    }
}
