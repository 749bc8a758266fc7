use super::engine::MediaEngine;
use super::error::PipelineError;
use crate::tools::VideoInfo;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

/// 素材檔，影片資訊在同一次執行中只查詢一次
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    info: OnceCell<VideoInfo>,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            info: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 記住已查詢過的資訊，之後不再呼叫引擎
    pub fn remember(&self, info: VideoInfo) {
        let _ = self.info.set(info);
    }

    pub fn info<E: MediaEngine + ?Sized>(&self, engine: &E) -> Result<&VideoInfo, PipelineError> {
        if let Some(info) = self.info.get() {
            return Ok(info);
        }

        let info = engine.probe(&self.path)?;
        Ok(self.info.get_or_init(|| info))
    }

    pub fn duration<E: MediaEngine + ?Sized>(&self, engine: &E) -> Result<f64, PipelineError> {
        Ok(self.info(engine)?.duration_seconds)
    }
}

/// 所有片段統一的解析度與幀率，取自第一個素材
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFormat {
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
}

impl From<&VideoInfo> for TargetFormat {
    fn from(info: &VideoInfo) -> Self {
        Self {
            width: info.width,
            height: info.height,
            frame_rate: info.frame_rate,
        }
    }
}

/// 場景變換時間點（秒）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPoint {
    pub timestamp: f64,
}

/// 規劃好的擷取片段
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub source: PathBuf,
    pub source_index: usize,
    /// 規劃順序，只用於暫存檔命名
    pub sequence_index: usize,
    pub start_time: f64,
    pub duration: f64,
    /// 來源沒有音訊時以靜音補上，讓所有片段的串流結構一致
    pub source_has_audio: bool,
}

impl Segment {
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}
