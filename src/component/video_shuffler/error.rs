use std::io;
use std::path::PathBuf;

use crate::tools::RunError;

/// 影片組合流程中各元件的錯誤
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("無法讀取影片資訊 {}: {reason}", .path.display())]
    Probe { path: PathBuf, reason: String },

    #[error("場景偵測失敗 {}:\n{diagnostics}", .path.display())]
    Detection { path: PathBuf, diagnostics: String },

    #[error("設定無效: {0}")]
    Planning(String),

    #[error("片段 #{sequence_index} 擷取失敗:\n{diagnostics}")]
    Extraction {
        sequence_index: usize,
        diagnostics: String,
    },

    #[error("合併影片失敗:\n{diagnostics}")]
    Concatenation { diagnostics: String },

    #[error("操作已取消")]
    Cancelled,

    #[error("暫存檔案操作失敗: {0}")]
    Io(#[from] io::Error),
}

impl PipelineError {
    /// 將子程序執行錯誤轉為對應元件的錯誤，取消則保持為取消
    pub(crate) fn from_run(error: RunError, wrap: impl FnOnce(String) -> Self) -> Self {
        match error {
            RunError::Cancelled => Self::Cancelled,
            other => wrap(other.to_string()),
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
