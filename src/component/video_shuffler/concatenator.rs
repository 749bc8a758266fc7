use super::engine::MediaEngine;
use super::error::PipelineError;
use crate::tools::RunWorkspace;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// concat demuxer 清單中的單行，單引號需跳脫為 `'\''`
#[must_use]
pub fn manifest_line(clip: &Path) -> String {
    let escaped = clip.to_string_lossy().replace('\'', r"'\''");
    format!("file '{escaped}'")
}

#[must_use]
pub fn build_manifest(clips: &[PathBuf]) -> String {
    clips
        .iter()
        .map(|clip| manifest_line(clip) + "\n")
        .collect()
}

/// 以串流複製合併片段，輸出長度不超過 `duration_budget`
///
/// 輸出檔在確認完成前由 `workspace` 持有，失敗時會被刪除
pub fn concatenate_clips<E: MediaEngine + ?Sized>(
    engine: &E,
    clips: &[PathBuf],
    duration_budget: f64,
    output: &Path,
    workspace: &mut RunWorkspace,
) -> Result<PathBuf, PipelineError> {
    if clips.is_empty() {
        return Err(PipelineError::Concatenation {
            diagnostics: "沒有可合併的片段".to_string(),
        });
    }

    let manifest = workspace.manifest_path();
    fs::write(&manifest, build_manifest(clips))?;
    debug!(
        "合併 {} 個片段，清單: {}，輸出: {}",
        clips.len(),
        manifest.display(),
        output.display()
    );

    workspace.track_output(output);
    engine.concatenate(&manifest, duration_budget, output)?;

    let readable = fs::metadata(output).is_ok_and(|m| m.is_file() && m.len() > 0);
    if !readable {
        return Err(PipelineError::Concatenation {
            diagnostics: format!("輸出檔案未建立或為空: {}", output.display()),
        });
    }

    Ok(output.to_path_buf())
}
