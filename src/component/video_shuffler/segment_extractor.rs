use super::engine::MediaEngine;
use super::error::PipelineError;
use super::ffmpeg_command::ExtractRequest;
use super::model::{Segment, TargetFormat};
use crate::tools::RunWorkspace;
use log::debug;
use std::path::PathBuf;

/// 將片段重新編碼為統一格式的暫存檔
///
/// 暫存檔登記在 `workspace` 中，成功後由呼叫端負責後續清理
pub fn extract_segment<E: MediaEngine + ?Sized>(
    engine: &E,
    segment: &Segment,
    target: TargetFormat,
    remove_audio: bool,
    workspace: &mut RunWorkspace,
) -> Result<PathBuf, PipelineError> {
    let output = workspace.clip_path(segment.source_index, segment.sequence_index);

    debug!(
        "擷取片段 #{}: {} @ {:.3}s +{:.3}s -> {}",
        segment.sequence_index,
        segment.source.display(),
        segment.start_time,
        segment.duration,
        output.display()
    );

    let request = ExtractRequest {
        source: &segment.source,
        start_time: segment.start_time,
        duration: segment.duration,
        target,
        remove_audio,
        source_has_audio: segment.source_has_audio,
        output: output.clone(),
    };
    engine.extract(&request, segment.sequence_index)?;

    if !output.is_file() {
        return Err(PipelineError::Extraction {
            sequence_index: segment.sequence_index,
            diagnostics: format!("片段檔案未建立: {}", output.display()),
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::video_shuffler::engine::tests::FakeEngine;
    use tempfile::TempDir;

    fn segment(sequence_index: usize) -> Segment {
        Segment {
            source: PathBuf::from("a.mp4"),
            source_index: 1,
            sequence_index,
            start_time: 2.0,
            duration: 3.0,
            source_has_audio: false,
        }
    }

    const TARGET: TargetFormat = TargetFormat {
        width: 640,
        height: 360,
        frame_rate: 25.0,
    };

    #[test]
    fn test_extract_segment_writes_into_workspace() {
        let root = TempDir::new().unwrap();
        let mut workspace = RunWorkspace::create(root.path()).unwrap();
        let engine = FakeEngine::new();

        let clip = extract_segment(&engine, &segment(4), TARGET, false, &mut workspace).unwrap();

        assert!(clip.is_file());
        assert!(clip.starts_with(workspace.dir()));
        assert_eq!(*engine.audio_flags.borrow(), vec![false]);
        assert!(
            clip.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("clip_1_4_")
        );
    }

    #[test]
    fn test_extract_segment_failure_carries_diagnostics() {
        let root = TempDir::new().unwrap();
        let mut workspace = RunWorkspace::create(root.path()).unwrap();
        let engine = FakeEngine::new().failing_extract_at(0);

        let error =
            extract_segment(&engine, &segment(9), TARGET, true, &mut workspace).unwrap_err();

        match error {
            PipelineError::Extraction {
                sequence_index,
                diagnostics,
            } => {
                assert_eq!(sequence_index, 9);
                assert!(diagnostics.contains("Conversion failed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
