use super::engine::MediaEngine;
use super::error::PipelineError;
use super::model::{CutPoint, Segment, SourceFile};
use log::{debug, warn};
use rand::Rng;

/// 片段長度下限（秒）
///
/// 短於此值的片段可能連一個影格都沒有，剩餘預算不足時直接捨棄
pub const MIN_SEGMENT_DURATION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanMode {
    #[default]
    Random,
    /// 依場景變換點切割
    CutAligned,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanOptions {
    pub mode: PlanMode,
    pub min_length: f64,
    pub max_length: f64,
    /// 所有片段長度總和的上限（秒）
    pub total_duration: f64,
}

impl PlanOptions {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.min_length.is_finite() || self.min_length < MIN_SEGMENT_DURATION {
            return Err(PipelineError::Planning(format!(
                "最短片段長度必須至少 {MIN_SEGMENT_DURATION} 秒 (目前為 {})",
                self.min_length
            )));
        }
        if !self.max_length.is_finite() || self.max_length < self.min_length {
            return Err(PipelineError::Planning(format!(
                "最長片段長度 ({}) 不可小於最短片段長度 ({})",
                self.max_length, self.min_length
            )));
        }
        if !self.total_duration.is_finite() || self.total_duration < MIN_SEGMENT_DURATION {
            return Err(PipelineError::Planning(format!(
                "輸出總長度必須至少 {MIN_SEGMENT_DURATION} 秒 (目前為 {})",
                self.total_duration
            )));
        }
        Ok(())
    }
}

/// 規劃要擷取的片段，總長度不超過 `options.total_duration`
///
/// 每個片段至少 [`MIN_SEGMENT_DURATION`] 秒；不足此值的剩餘預算會被捨棄
pub fn plan_segments<E, R>(
    files: &[SourceFile],
    options: &PlanOptions,
    engine: &E,
    rng: &mut R,
) -> Result<Vec<Segment>, PipelineError>
where
    E: MediaEngine + ?Sized,
    R: Rng + ?Sized,
{
    if files.is_empty() {
        return Err(PipelineError::Planning("沒有任何輸入檔案".to_string()));
    }
    options.validate()?;

    let segments = match options.mode {
        PlanMode::Random => plan_random(files, options, engine, rng)?,
        PlanMode::CutAligned => plan_cut_aligned(files, options, engine)?,
    };

    debug!(
        "規劃 {} 個片段，共 {:.3}s (目標 {:.3}s)",
        segments.len(),
        total_duration(&segments),
        options.total_duration
    );

    Ok(segments)
}

#[must_use]
pub fn total_duration(segments: &[Segment]) -> f64 {
    segments.iter().map(|s| s.duration).sum()
}

/// 隨機選檔、隨機起點，直到預算用完
fn plan_random<E, R>(
    files: &[SourceFile],
    options: &PlanOptions,
    engine: &E,
    rng: &mut R,
) -> Result<Vec<Segment>, PipelineError>
where
    E: MediaEngine + ?Sized,
    R: Rng + ?Sized,
{
    let mut segments = Vec::new();
    let mut accumulated = 0.0;
    // 仍可取樣的素材索引
    let mut candidates: Vec<usize> = (0..files.len()).collect();

    loop {
        let remaining = options.total_duration - accumulated;
        if remaining < MIN_SEGMENT_DURATION {
            break;
        }

        let drawn = if options.max_length > options.min_length {
            rng.gen_range(options.min_length..=options.max_length)
        } else {
            options.min_length
        };
        let length = drawn.min(remaining);

        let pick = rng.gen_range(0..candidates.len());
        let source_index = candidates[pick];
        let source = &files[source_index];
        let info = source.info(engine)?;
        let file_duration = info.duration_seconds;

        if file_duration < MIN_SEGMENT_DURATION {
            warn!(
                "素材太短 ({file_duration}s)，略過: {}",
                source.path().display()
            );
            candidates.swap_remove(pick);
            if candidates.is_empty() {
                return Err(PipelineError::Planning(format!(
                    "所有素材都短於 {MIN_SEGMENT_DURATION} 秒"
                )));
            }
            continue;
        }

        let max_start = file_duration - length;
        let start_time = if max_start > 0.0 {
            rng.gen_range(0.0..=max_start)
        } else {
            0.0
        };
        // 素材比片段短時只取整段素材，不讓片段超出檔案結尾
        let duration = length.min(file_duration - start_time);

        segments.push(Segment {
            source: source.path().to_path_buf(),
            source_index,
            sequence_index: segments.len(),
            start_time,
            duration,
            source_has_audio: info.has_audio,
        });
        accumulated += duration;
    }

    Ok(segments)
}

/// 依檔案順序以場景邊界切割，預算用完即停止
fn plan_cut_aligned<E>(
    files: &[SourceFile],
    options: &PlanOptions,
    engine: &E,
) -> Result<Vec<Segment>, PipelineError>
where
    E: MediaEngine + ?Sized,
{
    let mut segments = Vec::new();
    let mut accumulated = 0.0;

    'files: for (source_index, source) in files.iter().enumerate() {
        if options.total_duration - accumulated < MIN_SEGMENT_DURATION {
            break;
        }

        let info = source.info(engine)?;
        let file_duration = info.duration_seconds;
        let cuts = engine.detect_cuts(source.path())?;
        let boundaries = scene_boundaries(file_duration, &cuts);

        for range in boundaries.windows(2) {
            let remaining = options.total_duration - accumulated;
            if remaining < MIN_SEGMENT_DURATION {
                break 'files;
            }

            let (start_time, end_time) = (range[0], range[1]);
            // 重複或過近的切點會產生極短區間
            if end_time - start_time < MIN_SEGMENT_DURATION {
                continue;
            }

            let duration = (end_time - start_time).min(remaining);
            segments.push(Segment {
                source: source.path().to_path_buf(),
                source_index,
                sequence_index: segments.len(),
                start_time,
                duration,
                source_has_audio: info.has_audio,
            });
            accumulated += duration;
        }
    }

    Ok(segments)
}

/// 0、檔案範圍內的切點（遞增排序）與檔案長度組成的邊界序列
#[must_use]
pub fn scene_boundaries(file_duration: f64, cuts: &[CutPoint]) -> Vec<f64> {
    let mut inner: Vec<f64> = cuts
        .iter()
        .map(|c| c.timestamp)
        .filter(|&t| t.is_finite() && t > 0.0 && t < file_duration)
        .collect();
    inner.sort_by(f64::total_cmp);

    let mut boundaries = Vec::with_capacity(inner.len() + 2);
    boundaries.push(0.0);
    boundaries.extend(inner);
    boundaries.push(file_duration);
    boundaries
}
