use super::concatenator::concatenate_clips;
use super::engine::MediaEngine;
use super::error::PipelineError;
use super::model::{SourceFile, TargetFormat};
use super::progress::{ProgressEvent, ProgressSink};
use super::segment_extractor::extract_segment;
use super::segment_planner::{PlanMode, PlanOptions, plan_segments, total_duration};
use super::shuffler::shuffle_clips;
use crate::config::UserSettings;
use crate::tools::{RunWorkspace, ensure_directory_exists, unique_output_path};
use log::{debug, info, warn};
use rand::Rng;
use std::cell::Cell;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// 單次執行所需的全部設定
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub plan: PlanOptions,
    pub remove_audio: bool,
    /// 最終輸出檔所在資料夾
    pub output_dir: PathBuf,
    /// 暫存資料夾的上層目錄
    pub temp_root: PathBuf,
}

impl PipelineOptions {
    #[must_use]
    pub fn from_settings(settings: &UserSettings) -> Self {
        let mode = if settings.auto_split {
            PlanMode::CutAligned
        } else {
            PlanMode::Random
        };

        Self {
            plan: PlanOptions {
                mode,
                min_length: settings.min_length,
                max_length: settings.max_length,
                total_duration: settings.max_duration,
            },
            remove_audio: settings.remove_audio,
            output_dir: settings
                .save_location
                .clone()
                .unwrap_or_else(std::env::temp_dir),
            temp_root: std::env::temp_dir(),
        }
    }
}

/// 成功的執行結果
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub output: PathBuf,
    pub segment_count: usize,
    pub planned_duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Probing,
    Planning,
    Extracting { completed: usize, total: usize },
    Shuffling,
    Concatenating,
    Cleanup,
    Done { success: bool },
}

/// 依序執行：讀取格式、規劃、擷取、重排、合併、清理
pub struct Pipeline<'a, E: MediaEngine + ?Sized> {
    engine: &'a E,
    options: &'a PipelineOptions,
    shutdown_signal: &'a AtomicBool,
    state: Cell<PipelineState>,
}

impl<'a, E: MediaEngine + ?Sized> Pipeline<'a, E> {
    pub const fn new(
        engine: &'a E,
        options: &'a PipelineOptions,
        shutdown_signal: &'a AtomicBool,
    ) -> Self {
        Self {
            engine,
            options,
            shutdown_signal,
            state: Cell::new(PipelineState::Idle),
        }
    }

    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state.get()
    }

    /// 執行完整流程；不論成功與否，本次產生的暫存檔都會被刪除
    pub fn run<R: Rng + ?Sized>(
        &self,
        files: &[PathBuf],
        progress: &dyn ProgressSink,
        rng: &mut R,
    ) -> Result<PipelineOutput, PipelineError> {
        if files.is_empty() {
            self.enter(PipelineState::Done { success: false });
            return Err(PipelineError::Planning("沒有任何輸入檔案".to_string()));
        }

        let mut workspace = RunWorkspace::create(&self.options.temp_root)?;
        let result = self.execute(files, progress, rng, &mut workspace);

        self.enter(PipelineState::Cleanup);
        // 清理失敗只記錄，不取代原本的結果
        if let Err(e) = workspace.cleanup() {
            warn!("清理暫存檔失敗: {e}");
        }

        self.enter(PipelineState::Done {
            success: result.is_ok(),
        });

        match &result {
            Ok(output) => info!(
                "輸出完成: {} ({} 個片段, {:.2}s)",
                output.output.display(),
                output.segment_count,
                output.planned_duration
            ),
            Err(e) => warn!("流程失敗: {e}"),
        }

        result
    }

    fn execute<R: Rng + ?Sized>(
        &self,
        files: &[PathBuf],
        progress: &dyn ProgressSink,
        rng: &mut R,
        workspace: &mut RunWorkspace,
    ) -> Result<PipelineOutput, PipelineError> {
        let sources: Vec<SourceFile> = files.iter().map(SourceFile::new).collect();
        progress.report(&ProgressEvent::Overall(0.0));

        self.enter(PipelineState::Probing);
        let first = &sources[0];
        let target = TargetFormat::from(first.info(self.engine)?);
        debug!(
            "目標格式: {}x{} @ {:.3} fps",
            target.width, target.height, target.frame_rate
        );

        self.enter(PipelineState::Planning);
        self.check_cancelled()?;
        let segments = plan_segments(&sources, &self.options.plan, self.engine, rng)?;
        let planned_duration = total_duration(&segments);

        let total = segments.len();
        let mut clips = Vec::with_capacity(total);
        for (completed, segment) in segments.iter().enumerate() {
            self.enter(PipelineState::Extracting { completed, total });
            self.check_cancelled()?;

            progress.report(&ProgressEvent::Status(format!(
                "Trimming segment {}/{}",
                completed + 1,
                total
            )));
            let clip = extract_segment(
                self.engine,
                segment,
                target,
                self.options.remove_audio,
                workspace,
            )?;
            clips.push(clip);

            let percent = (completed + 1) as f64 / total as f64 * 100.0;
            progress.report(&ProgressEvent::Overall(percent));
        }

        self.enter(PipelineState::Shuffling);
        shuffle_clips(&mut clips, rng);

        self.enter(PipelineState::Concatenating);
        self.check_cancelled()?;
        progress.report(&ProgressEvent::Status("Merging clips...".to_string()));

        ensure_directory_exists(&self.options.output_dir)?;
        let output_path = unique_output_path(&self.options.output_dir);
        let output = concatenate_clips(
            self.engine,
            &clips,
            self.options.plan.total_duration,
            &output_path,
            workspace,
        )?;
        workspace.commit_output();

        Ok(PipelineOutput {
            output,
            segment_count: total,
            planned_duration,
        })
    }

    fn enter(&self, state: PipelineState) {
        debug!("流程狀態: {:?} -> {state:?}", self.state.get());
        self.state.set(state);
    }

    fn check_cancelled(&self) -> Result<(), PipelineError> {
        if self.shutdown_signal.load(Ordering::SeqCst) {
            return Err(PipelineError::Cancelled);
        }
        Ok(())
    }
}

/// 使用預設亂數來源執行流程
pub fn run_pipeline<E: MediaEngine + ?Sized>(
    engine: &E,
    options: &PipelineOptions,
    files: &[PathBuf],
    progress: &dyn ProgressSink,
    shutdown_signal: &AtomicBool,
) -> Result<PipelineOutput, PipelineError> {
    Pipeline::new(engine, options, shutdown_signal).run(files, progress, &mut rand::thread_rng())
}
