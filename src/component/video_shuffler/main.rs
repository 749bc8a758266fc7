use super::engine::FfmpegEngine;
use super::pipeline::{PipelineOptions, PipelineOutput, run_pipeline};
use super::progress::ConsoleProgress;
use super::segment_planner::PlanMode;
use crate::config::{Config, format_clock_duration};
use crate::signal::take_shutdown_request;
use crate::tools::{VideoFileInfo, scan_video_files, validate_directory_exists};
use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input};
use log::{error, info};
use rust_i18n::t;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 從資料夾中的影片隨機取樣片段並組合成一支影片
pub struct VideoShuffler {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl VideoShuffler {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    /// 成功時回傳輸出檔路徑；使用者取消時回傳 `None`
    pub fn run(&self) -> Result<Option<PathBuf>> {
        println!("{}", style(t!("shuffler.title")).cyan().bold());

        let input_path = self.prompt_input_path()?;
        let directory = PathBuf::from(&input_path);
        validate_directory_exists(&directory)?;

        println!("{}", style(t!("shuffler.scanning")).dim());
        let video_files = scan_video_files(&directory)?;

        if video_files.is_empty() {
            println!("{}", style(t!("shuffler.no_videos")).yellow());
            return Ok(None);
        }

        self.print_file_list(&video_files);
        self.print_settings_summary();

        let confirmed = Confirm::new()
            .with_prompt(t!("shuffler.confirm"))
            .default(true)
            .interact()?;
        if !confirmed {
            println!("{}", style(t!("common.cancelled")).yellow());
            return Ok(None);
        }

        let files: Vec<PathBuf> = video_files.into_iter().map(|f| f.path).collect();
        self.assemble(&files)
    }

    fn assemble(&self, files: &[PathBuf]) -> Result<Option<PathBuf>> {
        let settings = &self.config.settings;
        let options = PipelineOptions::from_settings(settings);
        let engine = FfmpegEngine::new(settings.encoding.clone(), Arc::clone(&self.shutdown_signal));

        println!();
        println!("{}", style(t!("shuffler.start")).cyan());

        let progress = ConsoleProgress::new();
        match run_pipeline(&engine, &options, files, &progress, &self.shutdown_signal) {
            Ok(output) => {
                progress.finish(t!("shuffler.done").to_string());
                self.print_summary(&output);
                Ok(Some(output.output))
            }
            Err(e) if e.is_cancelled() => {
                progress.abandon(t!("common.cancelled").to_string());
                take_shutdown_request(&self.shutdown_signal);
                println!("{}", style(t!("shuffler.cancelled")).yellow());
                Ok(None)
            }
            Err(e) => {
                progress.abandon(t!("shuffler.failed").to_string());
                error!("影片組合失敗: {e}");
                Err(e.into())
            }
        }
    }

    fn prompt_input_path(&self) -> Result<String> {
        let path: String = Input::new()
            .with_prompt(t!("shuffler.prompt_input"))
            .interact_text()?;
        Ok(path.trim().to_string())
    }

    fn print_file_list(&self, video_files: &[VideoFileInfo]) {
        println!(
            "{}",
            style(t!("shuffler.found", count = video_files.len())).green()
        );

        for (index, file) in video_files.iter().enumerate() {
            let size_mb = file.size as f64 / 1024.0 / 1024.0;
            println!(
                "  {}. {} ({:.2} MB)",
                index + 1,
                file.path.file_name().unwrap_or_default().to_string_lossy(),
                size_mb
            );
        }
        println!();
    }

    fn print_settings_summary(&self) {
        let settings = &self.config.settings;
        let options = PipelineOptions::from_settings(settings);

        let mode = match options.plan.mode {
            PlanMode::Random => t!("shuffler.mode_random"),
            PlanMode::CutAligned => t!("shuffler.mode_cut_aligned"),
        };

        println!("{}", style(t!("shuffler.settings_header")).dim());
        println!("  {} {mode}", t!("shuffler.mode"));
        if options.plan.mode == PlanMode::Random {
            println!(
                "  {} {:.1}s - {:.1}s",
                t!("shuffler.segment_length"),
                settings.min_length,
                settings.max_length
            );
        }
        println!(
            "  {} {}",
            t!("shuffler.max_duration"),
            format_clock_duration(settings.max_duration)
        );
        println!(
            "  {} {}",
            t!("shuffler.audio"),
            if settings.remove_audio {
                t!("common.off")
            } else {
                t!("common.on")
            }
        );
        println!(
            "  {} {}",
            t!("shuffler.output_dir"),
            options.output_dir.display()
        );
        println!();
    }

    fn print_summary(&self, output: &PipelineOutput) {
        println!();
        println!("{}", style(t!("shuffler.summary_title")).cyan().bold());
        println!(
            "  {} {}",
            t!("shuffler.summary_output"),
            style(output.output.display()).green()
        );
        println!(
            "  {} {}",
            t!("shuffler.summary_segments"),
            output.segment_count
        );
        println!(
            "  {} {}",
            t!("shuffler.summary_duration"),
            format_clock_duration(output.planned_duration)
        );

        info!(
            "影片組合完成 - 輸出: {}, 片段: {}",
            output.output.display(),
            output.segment_count
        );
    }
}
