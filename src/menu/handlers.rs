use crate::component::VideoShuffler;
use crate::config::Config;
use crate::config::save::{add_recent_output, save_settings};
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use dialoguer::Confirm;
use log::warn;
use rust_i18n::t;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_video_shuffler(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let shuffler = VideoShuffler::new(config.clone(), Arc::clone(shutdown_signal));

    match shuffler.run() {
        Ok(Some(output)) => {
            add_recent_output(&mut config.settings, &output.to_string_lossy());
            if let Err(e) = save_settings(&config.settings) {
                warn!("無法儲存最近輸出清單: {e:#}");
            }
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("{} {:#}", style(t!("common.error_prefix")).red().bold(), e);
        }
    }

    pause(term)?;
    Ok(())
}

pub fn show_recent_outputs(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;
    println!("{}", style(t!("recent.title")).cyan().bold());

    if config.settings.recent_outputs.is_empty() {
        println!("{}", style(t!("recent.empty")).yellow());
        pause(term)?;
        return Ok(());
    }

    for (index, output) in config.settings.recent_outputs.iter().enumerate() {
        let marker = if Path::new(output).exists() {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!("  {}. {} {}", index + 1, marker, output);
    }
    println!();

    let clear = Confirm::new()
        .with_prompt(t!("recent.confirm_clear"))
        .default(false)
        .interact_opt()?;

    if clear == Some(true) {
        config.settings.recent_outputs.clear();
        save_settings(&config.settings)?;
        println!("{}", style(t!("recent.cleared")).green());
        pause(term)?;
    }

    Ok(())
}
