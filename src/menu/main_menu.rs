use crate::component::video_shuffler::MIN_SEGMENT_DURATION;
use crate::config::save::save_settings;
use crate::config::types::{Config, Language};
use crate::config::{format_clock_duration, parse_clock_duration};
use crate::menu::handlers::{run_video_shuffler, show_recent_outputs};
use crate::tools::validate_directory_exists;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_shuffle"),
        t!("main_menu.opt_recent"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_video_shuffler(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            show_recent_outputs(term, config)?;
            Ok(true)
        }
        Some(2) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(3) => Ok(false),
        None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

fn on_off(value: bool) -> String {
    if value {
        t!("common.on").to_string()
    } else {
        t!("common.off").to_string()
    }
}

fn saved_notice(value: impl std::fmt::Display) {
    println!("\n{} {}", style(t!("settings.saved")).green(), value);
    std::thread::sleep(Duration::from_secs(1));
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let settings = &config.settings;
        let save_location = settings.save_location.as_ref().map_or_else(
            || t!("settings.save_location_default").to_string(),
            |p| p.display().to_string(),
        );

        let options = vec![
            format!("{}: {}", t!("settings.opt_remove_audio"), on_off(settings.remove_audio)),
            format!("{}: {}", t!("settings.opt_auto_split"), on_off(settings.auto_split)),
            format!("{}: {:.1}s", t!("settings.opt_min_length"), settings.min_length),
            format!("{}: {:.1}s", t!("settings.opt_max_length"), settings.max_length),
            format!(
                "{}: {}",
                t!("settings.opt_max_duration"),
                format_clock_duration(settings.max_duration)
            ),
            format!("{}: {save_location}", t!("settings.opt_save_location")),
            format!("{}: {}", t!("settings.opt_language"), settings.language),
            t!("settings.back").to_string(),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => {
                config.settings.remove_audio = !config.settings.remove_audio;
                save_settings(&config.settings)?;
            }
            Some(1) => {
                config.settings.auto_split = !config.settings.auto_split;
                save_settings(&config.settings)?;
            }
            Some(2) => edit_min_length(config)?,
            Some(3) => edit_max_length(config)?,
            Some(4) => edit_max_duration(config)?,
            Some(5) => edit_save_location(config)?,
            Some(6) => show_language_menu(term, config)?,
            Some(7) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn edit_min_length(config: &mut Config) -> Result<()> {
    let max_length = config.settings.max_length;
    let value: f64 = Input::new()
        .with_prompt(t!("settings.prompt_min_length"))
        .default(config.settings.min_length)
        .validate_with(|v: &f64| -> Result<(), String> {
            if v.is_finite() && *v >= MIN_SEGMENT_DURATION && *v <= max_length {
                Ok(())
            } else {
                Err(t!("settings.invalid_min_length").to_string())
            }
        })
        .interact_text()?;

    config.settings.min_length = value;
    save_settings(&config.settings)?;
    saved_notice(format!("{value:.1}s"));
    Ok(())
}

fn edit_max_length(config: &mut Config) -> Result<()> {
    let min_length = config.settings.min_length;
    let value: f64 = Input::new()
        .with_prompt(t!("settings.prompt_max_length"))
        .default(config.settings.max_length)
        .validate_with(|v: &f64| -> Result<(), String> {
            if v.is_finite() && *v >= min_length {
                Ok(())
            } else {
                Err(t!("settings.invalid_max_length").to_string())
            }
        })
        .interact_text()?;

    config.settings.max_length = value;
    save_settings(&config.settings)?;
    saved_notice(format!("{value:.1}s"));
    Ok(())
}

fn edit_max_duration(config: &mut Config) -> Result<()> {
    let input: String = Input::new()
        .with_prompt(t!("settings.prompt_max_duration"))
        .default(format_clock_duration(config.settings.max_duration))
        .validate_with(|v: &String| -> Result<(), String> {
            parse_clock_duration(v)
                .filter(|&seconds| seconds >= MIN_SEGMENT_DURATION)
                .map(|_| ())
                .ok_or_else(|| t!("settings.invalid_max_duration").to_string())
        })
        .interact_text()?;

    if let Some(seconds) = parse_clock_duration(&input).filter(|&s| s >= MIN_SEGMENT_DURATION) {
        config.settings.max_duration = seconds;
        save_settings(&config.settings)?;
        saved_notice(format_clock_duration(seconds));
    }
    Ok(())
}

/// 空白輸入代表使用系統暫存資料夾
fn edit_save_location(config: &mut Config) -> Result<()> {
    let current = config
        .settings
        .save_location
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    let input: String = Input::new()
        .with_prompt(t!("settings.prompt_save_location"))
        .with_initial_text(current)
        .allow_empty(true)
        .validate_with(|v: &String| -> Result<(), String> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(());
            }
            validate_directory_exists(&PathBuf::from(trimmed)).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let trimmed = input.trim();
    config.settings.save_location = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
    save_settings(&config.settings)?;
    saved_notice(if trimmed.is_empty() {
        t!("settings.save_location_default").to_string()
    } else {
        trimmed.to_string()
    });
    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = [Language::EnUs, Language::ZhTw];

    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();

    let default_index = languages
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];

    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_settings(&config.settings)?;
        saved_notice(selected_lang);
    }

    Ok(())
}
