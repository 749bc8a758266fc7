use crate::config::load::SETTINGS_FILE;
use crate::config::types::{MAX_RECENT_OUTPUTS, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &UserSettings) -> Result<()> {
    // Save to settings.json in the current working directory
    save_settings_to(settings, Path::new(SETTINGS_FILE))
}

pub fn save_settings_to(settings: &UserSettings, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

/// 記錄最近的輸出檔
/// 將新路徑加入最前面，去重並限制數量
pub fn add_recent_output(settings: &mut UserSettings, path: &str) {
    settings.recent_outputs.retain(|p| p != path);
    settings.recent_outputs.insert(0, path.to_string());
    settings.recent_outputs.truncate(MAX_RECENT_OUTPUTS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    #[test]
    fn test_add_recent_output_dedup_and_order() {
        let mut settings = UserSettings::default();
        add_recent_output(&mut settings, "/out/a.mp4");
        add_recent_output(&mut settings, "/out/b.mp4");
        add_recent_output(&mut settings, "/out/a.mp4");

        assert_eq!(settings.recent_outputs, vec!["/out/a.mp4", "/out/b.mp4"]);
    }

    #[test]
    fn test_add_recent_output_truncates() {
        let mut settings = UserSettings::default();
        for i in 0..(MAX_RECENT_OUTPUTS + 5) {
            add_recent_output(&mut settings, &format!("/out/{i}.mp4"));
        }
        assert_eq!(settings.recent_outputs.len(), MAX_RECENT_OUTPUTS);
        assert_eq!(
            settings.recent_outputs[0],
            format!("/out/{}.mp4", MAX_RECENT_OUTPUTS + 4)
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = UserSettings::default();
        settings.auto_split = true;
        settings.max_duration = 90.0;
        save_settings_to(&settings, &path).unwrap();

        let loaded = Config::load_settings(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}
