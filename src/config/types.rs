use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 最近輸出清單保留的最大數量
pub const MAX_RECENT_OUTPUTS: usize = 10;

pub const DEFAULT_MIN_LENGTH: f64 = 3.0;
pub const DEFAULT_MAX_LENGTH: f64 = 5.0;
pub const DEFAULT_MAX_DURATION: f64 = 600.0;

pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
pub const DEFAULT_PRESET: &str = "fast";
pub const DEFAULT_CRF: u8 = 23;
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// 場景變換閾值 (0-1)，0.4 約等於明確的硬切，不會被一般鏡頭移動觸發
pub const DEFAULT_SCENE_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

/// 片段重新編碼與場景偵測的政策參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeSettings {
    pub video_codec: String,
    pub preset: String,
    pub crf: u8,
    pub audio_codec: String,
    pub scene_threshold: f64,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            crf: DEFAULT_CRF,
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            scene_threshold: DEFAULT_SCENE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub remove_audio: bool,
    /// 啟用時依場景變換切割，否則隨機取樣
    pub auto_split: bool,
    /// 秒
    pub min_length: f64,
    /// 秒
    pub max_length: f64,
    /// 輸出影片總長度上限（秒）
    pub max_duration: f64,
    pub save_location: Option<PathBuf>,
    pub recent_outputs: Vec<String>,
    pub encoding: EncodeSettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            remove_audio: false,
            auto_split: false,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            max_duration: DEFAULT_MAX_DURATION,
            save_location: None,
            recent_outputs: Vec::new(),
            encoding: EncodeSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}

/// 解析 `mm:ss` 或純秒數格式的時長
#[must_use]
pub fn parse_clock_duration(input: &str) -> Option<f64> {
    let input = input.trim();
    let seconds = match input.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.trim().parse().ok()?;
            let seconds: u64 = if seconds.trim().is_empty() {
                0
            } else {
                seconds.trim().parse().ok()?
            };
            if seconds >= 60 {
                return None;
            }
            // 使用者輸入，溢位視為無效
            minutes.checked_mul(60)?.checked_add(seconds)? as f64
        }
        None => input.parse::<f64>().ok()?,
    };

    (seconds.is_finite() && seconds > 0.0).then_some(seconds)
}

/// 將秒數格式化為 `mm:ss`
#[must_use]
pub fn format_clock_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_duration() {
        assert_eq!(parse_clock_duration("10:00"), Some(600.0));
        assert_eq!(parse_clock_duration("1:30"), Some(90.0));
        assert_eq!(parse_clock_duration("2:"), Some(120.0));
        assert_eq!(parse_clock_duration("45"), Some(45.0));
        assert_eq!(parse_clock_duration("12.5"), Some(12.5));
    }

    #[test]
    fn test_parse_clock_duration_invalid() {
        assert_eq!(parse_clock_duration(""), None);
        assert_eq!(parse_clock_duration("0:00"), None);
        assert_eq!(parse_clock_duration("1:75"), None);
        assert_eq!(parse_clock_duration("abc"), None);
        assert_eq!(parse_clock_duration("-3"), None);
    }

    #[test]
    fn test_parse_clock_duration_overflow_is_invalid() {
        assert_eq!(parse_clock_duration("400000000000000000:00"), None);
        assert_eq!(parse_clock_duration("307445734561825860:59"), None);
        assert_eq!(parse_clock_duration("999999999999999999999:00"), None);
    }

    #[test]
    fn test_format_clock_duration() {
        assert_eq!(format_clock_duration(600.0), "10:00");
        assert_eq!(format_clock_duration(95.4), "1:35");
    }

    #[test]
    fn test_settings_missing_fields_use_defaults() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"remove_audio": true, "max_duration": 120}"#).unwrap();
        assert!(settings.remove_audio);
        assert!((settings.max_duration - 120.0).abs() < f64::EPSILON);
        assert!((settings.min_length - DEFAULT_MIN_LENGTH).abs() < f64::EPSILON);
        assert_eq!(settings.encoding, EncodeSettings::default());
        assert_eq!(settings.language, Language::EnUs);
    }

    #[test]
    fn test_language_serde_uses_locale_code() {
        let json = serde_json::to_string(&Language::ZhTw).unwrap();
        assert_eq!(json, "\"zh-TW\"");
    }
}
