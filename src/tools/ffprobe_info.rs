use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

pub const FFPROBE_BIN: &str = "ffprobe";

/// 無法讀取幀率時的預設值
pub const FALLBACK_FRAME_RATE: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
    /// 是否含有音訊串流
    pub has_audio: bool,
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

#[must_use]
pub fn ffprobe_command(path: &Path) -> Command {
    let mut cmd = Command::new(FFPROBE_BIN);
    cmd.args([
        "-v",
        "error",
        "-print_format",
        "json",
        "-show_format",
        "-show_streams",
    ])
    .arg(path);
    cmd
}

/// 使用 ffprobe 取得影片資訊
pub fn get_video_info(path: &Path) -> Result<VideoInfo> {
    let output = ffprobe_command(path)
        .output()
        .with_context(|| format!("無法執行 ffprobe: {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe 執行失敗: {}", stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_ffprobe_output(&stdout, path)
}

/// 解析 ffprobe 的 JSON 輸出
pub fn parse_ffprobe_output(json: &str, path: &Path) -> Result<VideoInfo> {
    let probe: FfprobeOutput =
        serde_json::from_str(json).with_context(|| "無法解析 ffprobe 輸出")?;

    let video_stream = probe
        .streams
        .as_ref()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
        })
        .ok_or_else(|| anyhow!("找不到視訊串流: {}", path.display()))?;

    let width = video_stream
        .width
        .filter(|&w| w > 0)
        .ok_or_else(|| anyhow!("無法取得影片寬度: {}", path.display()))?;
    let height = video_stream
        .height
        .filter(|&h| h > 0)
        .ok_or_else(|| anyhow!("無法取得影片高度: {}", path.display()))?;

    // 取得影片長度（優先從 format，其次從 stream）
    let duration_seconds = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or(video_stream.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| anyhow!("無法取得影片長度: {}", path.display()))?;

    // 長度為 0 的素材無法取樣
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        bail!("影片長度無效 ({duration_seconds}): {}", path.display());
    }

    let frame_rate = video_stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .unwrap_or(FALLBACK_FRAME_RATE);

    let has_audio = probe
        .streams
        .iter()
        .flatten()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(VideoInfo {
        duration_seconds,
        width,
        height,
        frame_rate,
        has_audio,
    })
}

/// 解析幀率字串（例如 "30/1" 或 "30000/1001"）
fn parse_frame_rate(rate: &str) -> Option<f64> {
    if let Some((num_str, den_str)) = rate.split_once('/') {
        let num: f64 = num_str.parse().ok()?;
        let den: f64 = den_str.parse().ok()?;
        if den > 0.0 && num > 0.0 {
            return Some(num / den);
        }
        return None;
    }
    rate.parse::<f64>().ok().filter(|r| *r > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            {"codec_type": "audio", "r_frame_rate": "0/0"},
            {"codec_type": "video", "width": 1280, "height": 720, "r_frame_rate": "30000/1001", "duration": "9.5"}
        ],
        "format": {"duration": "10.010000"}
    }"#;

    #[test]
    fn test_parse_frame_rate_fraction() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_parse_frame_rate_decimal() {
        assert!((parse_frame_rate("29.97").unwrap() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_parse_frame_rate_invalid() {
        assert!(parse_frame_rate("invalid").is_none());
        assert!(parse_frame_rate("30/0").is_none());
        assert!(parse_frame_rate("0/0").is_none());
    }

    #[test]
    fn test_parse_ffprobe_output_prefers_format_duration() {
        let info = parse_ffprobe_output(SAMPLE, Path::new("a.mp4")).unwrap();
        assert_eq!(info.width, 1280);
        assert_eq!(info.height, 720);
        assert!((info.duration_seconds - 10.01).abs() < 1e-9);
        assert!((info.frame_rate - 29.97).abs() < 0.01);
        assert!(info.has_audio);
    }

    #[test]
    fn test_parse_ffprobe_output_zero_denominator_falls_back() {
        let json = r#"{
            "streams": [{"codec_type": "video", "width": 640, "height": 360, "r_frame_rate": "0/0"}],
            "format": {"duration": "4.0"}
        }"#;
        let info = parse_ffprobe_output(json, Path::new("a.mp4")).unwrap();
        assert!((info.frame_rate - FALLBACK_FRAME_RATE).abs() < f64::EPSILON);
        assert!(!info.has_audio);
    }

    #[test]
    fn test_parse_ffprobe_output_without_video_stream() {
        let json = r#"{"streams": [{"codec_type": "audio"}], "format": {"duration": "4.0"}}"#;
        assert!(parse_ffprobe_output(json, Path::new("a.mp3")).is_err());
    }

    #[test]
    fn test_parse_ffprobe_output_rejects_zero_duration() {
        let json = r#"{
            "streams": [{"codec_type": "video", "width": 640, "height": 360}],
            "format": {"duration": "0.000"}
        }"#;
        assert!(parse_ffprobe_output(json, Path::new("a.mp4")).is_err());
    }
}
