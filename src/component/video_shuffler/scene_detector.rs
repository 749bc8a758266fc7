use super::error::PipelineError;
use super::ffmpeg_command::build_scene_command;
use super::model::CutPoint;
use crate::tools::run_command;
use log::{debug, error};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use std::sync::atomic::AtomicBool;

// 格式: [Parsed_showinfo_1 @ 0x...] n:   3 pts:  61440 pts_time:4.8 duration:512 ...
static PTS_TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pts_time:\s*([0-9]+(?:\.[0-9]+)?)").expect("Invalid regex"));

/// 使用 ffmpeg scene 分數偵測硬切點
///
/// 每次呼叫都重新分析，不做快取；子程序失敗時回傳 [`PipelineError::Detection`]
pub fn detect_cuts(
    path: &Path,
    threshold: f64,
    shutdown_signal: &AtomicBool,
) -> Result<Vec<CutPoint>, PipelineError> {
    debug!("場景偵測: {} threshold={threshold}", path.display());

    let wrap = |diagnostics: String| PipelineError::Detection {
        path: path.to_path_buf(),
        diagnostics,
    };

    let output = run_command(build_scene_command(path, threshold), shutdown_signal)
        .map_err(|e| PipelineError::from_run(e, wrap))?;

    if !output.success() {
        error!(
            "場景偵測失敗 {} ({}):\n{}",
            path.display(),
            output.status,
            output.diagnostics
        );
        return Err(wrap(output.diagnostics));
    }

    // showinfo 輸出在 stderr
    let cuts = parse_scene_output(&output.diagnostics);
    debug!("偵測到 {} 個場景變換點: {}", cuts.len(), path.display());

    Ok(cuts)
}

/// 解析 showinfo 輸出中的時間點，保留原始順序與重複值
#[must_use]
pub fn parse_scene_output(output: &str) -> Vec<CutPoint> {
    output
        .lines()
        .filter(|line| line.contains("showinfo"))
        .filter_map(|line| PTS_TIME_REGEX.captures(line))
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .map(|timestamp| CutPoint { timestamp })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scene_output_showinfo_lines() {
        let output = r"
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'a.mp4':
  Duration: 00:00:10.00, start: 0.000000, bitrate: 1000 kb/s
[Parsed_showinfo_1 @ 0x7f9b8c] n:   0 pts:  38400 pts_time:3       duration:512 pos: 1234 fmt:yuv420p
[Parsed_showinfo_1 @ 0x7f9b8c] n:   1 pts:  89600 pts_time:7.0     duration:512 pos: 5678 fmt:yuv420p
frame=  250 fps=0.0 q=-0.0 Lsize=N/A time=00:00:10.00 bitrate=N/A speed= 100x
";
        let cuts = parse_scene_output(output);
        assert_eq!(cuts.len(), 2);
        assert!((cuts[0].timestamp - 3.0).abs() < 1e-9);
        assert!((cuts[1].timestamp - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_scene_output_keeps_order_and_duplicates() {
        let output = r"
[Parsed_showinfo_1 @ 0x1] n:   0 pts: 1 pts_time:8.5
[Parsed_showinfo_1 @ 0x1] n:   1 pts: 1 pts_time:2.25
[Parsed_showinfo_1 @ 0x1] n:   2 pts: 1 pts_time:2.25
";
        let timestamps: Vec<f64> = parse_scene_output(output)
            .iter()
            .map(|c| c.timestamp)
            .collect();
        assert_eq!(timestamps, vec![8.5, 2.25, 2.25]);
    }

    #[test]
    fn test_parse_scene_output_ignores_other_lines() {
        let output = "[mp4 @ 0x1] pts_time:5.0 something\nno markers here\n";
        assert!(parse_scene_output(output).is_empty());
    }

    #[test]
    fn test_parse_scene_output_empty() {
        assert!(parse_scene_output("").is_empty());
    }
}
