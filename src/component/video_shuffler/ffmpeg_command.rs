use super::model::TargetFormat;
use crate::config::EncodeSettings;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const FFMPEG_BIN: &str = "ffmpeg";

/// 統一的音訊參數，讓所有片段能直接串流複製合併
const AUDIO_SAMPLE_RATE: &str = "48000";
const AUDIO_CHANNELS: &str = "2";
/// 沒有音訊的素材以此靜音來源補上音軌
const SILENT_AUDIO_SOURCE: &str = "anullsrc=channel_layout=stereo:sample_rate=48000";

/// 擷取單一片段的請求
#[derive(Debug, Clone)]
pub struct ExtractRequest<'a> {
    pub source: &'a Path,
    pub start_time: f64,
    pub duration: f64,
    pub target: TargetFormat,
    pub remove_audio: bool,
    pub source_has_audio: bool,
    pub output: PathBuf,
}

fn base_command() -> Command {
    let mut cmd = Command::new(FFMPEG_BIN);
    cmd.args(["-hide_banner", "-nostdin"]);
    cmd
}

/// 建立片段擷取命令：重新編碼為統一的解析度、幀率與編碼參數
#[must_use]
pub fn build_extract_command(request: &ExtractRequest<'_>, encoding: &EncodeSettings) -> Command {
    let target = request.target;
    let filter = format!(
        "scale={}:{},setsar=1,fps={}",
        target.width, target.height, target.frame_rate
    );

    // 時間參數保留完整精度，避免四捨五入後超出預算或變成 0
    let mut cmd = base_command();
    cmd.args(["-ss", &request.start_time.to_string()])
        .arg("-i")
        .arg(request.source);

    let silent_input = !request.remove_audio && !request.source_has_audio;
    if silent_input {
        cmd.args(["-f", "lavfi", "-i", SILENT_AUDIO_SOURCE]);
    }

    cmd.args(["-t", &request.duration.to_string()])
        .args(["-map", "0:v:0"]);

    if request.remove_audio {
        cmd.arg("-an");
    } else if silent_input {
        cmd.args(["-map", "1:a:0", "-shortest"]);
    } else {
        cmd.args(["-map", "0:a:0"]);
    }

    cmd.args(["-sn", "-dn", "-map_metadata", "-1"])
        .args(["-avoid_negative_ts", "make_zero"])
        .args(["-vf", &filter])
        .args(["-c:v", &encoding.video_codec])
        .args(["-preset", &encoding.preset])
        .args(["-crf", &encoding.crf.to_string()])
        .args(["-pix_fmt", "yuv420p"]);

    if !request.remove_audio {
        cmd.args(["-c:a", &encoding.audio_codec])
            .args(["-ar", AUDIO_SAMPLE_RATE])
            .args(["-ac", AUDIO_CHANNELS]);
    }

    cmd.arg("-n").arg(&request.output);
    cmd
}

/// 建立串流複製合併命令，並以總長度上限截斷
#[must_use]
pub fn build_concat_command(manifest: &Path, duration_cap: f64, output: &Path) -> Command {
    let mut cmd = base_command();
    cmd.args(["-f", "concat", "-safe", "0", "-i"])
        .arg(manifest)
        .args(["-c", "copy"])
        .args(["-t", &duration_cap.to_string()])
        .arg("-n")
        .arg(output);
    cmd
}

/// 建立場景偵測命令，showinfo 只會輸出通過 select 的影格
#[must_use]
pub fn build_scene_command(source: &Path, threshold: f64) -> Command {
    let filter = format!("select='gt(scene,{threshold})',showinfo");

    let mut cmd = base_command();
    cmd.arg("-i")
        .arg(source)
        .args(["-an", "-sn", "-dn", "-vf", &filter, "-f", "null", "-"]);
    cmd
}
