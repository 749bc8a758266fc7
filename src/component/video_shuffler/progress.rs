use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static OVERALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Overall:\s*([0-9]+(?:\.[0-9]+)?)%").expect("Invalid regex"));

/// 流程推送給使用端的進度訊息
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// 整體百分比 (0-100)
    Overall(f64),
    Status(String),
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overall(percent) => write!(f, "Overall: {percent:.2}%"),
            Self::Status(text) => f.write_str(text),
        }
    }
}

/// 從 `Overall: <n>%` 字串取出百分比，其他狀態文字回傳 `None`
#[must_use]
pub fn parse_overall_percent(text: &str) -> Option<f64> {
    OVERALL_REGEX
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub trait ProgressSink {
    fn report(&self, event: &ProgressEvent);
}

impl<F: Fn(&ProgressEvent)> ProgressSink for F {
    fn report(&self, event: &ProgressEvent) {
        self(event);
    }
}

/// 不顯示任何進度
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _event: &ProgressEvent) {}
}

/// 以 indicatif 進度條顯示於終端機
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleProgress {
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% ({eta}) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    pub fn finish(&self, message: String) {
        self.bar.finish_with_message(message);
    }

    pub fn abandon(&self, message: String) {
        self.bar.abandon_with_message(message);
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Overall(percent) => {
                self.bar.set_position(percent.clamp(0.0, 100.0).round() as u64);
            }
            ProgressEvent::Status(text) => self.bar.set_message(text.clone()),
        }
    }
}
