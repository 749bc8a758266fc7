use log::debug;
use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// 檢查子程序狀態與中斷旗標的間隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 子程序結束後收集到的輸出
#[derive(Debug)]
pub struct EngineOutput {
    pub status: ExitStatus,
    pub stdout: String,
    /// 完整的 stderr 診斷紀錄
    pub diagnostics: String,
}

impl EngineOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("無法啟動 {program}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("等待 {program} 結束時發生錯誤: {source}")]
    Wait { program: String, source: io::Error },

    #[error("操作已取消")]
    Cancelled,
}

/// 執行外部程序直到結束，收集 stdout 與 stderr
///
/// 中斷旗標被設定時會終止子程序並回傳 [`RunError::Cancelled`]
pub fn run_command(mut cmd: Command, shutdown_signal: &AtomicBool) -> Result<EngineOutput, RunError> {
    let program = cmd.get_program().to_string_lossy().to_string();
    debug!("執行命令: {cmd:?}");

    if shutdown_signal.load(Ordering::SeqCst) {
        return Err(RunError::Cancelled);
    }

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunError::Spawn {
            program: program.clone(),
            source,
        })?;

    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let status = loop {
        if shutdown_signal.load(Ordering::SeqCst) {
            debug!("收到中斷訊號，終止 {program}");
            let _ = child.kill();
            let _ = child.wait();
            // 孫程序可能仍持有管線，讀取執行緒交由其自行結束
            return Err(RunError::Cancelled);
        }

        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                let _ = child.kill();
                return Err(RunError::Wait { program, source });
            }
        }
    };

    Ok(EngineOutput {
        status,
        stdout: collect(stdout_reader),
        diagnostics: collect(stderr_reader),
    })
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> Option<JoinHandle<String>> {
    source.map(|mut source| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = source.read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).into_owned()
        })
    })
}

fn collect(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
