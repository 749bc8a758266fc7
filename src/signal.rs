use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[must_use]
pub fn setup_shutdown_signal() -> Arc<AtomicBool> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        eprintln!("\n收到中斷信號，正在停止目前的工作並清理暫存檔...");
    })
    .expect("無法設定 Ctrl-C 處理器");

    shutdown_signal
}

/// 讀取中斷旗標後立即重設，讓選單可以在取消一次工作後繼續使用
pub fn take_shutdown_request(shutdown_signal: &AtomicBool) -> bool {
    shutdown_signal.swap(false, Ordering::SeqCst)
}
