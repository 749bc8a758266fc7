use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const WORKSPACE_PREFIX: &str = "video_shuffle_";

/// 以毫秒表示的目前時間，用於暫存檔與輸出檔命名
#[must_use]
pub fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// 單次執行的暫存空間
///
/// 所有片段與清單檔都放在專屬的子資料夾內，`cleanup` 或 `Drop`
/// 時一併刪除。尚未確認的輸出檔也由這裡持有，失敗時會被移除。
#[derive(Debug)]
pub struct RunWorkspace {
    dir: PathBuf,
    files: Vec<PathBuf>,
    pending_output: Option<PathBuf>,
    cleaned: bool,
}

impl RunWorkspace {
    pub fn create(root: &Path) -> io::Result<Self> {
        let dir = root.join(format!("{WORKSPACE_PREFIX}{}", Uuid::new_v4().simple()));
        fs::create_dir_all(&dir)?;
        debug!("建立暫存資料夾: {}", dir.display());

        Ok(Self {
            dir,
            files: Vec::new(),
            pending_output: None,
            cleaned: false,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn tracked_files(&self) -> &[PathBuf] {
        &self.files
    }

    /// 配置片段暫存檔路徑，名稱由來源索引、序號與時間組成
    pub fn clip_path(&mut self, source_index: usize, sequence_index: usize) -> PathBuf {
        let path = self.dir.join(format!(
            "clip_{source_index}_{sequence_index}_{}.mp4",
            timestamp_millis()
        ));
        self.files.push(path.clone());
        path
    }

    pub fn manifest_path(&mut self) -> PathBuf {
        let path = self.dir.join(format!("playlist_{}.txt", timestamp_millis()));
        self.files.push(path.clone());
        path
    }

    /// 登記尚未確認成功的輸出檔
    pub fn track_output(&mut self, path: &Path) {
        self.pending_output = Some(path.to_path_buf());
    }

    /// 確認輸出檔，之後清理時不再刪除
    pub fn commit_output(&mut self) -> Option<PathBuf> {
        self.pending_output.take()
    }

    /// 刪除所有暫存檔；回傳第一個遇到的錯誤，其餘記錄在日誌
    pub fn cleanup(&mut self) -> io::Result<()> {
        self.cleaned = true;
        let mut first_error = None;

        let pending = self.pending_output.take();
        for path in self.files.drain(..).chain(pending) {
            if let Err(e) = remove_if_exists(&path) {
                warn!("無法刪除暫存檔 {}: {e}", path.display());
                first_error.get_or_insert(e);
            }
        }

        if let Err(e) = fs::remove_dir_all(&self.dir)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!("無法刪除暫存資料夾 {}: {e}", self.dir.display());
            first_error.get_or_insert(e);
        }

        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for RunWorkspace {
    fn drop(&mut self) {
        if !self.cleaned {
            let _ = self.cleanup();
        }
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// 產生不覆蓋既有檔案的輸出路徑
#[must_use]
pub fn unique_output_path(directory: &Path) -> PathBuf {
    let stamp = timestamp_millis();
    let candidate = directory.join(format!("shuffled_{stamp}.mp4"));
    if !candidate.exists() {
        return candidate;
    }

    loop {
        let suffix = Uuid::new_v4().simple().to_string();
        let candidate = directory.join(format!("shuffled_{stamp}_{}.mp4", &suffix[..8]));
        if !candidate.exists() {
            return candidate;
        }
    }
}
