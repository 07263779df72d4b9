use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use radiru_recorder_rs::MediaTool;
use radiru_recorder_rs::Result;

/// Stands in for ffmpeg: writes `payload` to every destination it is given.
#[derive(Default)]
pub struct MockMediaTool {
    pub payload: Vec<u8>,
    /// Stream URLs for which nothing gets written.
    pub broken_urls: HashSet<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockMediaTool {
    pub fn new(payload: &[u8]) -> Self {
        Self {
            payload: payload.to_vec(),
            ..Default::default()
        }
    }

    pub fn broken(mut self, url: &str) -> Self {
        self.broken_urls.insert(url.to_string());
        self
    }

    fn write(&self, url: &str, dest: &Path) -> Result<()> {
        if !self.broken_urls.contains(url) {
            fs::write(dest, &self.payload)?;
        }
        Ok(())
    }
}

impl MediaTool for MockMediaTool {
    fn capture_live(&self, url: &str, duration: Duration, dest: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("capture {url} {}s", duration.as_secs()));
        self.write(url, dest)
    }

    fn remux(&self, src: &Path, dest: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(String::from("remux"));
        fs::copy(src, dest)?;
        Ok(())
    }

    fn fetch_episode(&self, url: &str, dest: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(format!("fetch {url}"));
        self.write(url, dest)
    }
}
