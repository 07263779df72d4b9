//! The external media tool both pipelines hand the actual streaming work to.

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;

use tracing::debug;
use tracing::warn;

use crate::error::Error;
use crate::error::Result;

/// Operations the recorders need from a media tool.
///
/// Implementations only have to try: the pipelines decide success by checking
/// that `dest` exists afterwards.
pub trait MediaTool {
    /// Fails with [`Error::MissingTool`] when the tool cannot be used at all.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// Copies `duration` of the live stream's audio track into `dest` without
    /// re-encoding.
    fn capture_live(&self, url: &str, duration: Duration, dest: &Path) -> Result<()>;

    /// Remuxes `src` into a raw AAC stream at `dest`, overwriting it.
    fn remux(&self, src: &Path, dest: &Path) -> Result<()>;

    /// Downloads an episode and encodes it to AAC, never overwriting `dest`.
    fn fetch_episode(&self, url: &str, dest: &Path) -> Result<()>;
}

impl<T: MediaTool + ?Sized> MediaTool for &T {
    fn ensure_available(&self) -> Result<()> {
        (**self).ensure_available()
    }

    fn capture_live(&self, url: &str, duration: Duration, dest: &Path) -> Result<()> {
        (**self).capture_live(url, duration, dest)
    }

    fn remux(&self, src: &Path, dest: &Path) -> Result<()> {
        (**self).remux(src, dest)
    }

    fn fetch_episode(&self, url: &str, dest: &Path) -> Result<()> {
        (**self).fetch_episode(url, dest)
    }
}

/// An ffmpeg executable at a fixed path, run without a shell.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    path: PathBuf,
}

impl Ffmpeg {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn capture_args(url: &str, duration: Duration, dest: &Path) -> Vec<OsString> {
        vec![
            "-i".into(),
            url.into(),
            "-vn".into(),
            "-bsf:a".into(),
            "aac_adtstoasc".into(),
            "-acodec".into(),
            "copy".into(),
            "-t".into(),
            format!("{}s", duration.as_secs()).into(),
            dest.into(),
        ]
    }

    fn remux_args(src: &Path, dest: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            src.into(),
            "-acodec".into(),
            "copy".into(),
            dest.into(),
        ]
    }

    fn episode_args(url: &str, dest: &Path) -> Vec<OsString> {
        vec![
            "-n".into(),
            "-i".into(),
            url.into(),
            "-vn".into(),
            "-acodec".into(),
            "aac".into(),
            dest.into(),
        ]
    }

    fn run(&self, args: Vec<OsString>) -> Result<()> {
        debug!(tool = %self.path.display(), ?args, "Running");

        let status = Command::new(&self.path)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| Error::Spawn {
                tool: self.path.clone(),
                source,
            })?;

        if !status.success() {
            warn!(tool = %self.path.display(), %status, "Media tool exited unsuccessfully");
        }
        Ok(())
    }
}

impl MediaTool for Ffmpeg {
    fn ensure_available(&self) -> Result<()> {
        if self.path.exists() {
            Ok(())
        } else {
            Err(Error::MissingTool(self.path.clone()))
        }
    }

    fn capture_live(&self, url: &str, duration: Duration, dest: &Path) -> Result<()> {
        self.run(Self::capture_args(url, duration, dest))
    }

    fn remux(&self, src: &Path, dest: &Path) -> Result<()> {
        self.run(Self::remux_args(src, dest))
    }

    fn fetch_episode(&self, url: &str, dest: &Path) -> Result<()> {
        self.run(Self::episode_args(url, dest))
    }
}
