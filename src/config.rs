//! Defaults shared by both command-line tools.

use std::env;
use std::path::PathBuf;
use std::process;

use chrono::Local;

pub const DEFAULT_FFMPEG: &str = "/usr/pkg/bin/ffmpeg4";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; NetBSD amd64; rv:96.0) Gecko/20100101 Firefox/96.0";

pub const CATALOG_URL: &str = "https://www.nhk.or.jp/radioondemand/json/index_v3/index.json";

/// Pause after each live capture/remux step, in seconds.
pub const DEFAULT_PAUSE_SECS: u64 = 3;

/// Bounds of the random delay before each on-demand download, in seconds.
pub const MIN_DELAY_SECS: u64 = 5;
pub const DEFAULT_MAX_DELAY_SECS: u64 = 60;

/// `$HOME/audio/radio`, or `./audio/radio` when `HOME` is unset.
pub fn default_radio_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("audio")
        .join("radio")
}

/// Per-run scratch directory named after the start time and the process id.
pub fn default_tmp_dir() -> PathBuf {
    env::temp_dir().join(format!(
        "radio_{}_{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        process::id()
    ))
}
