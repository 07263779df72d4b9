use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use chrono::Local;
use chrono::NaiveDate;
use tracing::info;

use crate::archive::copy_if_not_smaller;
use crate::archive::ensure_dir;
use crate::archive::Archived;
use crate::config;
use crate::error::Error;
use crate::error::Result;
use crate::ffmpeg::MediaTool;
use crate::naming::live_basename;
use crate::Channel;

/// Records a live channel for a fixed number of minutes.
pub struct LiveRecorder<T> {
    channel: Channel,
    program: String,
    minutes: i64,
    pause: Duration,
    radio_dir: PathBuf,
    tmp_dir: PathBuf,
    date: NaiveDate,
    tool: T,
}

impl LiveRecorder<()> {
    pub fn builder() -> LiveRecorderBuilder {
        LiveRecorderBuilder::default()
    }
}

impl<T: MediaTool> LiveRecorder<T> {
    fn basename(&self) -> String {
        live_basename(&self.program, self.date)
    }

    /// Final location of the recording in the archive directory.
    pub fn archive_path(&self) -> PathBuf {
        self.radio_dir.join(format!("{}.aac", self.basename()))
    }

    fn container_path(&self) -> PathBuf {
        self.tmp_dir.join(format!("{}_tmp.m4a", self.basename()))
    }

    fn remuxed_path(&self) -> PathBuf {
        self.tmp_dir.join(format!("{}_tmp.aac", self.basename()))
    }

    /// Recording length, rejecting non-positive or unrepresentable minutes.
    fn duration(&self) -> Result<Duration> {
        u64::try_from(self.minutes)
            .ok()
            .filter(|&minutes| minutes > 0)
            .and_then(|minutes| minutes.checked_mul(60))
            .map(Duration::from_secs)
            .ok_or(Error::InvalidDuration(self.minutes))
    }

    /// Captures the stream, remuxes it and archives the result.
    ///
    /// Nothing is retried: a file the media tool should have produced but did
    /// not ends the recording with [`Error::MissingOutput`].
    pub fn record(&self) -> Result<Archived> {
        let url = self.channel.manifest_url();
        let container = self.container_path();
        let remuxed = self.remuxed_path();
        let archived = self.archive_path();

        info!(
            channel = self.channel.code(),
            url,
            program = self.program.as_str(),
            minutes = self.minutes,
            pause = ?self.pause,
            radio_dir = %self.radio_dir.display(),
            tmp_dir = %self.tmp_dir.display(),
            container = %container.display(),
            remuxed = %remuxed.display(),
            archived = %archived.display(),
            "Parameters"
        );

        self.tool.ensure_available()?;
        let duration = self.duration()?;
        ensure_dir(&self.radio_dir)?;
        ensure_dir(&self.tmp_dir)?;

        info!(url, ?duration, "Fetching radio stream data");
        self.tool.capture_live(url, duration, &container)?;
        thread::sleep(self.pause);
        if !container.exists() {
            return Err(Error::MissingOutput {
                path: container,
                stage: "fetching stream data",
            });
        }

        info!(
            from = %container.display(),
            to = %remuxed.display(),
            "Converting audio file format"
        );
        self.tool.remux(&container, &remuxed)?;
        thread::sleep(self.pause);
        if !remuxed.exists() {
            return Err(Error::MissingOutput {
                path: remuxed,
                stage: "converting data",
            });
        }

        let outcome = copy_if_not_smaller(&remuxed, &archived)?;
        info!("Finished recording radio program");
        Ok(Archived {
            path: archived,
            outcome,
        })
    }
}

#[derive(Debug)]
pub struct LiveRecorderBuilder {
    channel: Channel,
    program: String,
    minutes: i64,
    pause: Duration,
    radio_dir: PathBuf,
    tmp_dir: Option<PathBuf>,
    date: Option<NaiveDate>,
}

impl LiveRecorderBuilder {
    pub fn channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn program<S: Into<String>>(mut self, program: S) -> Self {
        self.program = program.into();
        self
    }

    /// Recording length in minutes. Non-positive values are rejected by
    /// [`LiveRecorder::record`].
    pub fn minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn radio_dir<P: Into<PathBuf>>(mut self, radio_dir: P) -> Self {
        self.radio_dir = radio_dir.into();
        self
    }

    pub fn tmp_dir<P: Into<PathBuf>>(mut self, tmp_dir: P) -> Self {
        self.tmp_dir = Some(tmp_dir.into());
        self
    }

    /// Date used in file names. Defaults to today.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn build<T: MediaTool>(self, tool: T) -> LiveRecorder<T> {
        LiveRecorder {
            channel: self.channel,
            program: self.program,
            minutes: self.minutes,
            pause: self.pause,
            radio_dir: self.radio_dir,
            tmp_dir: self.tmp_dir.unwrap_or_else(config::default_tmp_dir),
            date: self.date.unwrap_or_else(|| Local::now().date_naive()),
            tool,
        }
    }
}

impl Default for LiveRecorderBuilder {
    fn default() -> Self {
        Self {
            channel: Channel::Fm,
            program: String::from("test"),
            minutes: 10,
            pause: Duration::from_secs(config::DEFAULT_PAUSE_SECS),
            radio_dir: config::default_radio_dir(),
            tmp_dir: None,
            date: None,
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;

    use tempfile::tempdir;

    use super::*;
    use crate::archive::CopyOutcome;

    /// Writes `payload` wherever it is asked to, and remembers the calls.
    #[derive(Default)]
    struct FakeTool {
        payload: Vec<u8>,
        skip_capture: bool,
        skip_remux: bool,
        calls: RefCell<Vec<String>>,
    }

    impl MediaTool for FakeTool {
        fn capture_live(&self, url: &str, duration: Duration, dest: &Path) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("capture {} {}", url, duration.as_secs()));
            if !self.skip_capture {
                fs::write(dest, &self.payload)?;
            }
            Ok(())
        }

        fn remux(&self, src: &Path, dest: &Path) -> Result<()> {
            self.calls.borrow_mut().push(String::from("remux"));
            if !self.skip_remux {
                fs::copy(src, dest)?;
            }
            Ok(())
        }

        fn fetch_episode(&self, _url: &str, _dest: &Path) -> Result<()> {
            unreachable!()
        }
    }

    fn recorder<'a>(root: &Path, tool: &'a FakeTool) -> LiveRecorder<&'a FakeTool> {
        LiveRecorder::builder()
            .channel(Channel::R2)
            .program("gogaku")
            .minutes(2)
            .pause(Duration::ZERO)
            .radio_dir(root.join("radio"))
            .tmp_dir(root.join("tmp"))
            .date(NaiveDate::from_ymd_opt(2022, 3, 5).unwrap())
            .build(tool)
    }

    #[test]
    fn records_and_archives() {
        let dir = tempdir().unwrap();
        let tool = FakeTool {
            payload: b"audio".to_vec(),
            ..Default::default()
        };

        let archived = recorder(dir.path(), &tool).record().unwrap();

        assert_eq!(archived.path, dir.path().join("radio/gogaku_20220305.aac"));
        assert_eq!(archived.outcome, CopyOutcome::Copied { bytes: 5 });
        assert_eq!(fs::read(&archived.path).unwrap(), b"audio");
        assert!(dir.path().join("tmp/gogaku_20220305_tmp.m4a").exists());
        assert!(dir.path().join("tmp/gogaku_20220305_tmp.aac").exists());
        assert_eq!(
            *tool.calls.borrow(),
            [
                format!("capture {} 120", Channel::R2.manifest_url()),
                String::from("remux"),
            ]
        );
    }

    #[test]
    fn rejects_non_positive_duration() {
        for minutes in [0, -5] {
            let dir = tempdir().unwrap();
            let tool = FakeTool::default();
            let recorder = LiveRecorder::builder()
                .minutes(minutes)
                .radio_dir(dir.path().join("radio"))
                .tmp_dir(dir.path().join("tmp"))
                .build(&tool);

            let err = recorder.record().unwrap_err();

            assert!(matches!(err, Error::InvalidDuration(m) if m == minutes));
            assert!(tool.calls.borrow().is_empty());
            assert!(!dir.path().join("radio").exists());
        }
    }

    #[test]
    fn rejects_duration_too_long_to_express_in_seconds() {
        for minutes in [i64::MAX, (u64::MAX / 60) as i64 + 1] {
            let dir = tempdir().unwrap();
            let tool = FakeTool::default();
            let recorder = LiveRecorder::builder()
                .minutes(minutes)
                .radio_dir(dir.path().join("radio"))
                .tmp_dir(dir.path().join("tmp"))
                .build(&tool);

            let err = recorder.record().unwrap_err();

            assert!(matches!(err, Error::InvalidDuration(m) if m == minutes));
            assert!(tool.calls.borrow().is_empty());
        }
    }

    #[test]
    fn missing_capture_aborts_before_remux() {
        let dir = tempdir().unwrap();
        let tool = FakeTool {
            skip_capture: true,
            ..Default::default()
        };

        let err = recorder(dir.path(), &tool).record().unwrap_err();

        match err {
            Error::MissingOutput { stage, .. } => assert_eq!(stage, "fetching stream data"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(tool.calls.borrow().len(), 1);
    }

    #[test]
    fn missing_remux_output_aborts() {
        let dir = tempdir().unwrap();
        let tool = FakeTool {
            payload: b"audio".to_vec(),
            skip_remux: true,
            ..Default::default()
        };

        let err = recorder(dir.path(), &tool).record().unwrap_err();

        match err {
            Error::MissingOutput { stage, .. } => assert_eq!(stage, "converting data"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dir.path().join("radio/gogaku_20220305.aac").exists());
    }
}
