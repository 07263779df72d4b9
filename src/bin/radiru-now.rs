use std::path::PathBuf;
use std::time::Duration;

use clap::ArgAction;
use clap::Parser;
use radiru_recorder_rs::config;
use radiru_recorder_rs::init_tracing;
use radiru_recorder_rs::Channel;
use radiru_recorder_rs::CopyOutcome;
use radiru_recorder_rs::Ffmpeg;
use radiru_recorder_rs::LiveRecorder;
use tracing::info;

/// Records a live NHK radio program
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Channel to record
    #[arg(short, long, value_enum, default_value_t = Channel::Fm)]
    channel: Channel,

    /// Radio program name, used in the output file name
    #[arg(short, long, default_value = "test")]
    program: String,

    /// Recording duration in minutes
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    time: i64,

    /// Pause after fetching stream data, in seconds
    #[arg(short, long, default_value_t = config::DEFAULT_PAUSE_SECS)]
    sleep: u64,

    /// Directory to store the recorded file
    #[arg(short, long, default_value = config::default_radio_dir().into_os_string())]
    radio_directory: PathBuf,

    /// Directory to store temporary files
    #[arg(short = 'w', long, default_value = config::default_tmp_dir().into_os_string())]
    temporary_directory: PathBuf,

    /// Location of the ffmpeg command
    #[arg(short, long, default_value = config::DEFAULT_FFMPEG)]
    ffmpeg: PathBuf,

    /// Verbosity level, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let recorder = LiveRecorder::builder()
        .channel(args.channel)
        .program(args.program)
        .minutes(args.time)
        .pause(Duration::from_secs(args.sleep))
        .radio_dir(args.radio_directory)
        .tmp_dir(args.temporary_directory)
        .build(Ffmpeg::new(args.ffmpeg));

    let recording = recorder.record()?;
    match recording.outcome {
        CopyOutcome::Copied { bytes } => {
            info!(path = %recording.path.display(), bytes, "Saved")
        }
        CopyOutcome::Kept { existing, fresh } => {
            info!(path = %recording.path.display(), existing, fresh, "Kept existing file")
        }
    }
    Ok(())
}
