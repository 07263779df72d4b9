use std::path::PathBuf;

use clap::ArgAction;
use clap::Parser;
use radiru_recorder_rs::config;
use radiru_recorder_rs::init_tracing;
use radiru_recorder_rs::Ffmpeg;
use radiru_recorder_rs::OnDemandFetcher;
use radiru_recorder_rs::Program;
use tracing::info;
use tracing::warn;

/// Downloads NHK on-demand radio programs
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Program names
    #[arg(value_enum, required = true)]
    programs: Vec<Program>,

    /// Directory to store recorded files
    #[arg(short, long, default_value = config::default_radio_dir().into_os_string())]
    radio_dir: PathBuf,

    /// Directory to store temporary files
    #[arg(short, long, default_value = config::default_tmp_dir().into_os_string())]
    temporary_dir: PathBuf,

    /// User agent for HTTP retrieval
    #[arg(short, long, default_value = config::DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Location of the ffmpeg command
    #[arg(short, long, default_value = config::DEFAULT_FFMPEG)]
    ffmpeg: PathBuf,

    /// Max sleep time between file retrievals, in seconds
    #[arg(short, long, default_value_t = config::DEFAULT_MAX_DELAY_SECS)]
    sleep: u64,

    /// Do not verify TLS certificates of the catalog server
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Verbosity level, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.insecure {
        warn!("TLS certificate verification is disabled");
    }

    let fetcher = OnDemandFetcher::builder()
        .programs(args.programs)
        .radio_dir(args.radio_dir)
        .tmp_dir(args.temporary_dir)
        .user_agent(args.user_agent)
        .insecure(args.insecure)
        .max_delay(args.sleep)
        .build(Ffmpeg::new(args.ffmpeg));

    let archived = fetcher.fetch_all()?;
    info!(episodes = archived.len(), "Finished");
    Ok(())
}
