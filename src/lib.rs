//! Records NHK radio: live streams for a fixed duration, and on-demand
//! episodes listed by the NHK catalog. The streaming itself is left to ffmpeg.

mod archive;
pub mod catalog;
mod channel;
pub mod config;
mod error;
mod ffmpeg;
mod live;
mod logging;
mod naming;
mod ondemand;
mod program;

pub use archive::Archived;
pub use archive::CopyOutcome;
pub use channel::Channel;
pub use error::Error;
pub use error::Result;
pub use ffmpeg::Ffmpeg;
pub use ffmpeg::MediaTool;
pub use live::LiveRecorder;
pub use live::LiveRecorderBuilder;
pub use logging::init_tracing;
pub use naming::episode_basename;
pub use naming::live_basename;
pub use ondemand::OnDemandFetcher;
pub use ondemand::OnDemandFetcherBuilder;
pub use program::Program;
pub use program::PROGRAMS;
