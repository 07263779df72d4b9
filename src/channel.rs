use clap::ValueEnum;

/// NHK radio channels with a live HLS stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Channel {
    R1,
    R2,
    Fm,
}

impl Channel {
    pub fn code(self) -> &'static str {
        match self {
            Channel::R1 => "r1",
            Channel::R2 => "r2",
            Channel::Fm => "fm",
        }
    }

    /// Master playlist of the channel's live stream.
    pub fn manifest_url(self) -> &'static str {
        match self {
            Channel::R1 => "https://radio-stream.nhk.jp/hls/live/2023229/nhkradiruakr1/master.m3u8",
            Channel::R2 => "https://radio-stream.nhk.jp/hls/live/2023501/nhkradiruakr2/master.m3u8",
            Channel::Fm => "https://radio-stream.nhk.jp/hls/live/2023507/nhkradiruakfm/master.m3u8",
        }
    }
}
