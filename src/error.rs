use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The command \"{}\" does not exist! Install it and then run again.", .0.display())]
    MissingTool(PathBuf),

    #[error("Something is wrong with time duration: {0} min")]
    InvalidDuration(i64),

    /// The media tool returned but the file it should have written is not there.
    #[error("The file \"{}\" does not exist! Something is wrong with {stage}.", .path.display())]
    MissingOutput { path: PathBuf, stage: &'static str },

    #[error("Failed to run \"{}\"", .tool.display())]
    Spawn {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Http(#[from] attohttpc::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
