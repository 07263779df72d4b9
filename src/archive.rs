use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;

use crate::error::Result;

/// What happened to an archive file after a fresh download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The fresh file replaced (or created) the archive file.
    Copied { bytes: u64 },
    /// The archive file was larger and stayed as it was.
    Kept { existing: u64, fresh: u64 },
}

/// A finished artifact in the archive directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archived {
    pub path: PathBuf,
    pub outcome: CopyOutcome,
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        info!(dir = %dir.display(), "Making directory");
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn size_or_zero(path: &Path) -> Result<u64> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Copies `fresh` over `archived` unless `archived` is strictly larger.
///
/// A missing archive file counts as zero bytes. The copy keeps the source's
/// permissions and modification time.
pub(crate) fn copy_if_not_smaller(fresh: &Path, archived: &Path) -> Result<CopyOutcome> {
    let fresh_size = fs::metadata(fresh)?.len();
    let existing_size = size_or_zero(archived)?;

    debug!(
        fresh = %fresh.display(),
        fresh_size,
        archived = %archived.display(),
        existing_size,
        "File sizes"
    );

    if fresh_size < existing_size {
        info!(
            fresh = %fresh.display(),
            archived = %archived.display(),
            "Existing file is larger. Not copied."
        );
        return Ok(CopyOutcome::Kept {
            existing: existing_size,
            fresh: fresh_size,
        });
    }

    info!(from = %fresh.display(), to = %archived.display(), "Copying");
    let bytes = fs::copy(fresh, archived)?;
    let modified = fs::metadata(fresh)?.modified()?;
    fs::File::options()
        .write(true)
        .open(archived)?
        .set_modified(modified)?;

    Ok(CopyOutcome::Copied { bytes })
}
