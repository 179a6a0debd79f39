/*!
 * SRT loading.
 *
 * Lines are read one at a time, trimmed, and fed to a `LoadContext`, which
 * drives the per-block state machine in `state`. After the last line a
 * synthetic blank line closes a final block that lacks its terminator.
 * The first error aborts the load; no partial result is returned.
 *
 * - `state`: block states and the builder that accumulates one entry
 * - `context`: the file-scoped aggregator of finished entries
 */

pub mod context;
pub mod state;

pub use context::LoadContext;
pub use state::{EntryBlockState, EntryBuilder};

use log::debug;
use std::path::Path;

use crate::errors::SubtitleError;
use crate::file_utils::{FileManager, TextEncoding};
use crate::subtitle_processor::SubtitleEntry;

/// Load every entry of an SRT file, in file order
pub fn load_file<P: AsRef<Path>>(
    path: P,
    encoding: TextEncoding,
) -> Result<Vec<SubtitleEntry>, SubtitleError> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| SubtitleError::Io {
        path: path.to_path_buf(),
        source,
    };

    debug!("Loading {} as {}", path.display(), encoding);
    let lines = FileManager::read_lines(path, encoding).map_err(io_error)?;

    let mut context = LoadContext::new();
    for line in lines {
        let line = line.map_err(io_error)?;
        context.feed(line.trim())?;
    }
    let entries = context.finish()?;

    debug!("Loaded {} subtitle entries from {}", entries.len(), path.display());
    Ok(entries)
}
