use log::trace;

use super::state::{EntryBlockState, EntryBuilder};
use crate::errors::SubtitleError;
use crate::subtitle_processor::SubtitleEntry;

/// File-scoped load state
///
/// Owns the entries emitted so far and the builder of the block being read.
/// The builder is replaced wholesale each time a block completes.
#[derive(Debug, Default)]
pub struct LoadContext {
    entries: Vec<SubtitleEntry>,
    current: EntryBuilder,
}

impl LoadContext {
    pub fn new() -> Self {
        LoadContext {
            entries: Vec::new(),
            current: EntryBuilder::new(),
        }
    }

    /// Append a finished entry
    pub fn emit(&mut self, entry: SubtitleEntry) {
        self.entries.push(entry);
    }

    pub fn current_state(&self) -> EntryBlockState {
        self.current.state()
    }

    /// 1-based index the next block must carry
    pub fn expected_next_index(&self) -> usize {
        self.entries.len() + 1
    }

    pub fn loaded_entries(&self) -> &[SubtitleEntry] {
        &self.entries
    }

    /// Drive the current block with one trimmed line
    pub fn feed(&mut self, line: &str) -> Result<(), SubtitleError> {
        let expected = self.expected_next_index();
        if let Some(entry) = self.current.consume(line, expected)? {
            trace!("entry {} loaded: {} --> {}", expected, entry.start(), entry.end());
            self.emit(entry);
            self.current = EntryBuilder::new();
        }
        Ok(())
    }

    /// Close a trailing block that had no blank line after it and hand back the entries
    pub fn finish(mut self) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        self.feed("")?;
        Ok(self.entries)
    }

    /// Run a whole sequence of raw lines through a fresh context
    pub fn load_lines<I, S>(lines: I) -> Result<Vec<SubtitleEntry>, SubtitleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut context = LoadContext::new();
        for line in lines {
            context.feed(line.as_ref().trim())?;
        }
        context.finish()
    }
}
