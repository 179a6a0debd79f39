/*!
 * Per-block state machine.
 *
 * One `EntryBuilder` consumes the lines of one SRT block: the index, the
 * time range, then text lines until a blank line closes the block.
 */

use log::{error, trace};
use std::fmt;
use std::mem;

use crate::errors::{SubtitleError, TIME_RANGE_SEPARATOR};
use crate::subtitle_processor::{SubtitleEntry, Timestamp};

/// Syntactic position inside a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryBlockState {
    /// Expecting the numeric index line (blank lines are skipped)
    AwaitingIndex,
    /// Expecting `<start> --> <end>`
    AwaitingTimeRange,
    /// Collecting text lines until a blank line
    AwaitingText,
    /// Block closed; the entry is emitted in the same step
    Complete,
}

impl EntryBlockState {
    /// The state following this one
    pub fn next(self) -> Result<Self, SubtitleError> {
        match self {
            Self::AwaitingIndex => Ok(Self::AwaitingTimeRange),
            Self::AwaitingTimeRange => Ok(Self::AwaitingText),
            Self::AwaitingText => Ok(Self::Complete),
            Self::Complete => {
                let err = SubtitleError::InvalidTransition {
                    state: self.to_string(),
                };
                error!("invalid state transition: {}", err);
                Err(err)
            }
        }
    }
}

impl fmt::Display for EntryBlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingIndex => "awaiting index",
            Self::AwaitingTimeRange => "awaiting time range",
            Self::AwaitingText => "awaiting text",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Accumulates the fields of the block being read
#[derive(Debug)]
pub struct EntryBuilder {
    state: EntryBlockState,
    start: Option<Timestamp>,
    end: Option<Timestamp>,
    text: String,
}

impl Default for EntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryBuilder {
    pub fn new() -> Self {
        EntryBuilder {
            state: EntryBlockState::AwaitingIndex,
            start: None,
            end: None,
            text: String::new(),
        }
    }

    pub fn state(&self) -> EntryBlockState {
        self.state
    }

    /// Feed one trimmed line
    ///
    /// `entry` is the 1-based position the block must carry as its index.
    /// Returns the finished entry when the line closes the block.
    pub fn consume(
        &mut self,
        line: &str,
        entry: usize,
    ) -> Result<Option<SubtitleEntry>, SubtitleError> {
        match self.state {
            EntryBlockState::AwaitingIndex => {
                if !line.is_empty() {
                    Self::validate_index(line, entry)?;
                    self.advance()?;
                }
                Ok(None)
            }
            EntryBlockState::AwaitingTimeRange => {
                let (start, end) = Self::parse_time_range(line, entry)?;
                self.start = Some(start);
                self.end = Some(end);
                self.advance()?;
                Ok(None)
            }
            EntryBlockState::AwaitingText => {
                if line.is_empty() {
                    self.advance()?;
                    return self.complete(entry).map(Some);
                }
                if !self.text.is_empty() {
                    self.text.push('\n');
                }
                self.text.push_str(line);
                Ok(None)
            }
            // A completed builder is replaced before it sees another line
            EntryBlockState::Complete => self.advance().map(|_| None),
        }
    }

    fn advance(&mut self) -> Result<(), SubtitleError> {
        let next = self.state.next()?;
        trace!("block state: {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    fn validate_index(line: &str, entry: usize) -> Result<(), SubtitleError> {
        match line.parse::<usize>() {
            Ok(index) if index == entry => Ok(()),
            Ok(index) if index > 0 => Err(SubtitleError::IndexSequence {
                expected: entry,
                line: line.to_string(),
            }),
            _ => Err(SubtitleError::IndexFormat {
                line: line.to_string(),
            }),
        }
    }

    fn parse_time_range(line: &str, entry: usize) -> Result<(Timestamp, Timestamp), SubtitleError> {
        let times: Vec<&str> = line.split(TIME_RANGE_SEPARATOR).collect();
        let [start, end] = times.as_slice() else {
            return Err(SubtitleError::TimeRangeFormat {
                line: line.to_string(),
            });
        };

        let parse = |token: &str| {
            let token = token.trim();
            Timestamp::parse(token).ok_or_else(|| SubtitleError::TimeValue {
                entry,
                token: token.to_string(),
            })
        };
        Ok((parse(*start)?, parse(*end)?))
    }

    fn complete(&mut self, entry: usize) -> Result<SubtitleEntry, SubtitleError> {
        if self.text.is_empty() {
            return Err(SubtitleError::EmptyText { entry });
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok(SubtitleEntry::new(start, end, mem::take(&mut self.text))),
            _ => Err(SubtitleError::InvalidTransition {
                state: self.state.to_string(),
            }),
        }
    }
}
