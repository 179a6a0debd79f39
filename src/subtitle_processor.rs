use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::app_config::OverflowPolicy;
use crate::delay::Delay;
use crate::errors::{SubtitleError, TIME_RANGE_SEPARATOR};
use crate::file_utils::{FileManager, TextEncoding};
use crate::loader;

// @module: Subtitle entries, time shifting and SRT rendering

// @const: SRT timestamp regex, fixed width HH:MM:SS,mmm
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})$").expect("timestamp pattern is valid")
});

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Time of day with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    millis: u32,
}

impl Timestamp {
    pub const MIDNIGHT: Timestamp = Timestamp { millis: 0 };
    pub const LAST: Timestamp = Timestamp {
        millis: (MILLIS_PER_DAY - 1) as u32,
    };

    /// Create a timestamp from milliseconds since midnight
    pub fn from_millis(millis: u32) -> Option<Self> {
        if (millis as i64) < MILLIS_PER_DAY {
            Some(Timestamp { millis })
        } else {
            None
        }
    }

    /// Create a timestamp from its clock components
    pub fn from_hms_milli(hours: u32, minutes: u32, seconds: u32, millis: u32) -> Option<Self> {
        if hours >= 24 || minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return None;
        }
        Some(Timestamp {
            millis: ((hours * 60 + minutes) * 60 + seconds) * 1000 + millis,
        })
    }

    /// Parse an SRT time token (`HH:MM:SS,mmm`)
    pub fn parse(token: &str) -> Option<Self> {
        let caps = TIMESTAMP_REGEX.captures(token)?;
        let field = |i: usize| caps[i].parse::<u32>().ok();
        Self::from_hms_milli(field(1)?, field(2)?, field(3)?, field(4)?)
    }

    pub fn as_millis(&self) -> u32 {
        self.millis
    }

    pub fn hours(&self) -> u32 {
        self.millis / 3_600_000
    }

    pub fn minutes(&self) -> u32 {
        (self.millis % 3_600_000) / 60_000
    }

    pub fn seconds(&self) -> u32 {
        (self.millis % 60_000) / 1_000
    }

    pub fn subsec_millis(&self) -> u32 {
        self.millis % 1_000
    }

    /// Move the timestamp by a delay; `None` only under `OverflowPolicy::Reject`
    pub fn shifted_by(&self, delay: Delay, policy: OverflowPolicy) -> Option<Self> {
        let current = self.millis as i64;
        let shifted = match policy {
            OverflowPolicy::Wrap => {
                (current + delay.as_millis().rem_euclid(MILLIS_PER_DAY)).rem_euclid(MILLIS_PER_DAY)
            }
            OverflowPolicy::Saturate => current
                .saturating_add(delay.as_millis())
                .clamp(0, MILLIS_PER_DAY - 1),
            OverflowPolicy::Reject => {
                let shifted = current.checked_add(delay.as_millis())?;
                if !(0..MILLIS_PER_DAY).contains(&shifted) {
                    return None;
                }
                shifted
            }
        };
        Some(Timestamp {
            millis: shifted as u32,
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.subsec_millis()
        )
    }
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    start: Timestamp,
    end: Timestamp,
    text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(start: Timestamp, end: Timestamp, text: String) -> Self {
        SubtitleEntry { start, end, text }
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Duration in milliseconds, negative when the entry ends before it starts
    pub fn duration_ms(&self) -> i64 {
        self.end.as_millis() as i64 - self.start.as_millis() as i64
    }

    // @creates: Copy of the entry with both endpoints moved by `delay`
    // @returns: None if the policy rejects an endpoint
    pub fn shift(&self, delay: Delay, policy: OverflowPolicy) -> Option<SubtitleEntry> {
        Some(SubtitleEntry {
            start: self.start.shifted_by(delay, policy)?,
            end: self.end.shifted_by(delay, policy)?,
            text: self.text.clone(),
        })
    }

    /// Write this entry as an SRT block at the given 1-based position
    pub fn write_block<W: Write>(&self, out: &mut W, position: usize) -> io::Result<()> {
        write!(
            out,
            "{}\n{}{}{}\n{}\n\n",
            position, self.start, TIME_RANGE_SEPARATOR, self.end, self.text
        )
    }
}

/// Collection of subtitle entries with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new, empty subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Load an SRT file
    pub fn load<P: AsRef<Path>>(path: P, encoding: TextEncoding) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        let entries = loader::load_file(path, encoding)?;
        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Parse SRT format string into subtitle entries
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        loader::LoadContext::load_lines(content.lines())
    }

    /// Shift every entry by `delay`, preserving order
    pub fn shift(&self, delay: Delay, policy: OverflowPolicy) -> Result<Self, SubtitleError> {
        let entries = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry.shift(delay, policy).ok_or_else(|| SubtitleError::TimeOverflow {
                    entry: i + 1,
                    delay: delay.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Shifted {} entries by {}", entries.len(), delay);

        Ok(SubtitleCollection {
            source_file: self.source_file.clone(),
            entries,
        })
    }

    /// Write every entry as a numbered SRT block
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            entry.write_block(out, i + 1)?;
        }
        out.flush()
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            FileManager::ensure_dir(parent)?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.render(&mut writer)
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
