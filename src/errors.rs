/*!
 * Error types for the subshift application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Literal separating the start and end times of a time-range line
pub const TIME_RANGE_SEPARATOR: &str = " --> ";

/// Errors that can occur while loading or shifting subtitle entries
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The index line is not a positive integer
    #[error("unable to load subtitle file: expected a positive (non-decimal) numeric value, got {line}")]
    IndexFormat { line: String },

    /// The index line holds a number, but not the expected one
    #[error("unable to load subtitle file: expected entry {expected}, got {line}")]
    IndexSequence {
        /// 1-based index the block should have carried
        expected: usize,
        /// Raw index line
        line: String,
    },

    /// The time-range line does not split into exactly two times
    #[error("unable to load subtitle file: expected a time frame with the format <start>{}<end>, got {line}", TIME_RANGE_SEPARATOR)]
    TimeRangeFormat { line: String },

    /// One of the two time tokens is not a valid HH:MM:SS,mmm value
    #[error("unable to load subtitle file: invalid time '{token}' for entry {entry}")]
    TimeValue { entry: usize, token: String },

    /// A block was closed without any text lines
    #[error("unable to load subtitle file: no subtitle entry text for entry {entry}")]
    EmptyText { entry: usize },

    /// The block state machine was asked to advance past its final state
    #[error("unable to progress to the next state, already at {state}")]
    InvalidTransition { state: String },

    /// An entry ends before (or when) it starts and the range policy rejects it
    #[error("invalid time range for entry {entry}: {start} --> {end}")]
    InvalidTimeRange {
        entry: usize,
        start: String,
        end: String,
    },

    /// Shifting moved a time outside a single day and the overflow policy rejects it
    #[error("shifting entry {entry} by {delay} leaves the 00:00:00,000-23:59:59,999 range")]
    TimeOverflow { entry: usize, delay: String },

    /// Reading the subtitle file failed
    #[error("unable to read subtitle file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when parsing a delay expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DelayError {
    /// The magnitude is not a signed integer
    #[error("{input} is an invalid delay value, expected [+|-]<digits>")]
    InvalidMagnitude { input: String },

    /// The unit is not one of the accepted tokens
    #[error("{input} is an invalid delay unit, expected one of: {accepted}")]
    InvalidUnit { input: String, accepted: String },

    /// The delay does not fit in a millisecond count
    #[error("{input} is out of the supported delay range")]
    OutOfRange { input: String },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from subtitle loading or shifting
    #[error(transparent)]
    Subtitle(#[from] SubtitleError),

    /// Error from the delay arguments
    #[error(transparent)]
    Delay(#[from] DelayError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error writing the shifted subtitles
    #[error("Output error: {0}")]
    Output(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Output(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
