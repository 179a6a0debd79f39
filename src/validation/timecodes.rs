/*!
 * Timecode validation for subtitle entries.
 *
 * This module validates that timecodes are:
 * - Logically consistent (start < end)
 * - Non-overlapping between consecutive entries
 */

use log::debug;

use crate::subtitle_processor::{SubtitleEntry, Timestamp};

/// Result of timecode validation for a single entry
#[derive(Debug, Clone)]
pub struct TimecodeEntryResult {
    /// 1-based position of the entry
    pub entry: usize,
    /// Whether the entry passed validation
    pub passed: bool,
    /// Issues found
    pub issues: Vec<TimecodeIssue>,
}

impl TimecodeEntryResult {
    /// Create a passing result
    pub fn passed(entry: usize) -> Self {
        Self {
            entry,
            passed: true,
            issues: vec![],
        }
    }

    /// Create a failing result
    pub fn failed(entry: usize, issues: Vec<TimecodeIssue>) -> Self {
        Self {
            entry,
            passed: false,
            issues,
        }
    }
}

/// Types of timecode issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeIssue {
    /// End time is not after start time
    InvalidTimeRange { start: Timestamp, end: Timestamp },
    /// Starts before the previous entry ends
    OverlapsWithEntry { other_entry: usize, overlap_ms: u32 },
}

impl std::fmt::Display for TimecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimecodeIssue::InvalidTimeRange { start, end } => {
                write!(f, "Invalid time range: {} --> {}", start, end)
            }
            TimecodeIssue::OverlapsWithEntry { other_entry, overlap_ms } => {
                write!(f, "Overlaps with entry {} by {}ms", other_entry, overlap_ms)
            }
        }
    }
}

/// Result of validating all timecodes in a collection
#[derive(Debug, Clone)]
pub struct TimecodeValidationResult {
    /// Overall pass/fail status
    pub passed: bool,
    /// Results for each entry
    pub entry_results: Vec<TimecodeEntryResult>,
    /// Total number of issues
    pub total_issues: usize,
    /// Number of overlapping entries
    pub overlap_count: usize,
}

impl TimecodeValidationResult {
    /// Get all failed entries
    pub fn failed_entries(&self) -> Vec<&TimecodeEntryResult> {
        self.entry_results.iter().filter(|r| !r.passed).collect()
    }
}

/// Timecode validator for subtitle entries
#[derive(Debug, Default)]
pub struct TimecodeValidator;

impl TimecodeValidator {
    pub fn new() -> Self {
        TimecodeValidator
    }

    /// Validate a single subtitle entry at the given 1-based position
    pub fn validate_entry(&self, position: usize, entry: &SubtitleEntry) -> TimecodeEntryResult {
        if entry.end() <= entry.start() {
            return TimecodeEntryResult::failed(
                position,
                vec![TimecodeIssue::InvalidTimeRange {
                    start: entry.start(),
                    end: entry.end(),
                }],
            );
        }
        TimecodeEntryResult::passed(position)
    }

    /// Validate a collection of subtitle entries in file order
    pub fn validate_collection(&self, entries: &[SubtitleEntry]) -> TimecodeValidationResult {
        let mut entry_results: Vec<TimecodeEntryResult> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| self.validate_entry(i + 1, e))
            .collect();

        let mut overlap_count = 0;

        for (i, pair) in entries.windows(2).enumerate() {
            let (current, next) = (&pair[0], &pair[1]);
            if current.end() > next.start() {
                let overlap_ms = current.end().as_millis() - next.start().as_millis();
                overlap_count += 1;

                // Add issue to the later entry
                let result = &mut entry_results[i + 1];
                result.issues.push(TimecodeIssue::OverlapsWithEntry {
                    other_entry: i + 1,
                    overlap_ms,
                });
                result.passed = false;
            }
        }

        let total_issues: usize = entry_results.iter().map(|r| r.issues.len()).sum();
        let passed = total_issues == 0;

        debug!(
            "Timecode validation: {} entries, {} issues, {} overlaps",
            entries.len(),
            total_issues,
            overlap_count
        );

        TimecodeValidationResult {
            passed,
            entry_results,
            total_issues,
            overlap_count,
        }
    }
}
