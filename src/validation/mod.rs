/*!
 * Validation of loaded and shifted subtitles.
 *
 * - `timecodes`: inverted ranges and overlaps between entries
 *
 * `enforce_range_policy` applies the configured `RangePolicy` to a
 * validation result.
 */

pub mod timecodes;

pub use timecodes::{TimecodeIssue, TimecodeValidationResult, TimecodeValidator};

use log::warn;

use crate::app_config::RangePolicy;
use crate::errors::SubtitleError;
use crate::subtitle_processor::SubtitleEntry;

/// Check the entries' timecodes according to `policy`
///
/// `Ignore` skips validation entirely. `Warn` logs every issue. `Reject`
/// fails on the first inverted range and only logs overlaps.
pub fn enforce_range_policy(
    entries: &[SubtitleEntry],
    policy: RangePolicy,
) -> Result<(), SubtitleError> {
    if policy == RangePolicy::Ignore {
        return Ok(());
    }

    let result = TimecodeValidator::new().validate_collection(entries);
    for failed in result.failed_entries() {
        for issue in &failed.issues {
            match issue {
                TimecodeIssue::InvalidTimeRange { start, end } if policy == RangePolicy::Reject => {
                    return Err(SubtitleError::InvalidTimeRange {
                        entry: failed.entry,
                        start: start.to_string(),
                        end: end.to_string(),
                    });
                }
                _ => warn!("Entry {}: {}", failed.entry, issue),
            }
        }
    }

    Ok(())
}
