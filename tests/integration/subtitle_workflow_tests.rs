/*!
 * Integration tests for the load, shift and write workflow
 */

use anyhow::Result;
use std::fs;

use subshift::app_config::OverflowPolicy;
use subshift::delay::Delay;
use subshift::errors::SubtitleError;
use subshift::file_utils::TextEncoding;
use subshift::subtitle_processor::SubtitleCollection;
use crate::common;

/// Test that we can load, shift, save and reload subtitles in a full workflow
#[test]
fn test_subtitle_workflow_withFullProcess_shouldSucceed() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_subtitle(temp_dir.path(), "source.srt")?;

    // 1. Load
    let collection = SubtitleCollection::load(&source, TextEncoding::Utf8)?;
    assert_eq!(collection.entries.len(), 3);

    // 2. Shift two seconds later
    let shifted = collection.shift("+2 s".parse::<Delay>()?, OverflowPolicy::Wrap)?;

    // 3. Save into a directory that does not exist yet
    let output = temp_dir.path().join("out").join("shifted.srt");
    shifted.write_to_srt(&output)?;
    assert!(output.exists());

    // 4. Reload and compare
    let reloaded = SubtitleCollection::load(&output, TextEncoding::Utf8)?;
    assert_eq!(reloaded.entries, shifted.entries);
    assert_eq!(reloaded.entries[0].start().to_string(), "00:00:03,000");
    assert_eq!(reloaded.entries[2].end().to_string(), "00:00:16,000");

    let written = fs::read_to_string(&output)?;
    assert!(written.starts_with("1\n00:00:03,000 --> 00:00:06,000\nThis is a test subtitle.\n\n"));
    assert!(written.ends_with("For testing purposes.\n\n"));

    Ok(())
}

/// Test the bundled three-entry file keeps its multi-line text through a shift
#[test]
fn test_subtitle_workflow_withMultilineResource_shouldKeepText() -> Result<()> {
    let path = common::test_resource_path("3entry.srt");
    let collection = SubtitleCollection::load(&path, TextEncoding::Utf8)?;
    let shifted = collection.shift(Delay::parse("-500", "ms")?, OverflowPolicy::Reject)?;

    assert_eq!(shifted.entries.len(), 3);
    assert_eq!(
        shifted.entries[1].text(),
        "It contains multiple entries\nacross two lines."
    );
    assert_eq!(shifted.entries[0].start().to_string(), "00:00:00,500");

    let mut out = Vec::new();
    shifted.render(&mut out)?;
    let rendered = String::from_utf8(out)?;
    assert!(rendered.contains("2\n00:00:04,500 --> 00:00:08,500\nIt contains multiple entries\nacross two lines.\n\n"));

    Ok(())
}

/// Test that shifting before midnight under each policy behaves as configured
#[test]
fn test_subtitle_workflow_withNegativeOverflow_shouldFollowPolicy() -> Result<()> {
    let path = common::test_resource_path("1entry.srt");
    let collection = SubtitleCollection::load(&path, TextEncoding::Utf8)?;
    let delay = Delay::parse("-10", "m")?;

    let wrapped = collection.shift(delay, OverflowPolicy::Wrap)?;
    assert_eq!(wrapped.entries[0].start().to_string(), "23:55:05,704");
    assert_eq!(wrapped.entries[0].end().to_string(), "23:55:07,039");

    let saturated = collection.shift(delay, OverflowPolicy::Saturate)?;
    assert_eq!(saturated.entries[0].start().to_string(), "00:00:00,000");
    assert_eq!(saturated.entries[0].end().to_string(), "00:00:00,000");

    let err = collection.shift(delay, OverflowPolicy::Reject).unwrap_err();
    assert!(matches!(err, SubtitleError::TimeOverflow { entry: 1, .. }));

    Ok(())
}

/// Test that CRLF files with a byte order mark load like plain ones
#[test]
fn test_subtitle_workflow_withWindowsLineEndings_shouldLoad() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("\u{feff}{}", common::THREE_ENTRIES.replace('\n', "\r\n"));
    let path = common::create_test_file(temp_dir.path(), "windows.srt", &content)?;

    let collection = SubtitleCollection::load(&path, TextEncoding::Utf8)?;
    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.entries[2].text(), "For testing purposes.");
    Ok(())
}

/// Test that a missing input file surfaces as an IO error naming the path
#[test]
fn test_subtitle_workflow_withMissingFile_shouldFailWithIo() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.srt");

    let err = SubtitleCollection::load(&missing, TextEncoding::Utf8).unwrap_err();
    assert!(matches!(err, SubtitleError::Io { .. }));
    assert!(err.to_string().contains("missing.srt"));
    Ok(())
}

/// Test that an empty file loads as an empty collection
#[test]
fn test_subtitle_workflow_withEmptyFile_shouldLoadNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "empty.srt", "")?;

    let collection = SubtitleCollection::load(&path, TextEncoding::Utf8)?;
    assert!(collection.entries.is_empty());
    Ok(())
}
