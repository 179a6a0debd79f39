use anyhow::{Context, Result};
use std::fs;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

// @module: File and line reading utilities

// @const: UTF-8 byte order mark some editors put in front of SRT files
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Character encoding of a subtitle file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Strict UTF-8; invalid sequences are read errors
    #[default]
    Utf8,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
}

impl TextEncoding {
    // @returns: Canonical encoding name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin1",
        }
    }

    /// Decode one raw line
    pub fn decode(&self, bytes: Vec<u8>) -> io::Result<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Self::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            _ => Err(anyhow::anyhow!(
                "Unsupported encoding: {} (expected utf-8 or latin1)",
                s
            )),
        }
    }
}

/// Line iterator over a subtitle source
///
/// Yields each line without its terminator (`\n` or `\r\n`), decoded with
/// the configured encoding. A UTF-8 byte order mark on the first line is dropped.
pub struct SubtitleLines<R> {
    reader: R,
    encoding: TextEncoding,
    first_line: bool,
}

impl<R: BufRead> SubtitleLines<R> {
    pub fn new(reader: R, encoding: TextEncoding) -> Self {
        SubtitleLines {
            reader,
            encoding,
            first_line: true,
        }
    }
}

impl<R: BufRead> Iterator for SubtitleLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                if self.first_line {
                    self.first_line = false;
                    if self.encoding == TextEncoding::Utf8 && buf.starts_with(UTF8_BOM) {
                        buf.drain(..UTF8_BOM.len());
                    }
                }
                Some(self.encoding.decode(buf))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @opens: Line reader over a subtitle file
    pub fn read_lines<P: AsRef<Path>>(
        path: P,
        encoding: TextEncoding,
    ) -> io::Result<SubtitleLines<BufReader<File>>> {
        let file = File::open(path)?;
        Ok(SubtitleLines::new(BufReader::new(file), encoding))
    }

    // @generates: Sibling path carrying a suffix before the extension
    // @example: movie.srt + "shifted" -> movie.shifted.srt
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, suffix: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(suffix);
        output_filename.push_str(".srt");

        match input_file.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        }
    }
}
