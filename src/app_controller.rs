use log::{debug, info, warn};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::app_config::Config;
use crate::delay::Delay;
use crate::errors::AppError;
use crate::file_utils::TextEncoding;
use crate::subtitle_processor::SubtitleCollection;
use crate::validation;

// @module: Application controller for subtitle shifting

/// Main application controller: load, validate, shift, render
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Encoding resolved from the configuration
    encoding: TextEncoding,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        let encoding = config.text_encoding()?;
        Ok(Self { config, encoding })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the input file and shift it, without writing anything
    pub fn shift_file<P: AsRef<Path>>(
        &self,
        input_file: P,
        delay: Delay,
    ) -> Result<SubtitleCollection, AppError> {
        let input_file = input_file.as_ref();
        let start_time = Instant::now();

        let collection = SubtitleCollection::load(input_file, self.encoding)?;
        if collection.entries.is_empty() {
            warn!("No subtitle entries found in {}", input_file.display());
        }
        validation::enforce_range_policy(&collection.entries, self.config.range_policy)?;

        let shifted = collection.shift(delay, self.config.overflow_policy)?;
        validation::enforce_range_policy(&shifted.entries, self.config.range_policy)?;

        debug!(
            "Shifted {} entries from {} in {:?}",
            shifted.entries.len(),
            input_file.display(),
            start_time.elapsed()
        );
        Ok(shifted)
    }

    /// Run the main workflow, rendering into `out`; returns the entry count
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_file: P,
        delay: Delay,
        out: &mut W,
    ) -> Result<usize, AppError> {
        let shifted = self.shift_file(input_file, delay)?;
        shifted.render(out)?;
        Ok(shifted.entries.len())
    }

    /// Run the main workflow, writing the shifted subtitles to `output_file`
    pub fn run_to_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        input_file: P1,
        delay: Delay,
        output_file: P2,
    ) -> Result<usize, AppError> {
        let output_file = output_file.as_ref();
        let shifted = self.shift_file(input_file, delay)?;
        shifted
            .write_to_srt(output_file)
            .map_err(|e| AppError::Output(format!("{:#}", e)))?;

        info!(
            "Wrote {} entries shifted by {} to {}",
            shifted.entries.len(),
            delay,
            output_file.display()
        );
        Ok(shifted.entries.len())
    }
}
