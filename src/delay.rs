/*!
 * Delay expressions.
 *
 * A delay is a signed magnitude plus a unit token, e.g. `+1 m`, `-1500 ms`
 * or `30 seconds`. Units are milliseconds, seconds and minutes; the sign is
 * optional and defaults to positive.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::errors::DelayError;

// @const: Signed decimal magnitude
static MAGNITUDE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?[0-9]+$").expect("magnitude pattern is valid")
});

// @const: Magnitude and unit in one token, e.g. "+90s" or "-2 minutes"
static COMPACT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?[0-9]+)\s*([A-Za-z]+)$").expect("compact delay pattern is valid")
});

/// Unit of a delay magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayUnit {
    Milliseconds,
    Seconds,
    Minutes,
}

impl DelayUnit {
    /// Accepted unit tokens, for error messages and help text
    pub const ACCEPTED: &'static str = "ms, s, m (or milliseconds, seconds, minutes)";

    // @returns: Milliseconds in one unit
    pub fn millis(&self) -> i64 {
        match self {
            Self::Milliseconds => 1,
            Self::Seconds => 1_000,
            Self::Minutes => 60_000,
        }
    }

    // @returns: Short unit symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
        }
    }
}

impl FromStr for DelayUnit {
    type Err = DelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ms" | "millisecond" | "milliseconds" => Ok(Self::Milliseconds),
            "s" | "sec" | "second" | "seconds" => Ok(Self::Seconds),
            "m" | "min" | "minute" | "minutes" => Ok(Self::Minutes),
            _ => Err(DelayError::InvalidUnit {
                input: s.to_string(),
                accepted: Self::ACCEPTED.to_string(),
            }),
        }
    }
}

/// Signed offset applied to every subtitle entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Delay {
    millis: i64,
}

impl Delay {
    pub const ZERO: Delay = Delay { millis: 0 };

    pub fn from_millis(millis: i64) -> Self {
        Delay { millis }
    }

    pub fn as_millis(&self) -> i64 {
        self.millis
    }

    /// Parse a magnitude and a unit given as separate tokens
    pub fn parse(magnitude: &str, unit: &str) -> Result<Self, DelayError> {
        let magnitude = magnitude.trim();
        if !MAGNITUDE_REGEX.is_match(magnitude) {
            return Err(DelayError::InvalidMagnitude {
                input: magnitude.to_string(),
            });
        }
        let unit: DelayUnit = unit.parse()?;

        let out_of_range = || DelayError::OutOfRange {
            input: format!("{} {}", magnitude, unit.symbol()),
        };
        let value: i64 = magnitude.parse().map_err(|_| out_of_range())?;
        let millis = value.checked_mul(unit.millis()).ok_or_else(out_of_range)?;

        Ok(Delay { millis })
    }

    /// Sum of two delays, `None` on overflow
    pub fn checked_add(self, other: Delay) -> Option<Delay> {
        self.millis.checked_add(other.millis).map(Delay::from_millis)
    }

    // @returns: Largest unit that divides the delay exactly
    fn display_unit(&self) -> DelayUnit {
        if self.millis % DelayUnit::Minutes.millis() == 0 && self.millis != 0 {
            DelayUnit::Minutes
        } else if self.millis % DelayUnit::Seconds.millis() == 0 && self.millis != 0 {
            DelayUnit::Seconds
        } else {
            DelayUnit::Milliseconds
        }
    }
}

impl FromStr for Delay {
    type Err = DelayError;

    /// Parse `"<magnitude> <unit>"` or the compact `"<magnitude><unit>"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match COMPACT_REGEX.captures(s) {
            Some(caps) => Delay::parse(&caps[1], &caps[2]),
            None => Err(DelayError::InvalidMagnitude {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.display_unit();
        let sign = if self.millis < 0 { '-' } else { '+' };
        write!(
            f,
            "{}{}{}",
            sign,
            self.millis.unsigned_abs() / unit.millis() as u64,
            unit.symbol()
        )
    }
}
