//! Construction-time configuration.
use std::ops::Range;

use crate::error::ValidationError;
use crate::El;

/// Default offset of the first point of a permutation's domain.
pub const PERMUTATION_INDEX: El = 0;

/// Largest value that has a single character encoding.
pub const MAX_ALLOWED_PERMUTATION_INDEX: El = 35;

/// Bounds used when validating and encoding permutations.
///
/// A permutation of length n built with a config of base b is a bijection on `b..b + n`. All of
/// its values must also be at most `max_index`, so that they stay encodable as a single character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    base: El,
    max_index: El,
}

impl Config {
    /// Base 0 and the full 36 character alphabet.
    pub const DEFAULT: Config = Config {
        base: PERMUTATION_INDEX,
        max_index: MAX_ALLOWED_PERMUTATION_INDEX,
    };

    /// Create a config.
    ///
    /// Fails when `max_index` is not encodable or when `base` exceeds it.
    pub fn new(base: El, max_index: El) -> Result<Config, ValidationError> {
        if max_index > MAX_ALLOWED_PERMUTATION_INDEX || base > max_index {
            debug_log!(base, max_index, "rejected config");
            return Err(ValidationError::InvalidConfig { base, max_index });
        }
        Ok(Config { base, max_index })
    }

    /// Create a config with the given base and the largest encodable `max_index`.
    pub fn with_base(base: El) -> Result<Config, ValidationError> {
        Self::new(base, MAX_ALLOWED_PERMUTATION_INDEX)
    }

    pub fn base(&self) -> El {
        self.base
    }

    pub fn max_index(&self) -> El {
        self.max_index
    }

    /// The logical domain of a permutation of length `len`.
    pub fn domain(&self, len: usize) -> Range<El> {
        self.base..self.base + len as El
    }

    /// Checks that `values` is a permutation of `self.domain(values.len())`.
    pub fn validate(&self, values: &[El]) -> Result<(), ValidationError> {
        let len = values.len();
        let mut seen = vec![false; len];

        for &value in values {
            if value < self.base || value > self.max_index {
                debug_log!(value, "value out of range");
                return Err(ValidationError::OutOfRange {
                    value,
                    min: self.base,
                    max: self.max_index,
                });
            }
            let offset = (value - self.base) as usize;
            match seen.get_mut(offset) {
                None => {
                    debug_log!(value, len, "value outside of domain");
                    return Err(ValidationError::OutOfDomain { value, len });
                }
                Some(seen_value) => {
                    if std::mem::replace(seen_value, true) {
                        debug_log!(value, "duplicate value");
                        return Err(ValidationError::Duplicate { value });
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::DEFAULT
    }
}
