//! Permutations of up to 36 points
//!
//! This crate provides a permutation type whose points fit in a single base 36 character, so that
//! every permutation can be written either in flat form (`"120"`, the images of 0, 1 and 2) or in
//! cycle notation (`"(012)"`).
//!
//! ```
//! use sym36::Permutation;
//!
//! let p: Permutation = "120".parse().unwrap();
//! assert_eq!(p.cycles(), &[vec![0, 1, 2]]);
//! assert_eq!(p.to_cycle_string(), "(012)");
//!
//! let q = Permutation::from_cycle_string("(01)", Some(2)).unwrap();
//! assert_eq!(p.compose(&q).unwrap().to_string(), "210");
//! ```
#[macro_use]
mod trace;

pub mod action;
pub mod codec;
pub mod config;
pub mod cycles;
pub mod error;
pub mod perm;

/// Set element.
///
/// Points are represented by non-negative integers (`u32`), limited to `0..=35` by [`Config`].
pub type El = u32;

pub use config::{Config, MAX_ALLOWED_PERMUTATION_INDEX, PERMUTATION_INDEX};
pub use error::{ArityError, EncodingError, Error, ValidationError};
pub use perm::Permutation;
