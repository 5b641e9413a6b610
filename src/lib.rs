#![warn(missing_docs)]

//! Key and scale naming for equal divisions of the octave.
//!
//! Given an EDO (a tuning with N equal steps per octave), this library derives a spelled name for
//! every step, using diatonic-like letters with `♯`/`♭` and `+`/`-` inflections, and a catalogue
//! of Moment-of-Symmetry scales available in the tuning, grouped by temperament family.
//!
//! Everything is computed from the EDO alone. Calling the same function twice with the same EDO
//! always gives the same result, and the order of scales in a catalogue never changes for a given
//! EDO, so a scale index can be stored and looked up again later.
//!
//! ```
//! # use edo_scales_rs::*;
//! let keys = create_keys(19).unwrap();
//! assert_eq!(keys.len(), 19);
//! assert_eq!(keys[1].name, "C♯");
//! assert_eq!(keys[2].name, "D♭");
//!
//! let catalogue = ScaleCatalogue::new(19).unwrap();
//! assert_eq!(catalogue.scales[0].name, "Free");
//! assert_eq!(catalogue.breaks.len(), catalogue.break_names.len());
//! ```

use std::{error::Error, fmt::Display};

mod generator;
mod keys;
mod scales;

pub use generator::{
    best_generator, gcd, Family, Fraction, GeneratorRange, Interval, MosShape, Spelling,
    StepRatio, Temperament, CHECKERTONIC, DIATONIC, MANUAL, MAVILA, MOSH, ONEIROTONIC, SMITONIC,
    TEMPERAMENTS,
};
pub use keys::{create_keys, Key};
pub use scales::{
    build_mos, create_break_names, create_breaks, create_scales, Scale, ScaleCatalogue,
    FREE_SCALE_NAME,
};

/// Smallest EDO offered to users.
pub const MIN_EDO: u32 = 5;

/// Largest EDO offered to users.
pub const MAX_EDO: u32 = 53;

/// Errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuningError {
    /// An EDO must have at least one step.
    ZeroEdo,
    /// Key inflection stopped making progress before every key was named.
    UnfinishedKeys {
        /// The EDO being named.
        edo: usize,
        /// Number of keys left without a name.
        unnamed: usize,
    },
}

impl Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::ZeroEdo => write!(f, "EDO must have at least one step."),
            TuningError::UnfinishedKeys { edo, unnamed } => {
                write!(f, "{unnamed} keys of {edo}edo were left unnamed.")
            }
        }
    }
}

impl Error for TuningError {}

/// Turns user input into a supported EDO: clamps it to [`MIN_EDO`]..=[`MAX_EDO`] and drops any
/// fractional part. NaN gives [`MIN_EDO`].
///
/// ```
/// # use edo_scales_rs::*;
/// assert_eq!(clamp_edo(31.7), 31);
/// assert_eq!(clamp_edo(2.0), MIN_EDO);
/// assert_eq!(clamp_edo(1000.0), MAX_EDO);
/// ```
pub fn clamp_edo(value: f64) -> u32 {
    if value.is_nan() {
        return MIN_EDO;
    }

    value.clamp(MIN_EDO as f64, MAX_EDO as f64).floor() as u32
}
