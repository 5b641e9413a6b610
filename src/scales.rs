//! Scale catalogue.
//!
//! A catalogue holds the chromatic "Free" scale followed by the MOS scales of every temperament
//! family active in an EDO. A song stores the index of its scale, so for a given EDO the order of
//! the catalogue is fixed: families in [`TEMPERAMENTS`] order, sizes smallest first, modes by the
//! number of generators stacked downward.

use std::ops::Range;

use log::debug;

use crate::{
    generator::{MosShape, Temperament, TEMPERAMENTS},
    TuningError,
};

/// Name of the scale containing every pitch class, always first in a catalogue.
pub const FREE_SCALE_NAME: &str = "Free";

/// A scale: a named subset of the pitch classes of an EDO.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scale {
    /// Position in the catalogue.
    pub index: usize,

    /// Display name, the mode followed by the family label.
    pub name: String,

    /// Theoretical name, the temperament followed by `generators up|generators down`.
    pub real_name: String,

    /// One flag per pitch class, set for the members of the scale.
    pub flags: Vec<bool>,
}

impl Scale {
    fn free(edo: usize) -> Self {
        Scale {
            index: 0,
            name: FREE_SCALE_NAME.to_string(),
            real_name: FREE_SCALE_NAME.to_string(),
            flags: vec![true; edo],
        }
    }

    /// Number of notes in the scale.
    pub fn len(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    /// True if the scale has no notes. Never the case for catalogue scales.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `pitch`, in any octave, belongs to the scale.
    ///
    /// ```
    /// # use edo_scales_rs::create_scales;
    /// let major = create_scales(12)
    ///     .unwrap()
    ///     .into_iter()
    ///     .find(|s| s.real_name == "Meantone 5|1")
    ///     .unwrap();
    /// assert!(major.contains(16));
    /// assert!(major.contains(-1));
    /// assert!(!major.contains(13));
    /// ```
    pub fn contains(&self, pitch: i64) -> bool {
        if self.flags.is_empty() {
            return false;
        }
        let pitch_class = pitch.rem_euclid(self.flags.len() as i64) as usize;
        self.flags[pitch_class]
    }

    /// The pitch classes in the scale, ascending.
    pub fn pitch_classes(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.then_some(i))
    }

    /// Sizes of the steps between consecutive notes, the last one wrapping to the octave.
    pub fn step_sizes(&self) -> Vec<usize> {
        let edo = self.flags.len();
        let pitches: Vec<usize> = self.pitch_classes().collect();
        (0..pitches.len())
            .map(|i| match pitches.get(i + 1) {
                Some(next) => next - pitches[i],
                None => pitches[0] + edo - pitches[i],
            })
            .collect()
    }
}

/// Builds every mode of one MOS scale.
///
/// `generator_steps` is the generator in steps of `edo`. Mode `k` stacks `shape.size - 1 - k`
/// generators up from the root and `k` down. The scales are numbered from `first_index`.
///
/// Returns a `TuningError::ZeroEdo` if `edo` is 0.
///
/// ```
/// # use edo_scales_rs::*;
/// let diatonic = &DIATONIC.shapes[1];
/// let modes = build_mos(12, 7, &DIATONIC, diatonic, 0).unwrap();
/// assert_eq!(modes.len(), 7);
/// assert_eq!(modes[1].name, "Major (Diatonic)");
/// assert_eq!(modes[1].pitch_classes().collect::<Vec<_>>(), [0, 2, 4, 5, 7, 9, 11]);
/// ```
pub fn build_mos(
    edo: usize,
    generator_steps: usize,
    temperament: &Temperament,
    shape: &MosShape,
    first_index: usize,
) -> Result<Vec<Scale>, TuningError> {
    if edo == 0 {
        return Err(TuningError::ZeroEdo);
    }
    let complement = (edo - generator_steps % edo) % edo;

    let scales = (0..shape.size)
        .map(|gens_down| {
            let gens_up = shape.size - 1 - gens_down;

            let mut flags = vec![false; edo];
            flags[0] = true;
            for i in 1..=gens_up {
                flags[(generator_steps * i) % edo] = true;
            }
            for i in 1..=gens_down {
                flags[(complement * i) % edo] = true;
            }

            Scale {
                index: first_index + gens_down,
                name: format!("{} ({})", shape.modes[gens_down], temperament.label),
                real_name: format!("{} {gens_up}|{gens_down}", temperament.name),
                flags,
            }
        })
        .collect();

    Ok(scales)
}

/// Scales of an EDO together with their grouping.
///
/// `breaks[i]` is the index one past the last scale of group `i`, named `break_names[i]`. Group
/// 0 is the Free scale alone, so `breaks[0]` is always 1.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaleCatalogue {
    /// The scales, indexed by [`Scale::index`].
    pub scales: Vec<Scale>,

    /// Ascending group ends.
    pub breaks: Vec<usize>,

    /// Group labels, one per entry of `breaks`.
    pub break_names: Vec<String>,
}

impl ScaleCatalogue {
    /// Builds the catalogue of `edo`.
    ///
    /// Returns a `TuningError::ZeroEdo` if `edo` is 0.
    ///
    /// ```
    /// # use edo_scales_rs::ScaleCatalogue;
    /// let catalogue = ScaleCatalogue::new(12).unwrap();
    /// assert_eq!(catalogue.scales.len(), 13);
    /// assert_eq!(catalogue.breaks, [1, 13]);
    /// assert_eq!(catalogue.break_names, ["Free", "Diatonic"]);
    /// ```
    pub fn new(edo: u32) -> Result<Self, TuningError> {
        if edo == 0 {
            return Err(TuningError::ZeroEdo);
        }
        let edo = edo as usize;

        let mut catalogue = ScaleCatalogue {
            scales: vec![Scale::free(edo)],
            breaks: vec![1],
            break_names: vec![FREE_SCALE_NAME.to_string()],
        };

        for temperament in TEMPERAMENTS.iter() {
            let generator = temperament.resolve(edo);
            if !temperament.range.contains(generator) {
                debug!(
                    "{edo}edo: {} inactive, generator {}\\{edo} ({:.4} of an octave)",
                    temperament.label,
                    generator.steps,
                    generator.value()
                );
                continue;
            }

            let before = catalogue.scales.len();
            for shape in temperament.shapes {
                if !shape.range.contains(generator) {
                    debug!(
                        "{edo}edo: {} has no {} note scale",
                        temperament.label, shape.size
                    );
                    continue;
                }
                let first_index = catalogue.scales.len();
                catalogue.scales.extend(build_mos(
                    edo,
                    generator.steps,
                    temperament,
                    shape,
                    first_index,
                )?);
            }

            if catalogue.scales.len() > before {
                debug!(
                    "{edo}edo: {} adds {} scales",
                    temperament.label,
                    catalogue.scales.len() - before
                );
                catalogue.breaks.push(catalogue.scales.len());
                catalogue.break_names.push(temperament.label.to_string());
            }
        }

        Ok(catalogue)
    }

    /// Label and index range of each group, in order.
    ///
    /// ```
    /// # use edo_scales_rs::ScaleCatalogue;
    /// let catalogue = ScaleCatalogue::new(12).unwrap();
    /// let groups: Vec<_> = catalogue.groups().collect();
    /// assert_eq!(groups, [("Free", 0..1), ("Diatonic", 1..13)]);
    /// ```
    pub fn groups(&self) -> impl Iterator<Item = (&str, Range<usize>)> + '_ {
        self.break_names
            .iter()
            .zip(self.breaks.iter())
            .scan(0, |start, (name, end)| {
                let range = *start..*end;
                *start = *end;
                Some((name.as_str(), range))
            })
    }

    /// Returns the scale whose [`Scale::real_name`] is `real_name`.
    pub fn find_by_real_name(&self, real_name: &str) -> Option<&Scale> {
        self.scales.iter().find(|s| s.real_name == real_name)
    }
}

/// Returns the scales of `edo`, starting with the Free scale.
pub fn create_scales(edo: u32) -> Result<Vec<Scale>, TuningError> {
    Ok(ScaleCatalogue::new(edo)?.scales)
}

/// Returns the group ends of the scales of `edo`. See [`ScaleCatalogue::breaks`].
pub fn create_breaks(edo: u32) -> Result<Vec<usize>, TuningError> {
    Ok(ScaleCatalogue::new(edo)?.breaks)
}

/// Returns the group labels of the scales of `edo`. See [`ScaleCatalogue::break_names`].
pub fn create_break_names(edo: u32) -> Result<Vec<String>, TuningError> {
    Ok(ScaleCatalogue::new(edo)?.break_names)
}
