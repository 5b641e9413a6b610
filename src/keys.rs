//! Key naming.
//!
//! Keys are spelled by walking a family's letter chains outward from C along the EDO's best fifth
//! (or its complement), then filling the remaining steps with `+`/`-` inflections of their named
//! neighbours.

use log::{debug, trace};

use crate::{
    generator::{best_generator, Fraction, StepRatio, Temperament, DIATONIC, MAVILA, ONEIROTONIC},
    TuningError,
};

/// Names used when the fifth is exactly 3\5: five letters with equal steps between them.
const PENTATONIC_LETTERS: [&str; 5] = ["C", "D", "F", "G", "A"];

/// 6edo has no usable fifth, so it gets a whole tone scale missing G.
const EDO_6_NAMES: [&str; 6] = ["C", "D", "E", "F", "A", "B"];

/// 11edo is spelled as orgone rather than with its mavila fifth.
const EDO_11_NAMES: [&str; 11] = ["C", "C♯", "D", "E", "E♯", "F", "F♯", "G", "A", "A♯", "B"];

/// Diatonic spellings left to inflection because they read worse than `E+`/`B+`.
const SUPPRESSED_DIATONIC_NAMES: [&str; 2] = ["E♯", "B♯"];

/// A single key of an EDO.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    /// Pitch class, `0..edo`.
    pub index: usize,

    /// Spelled name, e.g. `"C"`, `"F♯"` or `"E+"`.
    pub name: String,

    /// True for uninflected single letter names.
    pub is_white_key: bool,

    /// Pitch of this key in the octave above the root, `index + edo`.
    pub base_pitch: usize,
}

impl Key {
    fn new(index: usize, name: String, edo: usize) -> Self {
        Key {
            is_white_key: name.chars().count() == 1,
            index,
            name,
            base_pitch: index + edo,
        }
    }

    /// Position of the key above C in cents, in an `edo` tuning.
    ///
    /// ```
    /// # use edo_scales_rs::create_keys;
    /// let keys = create_keys(12).unwrap();
    /// assert_eq!(keys[7].cents(12), 700.0);
    /// ```
    pub fn cents(&self, edo: usize) -> f64 {
        1200.0 * self.index as f64 / edo as f64
    }
}

/// Which spelling rule the fifth of an EDO selects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Branch {
    Pentatonic,
    Diatonic,
    Mavila,
    Oneirotonic,
}

impl Branch {
    fn for_fifth(fifth: StepRatio) -> Self {
        if fifth == Fraction::new(3, 5) {
            Branch::Pentatonic
        } else if fifth >= Fraction::new(4, 7) && fifth < Fraction::new(3, 5) {
            // Includes 7edo, whose fifth equalizes the diatonic scale.
            Branch::Diatonic
        } else if fifth < Fraction::new(4, 7) {
            Branch::Mavila
        } else {
            // Above 3\5 the "fifth" is really the sixth degree of an eight note scale.
            Branch::Oneirotonic
        }
    }
}

/// Returns the spelled keys of `edo`, one per pitch class.
///
/// Returns a `TuningError::ZeroEdo` if `edo` is 0.
///
/// ```
/// # use edo_scales_rs::create_keys;
/// let names: Vec<String> = create_keys(12).unwrap().into_iter().map(|k| k.name).collect();
/// assert_eq!(
///     names,
///     ["C", "C♯", "D", "E♭", "E", "F", "F♯", "G", "G♯", "A", "B♭", "B"]
/// );
/// ```
pub fn create_keys(edo: u32) -> Result<Vec<Key>, TuningError> {
    if edo == 0 {
        return Err(TuningError::ZeroEdo);
    }
    let edo = edo as usize;

    let names = match edo {
        6 => EDO_6_NAMES.iter().map(|n| n.to_string()).collect(),
        11 => EDO_11_NAMES.iter().map(|n| n.to_string()).collect(),
        _ => spell_keys(edo)?,
    };

    Ok(names
        .into_iter()
        .enumerate()
        .map(|(index, name)| Key::new(index, name, edo))
        .collect())
}

fn spell_keys(edo: usize) -> Result<Vec<String>, TuningError> {
    let fifth = StepRatio::new(best_generator(edo, DIATONIC.generator.log2()), edo);
    let branch = Branch::for_fifth(fifth);
    debug!(
        "{edo}edo: fifth of {}\\{edo} selects {branch:?} spelling",
        fifth.steps
    );

    if branch == Branch::Pentatonic {
        return Ok(spell_pentatonic(edo));
    }

    let mut keys: Vec<Option<String>> = vec![None; edo];
    keys[0] = Some(String::from("C"));

    // Diatonic spelling runs along the fifth, the others along the fourth.
    let (temperament, generator) = match branch {
        Branch::Diatonic => (&DIATONIC, fifth.steps % edo),
        Branch::Mavila => (&MAVILA, (edo - fifth.steps) % edo),
        _ => (&ONEIROTONIC, (edo - fifth.steps) % edo),
    };
    let suppressed: &[&str] = if branch == Branch::Diatonic {
        &SUPPRESSED_DIATONIC_NAMES
    } else {
        &[]
    };

    // Beyond 7 notes per cycle, the extra steps are split between the two chains.
    let extra = fifth.period() as i64 - 7;
    let upward_count = 5 + (extra.div_euclid(2) + extra.rem_euclid(2)).min(7);
    let downward_count = 1 + extra.div_euclid(2).min(7);

    walk_chain(
        &mut keys,
        temperament,
        temperament.spelling.upward,
        generator,
        upward_count,
        suppressed,
    );
    walk_chain(
        &mut keys,
        temperament,
        temperament.spelling.downward,
        (edo - generator) % edo,
        downward_count,
        suppressed,
    );

    finish_keys(keys)
}

fn walk_chain(
    keys: &mut [Option<String>],
    temperament: &Temperament,
    names: &[&str],
    step: usize,
    count: i64,
    suppressed: &[&str],
) {
    let edo = keys.len();
    for i in 1..=count.max(0) as usize {
        let Some(name) = names.get(i) else {
            break;
        };
        if suppressed.contains(name) {
            continue;
        }

        let pitch = (step * i) % edo;
        if keys[pitch].is_none() {
            trace!("{edo}edo: {} names {pitch} {name}", temperament.label);
            keys[pitch] = Some(name.to_string());
        }
    }
}

fn spell_pentatonic(edo: usize) -> Vec<String> {
    let letter_step = (edo as f64 / 5.0).round() as usize;
    let above = letter_step / 2;
    let below = (letter_step - 1) / 2;

    let mut keys = vec![String::new(); edo];
    for (i, letter) in PENTATONIC_LETTERS.iter().enumerate() {
        let pitch = i * letter_step;
        keys[pitch] = letter.to_string();
        for j in 1..=above {
            keys[pitch + j] = format!("{letter}{}", "+".repeat(j));
        }
        for j in 1..=below {
            keys[(pitch + edo - j) % edo] = format!("{letter}{}", "-".repeat(j));
        }
    }

    keys
}

/// Fills unnamed keys from their neighbours until every key has a name.
///
/// Keys are scanned upward in place, so a key named earlier in a pass already counts as a
/// neighbour for the next one and a gap fills upward from its lower end.
fn finish_keys(mut keys: Vec<Option<String>>) -> Result<Vec<String>, TuningError> {
    let edo = keys.len();
    let mut passes = 0;

    while keys.iter().any(Option::is_none) {
        if passes > edo {
            return Err(TuningError::UnfinishedKeys {
                edo,
                unnamed: keys.iter().filter(|k| k.is_none()).count(),
            });
        }
        passes += 1;

        for i in 0..edo {
            if keys[i].is_some() {
                continue;
            }

            let filled = match (&keys[(i + edo - 1) % edo], &keys[(i + 1) % edo]) {
                (Some(lower), _) => Some(format!("{lower}+")),
                (None, Some(upper)) => Some(format!("{upper}-")),
                (None, None) => None,
            };
            keys[i] = filled;
        }
    }

    debug!("{edo}edo: keys finished after {passes} passes");
    Ok(keys.into_iter().flatten().collect())
}
