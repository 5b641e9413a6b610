//! Temperament families and their generators.
//!
//! Every family is described by a [`Temperament`]: the just interval its generator approximates,
//! the range of `generator / edo` ratios for which the family makes sense, the letter chains used
//! to spell keys and the MOS scale sizes it provides.

use std::{cmp::Ordering, fmt::Display, ops::Bound};

/// A generator interval, stored as an exact just ratio (or a root of one).
///
/// ```
/// # use edo_scales_rs::Interval;
/// let fifth = Interval::Ratio(3, 2);
/// assert!((fifth.cents() - 701.955).abs() < 1e-3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Interval {
    /// A just ratio `n/d`.
    Ratio(u32, u32),

    /// The `root`-th root of the just ratio `n/d`.
    RatioRoot(u32, u32, u32),
}

impl Interval {
    /// Base 2 logarithm of the interval, i.e. its size in octaves.
    pub fn log2(&self) -> f64 {
        match self {
            Self::Ratio(n, d) => (*n as f64 / *d as f64).log2(),
            Self::RatioRoot(n, d, root) => (*n as f64 / *d as f64).log2() / *root as f64,
        }
    }

    /// Size of the interval in cents.
    pub fn cents(&self) -> f64 {
        1200.0 * self.log2()
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interval::Ratio(n, d) => write!(f, "{n}/{d}"),
            Interval::RatioRoot(n, d, 2) => write!(f, "sqrt({n}/{d})"),
            Interval::RatioRoot(n, d, 3) => write!(f, "cbrt({n}/{d})"),
            Interval::RatioRoot(n, d, root) => write!(f, "({n}/{d})^(1/{root})"),
        }
    }
}

/// An exact fraction of the octave, used as a bound on generator ratios.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fraction {
    /// Numerator.
    pub num: u32,

    /// Denominator. Never 0.
    pub den: u32,
}

impl Fraction {
    /// Constructs `num/den`.
    pub const fn new(num: u32, den: u32) -> Self {
        Fraction { num, den }
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// A generator rounded to a whole number of EDO steps.
///
/// ```
/// # use edo_scales_rs::{Fraction, StepRatio};
/// let fifth = StepRatio::new(7, 12);
/// assert!(fifth > Fraction::new(4, 7));
/// assert!(StepRatio::new(6, 10) == Fraction::new(3, 5));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepRatio {
    /// Generator size in steps.
    pub steps: usize,

    /// Number of steps per octave.
    pub edo: usize,
}

impl StepRatio {
    /// Constructs `steps/edo`.
    pub fn new(steps: usize, edo: usize) -> Self {
        StepRatio { steps, edo }
    }

    /// Number of distinct pitch classes the generator reaches before it cycles back to the root.
    pub fn period(&self) -> usize {
        self.edo / gcd(self.edo, self.steps)
    }

    /// The ratio as a float, for display only. Comparisons are done exactly.
    pub fn value(&self) -> f64 {
        self.steps as f64 / self.edo as f64
    }
}

impl PartialEq<Fraction> for StepRatio {
    fn eq(&self, other: &Fraction) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<Fraction> for StepRatio {
    fn partial_cmp(&self, other: &Fraction) -> Option<Ordering> {
        let lhs = self.steps as u64 * other.den as u64;
        let rhs = other.num as u64 * self.edo as u64;
        Some(lhs.cmp(&rhs))
    }
}

/// Greatest common divisor. `gcd(a, 0) == a`.
pub fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Rounds `log2_ratio * edo` to the nearest step count, halves away from zero.
///
/// ```
/// # use edo_scales_rs::best_generator;
/// assert_eq!(best_generator(12, (3.0f64 / 2.0).log2()), 7);
/// assert_eq!(best_generator(31, (3.0f64 / 2.0).log2()), 18);
/// ```
pub fn best_generator(edo: usize, log2_ratio: f64) -> usize {
    (log2_ratio * edo as f64).round().max(0.0) as usize
}

/// Range of generator ratios, each end inclusive, exclusive or open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GeneratorRange {
    /// Lower bound.
    pub low: Bound<Fraction>,

    /// Upper bound.
    pub high: Bound<Fraction>,
}

impl GeneratorRange {
    /// `[low, high]`
    pub const fn closed(low: Fraction, high: Fraction) -> Self {
        GeneratorRange {
            low: Bound::Included(low),
            high: Bound::Included(high),
        }
    }

    /// `(low, high)`
    pub const fn open(low: Fraction, high: Fraction) -> Self {
        GeneratorRange {
            low: Bound::Excluded(low),
            high: Bound::Excluded(high),
        }
    }

    /// `[low, high)`
    pub const fn closed_open(low: Fraction, high: Fraction) -> Self {
        GeneratorRange {
            low: Bound::Included(low),
            high: Bound::Excluded(high),
        }
    }

    /// Whether `ratio` lies within the range.
    pub fn contains(&self, ratio: StepRatio) -> bool {
        let above_low = match self.low {
            Bound::Included(f) => ratio >= f,
            Bound::Excluded(f) => ratio > f,
            Bound::Unbounded => true,
        };
        let below_high = match self.high {
            Bound::Included(f) => ratio <= f,
            Bound::Excluded(f) => ratio < f,
            Bound::Unbounded => true,
        };

        above_low && below_high
    }
}

/// The temperament families, in catalogue order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// Meantone, generated by a fifth between 4\7 and 3\5.
    Diatonic,
    /// Mavila, generated by a wide fourth (flat fifth).
    Mavila,
    /// Sensi, generated by a sharp minor sixth.
    Checkertonic,
    /// Generated by a flat fourth, three of which make a compound sixth.
    Oneirotonic,
    /// Mohajira, generated by a neutral third.
    Mosh,
    /// Orgone, generated by a wide major sixth.
    Smitonic,
    /// Semaphore, generated by a semifourth.
    Manual,
}

/// Letter chains used to spell keys outward from C.
///
/// Both chains start with "C" at index 0. `upward` names the positions reached by stacking the
/// generator, `downward` those reached by stacking its octave complement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Spelling {
    /// Names along the generator chain.
    pub upward: &'static [&'static str],

    /// Names along the complement chain.
    pub downward: &'static [&'static str],
}

impl Spelling {
    const NONE: Spelling = Spelling {
        upward: &[],
        downward: &[],
    };
}

/// One MOS scale size offered by a family.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MosShape {
    /// Number of notes, which is also the number of modes.
    pub size: usize,

    /// Generator ratios for which this size is offered.
    pub range: GeneratorRange,

    /// Mode names, indexed by the number of generators stacked downward.
    pub modes: &'static [&'static str],
}

/// Generator descriptor of a temperament family.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Temperament {
    /// Which family this is.
    pub family: Family,

    /// Display label, used to group scales.
    pub label: &'static str,

    /// Theoretical name, used in [`Scale::real_name`][crate::Scale::real_name].
    pub name: &'static str,

    /// The just interval the generator approximates.
    pub generator: Interval,

    /// Ratios for which the family is active at all.
    pub range: GeneratorRange,

    /// Key spelling. Empty for families that never name keys.
    pub spelling: Spelling,

    /// Scale sizes, smallest first.
    pub shapes: &'static [MosShape],
}

impl Temperament {
    /// Returns the descriptor of `family`.
    pub fn for_family(family: Family) -> &'static Temperament {
        &TEMPERAMENTS[family as usize]
    }

    /// Rounds the generator to `edo` steps.
    pub fn resolve(&self, edo: usize) -> StepRatio {
        StepRatio::new(best_generator(edo, self.generator.log2()), edo)
    }

    /// Whether the family provides any scales in `edo`.
    pub fn is_active(&self, edo: usize) -> bool {
        self.range.contains(self.resolve(edo))
    }
}

const fn frac(num: u32, den: u32) -> Fraction {
    Fraction::new(num, den)
}

const PENTATONIC_NUMERALS: &[&str] = &[
    "Pentatonic I",
    "Pentatonic II",
    "Pentatonic III",
    "Pentatonic IV",
    "Pentatonic V",
];

/// Meantone.
pub const DIATONIC: Temperament = Temperament {
    family: Family::Diatonic,
    label: "Diatonic",
    name: "Meantone",
    generator: Interval::Ratio(3, 2),
    range: GeneratorRange::closed(frac(4, 7), frac(3, 5)),
    spelling: Spelling {
        upward: &[
            "C", "G", "D", "A", "E", "B", "F♯", "C♯", "G♯", "D♯", "A♯", "E♯", "B♯",
        ],
        downward: &["C", "F", "B♭", "E♭", "A♭", "D♭", "G♭", "C♭", "F♭"],
    },
    shapes: &[
        MosShape {
            size: 5,
            range: GeneratorRange::closed(frac(4, 7), frac(3, 5)),
            modes: &[
                "Major Pentatonic",
                "Blues Major",
                "Suspended Pentatonic",
                "Minor Pentatonic",
                "Blues Minor",
            ],
        },
        // At exactly 4\7 the seven note scale is 7edo itself, and at 3\5 it wraps onto itself.
        MosShape {
            size: 7,
            range: GeneratorRange::open(frac(4, 7), frac(3, 5)),
            modes: &[
                "Lydian",
                "Major",
                "Mixolydian",
                "Dorian",
                "Minor",
                "Phrygian",
                "Locrian",
            ],
        },
    ],
};

/// Mavila. The generator is the wide fourth, so its chains run opposite to meantone's.
pub const MAVILA: Temperament = Temperament {
    family: Family::Mavila,
    label: "Mavila",
    name: "Mavila",
    generator: Interval::Ratio(11, 8),
    range: GeneratorRange::closed_open(frac(3, 7), frac(1, 2)),
    spelling: Spelling {
        upward: &[
            "C", "F", "B", "E", "A", "D", "G♯", "C♯", "F♯", "B♯", "E♯", "A♯", "D♯",
        ],
        downward: &["C", "G", "D♭", "A♭", "E♭", "B♭", "F♭", "C♭"],
    },
    shapes: &[
        MosShape {
            size: 5,
            range: GeneratorRange::closed_open(frac(3, 7), frac(1, 2)),
            modes: PENTATONIC_NUMERALS,
        },
        MosShape {
            size: 7,
            range: GeneratorRange::open(frac(3, 7), frac(1, 2)),
            modes: &[
                "Anti-Locrian",
                "Anti-Phrygian",
                "Anti-Minor",
                "Anti-Dorian",
                "Anti-Mixolydian",
                "Anti-Major",
                "Anti-Lydian",
            ],
        },
    ],
};

/// Sensi.
pub const CHECKERTONIC: Temperament = Temperament {
    family: Family::Checkertonic,
    label: "Checkertonic",
    name: "Sensi",
    generator: Interval::Ratio(14, 9),
    range: GeneratorRange::closed_open(frac(5, 8), frac(2, 3)),
    spelling: Spelling::NONE,
    shapes: &[
        MosShape {
            size: 5,
            range: GeneratorRange::closed_open(frac(5, 8), frac(2, 3)),
            modes: PENTATONIC_NUMERALS,
        },
        MosShape {
            size: 8,
            range: GeneratorRange::open(frac(5, 8), frac(2, 3)),
            modes: &[
                "Mode I",
                "Mode II",
                "Mode III",
                "Mode IV",
                "Mode V",
                "Mode VI",
                "Mode VII",
                "Mode VIII",
            ],
        },
    ],
};

/// Oneirotonic. Keys are spelled with the extra letter H.
pub const ONEIROTONIC: Temperament = Temperament {
    family: Family::Oneirotonic,
    label: "Oneirotonic",
    name: "Oneirotonic",
    generator: Interval::RatioRoot(20, 9, 3),
    range: GeneratorRange::closed(frac(3, 8), frac(2, 5)),
    spelling: Spelling {
        upward: &[
            "C", "F", "A", "D", "G", "B", "E", "H♯", "C♯", "F♯", "A♯", "D♯", "G♯", "B♯", "E♯",
        ],
        downward: &["C", "H", "E♭", "B♭", "G♭", "D♭", "A♭", "F♭", "C♭", "H♭"],
    },
    shapes: &[
        MosShape {
            size: 5,
            range: GeneratorRange::closed(frac(3, 8), frac(2, 5)),
            modes: PENTATONIC_NUMERALS,
        },
        MosShape {
            size: 8,
            range: GeneratorRange::open(frac(3, 8), frac(2, 5)),
            modes: &[
                "Dylathian",
                "Ilarnekian",
                "Celephaïsian",
                "Ulatharian",
                "Mnarian",
                "Kadathian",
                "Hlanithian",
                "Sarnathian",
            ],
        },
    ],
};

/// Mohajira. Its pentatonic is a five-generator chain with three step sizes, not a MOS.
pub const MOSH: Temperament = Temperament {
    family: Family::Mosh,
    label: "Mosh",
    name: "Mohajira",
    generator: Interval::RatioRoot(3, 2, 2),
    range: GeneratorRange::open(frac(2, 7), frac(1, 3)),
    spelling: Spelling::NONE,
    shapes: &[
        MosShape {
            size: 5,
            range: GeneratorRange::open(frac(2, 7), frac(1, 3)),
            modes: PENTATONIC_NUMERALS,
        },
        MosShape {
            size: 7,
            range: GeneratorRange::open(frac(2, 7), frac(1, 3)),
            modes: &["Dril", "Gil", "Kleeth", "Bish", "Fish", "Jwl", "Led"],
        },
    ],
};

/// Orgone. Like mosh, the pentatonic has three step sizes.
pub const SMITONIC: Temperament = Temperament {
    family: Family::Smitonic,
    label: "Smitonic",
    name: "Orgone",
    generator: Interval::Ratio(128, 77),
    range: GeneratorRange::open(frac(5, 7), frac(3, 4)),
    spelling: Spelling::NONE,
    shapes: &[
        MosShape {
            size: 5,
            range: GeneratorRange::open(frac(5, 7), frac(3, 4)),
            modes: PENTATONIC_NUMERALS,
        },
        MosShape {
            size: 7,
            range: GeneratorRange::open(frac(5, 7), frac(3, 4)),
            modes: &[
                "Mode I", "Mode II", "Mode III", "Mode IV", "Mode V", "Mode VI", "Mode VII",
            ],
        },
    ],
};

/// Semaphore.
pub const MANUAL: Temperament = Temperament {
    family: Family::Manual,
    label: "Manual",
    name: "Semaphore",
    generator: Interval::Ratio(7, 6),
    range: GeneratorRange::closed_open(frac(1, 5), frac(1, 4)),
    spelling: Spelling::NONE,
    shapes: &[MosShape {
        size: 5,
        range: GeneratorRange::closed_open(frac(1, 5), frac(1, 4)),
        modes: &["Mode I", "Mode II", "Mode III", "Mode IV", "Mode V"],
    }],
};

/// All families, in the order their scales appear in a catalogue. The order is part of the saved
/// song format and must not change, and matches the declaration order of [`Family`].
pub static TEMPERAMENTS: [Temperament; 7] = [
    DIATONIC,
    MAVILA,
    CHECKERTONIC,
    ONEIROTONIC,
    MOSH,
    SMITONIC,
    MANUAL,
];
