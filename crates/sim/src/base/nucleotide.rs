use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidNucleotide;

/// A DNA nucleotide base.
///
/// `Nucleotide` is a compact, Copyable symbol backed by a single byte. The
/// mapping of variants to integers is stable and used throughout the crate
/// (A=0, C=1, G=2, T=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Nucleotide {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

impl Nucleotide {
    /// All four bases in index order.
    pub const ALL: [Nucleotide; 4] = [Self::A, Self::C, Self::G, Self::T];

    /// Convert from u8 index (0-3)
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Option<Self> {
        match idx {
            0 => Some(Self::A),
            1 => Some(Self::C),
            2 => Some(Self::G),
            3 => Some(Self::T),
            _ => None,
        }
    }

    /// Convert to the compact u8 index (0-3).
    #[inline(always)]
    pub const fn to_index(self) -> u8 {
        self as u8
    }

    /// Convert from an ASCII byte, accepting lowercase. Returns `None` for
    /// anything outside `ACGT`.
    #[inline]
    pub const fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            b'A' | b'a' => Some(Self::A),
            b'C' | b'c' => Some(Self::C),
            b'G' | b'g' => Some(Self::G),
            b'T' | b't' => Some(Self::T),
            _ => None,
        }
    }

    /// Uppercase ASCII byte for this base.
    #[inline(always)]
    pub const fn to_ascii(self) -> u8 {
        match self {
            Self::A => b'A',
            Self::C => b'C',
            Self::G => b'G',
            Self::T => b'T',
        }
    }

    #[inline(always)]
    pub const fn to_char(self) -> char {
        self.to_ascii() as char
    }

    /// Draw a base uniformly from the alphabet.
    #[inline]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..4)]
    }

    /// Draw one of the three bases different from `self`, uniformly.
    ///
    /// Used for substitutions: the drawn offset skips the current base so a
    /// substitution always changes the symbol.
    #[inline]
    pub fn random_other<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let offset = rng.random_range(1..4u8);
        Self::ALL[usize::from((self.to_index() + offset) % 4)]
    }
}

impl TryFrom<u8> for Nucleotide {
    type Error = InvalidNucleotide;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_ascii(byte).ok_or(InvalidNucleotide(byte))
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = InvalidNucleotide;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u8::try_from(c)
            .ok()
            .and_then(Self::from_ascii)
            .ok_or(InvalidNucleotide(b'?'))
    }
}

impl From<Nucleotide> for char {
    #[inline(always)]
    fn from(nuc: Nucleotide) -> char {
        nuc.to_char()
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_nucleotide_index_roundtrip() {
        for nuc in Nucleotide::ALL {
            assert_eq!(Nucleotide::from_index(nuc.to_index()), Some(nuc));
        }
        assert_eq!(Nucleotide::from_index(4), None);
    }

    #[test]
    fn test_nucleotide_from_ascii() {
        assert_eq!(Nucleotide::from_ascii(b'A'), Some(Nucleotide::A));
        assert_eq!(Nucleotide::from_ascii(b'g'), Some(Nucleotide::G));
        assert_eq!(Nucleotide::from_ascii(b'N'), None);
        assert!(Nucleotide::try_from(b'X').is_err());
        assert_eq!(Nucleotide::try_from('t'), Ok(Nucleotide::T));
    }

    #[test]
    fn test_nucleotide_display() {
        assert_eq!(Nucleotide::C.to_string(), "C");
        assert_eq!(char::from(Nucleotide::T), 'T');
    }

    #[test]
    fn test_random_other_never_returns_self() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        for nuc in Nucleotide::ALL {
            let mut seen = [0usize; 4];
            for _ in 0..600 {
                let other = nuc.random_other(&mut rng);
                assert_ne!(other, nuc);
                seen[usize::from(other.to_index())] += 1;
            }
            // Each of the three alternatives should show up regularly
            for (idx, &count) in seen.iter().enumerate() {
                if idx != usize::from(nuc.to_index()) {
                    assert!(count > 120, "base {idx} drawn only {count} times");
                }
            }
        }
    }
}
