use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::base::Nucleotide;
use crate::errors::{InvalidGenome, InvariantViolation};
use crate::evolution::{MutationEvent, MutationKind};

/// An organism's heritable sequence.
///
/// A genome is an ordered run of nucleotides. Its length is fixed when it is
/// created; insertion and deletion events applied afterwards grow or shrink
/// it one site at a time. Serialized as a plain `ACGT` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Genome {
    sites: Vec<Nucleotide>,
}

impl Genome {
    /// Create a genome from nucleotides.
    pub fn new(sites: Vec<Nucleotide>) -> Self {
        Self { sites }
    }

    /// Create a genome of `len` copies of `base`.
    pub fn uniform(base: Nucleotide, len: usize) -> Self {
        Self {
            sites: vec![base; len],
        }
    }

    /// Create a genome of `len` bases drawn uniformly at random.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let sites = (0..len).map(|_| Nucleotide::random(rng)).collect();
        Self { sites }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    #[inline]
    pub fn get(&self, site: usize) -> Option<Nucleotide> {
        self.sites.get(site).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Nucleotide] {
        &self.sites
    }

    pub fn iter(&self) -> impl Iterator<Item = Nucleotide> + '_ {
        self.sites.iter().copied()
    }

    /// Apply a single mutation event in place.
    ///
    /// The event's reference symbol must match the genome at `site`; a
    /// mismatch or out-of-range site means the event was proposed against a
    /// different genome and is reported as an invariant violation.
    pub fn apply(&mut self, event: &MutationEvent) -> Result<(), InvariantViolation> {
        let len = self.sites.len();
        let found = self
            .get(event.site)
            .ok_or(InvariantViolation::SiteOutOfRange {
                site: event.site,
                len,
            })?;
        if found != event.ref_symbol {
            return Err(InvariantViolation::ReferenceMismatch {
                site: event.site,
                expected: event.ref_symbol,
                found,
            });
        }

        match (event.kind, event.alt_symbol) {
            (MutationKind::Substitution, Some(alt)) => self.sites[event.site] = alt,
            (MutationKind::Insertion, Some(alt)) => self.sites.insert(event.site + 1, alt),
            (MutationKind::Deletion, _) => {
                self.sites.remove(event.site);
            }
            // Substitutions and insertions always carry an alternate symbol
            (MutationKind::Substitution | MutationKind::Insertion, None) => {
                return Err(InvariantViolation::ReferenceMismatch {
                    site: event.site,
                    expected: event.ref_symbol,
                    found,
                });
            }
        }
        Ok(())
    }
}

impl FromStr for Genome {
    type Err = InvalidGenome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidGenome::Empty);
        }
        let sites = s
            .chars()
            .enumerate()
            .map(|(position, c)| {
                Nucleotide::try_from(c)
                    .map_err(|_| InvalidGenome::InvalidChar { position, found: c })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sites })
    }
}

impl TryFrom<String> for Genome {
    type Error = InvalidGenome;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Genome> for String {
    fn from(genome: Genome) -> Self {
        genome.to_string()
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.sites.iter().map(|n| n.to_char()).collect();
        f.write_str(&s)
    }
}
