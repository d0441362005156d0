//! Mutation model: per-site mutation events with classified fitness effects.
//!
//! Every site of a genome independently mutates with probability
//! `mutation_rate` (a Bernoulli trial per site, so a genome of length `L`
//! expects `mutation_rate * L` events per generation). A triggered site then
//! draws:
//!
//! 1. a **kind** from a fixed categorical distribution (substitution-heavy by
//!    default, insertions and deletions rare), and
//! 2. an **effect** from a three-way mixture: deleterious effects decay
//!    exponentially (most are small, large ones are rare), neutral effects
//!    are exactly zero, beneficial effects are small and positive.
//!
//! The effect is the multiplicative contribution `1 + effect` of the event to
//! the organism's fitness (see [`crate::base::fitness`]).
//!
//! All randomness comes from the caller's generator, so identical seeds and
//! call sequences reproduce bit-identical event streams.

use std::fmt;

use rand::Rng;
use rand_distr::{Distribution, Exp1};
use serde::{Deserialize, Serialize};

use crate::base::Nucleotide;
use crate::errors::{ConfigurationError, InvariantViolation};
use crate::genome::Genome;

/// Tolerance used when checking that categorical weights sum to one.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Kind of change a mutation makes to a genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// Replace the base at the site.
    Substitution,
    /// Insert a new base immediately after the site.
    Insertion,
    /// Remove the base at the site.
    Deletion,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Substitution => "substitution",
            Self::Insertion => "insertion",
            Self::Deletion => "deletion",
        };
        f.write_str(name)
    }
}

/// Fitness impact class, derived from the sign of an event's effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Deleterious,
    Neutral,
    Beneficial,
}

/// A single recorded change to a genome.
///
/// Immutable once created. Organisms own their events through `Arc`s and the
/// per-generation history holds further references to the same events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationEvent {
    /// Site index in the genome the event was proposed against.
    pub site: usize,
    pub kind: MutationKind,
    /// Base at `site` before the mutation.
    pub ref_symbol: Nucleotide,
    /// New base for substitutions, inserted base for insertions, `None` for
    /// deletions.
    pub alt_symbol: Option<Nucleotide>,
    /// Multiplicative fitness contribution: negative is deleterious, zero is
    /// neutral, positive is beneficial.
    pub effect: f64,
}

impl MutationEvent {
    pub fn impact(&self) -> Impact {
        if self.effect < 0.0 {
            Impact::Deleterious
        } else if self.effect > 0.0 {
            Impact::Beneficial
        } else {
            Impact::Neutral
        }
    }
}

impl AsRef<MutationEvent> for MutationEvent {
    fn as_ref(&self) -> &MutationEvent {
        self
    }
}

fn check_weight(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter { name, value })
    }
}

fn check_sum(name: &'static str, weights: &[f64]) -> Result<(), ConfigurationError> {
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(ConfigurationError::WeightsDoNotSumToOne { name, sum });
    }
    Ok(())
}

/// Pick an index from cumulative weights given a uniform draw in `[0, 1)`.
#[inline]
fn pick(weights: &[f64; 3], r: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if r < cumulative {
            return i;
        }
    }
    // Floating point slack: fall back to the last category with weight
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(0)
}

/// Categorical weights over mutation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KindWeightsRepr")]
pub struct KindWeights {
    substitution: f64,
    insertion: f64,
    deletion: f64,
}

#[derive(Deserialize)]
struct KindWeightsRepr {
    substitution: f64,
    insertion: f64,
    deletion: f64,
}

impl TryFrom<KindWeightsRepr> for KindWeights {
    type Error = ConfigurationError;

    fn try_from(r: KindWeightsRepr) -> Result<Self, Self::Error> {
        Self::new(r.substitution, r.insertion, r.deletion)
    }
}

impl KindWeights {
    /// Create kind weights. They must be non-negative and sum to one.
    pub fn new(substitution: f64, insertion: f64, deletion: f64) -> Result<Self, ConfigurationError> {
        check_weight("substitution weight", substitution)?;
        check_weight("insertion weight", insertion)?;
        check_weight("deletion weight", deletion)?;
        check_sum("Mutation kind", &[substitution, insertion, deletion])?;
        Ok(Self {
            substitution,
            insertion,
            deletion,
        })
    }

    /// Substitutions only.
    pub fn substitutions_only() -> Self {
        Self {
            substitution: 1.0,
            insertion: 0.0,
            deletion: 0.0,
        }
    }

    pub fn substitution(&self) -> f64 {
        self.substitution
    }

    pub fn insertion(&self) -> f64 {
        self.insertion
    }

    pub fn deletion(&self) -> f64 {
        self.deletion
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> MutationKind {
        let weights = [self.substitution, self.insertion, self.deletion];
        match pick(&weights, rng.random::<f64>()) {
            0 => MutationKind::Substitution,
            1 => MutationKind::Insertion,
            _ => MutationKind::Deletion,
        }
    }
}

impl Default for KindWeights {
    fn default() -> Self {
        Self {
            substitution: 0.90,
            insertion: 0.05,
            deletion: 0.05,
        }
    }
}

/// Mixture distribution of mutation effects.
///
/// With probability `p_deleterious` the effect is `-mean_deleterious * X`,
/// with probability `p_beneficial` it is `+mean_beneficial * X`, where `X`
/// is a unit exponential draw; otherwise it is exactly `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EffectMixtureRepr")]
pub struct EffectMixture {
    p_deleterious: f64,
    p_neutral: f64,
    p_beneficial: f64,
    mean_deleterious: f64,
    mean_beneficial: f64,
}

#[derive(Deserialize)]
struct EffectMixtureRepr {
    p_deleterious: f64,
    p_neutral: f64,
    p_beneficial: f64,
    mean_deleterious: f64,
    mean_beneficial: f64,
}

impl TryFrom<EffectMixtureRepr> for EffectMixture {
    type Error = ConfigurationError;

    fn try_from(r: EffectMixtureRepr) -> Result<Self, Self::Error> {
        Self::new(
            r.p_deleterious,
            r.p_neutral,
            r.p_beneficial,
            r.mean_deleterious,
            r.mean_beneficial,
        )
    }
}

impl EffectMixture {
    /// Create an effect mixture.
    ///
    /// # Errors
    /// Returns `ConfigurationError` if a probability is negative or
    /// non-finite, the probabilities do not sum to one, or a mean magnitude
    /// is not a positive finite number.
    pub fn new(
        p_deleterious: f64,
        p_neutral: f64,
        p_beneficial: f64,
        mean_deleterious: f64,
        mean_beneficial: f64,
    ) -> Result<Self, ConfigurationError> {
        check_weight("p_deleterious", p_deleterious)?;
        check_weight("p_neutral", p_neutral)?;
        check_weight("p_beneficial", p_beneficial)?;
        check_sum("Effect", &[p_deleterious, p_neutral, p_beneficial])?;
        for (name, mean) in [
            ("mean_deleterious", mean_deleterious),
            ("mean_beneficial", mean_beneficial),
        ] {
            if !(mean.is_finite() && mean > 0.0) {
                return Err(ConfigurationError::InvalidParameter { name, value: mean });
            }
        }
        Ok(Self {
            p_deleterious,
            p_neutral,
            p_beneficial,
            mean_deleterious,
            mean_beneficial,
        })
    }

    /// Every mutation is neutral.
    pub fn neutral() -> Self {
        Self {
            p_deleterious: 0.0,
            p_neutral: 1.0,
            p_beneficial: 0.0,
            ..Self::default()
        }
    }

    pub fn p_deleterious(&self) -> f64 {
        self.p_deleterious
    }

    pub fn p_neutral(&self) -> f64 {
        self.p_neutral
    }

    pub fn p_beneficial(&self) -> f64 {
        self.p_beneficial
    }

    pub fn mean_deleterious(&self) -> f64 {
        self.mean_deleterious
    }

    pub fn mean_beneficial(&self) -> f64 {
        self.mean_beneficial
    }

    /// Expected effect of a single mutation.
    pub fn expected_effect(&self) -> f64 {
        self.p_beneficial * self.mean_beneficial - self.p_deleterious * self.mean_deleterious
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let weights = [self.p_deleterious, self.p_neutral, self.p_beneficial];
        match pick(&weights, rng.random::<f64>()) {
            0 => {
                let x: f64 = Exp1.sample(rng);
                -self.mean_deleterious * x
            }
            1 => 0.0,
            _ => {
                let x: f64 = Exp1.sample(rng);
                self.mean_beneficial * x
            }
        }
    }
}

impl Default for EffectMixture {
    fn default() -> Self {
        Self {
            p_deleterious: 0.70,
            p_neutral: 0.25,
            p_beneficial: 0.05,
            mean_deleterious: 0.05,
            mean_beneficial: 0.01,
        }
    }
}

/// Policy mapping a mutation rate and a genome to mutation events.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MutationModel {
    #[serde(default)]
    pub kinds: KindWeights,
    #[serde(default)]
    pub effects: EffectMixture,
}

impl MutationModel {
    pub fn new(kinds: KindWeights, effects: EffectMixture) -> Self {
        Self { kinds, effects }
    }

    /// Propose mutation events for `genome`, in ascending site order.
    ///
    /// Each site mutates independently with probability `mutation_rate`.
    /// The genome is not modified; see [`MutationModel::apply`].
    pub fn propose_mutations<R: Rng + ?Sized>(
        &self,
        genome: &Genome,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Vec<MutationEvent> {
        if mutation_rate <= 0.0 {
            return Vec::new();
        }

        let mut events = Vec::new();
        for (site, base) in genome.iter().enumerate() {
            if rng.random::<f64>() >= mutation_rate {
                continue;
            }

            let kind = self.kinds.sample(rng);
            let alt_symbol = match kind {
                MutationKind::Substitution => Some(base.random_other(rng)),
                MutationKind::Insertion => Some(Nucleotide::random(rng)),
                MutationKind::Deletion => None,
            };
            let effect = self.effects.sample(rng);

            events.push(MutationEvent {
                site,
                kind,
                ref_symbol: base,
                alt_symbol,
                effect,
            });
        }
        events
    }

    /// Apply events proposed against `genome` to it.
    ///
    /// Events are applied from the highest site down so that insertions and
    /// deletions never shift the sites of events still to be applied.
    ///
    /// All or nothing: if any event fails, `genome` is left untouched.
    pub fn apply(genome: &mut Genome, events: &[MutationEvent]) -> Result<(), InvariantViolation> {
        let mut edited = genome.clone();
        for event in events.iter().rev() {
            edited.apply(event)?;
        }
        *genome = edited;
        Ok(())
    }
}
