//! Exhaustive enumeration of genotype and trait assignments.
//!
//! Genotype assignments are produced lazily as base-3 counters over the
//! pedigree, so every partition of the population into zero, one, and two
//! copy groups appears exactly once. Trait assignments are the `2^n` subsets
//! of the population, filtered against the observed traits before any
//! genotype assignment is evaluated.

use crate::genetics::Genotype;
use crate::joint::joint_probability;
use crate::marginals::Marginals;
use crate::pedigree::Pedigree;
use crate::tables::ProbabilityTables;
use serde::Serialize;
use tracing::{debug, trace};

/// Counts describing one enumeration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InferenceStats {
    /// Trait subsets considered, `2^n`.
    pub trait_subsets: u64,
    /// Trait subsets consistent with the observed traits.
    pub admitted_trait_subsets: u64,
    /// Joint probabilities computed, `3^n` per admitted trait subset.
    pub assignments_evaluated: u64,
}

/// Every assignment of a genotype to each of `n` individuals.
///
/// Restartable by constructing a new value; yields `3^n` assignments.
#[derive(Debug, Clone)]
pub struct GenotypePartitions {
    current: Option<Vec<Genotype>>,
}

impl GenotypePartitions {
    pub fn new(n: usize) -> Self {
        Self {
            current: Some(vec![Genotype::Zero; n]),
        }
    }
}

impl Iterator for GenotypePartitions {
    type Item = Vec<Genotype>;

    fn next(&mut self) -> Option<Vec<Genotype>> {
        let item = self.current.take()?;
        let mut next = item.clone();
        for digit in next.iter_mut() {
            match digit.succ() {
                Some(genotype) => {
                    *digit = genotype;
                    self.current = Some(next);
                    return Some(item);
                }
                None => *digit = Genotype::Zero,
            }
        }
        // Every digit wrapped: `item` was the last assignment.
        Some(item)
    }
}

/// Every subset of `n` individuals, as membership flags.
#[derive(Debug, Clone)]
pub struct TraitSubsets {
    n: usize,
    mask: u64,
    end: u64,
}

impl TraitSubsets {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            mask: 0,
            end: 1u64 << n,
        }
    }
}

impl Iterator for TraitSubsets {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Vec<bool>> {
        if self.mask == self.end {
            return None;
        }
        let subset = (0..self.n).map(|i| self.mask & (1 << i) != 0).collect();
        self.mask += 1;
        Some(subset)
    }
}

/// Accumulates unnormalized marginals over every admissible assignment.
///
/// The pedigree must hold at most [`crate::pedigree::MAX_INDIVIDUALS`]
/// members, which [`Pedigree::resolve`] guarantees.
pub fn infer(pedigree: &Pedigree, tables: &ProbabilityTables) -> (Marginals, InferenceStats) {
    let n = pedigree.len();
    let mut marginals = Marginals::new(n);
    let mut stats = InferenceStats::default();
    debug!(individuals = n, "enumerating assignments");

    for traits in TraitSubsets::new(n) {
        stats.trait_subsets += 1;
        if !pedigree.admits(&traits) {
            continue;
        }
        stats.admitted_trait_subsets += 1;
        trace!(?traits, "admitted trait subset");

        for genotypes in GenotypePartitions::new(n) {
            let p = joint_probability(pedigree, tables, &genotypes, &traits);
            marginals.update(&genotypes, &traits, p);
            stats.assignments_evaluated += 1;
        }
    }

    debug!(
        trait_subsets = stats.trait_subsets,
        admitted = stats.admitted_trait_subsets,
        evaluated = stats.assignments_evaluated,
        "enumeration complete"
    );
    (marginals, stats)
}
