//! Parameter tables for the gene and trait network.

use crate::error::TablesError;
use crate::genetics::Genotype;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const TOLERANCE: f64 = 1e-9;

/// P(trait | genotype) for a single genotype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitOdds {
    pub present: f64,
    pub absent: f64,
}

impl TraitOdds {
    pub fn new(present: f64, absent: f64) -> Self {
        Self { present, absent }
    }

    pub fn probability(&self, has_trait: bool) -> f64 {
        if has_trait {
            self.present
        } else {
            self.absent
        }
    }
}

/// The prior, conditional, and mutation parameters shared by every individual.
///
/// Immutable for the duration of an inference run. Fields missing from a
/// JSON tables file fall back to the standard values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbabilityTables {
    /// P(genotype) for founders, indexed by copy count.
    pub gene_prior: [f64; 3],
    /// P(trait | genotype), indexed by copy count.
    pub trait_given_gene: [TraitOdds; 3],
    /// Probability that a transmitted copy flips state.
    pub mutation_rate: f64,
}

impl Default for ProbabilityTables {
    fn default() -> Self {
        Self {
            gene_prior: [0.96, 0.03, 0.01],
            trait_given_gene: [
                TraitOdds::new(0.01, 0.99),
                TraitOdds::new(0.56, 0.44),
                TraitOdds::new(0.65, 0.35),
            ],
            mutation_rate: 0.01,
        }
    }
}

impl ProbabilityTables {
    /// Reads tables from a JSON file and validates them.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TablesError> {
        let raw = fs::read_to_string(path)?;
        let tables: Self = serde_json::from_str(&raw)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    pub fn prior(&self, genotype: Genotype) -> f64 {
        self.gene_prior[genotype.copies()]
    }

    pub fn trait_probability(&self, genotype: Genotype, has_trait: bool) -> f64 {
        self.trait_given_gene[genotype.copies()].probability(has_trait)
    }

    /// Checks every entry is a probability and every distribution sums to 1.
    pub fn validate(&self) -> Result<(), TablesError> {
        for genotype in Genotype::ALL.iter() {
            check_probability(&format!("gene_prior[{}]", genotype), self.prior(*genotype))?;
        }
        check_total("gene_prior", self.gene_prior.iter().sum())?;

        for (copies, odds) in self.trait_given_gene.iter().enumerate() {
            let field = format!("trait_given_gene[{}]", copies);
            check_probability(&format!("{}.present", field), odds.present)?;
            check_probability(&format!("{}.absent", field), odds.absent)?;
            check_total(&field, odds.present + odds.absent)?;
        }

        check_probability("mutation_rate", self.mutation_rate)
    }
}

fn check_probability(field: &str, value: f64) -> Result<(), TablesError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TablesError::InvalidProbability {
            field: field.to_string(),
            value,
        })
    }
}

fn check_total(field: &str, total: f64) -> Result<(), TablesError> {
    if (total - 1.0).abs() <= TOLERANCE {
        Ok(())
    } else {
        Err(TablesError::NotNormalized {
            field: field.to_string(),
            total,
        })
    }
}
