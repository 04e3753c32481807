//! Error types for loading, configuring, and running inference.

use thiserror::Error;

/// Errors raised while resolving a population or computing posteriors.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("{individual} references unknown parent {parent}")]
    UnknownParent { individual: String, parent: String },

    #[error("{individual} must have both a mother and a father, or neither")]
    MissingParent { individual: String },

    #[error("population of {size} individuals exceeds the enumerable maximum of {max}")]
    PopulationTooLarge { size: usize, max: usize },

    #[error("{distribution} distribution for {individual} has zero total probability mass")]
    DegenerateDistribution {
        individual: String,
        distribution: &'static str,
    },

    #[error("invalid probability tables: {0}")]
    InvalidTables(#[from] TablesError),
}

/// Errors raised while loading or validating probability tables.
#[derive(Debug, Error)]
pub enum TablesError {
    #[error("{field} = {value} is not a probability")]
    InvalidProbability { field: String, value: f64 },

    #[error("{field} sums to {total}, expected 1")]
    NotNormalized { field: String, total: f64 },

    #[error("failed to read tables: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tables: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while reading a population from delimited data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing required column `{0}`")]
    MissingColumn(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
