pub use crate::enumeration::InferenceStats;
pub use crate::error::{InferenceError, LoadError, TablesError};
pub use crate::genetics::Genotype;
pub use crate::marginals::{GeneDistribution, Posterior, TraitDistribution};
pub use crate::observable::CsvBuilder;
pub use crate::tables::{ProbabilityTables, TraitOdds};
pub use crate::{Heredity, Individual, Inference, Observation, Population, Posteriors};
