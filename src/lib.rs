#![crate_name = "heredity"]
//! Exact inference of gene copies and trait presence over a small pedigree.
//!
//! A [`Population`] is filled from [`Observation`]s (for example from
//! [`observable::CsvBuilder`]) and then queried through the [`Heredity`]
//! trait, which enumerates every genotype and trait assignment consistent
//! with the observed traits and returns normalized per-individual posteriors.
use std::collections::BTreeMap;
use std::error::Error;

pub mod prelude;

pub mod enumeration;
pub mod error;
pub mod genetics;
pub mod inheritance;
pub mod joint;
pub mod marginals;
pub mod observable;
pub mod pedigree;
pub mod report;
pub mod tables;

use crate::enumeration::InferenceStats;
use crate::error::InferenceError;
use crate::marginals::Posterior;
use crate::pedigree::Pedigree;
use crate::tables::ProbabilityTables;

pub type Individuals = BTreeMap<String, Individual>;
pub type Posteriors = BTreeMap<String, Posterior>;

/// A member of a pedigree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    name: String,
    mother: Option<String>,
    father: Option<String>,
    observed_trait: Option<bool>,
}

impl Individual {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            mother: None,
            father: None,
            observed_trait: None,
        }
    }

    pub fn with_parents(mut self, mother: &str, father: &str) -> Self {
        self.mother = Some(mother.into());
        self.father = Some(father.into());
        self
    }

    pub fn with_trait(mut self, observed: bool) -> Self {
        self.observed_trait = Some(observed);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mother(&self) -> Option<&str> {
        self.mother.as_deref()
    }

    pub fn father(&self) -> Option<&str> {
        self.father.as_deref()
    }

    /// `None` when the trait was not observed.
    pub fn observed_trait(&self) -> Option<bool> {
        self.observed_trait
    }

    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }
}

/// An observation of an Individual
pub enum Observation {
    /// An `Observation` that an `Individual` exists
    /// Individual's name
    Individual(String),

    /// An `Observation` of an `Individual`'s mother
    /// Individual's name, mother's name
    Mother(String, String),

    /// An `Observation` of an `Individual`'s father
    /// Individual's name, father's name
    Father(String, String),

    /// An `Observation` that an `Individual` does or does not show the trait
    /// Individual's name, whether the trait is present
    Trait(String, bool),
}

#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Individuals,
}

impl Population {
    /// Constructs a new empty `Population`
    ///
    /// The `Population` can be filled up iteratively by calling
    /// `observe()` or `insert()`.
    pub fn new() -> Self {
        Self {
            individuals: Individuals::new(),
        }
    }

    /// Adds an `Individual`, replacing any previous one with the same name.
    pub fn insert(&mut self, individual: Individual) {
        self.individuals.insert(individual.name.clone(), individual);
    }

    /// Observes a single `Observation`
    ///
    /// This function is normally called by `observe()` to read in data.
    /// To read in data from an arbitrary data source, implement an
    /// Iterator with type Item = Result<Observation, Box<dyn Error>>.
    pub fn _observe(&mut self, observation: Observation) {
        match observation {
            Observation::Individual(individual) => {
                self.entry(&individual);
            }
            Observation::Mother(individual, mother) => {
                self.entry(&individual).mother = Some(mother);
            }
            Observation::Father(individual, father) => {
                self.entry(&individual).father = Some(father);
            }
            Observation::Trait(individual, observed) => {
                self.entry(&individual).observed_trait = Some(observed);
            }
        }
    }

    /// Observe all the data in the argument.
    pub fn observe<I>(&mut self, observable: I) -> Result<(), Box<dyn Error>>
    where
        I: Iterator<Item = Result<Observation, Box<dyn Error>>>,
    {
        for observation in observable {
            self._observe(observation?);
        }
        Ok(())
    }

    fn entry(&mut self, name: &str) -> &mut Individual {
        self.individuals
            .entry(name.into())
            .or_insert_with(|| Individual::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&Individual> {
        self.individuals.get(name)
    }

    /// Names of all individuals, in sorted order.
    pub fn names(&self) -> Vec<&String> {
        self.individuals.keys().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<T: IntoIterator<Item = Individual>>(iter: T) -> Self {
        let mut population = Population::new();
        for individual in iter {
            population.insert(individual);
        }
        population
    }
}

/// Posteriors together with counts describing the enumeration that produced them.
#[derive(Debug, Clone)]
pub struct Inference {
    pub posteriors: Posteriors,
    pub stats: InferenceStats,
}

pub trait Heredity {
    fn infer(&self, tables: &ProbabilityTables) -> Result<Inference, InferenceError>;
}

impl Heredity for Population {
    /// Computes every individual's posterior gene and trait distribution.
    ///
    /// Fails before enumerating if the tables are invalid or a parent
    /// reference does not resolve.
    fn infer(&self, tables: &ProbabilityTables) -> Result<Inference, InferenceError> {
        tables.validate()?;
        let pedigree = Pedigree::resolve(self)?;
        let (mut marginals, stats) = enumeration::infer(&pedigree, tables);
        marginals.normalize(&pedigree)?;
        Ok(Inference {
            posteriors: marginals.posteriors(&pedigree),
            stats,
        })
    }
}
