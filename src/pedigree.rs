//! Index-resolved view of a [`Population`] used during enumeration.

use crate::error::InferenceError;
use crate::Population;
use std::collections::HashMap;

/// Largest population whose assignment space fits the 64-bit counters.
pub const MAX_INDIVIDUALS: usize = 40;

#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    /// Indices of (mother, father), or `None` for a founder.
    pub parents: Option<(usize, usize)>,
    pub observed_trait: Option<bool>,
}

/// Members in the population's name order, with parents resolved to indices.
#[derive(Debug, Clone)]
pub struct Pedigree {
    members: Vec<Member>,
}

impl Pedigree {
    /// Resolves every parent reference, failing on the first one that does not resolve.
    pub fn resolve(population: &Population) -> Result<Self, InferenceError> {
        if population.len() > MAX_INDIVIDUALS {
            return Err(InferenceError::PopulationTooLarge {
                size: population.len(),
                max: MAX_INDIVIDUALS,
            });
        }

        let index: HashMap<&str, usize> = population
            .iter()
            .enumerate()
            .map(|(i, individual)| (individual.name(), i))
            .collect();

        let lookup = |individual: &str, parent: &str| {
            index
                .get(parent)
                .copied()
                .ok_or_else(|| InferenceError::UnknownParent {
                    individual: individual.to_string(),
                    parent: parent.to_string(),
                })
        };

        let members = population
            .iter()
            .map(|individual| {
                let parents = match (individual.mother(), individual.father()) {
                    (None, None) => None,
                    (Some(mother), Some(father)) => Some((
                        lookup(individual.name(), mother)?,
                        lookup(individual.name(), father)?,
                    )),
                    _ => {
                        return Err(InferenceError::MissingParent {
                            individual: individual.name().to_string(),
                        })
                    }
                };
                Ok(Member {
                    name: individual.name().to_string(),
                    parents,
                    observed_trait: individual.observed_trait(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { members })
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether a trait assignment agrees with every observed trait.
    pub fn admits(&self, traits: &[bool]) -> bool {
        self.members
            .iter()
            .zip(traits)
            .all(|(member, has_trait)| match member.observed_trait {
                Some(observed) => observed == *has_trait,
                None => true,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Individual;

    fn family() -> Population {
        vec![
            Individual::new("Harry").with_parents("Lily", "James"),
            Individual::new("James").with_trait(true),
            Individual::new("Lily").with_trait(false),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_parents_resolve_to_indices() -> Result<(), InferenceError> {
        let pedigree = Pedigree::resolve(&family())?;
        let members = pedigree.members();
        assert_eq!(members[0].name, "Harry");
        assert_eq!(members[0].parents, Some((2, 1)));
        assert_eq!(members[1].parents, None);
        assert_eq!(members[2].observed_trait, Some(false));
        Ok(())
    }

    #[test]
    fn test_single_parent_is_rejected() {
        let mut population = family();
        population._observe(crate::Observation::Mother("Ron".into(), "Lily".into()));
        assert!(matches!(
            Pedigree::resolve(&population),
            Err(InferenceError::MissingParent { individual }) if individual == "Ron"
        ));
    }

    #[test]
    fn test_oversized_population_is_rejected() {
        let population: Population = (0..=MAX_INDIVIDUALS)
            .map(|i| Individual::new(&format!("p{}", i)))
            .collect();
        assert!(matches!(
            Pedigree::resolve(&population),
            Err(InferenceError::PopulationTooLarge { size, .. }) if size == MAX_INDIVIDUALS + 1
        ));
    }

    #[test]
    fn test_admits_checks_only_observed_traits() -> Result<(), InferenceError> {
        let pedigree = Pedigree::resolve(&family())?;
        assert!(pedigree.admits(&[false, true, false]));
        assert!(pedigree.admits(&[true, true, false]));
        assert!(!pedigree.admits(&[true, false, false]));
        assert!(!pedigree.admits(&[true, true, true]));
        Ok(())
    }
}
