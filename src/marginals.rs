use crate::error::InferenceError;
use crate::genetics::Genotype;
use crate::pedigree::Pedigree;
use crate::Posteriors;
use serde::Serialize;

const PRESENT: usize = 0;
const ABSENT: usize = 1;

fn trait_column(has_trait: bool) -> usize {
    if has_trait {
        PRESENT
    } else {
        ABSENT
    }
}

/// Per-individual gene and trait tallies.
///
/// Row `i` belongs to `pedigree.members()[i]`. `gene` columns are copy
/// counts; `traits` columns are (present, absent). Tallies only grow until
/// `normalize()` rescales each row to sum to 1.
#[derive(Debug, Clone)]
pub struct Marginals {
    gene: ndarray::Array2<f64>,
    traits: ndarray::Array2<f64>,
}

impl Marginals {
    pub fn new(individuals: usize) -> Self {
        Self {
            gene: ndarray::Array2::zeros((individuals, 3)),
            traits: ndarray::Array2::zeros((individuals, 2)),
        }
    }

    /// Adds the joint probability `p` of one assignment to every individual's
    /// matching gene and trait bucket.
    pub fn update(&mut self, genotypes: &[Genotype], traits: &[bool], p: f64) {
        for (i, (genotype, has_trait)) in genotypes.iter().zip(traits).enumerate() {
            self.gene[[i, genotype.copies()]] += p;
            self.traits[[i, trait_column(*has_trait)]] += p;
        }
    }

    /// Rescales every distribution in place so it sums to 1.
    ///
    /// A distribution with zero total mass is an error; nothing is divided by zero.
    pub fn normalize(&mut self, pedigree: &Pedigree) -> Result<(), InferenceError> {
        normalize_rows(&mut self.gene, pedigree, "gene")?;
        normalize_rows(&mut self.traits, pedigree, "trait")
    }

    pub fn gene(&self) -> ndarray::ArrayView2<f64> {
        self.gene.view()
    }

    pub fn traits(&self) -> ndarray::ArrayView2<f64> {
        self.traits.view()
    }

    /// Per-individual distributions keyed by name.
    pub fn posteriors(&self, pedigree: &Pedigree) -> Posteriors {
        pedigree
            .members()
            .iter()
            .zip(self.gene.rows().into_iter().zip(self.traits.rows()))
            .map(|(member, (gene, traits))| {
                (
                    member.name.clone(),
                    Posterior {
                        gene: GeneDistribution {
                            zero: gene[0],
                            one: gene[1],
                            two: gene[2],
                        },
                        traits: TraitDistribution {
                            present: traits[PRESENT],
                            absent: traits[ABSENT],
                        },
                    },
                )
            })
            .collect()
    }
}

fn normalize_rows(
    tallies: &mut ndarray::Array2<f64>,
    pedigree: &Pedigree,
    distribution: &'static str,
) -> Result<(), InferenceError> {
    for (member, mut row) in pedigree.members().iter().zip(tallies.rows_mut()) {
        let total = row.sum();
        if total == 0.0 {
            return Err(InferenceError::DegenerateDistribution {
                individual: member.name.clone(),
                distribution,
            });
        }
        row.mapv_inplace(|p| p / total);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeneDistribution {
    #[serde(rename = "0")]
    pub zero: f64,
    #[serde(rename = "1")]
    pub one: f64,
    #[serde(rename = "2")]
    pub two: f64,
}

impl GeneDistribution {
    pub fn probability(&self, genotype: Genotype) -> f64 {
        match genotype {
            Genotype::Zero => self.zero,
            Genotype::One => self.one,
            Genotype::Two => self.two,
        }
    }

    pub fn total(&self) -> f64 {
        self.zero + self.one + self.two
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraitDistribution {
    #[serde(rename = "true")]
    pub present: f64,
    #[serde(rename = "false")]
    pub absent: f64,
}

impl TraitDistribution {
    pub fn total(&self) -> f64 {
        self.present + self.absent
    }
}

/// Posterior gene and trait distributions of one individual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Posterior {
    pub gene: GeneDistribution,
    #[serde(rename = "trait")]
    pub traits: TraitDistribution,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Individual, Population};

    fn pair() -> Result<Pedigree, InferenceError> {
        let population: Population = vec![Individual::new("A"), Individual::new("B")]
            .into_iter()
            .collect();
        Pedigree::resolve(&population)
    }

    #[test]
    fn test_update_adds_to_matching_buckets() {
        let mut marginals = Marginals::new(2);
        marginals.update(&[Genotype::One, Genotype::Two], &[true, false], 0.25);
        marginals.update(&[Genotype::One, Genotype::Zero], &[true, true], 0.5);
        assert_eq!(marginals.gene()[[0, 1]], 0.75);
        assert_eq!(marginals.gene()[[1, 2]], 0.25);
        assert_eq!(marginals.gene()[[1, 0]], 0.5);
        assert_eq!(marginals.traits()[[0, PRESENT]], 0.75);
        assert_eq!(marginals.traits()[[1, ABSENT]], 0.25);
        assert_eq!(marginals.traits()[[1, PRESENT]], 0.5);
    }

    #[test]
    fn test_normalize_rescales_each_row() -> Result<(), InferenceError> {
        let pedigree = pair()?;
        let mut marginals = Marginals::new(2);
        marginals.update(&[Genotype::Zero, Genotype::Two], &[false, true], 3.0);
        marginals.update(&[Genotype::One, Genotype::Two], &[true, true], 1.0);
        marginals.normalize(&pedigree)?;

        let posteriors = marginals.posteriors(&pedigree);
        let a = posteriors["A"];
        assert_eq!(a.gene.zero, 0.75);
        assert_eq!(a.gene.one, 0.25);
        assert_eq!(a.traits.absent, 0.75);
        let b = posteriors["B"];
        assert_eq!(b.gene.two, 1.0);
        assert_eq!(b.traits.present, 1.0);
        Ok(())
    }

    #[test]
    fn test_normalize_can_be_repeated() -> Result<(), InferenceError> {
        let pedigree = pair()?;
        let mut marginals = Marginals::new(2);
        marginals.update(&[Genotype::Zero, Genotype::One], &[false, true], 0.2);
        marginals.update(&[Genotype::Two, Genotype::One], &[true, true], 0.6);
        marginals.normalize(&pedigree)?;
        let once = marginals.posteriors(&pedigree);
        marginals.normalize(&pedigree)?;
        let twice = marginals.posteriors(&pedigree);
        for (name, posterior) in once.iter() {
            assert!((posterior.gene.two - twice[name].gene.two).abs() < 1e-15);
        }
        Ok(())
    }

    #[test]
    fn test_zero_mass_is_an_error() -> Result<(), InferenceError> {
        let pedigree = pair()?;
        let mut marginals = Marginals::new(2);
        match marginals.normalize(&pedigree) {
            Err(InferenceError::DegenerateDistribution {
                individual,
                distribution,
            }) => {
                assert_eq!(individual, "A");
                assert_eq!(distribution, "gene");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_posterior_serializes_with_value_keys() -> Result<(), Box<dyn std::error::Error>> {
        let posterior = Posterior {
            gene: GeneDistribution {
                zero: 0.5,
                one: 0.25,
                two: 0.25,
            },
            traits: TraitDistribution {
                present: 1.0,
                absent: 0.0,
            },
        };
        let value = serde_json::to_value(posterior)?;
        assert_eq!(value["gene"]["1"], 0.25);
        assert_eq!(value["trait"]["true"], 1.0);
        Ok(())
    }
}
