use crate::genetics::Genotype;
use crate::inheritance::inherited_probability;
use crate::pedigree::Pedigree;
use crate::tables::ProbabilityTables;

/// Probability of one complete genotype and trait assignment.
///
/// `genotypes[i]` and `traits[i]` belong to `pedigree.members()[i]`. Each
/// member contributes P(genotype | parents) * P(trait | genotype), with
/// founders drawing their genotype from the prior.
pub fn joint_probability(
    pedigree: &Pedigree,
    tables: &ProbabilityTables,
    genotypes: &[Genotype],
    traits: &[bool],
) -> f64 {
    pedigree
        .members()
        .iter()
        .zip(genotypes.iter().zip(traits))
        .map(|(member, (genotype, has_trait))| {
            let gene = match member.parents {
                None => tables.prior(*genotype),
                Some((mother, father)) => {
                    inherited_probability(tables, *genotype, genotypes[mother], genotypes[father])
                }
            };
            gene * tables.trait_probability(*genotype, *has_trait)
        })
        .product()
}
