use crate::genetics::Genotype;
use crate::tables::ProbabilityTables;

/// Probability that a parent with `parent` copies passes one copy to a child.
///
/// A heterozygous parent transmits with probability exactly 0.5; mutation is
/// only applied to homozygous parents.
pub fn transmission_probability(tables: &ProbabilityTables, parent: Genotype) -> f64 {
    match parent {
        Genotype::Two => 1.0 - tables.mutation_rate,
        Genotype::One => 0.5,
        Genotype::Zero => tables.mutation_rate,
    }
}

/// P(child genotype | mother genotype, father genotype).
pub fn inherited_probability(
    tables: &ProbabilityTables,
    child: Genotype,
    mother: Genotype,
    father: Genotype,
) -> f64 {
    let pm = transmission_probability(tables, mother);
    let pf = transmission_probability(tables, father);
    match child {
        Genotype::Two => pf * pm,
        Genotype::One => pf * (1.0 - pm) + pm * (1.0 - pf),
        Genotype::Zero => (1.0 - pf) * (1.0 - pm),
    }
}
