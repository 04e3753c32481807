//! Property-based tests for inference invariants.

use heredity::prelude::*;
use proptest::prelude::*;

/// Up to four individuals; from the third on, each may have two distinct
/// earlier individuals as parents.
fn population_strategy() -> impl Strategy<Value = Population> {
    (1usize..=4)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(prop::option::of(any::<bool>()), n),
                prop::collection::vec(
                    prop::option::of((any::<prop::sample::Index>(), any::<prop::sample::Index>())),
                    n,
                ),
            )
        })
        .prop_map(|(n, traits, parents)| {
            (0..n)
                .map(|i| {
                    let mut individual = Individual::new(&format!("p{}", i));
                    if let (true, Some((m, f))) = (i >= 2, parents[i]) {
                        let mother = m.index(i);
                        let father = (mother + 1 + f.index(i - 1)) % i;
                        individual = individual
                            .with_parents(&format!("p{}", mother), &format!("p{}", father));
                    }
                    if let Some(observed) = traits[i] {
                        individual = individual.with_trait(observed);
                    }
                    individual
                })
                .collect::<Population>()
        })
}

fn founders_strategy() -> impl Strategy<Value = Population> {
    (1usize..=4).prop_map(|n| (0..n).map(|i| Individual::new(&format!("f{}", i))).collect::<Population>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn posteriors_are_distributions(population in population_strategy()) {
        let inference = population.infer(&ProbabilityTables::default()).expect("inference failed");
        prop_assert_eq!(inference.posteriors.len(), population.len());
        for (name, posterior) in inference.posteriors.iter() {
            prop_assert!((posterior.gene.total() - 1.0).abs() < 1e-9, "{} gene sums to {}", name, posterior.gene.total());
            prop_assert!((posterior.traits.total() - 1.0).abs() < 1e-9, "{} trait sums to {}", name, posterior.traits.total());
        }
    }

    #[test]
    fn observed_traits_are_certain(population in population_strategy()) {
        let inference = population.infer(&ProbabilityTables::default()).expect("inference failed");
        for individual in population.iter() {
            let posterior = &inference.posteriors[individual.name()];
            match individual.observed_trait() {
                Some(true) => prop_assert_eq!(posterior.traits.present, 1.0),
                Some(false) => prop_assert_eq!(posterior.traits.absent, 1.0),
                None => {}
            }
        }
    }

    #[test]
    fn enumeration_is_complete(population in population_strategy()) {
        let inference = population.infer(&ProbabilityTables::default()).expect("inference failed");
        let k = population.len() as u32;
        let unobserved = population.iter().filter(|i| i.observed_trait().is_none()).count() as u32;
        prop_assert_eq!(inference.stats.trait_subsets, 2u64.pow(k));
        prop_assert_eq!(inference.stats.admitted_trait_subsets, 2u64.pow(unobserved));
        prop_assert_eq!(
            inference.stats.assignments_evaluated,
            3u64.pow(k) * inference.stats.admitted_trait_subsets
        );
    }

    #[test]
    fn inference_is_deterministic(population in population_strategy()) {
        let tables = ProbabilityTables::default();
        let first = population.infer(&tables).expect("inference failed");
        let second = population.infer(&tables).expect("inference failed");
        prop_assert_eq!(first.posteriors, second.posteriors);
        prop_assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn founders_without_evidence_keep_the_prior(population in founders_strategy(), mutation_rate in 0.0f64..=1.0) {
        let tables = ProbabilityTables::default().with_mutation_rate(mutation_rate);
        let inference = population.infer(&tables).expect("inference failed");
        for posterior in inference.posteriors.values() {
            for genotype in Genotype::ALL.iter() {
                prop_assert!((posterior.gene.probability(*genotype) - tables.prior(*genotype)).abs() < 1e-12);
            }
        }
    }
}
