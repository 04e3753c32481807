//! Rendering of posteriors for people and for other programs.

use crate::genetics::Genotype;
use crate::Posteriors;
use std::fmt::Write;

/// One block per individual, gene counts from two copies down, then the trait.
pub fn render_text(posteriors: &Posteriors) -> String {
    let mut out = String::new();
    for (name, posterior) in posteriors.iter() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}:", name);
        let _ = writeln!(out, "  Gene:");
        for genotype in Genotype::ALL.iter().rev() {
            let _ = writeln!(
                out,
                "    {}: {:.4}",
                genotype,
                posterior.gene.probability(*genotype)
            );
        }
        let _ = writeln!(out, "  Trait:");
        let _ = writeln!(out, "    True: {:.4}", posterior.traits.present);
        let _ = writeln!(out, "    False: {:.4}", posterior.traits.absent);
    }
    out
}

/// Pretty JSON object keyed by name.
pub fn render_json(posteriors: &Posteriors) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(posteriors)
}
