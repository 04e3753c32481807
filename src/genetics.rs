use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of copies of the variant an individual carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genotype {
    Zero,
    One,
    Two,
}

impl Genotype {
    /// Every genotype, in copy-count order.
    pub const ALL: [Genotype; 3] = [Genotype::Zero, Genotype::One, Genotype::Two];

    /// Copy count, usable as a column index.
    pub fn copies(self) -> usize {
        match self {
            Genotype::Zero => 0,
            Genotype::One => 1,
            Genotype::Two => 2,
        }
    }

    pub fn from_copies(copies: usize) -> Option<Self> {
        Self::ALL.get(copies).copied()
    }

    /// The next genotype in copy order, or `None` after `Two`.
    pub(crate) fn succ(self) -> Option<Self> {
        Self::from_copies(self.copies() + 1)
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.copies())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_round_trip_through_index() {
        for genotype in Genotype::ALL.iter() {
            assert_eq!(Genotype::from_copies(genotype.copies()), Some(*genotype));
        }
        assert_eq!(Genotype::from_copies(3), None);
    }

    #[test]
    fn test_succ_stops_after_two() {
        assert_eq!(Genotype::Zero.succ(), Some(Genotype::One));
        assert_eq!(Genotype::One.succ(), Some(Genotype::Two));
        assert_eq!(Genotype::Two.succ(), None);
    }
}
