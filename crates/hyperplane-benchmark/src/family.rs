//! Problem families.

use std::fmt;
use std::str::FromStr;

use crate::GenerateError;

/// The standard benchmark problem families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    DeceptiveTrap,
    MaxSat,
    IsingSpinGlass,
    AdjacentNkq,
    RandomNkq,
}

impl Family {
    /// Every family, in suite order.
    pub const ALL: [Family; 5] = [
        Family::DeceptiveTrap,
        Family::MaxSat,
        Family::IsingSpinGlass,
        Family::AdjacentNkq,
        Family::RandomNkq,
    ];

    /// Returns the canonical name, also used in benchmark file names.
    pub fn name(self) -> &'static str {
        match self {
            Family::DeceptiveTrap => "DeceptiveTrap",
            Family::MaxSat => "MAXSAT",
            Family::IsingSpinGlass => "IsingSpinGlass",
            Family::AdjacentNkq => "AdjacentNKq",
            Family::RandomNkq => "RandomNKq",
        }
    }

    /// Returns the `k` the benchmark suite uses for this family.
    pub fn default_k(self) -> usize {
        match self {
            Family::DeceptiveTrap => 5,
            Family::IsingSpinGlass => 2,
            Family::MaxSat | Family::AdjacentNkq | Family::RandomNkq => 3,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = GenerateError;

    /// Accepts the canonical names in any case, with or without `-`/`_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Family::ALL
            .into_iter()
            .find(|family| family.name().to_ascii_lowercase() == key)
            .ok_or_else(|| GenerateError::UnknownFamily(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for family in Family::ALL {
            assert_eq!(family.name().parse::<Family>().unwrap(), family);
        }
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!("maxsat".parse::<Family>().unwrap(), Family::MaxSat);
        assert_eq!("ising-spin-glass".parse::<Family>().unwrap(), Family::IsingSpinGlass);
        assert_eq!("random_nkq".parse::<Family>().unwrap(), Family::RandomNkq);
        assert!(matches!(
            "nk".parse::<Family>(),
            Err(GenerateError::UnknownFamily(name)) if name == "nk"
        ));
    }
}
