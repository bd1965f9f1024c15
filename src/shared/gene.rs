//! Deal with V/D/J gene names, chains and regions
use anyhow::{anyhow, Result};
#[cfg(all(feature = "py_binds", feature = "pyo3"))]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allele appended to gene ids given without one (TRBV19 -> TRBV19*01)
pub const DEFAULT_ALLELE: &str = "*01";

/// TCR chain. Only the beta chain carries a D segment.
#[cfg_attr(all(feature = "py_binds", feature = "pyo3"), pyclass(eq, eq_int))]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    A,
    #[default]
    B,
}

impl Chain {
    pub fn has_d_segment(&self) -> bool {
        matches!(self, Chain::B)
    }
}

impl FromStr for Chain {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Chain> {
        match s.trim() {
            "A" | "a" | "alpha" | "TRA" => Ok(Chain::A),
            "B" | "b" | "beta" | "TRB" => Ok(Chain::B),
            _ => Err(anyhow!(
                "Invalid chain {} (only A (alpha) and B (beta) are allowed)",
                s
            )),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Chain::A => write!(f, "A"),
            Chain::B => write!(f, "B"),
        }
    }
}

/// Germline region of a gene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    V,
    D,
    J,
}

impl FromStr for Region {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Region> {
        match s.trim() {
            "V" => Ok(Region::V),
            "D" => Ok(Region::D),
            "J" => Ok(Region::J),
            _ => Err(anyhow!("Invalid gene type {} (only V,D,J are allowed)", s)),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Region::V => write!(f, "V"),
            Region::D => write!(f, "D"),
            Region::J => write!(f, "J"),
        }
    }
}

/// Add the default allele to a gene id that has none.
pub fn normalize_gene_id(name: &str) -> String {
    if name.contains('*') {
        name.to_string()
    } else {
        format!("{}{}", name, DEFAULT_ALLELE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allele_is_added_once() {
        assert_eq!(normalize_gene_id("TRBV19"), "TRBV19*01");
        assert_eq!(normalize_gene_id("TRBV19*02"), "TRBV19*02");
        assert_eq!(normalize_gene_id("TRBJ1-1*01"), "TRBJ1-1*01");
    }

    #[test]
    fn chain_parsing() {
        assert_eq!("B".parse::<Chain>().unwrap(), Chain::B);
        assert_eq!("alpha".parse::<Chain>().unwrap(), Chain::A);
        assert!("G".parse::<Chain>().is_err());
        assert!(Chain::B.has_d_segment());
        assert!(!Chain::A.has_d_segment());
    }
}
