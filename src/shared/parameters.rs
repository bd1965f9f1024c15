//! The structs used for specifying a shuffling run
use crate::shared::gene::Chain;
use anyhow::{Context, Result};
#[cfg(all(feature = "py_binds", feature = "pyo3"))]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// What a run returns. When several outputs are requested, errors take
/// precedence over the pre-shuffle analysis, which takes precedence over
/// the shuffled receptors.
#[cfg_attr(all(feature = "py_binds", feature = "pyo3"), pyclass(eq, eq_int))]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    #[default]
    Errors,
    Presuffled,
    Shuffled,
}

impl OutputMode {
    pub fn from_flags(return_errors: bool, return_presuffled: bool) -> OutputMode {
        if return_errors {
            OutputMode::Errors
        } else if return_presuffled {
            OutputMode::Presuffled
        } else {
            OutputMode::Shuffled
        }
    }
}

/// Names of the V gene, CDR3 and J gene columns in the tabular input.
/// The shuffled output reuses them.
#[cfg_attr(all(feature = "py_binds", feature = "pyo3"), pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub v: String,
    pub cdr3: String,
    pub j: String,
}

impl ColumnNames {
    pub fn new(v: &str, cdr3: &str, j: &str) -> ColumnNames {
        ColumnNames {
            v: v.to_string(),
            cdr3: cdr3.to_string(),
            j: j.to_string(),
        }
    }

    pub fn for_chain(chain: Chain) -> ColumnNames {
        match chain {
            Chain::A => ColumnNames::new("va", "cdr3a", "ja"),
            Chain::B => ColumnNames::new("vb", "cdr3b", "jb"),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> ColumnNames {
        ColumnNames::for_chain(Chain::B)
    }
}

#[cfg_attr(all(feature = "py_binds", feature = "pyo3"), pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuffleParameters {
    pub organism: String,
    pub chain: Chain,
    pub columns: ColumnNames,
    // residues kept out of the D search at the start (V side) ...
    pub min_cut_v: usize,
    // ... and at the end (J side) of the CDR3
    pub min_cut_j: usize,
    // number of times the input is processed, to inflate the pools
    pub depth: usize,
    // None: seed from entropy, the run is not reproducible
    pub random_seed: Option<u64>,
    pub mode: OutputMode,
}

impl Default for ShuffleParameters {
    fn default() -> ShuffleParameters {
        ShuffleParameters {
            organism: "human".to_string(),
            chain: Chain::B,
            columns: ColumnNames::default(),
            min_cut_v: 4,
            min_cut_j: 3,
            depth: 2,
            random_seed: Some(1),
            mode: OutputMode::Errors,
        }
    }
}

impl ShuffleParameters {
    pub fn with_mode(mut self, mode: OutputMode) -> ShuffleParameters {
        self.mode = mode;
        self
    }

    pub fn load_json(filename: &Path) -> Result<ShuffleParameters> {
        let file = File::open(filename)
            .with_context(|| format!("Unable to open {}", filename.display()))?;
        let params = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid parameter file {}", filename.display()))?;
        Ok(params)
    }

    pub fn save_json(&self, filename: &Path) -> Result<()> {
        let file = File::create(filename)
            .with_context(|| format!("Unable to create {}", filename.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(all(feature = "py_binds", feature = "pyo3"))]
#[pymethods]
impl ShuffleParameters {
    #[new]
    pub fn py_new() -> Self {
        ShuffleParameters::default()
    }

    fn __repr__(&self) -> PyResult<String> {
        Ok(format!(
            "ShuffleParameters(organism={}, chain={}, min_cut_v={}, min_cut_j={}, \
             depth={}, random_seed={:?}, mode={:?})",
            self.organism,
            self.chain,
            self.min_cut_v,
            self.min_cut_j,
            self.depth,
            self.random_seed,
            self.mode
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_precedence() {
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Errors);
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Errors);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Presuffled);
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Shuffled);
    }

    #[test]
    fn json_partial_config() -> Result<()> {
        let params: ShuffleParameters =
            serde_json::from_str(r#"{"chain": "A", "depth": 5, "random_seed": null}"#)?;
        assert_eq!(params.chain, Chain::A);
        assert_eq!(params.depth, 5);
        assert_eq!(params.random_seed, None);
        assert_eq!(params.min_cut_v, 4);
        assert_eq!(params.mode, OutputMode::Errors);
        Ok(())
    }
}
