//! Per-residue provenance of a CDR3 (V, N, D or J)
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    V,
    N,
    D,
    J,
}

impl Label {
    pub fn as_char(&self) -> char {
        match self {
            Label::V => 'V',
            Label::N => 'N',
            Label::D => 'D',
            Label::J => 'J',
        }
    }

    pub fn from_char(c: char) -> Result<Label> {
        match c {
            'V' => Ok(Label::V),
            'N' => Ok(Label::N),
            'D' => Ok(Label::D),
            'J' => Ok(Label::J),
            _ => Err(anyhow!("Invalid label {} (only V,N,D,J are allowed)", c)),
        }
    }
}

/// One label per CDR3 residue
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelString {
    pub labels: Vec<Label>,
}

impl LabelString {
    pub fn all_n(len: usize) -> LabelString {
        LabelString {
            labels: vec![Label::N; len],
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Overwrite positions `start..end` with `label`
    pub fn set_span(&mut self, start: usize, end: usize, label: Label) {
        self.labels[start..end].iter_mut().for_each(|l| *l = label);
    }
}

impl fmt::Display for LabelString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s: String = self.labels.iter().map(Label::as_char).collect();
        write!(f, "{}", s)
    }
}

impl FromStr for LabelString {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<LabelString> {
        Ok(LabelString {
            labels: s.chars().map(Label::from_char).collect::<Result<_>>()?,
        })
    }
}

/// Mark the CDR3 residues identical to the germline V (aligned on the left)
/// and to the germline J (aligned on the right). J never overwrites V.
pub fn label_regions(cdr3: &str, germline_v: &str, germline_j: &str) -> LabelString {
    let cdr3: Vec<char> = cdr3.chars().collect();
    let mut labels = LabelString::all_n(cdr3.len());

    for (i, (aa, c)) in germline_v.chars().zip(&cdr3).enumerate() {
        if aa == *c {
            labels.labels[i] = Label::V;
        }
    }

    for (aa, (c, l)) in germline_j
        .chars()
        .rev()
        .zip(cdr3.iter().zip(labels.labels.iter_mut()).rev())
    {
        if aa == *c && *l == Label::N {
            *l = Label::J;
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_v_and_j() {
        assert_eq!(
            label_regions("CASSSHAGGNTEAFF", "CASS", "EAFF").to_string(),
            "VVVVNNNNNNNJJJJ"
        );
    }

    #[test]
    fn label_empty_germlines() {
        assert_eq!(
            label_regions("CASSSHAGGNTEAFF", "", "").to_string(),
            "N".repeat(15)
        );
    }

    #[test]
    fn label_mismatches_stay_n() {
        // V mismatch at position 2, J mismatch one before the last
        assert_eq!(
            label_regions("CAxSLGEAxF", "CASS", "EAFF").to_string(),
            "VVNVNNJJNJ"
        );
    }

    #[test]
    fn j_does_not_overwrite_v() {
        // germlines longer than the cdr3 cover it entirely
        let labels = label_regions("CASF", "CASSLG", "GCASF");
        assert_eq!(labels.to_string(), "VVVJ");
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn label_counts_characters() {
        // one label per residue, whatever its encoding width
        let labels = label_regions("CASSéGEAFF", "CASS", "EAFF");
        assert_eq!(labels.to_string(), "VVVVNNJJJJ");
        let labels = label_regions("CASSLGEAFé", "CASS", "EAFé");
        assert_eq!(labels.to_string(), "VVVVNNJJJJ");
    }

    #[test]
    fn parse_roundtrip() -> Result<()> {
        let labels: LabelString = "VVNDDJ".parse()?;
        assert_eq!(labels.labels[2], Label::N);
        assert_eq!(labels.to_string(), "VVNDDJ");
        assert!("VVX".parse::<LabelString>().is_err());
        Ok(())
    }
}
