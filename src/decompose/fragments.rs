//! Cut a CDR3 into its V, D and J fragments
#[cfg(all(feature = "py_binds", feature = "pyo3"))]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg_attr(all(feature = "py_binds", feature = "pyo3"), pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragments {
    pub v_part: String,
    pub d_part: String,
    pub j_part: String,
}

impl Fragments {
    pub fn join(&self) -> String {
        format!("{}{}{}", self.v_part, self.d_part, self.j_part)
    }
}

/// `v_part = cdr3[..=cut1]`, `d_part = cdr3[cut1 + 1..=cut2]`, `j_part` the rest.
/// When `cut2 <= cut1` the D fragment is empty and J starts after `cut1`,
/// so the three parts always rebuild the cdr3.
/// Cuts count residues (chars), as the labels do.
pub fn extract(cdr3: &str, cut1: usize, cut2: usize) -> Fragments {
    let residues: Vec<char> = cdr3.chars().collect();
    let end_v = cut1.saturating_add(1).min(residues.len());
    let end_d = cut2.saturating_add(1).clamp(end_v, residues.len());
    Fragments {
        v_part: residues[..end_v].iter().collect(),
        d_part: residues[end_v..end_d].iter().collect(),
        j_part: residues[end_d..].iter().collect(),
    }
}

/// Visual form of a cut cdr3: `V--d--J`, with the D fragment lower-cased
pub fn annotate_cut(fragments: &Fragments) -> String {
    format!(
        "{}--{}--{}",
        fragments.v_part,
        fragments.d_part.to_lowercase(),
        fragments.j_part
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_ordered_cuts() {
        let f = extract("CASSSLAGGTEAFF", 4, 8);
        assert_eq!(f.v_part, "CASSS");
        assert_eq!(f.d_part, "LAGG");
        assert_eq!(f.j_part, "TEAFF");
        assert_eq!(f.join(), "CASSSLAGGTEAFF");
        assert_eq!(annotate_cut(&f), "CASSS--lagg--TEAFF");
    }

    #[test]
    fn extract_inverted_cuts() {
        let f = extract("CASSLGEAFF", 6, 2);
        assert_eq!(f.v_part, "CASSLGE");
        assert_eq!(f.d_part, "");
        assert_eq!(f.j_part, "AFF");
        assert_eq!(f.join(), "CASSLGEAFF");

        let f = extract("CASSLGEAFF", 3, 3);
        assert_eq!((f.v_part.as_str(), f.d_part.as_str()), ("CASS", ""));
        assert_eq!(f.join(), "CASSLGEAFF");
    }

    #[test]
    fn extract_counts_residues() {
        let f = extract("CASéLGEAFF", 3, 5);
        assert_eq!(f.v_part, "CASé");
        assert_eq!(f.d_part, "LG");
        assert_eq!(f.j_part, "EAFF");
        assert_eq!(annotate_cut(&f), "CASé--lg--EAFF");
    }

    #[test]
    fn reconstruction_for_all_cuts() {
        let cdr3 = "CASSPGQGAYEQYF";
        for cut1 in 0..cdr3.len() {
            for cut2 in 0..cdr3.len() {
                assert_eq!(extract(cdr3, cut1, cut2).join(), cdr3);
            }
        }
    }
}
