//! Find the D gene best explaining the centre of a CDR3
use crate::decompose::labeler::{Label, LabelString};
use crate::shared::reference::DSegment;
use crate::shared::utils::longest_common_substring;
use serde::{Deserialize, Serialize};

/// Best D candidate for a CDR3
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DHit {
    pub gene_id: String,
    pub d_seq: String,
    // position of the match in the full cdr3
    pub start: usize,
    pub length: usize,
}

/// Search the D segments in `cdr3[min_v..len - min_j]` and relabel the
/// longest common substring as D (whatever the previous labels were).
///
/// Candidates are compared in the order of `d_segments`; a later candidate
/// replaces the current best only with a strictly longer match, so ties go
/// to the first one. Without any shared residue the labels are returned
/// unchanged and no hit is reported.
pub fn match_d(
    cdr3: &str,
    labels: &LabelString,
    d_segments: &[DSegment],
    min_v: usize,
    min_j: usize,
) -> (LabelString, Option<DHit>) {
    let cdr3: Vec<char> = cdr3.chars().collect();
    let core: &[char] = if cdr3.len() > min_v.saturating_add(min_j) {
        &cdr3[min_v..cdr3.len() - min_j]
    } else {
        &[]
    };

    let mut best: Option<DHit> = None;
    for d in d_segments {
        let d_seq: Vec<char> = d.seq.chars().collect();
        let (start, _, length) = longest_common_substring(core, &d_seq);
        if length > best.as_ref().map_or(0, |b| b.length) {
            best = Some(DHit {
                gene_id: d.gene_id.clone(),
                d_seq: d.seq.clone(),
                start: min_v + start,
                length,
            });
        }
    }

    let mut new_labels = labels.clone();
    if let Some(hit) = &best {
        new_labels.set_span(hit.start, hit.start + hit.length, Label::D);
    }
    (new_labels, best)
}
