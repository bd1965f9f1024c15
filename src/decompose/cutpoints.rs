//! Choose where to cut a labelled CDR3 around its D region.
//! A cut at `i` falls between residues `i` and `i + 1`.
use crate::decompose::labeler::{Label, LabelString};
use rand::seq::SliceRandom;
use rand::Rng;

/// Transitions allowed for the cut on the V side of D
pub const BEFORE_D: [(Label, Label); 4] = [
    (Label::V, Label::N),
    (Label::N, Label::D),
    (Label::V, Label::D),
    (Label::V, Label::J),
];

/// Transitions allowed for the cut on the J side of D
pub const AFTER_D: [(Label, Label); 4] = [
    (Label::D, Label::N),
    (Label::D, Label::J),
    (Label::N, Label::J),
    (Label::V, Label::J),
];

/// Transitions used when a single cut is needed
pub const SINGLE_CUT: [(Label, Label); 4] = [
    (Label::V, Label::N),
    (Label::N, Label::D),
    (Label::D, Label::N),
    (Label::D, Label::J),
];

/// Indices `i` in `range` with `(labels[i], labels[i + 1])` in `transitions`
pub fn transition_positions(
    labels: &LabelString,
    range: std::ops::Range<usize>,
    transitions: &[(Label, Label)],
) -> Vec<usize> {
    range
        .filter(|&i| i + 1 < labels.len())
        .filter(|&i| transitions.contains(&(labels.labels[i], labels.labels[i + 1])))
        .collect()
}

/// Candidates for the first cut, in `[1, len - 2]`
pub fn cut1_candidates(labels: &LabelString) -> Vec<usize> {
    transition_positions(labels, 1..labels.len().saturating_sub(1), &BEFORE_D)
}

/// Candidates for the second cut, in `[0, len - 3]`
pub fn cut2_candidates(labels: &LabelString) -> Vec<usize> {
    transition_positions(labels, 0..labels.len().saturating_sub(2), &AFTER_D)
}

/// Draw one cut before D and one after D, uniformly and independently.
/// The two draws are not ordered: `cut2 <= cut1` can happen.
/// Returns `None` when one of the two candidate sets is empty.
pub fn choose_cutpoints<R: Rng>(labels: &LabelString, rng: &mut R) -> Option<(usize, usize)> {
    let before = cut1_candidates(labels);
    let after = cut2_candidates(labels);
    if before.is_empty() || after.is_empty() {
        return None;
    }
    let cut1 = *before.choose(rng)?;
    let cut2 = *after.choose(rng)?;
    Some((cut1, cut2))
}

/// Draw a single cut among the V|N, N|D, D|N and D|J transitions
pub fn choose_valid_cutpoint<R: Rng>(labels: &LabelString, rng: &mut R) -> Option<usize> {
    let cuts = transition_positions(labels, 0..labels.len().saturating_sub(1), &SINGLE_CUT);
    cuts.choose(rng).copied()
}
