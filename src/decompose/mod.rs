//! Decomposition of a single CDR3 into germline-derived (V, J) and
//! germline-independent (D, N) parts
pub mod cutpoints;
pub mod d_segment;
pub mod fragments;
pub mod labeler;

pub use cutpoints::{choose_cutpoints, choose_valid_cutpoint};
pub use d_segment::{match_d, DHit};
pub use fragments::{annotate_cut, extract, Fragments};
pub use labeler::{label_regions, Label, LabelString};
