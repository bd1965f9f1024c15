#![warn(clippy::large_types_passed_by_value)]

//! Split TCR CDR3 sequences into their V, D and J contributions, and
//! recombine the fragments of a batch into shuffled receptors (used as
//! background repertoires).

pub mod decompose;
pub mod shared;
pub mod shuffler;

#[cfg(all(feature = "py_binds", feature = "pyo3"))]
pub mod py_binding;

pub use crate::decompose::{
    annotate_cut, choose_cutpoints, choose_valid_cutpoint, extract, label_regions, match_d, DHit,
    Fragments, Label, LabelString,
};
pub use crate::shared::{
    center_pad, center_pad_default, normalize_gene_id, Chain, ColumnNames, DSegment, ErrorRecord,
    FailureReason, GermlineKey, GermlineRecord, GermlineReference, OutputMode, Receptor,
    ReferenceLoader, Region, ShuffleParameters, TsvReferenceLoader,
};
pub use crate::shuffler::{
    shuffle, shuffle_with_loader, FragmentPools, PresuffledRow, ShuffleOutput, ShuffleReport,
    ShuffledReceptor, Shuffler,
};
