//! Shared functionalities: genes, germline reference, parameters and I/O
pub mod errors;
pub mod gene;
pub mod parameters;
pub mod parser;
pub mod receptor;
pub mod reference;
pub mod utils;

pub use errors::{ErrorRecord, FailureReason};
pub use gene::{normalize_gene_id, Chain, Region};
pub use parameters::{ColumnNames, OutputMode, ShuffleParameters};
pub use receptor::Receptor;
pub use reference::{
    DSegment, GermlineKey, GermlineRecord, GermlineReference, ReferenceLoader, TsvReferenceLoader,
};
pub use utils::{center_pad, center_pad_default};
