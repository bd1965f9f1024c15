//! Decompose a batch of receptors and recombine their fragments
//! into new, shuffled receptors.
use crate::decompose::{annotate_cut, choose_cutpoints, extract, label_regions, match_d};
use crate::decompose::{Fragments, LabelString};
use crate::shared::errors::{ErrorRecord, FailureReason};
use crate::shared::gene::{normalize_gene_id, Region};
use crate::shared::parameters::{OutputMode, ShuffleParameters};
use crate::shared::receptor::Receptor;
use crate::shared::reference::{DSegment, GermlineReference, ReferenceLoader};
use anyhow::{anyhow, Result};
use itertools::izip;
#[cfg(all(feature = "py_binds", feature = "pyo3"))]
use pyo3::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Full trace of one successful decomposition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresuffledRow {
    pub v: String,
    pub j: String,
    pub germline_v: String,
    pub germline_j: String,
    pub cdr3: String,
    pub cdr3_source: LabelString,
    pub d_gene: Option<String>,
    pub cut1: usize,
    pub cut2: usize,
    pub cut_cdr3: String,
    pub fragments: Fragments,
}

#[cfg_attr(all(feature = "py_binds", feature = "pyo3"), pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffledReceptor {
    pub v: String,
    pub cdr3: String,
    pub j: String,
    pub components: Fragments,
}

/// Fragments of every successful decomposition, one entry per pool each time
#[derive(Default, Clone, Debug)]
pub struct FragmentPools {
    pub v: Vec<(String, String)>,
    pub d: Vec<(Option<String>, String)>,
    pub j: Vec<(String, String)>,
}

impl FragmentPools {
    pub fn push(&mut self, v: &str, d_gene: Option<&str>, j: &str, fragments: &Fragments) {
        self.v.push((v.to_string(), fragments.v_part.clone()));
        self.d
            .push((d_gene.map(str::to_string), fragments.d_part.clone()));
        self.j.push((j.to_string(), fragments.j_part.clone()));
    }

    pub fn len(&self) -> usize {
        self.v.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }

    /// Permute each pool independently
    pub fn shuffle(&mut self, rng: &mut SmallRng) {
        self.v.shuffle(rng);
        self.d.shuffle(rng);
        self.j.shuffle(rng);
    }

    /// Zip the pools back into receptors. The V and J gene ids come with
    /// their fragment, the D gene id is dropped.
    pub fn recombine(&self) -> Vec<ShuffledReceptor> {
        izip!(&self.v, &self.d, &self.j)
            .map(|((v, v_part), (_, d_part), (j, j_part))| ShuffledReceptor {
                v: v.clone(),
                cdr3: format!("{}{}{}", v_part, d_part, j_part),
                j: j.clone(),
                components: Fragments {
                    v_part: v_part.clone(),
                    d_part: d_part.clone(),
                    j_part: j_part.clone(),
                },
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShuffleOutput {
    Errors(Vec<ErrorRecord>),
    Presuffled(Vec<PresuffledRow>),
    Shuffled(Vec<ShuffledReceptor>),
}

impl ShuffleOutput {
    pub fn len(&self) -> usize {
        match self {
            ShuffleOutput::Errors(x) => x.len(),
            ShuffleOutput::Presuffled(x) => x.len(),
            ShuffleOutput::Shuffled(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug)]
pub struct ShuffleReport {
    pub output: ShuffleOutput,
    // failed receptors / (input size * depth)
    pub failure_rate: f64,
    pub n_processed: usize,
    pub n_success: usize,
}

/// Everything accumulated over one pass on the batch
#[derive(Default, Clone, Debug)]
pub struct Collected {
    pub pools: FragmentPools,
    pub errors: Vec<ErrorRecord>,
    pub analysis: Vec<PresuffledRow>,
    pub n_processed: usize,
}

impl Collected {
    pub fn failure_rate(&self) -> f64 {
        match self.n_processed {
            0 => 0.,
            n => self.errors.len() as f64 / n as f64,
        }
    }
}

/// Runs the decomposition with its own random generator, seeded from the
/// parameters (or from entropy when no seed is given).
///
/// `SmallRng` is not portable: a given seed reproduces the same output only
/// on the same platform and `rand` version.
pub struct Shuffler<'a> {
    reference: &'a GermlineReference,
    params: ShuffleParameters,
    d_segments: Vec<DSegment>,
    rng: SmallRng,
}

impl<'a> Shuffler<'a> {
    pub fn new(
        reference: &'a GermlineReference,
        params: ShuffleParameters,
    ) -> Result<Shuffler<'a>> {
        let d_segments = if params.chain.has_d_segment() {
            let ds = reference.d_segments(&params.organism, params.chain);
            if ds.is_empty() {
                return Err(anyhow!(
                    "No D gene in the reference for organism {} and chain {}",
                    params.organism,
                    params.chain
                ));
            }
            ds
        } else {
            Vec::new()
        };
        let rng = match params.random_seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        Ok(Shuffler {
            reference,
            params,
            d_segments,
            rng,
        })
    }

    pub fn params(&self) -> &ShuffleParameters {
        &self.params
    }

    fn germline(&self, region: Region, gene_id: &str) -> Option<String> {
        self.reference
            .germline_cdr3(&self.params.organism, self.params.chain, region, gene_id)
            .map(str::to_string)
    }

    /// Decompose one receptor. Uses the generator for the cutpoints.
    pub fn decompose(&mut self, receptor: &Receptor) -> Result<PresuffledRow, ErrorRecord> {
        let Some((v, cdr3, j)) = receptor.fields() else {
            return Err(ErrorRecord {
                v: receptor.v.clone(),
                cdr3: receptor.cdr3.clone(),
                j: receptor.j.clone(),
                reason: FailureReason::InvalidTypes,
            });
        };
        let v = normalize_gene_id(v);
        let j = normalize_gene_id(j);
        let failure = |reason: FailureReason| {
            ErrorRecord::new(Some(v.as_str()), Some(cdr3), Some(j.as_str()), reason)
        };

        let germline_v = self
            .germline(Region::V, &v)
            .ok_or_else(|| failure(FailureReason::MissingGermline(v.clone())))?;
        let germline_j = self
            .germline(Region::J, &j)
            .ok_or_else(|| failure(FailureReason::MissingGermline(j.clone())))?;

        let mut labels = label_regions(cdr3, &germline_v, &germline_j);
        let mut d_gene = None;
        if self.params.chain.has_d_segment() {
            let (d_labels, hit) = match_d(
                cdr3,
                &labels,
                &self.d_segments,
                self.params.min_cut_v,
                self.params.min_cut_j,
            );
            labels = d_labels;
            d_gene = hit.map(|h| h.gene_id);
        }

        let (cut1, cut2) = choose_cutpoints(&labels, &mut self.rng)
            .ok_or_else(|| failure(FailureReason::NoCutpoint(labels.to_string())))?;
        let fragments = extract(cdr3, cut1, cut2);

        Ok(PresuffledRow {
            cut_cdr3: annotate_cut(&fragments),
            v,
            j,
            germline_v,
            germline_j,
            cdr3: cdr3.to_string(),
            cdr3_source: labels,
            d_gene,
            cut1,
            cut2,
            fragments,
        })
    }

    /// Process the batch `depth` times and pool the fragments
    pub fn collect(&mut self, receptors: &[Receptor]) -> Collected {
        let mut collected = Collected::default();
        for _ in 0..self.params.depth {
            for receptor in receptors {
                collected.n_processed += 1;
                match self.decompose(receptor) {
                    Ok(row) => {
                        collected.pools.push(
                            &row.v,
                            row.d_gene.as_deref(),
                            &row.j,
                            &row.fragments,
                        );
                        collected.analysis.push(row);
                    }
                    Err(e) => {
                        log::debug!(
                            "receptor {:?} {:?} {:?} skipped: {}",
                            e.v,
                            e.cdr3,
                            e.j,
                            e.reason
                        );
                        collected.errors.push(e);
                    }
                }
            }
        }
        collected
    }

    pub fn run(&mut self, receptors: &[Receptor]) -> ShuffleReport {
        let mut collected = self.collect(receptors);
        let failure_rate = collected.failure_rate();
        let n_success = collected.pools.len();
        log::info!("failure_rate: {}", failure_rate);
        if n_success == 0 && collected.n_processed > 0 {
            log::warn!("none of the {} receptors could be decomposed", collected.n_processed);
        }

        let output = match self.params.mode {
            OutputMode::Errors => ShuffleOutput::Errors(collected.errors),
            OutputMode::Presuffled => ShuffleOutput::Presuffled(collected.analysis),
            OutputMode::Shuffled => {
                collected.pools.shuffle(&mut self.rng);
                ShuffleOutput::Shuffled(collected.pools.recombine())
            }
        };
        ShuffleReport {
            output,
            failure_rate,
            n_processed: collected.n_processed,
            n_success,
        }
    }
}

/// Decompose and shuffle `receptors` against a loaded germline reference
pub fn shuffle(
    receptors: &[Receptor],
    reference: &GermlineReference,
    params: &ShuffleParameters,
) -> Result<ShuffleReport> {
    let mut shuffler = Shuffler::new(reference, params.clone())?;
    Ok(shuffler.run(receptors))
}

/// Same as `shuffle`, loading the reference first. Loader errors are returned as-is.
pub fn shuffle_with_loader<L: ReferenceLoader>(
    receptors: &[Receptor],
    loader: &L,
    params: &ShuffleParameters,
) -> Result<ShuffleReport> {
    let reference = loader.load(&params.organism, params.chain)?;
    shuffle(receptors, &reference, params)
}
