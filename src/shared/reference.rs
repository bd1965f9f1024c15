//! Germline reference: V/J CDR3 germline strings and D segments,
//! keyed by organism, chain, region and gene id.
use crate::shared::gene::{Chain, Region};
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GermlineKey {
    pub organism: String,
    pub chain: Chain,
    pub region: Region,
    pub gene_id: String,
}

impl GermlineKey {
    pub fn new(organism: &str, chain: Chain, region: Region, gene_id: &str) -> GermlineKey {
        GermlineKey {
            organism: organism.to_string(),
            chain,
            region,
            gene_id: gene_id.to_string(),
        }
    }
}

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GermlineRecord {
    pub gene_id: String,
    // ';'-separated CDR sequences, the last one is the germline CDR3 (V and J genes)
    pub cdrs: String,
    // full protein sequence, used as-is for D genes
    pub aligned_protseq: String,
}

impl GermlineRecord {
    /// Germline amino-acid string to align against the CDR3
    pub fn germline_cdr3(&self) -> &str {
        self.cdrs.rsplit(';').next().unwrap_or("")
    }
}

/// A candidate D gene, as used by the D segment matcher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DSegment {
    pub gene_id: String,
    pub seq: String,
}

/// Read-only snapshot of the germline table.
/// Records keep their insertion order, which fixes the order in which
/// D candidates are compared.
#[derive(Default, Clone, Debug)]
pub struct GermlineReference {
    records: Vec<(GermlineKey, GermlineRecord)>,
    index: HashMap<GermlineKey, usize>,
}

impl GermlineReference {
    pub fn new() -> GermlineReference {
        Default::default()
    }

    /// Insert a record. Re-inserting an existing key replaces the record
    /// but keeps its original position.
    pub fn insert(&mut self, key: GermlineKey, record: GermlineRecord) {
        match self.index.get(&key) {
            Some(&idx) => self.records[idx].1 = record,
            None => {
                self.index.insert(key.clone(), self.records.len());
                self.records.push((key, record));
            }
        }
    }

    pub fn get(
        &self,
        organism: &str,
        chain: Chain,
        region: Region,
        gene_id: &str,
    ) -> Option<&GermlineRecord> {
        let key = GermlineKey::new(organism, chain, region, gene_id);
        self.index.get(&key).map(|&idx| &self.records[idx].1)
    }

    pub fn germline_cdr3(
        &self,
        organism: &str,
        chain: Chain,
        region: Region,
        gene_id: &str,
    ) -> Option<&str> {
        self.get(organism, chain, region, gene_id)
            .map(|r| r.germline_cdr3())
    }

    /// All D genes of an organism/chain, in insertion order
    pub fn d_segments(&self, organism: &str, chain: Chain) -> Vec<DSegment> {
        self.records
            .iter()
            .filter(|(k, _)| k.organism == organism && k.chain == chain && k.region == Region::D)
            .map(|(k, r)| DSegment {
                gene_id: k.gene_id.clone(),
                seq: r.aligned_protseq.clone(),
            })
            .collect()
    }

    pub fn contains_organism(&self, organism: &str, chain: Chain) -> bool {
        self.records
            .iter()
            .any(|(k, _)| k.organism == organism && k.chain == chain)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(GermlineKey, GermlineRecord)> {
        self.records.iter()
    }

    /// Parse a tab-separated germline table (tcrdist "combo_xcr" layout).
    /// Needs the columns organism, chain, region, id, cdrs and aligned_protseq.
    pub fn from_reader<R: Read>(reader: R) -> Result<GermlineReference> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| anyhow!("Error reading the germline table headers: {:?}", e))?
            .clone();
        let column = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(anyhow!("Column {} not found in the germline table", name))
        };
        let (i_org, i_chain, i_region, i_id, i_cdrs, i_prot) = (
            column("organism")?,
            column("chain")?,
            column("region")?,
            column("id")?,
            column("cdrs")?,
            column("aligned_protseq")?,
        );

        let mut reference = GermlineReference::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result.with_context(|| {
                format!("Error reading the germline table (record {})", line + 1)
            })?;
            let field = |i: usize| record.get(i).unwrap_or("").trim();
            // tables may carry other loci (TRG/TRD...), only keep alpha/beta V/D/J
            let (Ok(chain), Ok(region)) = (
                field(i_chain).parse::<Chain>(),
                field(i_region).parse::<Region>(),
            ) else {
                continue;
            };
            let gene_id = field(i_id).to_string();
            reference.insert(
                GermlineKey::new(field(i_org), chain, region, &gene_id),
                GermlineRecord {
                    gene_id,
                    cdrs: field(i_cdrs).to_string(),
                    aligned_protseq: field(i_prot).to_string(),
                },
            );
        }
        Ok(reference)
    }

    pub fn from_file(path: &Path) -> Result<GermlineReference> {
        let file = File::open(path)
            .with_context(|| format!("Unable to open the germline table {}", path.display()))?;
        GermlineReference::from_reader(file)
    }
}

/// Source of germline references.
pub trait ReferenceLoader {
    fn load(&self, organism: &str, chain: Chain) -> Result<GermlineReference>;
}

/// Load the reference from a local tab-separated germline table.
#[derive(Clone, Debug)]
pub struct TsvReferenceLoader {
    pub path: PathBuf,
}

impl TsvReferenceLoader {
    pub fn new(path: &Path) -> TsvReferenceLoader {
        TsvReferenceLoader {
            path: path.to_path_buf(),
        }
    }
}

impl ReferenceLoader for TsvReferenceLoader {
    fn load(&self, organism: &str, chain: Chain) -> Result<GermlineReference> {
        let reference = GermlineReference::from_file(&self.path)?;
        if !reference.contains_organism(organism, chain) {
            return Err(anyhow!(
                "No germline genes for organism {} and chain {} in {}",
                organism,
                chain,
                self.path.display()
            ));
        }
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "id\torganism\tchain\tregion\tnucseq\tcdrs\taligned_protseq
TRBV19*01\thuman\tB\tV\tACGT\tMNH..EY;SVGAGI;CASSI\tMNHEY
TRBJ1-1*01\thuman\tB\tJ\tACGT\tNTEAFF\tNTEAFFGQGTRLTVV
TRBD1*01\thuman\tB\tD\tACGT\t\tGTGG
TRBD2*01\thuman\tB\tD\tACGT\t\tGTSGG
TRGV1*01\thuman\tG\tV\tACGT\tCATW\tCATW
TRAV1-1*01\tmouse\tA\tV\tACGT\tA;B;CAVR\tXX
";

    #[test]
    fn parse_table() -> Result<()> {
        let reference = GermlineReference::from_reader(TABLE.as_bytes())?;
        assert_eq!(reference.len(), 5);
        assert_eq!(
            reference.germline_cdr3("human", Chain::B, Region::V, "TRBV19*01"),
            Some("CASSI")
        );
        assert_eq!(
            reference.germline_cdr3("human", Chain::B, Region::J, "TRBJ1-1*01"),
            Some("NTEAFF")
        );
        assert_eq!(
            reference.germline_cdr3("mouse", Chain::A, Region::V, "TRAV1-1*01"),
            Some("CAVR")
        );
        assert!(reference
            .get("human", Chain::A, Region::V, "TRBV19*01")
            .is_none());
        let ds = reference.d_segments("human", Chain::B);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds[0].gene_id, "TRBD1*01");
        assert_eq!(ds[1].seq, "GTSGG");
        Ok(())
    }

    #[test]
    fn missing_column_is_an_error() {
        let table = "id\torganism\tchain\tregion\n";
        assert!(GermlineReference::from_reader(table.as_bytes()).is_err());
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut reference = GermlineReference::new();
        let rec = |s: &str| GermlineRecord {
            gene_id: String::new(),
            cdrs: String::new(),
            aligned_protseq: s.to_string(),
        };
        reference.insert(GermlineKey::new("human", Chain::B, Region::D, "D1"), rec("AA"));
        reference.insert(GermlineKey::new("human", Chain::B, Region::D, "D2"), rec("CC"));
        reference.insert(GermlineKey::new("human", Chain::B, Region::D, "D1"), rec("GG"));
        let ds = reference.d_segments("human", Chain::B);
        assert_eq!(ds[0].gene_id, "D1");
        assert_eq!(ds[0].seq, "GG");
        assert_eq!(reference.len(), 2);
    }
}
