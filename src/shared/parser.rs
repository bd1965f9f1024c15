//! Reading receptors from delimited tables and writing the run outputs
use crate::decompose::Fragments;
use crate::shared::errors::ErrorRecord;
use crate::shared::parameters::ColumnNames;
use crate::shared::receptor::Receptor;
use crate::shuffler::{PresuffledRow, ShuffledReceptor};
use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{Read, Write};

/// Read the V, CDR3 and J columns (found by name) of a delimited table.
/// Other columns are ignored, empty cells are read as missing values.
pub fn read_receptors<R: Read>(
    reader: R,
    columns: &ColumnNames,
    delimiter: u8,
) -> Result<Vec<Receptor>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| anyhow!("Error reading the receptor table headers: {:?}", e))?
        .clone();
    let position = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(anyhow!("Column {} not found in the receptor table", name))
    };
    let (iv, icdr3, ij) = (
        position(&columns.v)?,
        position(&columns.cdr3)?,
        position(&columns.j)?,
    );

    let mut receptors = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| {
            format!("Error reading the receptor table (record {})", line + 1)
        })?;
        let cell = |i: usize| {
            record
                .get(i)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        receptors.push(Receptor {
            v: cell(iv),
            cdr3: cell(icdr3),
            j: cell(ij),
        });
    }
    Ok(receptors)
}

fn components(f: &Fragments) -> String {
    format!("{};{};{}", f.v_part, f.d_part, f.j_part)
}

/// Shuffled receptors, with the input column names and a `components` column
pub fn write_shuffled<W: Write>(
    writer: W,
    rows: &[ShuffledReceptor],
    columns: &ColumnNames,
    delimiter: u8,
) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    wtr.write_record([
        columns.v.as_str(),
        columns.cdr3.as_str(),
        columns.j.as_str(),
        "components",
    ])?;
    for r in rows {
        wtr.write_record([
            r.v.as_str(),
            r.cdr3.as_str(),
            r.j.as_str(),
            components(&r.components).as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_presuffled<W: Write>(writer: W, rows: &[PresuffledRow], delimiter: u8) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    wtr.write_record([
        "v",
        "j",
        "germline_v",
        "germline_j",
        "cdr3",
        "cdr3_source",
        "cut1",
        "cut2",
        "cut_cdr3",
        "v_part",
        "d_part",
        "j_part",
    ])?;
    for r in rows {
        wtr.write_record([
            r.v.clone(),
            r.j.clone(),
            r.germline_v.clone(),
            r.germline_j.clone(),
            r.cdr3.clone(),
            r.cdr3_source.to_string(),
            r.cut1.to_string(),
            r.cut2.to_string(),
            r.cut_cdr3.clone(),
            r.fragments.v_part.clone(),
            r.fragments.d_part.clone(),
            r.fragments.j_part.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_errors<W: Write>(writer: W, errors: &[ErrorRecord], delimiter: u8) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    wtr.write_record(["v", "cdr3", "j", "reason"])?;
    for e in errors {
        wtr.write_record([
            e.v.as_deref().unwrap_or(""),
            e.cdr3.as_deref().unwrap_or(""),
            e.j.as_deref().unwrap_or(""),
            e.reason.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::FailureReason;

    #[test]
    fn read_by_column_name() -> Result<()> {
        let table = "cell\tjb\tcdr3b\tvb
c1\tTRBJ1-1*01\tCASSSHAGGNTEAFF\tTRBV19*01
c2\tTRBJ2-5*01\t\tTRBV12-1
";
        let columns = ColumnNames::default();
        let receptors = read_receptors(table.as_bytes(), &columns, b'\t')?;
        assert_eq!(receptors.len(), 2);
        assert_eq!(
            receptors[0],
            Receptor::new("TRBV19*01", "CASSSHAGGNTEAFF", "TRBJ1-1*01")
        );
        assert_eq!(receptors[1].cdr3, None);
        assert_eq!(receptors[1].v.as_deref(), Some("TRBV12-1"));
        Ok(())
    }

    #[test]
    fn missing_column() {
        let table = "va,cdr3a,ja\nTRAV1*01,CAVF,TRAJ1*01\n";
        let beta = ColumnNames::default();
        let alpha = ColumnNames::for_chain(crate::Chain::A);
        assert!(read_receptors(table.as_bytes(), &beta, b',').is_err());
        assert!(read_receptors(table.as_bytes(), &alpha, b',').is_ok());
    }

    #[test]
    fn error_table() -> Result<()> {
        let errors = vec![
            ErrorRecord::new(
                None,
                Some("CASSF"),
                Some("TRBJ1-1*01"),
                FailureReason::InvalidTypes,
            ),
            ErrorRecord::new(
                Some("TRBV99*01"),
                Some("CASSF"),
                Some("TRBJ1-1*01"),
                FailureReason::MissingGermline("TRBV99*01".to_string()),
            ),
        ];
        let mut out = Vec::new();
        write_errors(&mut out, &errors, b'\t')?;
        let text = String::from_utf8(out)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "v\tcdr3\tj\treason");
        assert_eq!(lines[1], "\tCASSF\tTRBJ1-1*01\tinvalid_types");
        assert_eq!(
            lines[2],
            "TRBV99*01\tCASSF\tTRBJ1-1*01\tmissing_germline_TRBV99*01"
        );
        Ok(())
    }
}
