//! Python bindings (feature `py_binds`)
use crate::shared::{Chain, OutputMode, Receptor, ShuffleParameters, TsvReferenceLoader};
use crate::shuffler::{shuffle_with_loader, ShuffleOutput};
use anyhow::Result;
use pyo3::prelude::*;
use std::path::Path;

type PyReceptor = (Option<String>, Option<String>, Option<String>);

/// Shuffle a list of (v, cdr3, j) tuples, using the germline table at
/// `reference_path`. Return the requested output and the failure rate.
#[pyfunction]
#[pyo3(name = "shuffle", signature = (tcrs, reference_path, params = None))]
fn py_shuffle(
    py: Python<'_>,
    tcrs: Vec<PyReceptor>,
    reference_path: &str,
    params: Option<ShuffleParameters>,
) -> Result<(PyObject, f64)> {
    let params = params.unwrap_or_default();
    let receptors: Vec<Receptor> = tcrs
        .into_iter()
        .map(|(v, cdr3, j)| Receptor { v, cdr3, j })
        .collect();
    let loader = TsvReferenceLoader::new(Path::new(reference_path));
    let report = shuffle_with_loader(&receptors, &loader, &params)?;

    let output = match report.output {
        ShuffleOutput::Errors(errors) => errors
            .into_iter()
            .map(|e| (e.v, e.cdr3, e.j, e.reason.to_string()))
            .collect::<Vec<_>>()
            .into_py(py),
        ShuffleOutput::Presuffled(rows) => rows
            .into_iter()
            .map(|r| {
                (
                    r.v,
                    r.j,
                    r.germline_v,
                    r.germline_j,
                    r.cdr3,
                    r.cdr3_source.to_string(),
                    r.cut1,
                    r.cut2,
                    r.cut_cdr3,
                    r.fragments.v_part,
                    r.fragments.d_part,
                    r.fragments.j_part,
                )
            })
            .collect::<Vec<_>>()
            .into_py(py),
        ShuffleOutput::Shuffled(rows) => rows
            .into_iter()
            .map(|r| {
                (
                    r.v,
                    r.cdr3,
                    r.j,
                    (
                        r.components.v_part,
                        r.components.d_part,
                        r.components.j_part,
                    ),
                )
            })
            .collect::<Vec<_>>()
            .into_py(py),
    };
    Ok((output, report.failure_rate))
}

#[pymodule]
fn tcrshuffler(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ShuffleParameters>()?;
    m.add_class::<Chain>()?;
    m.add_class::<OutputMode>()?;
    m.add_function(wrap_pyfunction!(py_shuffle, m)?)?;
    Ok(())
}
