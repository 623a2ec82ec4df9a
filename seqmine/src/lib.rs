pub mod error;
pub mod spam;

pub use error::{Error, Result};
pub use spam::{
    mine_closed, mine_frequent, mine_generators, mine_maximal, mine_top_k, MinSupport, MinerConfig, MiningResult,
    Pattern, SequenceDatabase, Traversal,
};

#[cfg(feature = "python")]
mod python {
    use crate::error::Error;
    use crate::spam::{self, MinerConfig, MiningResult, SequenceDatabase, Traversal};
    use numpy::ndarray::Array1;
    use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
    use pyo3::exceptions::{PyIOError, PyValueError};
    use pyo3::{pymodule, types::PyModule, Bound, PyErr, PyResult, Python};

    /// Supports, plus each pattern as a list of itemsets.
    type PyPatterns<'py> = (Bound<'py, PyArray1<usize>>, Vec<Vec<Vec<u32>>>);

    fn to_py_err(error: Error) -> PyErr {
        match error {
            Error::Io(e) => PyIOError::new_err(e.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }

    fn load(tokens: PyReadonlyArray1<'_, i32>) -> PyResult<SequenceDatabase> {
        let tokens = tokens.as_slice().map_err(|e| PyValueError::new_err(e.to_string()))?;
        SequenceDatabase::from_tokens(tokens).map_err(to_py_err)
    }

    fn config(min_length: usize, max_length: Option<usize>, max_gap: Option<usize>) -> MinerConfig {
        MinerConfig {
            min_pattern_length: min_length,
            max_pattern_length: max_length,
            max_gap,
            ..MinerConfig::default()
        }
    }

    fn into_py(py: Python<'_>, result: MiningResult) -> PyPatterns<'_> {
        let supports: Array1<usize> = result.patterns.iter().map(|p| p.support).collect();
        let patterns = result
            .patterns
            .into_iter()
            .map(|p| p.itemsets().to_vec())
            .collect();
        (supports.into_pyarray(py), patterns)
    }

    #[pymodule]
    fn seqmine<'py>(m: &Bound<'py, PyModule>) -> PyResult<()> {
        #[pyfn(m)]
        #[pyo3(name = "spam", signature = (tokens, min_support, min_length=0, max_length=None, max_gap=None))]
        fn spam_py<'py>(
            py: Python<'py>,
            tokens: PyReadonlyArray1<'py, i32>,
            min_support: f64,
            min_length: usize,
            max_length: Option<usize>,
            max_gap: Option<usize>,
        ) -> PyResult<PyPatterns<'py>> {
            let db = load(tokens)?;
            let config = config(min_length, max_length, max_gap);
            let result = spam::mine_frequent(&db, min_support, &config).map_err(to_py_err)?;
            Ok(into_py(py, result))
        }

        #[pyfn(m)]
        #[pyo3(name = "closed", signature = (tokens, min_support, min_length=0, max_length=None, max_gap=None))]
        fn closed_py<'py>(
            py: Python<'py>,
            tokens: PyReadonlyArray1<'py, i32>,
            min_support: f64,
            min_length: usize,
            max_length: Option<usize>,
            max_gap: Option<usize>,
        ) -> PyResult<PyPatterns<'py>> {
            let db = load(tokens)?;
            let config = config(min_length, max_length, max_gap);
            let result = spam::mine_closed(&db, min_support, &config).map_err(to_py_err)?;
            Ok(into_py(py, result))
        }

        #[pyfn(m)]
        #[pyo3(name = "maximal", signature = (tokens, min_support, min_length=0, max_length=None, max_gap=None))]
        fn maximal_py<'py>(
            py: Python<'py>,
            tokens: PyReadonlyArray1<'py, i32>,
            min_support: f64,
            min_length: usize,
            max_length: Option<usize>,
            max_gap: Option<usize>,
        ) -> PyResult<PyPatterns<'py>> {
            let db = load(tokens)?;
            let config = config(min_length, max_length, max_gap);
            let result = spam::mine_maximal(&db, min_support, &config).map_err(to_py_err)?;
            Ok(into_py(py, result))
        }

        #[pyfn(m)]
        #[pyo3(name = "generators", signature = (tokens, min_support, min_length=0, max_length=None, max_gap=None))]
        fn generators_py<'py>(
            py: Python<'py>,
            tokens: PyReadonlyArray1<'py, i32>,
            min_support: f64,
            min_length: usize,
            max_length: Option<usize>,
            max_gap: Option<usize>,
        ) -> PyResult<PyPatterns<'py>> {
            let db = load(tokens)?;
            let config = config(min_length, max_length, max_gap);
            let result = spam::mine_generators(&db, min_support, &config).map_err(to_py_err)?;
            Ok(into_py(py, result))
        }

        #[pyfn(m)]
        #[pyo3(name = "top_k", signature = (tokens, k, min_length=0, max_length=None, max_gap=None, best_first=true))]
        fn top_k_py<'py>(
            py: Python<'py>,
            tokens: PyReadonlyArray1<'py, i32>,
            k: usize,
            min_length: usize,
            max_length: Option<usize>,
            max_gap: Option<usize>,
            best_first: bool,
        ) -> PyResult<PyPatterns<'py>> {
            let db = load(tokens)?;
            let traversal = if best_first {
                Traversal::BestFirst
            } else {
                Traversal::DepthFirst
            };
            let config = config(min_length, max_length, max_gap).with_traversal(traversal);
            let result = spam::mine_top_k(&db, k, &config).map_err(to_py_err)?;
            Ok(into_py(py, result))
        }

        Ok(())
    }
}
