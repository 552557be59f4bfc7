#![allow(unsafe_op_in_unsafe_fn)]

use pyo3::{Bound, prelude::*, types::PyModule};

mod error;
mod results;

use error::{SkillcheckConfigError, SkillcheckError, config_error_to_py};
use results::PyAssessment;

use crate::{assess::Assessor, config::AssessmentConfig};

/// Assessor configured from an optional JSON policy.
#[pyclass(module = "skillcheck", name = "Assessor", frozen)]
pub struct PyAssessor {
    inner: Assessor,
}

#[pymethods]
impl PyAssessor {
    #[new]
    #[pyo3(signature = (config_json = None))]
    fn py_new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => AssessmentConfig::from_json_str(json).map_err(config_error_to_py)?,
            None => AssessmentConfig::default(),
        };
        Ok(Self {
            inner: Assessor::new(config),
        })
    }

    /// Assesses one submission without holding the GIL.
    fn assess(&self, py: Python<'_>, code: String) -> PyAssessment {
        let assessor = self.inner;
        py.detach(move || assessor.assess(&code)).into()
    }
}

/// Assesses one submission under the default policy.
#[pyfunction]
fn assess_code(py: Python<'_>, code: String) -> PyAssessment {
    py.detach(move || crate::assess::assess_code(&code)).into()
}

/// PyO3 entry module.
#[pymodule]
pub fn skillcheck(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("SkillcheckError", py.get_type::<SkillcheckError>())?;
    m.add("SkillcheckConfigError", py.get_type::<SkillcheckConfigError>())?;

    m.add_class::<PyAssessor>()?;
    m.add_class::<PyAssessment>()?;
    m.add_function(wrap_pyfunction!(assess_code, m)?)?;

    Ok(())
}
