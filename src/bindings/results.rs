#![allow(unsafe_op_in_unsafe_fn)]

use pyo3::{Py, PyAny, prelude::*, types::PyDict};

use super::error::SkillcheckError;
use crate::grade::SubmissionResult;

#[pyclass(module = "skillcheck", name = "Assessment", frozen)]
pub struct PyAssessment {
    pub(crate) inner: SubmissionResult,
}

impl From<SubmissionResult> for PyAssessment {
    fn from(inner: SubmissionResult) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyAssessment {
    /// 1.0 if the submission parsed, else 0.0.
    #[getter]
    pub fn syntax_score(&self) -> f64 {
        self.inner.syntax_score()
    }

    /// Saturating structure score in [0, 1].
    #[getter]
    pub fn structure_score(&self) -> f64 {
        self.inner.structure_score()
    }

    /// The tier's concept score, or 0.0 without a tier.
    #[getter]
    pub fn concept_score(&self) -> f64 {
        self.inner.concept_score()
    }

    /// Structure score scaled by concept score.
    #[getter]
    pub fn quality_score(&self) -> f64 {
        self.inner.quality_score()
    }

    /// Weighted total score.
    #[getter]
    pub fn total_score(&self) -> f64 {
        self.inner.total_score()
    }

    /// Tier name, or None if the submission was not analyzed.
    #[getter]
    pub fn tier(&self) -> Option<String> {
        self.inner.tier().map(|t| t.to_string())
    }

    /// Feedback messages in priority order.
    #[getter]
    pub fn feedback(&self) -> Vec<String> {
        self.inner.feedback().to_vec()
    }

    /// The full result serialized as JSON.
    pub fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner)
            .map_err(|err| PyErr::new::<SkillcheckError, _>(err.to_string()))
    }

    pub fn to_dict(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let dict = PyDict::new(py);
        dict.set_item("syntax_score", self.syntax_score())?;
        dict.set_item("structure_score", self.structure_score())?;
        dict.set_item("concept_score", self.concept_score())?;
        dict.set_item("quality_score", self.quality_score())?;
        dict.set_item("total_score", self.total_score())?;
        dict.set_item("tier", self.tier())?;
        dict.set_item("feedback", self.feedback())?;
        Ok(dict.into())
    }

    fn __repr__(&self) -> String {
        format!(
            "Assessment(total_score={:.2}, tier={:?})",
            self.total_score(),
            self.tier()
        )
    }
}
