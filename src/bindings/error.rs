use pyo3::{PyErr, create_exception, exceptions::PyException};

use crate::config::ConfigError;

create_exception!(skillcheck, SkillcheckError, PyException);
create_exception!(skillcheck, SkillcheckConfigError, SkillcheckError);

pub(crate) fn config_error_to_py(err: ConfigError) -> PyErr {
    PyErr::new::<SkillcheckConfigError, _>(err.to_string())
}
