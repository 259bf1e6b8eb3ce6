//! Python bindings for the microscope environment.
//!
//! The class mirrors a gymnasium environment so existing training scripts can
//! drive the engine directly.
//!
//! # Quick Start
//!
//! ```python
//! import microscope
//!
//! env = microscope.MicroscopeEnv(turn_limit=100, opponent="minimax")
//! obs, info = env.reset(seed=7)
//!
//! mask = env.action_masks()
//! action = int(mask.nonzero()[0][0])
//! obs, reward, terminated, truncated, info = env.step(action)
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod py_core;
mod py_env;

pub use py_core::*;
pub use py_env::*;

/// Map an engine error onto `ValueError`.
pub(crate) fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// microscope: a 7×7 capture game engine for reinforcement learning.
///
/// This module provides:
/// - `MicroscopeEnv`, the step/reset environment
/// - Action id helpers (`encode_action`, `decode_action`)
/// - `find_best_move`, the minimax oracle over raw board bytes
#[pymodule]
fn microscope(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMicroscopeEnv>()?;

    m.add_function(wrap_pyfunction!(encode_action, m)?)?;
    m.add_function(wrap_pyfunction!(decode_action, m)?)?;
    m.add_function(wrap_pyfunction!(find_best_move, m)?)?;

    m.add("ACTION_COUNT", crate::core::ACTION_COUNT)?;
    m.add("NO_MOVE", crate::oracle::NO_MOVE)?;

    Ok(())
}
