//! Voltage gated ion channel rate tables.
//!
//! Channel kinetics are tabulated once over a [`VoltageGrid`] into pairs of
//! aligned arrays per gating particle, then shared as read-only prototypes
//! through a [`ChannelPrototypeRegistry`]. Interpolating the tables while
//! stepping a simulation is left to the consuming engine.

pub mod channel;
pub mod config;
pub mod error;
pub mod gate;
pub mod grid;
pub mod nachans;
pub mod rate_functions;
pub mod registry;

#[cfg(feature = "python")]
mod python;

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub use channel::{ChannelDefinition, ChannelSpec, GateRole, GatingParticle};
pub use config::TableConfig;
pub use error::{ChannelError, ChannelResult};
pub use gate::{GateSpec, RateTable, TableForm, TauSpec};
pub use grid::VoltageGrid;
pub use nachans::{ChannelParams, NaChannelKind};
pub use rate_functions::{RateFunction, RateTerm};
pub use registry::ChannelPrototypeRegistry;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
mod channel_tables {
    use pyo3::prelude::*;

    #[pymodule_export]
    use crate::python::PyChannelDefinition;
    #[pymodule_export]
    use crate::python::PyChannelPrototypeRegistry;

    /// `rate * exp((v - midpoint) / scale)` over a list of voltages
    #[pyfunction]
    fn exponential(v: Vec<f64>, rate: f64, scale: f64, midpoint: f64) -> Vec<f64> {
        crate::RateFunction::Exponential.eval_all(&v, rate, scale, midpoint)
    }

    #[pyfunction]
    fn sigmoid(v: Vec<f64>, rate: f64, scale: f64, midpoint: f64) -> Vec<f64> {
        crate::RateFunction::Sigmoid.eval_all(&v, rate, scale, midpoint)
    }

    #[pyfunction]
    fn linoid(v: Vec<f64>, rate: f64, scale: f64, midpoint: f64) -> Vec<f64> {
        crate::RateFunction::Linoid.eval_all(&v, rate, scale, midpoint)
    }

    /// Samples of [vmin, vmax] in `ndivs` intervals
    #[pyfunction]
    fn voltage_grid(vmin: f64, vmax: f64, ndivs: usize) -> PyResult<Vec<f64>> {
        Ok(crate::grid::build(vmin, vmax, ndivs)?)
    }
}
