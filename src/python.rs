use std::sync::Arc;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::channel::{ChannelDefinition, GatingParticle};
use crate::config::TableConfig;
use crate::error::ChannelError;
use crate::grid::VoltageGrid;
use crate::nachans::ChannelParams;
use crate::registry::ChannelPrototypeRegistry;

impl From<ChannelError> for PyErr {
    fn from(err: ChannelError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Copies out so Python never holds the prototype's own arrays
fn tables(particle: Option<&GatingParticle>, alpha_beta: bool) -> Option<(Vec<f64>, Vec<f64>)> {
    particle.map(|p| {
        if alpha_beta {
            p.table().to_alpha_beta().to_vecs()
        } else {
            p.table().to_vecs()
        }
    })
}

#[pyclass(name = "ChannelDefinition", frozen)]
pub struct PyChannelDefinition {
    inner: Arc<ChannelDefinition>,
}

#[pymethods]
impl PyChannelDefinition {
    #[getter]
    fn name(&self) -> String {
        self.inner.name().to_owned()
    }

    #[getter]
    fn ek(&self) -> f64 {
        self.inner.reversal_potential()
    }

    #[getter]
    fn initial_state(&self) -> f64 {
        self.inner.initial_state()
    }

    #[getter]
    fn xpower(&self) -> u32 {
        self.inner.activation_power()
    }

    #[getter]
    fn ypower(&self) -> u32 {
        self.inner.inactivation_power()
    }

    /// (vmin, vmax, ndivs) the tables were sampled on
    fn grid(&self) -> (f64, f64, usize) {
        let grid = self.inner.grid();
        (grid.vmin(), grid.vmax(), grid.ndivs())
    }

    /// (tau, inf), or (alpha, alpha + beta) with `alpha_beta=True`
    #[pyo3(signature = (alpha_beta=false))]
    fn x_tables(&self, alpha_beta: bool) -> Option<(Vec<f64>, Vec<f64>)> {
        tables(self.inner.activation(), alpha_beta)
    }

    #[pyo3(signature = (alpha_beta=false))]
    fn y_tables(&self, alpha_beta: bool) -> Option<(Vec<f64>, Vec<f64>)> {
        tables(self.inner.inactivation(), alpha_beta)
    }

    fn __repr__(&self) -> String {
        format!(
            "ChannelDefinition(name={:?}, xpower={}, ypower={}, ek={})",
            self.inner.name(),
            self.inner.activation_power(),
            self.inner.inactivation_power(),
            self.inner.reversal_potential()
        )
    }
}

#[pyclass(name = "ChannelPrototypeRegistry", frozen)]
pub struct PyChannelPrototypeRegistry {
    inner: ChannelPrototypeRegistry,
}

#[pymethods]
impl PyChannelPrototypeRegistry {
    #[new]
    #[pyo3(signature = (vmin=None, vmax=None, ndivs=None))]
    fn new(vmin: Option<f64>, vmax: Option<f64>, ndivs: Option<usize>) -> PyResult<Self> {
        let defaults = VoltageGrid::default();
        let grid = VoltageGrid::new(
            vmin.unwrap_or(defaults.vmin()),
            vmax.unwrap_or(defaults.vmax()),
            ndivs.unwrap_or(defaults.ndivs()),
        )?;
        Ok(Self {
            inner: ChannelPrototypeRegistry::new(grid),
        })
    }

    /// Registry configured from a TOML file
    #[staticmethod]
    fn from_config(path: &str) -> PyResult<Self> {
        let config = TableConfig::load(path)?;
        Ok(Self {
            inner: ChannelPrototypeRegistry::from_config(&config)?,
        })
    }

    #[pyo3(signature = (name, shift=None, ek=None))]
    fn get_or_create(
        &self,
        name: &str,
        shift: Option<f64>,
        ek: Option<f64>,
    ) -> PyResult<PyChannelDefinition> {
        let inner = self.inner.get_or_create(name, &ChannelParams { shift, ek })?;
        Ok(PyChannelDefinition { inner })
    }

    fn init_na_prototypes(&self) -> PyResult<Vec<String>> {
        Ok(self.inner.init_na_prototypes()?.into_iter().collect())
    }

    fn names(&self) -> Vec<String> {
        self.inner.names().into_iter().collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __contains__(&self, name: &str) -> bool {
        self.inner.get(name).is_some()
    }
}
