use crate::error::{ChannelError, ChannelResult};

/// Evenly spaced discretisation of the membrane voltage range that every
/// rate table is sampled on. Voltages are in volts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageGrid {
    vmin: f64,
    vmax: f64,
    ndivs: usize,
}

impl Default for VoltageGrid {
    /// -120 mV to 40 mV in 640 divisions (0.25 mV per step)
    fn default() -> Self {
        VoltageGrid {
            vmin: -120e-3,
            vmax: 40e-3,
            ndivs: 640,
        }
    }
}

impl VoltageGrid {
    pub fn new(vmin: f64, vmax: f64, ndivs: usize) -> ChannelResult<VoltageGrid> {
        // Written so that NaN bounds are rejected too
        let bounds_ok = vmax > vmin && vmin.is_finite() && vmax.is_finite();
        // ndivs + 1 samples must be countable
        let ndivs_ok = ndivs >= 1 && ndivs.checked_add(1).is_some();
        if !bounds_ok || !ndivs_ok {
            return Err(ChannelError::InvalidRange { vmin, vmax, ndivs });
        }
        Ok(VoltageGrid { vmin, vmax, ndivs })
    }

    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    pub fn ndivs(&self) -> usize {
        self.ndivs
    }

    /// Number of samples, always `ndivs + 1`
    pub fn len(&self) -> usize {
        self.ndivs + 1
    }

    pub fn step(&self) -> f64 {
        (self.vmax - self.vmin) / self.ndivs as f64
    }

    /// Same sampling as numpy's `linspace`: `vmin + i * step`, with the
    /// final sample pinned to `vmax`.
    pub fn samples(&self) -> Vec<f64> {
        let step = self.step();
        let mut v: Vec<f64> = (0..self.len())
            .map(|i| self.vmin + i as f64 * step)
            .collect();
        v[self.ndivs] = self.vmax;
        v
    }
}

/// Samples of `[vmin, vmax]` split into `ndivs` intervals.
pub fn build(vmin: f64, vmax: f64, ndivs: usize) -> ChannelResult<Vec<f64>> {
    Ok(VoltageGrid::new(vmin, vmax, ndivs)?.samples())
}
