use itertools::Itertools;

use crate::grid::VoltageGrid;
use crate::rate_functions::RateTerm;

/// Meaning of the two columns of a [`RateTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableForm {
    /// A = time constant (s), B = steady state (dimensionless)
    TauInf,
    /// A = alpha (1/s), B = alpha + beta (1/s)
    AlphaBeta,
}

/// Two index-aligned columns sampled on a [`VoltageGrid`]: `table_a()[i]`
/// and `table_b()[i]` both belong to grid sample `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    form: TableForm,
    grid: VoltageGrid,
    a: Vec<f64>,
    b: Vec<f64>,
}

impl RateTable {
    pub(crate) fn new(form: TableForm, grid: VoltageGrid, a: Vec<f64>, b: Vec<f64>) -> RateTable {
        debug_assert_eq!(a.len(), grid.len());
        debug_assert_eq!(b.len(), grid.len());
        RateTable { form, grid, a, b }
    }

    pub fn form(&self) -> TableForm {
        self.form
    }

    pub fn grid(&self) -> &VoltageGrid {
        &self.grid
    }

    pub fn table_a(&self) -> &[f64] {
        &self.a
    }

    pub fn table_b(&self) -> &[f64] {
        &self.b
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Owned copies of both columns, for consumers that need to mutate them
    pub fn to_vecs(&self) -> (Vec<f64>, Vec<f64>) {
        (self.a.clone(), self.b.clone())
    }

    /// Converts (tau, inf) into the (alpha, alpha + beta) form expected by
    /// HH-style gates: `alpha = inf / tau`, `alpha + beta = 1 / tau`.
    pub fn to_alpha_beta(&self) -> RateTable {
        match self.form {
            TableForm::AlphaBeta => self.clone(),
            TableForm::TauInf => {
                let (alpha, total): (Vec<f64>, Vec<f64>) = self
                    .a
                    .iter()
                    .zip_eq(&self.b)
                    .map(|(tau, inf)| (inf / tau, 1.0 / tau))
                    .unzip();
                RateTable::new(TableForm::AlphaBeta, self.grid, alpha, total)
            }
        }
    }

    /// Linear interpolation of both columns at `v`. Voltages outside the grid
    /// are clamped to the end samples.
    pub fn lookup(&self, v: f64) -> (f64, f64) {
        let last = self.grid.ndivs();
        if v <= self.grid.vmin() {
            return (self.a[0], self.b[0]);
        }
        if v >= self.grid.vmax() {
            return (self.a[last], self.b[last]);
        }
        let position = (v - self.grid.vmin()) / self.grid.step();
        let i = (position.floor() as usize).min(last - 1);
        let frac = position - i as f64;
        let lerp = |t: &[f64]| t[i] + (t[i + 1] - t[i]) * frac;
        (lerp(&self.a), lerp(&self.b))
    }
}

/// How the time constant depends on voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TauSpec {
    Single(RateTerm),
    /// `below` for `v < threshold`, `above` otherwise
    Piecewise {
        threshold: f64,
        below: RateTerm,
        above: RateTerm,
    },
}

impl TauSpec {
    fn eval(&self, v: f64) -> f64 {
        match self {
            TauSpec::Single(term) => term.eval(v),
            TauSpec::Piecewise {
                threshold,
                below,
                above,
            } => {
                if v < *threshold {
                    below.eval(v)
                } else {
                    above.eval(v)
                }
            }
        }
    }
}

/// Formulas for one gating particle. Each shift is added to the grid voltage
/// before the matching formula is evaluated; the tau shift also moves the
/// piecewise branch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateSpec {
    pub tau: TauSpec,
    pub steady_state: RateTerm,
    pub tau_shift: f64,
    pub steady_shift: f64,
}

impl GateSpec {
    pub fn new(tau: TauSpec, steady_state: RateTerm) -> Self {
        GateSpec {
            tau,
            steady_state,
            tau_shift: 0.0,
            steady_shift: 0.0,
        }
    }

    /// Same shift for both formulas
    pub fn shifted(self, shift: f64) -> Self {
        GateSpec {
            tau_shift: shift,
            steady_shift: shift,
            ..self
        }
    }

    pub fn with_tau_shift(self, tau_shift: f64) -> Self {
        GateSpec { tau_shift, ..self }
    }

    pub fn with_steady_shift(self, steady_shift: f64) -> Self {
        GateSpec {
            steady_shift,
            ..self
        }
    }

    /// Tabulates (tau, inf) over `grid`.
    pub fn build(&self, grid: &VoltageGrid) -> RateTable {
        let v = grid.samples();
        let tau = v
            .iter()
            .map(|&x| self.tau.eval(x + self.tau_shift))
            .collect();
        let inf = v
            .iter()
            .map(|&x| self.steady_state.eval(x + self.steady_shift))
            .collect();
        RateTable::new(TableForm::TauInf, *grid, tau, inf)
    }
}
