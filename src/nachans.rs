///
/// Na+ channels of the Traub et al. (2005) thalamocortical model.
/// All voltages in volts, times in seconds.
///
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::channel::ChannelSpec;
use crate::error::ChannelError;
use crate::gate::{GateSpec, TauSpec};
use crate::rate_functions::RateTerm;

/// Default Na+ reversal potential
pub const NA_EK: f64 = 50e-3;

const NAF_SHIFT: f64 = -3.5e-3;
const NAF2_SHIFT: f64 = -2.5e-3;
const NAPF_SS_SHIFT: f64 = -2.5e-3;
const NAPF_TCR_SHIFT: f64 = 7e-3;
const NAF_TCR_M_SHIFT: f64 = -5.5e-3;
const NAF_TCR_H_SHIFT: f64 = -7e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NaChannelKind {
    NaF,
    NaF2,
    /// NaF2 without the fast Na+ shift, for nRT cells
    NaF2nRT,
    /// Persistent
    NaP,
    /// Persistent, fast
    NaPF,
    NaPFSS,
    /// NaPF with a first power activation, for TCR cells
    NaPFTCR,
    /// NaF with separate activation and inactivation shifts, for TCR cells
    NaFTCR,
}

/// Optional overrides; `None` falls back to the channel's default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelParams {
    pub shift: Option<f64>,
    pub ek: Option<f64>,
}

impl ChannelParams {
    pub fn with_shift(shift: f64) -> Self {
        ChannelParams {
            shift: Some(shift),
            ek: None,
        }
    }
}

fn naf_m_gate() -> GateSpec {
    GateSpec::new(
        TauSpec::Piecewise {
            threshold: -30e-3,
            below: RateTerm::exponential(0.14e-3, 10e-3, -30e-3).with_offset(0.025e-3),
            above: RateTerm::exponential(0.145e-3, -10e-3, -30e-3).with_offset(0.02e-3),
        },
        RateTerm::sigmoid(1.0, 10e-3, -38e-3),
    )
}

fn naf_h_gate() -> GateSpec {
    GateSpec::new(
        TauSpec::Single(RateTerm::sigmoid(1.15e-3, -15e-3, -37e-3).with_offset(0.15e-3)),
        RateTerm::sigmoid(1.0, -10.7e-3, -62.9e-3),
    )
}

fn naf2_m_gate() -> GateSpec {
    GateSpec::new(
        TauSpec::Piecewise {
            threshold: -30e-3,
            below: RateTerm::exponential(0.1525e-3, 10e-3, -30e-3).with_offset(0.0125e-3),
            above: RateTerm::exponential(0.145e-3, -10e-3, -30e-3).with_offset(0.02e-3),
        },
        RateTerm::sigmoid(1.0, 10e-3, -38e-3),
    )
}

fn naf2_h_gate() -> GateSpec {
    GateSpec::new(
        TauSpec::Single(RateTerm::sigmoid(1.125e-3, -15e-3, -37e-3).with_offset(0.225e-3)),
        RateTerm::sigmoid(1.0, -6.7e-3, -58.3e-3),
    )
}

fn nap_m_gate() -> GateSpec {
    GateSpec::new(
        TauSpec::Piecewise {
            threshold: -40e-3,
            below: RateTerm::exponential(0.14e-3, 10e-3, -40e-3).with_offset(0.025e-3),
            above: RateTerm::exponential(0.145e-3, -10e-3, -40e-3).with_offset(0.02e-3),
        },
        RateTerm::sigmoid(1.0, 10e-3, -48e-3),
    )
}

impl NaChannelKind {
    /// In the order the prototype library is populated
    pub const ALL: [NaChannelKind; 8] = [
        NaChannelKind::NaF,
        NaChannelKind::NaF2,
        NaChannelKind::NaF2nRT,
        NaChannelKind::NaP,
        NaChannelKind::NaPF,
        NaChannelKind::NaPFSS,
        NaChannelKind::NaPFTCR,
        NaChannelKind::NaFTCR,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NaChannelKind::NaF => "NaF",
            NaChannelKind::NaF2 => "NaF2",
            NaChannelKind::NaF2nRT => "NaF2_nRT",
            NaChannelKind::NaP => "NaP",
            NaChannelKind::NaPF => "NaPF",
            NaChannelKind::NaPFSS => "NaPF_SS",
            NaChannelKind::NaPFTCR => "NaPF_TCR",
            NaChannelKind::NaFTCR => "NaF_TCR",
        }
    }

    /// (activation, inactivation) powers
    pub fn powers(self) -> (u32, u32) {
        match self {
            NaChannelKind::NaF
            | NaChannelKind::NaF2
            | NaChannelKind::NaF2nRT
            | NaChannelKind::NaFTCR => (3, 1),
            NaChannelKind::NaPF | NaChannelKind::NaPFSS => (3, 0),
            NaChannelKind::NaP | NaChannelKind::NaPFTCR => (1, 0),
        }
    }

    /// Shift used when none is requested. `None` for channels whose shift is
    /// fixed and cannot be overridden.
    pub fn default_shift(self) -> Option<f64> {
        match self {
            NaChannelKind::NaF => Some(NAF_SHIFT),
            NaChannelKind::NaF2 => Some(NAF2_SHIFT),
            NaChannelKind::NaPFSS => Some(NAPF_SS_SHIFT),
            NaChannelKind::NaPFTCR => Some(NAPF_TCR_SHIFT),
            NaChannelKind::NaF2nRT
            | NaChannelKind::NaP
            | NaChannelKind::NaPF
            | NaChannelKind::NaFTCR => None,
        }
    }

    /// Gate formulas and constants for this channel. A shift passed to a
    /// channel without an adjustable shift is ignored.
    pub fn spec(self, params: &ChannelParams) -> ChannelSpec {
        let shift = self
            .default_shift()
            .map(|default| params.shift.unwrap_or(default));
        if let Some(shift) = shift {
            debug!("{}: shift = {}", self.name(), shift);
        }
        let shift = shift.unwrap_or(0.0);

        let (activation, inactivation) = match self {
            // Inactivation stays on the unshifted grid
            NaChannelKind::NaF => (naf_m_gate().shifted(shift), Some(naf_h_gate())),
            NaChannelKind::NaF2 => (naf2_m_gate().shifted(shift), Some(naf2_h_gate())),
            NaChannelKind::NaF2nRT => (naf2_m_gate(), Some(naf2_h_gate())),
            NaChannelKind::NaP => (nap_m_gate(), None),
            NaChannelKind::NaPF => (naf_m_gate(), None),
            NaChannelKind::NaPFSS | NaChannelKind::NaPFTCR => (naf_m_gate().shifted(shift), None),
            NaChannelKind::NaFTCR => {
                debug!(
                    "{}: m shift = {}, h shift = {}",
                    self.name(),
                    NAF_TCR_M_SHIFT,
                    NAF_TCR_H_SHIFT
                );
                (
                    naf_m_gate().shifted(NAF_TCR_M_SHIFT),
                    // Only the steady state of h is shifted
                    Some(naf_h_gate().with_steady_shift(NAF_TCR_H_SHIFT)),
                )
            }
        };

        let (activation_power, inactivation_power) = self.powers();
        ChannelSpec {
            name: self.name().to_owned(),
            activation_power,
            inactivation_power,
            reversal_potential: params.ek.unwrap_or(NA_EK),
            initial_state: 0.0,
            activation: Some(activation),
            inactivation,
        }
    }
}

impl fmt::Display for NaChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NaChannelKind {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaChannelKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ChannelError::UnknownChannelType(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelDefinition;
    use crate::grid::VoltageGrid;

    fn rel_close(actual: f64, expected: f64, tol: f64) -> bool {
        (actual - expected).abs() <= tol * expected.abs()
    }

    fn build(kind: NaChannelKind, params: ChannelParams, grid: &VoltageGrid) -> ChannelDefinition {
        ChannelDefinition::create(&kind.spec(&params), grid).unwrap()
    }

    #[test]
    fn test_names_round_trip() {
        for kind in NaChannelKind::ALL {
            assert_eq!(kind.name().parse::<NaChannelKind>().unwrap(), kind);
        }
        assert_eq!(
            "KDR".parse::<NaChannelKind>(),
            Err(ChannelError::UnknownChannelType("KDR".to_owned()))
        );
    }

    #[test]
    fn test_powers_and_gate_counts() {
        let grid = VoltageGrid::default();
        for kind in NaChannelKind::ALL {
            let channel = build(kind, ChannelParams::default(), &grid);
            let (x, y) = kind.powers();
            assert_eq!(channel.activation_power(), x, "{kind}");
            assert_eq!(channel.inactivation_power(), y, "{kind}");
            assert_eq!(channel.reversal_potential(), NA_EK);
            assert_eq!(channel.initial_state(), 0.0);
            for particle in channel.particles() {
                assert_eq!(particle.table().len(), grid.len());
                assert!(particle.table().table_a().iter().all(|t| t.is_finite() && *t > 0.0));
                assert!(particle.table().table_b().iter().all(|s| s.is_finite()));
            }
        }
        assert_eq!(NaChannelKind::NaPFTCR.powers(), (1, 0));
        assert_eq!(NaChannelKind::NaPF.powers(), (3, 0));
    }

    #[test]
    fn test_naf_m_inf_reference_value() {
        let shift = -3.5e-3;
        let grid = VoltageGrid::new(-100e-3, 50e-3, 3000).unwrap();
        let channel = build(NaChannelKind::NaF, ChannelParams::with_shift(shift), &grid);
        // -38 mV is sample 1240
        let i = 1240;
        let v = grid.samples()[i];
        assert!((v + 38e-3).abs() < 1e-12);

        let vs = v + shift;
        let expected_m_inf = 1.0 / (1.0 + ((-vs - 38e-3) / 10e-3).exp());
        let expected_tau_m = 1.0e-3 * (0.025 + 0.14 * ((vs + 30.0e-3) / 10.0e-3).exp());
        let m = channel.activation().unwrap().table();
        assert!(rel_close(m.table_b()[i], expected_m_inf, 1e-9));
        assert!(rel_close(m.table_a()[i], expected_tau_m, 1e-9));

        // Inactivation ignores the shift
        let expected_tau_h = 1.0e-3 * (0.15 + 1.15 / (1.0 + ((v + 37.0e-3) / 15.0e-3).exp()));
        let expected_h_inf = 1.0 / (1.0 + ((v + 62.9e-3) / 10.7e-3).exp());
        let h = channel.inactivation().unwrap().table();
        assert!(rel_close(h.table_a()[i], expected_tau_h, 1e-9));
        assert!(rel_close(h.table_b()[i], expected_h_inf, 1e-9));
    }

    #[test]
    fn test_naf_branches_around_threshold() {
        let grid = VoltageGrid::new(-100e-3, 50e-3, 3000).unwrap();
        let channel = build(NaChannelKind::NaF, ChannelParams::with_shift(0.0), &grid);
        let v = grid.samples();
        let tau = channel.activation().unwrap().table().table_a();
        // Samples at -30.05 mV and -29.95 mV
        let (lo, hi) = (1399, 1401);
        assert!(v[lo] < -30e-3 && v[hi] > -30e-3);
        let low_branch = 1.0e-3 * (0.025 + 0.14 * ((v[lo] + 30.0e-3) / 10.0e-3).exp());
        let high_branch = 1.0e-3 * (0.02 + 0.145 * ((-v[hi] - 30.0e-3) / 10.0e-3).exp());
        assert!(rel_close(tau[lo], low_branch, 1e-9));
        assert!(rel_close(tau[hi], high_branch, 1e-9));
    }

    #[test]
    fn test_naf2_nrt_equals_unshifted_naf2() {
        let grid = VoltageGrid::default();
        let nrt = build(NaChannelKind::NaF2nRT, ChannelParams::default(), &grid);
        let naf2 = build(NaChannelKind::NaF2, ChannelParams::with_shift(0.0), &grid);
        assert_eq!(nrt.activation().unwrap().table(), naf2.activation().unwrap().table());
        assert_eq!(nrt.inactivation().unwrap().table(), naf2.inactivation().unwrap().table());
        // A requested shift does not reach NaF2_nRT
        let nrt_shifted = build(NaChannelKind::NaF2nRT, ChannelParams::with_shift(-9e-3), &grid);
        assert_eq!(nrt_shifted, nrt);
    }

    #[test]
    fn test_naf2_shift_only_moves_activation() {
        let grid = VoltageGrid::default();
        let shifted = build(NaChannelKind::NaF2, ChannelParams::default(), &grid);
        let plain = build(NaChannelKind::NaF2, ChannelParams::with_shift(0.0), &grid);
        assert_ne!(shifted.activation(), plain.activation());
        assert_eq!(shifted.inactivation(), plain.inactivation());
    }

    #[test]
    fn test_napf_variants_share_formula() {
        let grid = VoltageGrid::default();
        let napf = build(NaChannelKind::NaPF, ChannelParams::default(), &grid);
        let napf_ss = build(NaChannelKind::NaPFSS, ChannelParams::with_shift(0.0), &grid);
        let napf_tcr = build(NaChannelKind::NaPFTCR, ChannelParams::with_shift(0.0), &grid);
        let table = napf.activation().unwrap().table();
        assert_eq!(napf_ss.activation().unwrap().table(), table);
        assert_eq!(napf_tcr.activation().unwrap().table(), table);
        assert_eq!(napf_tcr.activation_power(), 1);
    }

    #[test]
    fn test_napf_tcr_default_shift() {
        let grid = VoltageGrid::default();
        let channel = build(NaChannelKind::NaPFTCR, ChannelParams::default(), &grid);
        let v = grid.samples();
        let m = channel.activation().unwrap().table();
        for i in [0, 100, 320, 640] {
            let vs = v[i] + 7e-3;
            let expected = 1.0 / (1.0 + ((-vs - 38e-3) / 10e-3).exp());
            assert!(rel_close(m.table_b()[i], expected, 1e-9));
        }
    }

    #[test]
    fn test_nap_threshold() {
        let grid = VoltageGrid::default();
        let channel = build(NaChannelKind::NaP, ChannelParams::default(), &grid);
        let v = grid.samples();
        let tau = channel.activation().unwrap().table().table_a();
        // -40.25 mV and -39.75 mV
        for i in [319, 321] {
            let expected = if v[i] < -40e-3 {
                1.0e-3 * (0.025 + 0.14 * ((v[i] + 40e-3) / 10e-3).exp())
            } else {
                1.0e-3 * (0.02 + 0.145 * ((-v[i] - 40e-3) / 10e-3).exp())
            };
            assert!(rel_close(tau[i], expected, 1e-9));
        }
    }

    #[test]
    fn test_naf_tcr_shifts() {
        let grid = VoltageGrid::default();
        let channel = build(NaChannelKind::NaFTCR, ChannelParams::default(), &grid);
        let v = grid.samples();
        let m = channel.activation().unwrap().table();
        let h = channel.inactivation().unwrap().table();
        for i in [0, 200, 333, 640] {
            let vm = v[i] - 5.5e-3;
            let m_inf = 1.0 / (1.0 + ((-vm - 38e-3) / 10e-3).exp());
            let tau_h = 1.0e-3 * (0.15 + 1.15 / (1.0 + ((v[i] + 37.0e-3) / 15.0e-3).exp()));
            let h_inf = 1.0 / (1.0 + ((v[i] - 7e-3 + 62.9e-3) / 10.7e-3).exp());
            assert!(rel_close(m.table_b()[i], m_inf, 1e-9));
            assert!(rel_close(h.table_a()[i], tau_h, 1e-9));
            assert!(rel_close(h.table_b()[i], h_inf, 1e-9));
        }
    }

    #[test]
    fn test_custom_reversal_potential() {
        let params = ChannelParams {
            shift: None,
            ek: Some(55e-3),
        };
        let spec = NaChannelKind::NaP.spec(&params);
        assert_eq!(spec.reversal_potential, 55e-3);
    }
}
