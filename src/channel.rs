///
/// Channel prototypes: the gating particles and constants a simulation engine
/// needs to instance a voltage gated channel in a compartment.
///
use crate::error::{ChannelError, ChannelResult};
use crate::gate::{GateSpec, RateTable};
use crate::grid::VoltageGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateRole {
    /// Activation, "x" in the conductance formula
    X,
    /// Inactivation, "y"
    Y,
    /// Second inactivation / concentration gate, "z"
    Z,
}

impl GateRole {
    pub fn tag(self) -> &'static str {
        match self {
            GateRole::X => "x",
            GateRole::Y => "y",
            GateRole::Z => "z",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatingParticle {
    role: GateRole,
    power: u32,
    table: RateTable,
}

impl GatingParticle {
    pub fn role(&self) -> GateRole {
        self.role
    }

    /// Exponent applied to the gate state in the conductance formula
    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }
}

/// Everything needed to build one channel type.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSpec {
    pub name: String,
    pub activation_power: u32,
    pub inactivation_power: u32,
    pub reversal_potential: f64,
    pub initial_state: f64,
    pub activation: Option<GateSpec>,
    pub inactivation: Option<GateSpec>,
}

/// An immutable channel prototype. Tables are in (tau, inf) form.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDefinition {
    name: String,
    reversal_potential: f64,
    initial_state: f64,
    grid: VoltageGrid,
    activation: Option<GatingParticle>,
    inactivation: Option<GatingParticle>,
}

fn build_particle(
    channel: &str,
    role: GateRole,
    power: u32,
    spec: Option<&GateSpec>,
    grid: &VoltageGrid,
) -> ChannelResult<Option<GatingParticle>> {
    if power == 0 {
        return Ok(None);
    }
    let spec = spec.ok_or_else(|| ChannelError::missing(channel, &format!("{}Gate", role.tag())))?;
    Ok(Some(GatingParticle {
        role,
        power,
        table: spec.build(grid),
    }))
}

impl ChannelDefinition {
    /// Tabulates every gate with a non-zero power. A gate spec supplied for a
    /// zero power is not built.
    pub fn create(spec: &ChannelSpec, grid: &VoltageGrid) -> ChannelResult<ChannelDefinition> {
        let activation = build_particle(
            &spec.name,
            GateRole::X,
            spec.activation_power,
            spec.activation.as_ref(),
            grid,
        )?;
        let inactivation = build_particle(
            &spec.name,
            GateRole::Y,
            spec.inactivation_power,
            spec.inactivation.as_ref(),
            grid,
        )?;
        Ok(ChannelDefinition {
            name: spec.name.clone(),
            reversal_potential: spec.reversal_potential,
            initial_state: spec.initial_state,
            grid: *grid,
            activation,
            inactivation,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ek, in volts
    pub fn reversal_potential(&self) -> f64 {
        self.reversal_potential
    }

    pub fn initial_state(&self) -> f64 {
        self.initial_state
    }

    pub fn grid(&self) -> &VoltageGrid {
        &self.grid
    }

    pub fn activation(&self) -> Option<&GatingParticle> {
        self.activation.as_ref()
    }

    pub fn inactivation(&self) -> Option<&GatingParticle> {
        self.inactivation.as_ref()
    }

    pub fn particles(&self) -> impl Iterator<Item = &GatingParticle> {
        self.activation.iter().chain(self.inactivation.iter())
    }

    pub fn activation_power(&self) -> u32 {
        self.activation.as_ref().map_or(0, |p| p.power)
    }

    pub fn inactivation_power(&self) -> u32 {
        self.inactivation.as_ref().map_or(0, |p| p.power)
    }
}
