use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ChannelResult;
use crate::grid::VoltageGrid;

/// Tabulation settings, read from TOML. Missing keys take the defaults:
///
/// ```toml
/// vmin = -0.120
/// vmax = 0.040
/// ndivs = 640
/// library_path = "/library"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub vmin: f64,
    pub vmax: f64,
    pub ndivs: usize,
    pub library_path: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        let grid = VoltageGrid::default();
        TableConfig {
            vmin: grid.vmin(),
            vmax: grid.vmax(),
            ndivs: grid.ndivs(),
            library_path: "/library".to_owned(),
        }
    }
}

impl TableConfig {
    pub fn from_toml_str(contents: &str) -> ChannelResult<TableConfig> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ChannelResult<TableConfig> {
        let contents = fs::read_to_string(path)?;
        TableConfig::from_toml_str(&contents)
    }

    pub fn grid(&self) -> ChannelResult<VoltageGrid> {
        VoltageGrid::new(self.vmin, self.vmax, self.ndivs)
    }
}
