use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use itertools::Itertools;
use log::{debug, info, warn};

use crate::channel::ChannelDefinition;
use crate::config::TableConfig;
use crate::error::ChannelResult;
use crate::grid::VoltageGrid;
use crate::nachans::{ChannelParams, NaChannelKind};

/// Library of channel prototypes, one per channel type name.
///
/// Entries are write once: the first request for a name builds the prototype
/// and every later request gets that same instance back, whatever parameters
/// it passes. A single lock is held across the check and the build so
/// concurrent callers never build a name twice.
pub struct ChannelPrototypeRegistry {
    grid: VoltageGrid,
    library_path: String,
    prototypes: Mutex<HashMap<String, Arc<ChannelDefinition>>>,
}

impl Default for ChannelPrototypeRegistry {
    fn default() -> Self {
        ChannelPrototypeRegistry::new(VoltageGrid::default())
    }
}

impl ChannelPrototypeRegistry {
    pub fn new(grid: VoltageGrid) -> ChannelPrototypeRegistry {
        ChannelPrototypeRegistry {
            grid,
            library_path: TableConfig::default().library_path,
            prototypes: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &TableConfig) -> ChannelResult<ChannelPrototypeRegistry> {
        Ok(ChannelPrototypeRegistry {
            grid: config.grid()?,
            library_path: config.library_path.clone(),
            prototypes: Mutex::new(HashMap::new()),
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<ChannelDefinition>>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent
        self.prototypes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn grid(&self) -> &VoltageGrid {
        &self.grid
    }

    /// Path the prototype for `name` lives under in the simulator's library
    pub fn prototype_path(&self, name: &str) -> String {
        format!("{}/{}", self.library_path, name)
    }

    /// Returns the prototype for `name`, building it on first request.
    /// `params` only matter for that first build.
    pub fn get_or_create(
        &self,
        name: &str,
        params: &ChannelParams,
    ) -> ChannelResult<Arc<ChannelDefinition>> {
        let mut prototypes = self.lock();
        if let Some(existing) = prototypes.get(name) {
            debug!("{} already exists, ignoring {:?}", self.prototype_path(name), params);
            return Ok(Arc::clone(existing));
        }

        let kind = name.parse::<NaChannelKind>().inspect_err(|_| {
            warn!("No constructor for channel type {}", name);
        })?;
        let channel = Arc::new(ChannelDefinition::create(&kind.spec(params), &self.grid)?);
        prototypes.insert(name.to_owned(), Arc::clone(&channel));
        info!("Created channel prototype: {}", self.prototype_path(name));
        Ok(channel)
    }

    /// Looks up an existing prototype without building anything
    pub fn get(&self, name: &str) -> Option<Arc<ChannelDefinition>> {
        self.lock().get(name).cloned()
    }

    pub fn names(&self) -> BTreeSet<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Builds every Na+ channel type with default parameters
    pub fn init_na_prototypes(&self) -> ChannelResult<BTreeSet<String>> {
        for kind in NaChannelKind::ALL {
            self.get_or_create(kind.name(), &ChannelParams::default())?;
        }
        let names = self.names();
        debug!("Na+ prototypes: {}", names.iter().join(", "));
        Ok(names)
    }
}

impl std::fmt::Debug for ChannelPrototypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelPrototypeRegistry")
            .field("grid", &self.grid)
            .field("library_path", &self.library_path)
            .field("prototypes", &self.names())
            .finish()
    }
}
