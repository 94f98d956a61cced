//! Group Registry
//!
//! Name to group mapping owned by whoever sets up the cache subsystem and
//! passed to the code that needs it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::error::Result;
use crate::group::{Group, GroupBuilder};

// == Registry ==
/// Thread-safe registry of groups by name.
///
/// Registration takes the write lock, lookups take the read lock. This lock is
/// independent of each group's cache lock. Groups are never removed.
#[derive(Debug, Default)]
pub struct Registry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // == New Group ==
    /// Builds a group and registers it under its name.
    ///
    /// An existing group with the same name is replaced.
    ///
    /// # Errors
    /// `CacheError::MissingLoader` if the builder has no loader; nothing is
    /// registered in that case.
    pub fn new_group(&self, builder: GroupBuilder) -> Result<Arc<Group>> {
        let group = Arc::new(builder.build()?);
        self.insert(Arc::clone(&group));
        Ok(group)
    }

    // == Insert ==
    /// Registers an already built group, replacing any group of the same name.
    pub fn insert(&self, group: Arc<Group>) {
        let name = group.name().to_string();
        let previous = self.groups.write().insert(name.clone(), group);

        if previous.is_some() {
            warn!("Group '{}' re-registered, previous group replaced", name);
        } else {
            info!("Group '{}' registered", name);
        }
    }

    // == Get Group ==
    /// Looks up a registered group.
    pub fn get_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// Registered group names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}
