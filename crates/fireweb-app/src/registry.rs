//! Component registry
//!
//! Built once during bootstrap and owned by the [`App`](crate::App); anything
//! that needs to look a component up borrows it from there.

use crate::error::{AppError, AppResult};
use crate::icons::Icon;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, Icon>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an icon under its own name; a name can only be taken once
    pub fn register(&mut self, icon: Icon) -> AppResult<()> {
        if self.components.contains_key(icon.name()) {
            return Err(AppError::DuplicateComponent {
                name: icon.name().to_string(),
            });
        }
        self.components.insert(icon.name().to_string(), icon);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Icon> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }
}
