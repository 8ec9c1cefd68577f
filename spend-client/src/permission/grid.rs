use shared::models::{GrantedPermission, Module};
use shared::types::{ActionType, ModuleName, PermissionId};
use std::collections::BTreeMap;

/// Module → action → permission id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionGrid {
    cells: BTreeMap<ModuleName, BTreeMap<ActionType, PermissionId>>,
}

impl PermissionGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full catalogue from the module list
    pub fn from_modules(modules: &[Module]) -> Self {
        let mut grid = Self::new();
        for module in modules {
            let row = grid.cells.entry(module.slug.clone()).or_default();
            for permission in &module.permissions {
                row.insert(permission.action.clone(), permission.id);
            }
        }
        grid
    }

    /// Build a role's grants from its flat permission rows
    pub fn from_grants(grants: &[GrantedPermission]) -> Self {
        let mut grid = Self::new();
        for grant in grants {
            grid.insert(&grant.module, &grant.action, grant.id);
        }
        grid
    }

    pub fn insert(&mut self, module: &str, action: &str, id: PermissionId) {
        self.cells
            .entry(module.to_string())
            .or_default()
            .insert(action.to_string(), id);
    }

    pub fn get(&self, module: &str, action: &str) -> Option<PermissionId> {
        self.cells.get(module)?.get(action).copied()
    }

    pub fn contains(&self, module: &str, action: &str) -> bool {
        self.get(module, action).is_some()
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Actions of `module` in name order
    pub fn actions(&self, module: &str) -> Vec<(&str, PermissionId)> {
        self.cells
            .get(module)
            .map(|row| row.iter().map(|(a, id)| (a.as_str(), *id)).collect())
            .unwrap_or_default()
    }

    /// Every `(module, action, id)` in module then action order
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, PermissionId)> {
        self.cells.iter().flat_map(|(module, row)| {
            row.iter()
                .map(move |(action, id)| (module.as_str(), action.as_str(), *id))
        })
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ModuleAction;

    #[test]
    fn test_from_modules() {
        let modules = vec![Module {
            id: 1,
            name: "Billing".to_string(),
            slug: "billing".to_string(),
            permissions: vec![
                ModuleAction {
                    id: 1,
                    action: "view".to_string(),
                },
                ModuleAction {
                    id: 2,
                    action: "edit".to_string(),
                },
            ],
        }];
        let grid = PermissionGrid::from_modules(&modules);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.get("billing", "edit"), Some(2));
        assert_eq!(grid.get("billing", "delete"), None);
        assert_eq!(grid.actions("billing"), vec![("edit", 2), ("view", 1)]);
    }

    #[test]
    fn test_module_without_actions_has_no_cells() {
        let modules = vec![Module {
            id: 9,
            name: "Reports".to_string(),
            slug: "reports".to_string(),
            permissions: vec![],
        }];
        let grid = PermissionGrid::from_modules(&modules);
        assert!(grid.is_empty());
        assert_eq!(grid.modules().count(), 1);
    }
}
