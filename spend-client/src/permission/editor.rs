use super::PermissionGrid;
use shared::types::{ActionType, ModuleName, PermissionId};
use std::collections::BTreeMap;

/// Module → action → checked
pub type CheckboxState = BTreeMap<ModuleName, BTreeMap<ActionType, bool>>;

/// Tri-state of a select-all or module-row checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    Unchecked,
    Partial,
    Checked,
}

impl SelectAllState {
    fn from_counts(checked: usize, total: usize) -> Self {
        match checked {
            0 => Self::Unchecked,
            n if n == total => Self::Checked,
            _ => Self::Partial,
        }
    }
}

/// Checkbox state of one role's permission matrix
///
/// Rebuilt from scratch each time the editor opens. Every cell of the grid
/// has an entry, so the checkbox keys always match the grid.
#[derive(Debug, Clone)]
pub struct PermissionEditor {
    grid: PermissionGrid,
    checked: CheckboxState,
    all_checked: bool,
}

impl PermissionEditor {
    /// Seed from the full grid and a role's grants
    ///
    /// Grants for cells the grid does not have are ignored.
    pub fn open(all: PermissionGrid, granted: &PermissionGrid) -> Self {
        let mut checked = CheckboxState::new();
        for (module, action, _) in all.cells() {
            checked
                .entry(module.to_string())
                .or_default()
                .insert(action.to_string(), granted.contains(module, action));
        }
        let mut editor = Self {
            grid: all,
            checked,
            all_checked: false,
        };
        editor.refresh_all_checked();
        editor
    }

    pub fn grid(&self) -> &PermissionGrid {
        &self.grid
    }

    pub fn state(&self) -> &CheckboxState {
        &self.checked
    }

    pub fn is_checked(&self, module: &str, action: &str) -> bool {
        self.checked
            .get(module)
            .and_then(|row| row.get(action))
            .copied()
            .unwrap_or(false)
    }

    /// Set one cell; cells outside the grid are ignored
    pub fn toggle(&mut self, module: &str, action: &str, checked: bool) {
        let Some(cell) = self.checked.get_mut(module).and_then(|row| row.get_mut(action)) else {
            tracing::debug!(module, action, "Ignoring toggle for unknown permission");
            return;
        };
        *cell = checked;
        self.refresh_all_checked();
    }

    /// Set every cell
    pub fn toggle_all(&mut self, checked: bool) {
        for cell in self.checked.values_mut().flat_map(|row| row.values_mut()) {
            *cell = checked;
        }
        self.refresh_all_checked();
    }

    /// Set every cell of one module row
    pub fn toggle_module(&mut self, module: &str, checked: bool) {
        let Some(row) = self.checked.get_mut(module) else {
            return;
        };
        for cell in row.values_mut() {
            *cell = checked;
        }
        self.refresh_all_checked();
    }

    /// True only when the grid has cells and all of them are checked
    pub fn is_all_checked(&self) -> bool {
        self.all_checked
    }

    pub fn select_all_state(&self) -> SelectAllState {
        let total = self.grid.len();
        let checked = self.checked_count();
        if total == 0 {
            return SelectAllState::Unchecked;
        }
        SelectAllState::from_counts(checked, total)
    }

    pub fn module_state(&self, module: &str) -> SelectAllState {
        let Some(row) = self.checked.get(module) else {
            return SelectAllState::Unchecked;
        };
        if row.is_empty() {
            return SelectAllState::Unchecked;
        }
        let checked = row.values().filter(|c| **c).count();
        SelectAllState::from_counts(checked, row.len())
    }

    /// Permission ids of every checked cell, ascending
    pub fn submission_set(&self) -> Vec<PermissionId> {
        let mut ids: Vec<PermissionId> = self
            .grid
            .cells()
            .filter(|(module, action, _)| self.is_checked(module, action))
            .map(|(_, _, id)| id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn checked_count(&self) -> usize {
        self.checked
            .values()
            .flat_map(|row| row.values())
            .filter(|c| **c)
            .count()
    }

    fn refresh_all_checked(&mut self) {
        let mut cells = self.checked.values().flat_map(|row| row.values()).peekable();
        self.all_checked = cells.peek().is_some() && cells.all(|c| *c);
    }
}
