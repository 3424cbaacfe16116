//! Application state for the dashboard.
//!
//! One struct owns the registry, the entity selection, the chart bindings and
//! the shared cursor. The TUI mutates it only from its event loop; every
//! frame is derived from it wholesale.

use std::sync::Arc;

use crate::data::{DEFAULT_ENTITY, EntityGroups, Registry};
use crate::domain::Entity;
use crate::sync::{ChartBinding, ChartFrame, Cursor, Viewport};

#[derive(Debug, Clone)]
pub struct AppState {
    registry: Arc<Registry>,
    groups: EntityGroups,
    selected: String,
    viewports: Vec<Viewport>,
    bindings: Vec<ChartBinding>,
    cursor: Cursor,
}

impl AppState {
    pub fn new(registry: Arc<Registry>, selected: Option<&str>) -> Self {
        let groups = EntityGroups::from_entities(registry.entities());
        let selected = initial_selection(&groups, selected);
        let mut state = Self {
            registry,
            groups,
            selected,
            viewports: Vec::new(),
            bindings: Vec::new(),
            cursor: Cursor::Idle,
        };
        state.rebuild();
        state
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Swap in a freshly loaded registry, keeping the selection when possible.
    pub fn replace_registry(&mut self, registry: Arc<Registry>) {
        self.groups = EntityGroups::from_entities(registry.entities());
        self.registry = registry;
        if self.registry.entity(&self.selected).is_none() {
            self.selected = initial_selection(&self.groups, None);
        }
        self.rebuild();
    }

    pub fn groups(&self) -> &EntityGroups {
        &self.groups
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn selected_entity(&self) -> Option<&Entity> {
        self.registry.entity(&self.selected)
    }

    /// Switch entity: re-derives every series from the loaded registry.
    ///
    /// Unknown codes are accepted (all charts show their empty state); the
    /// return value says whether the code was in the entity list.
    pub fn select_entity(&mut self, code: &str) -> bool {
        let known = self.registry.entity(code).is_some();
        if !known {
            tracing::warn!(code, "selected entity is not in the loaded exports");
        }
        tracing::debug!(code, "entity selected");
        self.selected = code.to_string();
        self.rebuild();
        known
    }

    /// Move the selection through the picker order, wrapping around.
    pub fn cycle_entity(&mut self, delta: isize) {
        let ordered: Vec<&Entity> = self.groups.ordered().collect();
        if ordered.is_empty() {
            return;
        }
        let len = ordered.len() as isize;
        let current = ordered
            .iter()
            .position(|e| e.code == self.selected)
            .map(|i| i as isize)
            .unwrap_or(if delta >= 0 { -1 } else { 0 });
        let next = (current + delta).rem_euclid(len) as usize;
        let code = ordered[next].code.clone();
        self.select_entity(&code);
    }

    /// Replace the chart viewports (after a settled resize) and rebuild.
    pub fn set_viewports(&mut self, viewports: Vec<Viewport>) {
        self.viewports = viewports;
        self.rebuild();
    }

    pub fn bindings(&self) -> &[ChartBinding] {
        &self.bindings
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Pointer moved to an absolute terminal cell.
    pub fn pointer_at(&mut self, column: u16, row: u16) -> Cursor {
        let hit = self
            .bindings
            .iter()
            .find_map(|b| b.hit(column, row).map(|offset| (b, offset)));

        self.cursor = match hit {
            Some((binding, offset)) => self.cursor.pointer_move(binding, offset),
            None => self.cursor.pointer_leave(),
        };
        self.cursor
    }

    pub fn pointer_leave(&mut self) {
        self.cursor = self.cursor.pointer_leave();
    }

    pub fn step_cursor(&mut self, delta: i32) {
        self.cursor = self.cursor.step(delta);
    }

    /// Draw descriptions for every chart at the current cursor.
    pub fn frames(&self) -> Vec<ChartFrame> {
        self.bindings.iter().map(|b| b.frame(self.cursor)).collect()
    }

    fn rebuild(&mut self) {
        self.bindings = self
            .registry
            .indicators()
            .iter()
            .enumerate()
            .map(|(i, &descriptor)| {
                ChartBinding::new(
                    descriptor,
                    self.registry.series(descriptor.id, &self.selected),
                    self.viewports.get(i).copied().unwrap_or_default(),
                )
            })
            .collect();
        tracing::debug!(
            entity = %self.selected,
            charts = self.bindings.len(),
            "chart bindings rebuilt"
        );
    }
}

fn initial_selection(groups: &EntityGroups, requested: Option<&str>) -> String {
    if let Some(code) = requested {
        return code.to_string();
    }
    if groups.ordered().any(|e| e.code == DEFAULT_ENTITY) {
        return DEFAULT_ENTITY.to_string();
    }
    groups
        .ordered()
        .next()
        .map(|e| e.code.clone())
        .unwrap_or_else(|| DEFAULT_ENTITY.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::{IndicatorDescriptor, MISSING_GLYPH, RawRow, TabularDataset, find_indicator};

    fn dataset(rows: &[(&str, &str, &[(i32, f64)])]) -> TabularDataset {
        TabularDataset {
            headers: vec!["h".to_string()],
            year_columns: Vec::new(),
            rows: rows
                .iter()
                .map(|(name, code, values)| RawRow {
                    name: name.to_string(),
                    code: code.to_string(),
                    values: values.iter().map(|&(y, v)| (y, Some(v))).collect::<BTreeMap<_, _>>(),
                })
                .collect(),
        }
    }

    fn registry() -> Arc<Registry> {
        let indicators: Vec<&'static IndicatorDescriptor> =
            vec![find_indicator("gdp").unwrap(), find_indicator("inflation").unwrap()];
        let gdp = dataset(&[
            ("World", "WLD", &[(1975, 6.0e12), (2023, 1.05e14)]),
            ("Nigeria", "NGA", &[(1975, 2.8e10), (2023, 3.6e11)]),
            ("Aruba", "ABW", &[(2000, 1.9e9)]),
        ]);
        let inflation = dataset(&[
            ("World", "WLD", &[(1980, 12.5)]),
            ("Nigeria", "NGA", &[(1975, 33.9), (2023, 24.7)]),
        ]);
        Arc::new(Registry::from_datasets(indicators, vec![gdp, inflation]))
    }

    fn viewports() -> Vec<Viewport> {
        vec![
            Viewport { x: 0, y: 0, width: 65, height: 10 },
            Viewport { x: 0, y: 12, width: 65, height: 10 },
        ]
    }

    #[test]
    fn defaults_to_world() {
        let state = AppState::new(registry(), None);
        assert_eq!(state.selected(), "WLD");
        assert_eq!(state.bindings().len(), 2);
        assert_eq!(state.bindings()[0].series.len(), 2);
    }

    #[test]
    fn selection_rederives_series() {
        let mut state = AppState::new(registry(), None);
        assert!(state.select_entity("NGA"));
        let frames = state.frames();
        assert_eq!(frames[0].readout.value, "360.00B");
        assert_eq!(frames[1].readout.value, "24.70%");

        assert!(!state.select_entity("XXX"));
        assert!(state.frames().iter().all(|f| f.readout.caption == "No data"));
    }

    #[test]
    fn pointer_drives_every_chart() {
        let mut state = AppState::new(registry(), None);
        state.set_viewports(viewports());

        // Column 15 of the lower chart → 1975.
        assert_eq!(state.pointer_at(15, 14), Cursor::Hovering(1975));
        let frames = state.frames();
        assert_eq!(frames[0].readout.value, "6.00T");
        assert_eq!(frames[1].readout.value, MISSING_GLYPH);
        assert_eq!(frames[1].readout.caption, "No data for 1975");

        // Gap row between charts counts as leaving.
        assert_eq!(state.pointer_at(15, 11), Cursor::Idle);
        assert_eq!(state.frames()[1].readout.caption, "Year 1980");
    }

    #[test]
    fn cycling_follows_picker_order() {
        let mut state = AppState::new(registry(), None);
        // Picker order: WLD (pinned), then ABW, NGA.
        state.cycle_entity(1);
        assert_eq!(state.selected(), "ABW");
        state.cycle_entity(1);
        assert_eq!(state.selected(), "NGA");
        state.cycle_entity(1);
        assert_eq!(state.selected(), "WLD");
        state.cycle_entity(-1);
        assert_eq!(state.selected(), "NGA");
    }

    #[test]
    fn replacing_registry_keeps_known_selection() {
        let mut state = AppState::new(registry(), Some("NGA"));
        state.set_viewports(viewports());
        state.replace_registry(registry());
        assert_eq!(state.selected(), "NGA");
        assert_eq!(state.bindings()[0].viewport, viewports()[0]);

        let mut state = AppState::new(registry(), Some("ZZZ"));
        state.replace_registry(registry());
        assert_eq!(state.selected(), "WLD");
    }
}
