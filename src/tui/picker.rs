//! Entity picker popup state.
//!
//! The popup lists the pinned "Major Economies" first and then every other
//! entity alphabetically. Typing filters both groups by name or code.

use crate::data::EntityGroups;
use crate::domain::Entity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerRow<'a> {
    Header(&'static str),
    Entity { entity: &'a Entity, selected: bool },
}

#[derive(Debug, Clone, Default)]
pub struct EntityPicker {
    query: String,
    /// Index into the filtered matches.
    selected: usize,
}

impl EntityPicker {
    /// Open with the current selection highlighted.
    pub fn open(groups: &EntityGroups, current: &str) -> Self {
        let selected = groups.ordered().position(|e| e.code == current).unwrap_or(0);
        Self {
            query: String::new(),
            selected,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn push(&mut self, ch: char) {
        self.query.push(ch);
        self.selected = 0;
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    pub fn move_by(&mut self, delta: isize, groups: &EntityGroups) {
        let n = self.matches(groups).len();
        if n == 0 {
            self.selected = 0;
            return;
        }
        let next = (self.selected as isize + delta).clamp(0, n as isize - 1);
        self.selected = next as usize;
    }

    /// Filtered entities in picker order.
    pub fn matches<'a>(&self, groups: &'a EntityGroups) -> Vec<&'a Entity> {
        groups.ordered().filter(|e| self.is_match(e)).collect()
    }

    pub fn chosen<'a>(&self, groups: &'a EntityGroups) -> Option<&'a Entity> {
        self.matches(groups).get(self.selected).copied()
    }

    /// Rows to render, with group headers for non-empty groups.
    pub fn rows<'a>(&self, groups: &'a EntityGroups) -> Vec<PickerRow<'a>> {
        let mut rows = Vec::new();
        let mut index = 0usize;

        for (label, members) in [
            (EntityGroups::MAJOR_LABEL, &groups.major),
            (EntityGroups::OTHERS_LABEL, &groups.others),
        ] {
            let hits: Vec<&Entity> = members.iter().filter(|e| self.is_match(e)).collect();
            if hits.is_empty() {
                continue;
            }
            rows.push(PickerRow::Header(label));
            for entity in hits {
                rows.push(PickerRow::Entity {
                    entity,
                    selected: index == self.selected,
                });
                index += 1;
            }
        }

        rows
    }

    fn is_match(&self, entity: &Entity) -> bool {
        let q = self.query.trim().to_lowercase();
        q.is_empty()
            || entity.name.to_lowercase().contains(&q)
            || entity.code.to_lowercase().contains(&q)
    }
}
