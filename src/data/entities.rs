//! Selectable entities (countries and aggregates).

use std::collections::HashSet;

use crate::domain::{Entity, TabularDataset};

/// Entity selected when the dashboard starts.
pub const DEFAULT_ENTITY: &str = "WLD";

/// Codes pinned to the top of the picker, in display order.
pub const MAJOR_CODES: [&str; 10] = [
    "WLD", "USA", "CHN", "JPN", "DEU", "GBR", "IND", "FRA", "BRA", "CAN",
];

/// Distinct `(code, name)` pairs sorted by name (first occurrence of a code wins).
pub fn entities_from(dataset: &TabularDataset) -> Vec<Entity> {
    let mut seen = HashSet::new();
    let mut out: Vec<Entity> = dataset
        .rows
        .iter()
        .filter(|row| seen.insert(row.code.as_str()))
        .map(|row| Entity {
            code: row.code.clone(),
            name: row.name.clone(),
        })
        .collect();

    out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
    out
}

/// Entities split into the pinned group and the alphabetical remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityGroups {
    pub major: Vec<Entity>,
    pub others: Vec<Entity>,
}

impl EntityGroups {
    pub const MAJOR_LABEL: &'static str = "Major Economies";
    pub const OTHERS_LABEL: &'static str = "All Countries";

    pub fn from_entities(entities: &[Entity]) -> Self {
        let mut major: Vec<Entity> = entities
            .iter()
            .filter(|e| is_major(&e.code))
            .cloned()
            .collect();
        major.sort_by_key(|e| MAJOR_CODES.iter().position(|c| *c == e.code));

        let others = entities
            .iter()
            .filter(|e| !is_major(&e.code))
            .cloned()
            .collect();

        Self { major, others }
    }

    /// Picker order: pinned group first, then the remainder.
    pub fn ordered(&self) -> impl Iterator<Item = &Entity> {
        self.major.iter().chain(self.others.iter())
    }

    pub fn len(&self) -> usize {
        self.major.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_major(code: &str) -> bool {
    MAJOR_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::RawRow;

    fn row(name: &str, code: &str) -> RawRow {
        RawRow {
            name: name.to_string(),
            code: code.to_string(),
            values: BTreeMap::new(),
        }
    }

    #[test]
    fn sorted_by_name_and_deduplicated_by_code() {
        let ds = TabularDataset {
            headers: vec!["h".to_string()],
            year_columns: Vec::new(),
            rows: vec![
                row("Nigeria", "NGA"),
                row("World", "WLD"),
                row("Aruba", "ABW"),
                row("Nigeria (dup)", "NGA"),
            ],
        };
        let codes: Vec<String> = entities_from(&ds).into_iter().map(|e| e.code).collect();
        assert_eq!(codes, vec!["ABW", "NGA", "WLD"]);
    }

    #[test]
    fn major_group_follows_pinned_order() {
        let entities: Vec<Entity> = [
            ("Aruba", "ABW"),
            ("China", "CHN"),
            ("Nigeria", "NGA"),
            ("United States", "USA"),
            ("World", "WLD"),
        ]
        .iter()
        .map(|(name, code)| Entity {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect();

        let groups = EntityGroups::from_entities(&entities);
        let major: Vec<&str> = groups.major.iter().map(|e| e.code.as_str()).collect();
        let others: Vec<&str> = groups.others.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(major, vec!["WLD", "USA", "CHN"]);
        assert_eq!(others, vec!["ABW", "NGA"]);

        let ordered: Vec<&str> = groups.ordered().map(|e| e.code.as_str()).collect();
        assert_eq!(ordered, vec!["WLD", "USA", "CHN", "ABW", "NGA"]);
        assert_eq!(groups.len(), 5);
    }
}
