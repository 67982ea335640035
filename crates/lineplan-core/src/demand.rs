//! Origin-destination passenger demand.

use crate::units::StationName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Passenger demand per planning period, keyed origin → destination.
///
/// Backed by sorted maps so that iteration, and everything derived from it
/// down to the emitted MILP rows, is deterministic for a given scenario.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DemandMatrix {
    pub matrix: BTreeMap<StationName, BTreeMap<StationName, f64>>,
}

impl DemandMatrix {
    pub fn new(matrix: BTreeMap<StationName, BTreeMap<StationName, f64>>) -> Self {
        Self { matrix }
    }

    /// All origin stations, in sorted order.
    pub fn all_origins(&self) -> impl Iterator<Item = &StationName> {
        self.matrix.keys()
    }

    /// Demand from `origin` to `destination`; zero if the relation is absent.
    pub fn between(&self, origin: &StationName, destination: &StationName) -> f64 {
        self.matrix
            .get(origin)
            .and_then(|row| row.get(destination))
            .copied()
            .unwrap_or(0.0)
    }

    /// Total demand leaving `origin`.
    pub fn starting_from(&self, origin: &StationName) -> f64 {
        self.matrix
            .get(origin)
            .map(|row| row.values().sum())
            .unwrap_or(0.0)
    }

    /// Total demand arriving at `destination`.
    pub fn arriving_at(&self, destination: &StationName) -> f64 {
        self.matrix
            .values()
            .filter_map(|row| row.get(destination))
            .sum()
    }

    /// The demand row of one origin.
    pub fn row(&self, origin: &StationName) -> Option<&BTreeMap<StationName, f64>> {
        self.matrix.get(origin)
    }

    /// Total demand over all relations.
    pub fn total(&self) -> f64 {
        self.matrix.values().flat_map(|row| row.values()).sum()
    }

    /// Number of relations with strictly positive demand.
    pub fn positive_relation_count(&self) -> usize {
        self.matrix
            .values()
            .flat_map(|row| row.values())
            .filter(|&&demand| demand > 0.0)
            .count()
    }

    /// A copy with every relation multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            matrix: self
                .matrix
                .iter()
                .map(|(origin, row)| {
                    (
                        origin.clone(),
                        row.iter()
                            .map(|(destination, demand)| (destination.clone(), demand * factor))
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    /// Build a matrix from `(origin, destination, demand)` triples.
    pub fn from_relations<'a>(
        relations: impl IntoIterator<Item = (&'a str, &'a str, f64)>,
    ) -> Self {
        let mut matrix: BTreeMap<StationName, BTreeMap<StationName, f64>> = BTreeMap::new();
        for (origin, destination, demand) in relations {
            matrix
                .entry(StationName::from(origin))
                .or_default()
                .insert(StationName::from(destination), demand);
        }
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DemandMatrix {
        DemandMatrix::from_relations([
            ("A", "B", 100.0),
            ("A", "C", 50.0),
            ("D", "A", 100.0),
            ("D", "B", 0.0),
        ])
    }

    #[test]
    fn queries_aggregate_rows_and_columns() {
        let demand = sample();
        assert_eq!(demand.between(&"A".into(), &"C".into()), 50.0);
        assert_eq!(demand.between(&"C".into(), &"A".into()), 0.0);
        assert_eq!(demand.starting_from(&"A".into()), 150.0);
        assert_eq!(demand.arriving_at(&"B".into()), 100.0);
        assert_eq!(demand.total(), 250.0);
        assert_eq!(demand.positive_relation_count(), 3);
    }

    #[test]
    fn origins_iterate_in_sorted_order() {
        let demand = sample();
        let origins: Vec<_> = demand.all_origins().map(StationName::as_str).collect();
        assert_eq!(origins, vec!["A", "D"]);
    }

    #[test]
    fn scaling_multiplies_every_relation() {
        let demand = sample().scaled(2.0);
        assert_eq!(demand.between(&"A".into(), &"B".into()), 200.0);
        assert_eq!(demand.total(), 500.0);
    }
}
