use serde::{Deserialize, Serialize};

use crate::api::types::Body;
use crate::modal::validate::SPEED_SCALE;

/// Built-in per-body defaults: (rel_rx, rel_ry, rel_omega, grid_size).
const BUILTIN: [(f64, f64, f64, i32); 9] = [
    (0.15, 0.12, 0.8, 3),
    (0.25, 0.20, 1.0, 4),
    (0.35, 0.28, 1.2, 5),
    (0.45, 0.35, 0.6, 4),
    (0.55, 0.45, 1.5, 6),
    (0.65, 0.55, 0.9, 7),
    (0.75, 0.65, 1.3, 5),
    (0.85, 0.75, 0.7, 8),
    (0.95, 0.85, 1.1, 6),
];

/// Default values for one body. Semi-axes and angular velocity are relative
/// fractions (scaled by the viewport base radius at validation time);
/// `grid_size` is in 4-pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDefaults {
    pub rel_rx: f64,
    pub rel_ry: f64,
    pub rel_omega: f64,
    pub grid_size: i32,
}

/// Source of initial and regenerated field values, built-in or overridden.
/// Indices beyond the table length fall back to deterministic formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsTable {
    entries: Vec<BodyDefaults>,
}

impl DefaultsTable {
    /// The built-in 9-entry table.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|&(rel_rx, rel_ry, rel_omega, grid_size)| BodyDefaults {
                    rel_rx,
                    rel_ry,
                    rel_omega,
                    grid_size,
                })
                .collect(),
        }
    }

    /// Override the table wholesale. An empty override restores the
    /// built-in table.
    pub fn new(entries: Vec<BodyDefaults>) -> Self {
        if entries.is_empty() {
            Self::builtin()
        } else {
            Self { entries }
        }
    }

    /// Rebuild a table from previously confirmed bodies, inverting the
    /// scaling applied at validation time. Reopening the modal then seeds
    /// the grid with the last-used values.
    pub fn from_bodies(bodies: &[Body], base_radius: f64) -> Self {
        Self::new(
            bodies
                .iter()
                .map(|b| BodyDefaults {
                    rel_rx: b.rx / base_radius,
                    rel_ry: b.ry / base_radius,
                    rel_omega: b.omega / SPEED_SCALE,
                    grid_size: b.size / 4,
                })
                .collect(),
        )
    }

    /// Parse an override table from a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<BodyDefaults> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Defaults for body `i`: the table entry when present, otherwise the
    /// fallback formulas.
    pub fn get(&self, i: usize) -> BodyDefaults {
        if let Some(entry) = self.entries.get(i) {
            *entry
        } else {
            BodyDefaults {
                rel_rx: 0.1 + 0.08 * i as f64,
                rel_ry: 0.1 + 0.08 * i as f64,
                rel_omega: 0.8 + 0.05 * i as f64,
                grid_size: 4 + (i % 4) as i32,
            }
        }
    }
}

impl Default for DefaultsTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_nine_entries() {
        let table = DefaultsTable::builtin();
        assert_eq!(table.len(), 9);
        assert_eq!(table.get(0).rel_rx, 0.15);
        assert_eq!(table.get(8).grid_size, 6);
    }

    #[test]
    fn fallback_formula_beyond_table() {
        let table = DefaultsTable::builtin();
        let d = table.get(9);
        assert!((d.rel_rx - (0.1 + 0.08 * 9.0)).abs() < 1e-12);
        assert!((d.rel_omega - (0.8 + 0.05 * 9.0)).abs() < 1e-12);
        assert_eq!(d.grid_size, 4 + 1);
        assert_eq!(table.get(12).grid_size, 4);
    }

    #[test]
    fn empty_override_restores_builtin() {
        let table = DefaultsTable::new(Vec::new());
        assert_eq!(table, DefaultsTable::builtin());
    }

    #[test]
    fn from_bodies_inverts_validation_scaling() {
        let base = 354.0;
        let body = Body {
            rx: 0.25 * base,
            ry: 0.20 * base,
            ang: 0.0,
            omega: 1.0 * SPEED_SCALE,
            size: 16,
            color: 0,
        };
        let table = DefaultsTable::from_bodies(&[body], base);
        let d = table.get(0);
        assert!((d.rel_rx - 0.25).abs() < 1e-12);
        assert!((d.rel_ry - 0.20).abs() < 1e-12);
        assert!((d.rel_omega - 1.0).abs() < 1e-12);
        assert_eq!(d.grid_size, 4);
    }

    #[test]
    fn json_override_parses() {
        let json = r#"[{"rel_rx":0.3,"rel_ry":0.2,"rel_omega":1.1,"grid_size":5}]"#;
        let table = DefaultsTable::from_json(json).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0).grid_size, 5);
        assert!(DefaultsTable::from_json("not json").is_err());
    }
}
