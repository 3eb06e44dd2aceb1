use std::fmt;

use thiserror::Error;

use crate::api::types::{Body, PALETTE};
use crate::modal::grid::Grid;

/// Global scale applied to the entered angular velocity.
pub const SPEED_SCALE: f64 = 0.5;

/// Accepted interval for relative semi-axes.
pub const AXIS_RANGE: (f64, f64) = (0.01, 1.5);
/// Accepted interval for angular velocity, before scaling.
pub const OMEGA_RANGE: (f64, f64) = (-10.0, 10.0);
/// Accepted interval for body size in pixels.
pub const SIZE_RANGE: (i64, i64) = (2, 200);

/// The four per-body fields, in storage-slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SemiAxisY,
    SemiAxisX,
    AngularVelocity,
    Size,
}

impl Field {
    /// Storage slot within a body's 4 cells.
    pub fn slot(self) -> usize {
        match self {
            Field::SemiAxisY => 0,
            Field::SemiAxisX => 1,
            Field::AngularVelocity => 2,
            Field::Size => 3,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::SemiAxisY => "Ry",
            Field::SemiAxisX => "Rx",
            Field::AngularVelocity => "Omega",
            Field::Size => "Size",
        };
        f.write_str(label)
    }
}

/// Validation failure for one cell. The message names the field and the
/// 1-based body index, and is shown verbatim next to the OK button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamError {
    /// The cell text has no leading numeric token.
    #[error("{field} invalid at {}", .index + 1)]
    Parse { field: Field, index: usize },
    /// The value parses but lies outside the allowed interval.
    #[error("{field} out of range at {}", .index + 1)]
    Range { field: Field, index: usize },
}

impl ParamError {
    pub fn field(&self) -> Field {
        match self {
            ParamError::Parse { field, .. } | ParamError::Range { field, .. } => *field,
        }
    }

    /// Zero-based index of the offending body.
    pub fn body(&self) -> usize {
        match self {
            ParamError::Parse { index, .. } | ParamError::Range { index, .. } => *index,
        }
    }
}

/// Longest leading prefix of `s` that parses as a float, C `strtod` style:
/// "1.2.3" yields 1.2, "abc" yields None.
fn float_prefix(s: &str) -> Option<f64> {
    let mut best = None;
    for end in 1..=s.len() {
        if !s.is_char_boundary(end) {
            continue;
        }
        if let Ok(v) = s[..end].parse::<f64>() {
            best = Some(v);
        }
    }
    best
}

/// Longest leading prefix of `s` that parses as an integer, `strtol` style.
fn int_prefix(s: &str) -> Option<i64> {
    let mut best = None;
    for end in 1..=s.len() {
        if !s.is_char_boundary(end) {
            continue;
        }
        if let Ok(v) = s[..end].parse::<i64>() {
            best = Some(v);
        }
    }
    best
}

fn in_range(v: f64, (lo, hi): (f64, f64)) -> bool {
    v >= lo && v <= hi
}

/// Parse and range-check the whole grid, producing one body per active row.
///
/// Fail-fast: the first offending cell aborts validation, lowest body index
/// wins; within a body all four parses run before the four range checks,
/// each in slot order. On success the bodies start evenly spaced over the
/// full circle and cycle through the palette.
pub fn grid_to_bodies(grid: &Grid, base_radius: f64) -> Result<Vec<Body>, ParamError> {
    let n = grid.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let ry = float_prefix(&grid.cell(i, 0).text).ok_or(ParamError::Parse {
            field: Field::SemiAxisY,
            index: i,
        })?;
        let rx = float_prefix(&grid.cell(i, 1).text).ok_or(ParamError::Parse {
            field: Field::SemiAxisX,
            index: i,
        })?;
        let omega = float_prefix(&grid.cell(i, 2).text).ok_or(ParamError::Parse {
            field: Field::AngularVelocity,
            index: i,
        })?;
        let size = int_prefix(&grid.cell(i, 3).text).ok_or(ParamError::Parse {
            field: Field::Size,
            index: i,
        })?;

        if !in_range(ry, AXIS_RANGE) {
            return Err(ParamError::Range {
                field: Field::SemiAxisY,
                index: i,
            });
        }
        if !in_range(rx, AXIS_RANGE) {
            return Err(ParamError::Range {
                field: Field::SemiAxisX,
                index: i,
            });
        }
        if !in_range(omega, OMEGA_RANGE) {
            return Err(ParamError::Range {
                field: Field::AngularVelocity,
                index: i,
            });
        }
        if size < SIZE_RANGE.0 || size > SIZE_RANGE.1 {
            return Err(ParamError::Range {
                field: Field::Size,
                index: i,
            });
        }

        out.push(Body {
            rx: rx * base_radius,
            ry: ry * base_radius,
            omega: omega * SPEED_SCALE,
            ang: i as f64 * (std::f64::consts::TAU / n as f64),
            size: size as i32,
            color: i % PALETTE.len(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::defaults::DefaultsTable;

    const BASE: f64 = 354.0;

    fn grid_of(n: usize) -> Grid {
        let mut g = Grid::new();
        g.fill_all(n, &DefaultsTable::builtin());
        g
    }

    fn set(g: &mut Grid, body: usize, slot: usize, text: &str) {
        g.cell_at_mut(body * 4 + slot).text = text.to_string();
    }

    #[test]
    fn output_count_and_order_match_grid() {
        let g = grid_of(5);
        let bodies = grid_to_bodies(&g, BASE).unwrap();
        assert_eq!(bodies.len(), 5);
        for (i, b) in bodies.iter().enumerate() {
            assert_eq!(b.color, i % PALETTE.len());
        }
    }

    #[test]
    fn angles_start_evenly_spaced() {
        let g = grid_of(3);
        let bodies = grid_to_bodies(&g, BASE).unwrap();
        let expected = [0.0, std::f64::consts::TAU / 3.0, 2.0 * std::f64::consts::TAU / 3.0];
        for (b, want) in bodies.iter().zip(expected) {
            assert!((b.ang - want).abs() < 1e-12);
            assert!(b.ang >= 0.0 && b.ang < std::f64::consts::TAU);
        }
        assert!(bodies.windows(2).all(|w| w[0].ang < w[1].ang));
    }

    #[test]
    fn pixel_values_round_trip_to_rel() {
        let mut g = grid_of(1);
        set(&mut g, 0, 0, "0.37");
        set(&mut g, 0, 1, "1.25");
        let b = grid_to_bodies(&g, BASE).unwrap()[0];
        assert!((b.ry / BASE - 0.37).abs() < 1e-12);
        assert!((b.rx / BASE - 1.25).abs() < 1e-12);
    }

    #[test]
    fn omega_is_scaled() {
        let mut g = grid_of(1);
        set(&mut g, 0, 2, "2.0");
        let b = grid_to_bodies(&g, BASE).unwrap()[0];
        assert!((b.omega - 1.0).abs() < 1e-12);
    }

    #[test]
    fn axis_bounds_are_inclusive() {
        for text in ["0.01", "1.5"] {
            let mut g = grid_of(1);
            set(&mut g, 0, 0, text);
            set(&mut g, 0, 1, text);
            assert!(grid_to_bodies(&g, BASE).is_ok(), "{text} should pass");
        }
        for text in ["0.009999", "1.50001"] {
            let mut g = grid_of(1);
            set(&mut g, 0, 1, text);
            assert_eq!(
                grid_to_bodies(&g, BASE),
                Err(ParamError::Range {
                    field: Field::SemiAxisX,
                    index: 0
                }),
                "{text} should fail"
            );
        }
    }

    #[test]
    fn size_bounds_are_inclusive() {
        for text in ["2", "200"] {
            let mut g = grid_of(1);
            set(&mut g, 0, 3, text);
            assert!(grid_to_bodies(&g, BASE).is_ok());
        }
        for text in ["1", "201"] {
            let mut g = grid_of(1);
            set(&mut g, 0, 3, text);
            assert_eq!(
                grid_to_bodies(&g, BASE),
                Err(ParamError::Range {
                    field: Field::Size,
                    index: 0
                })
            );
        }
    }

    #[test]
    fn unparseable_text_reports_parse_error() {
        let mut g = grid_of(2);
        set(&mut g, 1, 0, "abc");
        let err = grid_to_bodies(&g, BASE).unwrap_err();
        assert_eq!(
            err,
            ParamError::Parse {
                field: Field::SemiAxisY,
                index: 1
            }
        );
        assert_eq!(err.to_string(), "Ry invalid at 2");
    }

    #[test]
    fn lowest_body_index_wins() {
        let mut g = grid_of(3);
        set(&mut g, 2, 0, "abc");
        set(&mut g, 1, 3, "999");
        let err = grid_to_bodies(&g, BASE).unwrap_err();
        assert_eq!(err.body(), 1);
        assert_eq!(err.to_string(), "Size out of range at 2");
    }

    #[test]
    fn parse_errors_precede_range_errors_within_a_body() {
        let mut g = grid_of(1);
        set(&mut g, 0, 0, "9.9"); // range violation on Ry
        set(&mut g, 0, 3, "-"); // parse failure on Size
        let err = grid_to_bodies(&g, BASE).unwrap_err();
        assert_eq!(
            err,
            ParamError::Parse {
                field: Field::Size,
                index: 0
            }
        );
    }

    #[test]
    fn prefix_parsing_matches_strtod() {
        assert_eq!(float_prefix("1.2.3"), Some(1.2));
        assert_eq!(float_prefix("-0.5"), Some(-0.5));
        assert_eq!(float_prefix("1."), Some(1.0));
        assert_eq!(float_prefix("-"), None);
        assert_eq!(float_prefix(""), None);
        assert_eq!(int_prefix("12-3"), Some(12));
        assert_eq!(int_prefix("-7"), Some(-7));
        assert_eq!(int_prefix("x1"), None);
    }
}
