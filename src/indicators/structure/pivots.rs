//! Local extremum ("fractal") extraction from a price series.

use crate::models::{PivotKind, PivotPoint};

/// Find local extrema over a symmetric `half_window` neighborhood.
///
/// Index `i` (with `half_window <= i < len - half_window`) is a
/// pivot-high when its value beats every neighbor on both sides:
/// strictly with `strict`, allowing ties otherwise. Pivot-lows mirror.
/// Output is in chronological order; callers needing another order
/// sort explicitly.
pub fn find_pivots(
    values: &[f64],
    half_window: usize,
    kind: PivotKind,
    strict: bool,
) -> Vec<PivotPoint> {
    let mut pivots = Vec::new();
    if half_window == 0 || values.len() < 2 * half_window + 1 {
        return pivots;
    }

    for i in half_window..values.len() - half_window {
        let center = values[i];
        let beats = |neighbor: f64| match (kind, strict) {
            (PivotKind::High, true) => center > neighbor,
            (PivotKind::High, false) => center >= neighbor,
            (PivotKind::Low, true) => center < neighbor,
            (PivotKind::Low, false) => center <= neighbor,
        };

        let is_pivot = (1..=half_window)
            .all(|offset| beats(values[i - offset]) && beats(values[i + offset]));

        if is_pivot {
            pivots.push(PivotPoint {
                index: i,
                price: center,
                kind,
            });
        }
    }

    pivots
}
