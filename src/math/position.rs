//! Identity-by-value for vertex positions.
//!
//! Several modifiers treat two vertices with the same coordinates as the same
//! point. Bit-exact float comparison is fragile, so positions are hashed
//! through a [`PositionKey`] built under an explicit [`Precision`] policy.

use std::collections::HashMap;

use super::Point3;

/// Rounding policy applied before two positions are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Coordinates must match bit for bit (`-0.0` and `0.0` are equal).
    #[default]
    Exact,
    /// Coordinates are rounded to the given number of decimal places.
    Decimals(u32),
}

/// Hashable key derived from a position under a [`Precision`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey([i64; 3]);

impl PositionKey {
    /// Builds the key for `point`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new(point: &Point3, precision: Precision) -> Self {
        let quantize = |v: f64| -> i64 {
            match precision {
                Precision::Exact => {
                    // Fold negative zero so that both zeros hash alike.
                    let v = if v == 0.0 { 0.0 } else { v };
                    v.to_bits() as i64
                }
                Precision::Decimals(decimals) => {
                    let scale = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
                    let rounded = (v * scale).round();
                    if rounded == 0.0 {
                        0
                    } else {
                        rounded as i64
                    }
                }
            }
        };
        Self([quantize(point.x), quantize(point.y), quantize(point.z)])
    }
}

/// Position-keyed lookup from a point to the index of the vertex holding it.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    precision: Precision,
    indices: HashMap<PositionKey, usize>,
}

impl PositionIndex {
    /// Creates an empty index using the given precision.
    #[must_use]
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            indices: HashMap::new(),
        }
    }

    /// Returns the index registered for `point`, calling `create` to allocate
    /// a new one when the position is unknown.
    pub fn get_or_insert_with<F>(&mut self, point: &Point3, create: F) -> usize
    where
        F: FnOnce(Point3) -> usize,
    {
        *self
            .indices
            .entry(PositionKey::new(point, self.precision))
            .or_insert_with(|| create(*point))
    }
}
