//! Fixed-point schematic coordinates and the DXP fraction codec.
//!
//! A [`Coord`] counts internal units of 1/10000 mil. On disk a coordinate is
//! split into a whole number of DXP units (10 mil) plus a fractional
//! remainder in internal units, stored under `KEY` and `KEY_FRAC`. Key
//! absence means zero, and the writer must not emit redundant zero keys or
//! byte-level round-trip comparisons break.

use serde::{Deserialize, Serialize};

use crate::parameters::ParameterCollection;

/// Internal units per mil.
pub const UNITS_PER_MIL: i32 = 10_000;

/// Internal units per on-disk DXP unit (10 mil).
pub const UNITS_PER_DXP: i32 = 100_000;

/// A fixed-point coordinate in internal units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Coord(pub i32);

impl Coord {
    pub fn from_mils(mils: f64) -> Self {
        Coord((mils * UNITS_PER_MIL as f64).round() as i32)
    }

    pub fn to_mils(self) -> f64 {
        self.0 as f64 / UNITS_PER_MIL as f64
    }
}

/// A point in schematic space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoordPoint {
    pub x: Coord,
    pub y: Coord,
}

impl CoordPoint {
    pub fn new(x: Coord, y: Coord) -> Self {
        CoordPoint { x, y }
    }
}

/// An axis-aligned rectangle in schematic space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoordRect {
    pub x: Coord,
    pub y: Coord,
    pub width: Coord,
    pub height: Coord,
}

impl CoordRect {
    pub const EMPTY: CoordRect = CoordRect {
        x: Coord(0),
        y: Coord(0),
        width: Coord(0),
        height: Coord(0),
    };

    pub fn new(x: Coord, y: Coord, width: Coord, height: Coord) -> Self {
        CoordRect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width.0 <= 0 || self.height.0 <= 0
    }
}

/// Reconstruct a coordinate from the on-disk (integer, fraction) pair.
///
/// On-disk values beyond the representable range saturate to the nearest
/// `Coord` bound; a garbage integer part must not fail the record.
pub fn dxp_frac_to_coord(num: i32, frac: i32) -> Coord {
    let units = num as i64 * UNITS_PER_DXP as i64 + frac as i64;
    Coord(units.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
}

/// Split a coordinate into the on-disk (integer, fraction) pair.
///
/// Division truncates toward zero, so for negative coordinates both halves
/// carry the sign and [`dxp_frac_to_coord`] restores the value exactly.
pub fn coord_to_dxp_frac(coord: Coord) -> (i32, i32) {
    (coord.0 / UNITS_PER_DXP, coord.0 % UNITS_PER_DXP)
}

/// Read a DXP-frac coded coordinate from `KEY` / `KEY_FRAC`, both
/// defaulting to zero when absent.
pub fn coord_from_parameters(p: &ParameterCollection, key: &str) -> Coord {
    let num = p.get(key).as_int_or(0);
    let frac = p.get(&format!("{key}_FRAC")).as_int_or(0);
    dxp_frac_to_coord(num, frac)
}

/// Write a DXP-frac coded coordinate under `KEY` / `KEY_FRAC`.
///
/// The `_FRAC` key is omitted when the fraction is zero, and the base key
/// too when both halves are zero; the reader treats absence as zero.
pub fn coord_to_parameters(p: &mut ParameterCollection, key: &str, coord: Coord) {
    let (num, frac) = coord_to_dxp_frac(coord);
    if num != 0 || frac != 0 {
        p.add(key, num);
    }
    if frac != 0 {
        p.add(format!("{key}_FRAC"), frac);
    }
}

/// Read a point from `KEY.X` / `KEY.Y` (plus their `_FRAC` halves).
pub fn point_from_parameters(p: &ParameterCollection, key: &str) -> CoordPoint {
    CoordPoint {
        x: coord_from_parameters(p, &format!("{key}.X")),
        y: coord_from_parameters(p, &format!("{key}.Y")),
    }
}

/// Write a point under `KEY.X` / `KEY.Y`, with the same conditional
/// omission as [`coord_to_parameters`].
pub fn point_to_parameters(p: &mut ParameterCollection, key: &str, point: CoordPoint) {
    coord_to_parameters(p, &format!("{key}.X"), point.x);
    coord_to_parameters(p, &format!("{key}.Y"), point.y);
}
