//! Surface categories, their material coefficient tables, and estimates.
//!
//! Each [`Category`] owns one fixed table of per-square-meter coefficients.
//! An estimate multiplies the area by every coefficient, adds the fixed
//! [`OVERAGE_FACTOR`] and rounds to two decimals. Output order is the table's
//! declaration order.

#[cfg(test)]
#[path = "materials_test.rs"]
mod materials_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MeasureError;
use crate::consts::OVERAGE_FACTOR;

/// Which kind of surface is being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    #[serde(alias = "lantai")]
    Floor,
    #[serde(alias = "tembok")]
    Wall,
    #[serde(alias = "plafon")]
    Ceiling,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Floor, Self::Wall, Self::Ceiling];

    /// Stable lowercase key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Wall => "wall",
            Self::Ceiling => "ceiling",
        }
    }

    /// Human-readable label for result headers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Floor => "Floor",
            Self::Wall => "Wall",
            Self::Ceiling => "Ceiling",
        }
    }

    /// The category's coefficient table, in declaration order.
    #[must_use]
    pub fn materials(self) -> &'static [Material] {
        match self {
            Self::Floor => FLOOR_MATERIALS,
            Self::Wall => WALL_MATERIALS,
            Self::Ceiling => CEILING_MATERIALS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = MeasureError;

    /// Case-insensitive. The legacy keys `lantai`, `tembok` and `plafon` are
    /// accepted as aliases.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "floor" | "lantai" => Ok(Self::Floor),
            "wall" | "tembok" => Ok(Self::Wall),
            "ceiling" | "plafon" => Ok(Self::Ceiling),
            _ => Err(MeasureError::UnknownCategory(raw.to_owned())),
        }
    }
}

/// One row of a coefficient table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub key: &'static str,
    pub display_name: &'static str,
    pub coefficient_per_m2: f64,
    pub unit: &'static str,
}

const fn material(key: &'static str, display_name: &'static str, coefficient_per_m2: f64, unit: &'static str) -> Material {
    Material { key, display_name, coefficient_per_m2, unit }
}

const FLOOR_MATERIALS: &[Material] = &[
    material("ceramic_tile", "Ceramic tile 30x30cm", 11.0, "pcs"),
    material("cement", "Cement", 10.0, "kg"),
    material("sand", "Sand", 0.03, "m³"),
    material("tile_adhesive", "Tile adhesive", 5.0, "kg"),
    material("grout", "Tile grout", 0.5, "kg"),
];

const WALL_MATERIALS: &[Material] = &[
    material("aac_block", "AAC block 60x20cm", 8.33, "pcs"),
    material("cement", "Cement", 9.6, "kg"),
    material("sand", "Sand", 0.024, "m³"),
    material("skim_coat", "Skim coat", 3.5, "kg"),
    material("paint", "Paint (2 coats)", 0.15, "liter"),
];

const CEILING_MATERIALS: &[Material] = &[
    material("gypsum_board", "Gypsum board 120x240cm", 1.0, "sheet"),
    material("hollow_frame", "Hollow steel frame", 3.0, "bar"),
    material("gypsum_screw", "Gypsum screw", 20.0, "pcs"),
    material("joint_compound", "Joint compound", 0.8, "kg"),
    material("paint", "Ceiling paint", 0.12, "liter"),
];

/// A quantity on the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialLine {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Quantities for `area_m2` of `category`, overage included.
#[must_use]
pub fn estimate_materials(area_m2: f64, category: Category) -> Vec<MaterialLine> {
    category
        .materials()
        .iter()
        .map(|m| MaterialLine {
            name: m.display_name.to_owned(),
            amount: round2(area_m2 * m.coefficient_per_m2 * OVERAGE_FACTOR),
            unit: m.unit.to_owned(),
        })
        .collect()
}

/// [`estimate_materials`] for a raw category key.
///
/// # Errors
///
/// Returns [`MeasureError::UnknownCategory`] if `category` is not a known key.
pub fn estimate_materials_for(area_m2: f64, category: &str) -> Result<Vec<MaterialLine>, MeasureError> {
    Ok(estimate_materials(area_m2, category.parse()?))
}

/// Final output of a calculation. Recreated on every calculation, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementResult {
    pub area_m2: f64,
    pub perimeter_m: f64,
    pub category: Category,
    pub materials: Vec<MaterialLine>,
}

impl MeasurementResult {
    /// Build the result, estimating materials from `area_m2`.
    #[must_use]
    pub fn new(area_m2: f64, perimeter_m: f64, category: Category) -> Self {
        Self { area_m2, perimeter_m, category, materials: estimate_materials(area_m2, category) }
    }
}
