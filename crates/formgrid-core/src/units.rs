//! Physical units, constant sizes, and pixel conversion.

use std::fmt;

use crate::errors::SpecError;
use crate::types::round_half_up;

/// Desktop publishing resolution, points per inch.
const DTP_RESOLUTION: i32 = 72;

/// Units a constant size can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// Screen pixels
    Pixel,
    /// Points (1/72 inch)
    Point,
    /// Horizontal dialog units (1/4 of the average character width)
    DialogUnitsX,
    /// Vertical dialog units (1/8 of the dialog font height)
    DialogUnitsY,
    /// Millimeters
    Millimeter,
    /// Centimeters
    Centimeter,
    /// Inches
    Inch,
}

impl Unit {
    /// Human readable unit name.
    pub fn name(&self) -> &'static str {
        match self {
            Unit::Pixel => "Pixel",
            Unit::Point => "Point",
            Unit::DialogUnitsX => "Dialog units X",
            Unit::DialogUnitsY => "Dialog units Y",
            Unit::Millimeter => "Millimeter",
            Unit::Centimeter => "Centimeter",
            Unit::Inch => "Inch",
        }
    }

    /// Short form, distinguishing the two dialog unit axes.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Point => "pt",
            Unit::DialogUnitsX => "dluX",
            Unit::DialogUnitsY => "dluY",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Inch => "in",
        }
    }

    /// Suffix used in encoded specs. Both dialog unit axes encode as `dlu`;
    /// the column or row axis picks the concrete unit when decoding.
    pub fn encoded(&self) -> &'static str {
        match self {
            Unit::DialogUnitsX | Unit::DialogUnitsY => "dlu",
            other => other.abbreviation(),
        }
    }

    /// Whether values in this unit must be whole numbers.
    pub fn requires_integers(&self) -> bool {
        matches!(
            self,
            Unit::Pixel | Unit::Point | Unit::DialogUnitsX | Unit::DialogUnitsY
        )
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed size: a value with a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantSize {
    value: f64,
    unit: Unit,
}

impl ConstantSize {
    pub const ZERO: ConstantSize = ConstantSize::new(0.0, Unit::Pixel);

    /// Create a constant size without checking integer-only units.
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Create a constant size, rejecting fractional values for
    /// integer-only units.
    pub fn checked(value: f64, unit: Unit) -> Result<Self, SpecError> {
        if unit.requires_integers() && value.fract() != 0.0 {
            return Err(SpecError::NonIntegerValue {
                unit: unit.name().to_string(),
                value,
            });
        }
        Ok(Self { value, unit })
    }

    pub fn pixel(value: i32) -> Self {
        Self::new(value as f64, Unit::Pixel)
    }

    pub fn dlu_x(value: i32) -> Self {
        Self::new(value as f64, Unit::DialogUnitsX)
    }

    pub fn dlu_y(value: i32) -> Self {
        Self::new(value as f64, Unit::DialogUnitsY)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Resolve to pixels through the given converter.
    pub fn pixel_size(&self, converter: &dyn UnitConverter) -> i32 {
        converter.to_pixels(self.value, self.unit)
    }
}

impl fmt::Display for ConstantSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.fract() == 0.0 {
            write!(f, "{}{}", self.value as i64, self.unit.encoded())
        } else {
            write!(f, "{}{}", self.value, self.unit.encoded())
        }
    }
}

/// Converts physical and font-relative units to pixels.
///
/// Implementations must answer consistently for the duration of a layout
/// pass. A zero value always converts to zero pixels; `to_pixels` takes care
/// of that before calling the per-unit methods.
pub trait UnitConverter {
    fn inch_as_pixel(&self, inches: f64) -> i32;

    fn millimeter_as_pixel(&self, millimeters: f64) -> i32;

    fn centimeter_as_pixel(&self, centimeters: f64) -> i32;

    fn point_as_pixel(&self, points: i32) -> i32;

    fn dialog_unit_x_as_pixel(&self, dlu: i32) -> i32;

    fn dialog_unit_y_as_pixel(&self, dlu: i32) -> i32;

    /// Convert a value in the given unit to pixels.
    fn to_pixels(&self, value: f64, unit: Unit) -> i32 {
        if value == 0.0 {
            return 0;
        }
        match unit {
            Unit::Pixel => round_half_up(value),
            Unit::Point => self.point_as_pixel(round_half_up(value)),
            Unit::DialogUnitsX => self.dialog_unit_x_as_pixel(round_half_up(value)),
            Unit::DialogUnitsY => self.dialog_unit_y_as_pixel(round_half_up(value)),
            Unit::Millimeter => self.millimeter_as_pixel(value),
            Unit::Centimeter => self.centimeter_as_pixel(value),
            Unit::Inch => self.inch_as_pixel(value),
        }
    }
}

/// Dialog base units: average character width and dialog font height.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogBaseUnits {
    pub x: f64,
    pub y: f64,
}

impl DialogBaseUnits {
    /// Derive base units from font metrics.
    ///
    /// Small fonts get their ascent pulled towards 15 pixels.
    pub fn from_font_metrics(average_char_width: f64, ascent: i32) -> Self {
        let height = if ascent > 14 {
            ascent
        } else {
            ascent + (15 - ascent) / 3
        };
        Self {
            x: average_char_width,
            y: height as f64,
        }
    }
}

impl Default for DialogBaseUnits {
    fn default() -> Self {
        Self { x: 6.0, y: 13.0 }
    }
}

/// Unit converter with a fixed screen resolution and fixed dialog base
/// units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultUnitConverter {
    /// Screen resolution in dots per inch
    pub dpi: i32,
    /// Base units for dialog unit conversion
    pub dialog_base_units: DialogBaseUnits,
}

impl Default for DefaultUnitConverter {
    fn default() -> Self {
        Self {
            dpi: 96,
            dialog_base_units: DialogBaseUnits::default(),
        }
    }
}

impl DefaultUnitConverter {
    pub fn new(dpi: i32, dialog_base_units: DialogBaseUnits) -> Self {
        Self { dpi, dialog_base_units }
    }

    pub fn with_dpi(mut self, dpi: i32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_dialog_base_units(mut self, units: DialogBaseUnits) -> Self {
        self.dialog_base_units = units;
        self
    }
}

impl UnitConverter for DefaultUnitConverter {
    fn inch_as_pixel(&self, inches: f64) -> i32 {
        round_half_up(self.dpi as f64 * inches)
    }

    fn millimeter_as_pixel(&self, millimeters: f64) -> i32 {
        round_half_up(self.dpi as f64 * millimeters * 10.0 / 254.0)
    }

    fn centimeter_as_pixel(&self, centimeters: f64) -> i32 {
        round_half_up(self.dpi as f64 * centimeters * 100.0 / 254.0)
    }

    fn point_as_pixel(&self, points: i32) -> i32 {
        self.dpi * points / DTP_RESOLUTION
    }

    fn dialog_unit_x_as_pixel(&self, dlu: i32) -> i32 {
        round_half_up(dlu as f64 * self.dialog_base_units.x / 4.0)
    }

    fn dialog_unit_y_as_pixel(&self, dlu: i32) -> i32 {
        round_half_up(dlu as f64 * self.dialog_base_units.y / 8.0)
    }
}
