//! Column and row specifications.
//!
//! A [`FormSpec`] describes one column or row: the alignment items get when
//! they don't ask for one, the [`Size`] policy, and a resize weight that
//! controls how extra space is shared. [`ColumnSpec`] and [`RowSpec`] only
//! differ in the alignment vocabulary they accept and their default
//! alignment.

use std::fmt;
use std::ops::Deref;

use crate::errors::SpecError;
use crate::size::Size;

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Columns, laid out left to right
    Horizontal,
    /// Rows, laid out top to bottom
    Vertical,
}

impl Axis {
    pub fn is_horizontal(&self) -> bool {
        *self == Axis::Horizontal
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("column"),
            Axis::Vertical => f.write_str("row"),
        }
    }
}

/// Alignment a spec hands to items that use the default cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefaultAlignment {
    Left,
    Right,
    Top,
    Bottom,
    Center,
    Fill,
}

impl DefaultAlignment {
    pub fn name(&self) -> &'static str {
        match self {
            DefaultAlignment::Left => "left",
            DefaultAlignment::Right => "right",
            DefaultAlignment::Top => "top",
            DefaultAlignment::Bottom => "bottom",
            DefaultAlignment::Center => "center",
            DefaultAlignment::Fill => "fill",
        }
    }

    pub fn abbreviation(&self) -> char {
        self.name().as_bytes()[0] as char
    }

    /// Whether a spec on the given axis may use this alignment.
    pub fn fits(&self, axis: Axis) -> bool {
        match self {
            DefaultAlignment::Center | DefaultAlignment::Fill => true,
            DefaultAlignment::Left | DefaultAlignment::Right => axis == Axis::Horizontal,
            DefaultAlignment::Top | DefaultAlignment::Bottom => axis == Axis::Vertical,
        }
    }
}

impl fmt::Display for DefaultAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Description of one column or row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormSpec {
    axis: Axis,
    default_alignment: DefaultAlignment,
    size: Size,
    resize_weight: f64,
}

impl FormSpec {
    /// The spec does not take extra space.
    pub const NO_GROW: f64 = 0.0;

    /// Standard weight for specs that take extra space.
    pub const DEFAULT_GROW: f64 = 1.0;

    pub fn new(
        axis: Axis,
        default_alignment: DefaultAlignment,
        size: Size,
        resize_weight: f64,
    ) -> Result<Self, SpecError> {
        if resize_weight.is_nan() || resize_weight < 0.0 {
            return Err(SpecError::NegativeResizeWeight { weight: resize_weight });
        }
        if !default_alignment.fits(axis) {
            return Err(SpecError::InvalidAlignment {
                alignment: default_alignment.name().to_string(),
                axis: axis.to_string(),
            });
        }
        Ok(Self {
            axis,
            default_alignment,
            size,
            resize_weight,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn default_alignment(&self) -> DefaultAlignment {
        self.default_alignment
    }

    pub fn size(&self) -> &Size {
        &self.size
    }

    pub fn resize_weight(&self) -> f64 {
        self.resize_weight
    }

    pub fn can_grow(&self) -> bool {
        self.resize_weight != Self::NO_GROW
    }

    /// Abbreviated encoding, e.g. `f:p:n`.
    pub fn to_short_string(&self) -> String {
        let resize = if self.resize_weight == Self::NO_GROW {
            "n".to_string()
        } else if self.resize_weight == Self::DEFAULT_GROW {
            "g".to_string()
        } else {
            format!("g({})", self.resize_weight)
        };
        format!("{}:{}:{}", self.default_alignment.abbreviation(), self.size, resize)
    }
}

impl AsRef<FormSpec> for FormSpec {
    fn as_ref(&self) -> &FormSpec {
        self
    }
}

impl fmt::Display for FormSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:", self.default_alignment, self.size)?;
        if self.resize_weight == Self::NO_GROW {
            f.write_str("none")
        } else if self.resize_weight == Self::DEFAULT_GROW {
            f.write_str("grow")
        } else {
            write!(f, "grow({})", self.resize_weight)
        }
    }
}

macro_rules! axis_spec {
    ($(#[$meta:meta])* $name:ident, $axis:expr, $default:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(FormSpec);

        impl $name {
            pub const AXIS: Axis = $axis;
            pub const DEFAULT_ALIGNMENT: DefaultAlignment = $default;

            pub fn new(
                alignment: DefaultAlignment,
                size: Size,
                resize_weight: f64,
            ) -> Result<Self, SpecError> {
                FormSpec::new(Self::AXIS, alignment, size, resize_weight).map(Self)
            }

            /// Spec with the default alignment that does not grow.
            pub fn of(size: Size) -> Self {
                Self(FormSpec {
                    axis: Self::AXIS,
                    default_alignment: Self::DEFAULT_ALIGNMENT,
                    size,
                    resize_weight: FormSpec::NO_GROW,
                })
            }

            /// Spec with the default alignment and the given resize weight.
            pub fn grow(size: Size, resize_weight: f64) -> Result<Self, SpecError> {
                Self::new(Self::DEFAULT_ALIGNMENT, size, resize_weight)
            }

            pub fn into_inner(self) -> FormSpec {
                self.0
            }
        }

        impl Deref for $name {
            type Target = FormSpec;

            fn deref(&self) -> &FormSpec {
                &self.0
            }
        }

        impl AsRef<FormSpec> for $name {
            fn as_ref(&self) -> &FormSpec {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

axis_spec!(
    /// Specification of one grid column.
    ColumnSpec,
    Axis::Horizontal,
    DefaultAlignment::Fill
);

axis_spec!(
    /// Specification of one grid row.
    RowSpec,
    Axis::Vertical,
    DefaultAlignment::Center
);
