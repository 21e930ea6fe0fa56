//! The size model for columns and rows.
//!
//! A [`Size`] says how the extent of a column or row is determined:
//! - a fixed [`ConstantSize`]
//! - a [`ComponentSize`] measured from the items placed in the column/row
//! - a [`BoundedSize`] clamping a basis size between constant bounds

use std::fmt;

use crate::types::ItemId;
use crate::units::{ConstantSize, UnitConverter};

/// Measures one dimension of an item in pixels.
pub trait Measure {
    fn size_of(&self, item: ItemId) -> i32;
}

impl<F> Measure for F
where
    F: Fn(ItemId) -> i32,
{
    fn size_of(&self, item: ItemId) -> i32 {
        self(item)
    }
}

/// Sizes measured from the items of a column or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentSize {
    /// Largest minimum size of the items
    Minimum,
    /// Largest preferred size of the items
    Preferred,
    /// Preferred size, shrinking down to the minimum size when space is short
    Default,
}

impl ComponentSize {
    pub fn name(&self) -> &'static str {
        match self {
            ComponentSize::Minimum => "minimum",
            ComponentSize::Preferred => "preferred",
            ComponentSize::Default => "default",
        }
    }

    /// Largest measured size over the given items, 0 if there are none.
    pub fn maximum_size(
        &self,
        items: &[ItemId],
        min_measure: &dyn Measure,
        pref_measure: &dyn Measure,
        default_measure: &dyn Measure,
    ) -> i32 {
        let measure = match self {
            ComponentSize::Minimum => min_measure,
            ComponentSize::Preferred => pref_measure,
            ComponentSize::Default => default_measure,
        };
        items
            .iter()
            .map(|&item| measure.size_of(item))
            .fold(0, i32::max)
    }
}

impl fmt::Display for ComponentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name()[..1])
    }
}

/// A basis size clamped by optional constant lower and upper bounds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundedSize {
    basis: Box<Size>,
    lower: Option<ConstantSize>,
    upper: Option<ConstantSize>,
}

impl BoundedSize {
    pub fn new(basis: Size, lower: Option<ConstantSize>, upper: Option<ConstantSize>) -> Self {
        Self {
            basis: Box::new(basis),
            lower,
            upper,
        }
    }

    /// At least `lower`, otherwise the basis.
    pub fn at_least(basis: Size, lower: ConstantSize) -> Self {
        Self::new(basis, Some(lower), None)
    }

    /// At most `upper`, otherwise the basis.
    pub fn at_most(basis: Size, upper: ConstantSize) -> Self {
        Self::new(basis, None, Some(upper))
    }

    pub fn basis(&self) -> &Size {
        &self.basis
    }

    pub fn lower_bound(&self) -> Option<&ConstantSize> {
        self.lower.as_ref()
    }

    pub fn upper_bound(&self) -> Option<&ConstantSize> {
        self.upper.as_ref()
    }

    pub fn maximum_size(
        &self,
        converter: &dyn UnitConverter,
        items: &[ItemId],
        min_measure: &dyn Measure,
        pref_measure: &dyn Measure,
        default_measure: &dyn Measure,
    ) -> i32 {
        let mut size =
            self.basis
                .maximum_size(converter, items, min_measure, pref_measure, default_measure);
        if let Some(lower) = &self.lower {
            size = size.max(lower.pixel_size(converter));
        }
        if let Some(upper) = &self.upper {
            size = size.min(upper.pixel_size(converter));
        }
        size
    }
}

impl fmt::Display for BoundedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.lower, &self.upper) {
            (Some(lower), None) => write!(f, "max({};{})", self.basis, lower),
            (None, Some(upper)) => write!(f, "min({};{})", self.basis, upper),
            (Some(lower), Some(upper)) => {
                write!(f, "max({};min({};{}))", lower, self.basis, upper)
            }
            (None, None) => write!(f, "bounded({})", self.basis),
        }
    }
}

/// How the extent of a column or row is determined.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Size {
    Constant(ConstantSize),
    Component(ComponentSize),
    Bounded(BoundedSize),
}

impl Size {
    pub const MINIMUM: Size = Size::Component(ComponentSize::Minimum);
    pub const PREFERRED: Size = Size::Component(ComponentSize::Preferred);
    pub const DEFAULT: Size = Size::Component(ComponentSize::Default);

    pub fn pixel(value: i32) -> Size {
        Size::Constant(ConstantSize::pixel(value))
    }

    pub fn bounded(basis: Size, lower: Option<ConstantSize>, upper: Option<ConstantSize>) -> Size {
        Size::Bounded(BoundedSize::new(basis, lower, upper))
    }

    /// Pixel size of the column/row holding `items`.
    ///
    /// `default_measure` is threaded through for [`ComponentSize::Default`];
    /// the solver passes the minimum or preferred measure there depending on
    /// which size array it is computing.
    pub fn maximum_size(
        &self,
        converter: &dyn UnitConverter,
        items: &[ItemId],
        min_measure: &dyn Measure,
        pref_measure: &dyn Measure,
        default_measure: &dyn Measure,
    ) -> i32 {
        match self {
            Size::Constant(constant) => constant.pixel_size(converter),
            Size::Component(component) => {
                component.maximum_size(items, min_measure, pref_measure, default_measure)
            }
            Size::Bounded(bounded) => {
                bounded.maximum_size(converter, items, min_measure, pref_measure, default_measure)
            }
        }
    }

    /// Whether the size may shrink below its preferred value when the
    /// container is too small.
    pub fn compressible(&self) -> bool {
        match self {
            Size::Constant(_) => false,
            Size::Component(component) => *component == ComponentSize::Default,
            Size::Bounded(bounded) => bounded.basis.compressible(),
        }
    }
}

impl From<ConstantSize> for Size {
    fn from(size: ConstantSize) -> Self {
        Size::Constant(size)
    }
}

impl From<ComponentSize> for Size {
    fn from(size: ComponentSize) -> Self {
        Size::Component(size)
    }
}

impl From<BoundedSize> for Size {
    fn from(size: BoundedSize) -> Self {
        Size::Bounded(size)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Constant(constant) => constant.fmt(f),
            Size::Component(component) => component.fmt(f),
            Size::Bounded(bounded) => bounded.fmt(f),
        }
    }
}
