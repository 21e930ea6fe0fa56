//! Grammar for encoded column and row specs.
//!
//! A spec reads `[alignment:]size[:resize]`, for example `right:pref:none`,
//! `50dlu`, `max(p;4px):grow(0.5)`. Specs are separated by commas.

use formgrid_core::{
    Axis, BoundedSize, ColumnSpec, ConstantSize, DefaultAlignment, FormSpec, ParseError, RowSpec,
    Size, Unit,
};

use crate::lexer::*;

/// Parse one encoded column spec.
pub fn parse_column_spec(input: &str) -> Result<ColumnSpec, ParseError> {
    let (alignment, size, weight) = parse_spec_parts(input, Axis::Horizontal)?;
    Ok(ColumnSpec::new(
        alignment.unwrap_or(ColumnSpec::DEFAULT_ALIGNMENT),
        size,
        weight,
    )?)
}

/// Parse one encoded row spec.
pub fn parse_row_spec(input: &str) -> Result<RowSpec, ParseError> {
    let (alignment, size, weight) = parse_spec_parts(input, Axis::Vertical)?;
    Ok(RowSpec::new(
        alignment.unwrap_or(RowSpec::DEFAULT_ALIGNMENT),
        size,
        weight,
    )?)
}

/// Parse a comma separated list of column specs.
pub fn parse_column_specs(input: &str) -> Result<Vec<ColumnSpec>, ParseError> {
    parse_list(input, parse_column_spec)
}

/// Parse a comma separated list of row specs.
pub fn parse_row_specs(input: &str) -> Result<Vec<RowSpec>, ParseError> {
    parse_list(input, parse_row_spec)
}

/// Parse a size on its own, e.g. `pref`, `4dlu` or `min(d;100px)`.
pub fn parse_size(input: &str, axis: Axis) -> Result<Size, ParseError> {
    let lowered = input.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return Err(ParseError::Empty);
    }
    decode_size(&lowered, axis)
}

fn parse_list<T>(
    input: &str,
    parse_one: impl Fn(&str) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    let specs = split_list(input)
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .map(parse_one)
        .collect::<Result<Vec<_>, _>>()?;

    if specs.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(specs)
}

fn parse_spec_parts(
    input: &str,
    axis: Axis,
) -> Result<(Option<DefaultAlignment>, Size, f64), ParseError> {
    let lowered = input.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return Err(ParseError::Empty);
    }

    let parts: Vec<&str> = lowered.split(':').map(str::trim).collect();
    let (alignment, size, resize) = match parts.as_slice() {
        [size] => (None, *size, None),
        [first, second] => match decode_default_alignment(first) {
            Some(alignment) => (Some(alignment), *second, None),
            None => (None, *first, Some(*second)),
        },
        [alignment, size, resize] => {
            let alignment = decode_default_alignment(alignment).ok_or_else(|| {
                ParseError::InvalidAlignment {
                    token: alignment.to_string(),
                }
            })?;
            (Some(alignment), *size, Some(*resize))
        }
        _ => {
            return Err(ParseError::TrailingInput {
                input: input.to_string(),
                rest: parts[3..].join(":"),
            })
        }
    };

    if size.is_empty() {
        return Err(ParseError::MissingSize {
            input: input.to_string(),
        });
    }

    let size = decode_size(size, axis)?;
    let weight = match resize {
        Some(resize) => decode_resize(resize)?,
        None => FormSpec::NO_GROW,
    };

    Ok((alignment, size, weight))
}

/// Both axes' alignment names are recognized here; a name that does not
/// fit the axis is rejected when the spec is built.
fn decode_default_alignment(token: &str) -> Option<DefaultAlignment> {
    match token {
        "left" | "l" => Some(DefaultAlignment::Left),
        "right" | "r" => Some(DefaultAlignment::Right),
        "top" | "t" => Some(DefaultAlignment::Top),
        "bottom" | "b" => Some(DefaultAlignment::Bottom),
        "center" | "c" => Some(DefaultAlignment::Center),
        "fill" | "f" => Some(DefaultAlignment::Fill),
        _ => None,
    }
}

fn decode_size(token: &str, axis: Axis) -> Result<Size, ParseError> {
    let bounded = token
        .strip_prefix("max(")
        .map(|inner| (true, inner))
        .or_else(|| token.strip_prefix("min(").map(|inner| (false, inner)));

    match bounded {
        Some((is_max, inner)) => decode_bounded(token, inner, is_max, axis),
        None => decode_atomic(token, axis),
    }
}

fn decode_bounded(token: &str, inner: &str, is_max: bool, axis: Axis) -> Result<Size, ParseError> {
    let inner = inner.strip_suffix(')').ok_or_else(|| ParseError::InvalidSize {
        value: token.to_string(),
    })?;
    let (first, second) = inner.split_once(';').ok_or_else(|| ParseError::InvalidSize {
        value: token.to_string(),
    })?;

    let (first, second) = (first.trim(), second.trim());
    if is_max && second.starts_with("min(") {
        return decode_doubly_bounded(token, first, second, axis);
    }

    let first = decode_atomic(first, axis)?;
    let second = decode_atomic(second, axis)?;

    let (basis, constant) = match (first, second) {
        (Size::Constant(_), Size::Constant(_)) => {
            return Err(ParseError::BothConstant {
                input: token.to_string(),
            })
        }
        (Size::Constant(constant), basis) | (basis, Size::Constant(constant)) => (basis, constant),
        _ => {
            return Err(ParseError::BothLogical {
                input: token.to_string(),
            })
        }
    };

    let bounded = if is_max {
        BoundedSize::at_least(basis, constant)
    } else {
        BoundedSize::at_most(basis, constant)
    };
    Ok(bounded.into())
}

/// `max(<lower>;min(<basis>;<upper>))`, the form both-bounded sizes encode to.
fn decode_doubly_bounded(
    token: &str,
    lower: &str,
    upper_bounded: &str,
    axis: Axis,
) -> Result<Size, ParseError> {
    let lower = match decode_atomic(lower, axis)? {
        Size::Constant(lower) => lower,
        _ => {
            return Err(ParseError::BothLogical {
                input: token.to_string(),
            })
        }
    };
    match decode_size(upper_bounded, axis)? {
        Size::Bounded(bounded) if bounded.lower_bound().is_none() => Ok(Size::bounded(
            bounded.basis().clone(),
            Some(lower),
            bounded.upper_bound().copied(),
        )),
        _ => Err(ParseError::InvalidSize {
            value: token.to_string(),
        }),
    }
}

fn decode_atomic(token: &str, axis: Axis) -> Result<Size, ParseError> {
    match token {
        "min" | "m" => return Ok(Size::MINIMUM),
        "pref" | "p" => return Ok(Size::PREFERRED),
        "default" | "d" => return Ok(Size::DEFAULT),
        _ => {}
    }

    let (rest, value) = number(token).map_err(|_| ParseError::InvalidSize {
        value: token.to_string(),
    })?;

    let resolved = if rest.is_empty() {
        Unit::Pixel
    } else {
        match unit(rest) {
            Ok(("", name)) => decode_unit(name, axis)?,
            _ => {
                return Err(ParseError::InvalidUnit {
                    unit: rest.to_string(),
                })
            }
        }
    };

    Ok(ConstantSize::checked(value, resolved)?.into())
}

fn decode_unit(name: &str, axis: Axis) -> Result<Unit, ParseError> {
    match name {
        "px" => Ok(Unit::Pixel),
        "pt" => Ok(Unit::Point),
        "in" => Ok(Unit::Inch),
        "mm" => Ok(Unit::Millimeter),
        "cm" => Ok(Unit::Centimeter),
        "dlu" if axis.is_horizontal() => Ok(Unit::DialogUnitsX),
        "dlu" => Ok(Unit::DialogUnitsY),
        _ => Err(ParseError::InvalidUnit {
            unit: name.to_string(),
        }),
    }
}

fn decode_resize(token: &str) -> Result<f64, ParseError> {
    match token {
        "g" | "grow" => return Ok(FormSpec::DEFAULT_GROW),
        "n" | "none" | "nogrow" => return Ok(FormSpec::NO_GROW),
        _ => {}
    }

    match grow_weight(token) {
        Ok(("", weight)) => Ok(weight),
        _ => Err(ParseError::InvalidResize {
            token: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgrid_core::{ComponentSize, SpecError};

    #[test]
    fn test_parse_size_only() {
        let spec = parse_column_spec("pref").unwrap();
        assert_eq!(spec.size(), &Size::PREFERRED);
        assert_eq!(spec.default_alignment(), DefaultAlignment::Fill);
        assert_eq!(spec.resize_weight(), 0.0);

        let spec = parse_row_spec("d").unwrap();
        assert_eq!(spec.size(), &Size::DEFAULT);
        assert_eq!(spec.default_alignment(), DefaultAlignment::Center);
    }

    #[test]
    fn test_parse_alignment_and_size() {
        let spec = parse_column_spec("right:pref").unwrap();
        assert_eq!(spec.default_alignment(), DefaultAlignment::Right);
        assert_eq!(spec.size(), &Size::PREFERRED);
    }

    #[test]
    fn test_parse_size_and_resize() {
        let spec = parse_column_spec("default:grow").unwrap();
        assert_eq!(spec.size(), &Size::DEFAULT);
        assert_eq!(spec.resize_weight(), 1.0);

        let spec = parse_row_spec("p:g(0.5)").unwrap();
        assert_eq!(spec.resize_weight(), 0.5);
    }

    #[test]
    fn test_parse_full_form() {
        let spec = parse_column_spec(" Left : 50DLU : Grow(2) ").unwrap();
        assert_eq!(spec.default_alignment(), DefaultAlignment::Left);
        assert_eq!(spec.size(), &Size::Constant(ConstantSize::dlu_x(50)));
        assert_eq!(spec.resize_weight(), 2.0);
    }

    #[test]
    fn test_dlu_resolves_per_axis() {
        let column = parse_column_spec("4dlu").unwrap();
        let row = parse_row_spec("4dlu").unwrap();
        assert_eq!(column.size(), &Size::Constant(ConstantSize::dlu_x(4)));
        assert_eq!(row.size(), &Size::Constant(ConstantSize::dlu_y(4)));
    }

    #[test]
    fn test_units() {
        let size = |s: &str| parse_size(s, Axis::Horizontal).unwrap();
        assert_eq!(size("4"), Size::pixel(4));
        assert_eq!(size("4px"), Size::pixel(4));
        assert_eq!(size("12pt"), Size::from(ConstantSize::new(12.0, Unit::Point)));
        assert_eq!(size("1.5in"), Size::from(ConstantSize::new(1.5, Unit::Inch)));
        assert_eq!(size("3mm"), Size::from(ConstantSize::new(3.0, Unit::Millimeter)));
        assert_eq!(size("0.5cm"), Size::from(ConstantSize::new(0.5, Unit::Centimeter)));
    }

    #[test]
    fn test_integer_units_reject_fractions() {
        assert!(matches!(
            parse_column_spec("2.5px"),
            Err(ParseError::Spec(SpecError::NonIntegerValue { .. }))
        ));
        assert!(parse_column_spec("2.5dlu").is_err());
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(
            parse_column_spec("4em"),
            Err(ParseError::InvalidUnit { unit: "em".into() })
        );
    }

    #[test]
    fn test_bounded_sizes() {
        let spec = parse_column_spec("max(p;50px)").unwrap();
        assert_eq!(
            spec.size(),
            &Size::from(BoundedSize::at_least(Size::PREFERRED, ConstantSize::pixel(50)))
        );

        // Constant may come first
        let spec = parse_column_spec("min(4dlu;d)").unwrap();
        assert_eq!(
            spec.size(),
            &Size::from(BoundedSize::at_most(Size::DEFAULT, ConstantSize::dlu_x(4)))
        );
        assert!(spec.size().compressible());
    }

    #[test]
    fn test_bounded_rejects_same_kinds() {
        assert!(matches!(
            parse_column_spec("max(4px;50px)"),
            Err(ParseError::BothConstant { .. })
        ));
        assert!(matches!(
            parse_column_spec("min(p;d)"),
            Err(ParseError::BothLogical { .. })
        ));
        assert!(matches!(
            parse_column_spec("max(p,4px)"),
            Err(ParseError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_min_is_not_bounded_without_parens() {
        let spec = parse_column_spec("min").unwrap();
        assert_eq!(spec.size(), &Size::Component(ComponentSize::Minimum));
    }

    #[test]
    fn test_wrong_axis_alignment() {
        assert!(matches!(
            parse_column_spec("top:pref"),
            Err(ParseError::Spec(SpecError::InvalidAlignment { .. }))
        ));
        assert!(parse_row_spec("t:p").is_ok());
        assert!(parse_row_spec("left:p").is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(parse_column_spec(""), Err(ParseError::Empty));
        assert_eq!(parse_column_spec("   "), Err(ParseError::Empty));
        assert!(matches!(parse_column_spec("left:"), Err(ParseError::MissingSize { .. })));
        assert!(matches!(parse_column_spec("huge"), Err(ParseError::InvalidSize { .. })));
        assert!(matches!(
            parse_column_spec("p:sometimes"),
            Err(ParseError::InvalidResize { .. })
        ));
        assert!(matches!(
            parse_column_spec("x:p:g"),
            Err(ParseError::InvalidAlignment { .. })
        ));
        assert!(matches!(
            parse_column_spec("l:p:g:n"),
            Err(ParseError::TrailingInput { .. })
        ));
        assert!(matches!(
            parse_column_spec("p:g(-1)"),
            Err(ParseError::Spec(SpecError::NegativeResizeWeight { .. }))
        ));
    }

    #[test]
    fn test_parse_list() {
        let specs = parse_column_specs("right:pref, 4px, 50px, 4px, default").unwrap();
        assert_eq!(specs.len(), 5);
        assert_eq!(specs[0].default_alignment(), DefaultAlignment::Right);
        assert_eq!(specs[2].size(), &Size::pixel(50));
        assert_eq!(specs[4].size(), &Size::DEFAULT);
    }

    #[test]
    fn test_parse_list_skips_blank_entries() {
        let specs = parse_row_specs("p, , max(p;20px):g,").unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].resize_weight(), 1.0);
        assert_eq!(parse_row_specs(" , "), Err(ParseError::Empty));
    }

    #[test]
    fn test_display_round_trip() {
        for encoded in [
            "right:p:none",
            "fill:50dlu:grow(0.5)",
            "center:max(p;3dlu):grow",
            "left:min(d;120px):none",
            "fill:1.5cm:none",
            "fill:max(10px;min(p;60px)):none",
        ] {
            let spec = parse_column_spec(encoded).unwrap();
            assert_eq!(spec.to_string(), encoded);
            assert_eq!(parse_column_spec(&spec.to_short_string()).unwrap(), spec);
        }
    }

    #[test]
    fn test_both_bounds_round_trip() {
        let spec = ColumnSpec::of(Size::bounded(
            Size::PREFERRED,
            Some(ConstantSize::pixel(10)),
            Some(ConstantSize::pixel(60)),
        ));
        let encoded = spec.to_string();
        assert_eq!(encoded, "fill:max(10px;min(p;60px)):none");
        let parsed = parse_column_spec(&encoded).unwrap();
        assert_eq!(parsed, spec);
        assert_eq!(parsed.size(), spec.size());

        let row = parse_row_spec("max(2dlu;min(d;9dlu))").unwrap();
        assert_eq!(
            row.size(),
            &Size::bounded(
                Size::DEFAULT,
                Some(ConstantSize::new(2.0, Unit::DialogUnitsY)),
                Some(ConstantSize::new(9.0, Unit::DialogUnitsY)),
            )
        );
        assert!(matches!(
            parse_column_spec("max(p;min(d;9px))"),
            Err(ParseError::BothLogical { .. })
        ));
        assert!(matches!(
            parse_column_spec("max(4px;min(d;max(p;9px)))"),
            Err(ParseError::InvalidSize { .. })
        ));
    }
}
