//! Grammar for encoded cell constraints.
//!
//! Accepted forms, tokens separated by spaces and/or commas:
//! `x, y`, `x, y, w, h`, `x, y, hAlign, vAlign` and
//! `x, y, w, h, hAlign, vAlign`.

use formgrid_core::{Alignment, CellConstraints, ConstraintsError, Insets, ParseError};

use crate::lexer::{decode_integer, split_tokens};

/// Parse encoded cell constraints, e.g. `"3, 1, 2, 1, left, top"`.
pub fn parse_cell_constraints(input: &str) -> Result<CellConstraints, ParseError> {
    let lowered = input.trim().to_ascii_lowercase();
    let tokens = split_tokens(&lowered);

    let (width, height, alignments) = match tokens.len() {
        2 => (1, 1, None),
        4 if decode_integer(tokens[2]).is_some() => (
            grid_value(&tokens, 2, "width")?,
            grid_value(&tokens, 3, "height")?,
            None,
        ),
        4 => (1, 1, Some((tokens[2], tokens[3]))),
        6 => (
            grid_value(&tokens, 2, "width")?,
            grid_value(&tokens, 3, "height")?,
            Some((tokens[4], tokens[5])),
        ),
        count => return Err(ParseError::ArgumentCount { count }),
    };

    let x = grid_value(&tokens, 0, "x")?;
    let y = grid_value(&tokens, 1, "y")?;

    let (h_align, v_align) = match alignments {
        Some((h, v)) => (decode_alignment(h)?, decode_alignment(v)?),
        None => (Alignment::Default, Alignment::Default),
    };

    Ok(CellConstraints::new(x, y, width, height, h_align, v_align, Insets::ZERO)?)
}

/// Parse an encoded alignment pair and return it as `(horizontal, vertical)`.
///
/// With `horizontal_first` the input reads `"left, top"`, otherwise
/// `"top, left"`.
pub fn parse_alignments(
    input: &str,
    horizontal_first: bool,
) -> Result<(Alignment, Alignment), ParseError> {
    let lowered = input.trim().to_ascii_lowercase();
    let tokens = split_tokens(&lowered);
    let [first, second] = tokens.as_slice() else {
        return Err(ParseError::ArgumentCount {
            count: tokens.len(),
        });
    };

    let first = decode_alignment(first)?;
    let second = decode_alignment(second)?;
    let (h_align, v_align) = if horizontal_first {
        (first, second)
    } else {
        (second, first)
    };

    if !h_align.is_horizontal() {
        return Err(ConstraintsError::NotHorizontal {
            alignment: h_align.to_string(),
        }
        .into());
    }
    if !v_align.is_vertical() {
        return Err(ConstraintsError::NotVertical {
            alignment: v_align.to_string(),
        }
        .into());
    }
    Ok((h_align, v_align))
}

fn decode_alignment(token: &str) -> Result<Alignment, ParseError> {
    match token {
        "default" | "d" => Ok(Alignment::Default),
        "fill" | "f" => Ok(Alignment::Fill),
        "center" | "c" => Ok(Alignment::Center),
        "left" | "l" => Ok(Alignment::Left),
        "right" | "r" => Ok(Alignment::Right),
        "top" | "t" => Ok(Alignment::Top),
        "bottom" | "b" => Ok(Alignment::Bottom),
        _ => Err(ParseError::InvalidAlignment {
            token: token.to_string(),
        }),
    }
}

fn grid_value(tokens: &[&str], index: usize, field: &'static str) -> Result<usize, ParseError> {
    let token = tokens[index];
    let value = decode_integer(token).ok_or_else(|| ParseError::ExpectedInteger {
        position: index + 1,
        found: token.to_string(),
    })?;
    if value <= 0 {
        return Err(ConstraintsError::NonPositive { field, value }.into());
    }
    usize::try_from(value).map_err(|_| ParseError::InvalidNumber {
        value: token.to_string(),
    })
}
