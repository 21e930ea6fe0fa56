//! Token combinators for encoded specs and constraints.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1},
    combinator::{map_res, opt, recognize},
    sequence::{delimited, pair, tuple},
    IResult,
};

/// Parse a decimal number (integer or float, optionally negative).
pub fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
        ))),
        str::parse::<f64>,
    )(input)
}

/// Parse a unit suffix.
pub fn unit(input: &str) -> IResult<&str, &str> {
    alt((
        tag("px"),
        tag("pt"),
        tag("in"),
        tag("mm"),
        tag("cm"),
        tag("dlu"),
    ))(input)
}

/// Parse a resize weight in the `grow(<number>)` / `g(<number>)` form.
pub fn grow_weight(input: &str) -> IResult<&str, f64> {
    delimited(
        pair(alt((tag("grow"), tag("g"))), char('(')),
        number,
        char(')'),
    )(input)
}

/// Split a list on commas, ignoring commas nested in parentheses.
pub fn split_list(input: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut paren_depth = 0;

    for (i, c) in input.char_indices() {
        match c {
            '(' => paren_depth += 1,
            ')' => paren_depth -= 1,
            ',' if paren_depth == 0 => {
                items.push(input[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(input[start..].trim());

    items
}

/// Split on spaces and commas, dropping empty tokens.
pub fn split_tokens(input: &str) -> Vec<&str> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Decode an integer the way `Integer.decode` does: optional sign, then
/// `0x`/`#` for hex, a leading `0` for octal, decimal otherwise.
pub fn decode_integer(token: &str) -> Option<i64> {
    let (negative, digits) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .or_else(|| digits.strip_prefix('#'))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    // from_str_radix accepts its own sign, which decode does not allow here
    if digits.is_empty() || digits.starts_with(['-', '+']) {
        return None;
    }

    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        assert_eq!(number("50px"), Ok(("px", 50.0)));
        assert_eq!(number("0.5)"), Ok((")", 0.5)));
        assert_eq!(number(".25"), Ok(("", 0.25)));
        assert_eq!(number("-3"), Ok(("", -3.0)));
        assert!(number("px").is_err());
    }

    #[test]
    fn test_unit() {
        assert_eq!(unit("dlu"), Ok(("", "dlu")));
        assert_eq!(unit("mm"), Ok(("", "mm")));
        assert!(unit("em").is_err());
    }

    #[test]
    fn test_grow_weight() {
        assert_eq!(grow_weight("grow(0.5)"), Ok(("", 0.5)));
        assert_eq!(grow_weight("g(2)"), Ok(("", 2.0)));
        assert!(grow_weight("grow").is_err());
    }

    #[test]
    fn test_split_list_keeps_blank_entries() {
        assert_eq!(split_list("p, 4px,,d"), vec!["p", "4px", "", "d"]);
        assert_eq!(split_list("max(p;4px), g(1)"), vec!["max(p;4px)", "g(1)"]);
    }

    #[test]
    fn test_split_tokens() {
        assert_eq!(split_tokens("1, 2 ,3  4"), vec!["1", "2", "3", "4"]);
        assert_eq!(split_tokens(" 1,2 "), vec!["1", "2"]);
    }

    #[test]
    fn test_decode_integer() {
        assert_eq!(decode_integer("42"), Some(42));
        assert_eq!(decode_integer("+7"), Some(7));
        assert_eq!(decode_integer("-7"), Some(-7));
        assert_eq!(decode_integer("0x1f"), Some(31));
        assert_eq!(decode_integer("#10"), Some(16));
        assert_eq!(decode_integer("010"), Some(8));
        assert_eq!(decode_integer("0"), Some(0));
        assert_eq!(decode_integer("09"), None);
        assert_eq!(decode_integer("--1"), None);
        assert_eq!(decode_integer("left"), None);
        assert_eq!(decode_integer(""), None);
    }
}
