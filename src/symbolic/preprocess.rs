//! Text-level rewriting of user formulas before they reach the parser.
//!
//! `normalize` turns calculator-style input (`2x`, `3(x+1)`, `x^2`) into power syntax with
//! explicit multiplication. It works on character classes only, there is no tokenizer, so
//! adjacent letters are always treated as a product: `xy` becomes `x*y`, and `sin(x)`
//! becomes `s*i*n*(x)`. Malformed input is passed through and left to the parser.

use regex::Regex;
use std::collections::BTreeMap;

fn is_digit_or_close(c: char) -> bool {
    c.is_ascii_digit() || c == ')'
}

fn is_letter_or_open(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '('
}

fn is_letter_or_close(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ')'
}

fn is_alnum_or_close(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ')'
}

/// Inserts `*` at every position where the character before satisfies `left`
/// and the character after satisfies `right`.
pub fn insert_between(s: &str, left: fn(char) -> bool, right: fn(char) -> bool) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if let Some(&next) = chars.peek() {
            if left(c) && right(next) {
                out.push('*');
            }
        }
    }
    out
}

/// Strips whitespace and rewrites `^` as `**`.
pub fn to_power_syntax(raw: &str) -> String {
    raw.trim().replace('^', "**")
}

/// Full calculator-style normalization: power syntax plus implicit multiplication.
///
/// ```
/// use RustedGraphCalc::symbolic::preprocess::normalize;
/// assert_eq!(normalize("2x+3(x+1)"), "2*x+3*(x+1)");
/// ```
pub fn normalize(raw: &str) -> String {
    let expr = to_power_syntax(raw);
    let expr = insert_between(&expr, is_digit_or_close, is_letter_or_open);
    let expr = insert_between(&expr, is_letter_or_close, |c| c.is_ascii_digit());
    insert_between(&expr, is_alnum_or_close, is_letter_or_open)
}

/// Replaces whole-word occurrences of each bound name (except `x`) with its value
/// rendered as a float literal, so `A*cos(x)` with `A = 2` becomes `2.0*cos(x)`.
pub fn substitute_bindings_textually(
    expression: &str,
    bindings: &BTreeMap<String, f64>,
) -> Result<String, regex::Error> {
    let mut text = expression.to_string();
    for (name, value) in bindings.iter().filter(|(name, _)| name.as_str() != "x") {
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(name)))?;
        let literal = format!("{:?}", value);
        text = pattern.replace_all(&text, literal.as_str()).into_owned();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_implicit_multiplication() {
        assert_eq!(normalize("2x+3(x+1)"), "2*x+3*(x+1)");
        assert_eq!(normalize("x2"), "x*2");
        assert_eq!(normalize("xy"), "x*y");
        assert_eq!(normalize("(x+1)(x-1)"), "(x+1)*(x-1)");
    }

    #[test]
    fn test_normalize_power_and_whitespace() {
        assert_eq!(normalize("  x^2 "), "x**2");
        assert_eq!(to_power_syntax(" A*x^2 "), "A*x**2");
    }

    #[test]
    fn letter_runs_are_split_into_products() {
        assert_eq!(normalize("sin(x)"), "s*i*n*(x)");
        assert_eq!(normalize("sin"), "s*i*n");
    }

    #[test]
    fn test_normalize_is_idempotent_on_normalized_input() {
        for s in ["2*x+3*(x+1)", "x**2 + y**2", "A*x*y - 4", "(x+1)*(x-1)/2"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_substitute_bindings_textually() {
        let mut bindings = BTreeMap::new();
        bindings.insert("A".to_string(), 2.0);
        bindings.insert("x".to_string(), 7.0);
        let text = substitute_bindings_textually("A*cos(x)", &bindings).unwrap();
        assert_eq!(text, "2.0*cos(x)");
    }

    #[test]
    fn test_substitute_whole_words_only() {
        let mut bindings = BTreeMap::new();
        bindings.insert("k".to_string(), 5.5);
        let text = substitute_bindings_textually("k*x + kk", &bindings).unwrap();
        assert_eq!(text, "5.5*x + kk");
    }
}
