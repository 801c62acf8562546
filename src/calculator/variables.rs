use crate::calculator::errors::CalcError;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Explicit variable values, ordered by name.
pub type Bindings = BTreeMap<String, f64>;

/// one or more ASCII letters
fn is_variable_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
}

/// Parses an assignment list like `"A=5.5, k=10, R=2"`.
///
/// Blank text gives an empty map. The first malformed item aborts the whole parse,
/// no partial map is returned.
pub fn parse_variables(text: &str) -> Result<Bindings, CalcError> {
    let mut bindings = Bindings::new();
    if text.trim().is_empty() {
        return Ok(bindings);
    }
    for item in text.split(',').map(str::trim) {
        let Some((name, value)) = item.split_once('=') else {
            return Err(CalcError::InvalidAssignment(item.to_string()));
        };
        let (name, value) = (name.trim(), value.trim());
        if !is_variable_name(name) {
            return Err(CalcError::InvalidVariableName(name.to_string()));
        }
        let number = value.parse::<f64>().map_err(|_| CalcError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })?;
        bindings.insert(name.to_string(), number);
    }
    Ok(bindings)
}

/// `A=10.0, B=0.0` rendering used in result messages.
pub fn describe_bindings(bindings: &Bindings) -> String {
    bindings
        .iter()
        .map(|(name, value)| format!("{}={:?}", name, value))
        .join(", ")
}
