// the collection of utility functions mainly for bracket parsing and proceeding

/// true if every '(' has its ')' and no ')' comes before its '('
pub fn brackets_balanced(s: &str) -> bool {
    let mut depth: i64 = 0;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// byte position of the bracket closing the one opened at `open_pos`
pub fn find_pair_to_this_bracket(input: &str, open_pos: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in input[open_pos..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open_pos + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// true if the whole string is wrapped by one pair of brackets: "(x+1)" but not "(x)+(y)"
pub fn is_fully_bracketed(input: &str) -> bool {
    input.starts_with('(') && find_pair_to_this_bracket(input, 0) == Some(input.len() - 1)
}

/// Byte positions and characters of operators found at bracket depth zero, in order.
/// `accept` decides whether an operator at a given position really is an operator
/// (used to tell a binary minus from a sign).
pub fn find_char_positions_outside_brackets<F>(
    input: &str,
    operators: &[char],
    accept: F,
) -> Vec<(usize, char)>
where
    F: Fn(&str, usize) -> bool,
{
    let mut depth = 0;
    let mut found = Vec::new();
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && operators.contains(&c) && accept(input, i) => found.push((i, c)),
            _ => {}
        }
    }
    found
}

/// last non-whitespace character before byte position `pos`
pub fn previous_significant_char(input: &str, pos: usize) -> Option<char> {
    input[..pos].chars().rev().find(|c| !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets_balanced() {
        assert!(brackets_balanced("sin(x)*(y+(1))"));
        assert!(brackets_balanced("x"));
        assert!(!brackets_balanced("(x+1"));
        assert!(!brackets_balanced(")x("));
    }

    #[test]
    fn test_find_pair_to_this_bracket() {
        let s = "(a+(b))*c";
        assert_eq!(find_pair_to_this_bracket(s, 0), Some(6));
        assert_eq!(find_pair_to_this_bracket(s, 3), Some(5));
    }

    #[test]
    fn test_is_fully_bracketed() {
        assert!(is_fully_bracketed("(x+1)"));
        assert!(!is_fully_bracketed("(x)+(y)"));
        assert!(!is_fully_bracketed("x"));
    }

    #[test]
    fn test_operators_outside_brackets() {
        let found = find_char_positions_outside_brackets("a+(b-c)*d-e", &['+', '-'], |_, _| true);
        assert_eq!(found, vec![(1, '+'), (9, '-')]);
    }
}
