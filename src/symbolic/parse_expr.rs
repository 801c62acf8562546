use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{
    brackets_balanced, find_char_positions_outside_brackets, find_pair_to_this_bracket,
    is_fully_bracketed, previous_significant_char,
};
use thiserror::Error;
/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use RustedGraphCalc::symbolic::symbolic_engine::Expr;
/// let input = "x**2 + sin(y)/2";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let parsed_function = parsed_expression.lambdify(&["x", "y"]).unwrap();
/// println!("{}, Rust function: {}  \n", input, parsed_function(&[1.0, 0.0]));
/// ```
//                  search recursion diagram
//                "y^2+exp(x)+ln(x)/y-x^2.3"
//                |_______________________________________|
//                |   split at every top-level + or -     |
//                |_______________________________________|
//                |  y^2  |  exp(x)  |  ln(x)/y  |  x^2.3 |
//                |   |                   |          |    |
//                |  \|/                 \|/        \|/   |
//                | split by ^      split by /   split by ^
//                |_______________________________________|
//                | y | 2 |  ...     | ln(x) | y | x | 2.3|
//                |_______________________________________|
//                  operands folded back left to right, etc... until
//                  variables, numbers and function calls

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseExprError {
    #[error("empty expression")]
    Empty,
    #[error("unbalanced brackets in '{0}'")]
    UnbalancedBrackets(String),
    #[error("operator '{0}' is missing an operand")]
    MissingOperand(char),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unexpected token '{0}'")]
    Unexpected(String),
}

impl Expr {
    /// Parses a formula in power syntax (`**` or `^`) into an expression tree.
    pub fn parse_expression(input: &str) -> Result<Expr, ParseExprError> {
        parse_expression_func(input)
    }
}

pub fn parse_expression_func(input: &str) -> Result<Expr, ParseExprError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseExprError::Empty);
    }
    if !brackets_balanced(input) {
        return Err(ParseExprError::UnbalancedBrackets(input.to_string()));
    }
    let input = input.replace("**", "^");
    parse_node(&input)
}

/// '+' or '-' at `pos` is a binary operator, not a sign of the operand that follows
fn is_binary_sign(input: &str, pos: usize) -> bool {
    let Some(prev) = previous_significant_char(input, pos) else {
        return false;
    };
    if !(prev.is_alphanumeric() || prev == ')' || prev == '.' || prev == '_') {
        return false;
    }
    // exponent sign inside a number like 2.5e-3
    if (prev == 'e' || prev == 'E') && input[..pos].ends_with(prev) {
        let head = &input[..pos - 1];
        let token_start = head
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
            .last()
            .map(|(i, _)| i);
        if let Some(start) = token_start {
            let mantissa = &head[start..];
            let at_token_start = head[..start]
                .chars()
                .last()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
            if at_token_start && mantissa.parse::<f64>().is_ok() {
                return false;
            }
        }
    }
    true
}

fn split_binary(input: &str, pos: usize, op: char) -> Result<(Expr, Expr), ParseExprError> {
    let left = input[..pos].trim();
    let right = input[pos + op.len_utf8()..].trim();
    if left.is_empty() || right.is_empty() {
        return Err(ParseExprError::MissingOperand(op));
    }
    Ok((parse_node(left)?, parse_node(right)?))
}

/// Parses each operand between the operator positions once and combines them
/// left associatively, so a chain of n terms is one pass and not n nested splits.
fn fold_left(input: &str, operators: &[(usize, char)]) -> Result<Expr, ParseExprError> {
    let operand = |from: usize, to: usize, op: char| {
        let text = input[from..to].trim();
        if text.is_empty() {
            Err(ParseExprError::MissingOperand(op))
        } else {
            parse_node(text)
        }
    };
    let (first_pos, first_op) = operators[0];
    let mut acc = operand(0, first_pos, first_op)?;
    for (k, &(pos, op)) in operators.iter().enumerate() {
        let end = operators.get(k + 1).map_or(input.len(), |&(next, _)| next);
        let rhs = operand(pos + op.len_utf8(), end, op)?;
        acc = match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            '-' => Expr::Sub(acc.boxed(), rhs.boxed()),
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            _ => Expr::Div(acc.boxed(), rhs.boxed()),
        };
    }
    Ok(acc)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn build_function(name: &str, arg: Expr) -> Result<Expr, ParseExprError> {
    let arg = Box::new(arg);
    let expr = match name {
        "sin" => Expr::sin(arg),
        "cos" => Expr::cos(arg),
        "tan" | "tg" => Expr::tg(arg),
        "cot" | "ctg" => Expr::ctg(arg),
        "asin" | "arcsin" => Expr::arcsin(arg),
        "acos" | "arccos" => Expr::arccos(arg),
        "atan" | "arctan" | "arctg" => Expr::arctg(arg),
        "acot" | "arccot" | "arcctg" => Expr::arcctg(arg),
        "exp" => Expr::Exp(arg),
        "ln" | "log" => Expr::Ln(arg),
        "sqrt" => Expr::Pow(arg, Box::new(Expr::Const(0.5))),
        _ => return Err(ParseExprError::UnknownFunction(name.to_string())),
    };
    Ok(expr)
}

fn parse_node(input: &str) -> Result<Expr, ParseExprError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseExprError::Empty);
    }

    // lowest precedence first: every top-level binary + or -, folded left to right
    let signs = find_char_positions_outside_brackets(input, &['+', '-'], is_binary_sign);
    if !signs.is_empty() {
        return fold_left(input, &signs);
    }

    let products = find_char_positions_outside_brackets(input, &['*', '/'], |_, _| true);
    if !products.is_empty() {
        return fold_left(input, &products);
    }

    // unary sign binds weaker than ^ : -x^2 is -(x^2)
    if let Some(rest) = input.strip_prefix('-') {
        let rest = rest.trim();
        if rest.is_empty() {
            return Err(ParseExprError::MissingOperand('-'));
        }
        if starts_like_number(rest) {
            if let Ok(val) = rest.parse::<f64>() {
                return Ok(Expr::Const(-val));
            }
        }
        return Ok(-parse_node(rest)?);
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_node(rest);
    }

    // ^ is right associative, so split at the leftmost one
    let powers = find_char_positions_outside_brackets(input, &['^'], |_, _| true);
    if let Some(&(pos, op)) = powers.first() {
        let (base, exp) = split_binary(input, pos, op)?;
        return Ok(Expr::Pow(base.boxed(), exp.boxed()));
    }

    if is_fully_bracketed(input) {
        return parse_node(&input[1..input.len() - 1]);
    }

    if let Some(open) = input.find('(') {
        let name = input[..open].trim();
        if is_identifier(name) && find_pair_to_this_bracket(input, open) == Some(input.len() - 1) {
            let arg = parse_node(&input[open + 1..input.len() - 1])?;
            return build_function(name, arg);
        }
        return Err(ParseExprError::Unexpected(input.to_string()));
    }

    if starts_like_number(input) {
        return input
            .parse::<f64>()
            .map(Expr::Const)
            .map_err(|_| ParseExprError::InvalidNumber(input.to_string()));
    }

    if is_identifier(input) {
        return Ok(match input {
            "pi" => Expr::Const(std::f64::consts::PI),
            "e" | "E" => Expr::Const(std::f64::consts::E),
            // spellings `Display` uses for non-finite constants
            "inf" => Expr::Const(f64::INFINITY),
            "NaN" | "nan" => Expr::Const(f64::NAN),
            _ => Expr::Var(input.to_string()),
        });
    }

    Err(ParseExprError::Unexpected(input.to_string()))
}

fn starts_like_number(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    #[test]
    fn test_parse_sum_is_left_associative() {
        let parsed = Expr::parse_expression("x - y + 2").unwrap();
        let expected = Expr::Add(
            Box::new(Expr::Sub(Box::new(var("x")), Box::new(var("y")))),
            Box::new(Expr::Const(2.0)),
        );
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_precedence() {
        let parsed = Expr::parse_expression("2*x**2 + 1").unwrap();
        let expected = Expr::Add(
            Box::new(Expr::Mul(
                Box::new(Expr::Const(2.0)),
                Box::new(Expr::Pow(Box::new(var("x")), Box::new(Expr::Const(2.0)))),
            )),
            Box::new(Expr::Const(1.0)),
        );
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_power_right_associative() {
        let parsed = Expr::parse_expression("2^3^2").unwrap();
        let f = parsed.lambdify(&[]).unwrap();
        assert_relative_eq!(f(&[]), 512.0);
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(Expr::parse_expression("-3").unwrap(), Expr::Const(-3.0));
        let f = Expr::parse_expression("-x^2").unwrap().lambdify(&["x"]).unwrap();
        assert_relative_eq!(f(&[3.0]), -9.0);
        let f = Expr::parse_expression("2*-x").unwrap().lambdify(&["x"]).unwrap();
        assert_relative_eq!(f(&[3.0]), -6.0);
        let f = Expr::parse_expression("x - -3").unwrap().lambdify(&["x"]).unwrap();
        assert_relative_eq!(f(&[1.0]), 4.0);
    }

    #[test]
    fn test_parse_scientific_notation() {
        assert_eq!(Expr::parse_expression("2.5e-3").unwrap(), Expr::Const(2.5e-3));
        let f = Expr::parse_expression("1e+2 - x").unwrap().lambdify(&["x"]).unwrap();
        assert_relative_eq!(f(&[1.0]), 99.0);
        // a symbol ending in e is not a number
        let parsed = Expr::parse_expression("xe-1").unwrap();
        assert_eq!(parsed, Expr::Sub(Box::new(var("xe")), Box::new(Expr::Const(1.0))));
    }

    #[test]
    fn test_parse_functions() {
        let parsed = Expr::parse_expression("sin(x) + tan(y) + sqrt(z)").unwrap();
        assert_eq!(parsed.all_arguments_are_variables(), vec!["x", "y", "z"]);
        let f = Expr::parse_expression("exp(ln(x))").unwrap().lambdify(&["x"]).unwrap();
        assert_relative_eq!(f(&[2.5]), 2.5, epsilon = 1e-12);
        let f = Expr::parse_expression("sqrt(x)").unwrap().lambdify(&["x"]).unwrap();
        assert_relative_eq!(f(&[16.0]), 4.0);
    }

    #[test]
    fn test_parse_constants() {
        let f = Expr::parse_expression("cos(pi)").unwrap().lambdify(&[]).unwrap();
        assert_relative_eq!(f(&[]), -1.0);
        assert_eq!(Expr::parse_expression("e").unwrap(), Expr::Const(std::f64::consts::E));
        assert_eq!(Expr::parse_expression("eps").unwrap(), var("eps"));
    }

    #[test]
    fn test_display_reparses_to_same_tree() {
        let parsed = Expr::parse_expression("-x**2*sin(y)/(1 + z) - 3").unwrap();
        let reparsed = Expr::parse_expression(&parsed.to_string()).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn test_non_finite_constants_reparse() {
        let inf = Expr::Const(f64::INFINITY);
        assert_eq!(Expr::parse_expression(&inf.to_string()).unwrap(), inf);
        let f = Expr::parse_expression(&Expr::Const(f64::NEG_INFINITY).to_string())
            .unwrap()
            .lambdify(&[])
            .unwrap();
        assert_eq!(f(&[]), f64::NEG_INFINITY);
        match Expr::parse_expression(&Expr::Const(f64::NAN).to_string()).unwrap() {
            Expr::Const(v) => assert!(v.is_nan()),
            other => panic!("expected a constant, got {:?}", other),
        }
        assert_eq!(Expr::parse_expression("1e400").unwrap(), inf);
    }

    #[test]
    fn test_long_sum_and_product_chains() {
        let sum = vec!["1"; 5000].join("+");
        let mut node = Expr::parse_expression(&sum).unwrap();
        let mut additions = 0;
        while let Expr::Add(lhs, rhs) = node {
            assert_eq!(*rhs, Expr::Const(1.0));
            additions += 1;
            node = *lhs;
        }
        assert_eq!((additions, node), (4999, Expr::Const(1.0)));

        let sum = vec!["x"; 1000].join(" + ");
        let f = Expr::parse_expression(&sum).unwrap().lambdify(&["x"]).unwrap();
        assert_relative_eq!(f(&[2.0]), 2000.0);
        let f = Expr::parse_expression("8/2/2*3 - 1 - 1").unwrap().lambdify(&[]).unwrap();
        assert_relative_eq!(f(&[]), 4.0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Expr::parse_expression("  "), Err(ParseExprError::Empty));
        assert!(matches!(
            Expr::parse_expression("(x+1"),
            Err(ParseExprError::UnbalancedBrackets(_))
        ));
        assert_eq!(
            Expr::parse_expression("foo(x)"),
            Err(ParseExprError::UnknownFunction("foo".to_string()))
        );
        assert_eq!(Expr::parse_expression("x+"), Err(ParseExprError::MissingOperand('+')));
        assert!(matches!(Expr::parse_expression("x y"), Err(ParseExprError::Unexpected(_))));
        assert!(matches!(Expr::parse_expression("z = x"), Err(ParseExprError::Unexpected(_))));
        assert!(matches!(Expr::parse_expression("2x"), Err(ParseExprError::InvalidNumber(_))));
    }
}
