#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedGraphCalc::symbolic::symbolic_engine::Expr;
/// let input = "x^2.3* ln(x+y+y^2.6)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let parsed_function = parsed_expression.lambdify(&["x", "y"]).unwrap();
/// println!("{}, Rust function: {}  \n", input, parsed_function(&[1.0, 2.0]));
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Preprocessing
/// calculator-style text (`2x`, `3(x+1)`, `x^2`) to parser-ready text, plus textual
/// substitution of variable bindings
///# Example
/// ```
/// use RustedGraphCalc::symbolic::preprocess::normalize;
/// assert_eq!(normalize("2x^2+3(x+1)"), "2*x**2+3*(x+1)");
/// ```
pub mod preprocess;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree
/// 2) substitutes variables with values or other expressions
/// 3) collects free symbols and binds leftover symbols to defaults
///# Example
/// ```
/// use RustedGraphCalc::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("A*x + B").unwrap();
/// let all = parsed_expression.all_arguments_are_variables();
/// assert_eq!(all, vec!["A", "B", "x"]);
/// let (bound, defaulted) = parsed_expression.default_free_symbols(&["x"], 1.0);
/// assert_eq!(defaulted, vec!["A", "B"]);
/// let f = bound.lambdify(&["x"]).unwrap();
/// assert_eq!(f(&[3.0]), 4.0);
/// ```
pub mod symbolic_engine;
/// turns a symbolic expression into a thread-safe Rust closure
pub mod symbolic_lambdify;
/// constant folding and algebraic identities
pub mod symbolic_simplify;
///____________________________________________________________________________________________________________________________
/// # Equation solving
/// solves `expr = 0` for one variable: closed form for linear and quadratic polynomials,
/// inversion of the wrapping operations when the variable occurs once
///# Example
/// ```
/// use RustedGraphCalc::symbolic::symbolic_engine::Expr;
/// let eq = Expr::parse_expression("2*z - x").unwrap();
/// let roots = eq.solve_for("z");
/// assert_eq!(roots.len(), 1);
/// ```
pub mod symbolic_solve;
/// bracket helpers for the parser
pub mod utils;
