use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;
use thiserror::Error;

/// Compiled numeric function: argument values are passed in the order of the
/// variable names given to [`Expr::lambdify`].
pub type CompiledFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LambdifyError {
    #[error("unbound symbols: {}", .0.join(", "))]
    UnboundSymbols(Vec<String>),
}

impl Expr {
    /// LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions

    /// Converts a symbolic expression into a thread-safe closure of the given variables.
    ///
    /// Every free symbol of the expression must be listed in `vars`, otherwise the
    /// unbound names are reported instead of panicking at call time.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse_expression("x*y + 1")?.lambdify(&["x", "y"])?;
    /// assert_eq!(f(&[2.0, 3.0]), 7.0);
    /// ```
    pub fn lambdify(&self, vars: &[&str]) -> Result<CompiledFn, LambdifyError> {
        let unbound = self.free_symbols_except(vars);
        if !unbound.is_empty() {
            return Err(LambdifyError::UnboundSymbols(unbound));
        }
        Ok(self.compile(vars))
    }

    /// Single-argument shortcut over [`Expr::lambdify`].
    pub fn lambdify1D(&self, var: &str) -> Result<Box<dyn Fn(f64) -> f64 + Send + Sync>, LambdifyError> {
        let compiled_func = self.lambdify(&[var])?;
        Ok(Box::new(move |x| compiled_func(&[x])))
    }

    /// Evaluates the expression once for the given variable values.
    pub fn eval_expression(&self, vars: &[&str], values: &[f64]) -> Result<f64, LambdifyError> {
        let f = self.lambdify(vars)?;
        Ok(f(values))
    }

    // all symbols are known to be in `vars` here
    fn compile(&self, vars: &[&str]) -> CompiledFn {
        match self {
            // `lambdify` rejects unbound symbols before compiling, so the lookup
            // only misses if that check is bypassed; NaN then marks the value undefined
            Expr::Var(name) => match vars.iter().position(|&v| v == name) {
                Some(index) => Box::new(move |args| args[index]),
                None => {
                    debug_assert!(false, "symbol '{}' is not bound", name);
                    Box::new(|_| f64::NAN)
                }
            },
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.compile(vars);
                let rhs_fn = rhs.compile(vars);
                Box::new(move |args| lhs_fn(args) + rhs_fn(args))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.compile(vars);
                let rhs_fn = rhs.compile(vars);
                Box::new(move |args| lhs_fn(args) - rhs_fn(args))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.compile(vars);
                let rhs_fn = rhs.compile(vars);
                Box::new(move |args| lhs_fn(args) * rhs_fn(args))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.compile(vars);
                let rhs_fn = rhs.compile(vars);
                Box::new(move |args| lhs_fn(args) / rhs_fn(args))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.compile(vars);
                match exp.as_ref() {
                    Expr::Const(n) if n.fract() == 0.0 && n.abs() <= i32::MAX as f64 => {
                        let n = *n as i32;
                        Box::new(move |args| base_fn(args).powi(n))
                    }
                    _ => {
                        let exp_fn = exp.compile(vars);
                        Box::new(move |args| base_fn(args).powf(exp_fn(args)))
                    }
                }
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.compile(vars);
                Box::new(move |args| expr_fn(args).exp())
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.compile(vars);
                Box::new(move |args| expr_fn(args).ln())
            }
            Expr::sin(expr) => {
                let expr_fn = expr.compile(vars);
                Box::new(move |args| expr_fn(args).sin())
            }
            Expr::cos(expr) => {
                let expr_fn = expr.compile(vars);
                Box::new(move |args| expr_fn(args).cos())
            }
            Expr::tg(expr) => {
                let expr_fn = expr.compile(vars);
                Box::new(move |args| expr_fn(args).tan())
            }
            Expr::ctg(expr) => {
                let expr_fn = expr.compile(vars);
                Box::new(move |args| 1.0 / expr_fn(args).tan())
            }
            Expr::arcsin(expr) => {
                let expr_fn = expr.compile(vars);
                Box::new(move |args| expr_fn(args).asin())
            }
            Expr::arccos(expr) => {
                let expr_fn = expr.compile(vars);
                Box::new(move |args| expr_fn(args).acos())
            }
            Expr::arctg(expr) => {
                let expr_fn = expr.compile(vars);
                Box::new(move |args| expr_fn(args).atan())
            }
            Expr::arcctg(expr) => {
                let expr_fn = expr.compile(vars);
                Box::new(move |args| PI / 2.0 - expr_fn(args).atan())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lambdify_two_variables() {
        let expr = Expr::parse_expression("x**2 + y/2").unwrap();
        let f = expr.lambdify(&["x", "y"]).unwrap();
        assert_relative_eq!(f(&[3.0, 4.0]), 11.0);
        // argument order follows the names passed in
        let g = expr.lambdify(&["y", "x"]).unwrap();
        assert_relative_eq!(g(&[4.0, 3.0]), 11.0);
    }

    #[test]
    fn test_lambdify_reports_unbound_symbols() {
        let expr = Expr::parse_expression("A*x + B").unwrap();
        let err = expr.lambdify(&["x"]).err().unwrap();
        assert_eq!(err, LambdifyError::UnboundSymbols(vec!["A".to_string(), "B".to_string()]));
        assert_eq!(err.to_string(), "unbound symbols: A, B");
    }

    #[test]
    fn test_lambdify_binds_by_name_never_by_first_slot() {
        let expr = Expr::parse_expression("y").unwrap();
        let f = expr.lambdify(&["x", "y"]).unwrap();
        assert_relative_eq!(f(&[1.0, 7.0]), 7.0);
        assert_eq!(
            expr.lambdify(&["x"]).err(),
            Some(LambdifyError::UnboundSymbols(vec!["y".to_string()]))
        );
    }

    #[test]
    fn test_lambdify1D() {
        let f = Expr::parse_expression("sin(x)").unwrap().lambdify1D("x").unwrap();
        assert_relative_eq!(f(PI / 2.0), 1.0);
    }

    #[test]
    fn test_inverse_cotangent_and_cotangent() {
        let f = Expr::parse_expression("arcctg(x)").unwrap().lambdify1D("x").unwrap();
        assert_relative_eq!(f(1.0), PI / 4.0, epsilon = 1e-12);
        let g = Expr::parse_expression("ctg(x)").unwrap().lambdify1D("x").unwrap();
        assert_relative_eq!(g(PI / 4.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_results_pass_through() {
        let f = Expr::parse_expression("1/x").unwrap().lambdify1D("x").unwrap();
        assert!(f(0.0).is_infinite());
        let g = Expr::parse_expression("ln(x)").unwrap().lambdify1D("x").unwrap();
        assert!(g(-1.0).is_nan());
        let h = Expr::parse_expression("x**0.5").unwrap().lambdify1D("x").unwrap();
        assert!(h(-4.0).is_nan());
    }

    #[test]
    fn test_eval_expression() {
        let expr = Expr::parse_expression("exp(x) - 1").unwrap();
        assert_relative_eq!(expr.eval_expression(&["x"], &[0.0]).unwrap(), 0.0);
    }
}
