//! # Symbolic Expression Simplification Module
//!
//! Light algebraic cleanup of expression trees, used mainly to make solved
//! equations readable before they are printed and evaluated again.
//!
//! 1. **Constant Folding**: operations and functions whose arguments are all constants
//! 2. **Algebraic Identities**: x + 0 = x, x * 1 = x, x ^ 0 = 1, x - x = 0 ...
//! 3. **Constant Collection**: 2 * (3 * x) = 6 * x
//!
//! Folding never produces a non-finite constant: `1/0` or `ln(0)` stay symbolic so
//! that the evaluator reports them at the point where they occur.

use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

fn finite_const(val: f64, fallback: Expr) -> Expr {
    if val.is_finite() {
        Expr::Const(val)
    } else {
        fallback
    }
}

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplifies the expression bottom-up.
    ///
    /// ## Examples
    ///
    /// - `2 + 3` → `5`
    /// - `0 * (x + y)` → `0`
    /// - `(x ^ 1) * 1` → `x`
    /// - `2 * (3 * x)` → `6 * x`
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    (Expr::Const(a), _) if *a == 0.0 => rhs,
                    (_, Expr::Const(b)) if *b == 0.0 => lhs,
                    _ => Expr::Add(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (_, Expr::Const(b)) if *b == 0.0 => lhs,
                    (Expr::Const(a), _) if *a == 0.0 => (-rhs).simplify_(),
                    _ if lhs == rhs => Expr::Const(0.0),
                    _ => Expr::Sub(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    (Expr::Const(a), _) | (_, Expr::Const(a)) if *a == 0.0 => Expr::Const(0.0),
                    (Expr::Const(a), _) if *a == 1.0 => rhs,
                    (_, Expr::Const(b)) if *b == 1.0 => lhs,
                    // collect nested constants: a * (b * x) = (a*b) * x
                    (Expr::Const(a), Expr::Mul(inner_l, inner_r)) => match inner_l.as_ref() {
                        Expr::Const(b) => Expr::Mul(Box::new(Expr::Const(a * b)), inner_r.clone()).simplify_(),
                        _ => Expr::Mul(lhs.boxed(), rhs.boxed()),
                    },
                    (_, Expr::Const(b)) => Expr::Mul(Box::new(Expr::Const(*b)), lhs.boxed()).simplify_(),
                    _ => Expr::Mul(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (_, Expr::Const(b)) if *b == 0.0 => Expr::Div(lhs.boxed(), rhs.boxed()),
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a / b),
                    (Expr::Const(a), _) if *a == 0.0 => Expr::Const(0.0),
                    (_, Expr::Const(b)) if *b == 1.0 => lhs,
                    _ if lhs == rhs => Expr::Const(1.0),
                    _ => Expr::Div(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_();
                let exp = exp.simplify_();
                let unfolded = Expr::Pow(base.clone().boxed(), exp.clone().boxed());
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) => finite_const(a.powf(*b), unfolded),
                    (_, Expr::Const(b)) if *b == 0.0 => Expr::Const(1.0),
                    (_, Expr::Const(b)) if *b == 1.0 => base,
                    (Expr::Const(a), _) if *a == 1.0 => Expr::Const(1.0),
                    _ => unfolded,
                }
            }
            _ => {
                let simplified = self.map_children(&|child| child.simplify_());
                let const_arg = simplified.children().first().and_then(|arg| arg.as_const());
                match const_arg {
                    Some(arg) => {
                        let value = match &simplified {
                            Expr::Exp(_) => arg.exp(),
                            Expr::Ln(_) => arg.ln(),
                            Expr::sin(_) => arg.sin(),
                            Expr::cos(_) => arg.cos(),
                            Expr::tg(_) => arg.tan(),
                            Expr::ctg(_) => 1.0 / arg.tan(),
                            Expr::arcsin(_) => arg.asin(),
                            Expr::arccos(_) => arg.acos(),
                            Expr::arctg(_) => arg.atan(),
                            Expr::arcctg(_) => PI / 2.0 - arg.atan(),
                            _ => f64::NAN,
                        };
                        finite_const(value, simplified)
                    }
                    None => simplified,
                }
            }
        }
    }
}
