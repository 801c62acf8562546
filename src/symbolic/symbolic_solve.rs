//! # Equation solving
//!
//! Solves `expr = 0` for one variable symbolically. Two strategies are tried in order:
//!
//! 1. **Polynomial**: if the expression is a polynomial in the variable (coefficients may be
//!    arbitrary expressions of other symbols), degree 1 and 2 are solved in closed form.
//!    Quadratics return the negative square-root branch first.
//! 2. **Isolation**: if the variable occurs exactly once, the operations wrapping it are
//!    inverted one by one (inverse functions use their principal branches).
//!
//! Only real roots are produced; anything else yields an empty list.

use crate::symbolic::symbolic_engine::Expr;

const MAX_POLY_DEGREE: usize = 4;

fn trim_coeffs(mut coeffs: Vec<Expr>) -> Vec<Expr> {
    while coeffs.len() > 1 && coeffs.last().is_some_and(Expr::is_zero) {
        coeffs.pop();
    }
    coeffs
}

fn add_coeffs(a: &[Expr], b: &[Expr], subtract: bool) -> Vec<Expr> {
    let zero = Expr::Const(0.0);
    let n = a.len().max(b.len());
    let coeffs = (0..n)
        .map(|i| {
            let ai = a.get(i).unwrap_or(&zero).clone();
            let bi = b.get(i).unwrap_or(&zero).clone();
            if subtract {
                (ai - bi).simplify_()
            } else {
                (ai + bi).simplify_()
            }
        })
        .collect();
    trim_coeffs(coeffs)
}

fn mul_coeffs(a: &[Expr], b: &[Expr]) -> Option<Vec<Expr>> {
    let n = a.len() + b.len() - 1;
    if n - 1 > MAX_POLY_DEGREE {
        return None;
    }
    let mut coeffs = vec![Expr::Const(0.0); n];
    for (i, ai) in a.iter().enumerate() {
        for (j, bj) in b.iter().enumerate() {
            let term = (ai.clone() * bj.clone()).simplify_();
            coeffs[i + j] = (coeffs[i + j].clone() + term).simplify_();
        }
    }
    Some(trim_coeffs(coeffs))
}

impl Expr {
    /// Coefficients of the expression as a polynomial in `var`, lowest power first.
    /// `None` when the expression is not polynomial in `var` or its degree exceeds 4.
    pub fn poly_coeffs(&self, var: &str) -> Option<Vec<Expr>> {
        if !self.contains_variable(var) {
            return Some(vec![self.clone()]);
        }
        match self {
            Expr::Var(_) => Some(vec![Expr::Const(0.0), Expr::Const(1.0)]),
            Expr::Add(lhs, rhs) => Some(add_coeffs(&lhs.poly_coeffs(var)?, &rhs.poly_coeffs(var)?, false)),
            Expr::Sub(lhs, rhs) => Some(add_coeffs(&lhs.poly_coeffs(var)?, &rhs.poly_coeffs(var)?, true)),
            Expr::Mul(lhs, rhs) => mul_coeffs(&lhs.poly_coeffs(var)?, &rhs.poly_coeffs(var)?),
            Expr::Div(num, den) if !den.contains_variable(var) => {
                let coeffs = num
                    .poly_coeffs(var)?
                    .into_iter()
                    .map(|c| (c / den.as_ref().clone()).simplify_())
                    .collect();
                Some(trim_coeffs(coeffs))
            }
            Expr::Pow(base, exp) if !exp.contains_variable(var) => {
                let n = exp.as_const()?;
                if n < 0.0 || n.fract() != 0.0 || n > MAX_POLY_DEGREE as f64 {
                    return None;
                }
                let base_coeffs = base.poly_coeffs(var)?;
                let mut acc = vec![Expr::Const(1.0)];
                for _ in 0..n as usize {
                    acc = mul_coeffs(&acc, &base_coeffs)?;
                }
                Some(acc)
            }
            _ => None,
        }
    }

    /// Solutions of `self = 0` for `var`. Empty when `var` does not occur or
    /// no real closed-form solution is found.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let eq = Expr::parse_expression("z**2 - 4")?;
    /// let roots = eq.solve_for("z"); // [-2, 2]
    /// ```
    pub fn solve_for(&self, var: &str) -> Vec<Expr> {
        if !self.contains_variable(var) {
            return Vec::new();
        }
        if let Some(coeffs) = self.poly_coeffs(var) {
            match coeffs.len() {
                1 => return Vec::new(),
                2 => return vec![(-coeffs[0].clone() / coeffs[1].clone()).simplify_()],
                3 => return solve_quadratic(&coeffs[2], &coeffs[1], &coeffs[0]),
                _ => {}
            }
        }
        if self.count_variable(var) == 1 {
            return isolate(self, Expr::Const(0.0), var).unwrap_or_default();
        }
        Vec::new()
    }
}

/// Roots of `a*v^2 + b*v + c`, the smaller one first when `a` is a number.
fn solve_quadratic(a: &Expr, b: &Expr, c: &Expr) -> Vec<Expr> {
    // with a < 0 the (-b - sqrt)/2a branch would be the larger root
    if a.as_const().is_some_and(|value| value < 0.0) {
        let negated = |e: &Expr| (-e.clone()).simplify_();
        return solve_quadratic(&negated(a), &negated(b), &negated(c));
    }
    let disc = (b.clone().pow(Expr::Const(2.0)) - Expr::Const(4.0) * a.clone() * c.clone()).simplify_();
    let neg_b = (-b.clone()).simplify_();
    let two_a = (Expr::Const(2.0) * a.clone()).simplify_();
    match disc.as_const() {
        Some(d) if d < 0.0 => Vec::new(),
        Some(d) if d == 0.0 => vec![(neg_b / two_a).simplify_()],
        _ => {
            let sqrt_d = disc.sqrt().simplify_();
            vec![
                ((neg_b.clone() - sqrt_d.clone()) / two_a.clone()).simplify_(),
                ((neg_b + sqrt_d) / two_a).simplify_(),
            ]
        }
    }
}

/// Real `n`-th root of `value` for an odd integer `n`, negative for a negative value.
/// `powf` alone gives NaN there. Symbolically it is `v / (v^2)^((m-1)/(2m))`, `m = |n|`,
/// which is undefined only at `v = 0`.
fn odd_root(value: Expr, n: f64) -> Expr {
    let m = n.abs();
    let value = value.simplify_();
    let root = match value.as_const() {
        Some(v) => Expr::Const(v.signum() * v.abs().powf(1.0 / m)),
        None => {
            let magnitude = value.clone().pow(Expr::Const(2.0)).pow(Expr::Const((m - 1.0) / (2.0 * m)));
            value / magnitude
        }
    };
    if n < 0.0 { Expr::Const(1.0) / root } else { root }
}

/// Inverts the operations around the single occurrence of `var` in `lhs = rhs`.
fn isolate(lhs: &Expr, rhs: Expr, var: &str) -> Option<Vec<Expr>> {
    match lhs {
        Expr::Var(name) if name == var => Some(vec![rhs.simplify_()]),
        Expr::Add(a, b) => {
            if a.contains_variable(var) {
                isolate(a, rhs - b.as_ref().clone(), var)
            } else {
                isolate(b, rhs - a.as_ref().clone(), var)
            }
        }
        Expr::Sub(a, b) => {
            if a.contains_variable(var) {
                isolate(a, rhs + b.as_ref().clone(), var)
            } else {
                isolate(b, a.as_ref().clone() - rhs, var)
            }
        }
        Expr::Mul(a, b) => {
            let (inner, factor) = if a.contains_variable(var) { (a, b) } else { (b, a) };
            if factor.simplify_().is_zero() {
                return None;
            }
            isolate(inner, rhs / factor.as_ref().clone(), var)
        }
        Expr::Div(a, b) => {
            if a.contains_variable(var) {
                isolate(a, rhs * b.as_ref().clone(), var)
            } else {
                isolate(b, a.as_ref().clone() / rhs, var)
            }
        }
        Expr::Pow(base, exp) => {
            if base.contains_variable(var) {
                let integer_exp = exp.simplify_().as_const().filter(|n| n.fract() == 0.0 && *n != 0.0);
                match integer_exp {
                    Some(n) if n % 2.0 == 0.0 => {
                        let root = rhs.pow(Expr::Const(1.0 / n));
                        let mut roots = isolate(base, -root.clone(), var)?;
                        roots.extend(isolate(base, root, var)?);
                        Some(roots)
                    }
                    Some(n) if n.abs() > 1.0 => isolate(base, odd_root(rhs, n), var),
                    _ => isolate(base, rhs.pow(Expr::Const(1.0) / exp.as_ref().clone()), var),
                }
            } else {
                isolate(exp, rhs.ln() / base.as_ref().clone().ln(), var)
            }
        }
        Expr::Exp(u) => isolate(u, rhs.ln(), var),
        Expr::Ln(u) => isolate(u, rhs.exp(), var),
        Expr::sin(u) => isolate(u, Expr::arcsin(rhs.boxed()), var),
        Expr::cos(u) => isolate(u, Expr::arccos(rhs.boxed()), var),
        Expr::tg(u) => isolate(u, Expr::arctg(rhs.boxed()), var),
        Expr::ctg(u) => isolate(u, Expr::arcctg(rhs.boxed()), var),
        Expr::arcsin(u) => isolate(u, Expr::sin(rhs.boxed()), var),
        Expr::arccos(u) => isolate(u, Expr::cos(rhs.boxed()), var),
        Expr::arctg(u) => isolate(u, Expr::tg(rhs.boxed()), var),
        Expr::arcctg(u) => isolate(u, Expr::ctg(rhs.boxed()), var),
        _ => None,
    }
}
