//! # Evaluation engine
//!
//! Pure functions from expression text (plus explicit variable bindings) to numbers:
//! graphs `y = f(x)` on a line, surfaces `z = f(x, y)` on a square grid, single values
//! and implicit equations solved for one variable. The engine holds nothing but its
//! [`CalcConfig`]; every call parses the text again and regenerates its domain.
//!
//! Symbols that are neither an axis nor explicitly bound are given
//! `config.default_value` (1.0 unless configured otherwise).
use crate::calculator::config::CalcConfig;
use crate::calculator::errors::CalcError;
use crate::calculator::grid::{linspace, sanitize_line, sanitize_surface, value_limits};
use crate::calculator::variables::Bindings;
use crate::symbolic::preprocess::{normalize, substitute_bindings_textually, to_power_syntax};
use crate::symbolic::symbolic_engine::Expr;
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};
use strum_macros::Display;

/// Grid size of a surface evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Resolution {
    /// static render, 150x150 by default
    #[strum(to_string = "rendering")]
    Render,
    /// rotating view, 100x100 by default
    #[strum(to_string = "animation")]
    Animate,
}

/// Sampled graph of a one-variable expression. Non-finite samples are NaN.
#[derive(Debug, Clone)]
pub struct Graph2D {
    pub xs: DVector<f64>,
    pub ys: DVector<f64>,
    /// expression text that was actually evaluated
    pub expression: String,
    /// symbols that received the default value
    pub defaulted: Vec<String>,
}

/// Sampled surface `z[(i, j)] = f(xs[j], ys[i])`, sanitized and clamped.
#[derive(Debug, Clone)]
pub struct Surface {
    pub xs: DVector<f64>,
    pub ys: DVector<f64>,
    pub z: DMatrix<f64>,
    pub expression: String,
    pub defaulted: Vec<String>,
}

impl Surface {
    /// Vertical plot range: (min, max) of z, or (-5, 5) for flat or empty surfaces.
    pub fn z_limits(&self) -> (f64, f64) {
        value_limits(self.z.iter(), (-5.0, 5.0))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MathEngine {
    pub config: CalcConfig,
}

impl MathEngine {
    pub fn new(config: CalcConfig) -> Self {
        MathEngine { config }
    }

    fn resolution_points(&self, resolution: Resolution) -> usize {
        match resolution {
            Resolution::Render => self.config.render_points,
            Resolution::Animate => self.config.animate_points,
        }
    }

    /// Samples an expression already in power syntax over the graph domain.
    ///
    /// Symbols other than `x` get the default value.
    pub fn evaluate_graph(&self, expression: &str) -> Result<Graph2D, CalcError> {
        let text = to_power_syntax(expression);
        let parsed = Expr::parse_expression(&text)?;
        let (bound, defaulted) = parsed.default_free_symbols(&["x"], self.config.default_value);
        if !defaulted.is_empty() {
            info!(
                "graph of '{}': {} set to {}",
                text,
                defaulted.join(", "),
                self.config.default_value
            );
        }
        let f = bound.lambdify1D("x")?;
        let xs = linspace(self.config.graph_start, self.config.graph_end, self.config.graph_points);
        let mut ys = xs.map(|x| f(x));
        sanitize_line(&mut ys);
        debug!(
            "graph of '{}': {} points, {} gaps",
            text,
            ys.len(),
            ys.iter().filter(|y| y.is_nan()).count()
        );
        Ok(Graph2D {
            xs,
            ys,
            expression: text,
            defaulted,
        })
    }

    /// Graph of `expression` with `bindings` substituted into the text first:
    /// `A*cos(x)` with `A = 2` is evaluated as `2.0*cos(x)`.
    pub fn evaluate_1d(&self, expression: &str, bindings: &Bindings) -> Result<Graph2D, CalcError> {
        let text = substitute_bindings_textually(&to_power_syntax(expression), bindings)?;
        self.evaluate_graph(&text)
    }

    /// Value of a calculator-style expression at one `x`.
    pub fn evaluate_scalar(&self, expression: &str, x: f64) -> Result<f64, CalcError> {
        let text = normalize(expression);
        let parsed = Expr::parse_expression(&text)
            .map_err(|e| CalcError::EvaluationError(format!("Parsing Error: {}", e)))?;
        let (bound, defaulted) = parsed.default_free_symbols(&["x"], self.config.default_value);
        if !defaulted.is_empty() {
            info!("'{}' at x = {}: {} set to {}", text, x, defaulted.join(", "), self.config.default_value);
        }
        let f = bound.lambdify1D("x")?;
        let value = f(x);
        if !value.is_finite() {
            return Err(CalcError::EvaluationError(format!(
                "'{}' is undefined at x = {} (got {})",
                text, x, value
            )));
        }
        Ok(value)
    }

    /// Surface of `expression` over the square surface domain.
    ///
    /// Bindings named `x` or `y` are ignored, the axes always vary. Symbols other than
    /// `x`, `y`, `z` get the default value; a `z` left in the expression is an error.
    pub fn evaluate_2d(
        &self,
        expression: &str,
        bindings: &Bindings,
        resolution: Resolution,
    ) -> Result<Surface, CalcError> {
        let text = to_power_syntax(expression);
        let parsed = Expr::parse_expression(&text)?;
        let explicit: Bindings = bindings
            .iter()
            .filter(|(name, _)| !matches!(name.as_str(), "x" | "y"))
            .map(|(name, value)| (name.clone(), *value))
            .collect();
        let substituted = parsed.set_variable_from_map(&explicit);
        let (bound, defaulted) =
            substituted.default_free_symbols(&["x", "y", "z"], self.config.default_value);
        if bound.contains_variable("z") {
            return Err(CalcError::EvaluationError(format!(
                "'{}' still depends on z; solve it for z first",
                text
            )));
        }
        let f = bound.lambdify(&["x", "y"])?;

        let n = self.resolution_points(resolution);
        let xs = linspace(self.config.surface_start, self.config.surface_end, n);
        let ys = xs.clone();
        let mut z = DMatrix::from_fn(n, n, |i, j| f(&[xs[j], ys[i]]));
        let non_finite = z.iter().filter(|v| !v.is_finite()).count();
        if non_finite > 0 {
            warn!("surface of '{}': {} non-finite values replaced by 0", text, non_finite);
        }
        sanitize_surface(&mut z, self.config.clamp);
        info!("surface of '{}' evaluated on a {}x{} grid for {}", text, n, n, resolution);
        Ok(Surface {
            xs,
            ys,
            z,
            expression: text,
            defaulted,
        })
    }

    /// Solves `lhs = rhs` for `target` and returns the first root as text.
    ///
    /// Text without `=` is returned unchanged. Both sides are normalized, so
    /// calculator-style input such as `2z = x^2` is accepted. When several roots exist,
    /// the first one in the solver's order is returned (for quadratics the smaller root).
    pub fn solve_implicit(&self, expression: &str, target: &str) -> Result<String, CalcError> {
        let Some((lhs_text, rhs_text)) = expression.split_once('=') else {
            return Ok(expression.to_string());
        };
        let lhs = Expr::parse_expression(&normalize(lhs_text))?;
        let rhs = Expr::parse_expression(&normalize(rhs_text))?;
        let roots = (lhs - rhs).solve_for(target);
        debug!("'{}' solved for {}: {} root(s)", expression, target, roots.len());
        match roots.first() {
            Some(root) => {
                if roots.len() > 1 {
                    info!("'{}' has {} roots for {}, using {}", expression, roots.len(), target, root);
                }
                Ok(root.to_string())
            }
            None => Err(CalcError::NoSolution(format!(
                "Could not solve the equation for {}. It might be too complex or not contain {}.",
                target, target
            ))),
        }
    }

    /// Numeric value of `expression` with every symbol bound explicitly.
    pub fn multi_variable_evaluate(&self, expression: &str, bindings: &Bindings) -> Result<f64, CalcError> {
        let text = to_power_syntax(expression);
        let parsed = Expr::parse_expression(&text)?;
        let substituted = parsed.set_variable_from_map(bindings);
        let unbound = substituted.all_arguments_are_variables();
        if !unbound.is_empty() {
            return Err(CalcError::EvaluationError(format!(
                "Cannot evaluate expression: unbound symbols {}",
                unbound.join(", ")
            )));
        }
        let value = substituted.eval_expression(&[], &[])?;
        if !value.is_finite() {
            return Err(CalcError::EvaluationError(format!(
                "Cannot evaluate expression: result is {}",
                value
            )));
        }
        Ok(value)
    }
}
