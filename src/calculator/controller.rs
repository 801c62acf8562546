//! # Calculator controller
//!
//! Owns what a calculator window would own: the three input texts, the current plot and
//! the rotation animation. Each [`Command`] is turned into zero or more [`Outcome`]s,
//! the toolkit-free equivalent of info, warning and error dialogs. No error escapes
//! [`Controller::dispatch`].
//!
//! Plot clearing differs per command and is kept that way: `Graph2D` and `Animate3D`
//! clear the plot before evaluating, `Render3D` only after the implicit equation (if any)
//! was solved, so a failed solve leaves the previous plot in place.
use crate::calculator::animation::{Animation, Frame};
use crate::calculator::config::CalcConfig;
use crate::calculator::engine::{Graph2D, MathEngine, Resolution, Surface};
use crate::calculator::errors::CalcError;
use crate::calculator::variables::{Bindings, describe_bindings, parse_variables};
use crate::symbolic::preprocess::normalize;
use itertools::Itertools;
use log::{error, info, warn};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Outcome {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        info!("{}: {}", title, message);
        Outcome {
            severity: Severity::Info,
            title: title.to_string(),
            message,
        }
    }

    pub fn warning(title: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("{}: {}", title, message);
        Outcome {
            severity: Severity::Warning,
            title: title.to_string(),
            message,
        }
    }

    /// Missing input becomes a warning, every other failure an error.
    pub fn from_error(title: &str, err: &CalcError) -> Self {
        if err.is_missing_input() {
            Outcome::warning(title, err.to_string())
        } else {
            Outcome::error(title, err.to_string())
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        error!("{}: {}", title, message);
        Outcome {
            severity: Severity::Error,
            title: title.to_string(),
            message,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum PlotState {
    #[default]
    Empty,
    Graph { graph: Graph2D, label: String },
    Surface { surface: Surface, title: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// keypad button: digits, operators, `sin`/`cos`/`tan`, or `=`
    Insert(String),
    Graph2D,
    CalculateX,
    CalculateMultiVar,
    Render3D,
    Animate3D,
    StopAnimation,
}

#[derive(Debug, Clone, Default)]
pub struct Controller {
    engine: MathEngine,
    pub expression: String,
    pub variables: String,
    pub x_value: String,
    plot: PlotState,
    animation: Animation,
}

impl Controller {
    pub fn new(config: CalcConfig) -> Self {
        let animation = Animation::new(config.step_degrees, config.elevation, config.frame_interval());
        Controller {
            engine: MathEngine::new(config),
            expression: String::new(),
            variables: String::new(),
            x_value: String::new(),
            plot: PlotState::Empty,
            animation,
        }
    }

    pub fn engine(&self) -> &MathEngine {
        &self.engine
    }

    pub fn plot(&self) -> &PlotState {
        &self.plot
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    /// Next frame of the rotating surface, `None` when no animation runs.
    pub fn tick(&mut self) -> Option<Frame> {
        self.animation.tick()
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<Outcome> {
        info!("command {:?}", command);
        match command {
            Command::Insert(token) => self.on_insert(&token),
            Command::Graph2D => self.on_graph(),
            Command::CalculateX => self.on_calc_value(),
            Command::CalculateMultiVar => self.on_multi_variable(),
            Command::Render3D => self.on_render_3d(),
            Command::Animate3D => self.on_animate_3d(),
            Command::StopAnimation => {
                self.animation.stop();
                Vec::new()
            }
        }
    }

    fn reset_before_new_graph(&mut self) {
        self.animation.stop();
        self.plot = PlotState::Empty;
    }

    fn missing_input(message: &str) -> Vec<Outcome> {
        vec![Outcome::from_error("Warning", &CalcError::MissingInput(message.to_string()))]
    }

    fn parse_bindings(&self) -> Result<Bindings, Vec<Outcome>> {
        parse_variables(&self.variables).map_err(|e| vec![Outcome::from_error("Variable Error", &e)])
    }

    fn defaults_notice(&self, defaulted: &[String], purpose: Resolution) -> Option<Outcome> {
        if defaulted.is_empty() {
            return None;
        }
        let value = self.engine.config.default_value;
        let assigned = defaulted
            .iter()
            .map(|name| format!("{}={:?}", name, value))
            .join(", ");
        Some(Outcome::info(
            "Variable Defaults",
            format!("Assigning default value of {:?} to: {} for {}.", value, assigned, purpose),
        ))
    }

    fn on_insert(&mut self, token: &str) -> Vec<Outcome> {
        if token == "=" {
            return self.on_calc_value();
        }
        self.expression.push_str(token);
        if matches!(token, "sin" | "cos" | "tan") {
            self.expression.push('(');
        }
        Vec::new()
    }

    fn on_graph(&mut self) -> Vec<Outcome> {
        if self.expression.trim().is_empty() {
            return Self::missing_input("Enter expression first.");
        }
        self.reset_before_new_graph();
        let bindings = match self.parse_bindings() {
            Ok(bindings) => bindings,
            Err(outcomes) => return outcomes,
        };
        match self.engine.evaluate_1d(&self.expression, &bindings) {
            Ok(graph) => {
                let label = format!("f(x) = {}", self.expression);
                self.plot = PlotState::Graph { graph, label };
                Vec::new()
            }
            Err(e) => vec![Outcome::error(
                "Error",
                format!("Invalid expression or plotting issue: {}", e),
            )],
        }
    }

    fn on_calc_value(&mut self) -> Vec<Outcome> {
        let x_text = self.x_value.trim().to_string();
        if self.expression.trim().is_empty() || x_text.is_empty() {
            return Self::missing_input("Enter expression and x value.");
        }
        let result = x_text
            .parse::<f64>()
            .map_err(|_| CalcError::EvaluationError(format!("could not convert string to float: '{}'", x_text)))
            .and_then(|x| self.engine.evaluate_scalar(&self.expression, x));
        match result {
            Ok(value) => vec![Outcome::info("Result", format!("f({}) = {:?}", x_text, value))],
            Err(e) => vec![Outcome::error("Error", format!("Cannot compute value:\n{}", e))],
        }
    }

    fn on_multi_variable(&mut self) -> Vec<Outcome> {
        if self.expression.is_empty() {
            return vec![Outcome::error("Input Error", "Enter an expression.")];
        }
        let bindings = match self.parse_bindings() {
            Ok(bindings) => bindings,
            Err(outcomes) => return outcomes,
        };
        match self.engine.multi_variable_evaluate(&self.expression, &bindings) {
            Ok(value) if bindings.is_empty() => vec![Outcome::info("Result", format!("f = {:?}", value))],
            Ok(value) => vec![Outcome::info(
                "Result",
                format!("f({}) = {:?}", describe_bindings(&bindings), value),
            )],
            Err(e) => vec![Outcome::error("Calculation Error", e.to_string())],
        }
    }

    fn on_render_3d(&mut self) -> Vec<Outcome> {
        let expression = self.expression.trim().to_string();
        if expression.is_empty() {
            return Self::missing_input("Enter expression first.");
        }
        let bindings = match self.parse_bindings() {
            Ok(bindings) => bindings,
            Err(outcomes) => return outcomes,
        };
        let mut outcomes = Vec::new();
        let preprocessed = normalize(&expression);
        let explicit = if preprocessed.contains('=') {
            match self.engine.solve_implicit(&preprocessed, "z") {
                Ok(solved) => {
                    outcomes.push(Outcome::info(
                        "Auto-Solved",
                        format!("Implicit equation solved for z.\nPlotting: z = {}", solved),
                    ));
                    solved
                }
                Err(CalcError::ParseError(e)) => {
                    outcomes.push(Outcome::error(
                        "Solve Error",
                        format!("Could not parse equation terms: {}", e),
                    ));
                    return outcomes;
                }
                Err(e) => {
                    outcomes.push(Outcome::error("Solve Error", e.to_string()));
                    return outcomes;
                }
            }
        } else {
            preprocessed
        };

        self.reset_before_new_graph();
        match self.engine.evaluate_2d(&explicit, &bindings, Resolution::Render) {
            Ok(surface) => {
                outcomes.extend(self.defaults_notice(&surface.defaulted, Resolution::Render));
                let title = format!("3D Render: {}", explicit);
                self.plot = PlotState::Surface { surface, title };
            }
            Err(e) => outcomes.push(Outcome::error("3D Render Error", format!("Invalid expression: {}", e))),
        }
        outcomes
    }

    fn on_animate_3d(&mut self) -> Vec<Outcome> {
        let expression = self.expression.trim().to_string();
        if expression.is_empty() {
            return Self::missing_input("Enter 3D expression (f(x, y)) first.");
        }
        if expression.contains('=') {
            return vec![Outcome::warning(
                "Invalid Input",
                "3D Animation does not support implicit equations.",
            )];
        }
        self.reset_before_new_graph();
        let bindings = match self.parse_bindings() {
            Ok(bindings) => bindings,
            Err(outcomes) => return outcomes,
        };
        match self.engine.evaluate_2d(&expression, &bindings, Resolution::Animate) {
            Ok(surface) => {
                let outcomes = self.defaults_notice(&surface.defaulted, Resolution::Animate).into_iter().collect();
                let title = format!("3D Rotation: {}", expression);
                self.plot = PlotState::Surface { surface, title };
                self.animation.start();
                outcomes
            }
            Err(e) => vec![Outcome::error("Error", format!("Invalid expression: {}", e))],
        }
    }
}
