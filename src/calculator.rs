//! # Calculator
//!
//! Everything between the text a user types and the numbers a plot needs:
//! variable assignment lists, the evaluation engine (graphs, surfaces, single values,
//! implicit equations), the command controller that turns button presses into plots and
//! messages, and the rotation animation of rendered surfaces.
//!
//! ```
//! use RustedGraphCalc::calculator::controller::{Command, Controller, PlotState};
//! let mut calc = Controller::default();
//! calc.expression = "A*x^2".to_string();
//! calc.variables = "A=2".to_string();
//! assert!(calc.dispatch(Command::Graph2D).is_empty());
//! assert!(matches!(calc.plot(), PlotState::Graph { .. }));
//! ```
/// rotation of a rendered surface: Idle/Animating state machine and frame scheduling
pub mod animation;
/// numeric domains, resolutions and defaults, optionally read from a task document
pub mod config;
/// command dispatch: input texts, plot state, user-facing outcomes
pub mod controller;
/// pure evaluation of expressions on lines, grids and single points
pub mod engine;
pub mod errors;
/// sampling domains and non-finite sanitization
pub mod grid;
/// parsing of `A=5.5, k=10` assignment lists
pub mod variables;

mod controller_tests;
