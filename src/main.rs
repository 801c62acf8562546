#![allow(non_snake_case)]
use RustedGraphCalc::Utils::logger::{init_logger, save_graph_to_csv, save_surface_to_csv, timestamped_log_name};
use RustedGraphCalc::Utils::plots::{draw_graph_png, draw_surface_png, render_rotation};
use RustedGraphCalc::calculator::animation::SleepScheduler;
use RustedGraphCalc::calculator::config::CalcConfig;
use RustedGraphCalc::calculator::controller::{Command, Controller, Outcome, PlotState};
use RustedGraphCalc::symbolic::symbolic_engine::Expr;
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

fn print_outcomes(outcomes: &[Outcome]) {
    if outcomes.is_empty() {
        println!("(no messages)");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["severity", "title", "message"]);
    for outcome in outcomes {
        builder.push_record([
            outcome.severity.to_string(),
            outcome.title.clone(),
            outcome.message.clone(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    println!("{}", table);
}

/// Writes whatever the controller currently shows.
fn save_plot(controller: &Controller, name: &str) {
    let result = match controller.plot() {
        PlotState::Empty => {
            println!("nothing to plot");
            return;
        }
        PlotState::Graph { graph, label } => draw_graph_png(format!("{}.png", name), graph, label)
            .and_then(|_| save_graph_to_csv(format!("{}.csv", name), graph)),
        PlotState::Surface { surface, title } => draw_surface_png(format!("{}.png", name), surface, title, None)
            .and_then(|_| save_surface_to_csv(format!("{}.csv", name), surface)),
    };
    match result {
        Ok(()) => println!("saved {}.png and {}.csv", name, name),
        Err(e) => println!("could not save {}: {}", name, e),
    }
}

fn main() {
    if let Err(e) = init_logger("info", Some(timestamped_log_name().as_str())) {
        println!("logger not initialized: {}", e);
    }
    let example = 0;
    match example {
        0 => {
            // 2D GRAPH WITH VARIABLES
            let mut calc = Controller::default();
            calc.expression = "A*sin(x) + x^2/k".to_string();
            calc.variables = "A=3, k=10".to_string();
            print_outcomes(&calc.dispatch(Command::Graph2D));
            save_plot(&calc, "graph_2d");
            // graph with a gap: ln is undefined for x <= 0
            calc.expression = "ln(x)".to_string();
            calc.variables.clear();
            print_outcomes(&calc.dispatch(Command::Graph2D));
            save_plot(&calc, "graph_ln");
        }
        1 => {
            // KEYPAD, SINGLE VALUE AND MULTI-VARIABLE EVALUATION
            let mut calc = Controller::default();
            for token in ["2", "*", "sin", "x", ")", "+", "x", "^", "2"] {
                calc.dispatch(Command::Insert(token.to_string()));
            }
            calc.x_value = "1.5".to_string();
            println!("expression: {}", calc.expression);
            print_outcomes(&calc.dispatch(Command::Insert("=".to_string())));

            calc.expression = "A*x + B".to_string();
            calc.variables = "x=1, A=10, B=0".to_string();
            print_outcomes(&calc.dispatch(Command::CalculateMultiVar));
            calc.variables = "A=10".to_string();
            print_outcomes(&calc.dispatch(Command::CalculateMultiVar));
        }
        2 => {
            // IMPLICIT EQUATION SOLVED FOR z AND RENDERED
            let mut calc = Controller::default();
            calc.expression = "x^2 + y^2 + z^2 = 36".to_string();
            print_outcomes(&calc.dispatch(Command::Render3D));
            save_plot(&calc, "sphere");
            calc.expression = "R*sin(x)*cos(y)".to_string();
            print_outcomes(&calc.dispatch(Command::Render3D));
            save_plot(&calc, "waves");
        }
        3 => {
            // ROTATING SURFACE, ONE PNG PER FRAME
            let mut calc = Controller::default();
            calc.expression = "x*y/5".to_string();
            print_outcomes(&calc.dispatch(Command::Animate3D));
            let PlotState::Surface { surface, title } = calc.plot().clone() else {
                println!("nothing to animate");
                return;
            };
            let mut scheduler = SleepScheduler;
            match render_rotation(Path::new("."), &surface, &title, calc.animation_mut(), &mut scheduler, 12) {
                Ok(files) => println!("{} frames written", files.len()),
                Err(e) => println!("animation failed: {}", e),
            }
            calc.dispatch(Command::StopAnimation);
        }
        4 => {
            // SETTINGS DOCUMENT
            let document = "graph start: 0 end: 6.28 points: 200
                            surface render_points: 60 clamp: 10
                            symbols default_value: 2.0";
            match CalcConfig::from_document(document) {
                Ok(config) => {
                    println!("{:?}", config);
                    let mut calc = Controller::new(config);
                    calc.expression = "k*cos(x)".to_string();
                    print_outcomes(&calc.dispatch(Command::Graph2D));
                    save_plot(&calc, "graph_custom");
                }
                Err(e) => println!("{}", e),
            }
        }
        5 => {
            // SYMBOLIC LAYER DIRECTLY
            match Expr::parse_expression("2*x^2 - 8") {
                Ok(expr) => {
                    println!("parsed: {}", expr);
                    let roots: Vec<String> = expr.solve_for("x").iter().map(|r| r.to_string()).collect();
                    println!("roots for x: {:?}", roots);
                    match expr.lambdify1D("x") {
                        Ok(f) => println!("f(3) = {}", f(3.0)),
                        Err(e) => println!("{}", e),
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        _ => {
            println!("example {} is not defined", example);
        }
    }
}
