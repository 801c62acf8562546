#[cfg(test)]
mod tests {
    use crate::calculator::animation::Frame;
    use crate::calculator::controller::{Command, Controller, Outcome, PlotState, Severity};

    fn controller(expression: &str, variables: &str, x_value: &str) -> Controller {
        let mut controller = Controller::default();
        controller.expression = expression.to_string();
        controller.variables = variables.to_string();
        controller.x_value = x_value.to_string();
        controller
    }

    fn single(outcomes: Vec<Outcome>) -> Outcome {
        assert_eq!(outcomes.len(), 1, "expected one outcome, got {:?}", outcomes);
        outcomes.into_iter().next().unwrap()
    }

    fn has_graph(controller: &Controller) -> bool {
        matches!(controller.plot(), PlotState::Graph { .. })
    }

    fn has_surface(controller: &Controller) -> bool {
        matches!(controller.plot(), PlotState::Surface { .. })
    }

    //___________________________________KEYPAD____________________________________

    #[test]
    fn test_insert_tokens() {
        let mut c = Controller::default();
        for token in ["2", "*", "sin", "x", ")"] {
            assert!(c.dispatch(Command::Insert(token.to_string())).is_empty());
        }
        assert_eq!(c.expression, "2*sin(x)");
    }

    #[test]
    fn test_insert_equals_evaluates_at_x() {
        let mut c = controller("x^2", "", "3");
        let outcome = single(c.dispatch(Command::Insert("=".to_string())));
        assert_eq!(outcome.severity, Severity::Info);
        assert_eq!(outcome.message, "f(3) = 9.0");
        assert_eq!(c.expression, "x^2");
    }

    //___________________________________2D GRAPH____________________________________

    #[test]
    fn test_graph_success() {
        let mut c = controller("A*cos(x)", "A=2", "");
        assert!(c.dispatch(Command::Graph2D).is_empty());
        match c.plot() {
            PlotState::Graph { graph, label } => {
                assert_eq!(graph.expression, "2.0*cos(x)");
                assert_eq!(label, "f(x) = A*cos(x)");
            }
            other => panic!("unexpected plot {:?}", other),
        }
    }

    #[test]
    fn test_graph_empty_expression_is_a_warning() {
        let mut c = controller("  ", "", "");
        let outcome = single(c.dispatch(Command::Graph2D));
        assert_eq!(outcome.severity, Severity::Warning);
    }

    #[test]
    fn test_graph_variable_error_clears_previous_plot() {
        let mut c = controller("x", "", "");
        c.dispatch(Command::Graph2D);
        assert!(has_graph(&c));
        c.variables = "k=ten".to_string();
        let outcome = single(c.dispatch(Command::Graph2D));
        assert_eq!(outcome.severity, Severity::Error);
        assert_eq!(outcome.title, "Variable Error");
        assert!(outcome.message.contains('k'));
        assert!(matches!(c.plot(), PlotState::Empty));
    }

    #[test]
    fn test_graph_parse_error() {
        let mut c = controller("x +* 1", "", "");
        let outcome = single(c.dispatch(Command::Graph2D));
        assert_eq!(outcome.title, "Error");
        assert!(outcome.message.starts_with("Invalid expression or plotting issue"));
        assert!(matches!(c.plot(), PlotState::Empty));
    }

    //___________________________________SINGLE VALUE____________________________________

    #[test]
    fn test_calc_value_defaults_symbols() {
        let mut c = controller("A*x", "", "3");
        let outcome = single(c.dispatch(Command::CalculateX));
        assert_eq!(outcome.severity, Severity::Info);
        assert_eq!(outcome.message, "f(3) = 3.0");
    }

    #[test]
    fn test_calc_value_missing_input() {
        let mut c = controller("x", "", " ");
        let outcome = single(c.dispatch(Command::CalculateX));
        assert_eq!(outcome.severity, Severity::Warning);
        assert_eq!(outcome.message, "Enter expression and x value.");
    }

    #[test]
    fn test_calc_value_bad_x_and_undefined_value() {
        let mut c = controller("x", "", "three");
        let outcome = single(c.dispatch(Command::CalculateX));
        assert_eq!(outcome.severity, Severity::Error);
        assert!(outcome.message.starts_with("Cannot compute value:"));

        let mut c = controller("1/x", "", "0");
        let outcome = single(c.dispatch(Command::CalculateX));
        assert_eq!(outcome.severity, Severity::Error);
    }

    #[test]
    fn test_calc_value_keeps_plot() {
        let mut c = controller("x", "", "");
        c.dispatch(Command::Graph2D);
        c.x_value = "bad".to_string();
        c.dispatch(Command::CalculateX);
        assert!(has_graph(&c));
    }

    //___________________________________MULTI-VARIABLE____________________________________

    #[test]
    fn test_multi_variable_result_lists_bindings() {
        let mut c = controller("A*x + B", "x=1, A=10, B=0", "");
        let outcome = single(c.dispatch(Command::CalculateMultiVar));
        assert_eq!(outcome.message, "f(A=10.0, B=0.0, x=1.0) = 10.0");
    }

    #[test]
    fn test_multi_variable_without_bindings() {
        let mut c = controller("2^3", "", "");
        let outcome = single(c.dispatch(Command::CalculateMultiVar));
        assert_eq!(outcome.message, "f = 8.0");
    }

    #[test]
    fn test_multi_variable_errors() {
        let mut c = controller("", "", "");
        let outcome = single(c.dispatch(Command::CalculateMultiVar));
        assert_eq!((outcome.severity, outcome.title.as_str()), (Severity::Error, "Input Error"));

        let mut c = controller("A*x", "A 1", "");
        assert_eq!(single(c.dispatch(Command::CalculateMultiVar)).title, "Variable Error");

        let mut c = controller("A*x", "A=1", "");
        let outcome = single(c.dispatch(Command::CalculateMultiVar));
        assert_eq!(outcome.title, "Calculation Error");
        assert!(outcome.message.contains('x'));
    }

    //___________________________________3D RENDER____________________________________

    #[test]
    fn test_render_explicit_surface_with_defaults() {
        let mut c = controller("R*x*y", "", "");
        let outcome = single(c.dispatch(Command::Render3D));
        assert_eq!(outcome.title, "Variable Defaults");
        assert_eq!(outcome.message, "Assigning default value of 1.0 to: R=1.0 for rendering.");
        match c.plot() {
            PlotState::Surface { surface, title } => {
                assert_eq!(surface.z.shape(), (150, 150));
                assert_eq!(title, "3D Render: R*x*y");
            }
            other => panic!("unexpected plot {:?}", other),
        }
    }

    #[test]
    fn test_render_implicit_equation_is_auto_solved() {
        let mut c = controller("z = x^2 - y^2", "", "");
        let outcomes = c.dispatch(Command::Render3D);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].title, "Auto-Solved");
        assert!(outcomes[0].message.starts_with("Implicit equation solved for z.\nPlotting: z = "));
        assert!(has_surface(&c));
    }

    #[test]
    fn test_render_solve_error_keeps_previous_plot() {
        let mut c = controller("x", "", "");
        c.dispatch(Command::Graph2D);
        c.expression = "x^2 + y^2 = 4".to_string();
        let outcome = single(c.dispatch(Command::Render3D));
        assert_eq!(outcome.title, "Solve Error");
        assert!(outcome.message.contains("Could not solve the equation for z"));
        assert!(has_graph(&c));
    }

    #[test]
    fn test_render_evaluation_error_after_clear() {
        let mut c = controller("x", "", "");
        c.dispatch(Command::Graph2D);
        c.expression = "x + z".to_string();
        let outcome = single(c.dispatch(Command::Render3D));
        assert_eq!(outcome.title, "3D Render Error");
        assert!(matches!(c.plot(), PlotState::Empty));
    }

    #[test]
    fn test_render_empty_is_a_warning() {
        let mut c = controller("", "", "");
        assert_eq!(single(c.dispatch(Command::Render3D)).severity, Severity::Warning);
    }

    //___________________________________3D ANIMATION____________________________________

    #[test]
    fn test_animate_produces_frames_until_stopped() {
        let mut c = controller("x*y", "", "");
        assert!(c.dispatch(Command::Animate3D).is_empty());
        match c.plot() {
            PlotState::Surface { surface, title } => {
                assert_eq!(surface.z.shape(), (100, 100));
                assert_eq!(title, "3D Rotation: x*y");
            }
            other => panic!("unexpected plot {:?}", other),
        }
        assert_eq!(c.tick(), Some(Frame { elevation: 30.0, azimuth: 0.0 }));
        assert_eq!(c.tick().map(|f| f.azimuth), Some(3.0));
        c.dispatch(Command::StopAnimation);
        assert_eq!(c.tick(), None);
    }

    #[test]
    fn test_animate_rejects_implicit_equations() {
        let mut c = controller("x", "", "");
        c.dispatch(Command::Graph2D);
        c.expression = "z = x*y".to_string();
        let outcome = single(c.dispatch(Command::Animate3D));
        assert_eq!((outcome.severity, outcome.title.as_str()), (Severity::Warning, "Invalid Input"));
        assert!(has_graph(&c));
    }

    #[test]
    fn test_animate_failure_still_clears() {
        let mut c = controller("x", "", "");
        c.dispatch(Command::Graph2D);
        c.expression = "x +* y".to_string();
        let outcome = single(c.dispatch(Command::Animate3D));
        assert_eq!(outcome.title, "Error");
        assert!(matches!(c.plot(), PlotState::Empty));
        assert!(!c.animation().is_animating());
    }

    #[test]
    fn test_new_graph_stops_animation() {
        let mut c = controller("x*y", "", "");
        c.dispatch(Command::Animate3D);
        assert!(c.animation().is_animating());
        c.expression = "x".to_string();
        c.dispatch(Command::Graph2D);
        assert!(!c.animation().is_animating());
        assert_eq!(c.tick(), None);
    }

    #[test]
    fn test_animation_defaults_notice() {
        let mut c = controller("k*x", "", "");
        let outcome = single(c.dispatch(Command::Animate3D));
        assert_eq!(outcome.message, "Assigning default value of 1.0 to: k=1.0 for animation.");
    }
}
