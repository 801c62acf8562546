use RustedGraphCalc::calculator::engine::{MathEngine, Resolution};
use RustedGraphCalc::calculator::variables::Bindings;
use RustedGraphCalc::symbolic::symbolic_engine::Expr;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_surface_render(c: &mut Criterion) {
    let engine = MathEngine::default();
    let bindings = Bindings::new();
    c.bench_function("surface 150x150", |b| {
        b.iter(|| engine.evaluate_2d(black_box("sin(x)*cos(y) + x^2/10"), &bindings, Resolution::Render))
    });
}

fn bench_surface_animate(c: &mut Criterion) {
    let engine = MathEngine::default();
    let bindings = Bindings::new();
    c.bench_function("surface 100x100", |b| {
        b.iter(|| engine.evaluate_2d(black_box("sin(x)*cos(y) + x^2/10"), &bindings, Resolution::Animate))
    });
}

fn bench_parse_and_lambdify(c: &mut Criterion) {
    c.bench_function("parse + lambdify", |b| {
        b.iter(|| {
            Expr::parse_expression(black_box("exp(-(x^2 + y^2)/4)*cos(3*x)"))
                .ok()
                .and_then(|e| e.lambdify(&["x", "y"]).ok())
                .map(|f| f(&[0.5, 0.5]))
        })
    });
}

fn bench_implicit_solve(c: &mut Criterion) {
    let engine = MathEngine::default();
    c.bench_function("solve sphere for z", |b| {
        b.iter(|| engine.solve_implicit(black_box("x^2 + y^2 + z^2 = 36"), "z"))
    });
}

criterion_group!(
    benches,
    bench_surface_render,
    bench_surface_animate,
    bench_parse_and_lambdify,
    bench_implicit_solve
);
criterion_main!(benches);
