//! PNG rendering of graphs and surfaces with plotters.
use crate::calculator::animation::{Animation, Frame, FrameScheduler};
use crate::calculator::engine::{Graph2D, Surface};
use crate::calculator::errors::CalcError;
use crate::calculator::grid::value_limits;
use log::{debug, info};
use nalgebra::DVector;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

fn render_error<E: std::fmt::Display>(e: E) -> CalcError {
    CalcError::Render(e.to_string())
}

/// Splits a sampled line into runs of consecutive finite points, so a NaN gap
/// is never bridged by a line segment.
pub fn split_at_gaps(xs: &DVector<f64>, ys: &DVector<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        if y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn padded((min, max): (f64, f64)) -> std::ops::Range<f64> {
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

pub fn draw_graph_png<P: AsRef<Path>>(path: P, graph: &Graph2D, label: &str) -> Result<(), CalcError> {
    let root = BitMapBackend::new(path.as_ref(), (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;
    let x_range = (graph.xs.min(), graph.xs.max());
    let y_range = value_limits(graph.ys.iter(), (-1.0, 1.0));
    let mut chart = ChartBuilder::on(&root)
        .caption(label, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(padded(x_range), padded(y_range))
        .map_err(render_error)?;
    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("f(x)")
        .draw()
        .map_err(render_error)?;

    let segments = split_at_gaps(&graph.xs, &graph.ys);
    debug!("graph of '{}' drawn as {} segment(s)", graph.expression, segments.len());
    for (k, segment) in segments.into_iter().enumerate() {
        let series = chart
            .draw_series(LineSeries::new(segment, &BLUE))
            .map_err(render_error)?;
        if k == 0 {
            series
                .label(label)
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
        }
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_error)?;
    root.present().map_err(render_error)?;
    info!("graph saved to {}", path.as_ref().display());
    Ok(())
}

/// Surface plot viewed from `frame`, or from the default elevation and azimuth 0.
pub fn draw_surface_png<P: AsRef<Path>>(
    path: P,
    surface: &Surface,
    title: &str,
    frame: Option<Frame>,
) -> Result<(), CalcError> {
    let frame = frame.unwrap_or(Frame {
        elevation: 30.0,
        azimuth: 0.0,
    });
    let root = BitMapBackend::new(path.as_ref(), (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;
    let x_range = (surface.xs.min(), surface.xs.max());
    let y_range = (surface.ys.min(), surface.ys.max());
    let z_range = surface.z_limits();
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .build_cartesian_3d(x_range.0..x_range.1, z_range.0..z_range.1, y_range.0..y_range.1)
        .map_err(render_error)?;
    chart.with_projection(|mut pb| {
        pb.yaw = frame.azimuth.to_radians();
        pb.pitch = frame.elevation.to_radians();
        pb.scale = 0.8;
        pb.into_matrix()
    });
    chart.configure_axes().draw().map_err(render_error)?;

    // plotters hands back coordinates, the matrix is indexed by position
    let column = |x: f64| surface.xs.iter().position(|v| *v == x).unwrap_or(0);
    let row = |y: f64| surface.ys.iter().position(|v| *v == y).unwrap_or(0);
    chart
        .draw_series(
            SurfaceSeries::xoz(surface.xs.iter().copied(), surface.ys.iter().copied(), |x, y| {
                surface.z[(row(y), column(x))]
            })
            .style(BLUE.mix(0.4).filled()),
        )
        .map_err(render_error)?;
    root.present().map_err(render_error)?;
    debug!(
        "surface '{}' saved to {} at azimuth {}",
        surface.expression,
        path.as_ref().display(),
        frame.azimuth
    );
    Ok(())
}

/// Writes one PNG per animation frame into `dir` (`frame_000.png`, ...) until the
/// animation stops or `max_frames` is reached. Returns the written files.
pub fn render_rotation<S: FrameScheduler>(
    dir: &Path,
    surface: &Surface,
    title: &str,
    animation: &mut Animation,
    scheduler: &mut S,
    max_frames: usize,
) -> Result<Vec<PathBuf>, CalcError> {
    let mut written = Vec::new();
    let mut failure = None;
    animation.run_frames(scheduler, max_frames, |frame, anim| {
        let path = dir.join(format!("frame_{:03}.png", written.len()));
        match draw_surface_png(&path, surface, title, Some(frame)) {
            Ok(()) => written.push(path),
            Err(e) => {
                failure = Some(e);
                anim.stop();
            }
        }
    });
    match failure {
        Some(e) => Err(e),
        None => {
            info!("{} animation frames written to {}", written.len(), dir.display());
            Ok(written)
        }
    }
}
