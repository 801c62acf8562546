//! Numeric domains, resolutions and animation settings of the calculator.
//!
//! The defaults reproduce the fixed behaviour of the calculator: 400 points over [-10, 10]
//! for graphs, 150x150 (render) or 100x100 (animate) points over [-5, 5]^2 for surfaces,
//! surface values clamped to [-50, 50], unassigned symbols set to 1.0, and a 3 degree
//! rotation every 33 ms at 30 degrees elevation for animations.
//!
//! Any of them can be overridden with a settings document:
//! ```text
//! graph   start: -10 end: 10 points: 400
//! surface start: -5 end: 5 render_points: 150 animate_points: 100 clamp: 50
//! symbols default_value: 1.0
//! animation step_degrees: 3 elevation: 30 interval_ms: 33
//! ```
use crate::Utils::task_parser::{DocumentMap, parse_document_as, template_from};
use crate::calculator::errors::CalcError;
use log::info;
use std::time::Duration;

const GRAPH_KEYS: &[&str] = &["start", "end", "points"];
const SURFACE_KEYS: &[&str] = &["start", "end", "render_points", "animate_points", "clamp"];
const SYMBOLS_KEYS: &[&str] = &["default_value"];
const ANIMATION_KEYS: &[&str] = &["step_degrees", "elevation", "interval_ms"];

#[derive(Debug, Clone, PartialEq)]
pub struct CalcConfig {
    pub graph_start: f64,
    pub graph_end: f64,
    pub graph_points: usize,
    pub surface_start: f64,
    pub surface_end: f64,
    pub render_points: usize,
    pub animate_points: usize,
    /// surface values are clamped to [-clamp, clamp]
    pub clamp: f64,
    /// value given to symbols the user did not assign
    pub default_value: f64,
    pub step_degrees: f64,
    pub elevation: f64,
    pub interval_ms: u64,
}

impl Default for CalcConfig {
    fn default() -> Self {
        CalcConfig {
            graph_start: -10.0,
            graph_end: 10.0,
            graph_points: 400,
            surface_start: -5.0,
            surface_end: 5.0,
            render_points: 150,
            animate_points: 100,
            clamp: 50.0,
            default_value: 1.0,
            step_degrees: 3.0,
            elevation: 30.0,
            interval_ms: 33,
        }
    }
}

fn number(doc: &DocumentMap, title: &str, key: &str) -> Result<Option<f64>, CalcError> {
    let Some(values) = doc.get(title).and_then(|section| section.get(key)).and_then(|v| v.as_ref()) else {
        return Ok(None);
    };
    match values.as_slice() {
        [value] => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| CalcError::Config(format!("{}.{} must be a number, got '{}'", title, key, value))),
        _ => Err(CalcError::Config(format!(
            "{}.{} expects exactly one value, got {}",
            title,
            key,
            values.len()
        ))),
    }
}

fn count(doc: &DocumentMap, title: &str, key: &str) -> Result<Option<usize>, CalcError> {
    match number(doc, title, key)? {
        Some(n) if n >= 0.0 && n.fract() == 0.0 => Ok(Some(n as usize)),
        Some(n) => Err(CalcError::Config(format!(
            "{}.{} must be a non-negative integer, got {}",
            title, key, n
        ))),
        None => Ok(None),
    }
}

impl CalcConfig {
    /// Reads a settings document; keys it does not mention keep their defaults.
    pub fn from_document(text: &str) -> Result<Self, CalcError> {
        let template = template_from(&[
            ("graph", GRAPH_KEYS),
            ("surface", SURFACE_KEYS),
            ("symbols", SYMBOLS_KEYS),
            ("animation", ANIMATION_KEYS),
        ]);
        let doc = parse_document_as(text, Some(&template)).map_err(CalcError::Config)?;

        let mut config = CalcConfig::default();
        if let Some(v) = number(&doc, "graph", "start")? {
            config.graph_start = v;
        }
        if let Some(v) = number(&doc, "graph", "end")? {
            config.graph_end = v;
        }
        if let Some(v) = count(&doc, "graph", "points")? {
            config.graph_points = v;
        }
        if let Some(v) = number(&doc, "surface", "start")? {
            config.surface_start = v;
        }
        if let Some(v) = number(&doc, "surface", "end")? {
            config.surface_end = v;
        }
        if let Some(v) = count(&doc, "surface", "render_points")? {
            config.render_points = v;
        }
        if let Some(v) = count(&doc, "surface", "animate_points")? {
            config.animate_points = v;
        }
        if let Some(v) = number(&doc, "surface", "clamp")? {
            config.clamp = v;
        }
        if let Some(v) = number(&doc, "symbols", "default_value")? {
            config.default_value = v;
        }
        if let Some(v) = number(&doc, "animation", "step_degrees")? {
            config.step_degrees = v;
        }
        if let Some(v) = number(&doc, "animation", "elevation")? {
            config.elevation = v;
        }
        if let Some(v) = count(&doc, "animation", "interval_ms")? {
            config.interval_ms = v as u64;
        }
        config.validate()?;
        info!("calculator settings loaded: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        if !(self.graph_start < self.graph_end) {
            return Err(CalcError::Config("graph.start must be below graph.end".to_string()));
        }
        if !(self.surface_start < self.surface_end) {
            return Err(CalcError::Config("surface.start must be below surface.end".to_string()));
        }
        if self.graph_points < 2 || self.render_points < 2 || self.animate_points < 2 {
            return Err(CalcError::Config("point counts must be at least 2".to_string()));
        }
        if !(self.clamp > 0.0) {
            return Err(CalcError::Config("surface.clamp must be positive".to_string()));
        }
        if !self.default_value.is_finite() {
            return Err(CalcError::Config("symbols.default_value must be finite".to_string()));
        }
        if self.interval_ms == 0 {
            return Err(CalcError::Config("animation.interval_ms must be positive".to_string()));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalcConfig::default();
        assert_eq!(config.graph_points, 400);
        assert_eq!((config.graph_start, config.graph_end), (-10.0, 10.0));
        assert_eq!((config.render_points, config.animate_points), (150, 100));
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_document_equals_defaults() {
        let doc = "graph   start: -10 end: 10 points: 400\n\
                   surface start: -5 end: 5 render_points: 150 animate_points: 100 clamp: 50\n\
                   symbols default_value: 1.0\n\
                   animation step_degrees: 3 elevation: 30 interval_ms: 33\n";
        assert_eq!(CalcConfig::from_document(doc).unwrap(), CalcConfig::default());
    }

    #[test]
    fn test_partial_document_overrides() {
        let config = CalcConfig::from_document("graph points: 50 end: 2.5\n").unwrap();
        assert_eq!(config.graph_points, 50);
        assert_eq!(config.graph_end, 2.5);
        assert_eq!(config.graph_start, -10.0);
        assert_eq!(config.render_points, 150);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(CalcConfig::from_document("graph colour: 3").is_err());
        assert!(CalcConfig::from_document("graph points: many").is_err());
        assert!(CalcConfig::from_document("graph points: 2.5").is_err());
        assert!(CalcConfig::from_document("graph start: 5 end: 1").is_err());
        assert!(CalcConfig::from_document("surface clamp: 1, 2").is_err());
    }
}
