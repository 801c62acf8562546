use nalgebra::{DMatrix, DVector};

/// `n` evenly spaced points from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> DVector<f64> {
    match n {
        0 => DVector::zeros(0),
        1 => DVector::from_element(1, start),
        _ => {
            let step = (end - start) / (n - 1) as f64;
            DVector::from_fn(n, |i, _| if i == n - 1 { end } else { start + step * i as f64 })
        }
    }
}

/// Line values: every non-finite entry becomes NaN, so a plotted line shows a gap there.
pub fn sanitize_line(values: &mut DVector<f64>) {
    values.iter_mut().filter(|v| !v.is_finite()).for_each(|v| *v = f64::NAN);
}

/// Surface values: non-finite entries become 0.0, then everything is clamped to [-limit, limit].
/// A limit that is not positive (or NaN) leaves the finite values as they are.
pub fn sanitize_surface(values: &mut DMatrix<f64>, limit: f64) {
    let clamp = limit > 0.0;
    for v in values.iter_mut() {
        if !v.is_finite() {
            *v = 0.0;
        }
        if clamp {
            *v = v.clamp(-limit, limit);
        }
    }
}

/// (min, max) of the finite entries, `fallback` when there are none or they coincide.
pub fn value_limits<'a, I>(values: I, fallback: (f64, f64)) -> (f64, f64)
where
    I: IntoIterator<Item = &'a f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if !min.is_finite() || !max.is_finite() || min == max {
        fallback
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace() {
        let xs = linspace(-10.0, 10.0, 400);
        assert_eq!(xs.len(), 400);
        assert_eq!(xs[0], -10.0);
        assert_eq!(xs[399], 10.0);
        assert_relative_eq!(xs[1] - xs[0], 20.0 / 399.0, epsilon = 1e-12);
        assert_eq!(linspace(0.0, 1.0, 1).as_slice(), &[0.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_sanitize_line() {
        let mut ys = DVector::from_vec(vec![1.0, f64::INFINITY, f64::NAN, f64::NEG_INFINITY, -2.0]);
        sanitize_line(&mut ys);
        assert_eq!(ys[0], 1.0);
        assert!(ys[1].is_nan() && ys[2].is_nan() && ys[3].is_nan());
        assert_eq!(ys[4], -2.0);
    }

    #[test]
    fn test_sanitize_surface() {
        let mut z = DMatrix::from_row_slice(2, 2, &[f64::NAN, 1e9, -75.0, 3.0]);
        sanitize_surface(&mut z, 50.0);
        assert_eq!(z.as_slice(), &[0.0, -50.0, 50.0, 3.0]);
    }

    #[test]
    fn test_sanitize_surface_with_unusable_limit() {
        for limit in [-1.0, 0.0, f64::NAN] {
            let mut z = DMatrix::from_row_slice(1, 3, &[f64::INFINITY, 75.0, -2.0]);
            sanitize_surface(&mut z, limit);
            assert_eq!(z.as_slice(), &[0.0, 75.0, -2.0]);
        }
        let mut z = DMatrix::from_row_slice(1, 2, &[1e300, f64::NAN]);
        sanitize_surface(&mut z, f64::INFINITY);
        assert_eq!(z.as_slice(), &[1e300, 0.0]);
    }

    #[test]
    fn test_value_limits() {
        let values = [3.0, -1.0, f64::NAN, 2.0];
        assert_eq!(value_limits(values.iter(), (-5.0, 5.0)), (-1.0, 3.0));
        let flat = [0.0, 0.0];
        assert_eq!(value_limits(flat.iter(), (-5.0, 5.0)), (-5.0, 5.0));
    }
}
