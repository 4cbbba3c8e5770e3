// Math utilities and helper functions

use glam::Vec2;

/// Chebyshev distance between two points (largest per-axis gap)
pub fn chebyshev_distance(a: Vec2, b: Vec2) -> f32 {
    let delta = (a - b).abs();
    delta.x.max(delta.y)
}

/// Cubic ease-in, Penner form: `t` elapsed, `b` start, `c` change, `d` duration
pub fn in_cubic(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    c * t * t * t + b
}

/// Cubic ease-out, Penner form: `t` elapsed, `b` start, `c` change, `d` duration
pub fn out_cubic(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d - 1.0;
    c * (t * t * t + 1.0) + b
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_chebyshev_distance() {
        let origin = Vec2::new(10.0, 10.0);
        assert_eq!(chebyshev_distance(origin, Vec2::new(13.0, 30.0)), 20.0);
        assert_eq!(chebyshev_distance(origin, Vec2::new(-5.0, 12.0)), 15.0);
        assert_eq!(chebyshev_distance(origin, origin), 0.0);
    }

    #[test]
    fn test_in_cubic_endpoints() {
        assert_abs_diff_eq!(in_cubic(0.0, 1.0, -0.7, 2.0), 1.0);
        assert_abs_diff_eq!(in_cubic(2.0, 1.0, -0.7, 2.0), 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(in_cubic(1.0, 0.0, 8.0, 2.0), 1.0);
    }

    #[test]
    fn test_out_cubic_endpoints() {
        assert_abs_diff_eq!(out_cubic(0.0, 40.0, -8.0, 1.0), 40.0);
        assert_abs_diff_eq!(out_cubic(1.0, 40.0, -8.0, 1.0), 32.0);
        // Front-loaded: more than half the travel is done at the midpoint
        assert!(out_cubic(0.5, 0.0, 1.0, 1.0) > 0.5);
    }
}
