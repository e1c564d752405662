use nalgebra::Point3;

use std::f32::consts::TAU;

use super::path::path_iter_parametric;

/// Position of a body on a circular orbit in the xz-plane, `t` time units after it
/// crossed the +x axis.
///
/// This is evaluated fresh every frame, both for drawing the body and for aiming the
/// camera at it, so that the two can never disagree.
pub fn orbit_position(t: f64, speed: f64, distance: f64) -> Point3<f64> {
    let angle = t * speed;
    Point3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

/// Closed polyline approximating the circle of the given radius in the orbital plane.
///
/// Returns `segments + 1` points; the first and last coincide.
pub fn orbit_path(distance: f64, segments: usize) -> Vec<Point3<f32>> {
    assert!(
        segments >= 3,
        "An orbit needs at least three segments, got {}",
        segments
    );
    let distance = distance as f32;
    let mut points: Vec<_> = path_iter_parametric(
        |angle: f32| Point3::new(angle.cos() * distance, 0.0, angle.sin() * distance),
        0.0,
        TAU,
        segments,
    )
    .collect();

    // cos(TAU) and sin(TAU) aren't exactly 1 and 0 in f32
    if let Some(first) = points.first().copied() {
        if let Some(last) = points.last_mut() {
            *last = first;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    #[test]
    fn test_position_on_circle() {
        let cases = [
            (0.0, 0.03, 20.0),
            (12.5, 0.0479, 10.0),
            (1e4, 0.0054, 100.0),
            (-3.0, 1.0, 2.5),
            (7.0, 0.0, 40.0),
        ];
        for (t, speed, distance) in cases {
            let p = orbit_position(t, speed, distance);
            approx::assert_relative_eq!(
                p.x * p.x + p.z * p.z,
                distance * distance,
                max_relative = 1e-12
            );
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_central_body_stays_at_origin() {
        assert_eq!(orbit_position(123.0, 0.0, 0.0), Point3::origin());
    }

    #[test]
    fn test_earth_half_orbit() {
        approx::assert_relative_eq!(
            orbit_position(0.0, 0.03, 20.0),
            Point3::new(20.0, 0.0, 0.0)
        );
        approx::assert_abs_diff_eq!(
            orbit_position(PI / 0.03, 0.03, 20.0),
            Point3::new(-20.0, 0.0, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_path_is_closed_circle() {
        let n = 100;
        let distance = 25.0;
        let points = orbit_path(distance, n);

        assert_eq!(points.len(), n + 1);
        assert_eq!(points.first(), points.last());
        for p in points.iter() {
            approx::assert_relative_eq!(
                (p.x * p.x + p.z * p.z).sqrt(),
                distance as f32,
                max_relative = 1e-5
            );
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_path_starts_on_x_axis() {
        let points = orbit_path(10.0, 4);
        approx::assert_relative_eq!(points[0], Point3::new(10.0, 0.0, 0.0));
        approx::assert_abs_diff_eq!(points[1], Point3::new(0.0, 0.0, 10.0), epsilon = 1e-5);
        approx::assert_abs_diff_eq!(points[2], Point3::new(-10.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    #[should_panic]
    fn test_degenerate_path_rejected() {
        orbit_path(10.0, 2);
    }
}
