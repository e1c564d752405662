use nalgebra::{Point3, Vector3};

/// Moves `from` a fraction `alpha` of the way towards `to`.
///
/// Applied once per frame towards a moving target, this gives exponential easing.
pub fn lerp_point(from: &Point3<f32>, to: &Point3<f32>, alpha: f32) -> Point3<f32> {
    from + (to - from) * alpha
}

/// Returns the smallest non-negative t such that `origin + t * dir` lies on the sphere,
/// or None if the ray misses it. `dir` need not be normalized, but must be non-zero.
pub fn ray_sphere_intersection(
    origin: &Point3<f32>,
    dir: &Vector3<f32>,
    center: &Point3<f32>,
    radius: f32,
) -> Option<f32> {
    // Solve |o + t d - c|^2 = r^2, i.e. a t^2 + 2 b t + c = 0
    let oc = origin - center;
    let a = dir.norm_squared();
    let b = oc.dot(dir);
    let c = oc.norm_squared() - radius * radius;

    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let near = (-b - sqrt_disc) / a;
    let far = (-b + sqrt_disc) / a;

    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // We're inside the sphere
        Some(0.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, -20.0, 4.0);

        approx::assert_relative_eq!(lerp_point(&a, &b, 0.0), a);
        approx::assert_relative_eq!(lerp_point(&a, &b, 1.0), b);
        approx::assert_relative_eq!(lerp_point(&a, &b, 0.1), Point3::new(1.0, -2.0, 0.4));
    }

    #[test]
    fn test_repeated_lerp_converges() {
        let target = Point3::new(3.0, 4.0, 5.0);
        let mut p = Point3::origin();
        for _ in 0..500 {
            p = lerp_point(&p, &target, 0.05);
        }
        approx::assert_abs_diff_eq!(p, target, epsilon = 1e-4);
    }

    #[test]
    fn test_ray_hits_sphere() {
        let hit = ray_sphere_intersection(
            &Point3::new(0.0, 0.0, 10.0),
            &Vector3::new(0.0, 0.0, -1.0),
            &Point3::origin(),
            2.0,
        );
        approx::assert_relative_eq!(hit.unwrap(), 8.0);

        // Unnormalized direction scales t
        let hit = ray_sphere_intersection(
            &Point3::new(0.0, 0.0, 10.0),
            &Vector3::new(0.0, 0.0, -2.0),
            &Point3::origin(),
            2.0,
        );
        approx::assert_relative_eq!(hit.unwrap(), 4.0);
    }

    #[test]
    fn test_ray_misses_sphere() {
        // Passes beside it
        assert_eq!(
            ray_sphere_intersection(
                &Point3::new(5.0, 0.0, 10.0),
                &Vector3::new(0.0, 0.0, -1.0),
                &Point3::origin(),
                2.0,
            ),
            None
        );

        // Sphere is behind the ray
        assert_eq!(
            ray_sphere_intersection(
                &Point3::new(0.0, 0.0, 10.0),
                &Vector3::new(0.0, 0.0, 1.0),
                &Point3::origin(),
                2.0,
            ),
            None
        );
    }

    #[test]
    fn test_ray_from_inside() {
        let hit = ray_sphere_intersection(
            &Point3::new(0.5, 0.0, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
            &Point3::origin(),
            2.0,
        );
        assert_eq!(hit, Some(0.0));
    }
}
