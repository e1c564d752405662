use nalgebra::Point3;

/// Samples `f` at `num_segments + 1` evenly spaced parameters between `t_start` and
/// `t_end`, both ends included.
pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Pairs up consecutive points, so a polyline can be fed to a line renderer.
pub fn segments<'a>(
    points: &'a [Point3<f32>],
) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + 'a {
    points.windows(2).map(|pts| (pts[0], pts[1]))
}
