use scene_differ::{Color4, Mesh, Scene, Vec3};

/// Route the library's `log` output through the test harness.
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fully populated triangle: positions, normals, one color channel, one
/// texture coordinate channel and a tangent frame per vertex.
pub(crate) fn triangle(name: &str) -> Mesh {
    Mesh::new(name, 3)
        .with_positions([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ])
        .with_normals([Vec3::new(0.0, 0.0, 1.0); 3])
        .with_colors(
            0,
            [
                Color4::new(1.0, 0.0, 0.0, 1.0),
                Color4::new(0.0, 1.0, 0.0, 1.0),
                Color4::new(0.0, 0.0, 1.0, 1.0),
            ],
        )
        .with_texture_coords(
            0,
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
        )
        .with_tangents_and_bitangents([Vec3::new(1.0, 0.0, 0.0); 3], [Vec3::new(0.0, 1.0, 0.0); 3])
}

/// Two vertex mesh that only carries positions.
pub(crate) fn segment(name: &str, start: [f32; 3], end: [f32; 3]) -> Mesh {
    let [sx, sy, sz] = start;
    let [ex, ey, ez] = end;
    Mesh::from_flat_positions(name, &[sx, sy, sz, ex, ey, ez])
}

pub(crate) fn scene_of(meshes: impl IntoIterator<Item = Mesh>) -> Scene {
    meshes.into_iter().collect()
}

/// Mutable access to an attribute array the fixtures are known to populate.
pub(crate) fn attr<T>(array: &mut Option<Vec<T>>) -> &mut Vec<T> {
    array.as_mut().expect("fixture attribute missing")
}

/// Asserts the differ's report holds exactly the given entries, in order, and
/// prints the full report on failure.
#[macro_export]
macro_rules! assert_report {
    ($differ:expr, [$($entry:expr),* $(,)?]) => {{
        let expected: Vec<String> = vec![$($entry.to_string()),*];
        let actual: Vec<String> = $differ.report().entries().to_vec();
        assert_eq!(actual, expected, "unexpected diff report:\n{}", $differ.report());
    }};
}
