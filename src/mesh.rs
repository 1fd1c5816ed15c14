//! Wavefront OBJ meshes appended to a polygon buffer.

use std::path::Path;

use crate::error::Result;
use crate::math::point_matrix::PointMatrix;
use crate::math::vec3::Vec3;

/// Load every object in an OBJ file and append its faces as triangles.
///
/// Quads and larger faces are fan-triangulated by the loader. Returns the
/// number of triangles added.
pub fn add_mesh<P: AsRef<Path>>(polygons: &mut PointMatrix, path: P) -> Result<usize> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path.as_ref(), &options)?;

    let mut added = 0;
    for model in &models {
        added += append_faces(polygons, &model.mesh.positions, &model.mesh.indices);
    }
    Ok(added)
}

/// Append triangles indexed into a flat `[x, y, z, x, y, z, ...]` array.
fn append_faces(polygons: &mut PointMatrix, positions: &[f32], indices: &[u32]) -> usize {
    let vertex = |i: u32| {
        let i = i as usize * 3;
        Vec3::new(
            positions[i] as f64,
            positions[i + 1] as f64,
            positions[i + 2] as f64,
        )
    };

    let mut added = 0;
    for face in indices.chunks_exact(3) {
        polygons.add_polygon(vertex(face[0]), vertex(face[1]), vertex(face[2]));
        added += 1;
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn faces_follow_index_order() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
        let indices = [0, 1, 2, 1, 3, 2];
        let mut polygons = PointMatrix::new();

        assert_eq!(append_faces(&mut polygons, &positions, &indices), 2);
        assert_eq!(polygons.point(3), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(polygons.point(4), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn quads_are_triangulated() {
        let dir = std::env::temp_dir().join("mdl_render_mesh_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("quad.obj");
        fs::write(
            &path,
            "v 0 0 0\nv 10 0 0\nv 10 10 0\nv 0 10 0\nf 1 2 3 4\n",
        )
        .unwrap();

        let mut polygons = PointMatrix::new();
        let added = add_mesh(&mut polygons, &path).unwrap();
        assert_eq!(added, 2);
        assert_eq!(polygons.len(), 6);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut polygons = PointMatrix::new();
        assert!(add_mesh(&mut polygons, "/nonexistent/model.obj").is_err());
    }
}
