//! Scene root: an ordered list of mesh slots.

use crate::data_structures::mesh::Mesh;

/// The root of an imported model.
///
/// Mesh slots may be empty (`None`), which the differ treats as an absent mesh
/// rather than a malformed scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub meshes: Vec<Option<Mesh>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.meshes.push(Some(mesh));
        self
    }

    pub fn num_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// The mesh at `index`, or `None` for an empty slot or an out of range index.
    pub fn mesh(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)?.as_ref()
    }
}

impl FromIterator<Mesh> for Scene {
    fn from_iter<T: IntoIterator<Item = Mesh>>(iter: T) -> Self {
        Self {
            meshes: iter.into_iter().map(Some).collect(),
        }
    }
}
