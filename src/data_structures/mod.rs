//! Scene data handed to the differ.
//!
//! - `mesh` contains the per-vertex geometry records and the vector types they use
//! - `scene` is the root holding an ordered list of meshes
//!
//! The differ only ever reads these structures.

pub mod mesh;
pub mod scene;
