//! Mesh geometry as handed over by an importer.
//!
//! A mesh is a vertex count plus a set of optional per-vertex arrays. Every
//! optional array is either fully populated (one entry per vertex) or absent.

use std::fmt;

/// Number of vertex color channel slots a mesh can carry.
pub const MAX_COLOR_SETS: usize = 8;
/// Number of texture coordinate channel slots a mesh can carry.
pub const MAX_TEXTURE_COORDS: usize = 8;

/// A 3D vector used for positions, normals, texture coordinates and tangents.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for cgmath::Vector3<f32> {
    fn from(v: Vec3) -> Self {
        cgmath::Vector3::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An RGBA vertex color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[f32; 4]> for Color4 {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color4> for cgmath::Vector4<f32> {
    fn from(c: Color4) -> Self {
        cgmath::Vector4::new(c.r, c.g, c.b, c.a)
    }
}

impl fmt::Display for Color4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// One submesh of a scene.
///
/// Channel arrays (`colors`, `texture_coords`) are indexed by channel slot. A
/// slot that is out of range or `None` counts as absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub num_vertices: usize,
    pub positions: Option<Vec<Vec3>>,
    pub normals: Option<Vec<Vec3>>,
    pub colors: Vec<Option<Vec<Color4>>>,
    pub texture_coords: Vec<Option<Vec<Vec3>>>,
    pub tangents: Option<Vec<Vec3>>,
    pub bitangents: Option<Vec<Vec3>>,
}

impl Mesh {
    /// Create a mesh with a vertex count and no attribute arrays.
    pub fn new(name: impl Into<String>, num_vertices: usize) -> Self {
        Self {
            name: name.into(),
            num_vertices,
            ..Default::default()
        }
    }

    pub fn with_positions(mut self, positions: impl IntoIterator<Item = impl Into<Vec3>>) -> Self {
        self.positions = Some(positions.into_iter().map(Into::into).collect());
        self
    }

    /**
     * A mesh whose positions come from a tightly packed `x, y, z, x, y, z, ...`
     * float buffer, which is the layout most importers hand out. The vertex
     * count is the number of decoded positions.
     *
     * Trailing floats that don't form a full vector are ignored.
     */
    pub fn from_flat_positions(name: impl Into<String>, floats: &[f32]) -> Self {
        let whole = floats.len() - floats.len() % 3;
        if whole != floats.len() {
            log::warn!(
                "Ignoring {} trailing float(s) of a flat position buffer",
                floats.len() - whole
            );
        }
        let positions: &[Vec3] = bytemuck::cast_slice(&floats[..whole]);
        Self {
            name: name.into(),
            num_vertices: positions.len(),
            positions: Some(positions.to_vec()),
            ..Default::default()
        }
    }

    pub fn with_normals(mut self, normals: impl IntoIterator<Item = impl Into<Vec3>>) -> Self {
        self.normals = Some(normals.into_iter().map(Into::into).collect());
        self
    }

    /// Populate color channel `channel`, growing the slot list if needed.
    ///
    /// Slots at or past `MAX_COLOR_SETS` are kept but the differ reports them as
    /// out of range.
    pub fn with_colors(
        mut self,
        channel: usize,
        colors: impl IntoIterator<Item = impl Into<Color4>>,
    ) -> Self {
        if channel >= MAX_COLOR_SETS {
            log::warn!(
                "Color channel {channel} of mesh {} is past the {MAX_COLOR_SETS} supported slots",
                self.name
            );
        }
        if self.colors.len() <= channel {
            self.colors.resize(channel + 1, None);
        }
        self.colors[channel] = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    /// Populate texture coordinate channel `channel`, growing the slot list if needed.
    ///
    /// Same slot limit rule as `with_colors`, against `MAX_TEXTURE_COORDS`.
    pub fn with_texture_coords(
        mut self,
        channel: usize,
        coords: impl IntoIterator<Item = impl Into<Vec3>>,
    ) -> Self {
        if channel >= MAX_TEXTURE_COORDS {
            log::warn!(
                "Texture coord channel {channel} of mesh {} is past the {MAX_TEXTURE_COORDS} supported slots",
                self.name
            );
        }
        if self.texture_coords.len() <= channel {
            self.texture_coords.resize(channel + 1, None);
        }
        self.texture_coords[channel] = Some(coords.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tangents_and_bitangents(
        mut self,
        tangents: impl IntoIterator<Item = impl Into<Vec3>>,
        bitangents: impl IntoIterator<Item = impl Into<Vec3>>,
    ) -> Self {
        self.tangents = Some(tangents.into_iter().map(Into::into).collect());
        self.bitangents = Some(bitangents.into_iter().map(Into::into).collect());
        self
    }

    pub fn has_positions(&self) -> bool {
        self.positions.is_some()
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn has_vertex_colors(&self, channel: usize) -> bool {
        self.color_channel(channel).is_some()
    }

    pub fn has_texture_coords(&self, channel: usize) -> bool {
        self.texture_coord_channel(channel).is_some()
    }

    /// Tangents only count as present together with their bitangents.
    pub fn has_tangents_and_bitangents(&self) -> bool {
        self.tangents.is_some() && self.bitangents.is_some()
    }

    pub fn color_channel(&self, channel: usize) -> Option<&[Color4]> {
        self.colors.get(channel)?.as_deref()
    }

    pub fn texture_coord_channel(&self, channel: usize) -> Option<&[Vec3]> {
        self.texture_coords.get(channel)?.as_deref()
    }
}
