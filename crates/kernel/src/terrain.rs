use glam::Vec4;

/// The renderer's side of terrain ownership.
///
/// The world owns the terrain mesh; the renderer only draws it. When the world
/// destroys the mesh it calls [`remove_terrain`](Self::remove_terrain) exactly
/// once, before its own handle to the mesh is cleared.
pub trait TerrainSlot {
    fn remove_terrain(&mut self);
}

/// Indexed triangle mesh used for terrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec4>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Release vertex and index storage.
    pub fn destroy(&mut self) {
        self.vertices = Vec::new();
        self.indices = Vec::new();
    }
}
