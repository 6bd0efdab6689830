use tracing::debug;

use crate::colormap::Rgb;
use crate::error::RenderError;

/// Index of a vertex slot in the pool arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexId(pub(crate) usize);

/// Index of a quad slot in the pool arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadId(pub(crate) usize);

/// One mesh corner: a position in centered pixel space plus its color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellVertex {
    pub pos: [f64; 2],
    pub color: Rgb,
}

impl CellVertex {
    fn blank() -> Self {
        Self {
            pos: [0.0, 0.0],
            color: Rgb::BLACK,
        }
    }
}

/// One screen cell: four corner vertices, drawable when `visible`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadCell {
    pub corners: [VertexId; 4],
    pub visible: bool,
}

/// Arena-backed pool of mesh geometry.
///
/// Slots are allocated once and cycled between a free list and an active
/// list forever; nothing is destroyed until the program ends, and capacity
/// only ever grows. Every slot index is on exactly one of the two lists at
/// any time. `acquire_*` and `recycle_all` are O(1) per object: plain index
/// pushes and pops, no reallocation in the render loop.
#[derive(Debug, Default)]
pub struct GeometryPool {
    vertices: Vec<CellVertex>,
    quads: Vec<QuadCell>,
    free_vertices: Vec<VertexId>,
    active_vertices: Vec<VertexId>,
    free_quads: Vec<QuadId>,
    active_quads: Vec<QuadId>,
}

impl GeometryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the arena so at least `vertex_count` vertices and `quad_count`
    /// quads exist in total (free + active). Never shrinks.
    pub fn ensure_capacity(&mut self, vertex_count: usize, quad_count: usize) {
        let grow_v = vertex_count.saturating_sub(self.vertices.len());
        let grow_q = quad_count.saturating_sub(self.quads.len());
        if grow_v == 0 && grow_q == 0 {
            return;
        }

        self.vertices.reserve(grow_v);
        self.free_vertices.reserve(grow_v);
        for _ in 0..grow_v {
            let id = VertexId(self.vertices.len());
            self.vertices.push(CellVertex::blank());
            self.free_vertices.push(id);
        }

        self.quads.reserve(grow_q);
        self.free_quads.reserve(grow_q);
        for _ in 0..grow_q {
            let id = QuadId(self.quads.len());
            // Fresh quads point all corners at a placeholder slot; the mesh
            // builder rewires them before they become visible.
            self.quads.push(QuadCell {
                corners: [VertexId(0); 4],
                visible: false,
            });
            self.free_quads.push(id);
        }

        debug!(
            vertices = self.vertices.len(),
            quads = self.quads.len(),
            "Grew geometry pool"
        );
    }

    /// Take one vertex from the free list for active use.
    ///
    /// An empty free list means the controller skipped `ensure_capacity`,
    /// a broken invariant surfaced as an error rather than papered over.
    pub fn acquire_vertex(&mut self) -> crate::Result<VertexId> {
        let id = self
            .free_vertices
            .pop()
            .ok_or_else(|| RenderError::PoolExhausted {
                kind: "vertex",
                active: self.active_vertices.len(),
                capacity: self.vertices.len(),
            })?;
        self.active_vertices.push(id);
        Ok(id)
    }

    /// Take one quad from the free list for active use.
    pub fn acquire_quad(&mut self) -> crate::Result<QuadId> {
        let id = self
            .free_quads
            .pop()
            .ok_or_else(|| RenderError::PoolExhausted {
                kind: "quad",
                active: self.active_quads.len(),
                capacity: self.quads.len(),
            })?;
        self.active_quads.push(id);
        Ok(id)
    }

    /// Return every active object to the free lists. Recycled quads are
    /// marked not-visible so stale cells never flash on screen.
    pub fn recycle_all(&mut self) {
        self.free_vertices.append(&mut self.active_vertices);
        for id in self.active_quads.drain(..) {
            self.quads[id.0].visible = false;
            self.free_quads.push(id);
        }
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> &mut CellVertex {
        &mut self.vertices[id.0]
    }

    pub fn vertex(&self, id: VertexId) -> &CellVertex {
        &self.vertices[id.0]
    }

    pub fn quad_mut(&mut self, id: QuadId) -> &mut QuadCell {
        &mut self.quads[id.0]
    }

    pub fn quad(&self, id: QuadId) -> &QuadCell {
        &self.quads[id.0]
    }

    /// Active quads in acquisition order, for hosts that draw the mesh.
    pub fn active_quads(&self) -> &[QuadId] {
        &self.active_quads
    }

    pub fn vertex_capacity(&self) -> usize {
        self.vertices.len()
    }

    pub fn quad_capacity(&self) -> usize {
        self.quads.len()
    }

    pub fn active_vertex_count(&self) -> usize {
        self.active_vertices.len()
    }

    pub fn active_quad_count(&self) -> usize {
        self.active_quads.len()
    }

    pub fn free_vertex_count(&self) -> usize {
        self.free_vertices.len()
    }

    pub fn free_quad_count(&self) -> usize {
        self.free_quads.len()
    }
}
