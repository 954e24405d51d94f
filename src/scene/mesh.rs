//! CPU-side mesh data and primitive constructors.

use std::f32::consts::TAU;

/// A single mesh vertex: position, normal, texture coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in model space.
    pub position: [f32; 3],
    /// Surface normal (normalized).
    pub normal: [f32; 3],
    /// Texture coordinates in `[0, 1]`.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Vertex buffer layout: position (loc 0), normal (loc 1), uv (loc 2).
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> =
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        };

    fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// A small RGBA8 texture image uploadable to the GPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Tightly packed RGBA8 texel data, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// A square checkerboard alternating between two RGBA8 colors.
    ///
    /// `size` is the edge length in texels, `cells` the number of checker
    /// squares per edge.
    #[must_use]
    pub fn checker(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let cell = (size / cells.max(1)).max(1);
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let parity = ((x / cell) + (y / cell)) % 2;
                let texel = if parity == 0 { a } else { b };
                rgba.extend_from_slice(&texel);
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }
}

/// CPU-side triangle mesh with a base color and optional texture.
///
/// The base color multiplies the sampled texture; untextured meshes are
/// drawn against an implicit 1×1 white texel.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
    /// Base RGBA color multiplied into the fragment output.
    pub color: [f32; 4],
    /// Optional texture image.
    pub texture: Option<TextureImage>,
}

impl Mesh {
    /// Replace the base color.
    #[must_use]
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    /// Attach a texture image.
    #[must_use]
    pub fn with_texture(mut self, texture: TextureImage) -> Self {
        self.texture = Some(texture);
        self
    }

    /// An axis-aligned box centered at the origin.
    ///
    /// Each face carries its own four vertices so normals stay flat.
    #[must_use]
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
        #[rustfmt::skip]
        let vertices = vec![
            // Front (Z+)
            Vertex::new([-hw, -hh,  hd], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([ hw, -hh,  hd], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([ hw,  hh,  hd], [0.0, 0.0, 1.0], [1.0, 1.0]),
            Vertex::new([-hw,  hh,  hd], [0.0, 0.0, 1.0], [0.0, 1.0]),
            // Back (Z-)
            Vertex::new([ hw, -hh, -hd], [0.0, 0.0, -1.0], [0.0, 0.0]),
            Vertex::new([-hw, -hh, -hd], [0.0, 0.0, -1.0], [1.0, 0.0]),
            Vertex::new([-hw,  hh, -hd], [0.0, 0.0, -1.0], [1.0, 1.0]),
            Vertex::new([ hw,  hh, -hd], [0.0, 0.0, -1.0], [0.0, 1.0]),
            // Top (Y+)
            Vertex::new([-hw,  hh,  hd], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([ hw,  hh,  hd], [0.0, 1.0, 0.0], [1.0, 0.0]),
            Vertex::new([ hw,  hh, -hd], [0.0, 1.0, 0.0], [1.0, 1.0]),
            Vertex::new([-hw,  hh, -hd], [0.0, 1.0, 0.0], [0.0, 1.0]),
            // Bottom (Y-)
            Vertex::new([-hw, -hh, -hd], [0.0, -1.0, 0.0], [0.0, 0.0]),
            Vertex::new([ hw, -hh, -hd], [0.0, -1.0, 0.0], [1.0, 0.0]),
            Vertex::new([ hw, -hh,  hd], [0.0, -1.0, 0.0], [1.0, 1.0]),
            Vertex::new([-hw, -hh,  hd], [0.0, -1.0, 0.0], [0.0, 1.0]),
            // Right (X+)
            Vertex::new([ hw, -hh,  hd], [1.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([ hw, -hh, -hd], [1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([ hw,  hh, -hd], [1.0, 0.0, 0.0], [1.0, 1.0]),
            Vertex::new([ hw,  hh,  hd], [1.0, 0.0, 0.0], [0.0, 1.0]),
            // Left (X-)
            Vertex::new([-hw, -hh, -hd], [-1.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([-hw, -hh,  hd], [-1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([-hw,  hh,  hd], [-1.0, 0.0, 0.0], [1.0, 1.0]),
            Vertex::new([-hw,  hh, -hd], [-1.0, 0.0, 0.0], [0.0, 1.0]),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0,  1,  2,  2,  3,  0,   // front
            4,  5,  6,  6,  7,  4,   // back
            8,  9,  10, 10, 11, 8,   // top
            12, 13, 14, 14, 15, 12,  // bottom
            16, 17, 18, 18, 19, 16,  // right
            20, 21, 22, 22, 23, 20,  // left
        ];
        Self {
            vertices,
            indices,
            color: [1.0, 1.0, 1.0, 1.0],
            texture: None,
        }
    }

    /// A capped cylinder centered at the origin, aligned with the Y axis.
    #[must_use]
    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let hh = height / 2.0;
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        // Side: two rings of vertices with outward normals. The seam
        // vertex is duplicated so uv.x runs a clean 0..1.
        for i in 0..=segments {
            let angle = TAU * (i as f32) / (segments as f32);
            let (sin, cos) = angle.sin_cos();
            let u = i as f32 / segments as f32;
            vertices.push(Vertex::new(
                [radius * cos, -hh, radius * sin],
                [cos, 0.0, sin],
                [u, 0.0],
            ));
            vertices.push(Vertex::new(
                [radius * cos, hh, radius * sin],
                [cos, 0.0, sin],
                [u, 1.0],
            ));
        }
        for i in 0..segments {
            let base = i * 2;
            indices.extend_from_slice(&[
                base,
                base + 1,
                base + 2,
                base + 2,
                base + 1,
                base + 3,
            ]);
        }

        // Caps: center vertex plus a ring with axial normals.
        for (y, normal) in [(-hh, [0.0, -1.0, 0.0]), (hh, [0.0, 1.0, 0.0])] {
            let center = vertices.len() as u32;
            vertices.push(Vertex::new([0.0, y, 0.0], normal, [0.5, 0.5]));
            for i in 0..=segments {
                let angle = TAU * (i as f32) / (segments as f32);
                let (sin, cos) = angle.sin_cos();
                vertices.push(Vertex::new(
                    [radius * cos, y, radius * sin],
                    normal,
                    [0.5 + cos / 2.0, 0.5 + sin / 2.0],
                ));
            }
            for i in 0..segments {
                let (a, b) = (center + 1 + i, center + 2 + i);
                if normal[1] < 0.0 {
                    indices.extend_from_slice(&[center, a, b]);
                } else {
                    indices.extend_from_slice(&[center, b, a]);
                }
            }
        }

        Self {
            vertices,
            indices,
            color: [1.0, 1.0, 1.0, 1.0],
            texture: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_flat_shaded_faces() {
        let mesh = Mesh::cuboid(50.0, 50.0, 50.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        // All positions sit on the half-extent envelope.
        for v in &mesh.vertices {
            for c in v.position {
                assert!(c.abs() <= 25.0 + 1e-6);
            }
        }
    }

    #[test]
    fn cylinder_counts_match_segments() {
        let segments = 24;
        let mesh = Mesh::cylinder(1.0, 1000.0, segments);
        // Side ring pairs + two caps (center + ring each).
        let expected_vertices = (segments + 1) * 2 + 2 * (segments + 2);
        assert_eq!(mesh.vertices.len(), expected_vertices as usize);
        // Side quads + cap fans.
        let expected_indices = segments * 6 + 2 * segments * 3;
        assert_eq!(mesh.indices.len(), expected_indices as usize);
    }

    #[test]
    fn cylinder_spans_its_height() {
        let mesh = Mesh::cylinder(1.0, 1000.0, 16);
        let min_y = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::INFINITY, f32::min);
        let max_y = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min_y, -500.0);
        assert_eq!(max_y, 500.0);
    }

    #[test]
    fn checker_alternates_cells() {
        let tex = TextureImage::checker(
            4,
            2,
            [255, 255, 255, 255],
            [0, 0, 0, 255],
        );
        assert_eq!(tex.rgba.len(), 4 * 4 * 4);
        // Texel (0,0) is color a, texel (2,0) crosses into color b.
        assert_eq!(&tex.rgba[0..4], &[255, 255, 255, 255]);
        assert_eq!(&tex.rgba[2 * 4..2 * 4 + 4], &[0, 0, 0, 255]);
    }
}
