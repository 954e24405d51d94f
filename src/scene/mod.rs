//! Retained sub-scene: composite transforms, named nodes, and the
//! single-occupant content slot.

/// Axis helper subtree construction.
pub mod axes;
/// CPU-side mesh data and primitive constructors.
pub mod mesh;

use glam::{Mat4, Vec3};

pub use mesh::{Mesh, TextureImage, Vertex};

/// Named composite transform: per-axis rotations plus a translation.
///
/// The constituent parts are public for direct mutation; the demo spins
/// its cube by writing `rotate_x`/`rotate_y` every frame. `matrix()`
/// applies translation, then Z, Y, X rotations in that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rotation about the X axis, in degrees.
    pub rotate_x: f32,
    /// Rotation about the Y axis, in degrees.
    pub rotate_y: f32,
    /// Rotation about the Z axis, in degrees.
    pub rotate_z: f32,
    /// Translation applied before the rotations.
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
        rotate_z: 0.0,
        translation: Vec3::ZERO,
    };

    /// A pure translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// The composite matrix `T · Rz · Ry · Rx`.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_z(self.rotate_z.to_radians())
            * Mat4::from_rotation_y(self.rotate_y.to_radians())
            * Mat4::from_rotation_x(self.rotate_x.to_radians())
    }
}

/// A named scene node: a transform, an optional mesh, and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node name, for identification in logs and tests.
    pub name: String,
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// Mesh drawn at this node, if any.
    pub mesh: Option<Mesh>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Node {
    /// An empty group node.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: None,
            children: Vec::new(),
        }
    }

    /// A leaf node carrying a mesh.
    #[must_use]
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    /// Flatten this subtree into draw items with world matrices.
    #[must_use]
    pub fn flatten(&self) -> Vec<DrawItem<'_>> {
        let mut items = Vec::new();
        self.collect(Mat4::IDENTITY, &mut items);
        items
    }

    fn collect<'a>(&'a self, parent: Mat4, items: &mut Vec<DrawItem<'a>>) {
        let world = parent * self.transform.matrix();
        if let Some(mesh) = &self.mesh {
            items.push(DrawItem { mesh, world });
        }
        for child in &self.children {
            child.collect(world, items);
        }
    }
}

/// A mesh paired with its world matrix, ready for upload.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    /// The mesh to draw.
    pub mesh: &'a Mesh,
    /// Composed model-to-world matrix.
    pub world: Mat4,
}

/// The viewport's sub-scene: background color, one content slot, and the
/// axis-helper attachment point.
///
/// `revision` bumps whenever scene topology changes (content replaced,
/// axes attached/detached) so the renderer knows to re-upload geometry;
/// per-frame transform mutation does not bump it.
pub struct Scene {
    /// Clear color for the viewport background.
    pub background: [f32; 4],
    content: Option<Node>,
    axes: Option<Node>,
    revision: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// An empty scene with a dark background.
    #[must_use]
    pub fn new() -> Self {
        Self {
            background: [0.08, 0.08, 0.1, 1.0],
            content: None,
            axes: None,
            revision: 0,
        }
    }

    /// Replace the content node, returning the previous occupant.
    ///
    /// The slot holds at most one node; replacing detaches the old node
    /// but does not destroy it.
    pub fn set_content(&mut self, node: Node) -> Option<Node> {
        self.revision += 1;
        self.content.replace(node)
    }

    /// Detach and return the content node.
    pub fn take_content(&mut self) -> Option<Node> {
        self.revision += 1;
        self.content.take()
    }

    /// The current content node.
    #[must_use]
    pub fn content(&self) -> Option<&Node> {
        self.content.as_ref()
    }

    /// Mutable access to the content node.
    pub fn content_mut(&mut self) -> Option<&mut Node> {
        self.content.as_mut()
    }

    /// Attach the axis-helper subtree.
    pub fn attach_axes(&mut self, node: Node) {
        self.revision += 1;
        self.axes = Some(node);
    }

    /// Detach and return the axis-helper subtree.
    pub fn detach_axes(&mut self) -> Option<Node> {
        self.revision += 1;
        self.axes.take()
    }

    /// Whether the axis-helper subtree is attached.
    #[must_use]
    pub fn axes_attached(&self) -> bool {
        self.axes.is_some()
    }

    /// Topology revision counter for renderer cache invalidation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Flatten content and (if attached) axes into draw items.
    #[must_use]
    pub fn draw_items(&self) -> Vec<DrawItem<'_>> {
        let mut items = Vec::new();
        if let Some(content) = &self.content {
            items.extend(content.flatten());
        }
        if let Some(axes) = &self.axes {
            items.extend(axes.flatten());
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_slot_holds_one_node() {
        let mut scene = Scene::new();
        assert!(scene.set_content(Node::group("first")).is_none());
        let displaced = scene.set_content(Node::group("second"));
        assert_eq!(displaced.map(|n| n.name), Some("first".to_owned()));
        assert_eq!(scene.content().map(|n| n.name.as_str()), Some("second"));
    }

    #[test]
    fn transform_translates_after_rotating() {
        let mut t = Transform::from_translation(Vec3::new(10.0, 0.0, 0.0));
        t.rotate_y = 90.0;
        // Rotation happens in the node's local frame; translation in the
        // parent frame.
        let p = t.matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(10.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn flatten_composes_parent_and_child_matrices() {
        let mut parent = Node::group("parent");
        parent.transform.rotate_z = 90.0;
        let mut child = Node::with_mesh("child", Mesh::cuboid(1.0, 1.0, 1.0));
        child.transform.translation = Vec3::new(0.0, 30.0, 0.0);
        parent.children.push(child);

        let items = parent.flatten();
        assert_eq!(items.len(), 1);
        // Rz(90°) carries the child's +Y offset onto -X.
        let origin = items[0].world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(-30.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn revision_tracks_topology_not_transforms() {
        let mut scene = Scene::new();
        let r0 = scene.revision();
        let _ = scene.set_content(Node::group("content"));
        assert!(scene.revision() > r0);

        let r1 = scene.revision();
        if let Some(node) = scene.content_mut() {
            node.transform.rotate_x += 5.0;
        }
        assert_eq!(scene.revision(), r1);
    }
}
