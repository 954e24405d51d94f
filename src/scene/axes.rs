//! Axis helper: three colored cylinders marking the world axes.

use glam::Vec3;

use super::{Mesh, Node, Transform};

/// Cylinder radius for each axis marker.
pub const AXIS_RADIUS: f32 = 1.0;
/// Cylinder length for each axis marker.
pub const AXIS_LENGTH: f32 = 1000.0;
/// Perpendicular offset applied in each cylinder's pre-rotation frame.
const AXIS_OFFSET: f32 = 30.0;
/// Tessellation for the cylinder side surface.
const AXIS_SEGMENTS: u32 = 16;

const RED: [f32; 4] = [0.8, 0.1, 0.1, 1.0];
const GREEN: [f32; 4] = [0.1, 0.6, 0.1, 1.0];
const BLUE: [f32; 4] = [0.1, 0.2, 0.8, 1.0];

/// Build the axis-helper subtree: X red, Y green, Z blue.
///
/// Each marker is a rotated group holding an offset cylinder, so the
/// 30-unit offset rides along in the rotated frame, matching a transform
/// list of rotate-then-translate.
#[must_use]
pub fn axis_helper() -> Node {
    let mut root = Node::group("axes");
    root.children.push(marker("axis-x", RED, |t| t.rotate_z = 90.0));
    root.children.push(marker("axis-y", GREEN, |_| ()));
    root.children.push(marker("axis-z", BLUE, |t| t.rotate_x = 90.0));
    root
}

fn marker(
    name: &str,
    color: [f32; 4],
    orient: impl FnOnce(&mut Transform),
) -> Node {
    let mut group = Node::group(name);
    orient(&mut group.transform);

    let mesh = Mesh::cylinder(AXIS_RADIUS, AXIS_LENGTH, AXIS_SEGMENTS)
        .with_color(color);
    let mut body = Node::with_mesh(format!("{name}-body"), mesh);
    body.transform.translation = Vec3::new(0.0, AXIS_OFFSET, 0.0);
    group.children.push(body);

    group
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_has_three_distinctly_colored_markers() {
        let axes = axis_helper();
        let items = axes.flatten();
        assert_eq!(items.len(), 3);
        let mut colors: Vec<[f32; 4]> =
            items.iter().map(|i| i.mesh.color).collect();
        colors.dedup();
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn markers_are_offset_in_their_rotated_frames() {
        let axes = axis_helper();
        let items = axes.flatten();
        // The X marker's rotation carries its +Y offset onto the X axis.
        let x_origin = items[0].world.transform_point3(Vec3::ZERO);
        assert!(x_origin.x.abs() > 1.0);
        assert!(x_origin.y.abs() < 1e-3);
        // The Y marker keeps its offset on Y.
        let y_origin = items[1].world.transform_point3(Vec3::ZERO);
        assert_eq!(y_origin.y, AXIS_OFFSET);
        // The Z marker's rotation carries the offset onto Z.
        let z_origin = items[2].world.transform_point3(Vec3::ZERO);
        assert!(z_origin.z.abs() > 1.0);
    }
}
