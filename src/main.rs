//! Demo: a spinning textured cube with a camera-position readout.
//!
//! Drag to orbit, right-drag to dolly, middle-drag to pan, scroll to
//! adjust the lens. `Z` resets the view, `X` toggles the axis helper.

use gantry::scene::{Mesh, Node, TextureImage};
use gantry::Viewer;

/// Cube edge length, matching its distance-scale to the default camera.
const CUBE_SIZE: f32 = 50.0;
/// Initial tilt so three faces are visible at rest.
const INITIAL_TILT: f32 = -20.0;
/// Spin rate in degrees per second (full turn every three seconds).
const SPIN_RATE: f32 = 120.0;

fn main() {
    env_logger::init();

    let result = Viewer::builder()
        .with_title("gantry demo")
        .with_size(600, 600)
        .with_status(|pos| {
            format!("x: {:.1} y: {:.1} z: {:.1}", pos.x, pos.y, pos.z)
        })
        .on_ready(|viewport| {
            viewport.scene_mut().background = [0.68, 0.85, 0.90, 1.0];

            let checker = TextureImage::checker(
                64,
                8,
                [255, 255, 255, 255],
                [64, 64, 64, 255],
            );
            let cube = Mesh::cuboid(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
                .with_color([0.9, 0.2, 0.2, 1.0])
                .with_texture(checker);

            let mut node = Node::with_mesh("cube", cube);
            node.transform.rotate_x = INITIAL_TILT;
            node.transform.rotate_y = INITIAL_TILT;
            let _ = viewport.set_content(node);
        })
        .on_frame(|viewport, dt| {
            if let Some(node) = viewport.content_mut() {
                node.transform.rotate_x =
                    (node.transform.rotate_x + SPIN_RATE * dt) % 360.0;
                node.transform.rotate_y =
                    (node.transform.rotate_y + SPIN_RATE * dt) % 360.0;
            }
        })
        .build()
        .run();

    if let Err(e) = result {
        log::error!("viewer exited with error: {e}");
        std::process::exit(1);
    }
}
