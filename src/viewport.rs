//! The viewer container: sub-scene, camera rig, and input wiring.

use glam::{Mat4, Vec3};

use crate::camera::{Camera, CameraRig};
use crate::input::{InputEvent, InputProcessor, ViewportCommand};
use crate::options::Options;
use crate::scene::{axes, Node, Scene};

/// Callback invoked when the observable camera translation changes.
pub type CameraMovedFn = Box<dyn FnMut(Vec3)>;

/// Embeddable 3D viewport widget.
///
/// Owns the sub-scene (content slot + axis helper), the orbital
/// [`CameraRig`], the projection [`Camera`], and the [`InputProcessor`],
/// and acts as the single input surface for the hosting window. All
/// mutation happens synchronously on the caller's event thread.
pub struct Viewport {
    scene: Scene,
    rig: CameraRig,
    camera: Camera,
    processor: InputProcessor,
    /// The axis subtree parks here while hidden.
    detached_axes: Option<Node>,
    camera_listeners: Vec<CameraMovedFn>,
}

impl Viewport {
    /// Create a viewport with default options.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_options(width, height, &Options::default())
    }

    /// Create a viewport with explicit options.
    ///
    /// The axis helper is built once and starts attached (visible).
    #[must_use]
    pub fn with_options(width: u32, height: u32, options: &Options) -> Self {
        let mut scene = Scene::new();
        scene.attach_axes(axes::axis_helper());
        Self {
            scene,
            rig: CameraRig::new(),
            camera: Camera::new(width, height, &options.camera),
            processor: InputProcessor::with_key_bindings(
                options.keybindings.clone(),
            ),
            detached_axes: None,
            camera_listeners: Vec::new(),
        }
    }

    /// Supply content, returning the displaced occupant if any.
    pub fn set_content(&mut self, node: Node) -> Option<Node> {
        self.scene.set_content(node)
    }

    /// The current content node.
    #[must_use]
    pub fn content(&self) -> Option<&Node> {
        self.scene.content()
    }

    /// Mutable access to the content node (e.g. for animation).
    pub fn content_mut(&mut self) -> Option<&mut Node> {
        self.scene.content_mut()
    }

    /// Whether the axis helper is currently shown.
    #[must_use]
    pub fn axes_visible(&self) -> bool {
        self.scene.axes_attached()
    }

    /// Show or hide the axis helper.
    ///
    /// The setter performs the attach/detach directly; there is no
    /// observed-property machinery.
    pub fn set_axes_visible(&mut self, visible: bool) {
        if visible {
            if let Some(node) = self.detached_axes.take() {
                self.scene.attach_axes(node);
            }
        } else if self.scene.axes_attached() {
            self.detached_axes = self.scene.detach_axes();
        }
    }

    /// Feed a pointer/scroll/zoom event through the input mapper.
    ///
    /// Fires camera-moved listeners when any component of the observable
    /// lens translation changed.
    pub fn handle_event(&mut self, event: InputEvent) {
        let before = self.rig.lens_translation();
        self.processor.handle_event(event, &mut self.rig);
        self.notify_if_moved(before);
    }

    /// Feed a key press (winit `KeyCode` debug-format string).
    ///
    /// Unbound keys are ignored.
    pub fn handle_key(&mut self, key: &str) {
        match self.processor.handle_key_press(key) {
            Some(ViewportCommand::ResetView) => self.rig.reset(),
            Some(ViewportCommand::ToggleAxes) => {
                self.set_axes_visible(!self.axes_visible());
            }
            None => {}
        }
    }

    /// Register a listener for changes to the observable camera
    /// translation (the clamped lens position read by status overlays).
    pub fn on_camera_moved(&mut self, listener: CameraMovedFn) {
        self.camera_listeners.push(listener);
    }

    /// The observable clamped camera translation.
    #[must_use]
    pub fn camera_position(&self) -> Vec3 {
        self.rig.lens_translation()
    }

    /// Update the projection for a resized viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Combined view-projection matrix for rendering.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.camera.build_matrix(self.rig.view_matrix())
    }

    /// The orbital camera rig.
    #[must_use]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// The projection camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The sub-scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the sub-scene (background color, direct edits).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn notify_if_moved(&mut self, before: Vec3) {
        let after = self.rig.lens_translation();
        if after != before {
            for listener in &mut self.camera_listeners {
                listener(after);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn axes_start_visible_and_toggle_round_trips() {
        let mut viewport = Viewport::new(600, 600);
        assert!(viewport.axes_visible());
        assert_eq!(viewport.scene().draw_items().len(), 3);

        viewport.handle_key("KeyX");
        assert!(!viewport.axes_visible());
        assert_eq!(viewport.scene().draw_items().len(), 0);

        viewport.handle_key("KeyX");
        assert!(viewport.axes_visible());
        assert_eq!(viewport.scene().draw_items().len(), 3);
    }

    #[test]
    fn redundant_visibility_writes_are_no_ops() {
        let mut viewport = Viewport::new(600, 600);
        viewport.set_axes_visible(true);
        assert!(viewport.axes_visible());
        viewport.set_axes_visible(false);
        viewport.set_axes_visible(false);
        assert!(!viewport.axes_visible());
        viewport.set_axes_visible(true);
        assert!(viewport.axes_visible());
    }

    #[test]
    fn second_content_node_displaces_the_first() {
        let mut viewport = Viewport::new(600, 600);
        assert!(viewport.set_content(Node::group("first")).is_none());
        let displaced = viewport.set_content(Node::group("second"));
        assert_eq!(displaced.map(|n| n.name), Some("first".to_owned()));
        assert_eq!(
            viewport.content().map(|n| n.name.as_str()),
            Some("second")
        );
    }

    #[test]
    fn reset_key_restores_aim_only() {
        let mut viewport = Viewport::new(600, 600);
        viewport.handle_event(InputEvent::PointerPressed { x: 0.0, y: 0.0 });
        viewport.handle_event(InputEvent::PointerDragged {
            x: 30.0,
            y: -10.0,
            buttons: crate::input::PointerButtons {
                primary: true,
                ..Default::default()
            },
            modifiers: crate::input::Modifiers::default(),
        });
        viewport.handle_event(InputEvent::Scroll {
            delta_x: 0.0,
            delta_y: 100.0,
            touch_points: 0,
        });

        viewport.handle_key("KeyZ");

        assert_eq!(viewport.rig().yaw(), 320.0);
        assert_eq!(viewport.rig().pitch(), 70.0);
        assert_eq!(viewport.rig().pan(), (0.0, 0.0));
        // Lens survives the reset.
        assert_eq!(viewport.camera_position().z, -20.0);
    }

    #[test]
    fn listeners_fire_only_when_lens_moves() {
        let mut viewport = Viewport::new(600, 600);
        let seen: Rc<RefCell<Vec<Vec3>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        viewport.on_camera_moved(Box::new(move |pos| {
            sink.borrow_mut().push(pos);
        }));

        // Orbit drag: lens untouched, no notification.
        viewport.handle_event(InputEvent::PointerPressed { x: 0.0, y: 0.0 });
        viewport.handle_event(InputEvent::PointerDragged {
            x: 10.0,
            y: 0.0,
            buttons: crate::input::PointerButtons {
                primary: true,
                ..Default::default()
            },
            modifiers: crate::input::Modifiers::default(),
        });
        assert!(seen.borrow().is_empty());

        // Wheel scroll moves the lens and notifies.
        viewport.handle_event(InputEvent::Scroll {
            delta_x: 0.0,
            delta_y: 10.0,
            touch_points: 0,
        });
        assert_eq!(seen.borrow().as_slice(), &[Vec3::new(0.0, 0.0, -2.0)]);

        // Clamped-out scroll at the boundary: value unchanged, silent.
        viewport.handle_event(InputEvent::Scroll {
            delta_x: 0.0,
            delta_y: -100.0,
            touch_points: 0,
        });
        assert_eq!(seen.borrow().len(), 2);
        viewport.handle_event(InputEvent::Scroll {
            delta_x: 0.0,
            delta_y: -100.0,
            touch_points: 0,
        });
        assert_eq!(seen.borrow().len(), 2);
    }
}
