//! Converts raw input events into camera rig updates.
//!
//! The `InputProcessor` owns all transient input state (the pointer drag
//! tracker) and the key-binding map. It is the only thing that sits
//! between platform events and the [`CameraRig`], and it never touches
//! rendering; commands that concern container-owned state (axis
//! visibility, view reset) are returned to the caller instead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::{InputEvent, Modifiers};
use crate::camera::rig::CameraRig;

/// Sensitivity multiplier while the precise (Ctrl) modifier is held.
const PRECISE_MULTIPLIER: f32 = 0.1;
/// Sensitivity multiplier while the coarse (Shift) modifier is held.
const COARSE_MULTIPLIER: f32 = 10.0;
/// Base pointer speed for dolly and pan drags.
const POINTER_SPEED: f32 = 0.1;
/// Orbit speed for primary-button drags.
const ROTATION_SPEED: f32 = 2.0;
/// Extra damping applied to middle-button pan drags.
const TRACK_SPEED: f32 = 0.3;
/// Lens translation per unit of wheel scroll.
const SCROLL_LENS_SPEED: f32 = 0.2;
/// Pivot pan per unit of trackpad scroll.
const TOUCH_PAN_SPEED: f32 = 0.01;
/// Pinch factors at or below this bound are dropped.
const ZOOM_FACTOR_MIN: f32 = 0.8;
/// Pinch factors at or above this bound are dropped.
const ZOOM_FACTOR_MAX: f32 = 1.2;

/// Commands produced by key presses that the viewer container executes.
///
/// Parameterized camera motion is applied to the rig directly by the
/// processor; only discrete actions that touch container-owned state are
/// surfaced as commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportCommand {
    /// Restore pan and orbit angles to their initial values.
    ResetView,
    /// Flip axis-helper visibility.
    ToggleAxes,
}

/// Serializable tag for key-bindable commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Restore pan and orbit angles to their initial values.
    ResetView,
    /// Flip axis-helper visibility.
    ToggleAxes,
}

impl KeyCommandTag {
    fn to_command(self) -> ViewportCommand {
        match self {
            Self::ResetView => ViewportCommand::ResetView,
            Self::ToggleAxes => ViewportCommand::ToggleAxes,
        }
    }
}

/// Maps physical key strings to [`ViewportCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format: `"KeyZ"`,
/// `"KeyX"`, `"Escape"`, etc. Unbound keys are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyZ".into(), KeyCommandTag::ResetView),
            ("KeyX".into(), KeyCommandTag::ToggleAxes),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewportCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }
}

/// Pointer drag tracker: last/current coordinates and their delta.
///
/// Reset on every press, shifted on every drag. Owned solely by the
/// processor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct DragTracker {
    last_x: f32,
    last_y: f32,
    current_x: f32,
    current_y: f32,
    delta_x: f32,
    delta_y: f32,
}

impl DragTracker {
    /// Record a press: both last and current snap to the press position.
    fn press(&mut self, x: f32, y: f32) {
        self.current_x = x;
        self.current_y = y;
        self.last_x = x;
        self.last_y = y;
        self.delta_x = 0.0;
        self.delta_y = 0.0;
    }

    /// Record a drag: current becomes last, then the new position lands.
    fn drag(&mut self, x: f32, y: f32) {
        self.last_x = self.current_x;
        self.last_y = self.current_y;
        self.current_x = x;
        self.current_y = y;
        self.delta_x = self.current_x - self.last_x;
        self.delta_y = self.current_y - self.last_y;
    }
}

/// Stateful input mapper for the viewport.
///
/// Holds the [`DragTracker`] and [`KeyBindings`]; invoked by the host's
/// event dispatch with explicit event data. Every handler runs to
/// completion synchronously and never fails — malformed gesture input is
/// silently dropped.
pub struct InputProcessor {
    drag: DragTracker,
    key_bindings: KeyBindings,
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProcessor {
    /// Create a processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            drag: DragTracker::default(),
            key_bindings: KeyBindings::default(),
        }
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewportCommand> {
        self.key_bindings.lookup(key)
    }

    /// Apply a pointer/scroll/zoom event to the rig.
    pub fn handle_event(&mut self, event: InputEvent, rig: &mut CameraRig) {
        match event {
            InputEvent::PointerPressed { x, y } => self.drag.press(x, y),
            InputEvent::PointerDragged {
                x,
                y,
                buttons,
                modifiers,
            } => {
                self.drag.drag(x, y);
                let multiplier = drag_multiplier(modifiers);
                let dx = self.drag.delta_x;
                let dy = self.drag.delta_y;

                if buttons.primary {
                    rig.orbit_by(
                        -dx * multiplier * ROTATION_SPEED,
                        dy * multiplier * ROTATION_SPEED,
                    );
                } else if buttons.secondary {
                    rig.dolly_by(dx * POINTER_SPEED * multiplier);
                } else if buttons.middle {
                    rig.pan_by(
                        dx * POINTER_SPEED * multiplier * TRACK_SPEED,
                        dy * POINTER_SPEED * multiplier * TRACK_SPEED,
                    );
                }
            }
            InputEvent::Scroll {
                delta_x,
                delta_y,
                touch_points,
            } => {
                if touch_points > 0 {
                    // Trackpad scroll pans the pivot; the lens is untouched.
                    rig.pan_by(
                        -(TOUCH_PAN_SPEED * delta_x),
                        TOUCH_PAN_SPEED * delta_y,
                    );
                } else {
                    rig.lens_by(-(delta_y * SCROLL_LENS_SPEED));
                }
            }
            InputEvent::Zoom { factor } => {
                if !factor.is_nan()
                    && factor > ZOOM_FACTOR_MIN
                    && factor < ZOOM_FACTOR_MAX
                {
                    rig.set_lens_z(rig.lens_z() / factor);
                } else {
                    log::trace!("dropping out-of-band zoom factor {factor}");
                }
            }
        }
    }
}

/// Drag sensitivity from modifier state.
///
/// Sequential assignments, not exclusive branches: precise is tested
/// first, and coarse overwrites it when both modifiers are held. The
/// ordering is load-bearing.
fn drag_multiplier(modifiers: Modifiers) -> f32 {
    let mut multiplier = 1.0;
    if modifiers.precise {
        multiplier = PRECISE_MULTIPLIER;
    }
    if modifiers.coarse {
        multiplier = COARSE_MULTIPLIER;
    }
    multiplier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::PointerButtons;

    fn primary() -> PointerButtons {
        PointerButtons {
            primary: true,
            ..Default::default()
        }
    }

    fn drag(
        x: f32,
        y: f32,
        buttons: PointerButtons,
        modifiers: Modifiers,
    ) -> InputEvent {
        InputEvent::PointerDragged {
            x,
            y,
            buttons,
            modifiers,
        }
    }

    fn pressed_at_origin() -> (InputProcessor, CameraRig) {
        let mut processor = InputProcessor::new();
        let mut rig = CameraRig::new();
        processor
            .handle_event(InputEvent::PointerPressed { x: 0.0, y: 0.0 }, &mut rig);
        (processor, rig)
    }

    #[test]
    fn primary_drag_orbits_with_exact_speeds() {
        let (mut processor, mut rig) = pressed_at_origin();
        processor.handle_event(
            drag(10.0, 0.0, primary(), Modifiers::default()),
            &mut rig,
        );
        assert_eq!(rig.yaw(), 320.0 - 20.0);
        assert_eq!(rig.pitch(), 70.0);
    }

    #[test]
    fn buttonless_drag_changes_nothing() {
        let (mut processor, mut rig) = pressed_at_origin();
        let before = rig.clone();
        processor.handle_event(
            drag(55.0, -40.0, PointerButtons::default(), Modifiers::default()),
            &mut rig,
        );
        assert_eq!(rig, before);
    }

    #[test]
    fn secondary_drag_moves_dolly_only() {
        let (mut processor, mut rig) = pressed_at_origin();
        let buttons = PointerButtons {
            secondary: true,
            ..Default::default()
        };
        processor
            .handle_event(drag(10.0, 5.0, buttons, Modifiers::default()), &mut rig);
        assert_eq!(rig.dolly_z(), -450.0 + 1.0);
        assert_eq!(rig.yaw(), 320.0);
        assert_eq!(rig.pan(), (0.0, 0.0));
    }

    #[test]
    fn middle_drag_pans_with_track_damping() {
        let (mut processor, mut rig) = pressed_at_origin();
        let buttons = PointerButtons {
            middle: true,
            ..Default::default()
        };
        processor
            .handle_event(drag(10.0, 20.0, buttons, Modifiers::default()), &mut rig);
        let (pan_x, pan_y) = rig.pan();
        assert!((pan_x - 10.0 * 0.1 * 0.3).abs() < 1e-6);
        assert!((pan_y - 20.0 * 0.1 * 0.3).abs() < 1e-6);
    }

    #[test]
    fn primary_wins_over_other_buttons() {
        let (mut processor, mut rig) = pressed_at_origin();
        let buttons = PointerButtons {
            primary: true,
            secondary: true,
            middle: true,
        };
        processor
            .handle_event(drag(10.0, 0.0, buttons, Modifiers::default()), &mut rig);
        assert_eq!(rig.yaw(), 300.0);
        assert_eq!(rig.dolly_z(), -450.0);
        assert_eq!(rig.pan(), (0.0, 0.0));
    }

    #[test]
    fn precise_modifier_scales_down() {
        let (mut processor, mut rig) = pressed_at_origin();
        let modifiers = Modifiers {
            precise: true,
            coarse: false,
        };
        processor.handle_event(drag(10.0, 0.0, primary(), modifiers), &mut rig);
        assert!((rig.yaw() - (320.0 - 2.0)).abs() < 1e-5);
    }

    #[test]
    fn coarse_overrides_precise_when_both_held() {
        // Sequential-assignment semantics: coarse is checked second and
        // overwrites the precise multiplier.
        let (mut processor, mut rig) = pressed_at_origin();
        let modifiers = Modifiers {
            precise: true,
            coarse: true,
        };
        processor.handle_event(drag(1.0, 0.0, primary(), modifiers), &mut rig);
        assert!((rig.yaw() - (320.0 - 20.0)).abs() < 1e-4);
    }

    #[test]
    fn drag_deltas_are_relative_to_previous_drag() {
        let (mut processor, mut rig) = pressed_at_origin();
        processor.handle_event(
            drag(10.0, 0.0, primary(), Modifiers::default()),
            &mut rig,
        );
        processor.handle_event(
            drag(15.0, 0.0, primary(), Modifiers::default()),
            &mut rig,
        );
        // 10 then 5 units of motion: yaw falls by 20 then 10.
        assert_eq!(rig.yaw(), 320.0 - 30.0);
    }

    #[test]
    fn press_resets_drag_tracking() {
        let (mut processor, mut rig) = pressed_at_origin();
        processor.handle_event(
            drag(10.0, 0.0, primary(), Modifiers::default()),
            &mut rig,
        );
        // New press elsewhere: the next drag measures from the press point.
        processor.handle_event(
            InputEvent::PointerPressed { x: 100.0, y: 100.0 },
            &mut rig,
        );
        let yaw_before = rig.yaw();
        processor.handle_event(
            drag(100.0, 100.0, primary(), Modifiers::default()),
            &mut rig,
        );
        assert_eq!(rig.yaw(), yaw_before);
    }

    #[test]
    fn touch_scroll_pans_and_leaves_lens_alone() {
        let mut processor = InputProcessor::new();
        let mut rig = CameraRig::new();
        processor.handle_event(
            InputEvent::Scroll {
                delta_x: 100.0,
                delta_y: 50.0,
                touch_points: 2,
            },
            &mut rig,
        );
        let (pan_x, pan_y) = rig.pan();
        assert!((pan_x + 1.0).abs() < 1e-6);
        assert!((pan_y - 0.5).abs() < 1e-6);
        assert_eq!(rig.lens_z(), 0.0);
    }

    #[test]
    fn wheel_scroll_moves_lens() {
        let mut processor = InputProcessor::new();
        let mut rig = CameraRig::new();
        rig.set_lens_z(-5.0);
        processor.handle_event(
            InputEvent::Scroll {
                delta_x: 0.0,
                delta_y: 10.0,
                touch_points: 0,
            },
            &mut rig,
        );
        assert_eq!(rig.lens_z(), -7.0);
    }

    #[test]
    fn lens_stays_in_range_under_scroll_and_zoom_sequences() {
        let mut processor = InputProcessor::new();
        let mut rig = CameraRig::new();
        let deltas = [5000.0, -12_000.0, 80.0, -3.5, 9999.0, -9999.0];
        for (i, delta) in deltas.iter().cycle().take(60).enumerate() {
            if i % 2 == 0 {
                processor.handle_event(
                    InputEvent::Scroll {
                        delta_x: 0.0,
                        delta_y: *delta,
                        touch_points: 0,
                    },
                    &mut rig,
                );
            } else {
                processor.handle_event(
                    InputEvent::Zoom { factor: 0.85 },
                    &mut rig,
                );
            }
            assert!(rig.lens_z() >= -1000.0);
            assert!(rig.lens_z() <= 0.0);
        }
    }

    #[test]
    fn zoom_divides_lens_within_band() {
        let mut processor = InputProcessor::new();
        let mut rig = CameraRig::new();
        rig.set_lens_z(-100.0);
        processor.handle_event(InputEvent::Zoom { factor: 1.1 }, &mut rig);
        assert!((rig.lens_z() + 100.0 / 1.1).abs() < 1e-4);
    }

    #[test]
    fn out_of_band_zoom_factors_are_dropped() {
        let mut processor = InputProcessor::new();
        let mut rig = CameraRig::new();
        rig.set_lens_z(-100.0);
        for factor in [0.8, 0.5, 1.2, 3.0, f32::NAN, 0.0, -1.0] {
            processor.handle_event(InputEvent::Zoom { factor }, &mut rig);
            assert_eq!(rig.lens_z(), -100.0);
        }
    }

    #[test]
    fn default_bindings_cover_reset_and_axes() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.handle_key_press("KeyZ"),
            Some(ViewportCommand::ResetView)
        );
        assert_eq!(
            processor.handle_key_press("KeyX"),
            Some(ViewportCommand::ToggleAxes)
        );
        assert_eq!(processor.handle_key_press("KeyQ"), None);
    }
}
