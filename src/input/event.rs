/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// applies them to the camera rig. The `viewer` feature translates winit
/// window events into this shape; tests construct them directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A pointer button went down at the given position.
    PointerPressed {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// The pointer moved while at least one button was held.
    PointerDragged {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
        /// Buttons held during this drag event.
        buttons: PointerButtons,
        /// Modifier keys held during this drag event.
        modifiers: Modifiers,
    },
    /// Scroll wheel or trackpad scroll.
    Scroll {
        /// Horizontal scroll amount.
        delta_x: f32,
        /// Vertical scroll amount.
        delta_y: f32,
        /// Number of touch points on the scrolling surface; greater than
        /// zero marks a trackpad/touch scroll, which pans instead of
        /// zooming.
        touch_points: u32,
    },
    /// Pinch/magnify zoom gesture.
    Zoom {
        /// Zoom factor for this gesture step; only factors strictly
        /// between 0.8 and 1.2 are applied, anything else is dropped.
        factor: f32,
    },
}

/// Pointer buttons held during a drag.
///
/// Handlers test primary, then secondary, then middle; at most one branch
/// applies per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerButtons {
    /// Primary (left) button.
    pub primary: bool,
    /// Secondary (right) button.
    pub secondary: bool,
    /// Middle button (wheel click).
    pub middle: bool,
}

impl PointerButtons {
    /// Whether any button is held.
    #[must_use]
    pub fn any(&self) -> bool {
        self.primary || self.secondary || self.middle
    }
}

/// Modifier keys that scale drag sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Precise modifier (Ctrl): sensitivity × 0.1.
    pub precise: bool,
    /// Coarse modifier (Shift): sensitivity × 10.
    pub coarse: bool,
}

#[cfg(feature = "viewer")]
impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        Self {
            precise: state.control_key(),
            coarse: state.shift_key(),
        }
    }
}
