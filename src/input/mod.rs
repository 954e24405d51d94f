//! Input mapping: platform-agnostic events and the stateful processor
//! that turns them into camera rig updates.

/// Platform-agnostic input event types.
pub mod event;
/// Event-to-rig-update conversion and key bindings.
pub mod processor;

pub use event::{InputEvent, Modifiers, PointerButtons};
pub use processor::{InputProcessor, KeyBindings, ViewportCommand};
