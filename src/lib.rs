// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics math: float casts and comparisons are pervasive and intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::use_self)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::too_many_lines)]

//! Embeddable 3D viewport widget built on wgpu.
//!
//! Gantry hosts a caller-supplied 3D content node inside a small retained
//! sub-scene, positions a perspective camera behind an orbital transform
//! rig, and translates pointer, scroll, pinch, and key input into camera
//! orbit, pan, dolly, and zoom operations.
//!
//! # Key entry points
//!
//! - [`viewport::Viewport`] - the viewer container (scene + rig + input)
//! - [`camera::rig::CameraRig`] - the clamped orbital camera state
//! - [`input::InputEvent`] - platform-agnostic input events
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! The control core is GPU-free: [`input::InputProcessor`] converts raw
//! event deltas into [`camera::rig::CameraRig`] mutations, and the rig maps
//! its scalar state to a camera-to-world matrix as a pure function. The
//! [`gpu`] module supplies a compact forward pass that draws the scene's
//! flattened mesh nodes; the optional `viewer` feature adds a winit window
//! that pumps platform events into the viewport.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod scene;
pub mod viewport;

#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::GantryError;
pub use input::{InputEvent, Modifiers, PointerButtons};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
pub use viewport::Viewport;
