use serde::{Deserialize, Serialize};

/// Anti-aliasing mode for the viewport surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Msaa {
    /// No multisampling.
    Off,
    /// 4x multisampling with a resolve to the swapchain.
    X4,
}

impl Msaa {
    /// Sample count for pipeline and attachment creation.
    #[must_use]
    pub fn sample_count(self) -> u32 {
        match self {
            Self::Off => 1,
            Self::X4 => 4,
        }
    }
}

/// Viewport surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewportOptions {
    /// Whether to create and test against a depth buffer.
    pub depth_buffer: bool,
    /// Multisampling mode.
    pub antialiasing: Msaa,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            depth_buffer: true,
            antialiasing: Msaa::X4,
        }
    }
}
