mod context;
mod render_mode;
mod render_options;

use std::fmt;

pub use context::{AppContext, UiEvent};
pub use render_mode::{FrameDecision, RenderModeController, SkipReason};
pub use render_options::{RenderOptions, RenderOptionsBuilder};

/// Ray-marching technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Maximum intensity projection
    Mip,
    /// First-hit iso-surface
    FirstHit,
}

impl RenderMode {
    pub const ALL: [RenderMode; 2] = [RenderMode::Mip, RenderMode::FirstHit];
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderMode::Mip => "MIP",
            RenderMode::FirstHit => "first hit",
        };
        f.write_str(name)
    }
}
