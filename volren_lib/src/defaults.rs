//! Default values of the pipeline
//!
//! Shared by the volume loader, shader contracts and the application context.

use crate::{color::Color, render::RenderMode};

/// Raw samples are 12-bit, dividing by this maps them to `<0;1>`
pub const SAMPLE_NORMALIZATION: f32 = 4095.0;

/// Central difference half step
pub const GRADIENT_FACTOR: f32 = 0.5;

/// Number of transfer function slots
pub const TF_SLOT_COUNT: usize = 5;

/// Ray-march sample count of the first-hit program
pub const STEPS: i32 = 200;

/// Lowest accepted `steps` value
pub const MIN_STEPS: i32 = 2;

/// Iso-surface density threshold
pub const ISO_VALUE: f32 = 0.3;

/// Surface color of the first-hit program
pub const SURFACE_COLOR: Color = Color::WHITE;

/// Live transfer function point before the first drag
pub const LIVE_DENSITY: f32 = 0.3;
pub const LIVE_INTENSITY: f32 = 1.0;

/// Histogram resolution over `<0;1>`
pub const HISTOGRAM_BINS: usize = 100;

pub const RENDER_MODE: RenderMode = RenderMode::FirstHit;
