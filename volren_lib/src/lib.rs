//! Volumetric data and shader-parameter pipeline.
//!
//! Loads a regular grid of 12-bit samples, derives its gradient field and
//! keeps the uniform state of the two ray-marching programs
//! (maximum-intensity projection and first-hit iso-surface) in sync with
//! user edits of the transfer function.
//!
//! The GPU backend, camera and chart widgets live outside of this crate.
//! They talk to it through [`render::AppContext`], which consumes
//! [`render::UiEvent`]s and hands back [`shader::UniformDelta`]s.

pub mod color;
pub mod common;
pub mod defaults;
mod error;
pub mod render;
pub mod shader;
pub mod test_helpers;
pub mod transfer;
pub mod volumetric;

pub use error::{Result, VolumeError};
pub use render::{AppContext, FrameDecision, RenderMode, RenderModeController, RenderOptions, UiEvent};
pub use shader::{ShaderBinding, UniformSink, UniformValue};
pub use transfer::TransferFunctionModel;
pub use volumetric::VolumeField;
