//! Shader parameter state
//!
//! A [`ShaderBinding`] holds everything one program needs before it can be
//! drawn: named uniforms, the volume and gradient textures and the compile
//! state. Programs differ only by their [`ProgramSpec`], a table of required
//! uniforms and defaults.

mod binding;
mod compile;
mod program;
mod texture;
mod uniform;

pub use binding::{CompileState, SharedBinding, ShaderBinding};
pub use compile::{
    CompileCompletion, CompileQueue, CompileRequest, CompilerMessage, ImmediateBackend,
    ShaderBackend, ShaderCompiler,
};
pub use program::{DefaultValue, ProgramId, ProgramSpec, UniformRequirement, FIRST_HIT_PROGRAM, MIP_PROGRAM};
pub use texture::{Texture3D, TextureFormat};
pub use uniform::{names, UniformDelta, UniformKind, UniformSink, UniformValue};
