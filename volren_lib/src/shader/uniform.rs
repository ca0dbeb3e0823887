use nalgebra::{Vector3, Vector4};

use super::Texture3D;

/// Uniform names shared with the shader sources
pub mod names {
    pub const VOLUME: &str = "volume";
    pub const GRADIENT: &str = "gradient";
    pub const VOLUME_DIMS: &str = "volume_dims";
    pub const VOLUME_SCALE: &str = "volume_scale";
    pub const STEPS: &str = "steps";
    pub const ISO_VALUE: &str = "iso_value";
    pub const COLOR: &str = "color";
    pub const CAMERA_POS: &str = "camera_pos";
}

/// Type tag of a uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Float,
    Int,
    Vec3,
    Vec4,
    Texture3D,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Texture3D(Texture3D),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Int(_) => UniformKind::Int,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
            UniformValue::Texture3D(_) => UniformKind::Texture3D,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            UniformValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vector3<f32>> {
        match self {
            UniformValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<Vector4<f32>> {
        match self {
            UniformValue::Vec4(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_texture(&self) -> Option<&Texture3D> {
        match self {
            UniformValue::Texture3D(t) => Some(t),
            _ => None,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        UniformValue::Int(v)
    }
}

impl From<Vector3<f32>> for UniformValue {
    fn from(v: Vector3<f32>) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Vector4<f32>> for UniformValue {
    fn from(v: Vector4<f32>) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<Texture3D> for UniformValue {
    fn from(t: Texture3D) -> Self {
        UniformValue::Texture3D(t)
    }
}

/// Anything accepting named uniform values
pub trait UniformSink {
    /// Store `value` under `name`, replacing the previous value
    fn set_uniform(&mut self, name: &str, value: UniformValue);
}

/// One uniform change produced by the core, to be applied by a [`UniformSink`]
#[derive(Debug, Clone, PartialEq)]
pub struct UniformDelta {
    pub name: &'static str,
    pub value: UniformValue,
}

impl UniformDelta {
    pub fn new(name: &'static str, value: impl Into<UniformValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    pub fn apply_to<S>(&self, sink: &mut S)
    where
        S: UniformSink + ?Sized,
    {
        sink.set_uniform(self.name, self.value.clone());
    }
}
