use std::fmt;

use nalgebra::vector;

use super::{names, UniformKind, UniformValue};
use crate::{defaults, render::RenderMode};

/// Default of a required uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Float(f32),
    Int(i32),
    Vec4([f32; 4]),
}

impl DefaultValue {
    pub fn to_uniform(self) -> UniformValue {
        match self {
            DefaultValue::Float(v) => UniformValue::Float(v),
            DefaultValue::Int(v) => UniformValue::Int(v),
            DefaultValue::Vec4([r, g, b, a]) => UniformValue::Vec4(vector![r, g, b, a]),
        }
    }
}

/// Uniform a program needs before it can be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformRequirement {
    pub name: &'static str,
    pub kind: UniformKind,
    pub default: Option<DefaultValue>,
}

const fn required(name: &'static str, kind: UniformKind) -> UniformRequirement {
    UniformRequirement {
        name,
        kind,
        default: None,
    }
}

const fn with_default(
    name: &'static str,
    kind: UniformKind,
    default: DefaultValue,
) -> UniformRequirement {
    UniformRequirement {
        name,
        kind,
        default: Some(default),
    }
}

/// Vertex and fragment source pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vertex, self.fragment)
    }
}

/// Configuration record of one render mode
#[derive(Debug, PartialEq)]
pub struct ProgramSpec {
    pub mode: RenderMode,
    pub id: ProgramId,
    pub uniforms: &'static [UniformRequirement],
}

pub static MIP_PROGRAM: ProgramSpec = ProgramSpec {
    mode: RenderMode::Mip,
    id: ProgramId {
        vertex: "mip_vert",
        fragment: "mip_frag",
    },
    uniforms: &[
        required(names::VOLUME, UniformKind::Texture3D),
        required(names::VOLUME_DIMS, UniformKind::Vec3),
        required(names::VOLUME_SCALE, UniformKind::Vec3),
    ],
};

pub static FIRST_HIT_PROGRAM: ProgramSpec = ProgramSpec {
    mode: RenderMode::FirstHit,
    id: ProgramId {
        vertex: "firsthit_vert",
        fragment: "firsthit_frag",
    },
    uniforms: &[
        required(names::VOLUME, UniformKind::Texture3D),
        required(names::GRADIENT, UniformKind::Texture3D),
        required(names::VOLUME_DIMS, UniformKind::Vec3),
        with_default(names::STEPS, UniformKind::Int, DefaultValue::Int(defaults::STEPS)),
        with_default(
            names::ISO_VALUE,
            UniformKind::Float,
            DefaultValue::Float(defaults::ISO_VALUE),
        ),
        with_default(
            names::COLOR,
            UniformKind::Vec4,
            DefaultValue::Vec4([1.0, 1.0, 1.0, 1.0]),
        ),
    ],
};

impl ProgramSpec {
    pub fn for_mode(mode: RenderMode) -> &'static ProgramSpec {
        match mode {
            RenderMode::Mip => &MIP_PROGRAM,
            RenderMode::FirstHit => &FIRST_HIT_PROGRAM,
        }
    }

    pub fn requirement(&self, name: &str) -> Option<&UniformRequirement> {
        self.uniforms.iter().find(|req| req.name == name)
    }

    pub fn requires(&self, name: &str) -> bool {
        self.requirement(name).is_some()
    }

    /// Requirements with a default value
    pub fn defaults(&self) -> impl Iterator<Item = (&'static str, UniformValue)> {
        self.uniforms
            .iter()
            .filter_map(|req| req.default.map(|d| (req.name, d.to_uniform())))
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn mip_contract() {
        let spec = ProgramSpec::for_mode(RenderMode::Mip);

        assert_eq!(spec.id.to_string(), "mip_vert/mip_frag");
        assert!(spec.requires(names::VOLUME_SCALE));
        assert!(!spec.requires(names::GRADIENT));
        assert_eq!(spec.defaults().count(), 0);
    }

    #[test]
    fn first_hit_defaults() {
        let spec = ProgramSpec::for_mode(RenderMode::FirstHit);
        let defaults: Vec<_> = spec.defaults().collect();

        assert_eq!(
            defaults,
            vec![
                (names::STEPS, UniformValue::Int(200)),
                (names::ISO_VALUE, UniformValue::Float(0.3)),
                (names::COLOR, UniformValue::Vec4(vector![1.0, 1.0, 1.0, 1.0])),
            ]
        );
        assert_eq!(
            spec.requirement(names::GRADIENT).map(|r| r.kind),
            Some(UniformKind::Texture3D)
        );
    }
}
