//! Module with helper functions
//! Saves repetition in unit and integration tests

use std::collections::HashMap;

use crate::{
    defaults::SAMPLE_NORMALIZATION,
    shader::{ProgramSpec, ShaderBackend, UniformSink, UniformValue},
};

/// `2x2x2` header followed by alternating 0 and 4095
pub fn alternating_words() -> Vec<u16> {
    vec![2, 2, 2, 0, 4095, 0, 4095, 0, 4095, 0, 4095]
}

/// Header and samples of a linear ramp along x, `0` at `x=0` and `4095` at `x=w-1`
pub fn ramp_words(w: u16, h: u16, d: u16) -> Vec<u16> {
    let mut words = vec![w, h, d];
    let max = SAMPLE_NORMALIZATION;
    for _z in 0..d {
        for _y in 0..h {
            for x in 0..w {
                let v = if w == 1 {
                    0.0
                } else {
                    (x as f32 / (w - 1) as f32 * max).round()
                };
                words.push(v as u16);
            }
        }
    }
    words
}

/// Little endian bytes, as stored in a `.dat` file
pub fn dat_bytes(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Backend rejecting every program with the same message
#[derive(Debug, Clone)]
pub struct FailingBackend {
    reason: String,
}

impl FailingBackend {
    pub fn new(reason: &str) -> FailingBackend {
        FailingBackend {
            reason: reason.to_owned(),
        }
    }
}

impl ShaderBackend for FailingBackend {
    fn compile(&mut self, _program: &ProgramSpec) -> Result<(), String> {
        Err(self.reason.clone())
    }
}

/// Sink recording the last value of every uniform, stands in for a GPU program
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub uniforms: HashMap<String, UniformValue>,
    pub writes: usize,
}

impl UniformSink for RecordingSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.writes += 1;
        self.uniforms.insert(name.to_owned(), value);
    }
}
