use std::{collections::HashMap, sync::Arc};

use log::{debug, error, info, warn};
use parking_lot::Mutex;

use super::{
    names, CompileCompletion, CompileQueue, CompileRequest, ProgramId, ProgramSpec, Texture3D,
    UniformDelta, UniformKind, UniformSink, UniformValue,
};
use crate::{color::RGBA, defaults, render::RenderMode, Result, VolumeError, VolumeField};

/// Compile lifecycle of a binding
#[derive(Debug, Clone, PartialEq)]
pub enum CompileState {
    Uninitialized,
    Compiling { generation: u64 },
    Ready { generation: u64 },
    Failed { generation: u64, reason: String },
}

/// Binding shared with a render thread
pub type SharedBinding = Arc<Mutex<ShaderBinding>>;

/// Uniform state of one shader program
///
/// Created with defaults from its [`ProgramSpec`]. Uniforms can be set at any
/// time, the program must be [`load`](ShaderBinding::load)ed and its
/// completion applied before [`check_contract`](ShaderBinding::check_contract)
/// lets it be drawn.
#[derive(Debug)]
pub struct ShaderBinding {
    program: &'static ProgramSpec,
    uniforms: HashMap<String, UniformValue>,
    state: CompileState,
    generation: u64,
}

impl ShaderBinding {
    pub fn new(program: &'static ProgramSpec) -> ShaderBinding {
        let uniforms = program
            .defaults()
            .map(|(name, value)| (name.to_owned(), value))
            .collect();

        ShaderBinding {
            program,
            uniforms,
            state: CompileState::Uninitialized,
            generation: 0,
        }
    }

    pub fn for_mode(mode: RenderMode) -> ShaderBinding {
        ShaderBinding::new(ProgramSpec::for_mode(mode))
    }

    pub fn into_shared(self) -> SharedBinding {
        Arc::new(Mutex::new(self))
    }

    pub fn program(&self) -> &'static ProgramSpec {
        self.program
    }

    pub fn program_id(&self) -> ProgramId {
        self.program.id
    }

    pub fn mode(&self) -> RenderMode {
        self.program.mode
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    pub fn uniforms(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.uniforms.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Store uniform, optionally checking its type tag
    pub fn set_uniform_as(
        &mut self,
        name: &str,
        value: UniformValue,
        kind: Option<UniformKind>,
    ) -> Result<()> {
        if let Some(kind) = kind {
            if value.kind() != kind {
                return Err(VolumeError::ContractViolation(format!(
                    "uniform '{name}' tagged {kind:?} but value is {:?}",
                    value.kind()
                )));
            }
        }
        self.set_uniform(name, value);
        Ok(())
    }

    /// Bind a new volume
    ///
    /// Builds fresh textures from `volume`, replacing the previous ones.
    /// The gradient is computed only if this program needs it.
    /// Returns the uniforms that were set.
    pub fn set_volume(&mut self, volume: &VolumeField) -> Vec<UniformDelta> {
        let mut deltas = vec![
            UniformDelta::new(names::VOLUME, Texture3D::from_samples(volume)),
            UniformDelta::new(names::VOLUME_DIMS, volume.scale()),
        ];

        if self.program.requires(names::GRADIENT) {
            deltas.push(UniformDelta::new(
                names::GRADIENT,
                Texture3D::from_gradient(volume),
            ));
        }

        if self.program.requires(names::VOLUME_SCALE) {
            deltas.push(UniformDelta::new(names::VOLUME_SCALE, volume.volume_scale()));
        }

        for delta in &deltas {
            delta.apply_to(self);
        }

        info!(
            "{}: bound volume {}x{}x{}",
            self.program.id,
            volume.width(),
            volume.height(),
            volume.depth()
        );

        deltas
    }

    /// Set ray-march sample count, must be at least [`defaults::MIN_STEPS`]
    pub fn set_steps(&mut self, steps: i32) -> Result<UniformDelta> {
        check_steps(steps)?;
        let delta = UniformDelta::new(names::STEPS, steps);
        delta.apply_to(self);
        Ok(delta)
    }

    pub fn set_iso_value(&mut self, density: f32) -> UniformDelta {
        let delta = UniformDelta::new(names::ISO_VALUE, density);
        delta.apply_to(self);
        delta
    }

    pub fn set_color(&mut self, color: RGBA) -> UniformDelta {
        let delta = UniformDelta::new(names::COLOR, color);
        delta.apply_to(self);
        delta
    }

    pub fn state(&self) -> &CompileState {
        &self.state
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self.state, CompileState::Ready { .. })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Request compilation
    ///
    /// No-op when compiled or when a request for the current generation is pending.
    pub fn load<Q>(&mut self, queue: &Q) -> Result<()>
    where
        Q: CompileQueue + ?Sized,
    {
        match self.state {
            CompileState::Ready { .. } => return Ok(()),
            CompileState::Compiling { generation } if generation == self.generation => {
                return Ok(())
            }
            _ => (),
        }

        self.generation += 1;
        let generation = self.generation;
        let submitted = queue.submit(CompileRequest {
            program: self.program,
            generation,
        });
        if let Err(e) = submitted {
            error!("{}: compile request not submitted: {e}", self.program.id);
            self.state = CompileState::Failed {
                generation,
                reason: e.to_string(),
            };
            return Err(e);
        }

        debug!("{}: compile requested (generation {generation})", self.program.id);
        self.state = CompileState::Compiling { generation };
        Ok(())
    }

    /// Drop the pending compile request, its completion will be ignored
    pub fn invalidate_pending(&mut self) {
        if let CompileState::Compiling { generation } = self.state {
            debug!("{}: invalidating compile generation {generation}", self.program.id);
            self.generation += 1;
            self.state = CompileState::Uninitialized;
        }
    }

    /// Apply compile result
    ///
    /// Returns `false` for completions of other programs or stale generations.
    pub fn complete(&mut self, completion: &CompileCompletion) -> bool {
        if completion.mode != self.program.mode {
            return false;
        }

        let pending = matches!(
            self.state,
            CompileState::Compiling { generation } if generation == completion.generation
        );
        if !pending {
            warn!(
                "{}: discarding stale compile completion (generation {}, current {})",
                self.program.id, completion.generation, self.generation
            );
            return false;
        }

        let generation = completion.generation;
        self.state = match &completion.result {
            Ok(()) => CompileState::Ready { generation },
            Err(reason) => CompileState::Failed {
                generation,
                reason: reason.clone(),
            },
        };
        true
    }

    /// Check the program can be drawn this frame
    ///
    /// Program must be compiled and every required uniform set with the right type.
    pub fn check_contract(&self) -> Result<()> {
        match &self.state {
            CompileState::Ready { .. } => (),
            CompileState::Failed { reason, .. } => {
                return Err(VolumeError::CompilationFailure {
                    program: self.program.id.to_string(),
                    reason: reason.clone(),
                })
            }
            _ => return Err(VolumeError::NotReady(self.program.id.to_string())),
        }

        for req in self.program.uniforms {
            match self.uniforms.get(req.name) {
                None => {
                    return Err(VolumeError::ContractViolation(format!(
                        "uniform '{}' required by {} is not set",
                        req.name, self.program.id
                    )))
                }
                Some(value) if value.kind() != req.kind => {
                    return Err(VolumeError::ContractViolation(format!(
                        "uniform '{}' must be {:?}, got {:?}",
                        req.name,
                        req.kind,
                        value.kind()
                    )))
                }
                Some(_) => (),
            }
        }

        if let Some(steps) = self.uniforms.get(names::STEPS).and_then(|v| v.as_int()) {
            check_steps(steps)?;
        }

        Ok(())
    }
}

impl UniformSink for ShaderBinding {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms.insert(name.to_owned(), value);
    }
}

fn check_steps(steps: i32) -> Result<()> {
    if steps < defaults::MIN_STEPS {
        return Err(VolumeError::ContractViolation(format!(
            "steps must be greater than 1, got {steps}"
        )));
    }
    Ok(())
}
