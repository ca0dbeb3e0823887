use log::{debug, error, info, warn};
use nalgebra::Vector3;

use super::RenderMode;
use crate::{
    shader::{
        names, CompileCompletion, CompileQueue, CompileState, ProgramId, ShaderBinding,
        UniformDelta,
    },
    Result, VolumeError, VolumeField,
};

/// Why a frame was not drawn
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No volume loaded yet
    NoVolume,
    /// Program compile still pending
    Compiling,
    /// Program failed to compile, retried only on request
    Failed(String),
    /// Required uniform missing or invalid
    Contract(String),
}

/// Outcome of one render tick
#[derive(Debug, Clone, PartialEq)]
pub enum FrameDecision {
    /// Submit `program` for drawing
    Draw { mode: RenderMode, program: ProgramId },
    Skip(SkipReason),
}

impl FrameDecision {
    pub fn is_draw(&self) -> bool {
        matches!(self, FrameDecision::Draw { .. })
    }
}

/// Owns one binding per render mode and picks the active one
#[derive(Debug)]
pub struct RenderModeController {
    mip: ShaderBinding,
    first_hit: ShaderBinding,
    active: RenderMode,
    has_volume: bool,
}

impl RenderModeController {
    pub fn new(mode: RenderMode) -> RenderModeController {
        RenderModeController {
            mip: ShaderBinding::for_mode(RenderMode::Mip),
            first_hit: ShaderBinding::for_mode(RenderMode::FirstHit),
            active: mode,
            has_volume: false,
        }
    }

    pub fn active(&self) -> RenderMode {
        self.active
    }

    pub fn select(&mut self, mode: RenderMode) {
        if mode != self.active {
            info!("Render mode switched to {mode}");
        }
        self.active = mode;
    }

    pub fn binding(&self, mode: RenderMode) -> &ShaderBinding {
        match mode {
            RenderMode::Mip => &self.mip,
            RenderMode::FirstHit => &self.first_hit,
        }
    }

    pub fn binding_mut(&mut self, mode: RenderMode) -> &mut ShaderBinding {
        match mode {
            RenderMode::Mip => &mut self.mip,
            RenderMode::FirstHit => &mut self.first_hit,
        }
    }

    pub fn active_binding(&self) -> &ShaderBinding {
        self.binding(self.active)
    }

    pub fn has_volume(&self) -> bool {
        self.has_volume
    }

    /// Request compilation of both programs
    ///
    /// Both are requested even if the first request fails, the first error is returned.
    pub fn load<Q>(&mut self, queue: &Q) -> Result<()>
    where
        Q: CompileQueue + ?Sized,
    {
        let mip = self.mip.load(queue);
        let first_hit = self.first_hit.load(queue);
        mip.and(first_hit)
    }

    /// Bind `volume` into both programs
    ///
    /// Pending compiles are invalidated and requested again, their late
    /// completions will not touch the new state. A program whose request
    /// cannot be submitted is marked failed and skips frames until reloaded.
    /// Returns the uniforms set on the active program.
    pub fn set_volume<Q>(&mut self, volume: &VolumeField, queue: &Q) -> Vec<UniformDelta>
    where
        Q: CompileQueue + ?Sized,
    {
        let mut active_deltas = Vec::new();
        for mode in RenderMode::ALL {
            let binding = self.binding_mut(mode);
            binding.invalidate_pending();
            let deltas = binding.set_volume(volume);
            if mode == self.active {
                active_deltas = deltas;
            }
        }
        self.has_volume = true;
        if let Err(e) = self.load(queue) {
            error!("Volume bound without compiled programs: {e}");
        }
        active_deltas
    }

    /// Apply `delta` to every program that uses it
    ///
    /// Names no program declares (like `camera_pos`) go to the active program.
    pub fn apply(&mut self, delta: &UniformDelta) {
        let mut applied = false;
        for mode in RenderMode::ALL {
            let binding = self.binding_mut(mode);
            if binding.program().requires(delta.name) {
                delta.apply_to(binding);
                applied = true;
            }
        }
        if !applied {
            let active = self.active;
            delta.apply_to(self.binding_mut(active));
        }
        debug!("Uniform {} set to {:?}", delta.name, delta.value);
    }

    /// Set first-hit sample count
    pub fn set_steps(&mut self, steps: i32) -> Result<UniformDelta> {
        self.first_hit.set_steps(steps)
    }

    /// Route compile result to its binding
    pub fn apply_completion(&mut self, completion: &CompileCompletion) -> bool {
        self.binding_mut(completion.mode).complete(completion)
    }

    /// Some program waits for its compile
    pub fn is_compiling(&self) -> bool {
        RenderMode::ALL
            .iter()
            .any(|&m| matches!(self.binding(m).state(), CompileState::Compiling { .. }))
    }

    /// Decide whether the active program can be drawn this frame
    ///
    /// Forwards `camera_pos` to the active program first.
    pub fn frame_tick(&mut self, camera_pos: Vector3<f32>) -> FrameDecision {
        let active = self.active;
        let delta = UniformDelta::new(names::CAMERA_POS, camera_pos);
        delta.apply_to(self.binding_mut(active));

        if !self.has_volume {
            return FrameDecision::Skip(SkipReason::NoVolume);
        }

        let binding = self.binding(active);
        match binding.check_contract() {
            Ok(()) => FrameDecision::Draw {
                mode: active,
                program: binding.program_id(),
            },
            Err(VolumeError::NotReady(_)) => {
                debug!("Skipping frame, {} is compiling", binding.program_id());
                FrameDecision::Skip(SkipReason::Compiling)
            }
            Err(VolumeError::CompilationFailure { reason, .. }) => {
                warn!("Skipping frame, {} failed: {reason}", binding.program_id());
                FrameDecision::Skip(SkipReason::Failed(reason))
            }
            Err(e) => {
                warn!("Skipping frame: {e}");
                FrameDecision::Skip(SkipReason::Contract(e.to_string()))
            }
        }
    }
}

impl Default for RenderModeController {
    fn default() -> Self {
        RenderModeController::new(crate::defaults::RENDER_MODE)
    }
}
