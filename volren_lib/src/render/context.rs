use std::{
    path::Path,
    time::{Duration, Instant},
};

use log::{error, info};
use nalgebra::Vector3;

use super::{FrameDecision, RenderMode, RenderModeController, RenderOptions};
use crate::{
    color::Color,
    common::Histogram,
    shader::{names, ShaderBackend, ShaderCompiler, UniformDelta},
    transfer::TransferFunctionModel,
    Result, VolumeError, VolumeField,
};

/// Input from the user interface
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Contents of a `.dat` file picked by the user
    FileLoaded(Vec<u8>),
    /// Pointer dragged over the histogram, values in <0;1>
    LiveTransferFunctionChanged { density: f32, intensity: f32 },
    /// Save button pressed
    TransferFunctionCommitted { color: Color },
    /// Clear button of slot `0..5` pressed
    SlotCleared(usize),
    SurfaceColorChanged(Color),
    StepsChanged(i32),
    ModeSelected(RenderMode),
}

/// State of a running viewer
///
/// Owns the loaded volume, both shader bindings, the transfer function and the
/// compiler thread. The UI sends [`UiEvent`]s and applies the returned deltas
/// to the graphics backend, the render loop calls [`AppContext::frame_tick`].
pub struct AppContext {
    options: RenderOptions,
    volume: Option<VolumeField>,
    histogram: Option<Histogram>,
    controller: RenderModeController,
    transfer: TransferFunctionModel,
    surface_color: Color,
    compiler: ShaderCompiler,
}

impl AppContext {
    /// Start compiler thread and request both programs
    pub fn new<B: ShaderBackend>(options: RenderOptions, backend: B) -> Result<AppContext> {
        let compiler = ShaderCompiler::start(backend);
        let mut controller = RenderModeController::new(options.mode);

        controller.set_steps(options.steps)?;
        controller.apply(&UniformDelta::new(names::ISO_VALUE, options.iso_value));
        controller.apply(&UniformDelta::new(
            names::COLOR,
            options.surface_color.to_rgba(),
        ));
        if let Err(e) = controller.load(&compiler) {
            error!("Programs not requested: {e}");
        }

        let mut transfer = TransferFunctionModel::new();
        let intensity = transfer.live().intensity;
        transfer.update_live(options.iso_value, intensity);

        Ok(AppContext {
            surface_color: options.surface_color,
            options,
            volume: None,
            histogram: None,
            controller,
            transfer,
            compiler,
        })
    }

    /// Apply one UI event
    ///
    /// Returns uniform changes for the graphics backend. On error the
    /// previous state is kept.
    pub fn handle(&mut self, event: UiEvent) -> Result<Vec<UniformDelta>> {
        let deltas = match event {
            UiEvent::FileLoaded(bytes) => self.load_volume_bytes(&bytes)?,
            UiEvent::LiveTransferFunctionChanged { density, intensity } => {
                let delta = self.transfer.update_live(density, intensity);
                self.controller.apply(&delta);
                vec![delta]
            }
            UiEvent::TransferFunctionCommitted { color } => {
                self.transfer.commit(color);
                Vec::new()
            }
            UiEvent::SlotCleared(index) => {
                self.transfer.clear_slot(index)?;
                Vec::new()
            }
            UiEvent::SurfaceColorChanged(color) => {
                self.surface_color = color;
                let delta = UniformDelta::new(names::COLOR, color.to_rgba());
                self.controller.apply(&delta);
                vec![delta]
            }
            UiEvent::StepsChanged(steps) => vec![self.controller.set_steps(steps)?],
            UiEvent::ModeSelected(mode) => {
                self.controller.select(mode);
                Vec::new()
            }
        };
        Ok(deltas)
    }

    /// Replace the volume with one parsed from `bytes`
    pub fn load_volume_bytes(&mut self, bytes: &[u8]) -> Result<Vec<UniformDelta>> {
        let volume = VolumeField::from_bytes(bytes).map_err(|e| {
            error!("Volume not loaded: {e}");
            e
        })?;
        self.set_volume(volume)
    }

    pub fn load_volume_file<P>(&mut self, path: P) -> Result<Vec<UniformDelta>>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let volume = VolumeField::from_file(path).map_err(|e| {
            error!("Volume {} not loaded: {e}", path.display());
            e
        })?;
        info!("Loaded {}", path.display());
        self.set_volume(volume)
    }

    /// Volume, histogram and bindings change together
    fn set_volume(&mut self, volume: VolumeField) -> Result<Vec<UniformDelta>> {
        let histogram = volume.histogram(self.options.histogram_bins);
        let deltas = self.controller.set_volume(&volume, &self.compiler);
        self.histogram = Some(histogram);
        self.volume = Some(volume);
        Ok(deltas)
    }

    /// Collect finished compiles and decide about the frame
    pub fn frame_tick(&mut self, camera_pos: Vector3<f32>) -> FrameDecision {
        self.poll_compiler();
        self.controller.frame_tick(camera_pos)
    }

    fn poll_compiler(&mut self) {
        for completion in self.compiler.try_completions() {
            self.controller.apply_completion(&completion);
        }
    }

    /// Block until no compile is pending
    pub fn wait_until_ready(&mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        self.poll_compiler();
        while self.controller.is_compiling() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.compiler.wait_completion(remaining) {
                Some(completion) => {
                    self.controller.apply_completion(&completion);
                }
                None => {
                    return Err(VolumeError::NotReady(format!(
                        "{} after {timeout:?}",
                        self.controller.active_binding().program_id()
                    )))
                }
            }
        }
        Ok(())
    }

    pub fn volume(&self) -> Option<&VolumeField> {
        self.volume.as_ref()
    }

    /// Histogram of the loaded volume
    pub fn histogram(&self) -> Option<&Histogram> {
        self.histogram.as_ref()
    }

    pub fn controller(&self) -> &RenderModeController {
        &self.controller
    }

    pub fn transfer(&self) -> &TransferFunctionModel {
        &self.transfer
    }

    pub fn surface_color(&self) -> Color {
        self.surface_color
    }

    pub fn mode(&self) -> RenderMode {
        self.controller.active()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}
