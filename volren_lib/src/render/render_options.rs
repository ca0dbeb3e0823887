use super::RenderMode;
use crate::{color::Color, defaults, Result, VolumeError};

/// Initial parameters of an [`AppContext`](super::AppContext)
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub steps: i32,
    pub iso_value: f32,
    pub surface_color: Color,
    pub histogram_bins: usize,
}

impl RenderOptions {
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::default()
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptionsBuilder::default().build_unchecked()
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptionsBuilder {
    mode: RenderMode,
    steps: i32,
    iso_value: f32,
    surface_color: Color,
    histogram_bins: usize,
}

impl Default for RenderOptionsBuilder {
    fn default() -> Self {
        RenderOptionsBuilder {
            mode: defaults::RENDER_MODE,
            steps: defaults::STEPS,
            iso_value: defaults::ISO_VALUE,
            surface_color: defaults::SURFACE_COLOR,
            histogram_bins: defaults::HISTOGRAM_BINS,
        }
    }
}

impl RenderOptionsBuilder {
    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn steps(mut self, steps: i32) -> Self {
        self.steps = steps;
        self
    }

    pub fn iso_value(mut self, iso_value: f32) -> Self {
        self.iso_value = iso_value;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.surface_color = color;
        self
    }

    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Validate and build
    ///
    /// `steps` must be at least 2 and the histogram needs at least one bin.
    pub fn build(self) -> Result<RenderOptions> {
        if self.steps < defaults::MIN_STEPS {
            return Err(VolumeError::ContractViolation(format!(
                "steps must be greater than 1, got {}",
                self.steps
            )));
        }
        if self.histogram_bins == 0 {
            return Err(VolumeError::ContractViolation(
                "histogram needs at least one bin".into(),
            ));
        }
        Ok(self.build_unchecked())
    }

    pub fn build_unchecked(self) -> RenderOptions {
        RenderOptions {
            mode: self.mode,
            steps: self.steps,
            iso_value: self.iso_value,
            surface_color: self.surface_color,
            histogram_bins: self.histogram_bins,
        }
    }
}
