//! Render settings that can be loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    camera::CameraBuilder,
    error::RenderResult,
    renderer::Parallelism,
    sampling::SamplingConfig,
    tracer::TraceSettings,
};

/// Image, sampling, scheduling and tracing settings for a render.
///
/// Every field has a default, so a settings file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub sampling: SamplingConfig,
    pub parallelism: Parallelism,
    pub trace: TraceSettings,
    /// Percent of pixels between progress log lines; 0 disables them
    pub progress_interval: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            sampling: SamplingConfig::default(),
            parallelism: Parallelism::default(),
            trace: TraceSettings::default(),
            progress_interval: 10.0,
        }
    }
}

impl RenderSettings {
    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Copy the image-related settings onto a camera builder.
    pub fn apply(&self, builder: CameraBuilder) -> CameraBuilder {
        builder
            .with_resolution(self.width, self.height)
            .with_sampling(self.sampling)
            .with_parallelism(self.parallelism)
            .with_progress_interval(self.progress_interval)
    }
}
