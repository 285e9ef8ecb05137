use nalgebra::{vector, Vector2};
use serde::{Deserialize, Serialize};

/// Where the opacity of a sample comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpacitySource {
    /// Alpha channel of the lookup
    #[default]
    TransferFunction,
    /// Sampled scalar itself, lookup provides only color
    Scalar,
}

/// Upper bound of marching iterations per ray
pub const DEFAULT_MAX_STEPS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub resolution: Vector2<u16>,
    pub early_ray_termination: bool,
    pub multi_thread: bool,
    pub max_steps: usize,
    pub opacity_source: OpacitySource,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            resolution: vector![512, 512],
            early_ray_termination: false,
            multi_thread: false,
            max_steps: DEFAULT_MAX_STEPS,
            opacity_source: OpacitySource::TransferFunction,
        }
    }
}

impl RenderOptions {
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }

    pub fn pixel_count(&self) -> usize {
        self.resolution.x as usize * self.resolution.y as usize
    }
}

/// Builder of [`RenderOptions`]
#[derive(Debug, Default)]
pub struct RenderOptionsBuilder {
    resolution: Option<Vector2<u16>>,
    early_ray_termination: Option<bool>,
    multi_thread: Option<bool>,
    max_steps: Option<usize>,
    opacity_source: Option<OpacitySource>,
}

impl RenderOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(mut self, resolution: Vector2<u16>) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn early_ray_termination(mut self, yes: bool) -> Self {
        self.early_ray_termination = Some(yes);
        self
    }

    pub fn multi_thread(mut self, yes: bool) -> Self {
        self.multi_thread = Some(yes);
        self
    }

    pub fn max_steps(mut self, steps: usize) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn opacity_source(mut self, source: OpacitySource) -> Self {
        self.opacity_source = Some(source);
        self
    }

    /// Returns `None` if resolution was not set, has a zero side or `max_steps` is zero
    pub fn build(self) -> Option<RenderOptions> {
        let resolution = self.resolution?;
        if resolution.x == 0 || resolution.y == 0 || self.max_steps == Some(0) {
            return None;
        }
        Some(self.build_unchecked())
    }

    /// Missing values are taken from [`RenderOptions::default`]
    pub fn build_unchecked(self) -> RenderOptions {
        let default = RenderOptions::default();
        RenderOptions {
            resolution: self.resolution.unwrap_or(default.resolution),
            early_ray_termination: self
                .early_ray_termination
                .unwrap_or(default.early_ray_termination),
            multi_thread: self.multi_thread.unwrap_or(default.multi_thread),
            max_steps: self.max_steps.unwrap_or(default.max_steps),
            opacity_source: self.opacity_source.unwrap_or(default.opacity_source),
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn builder_defaults() {
        let opts = RenderOptions::builder()
            .resolution(vector![20, 10])
            .build()
            .unwrap();
        assert_eq!(opts.resolution, vector![20, 10]);
        assert_eq!(opts.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(opts.opacity_source, OpacitySource::TransferFunction);
        assert!(!opts.multi_thread);
        assert_eq!(opts.pixel_count(), 200);
    }

    #[test]
    fn builder_rejects_invalid() {
        assert!(RenderOptions::builder().build().is_none());
        assert!(RenderOptions::builder()
            .resolution(vector![0, 10])
            .build()
            .is_none());
        assert!(RenderOptions::builder()
            .resolution(vector![10, 10])
            .max_steps(0)
            .build()
            .is_none());
    }
}
