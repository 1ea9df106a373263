//! Render delegate trait and context types.
//!
//! A `RenderDelegate` owns the GPU resources for one kind of scene and records
//! its draw commands; the window crate drives it once per frame.

use crate::{BufferBuildError, CameraUniforms, Renderer, ResourceRegistry};
use glam::Vec3;

/// Scene bounds computed from primitive positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBounds {
    pub min: Vec3,
    pub max: Vec3,
    pub center: Vec3,
    /// Half the bounding box diagonal, never zero.
    pub radius: f32,
}

impl SceneBounds {
    /// Compute bounds from an iterator of positions. Non-finite positions are skipped.
    pub fn from_positions(positions: impl Iterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut count = 0;

        for pos in positions.filter(|p| p.is_finite()) {
            min = min.min(pos);
            max = max.max(pos);
            count += 1;
        }

        if count == 0 {
            return Self::default();
        }
        Self::from_min_max(min, max)
    }

    /// Create bounds from explicit min/max.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let center = (min + max) * 0.5;
        let half_diagonal = (max - min).length() * 0.5;
        let radius = if half_diagonal > f32::EPSILON {
            half_diagonal
        } else {
            1.0
        };
        Self {
            min,
            max,
            center,
            radius,
        }
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
            center: Vec3::ZERO,
            radius: 1.0,
        }
    }
}

/// Context passed to the render delegate for rendering.
pub struct RenderContext<'a> {
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: Option<&'a wgpu::TextureView>,
}

#[derive(Debug, thiserror::Error)]
pub enum DelegateError {
    #[error("No points to render")]
    EmptyScene,
    #[error("Buffer build error: {0}")]
    Buffer(#[from] BufferBuildError),
    #[error("{points} points need {bytes} bytes of storage, the GPU allows {max}")]
    TooManyPoints { points: usize, bytes: u64, max: u64 },
    #[error("Resource missing from registry: {0}")]
    MissingResource(&'static str),
}

/// Trait for shader-agnostic rendering. Implement this to render different primitive types.
pub trait RenderDelegate: Sized {
    /// Data needed to construct the delegate (e.g., loaded primitives).
    type InitData;

    /// Create GPU resources for rendering.
    fn create(
        renderer: &Renderer,
        registry: &mut ResourceRegistry,
        surface_format: wgpu::TextureFormat,
        init_data: Self::InitData,
    ) -> Result<Self, DelegateError>;

    /// Get the scene bounds for camera positioning.
    fn bounds(&self) -> &SceneBounds;

    /// Return depth format if depth testing is needed. Default is None (no depth).
    fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        None
    }

    /// Update GPU resources (e.g., camera uniforms).
    fn update(
        &mut self,
        queue: &wgpu::Queue,
        registry: &ResourceRegistry,
        camera: &CameraUniforms,
    ) -> Result<(), DelegateError>;

    /// Record render commands.
    fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        ctx: RenderContext,
        registry: &ResourceRegistry,
    ) -> Result<(), DelegateError>;
}
