//! GPU side of the cloudpeek viewer: device setup, resource registry, builders and
//! the point cloud render delegate.

mod builder;
mod delegate;
pub mod delegates;
mod resource;
mod resource_registry;
pub mod shaders;
mod surface;
mod types;

pub use builder::{BufferBuildError, BufferBuilder, BufferUsage};
pub use delegate::{DelegateError, RenderContext, RenderDelegate, SceneBounds};
pub use resource::{Handle, ResourceType};
pub use resource_registry::ResourceRegistry;
pub use surface::SurfaceWrapper;
pub use types::{CameraUniforms, PointPrimitive};

pub use wgpu;

use tracing::info;
use wgpu::Instance;

#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Request Adapter Error: {0}")]
    RequestAdapterError(#[from] wgpu::RequestAdapterError),
    #[error("Request Device Error: {0}")]
    RequestDeviceError(#[from] wgpu::RequestDeviceError),
    #[error("Create surface error: {0}")]
    CreateSurfaceError(#[from] wgpu::CreateSurfaceError),
    #[error("Surface is not supported by the selected adapter")]
    UnsupportedSurface,
}

/// Owns the wgpu adapter, device and queue shared by every GPU resource.
pub struct Renderer {
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl Renderer {
    /// Create a renderer whose adapter can present to `target`, and configure a surface for it.
    #[tracing::instrument(level = "info", skip_all)]
    pub async fn for_surface(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<(Self, SurfaceWrapper), RendererError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor::from_env_or_default());
        let surface = instance.create_surface(target)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;
        let adapter_info = adapter.get_info();
        info!(
            "Using adapter {} ({:?})",
            adapter_info.name, adapter_info.backend
        );

        // Large clouds live in one storage binding, so ask for everything the adapter offers.
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Renderer"),
                required_limits: adapter.limits(),
                ..Default::default()
            })
            .await?;

        let renderer = Self {
            adapter,
            device,
            queue,
        };
        let surface = renderer.configure_surface(surface, width, height)?;
        Ok((renderer, surface))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Start building a buffer with the given usage on this renderer's device.
    pub fn create_buffer(&self, usage: BufferUsage) -> BufferBuilder<'_> {
        BufferBuilder::new(&self.device, usage)
    }

    fn configure_surface(
        &self,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<SurfaceWrapper, RendererError> {
        let caps = surface.get_capabilities(&self.adapter);
        // Point colors are written as stored, so prefer a non-sRGB target.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RendererError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&self.device, &config);
        info!("Surface configured: {:?} {}x{}", format, config.width, config.height);

        Ok(SurfaceWrapper::new(surface, config))
    }
}
