use crate::camera::{Camera, Projection};
use crate::controls::Controls;
use cloudpeek_gpu::wgpu;
use cloudpeek_gpu::{
    CameraUniforms, DelegateError, RenderContext, RenderDelegate, Renderer, RendererError,
    ResourceRegistry, SurfaceWrapper,
};
use std::sync::Arc;
use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),
    #[error("Render delegate error: {0}")]
    Delegate(#[from] DelegateError),
    #[error("GPU out of memory")]
    OutOfMemory,
}

/// Open a window and render with `D` until the user closes it.
///
/// Blocks the calling thread for the lifetime of the window.
pub fn run_with_delegate<D: RenderDelegate + 'static>(
    title: &str,
    init_data: D::InitData,
) -> Result<(), ViewerError>
where
    D::InitData: 'static,
{
    let event_loop = EventLoop::new()?;
    let mut app = App::<D>::new(title.to_string(), init_data);
    let run_result = event_loop.run_app(&mut app);
    let app_result = app.finish();
    run_result?;
    app_result
}

struct App<D: RenderDelegate> {
    title: String,
    init_data: Option<D::InitData>,
    state: Option<ViewerState<D>>,
    error: Option<ViewerError>,
}

impl<D: RenderDelegate> App<D> {
    fn new(title: String, init_data: D::InitData) -> Self {
        Self {
            title,
            init_data: Some(init_data),
            state: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn finish(self) -> Result<(), ViewerError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<D: RenderDelegate + 'static> ApplicationHandler for App<D> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.error.is_some() {
            return;
        }
        let Some(init_data) = self.init_data.take() else {
            return;
        };

        match ViewerState::<D>::new(event_loop, &self.title, init_data) {
            Ok(state) => self.state = Some(state),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.window.id() != window_id {
            return;
        }

        if state.handle_window_event(event_loop, &event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Viewer closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::RedrawRequested => {
                let _frame_span = tracing::trace_span!("frame").entered();
                match state.render() {
                    Ok(()) => {}
                    Err(FrameError::Surface(
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
                    )) => {
                        let size = state.window.inner_size();
                        state.resize(size);
                    }
                    Err(FrameError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                        self.fail(event_loop, ViewerError::OutOfMemory);
                    }
                    Err(FrameError::Surface(e)) => debug!("Skipping frame: {e}"),
                    Err(FrameError::Delegate(e)) => self.fail(event_loop, e.into()),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_ref() {
            state.window.request_redraw();
        }
    }
}

enum FrameError {
    Surface(wgpu::SurfaceError),
    Delegate(DelegateError),
}

struct ViewerState<D: RenderDelegate> {
    window: Arc<Window>,
    renderer: Renderer,
    surface: SurfaceWrapper,
    registry: ResourceRegistry,
    delegate: D,
    camera: Camera,
    controls: Controls,
    projection: Projection,
    depth_view: Option<wgpu::TextureView>,
}

impl<D: RenderDelegate> ViewerState<D> {
    fn new(
        event_loop: &ActiveEventLoop,
        title: &str,
        init_data: D::InitData,
    ) -> Result<Self, ViewerError> {
        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let size = window.inner_size();

        let (renderer, surface) = pollster::block_on(Renderer::for_surface(
            window.clone(),
            size.width,
            size.height,
        ))?;

        let mut registry = ResourceRegistry::new();
        let delegate = D::create(&renderer, &mut registry, surface.format(), init_data)?;

        let bounds = delegate.bounds();
        info!(
            "Scene bounds: center={:?}, radius={}",
            bounds.center, bounds.radius
        );
        let camera = Camera::framing(bounds);
        let projection = Projection::for_bounds(surface.width(), surface.height(), bounds);

        let depth_view = delegate.depth_format().map(|format| {
            create_depth_view(renderer.device(), surface.width(), surface.height(), format)
        });

        Ok(Self {
            window,
            renderer,
            surface,
            registry,
            delegate,
            camera,
            controls: Controls::new(),
            projection,
            depth_view,
        })
    }

    fn handle_window_event(&mut self, event_loop: &ActiveEventLoop, event: &WindowEvent) -> bool {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    ..
                },
            ..
        } = event
        {
            info!("Viewer closed");
            event_loop.exit();
            return true;
        }

        self.controls.handle_event(event)
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.surface
            .resize(self.renderer.device(), new_size.width, new_size.height);
        self.projection
            .update_size(new_size.width, new_size.height);

        if let Some(format) = self.delegate.depth_format() {
            self.depth_view = Some(create_depth_view(
                self.renderer.device(),
                new_size.width,
                new_size.height,
                format,
            ));
        }
    }

    fn render(&mut self) -> Result<(), FrameError> {
        self.controls.update(&mut self.camera);
        self.projection
            .fit_depth(self.camera.position(), self.delegate.bounds());

        let uniforms = CameraUniforms::from_matrices(
            self.camera.view_matrix(),
            self.projection.matrix(),
            self.camera.position(),
        );
        self.delegate
            .update(self.renderer.queue(), &self.registry, &uniforms)
            .map_err(FrameError::Delegate)?;

        let surface_texture = self
            .surface
            .get_current_texture()
            .map_err(FrameError::Surface)?;
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.renderer
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });

        let ctx = RenderContext {
            color_view: &surface_view,
            depth_view: self.depth_view.as_ref(),
        };
        self.delegate
            .render(&mut encoder, ctx, &self.registry)
            .map_err(FrameError::Delegate)?;

        self.renderer.queue().submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        surface_texture.present();
        Ok(())
    }
}

fn create_depth_view(
    device: &wgpu::Device,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
