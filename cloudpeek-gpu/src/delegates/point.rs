//! Point cloud render delegate.

use crate::{
    BufferUsage, CameraUniforms, DelegateError, Handle, PointPrimitive, RenderContext,
    RenderDelegate, Renderer, ResourceRegistry, SceneBounds, shaders,
};
use cloudpeek_data::PointCloud;
use std::num::NonZeroU64;
use tracing::{debug, info};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.025,
    a: 1.0,
};

/// One triangle covers each point's disc.
const VERTICES_PER_POINT: u32 = 3;

/// Default point radius as a fraction of the scene radius.
pub const DEFAULT_POINT_SIZE_FRACTION: f32 = 1.0 / 400.0;

/// Initialization data for point cloud rendering. Never holds an empty cloud.
pub struct PointInitData {
    cloud: PointCloud,
    /// Point radius in world units; derived from the scene bounds when None.
    point_size: Option<f32>,
}

impl PointInitData {
    /// Wrap a cloud for the viewer, refusing one with no points.
    pub fn new(cloud: PointCloud) -> Result<Self, DelegateError> {
        if cloud.is_empty() {
            return Err(DelegateError::EmptyScene);
        }
        Ok(Self {
            cloud,
            point_size: None,
        })
    }

    /// Set the point size.
    pub fn with_point_size(mut self, size: Option<f32>) -> Self {
        self.point_size = size;
        self
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    /// Point radius to use for a scene with the given bounds.
    pub fn resolve_point_size(&self, bounds: &SceneBounds) -> f32 {
        self.point_size
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(bounds.radius * DEFAULT_POINT_SIZE_FRACTION)
    }
}

/// Number of vertices needed to draw `point_count` points.
///
/// Fails when the points do not fit in a single storage binding under `limits`.
pub fn point_vertex_count(point_count: usize, limits: &wgpu::Limits) -> Result<u32, DelegateError> {
    let bytes = u64::try_from(point_count)
        .unwrap_or(u64::MAX)
        .saturating_mul(std::mem::size_of::<PointPrimitive>() as u64);
    let max = u64::from(limits.max_storage_buffer_binding_size).min(limits.max_buffer_size);
    let too_many = DelegateError::TooManyPoints {
        points: point_count,
        bytes,
        max,
    };
    if bytes > max {
        return Err(too_many);
    }
    u32::try_from(point_count)
        .ok()
        .and_then(|count| count.checked_mul(VERTICES_PER_POINT))
        .ok_or(too_many)
}

fn create_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("point_shader"),
        source: wgpu::ShaderSource::Wgsl(shaders::POINT.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Point Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Point Cloud Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            buffers: &[],
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        multiview: None,
        cache: None,
    })
}

/// Point cloud render delegate.
pub struct PointDelegate {
    bounds: SceneBounds,
    vertex_count: u32,
    camera_buffer_handle: Handle<wgpu::Buffer>,
    bind_group_handle: Handle<wgpu::BindGroup>,
    pipeline_handle: Handle<wgpu::RenderPipeline>,
}

impl RenderDelegate for PointDelegate {
    type InitData = PointInitData;

    fn create(
        renderer: &Renderer,
        registry: &mut ResourceRegistry,
        surface_format: wgpu::TextureFormat,
        init_data: Self::InitData,
    ) -> Result<Self, DelegateError> {
        let device = renderer.device();
        let cloud = init_data.cloud();

        let vertex_count = point_vertex_count(cloud.len(), &device.limits())?;
        debug!("Drawing {} vertices", vertex_count);

        let bounds = SceneBounds::from_positions(cloud.positions().iter().copied());
        let point_size = init_data.resolve_point_size(&bounds);
        let points = PointPrimitive::from_cloud(cloud, point_size);
        info!(
            "Uploading {} points (colored: {}, size: {})",
            points.len(),
            cloud.has_colors(),
            point_size
        );

        let point_buffer_handle = renderer
            .create_buffer(BufferUsage::Storage)
            .label("Point Buffer")
            .with_pod_data(&points)
            .build(registry)?;

        let camera_buffer_handle = renderer
            .create_buffer(BufferUsage::Uniform)
            .label("Camera Buffer")
            .size(std::mem::size_of::<CameraUniforms>() as u64)
            .build(registry)?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Point Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<CameraUniforms>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let bind_group = {
            let point_buffer = registry
                .get(point_buffer_handle)
                .ok_or(DelegateError::MissingResource("point buffer"))?;
            let camera_buffer = registry
                .get(camera_buffer_handle)
                .ok_or(DelegateError::MissingResource("camera buffer"))?;
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Point Bind Group"),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: point_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: camera_buffer.as_entire_binding(),
                    },
                ],
            })
        };
        let bind_group_handle = registry.insert(bind_group);

        let pipeline = create_pipeline(device, &bind_group_layout, surface_format);
        let pipeline_handle = registry.insert(pipeline);

        Ok(Self {
            bounds,
            vertex_count,
            camera_buffer_handle,
            bind_group_handle,
            pipeline_handle,
        })
    }

    fn bounds(&self) -> &SceneBounds {
        &self.bounds
    }

    fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        Some(DEPTH_FORMAT)
    }

    fn update(
        &mut self,
        queue: &wgpu::Queue,
        registry: &ResourceRegistry,
        camera: &CameraUniforms,
    ) -> Result<(), DelegateError> {
        let camera_buffer = registry
            .get(self.camera_buffer_handle)
            .ok_or(DelegateError::MissingResource("camera buffer"))?;
        queue.write_buffer(camera_buffer, 0, bytemuck::bytes_of(camera));
        Ok(())
    }

    fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        ctx: RenderContext,
        registry: &ResourceRegistry,
    ) -> Result<(), DelegateError> {
        let pipeline = registry
            .get(self.pipeline_handle)
            .ok_or(DelegateError::MissingResource("point pipeline"))?;
        let bind_group = registry
            .get(self.bind_group_handle)
            .ok_or(DelegateError::MissingResource("point bind group"))?;

        let depth_stencil_attachment =
            ctx.depth_view
                .map(|depth_view| wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Point Cloud Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: ctx.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, bind_group, &[]);
        render_pass.draw(0..self.vertex_count, 0..1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn single_point() -> PointInitData {
        PointInitData::new(PointCloud::from_positions(vec![Vec3::ZERO])).unwrap()
    }

    fn bounds_with_radius(radius: f32) -> SceneBounds {
        SceneBounds::from_min_max(Vec3::ZERO, Vec3::new(radius * 2.0, 0.0, 0.0))
    }

    #[test]
    fn test_empty_cloud_is_refused() {
        let result = PointInitData::new(PointCloud::from_positions(Vec::new()));
        assert!(matches!(result, Err(DelegateError::EmptyScene)));
    }

    #[test]
    fn test_point_size_defaults_to_fraction_of_scene() {
        let size = single_point().resolve_point_size(&bounds_with_radius(40.0));
        assert!((size - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_explicit_point_size_wins() {
        let init = single_point().with_point_size(Some(0.5));
        assert_eq!(init.resolve_point_size(&bounds_with_radius(40.0)), 0.5);
    }

    #[test]
    fn test_invalid_point_size_falls_back() {
        for bad in [0.0, -1.0, f32::NAN] {
            let init = single_point().with_point_size(Some(bad));
            let size = init.resolve_point_size(&bounds_with_radius(4.0));
            assert!((size - 0.01).abs() < 1e-6);
        }
    }

    #[test]
    fn test_vertex_count_within_default_limits() {
        let limits = wgpu::Limits::default();
        let fits = limits.max_storage_buffer_binding_size as usize / std::mem::size_of::<PointPrimitive>();
        assert_eq!(
            point_vertex_count(fits, &limits).unwrap(),
            fits as u32 * VERTICES_PER_POINT
        );
        assert_eq!(point_vertex_count(1, &limits).unwrap(), 3);
    }

    #[test]
    fn test_too_many_points_for_storage_binding() {
        let limits = wgpu::Limits::default();
        let fits = limits.max_storage_buffer_binding_size as usize / std::mem::size_of::<PointPrimitive>();
        let err = point_vertex_count(fits + 1, &limits).unwrap_err();
        assert!(matches!(
            err,
            DelegateError::TooManyPoints { points, .. } if points == fits + 1
        ));

        let small = wgpu::Limits {
            max_storage_buffer_binding_size: 64,
            ..wgpu::Limits::default()
        };
        assert_eq!(point_vertex_count(2, &small).unwrap(), 6);
        assert!(point_vertex_count(3, &small).is_err());
    }

    #[test]
    fn test_huge_point_counts_do_not_overflow() {
        let unlimited = wgpu::Limits {
            max_storage_buffer_binding_size: u32::MAX,
            max_buffer_size: u64::MAX,
            ..wgpu::Limits::default()
        };
        assert!(matches!(
            point_vertex_count(usize::MAX, &unlimited),
            Err(DelegateError::TooManyPoints { bytes: u64::MAX, .. })
        ));
    }
}
