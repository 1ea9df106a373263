use cloudpeek_data::PointCloud;
use glam::{Mat4, Vec3};

/// GPU layout of one point: matches `Point` in `point.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct PointPrimitive {
    /// xyz position and billboard radius (world units) packed into w.
    pub position_size: [f32; 4],
    /// rgb color (0-1) and opacity in w.
    pub color_opacity: [f32; 4],
}

impl PointPrimitive {
    pub fn new(position: Vec3, size: f32, color: Vec3, opacity: f32) -> Self {
        Self {
            position_size: [position.x, position.y, position.z, size],
            color_opacity: [color.x, color.y, color.z, opacity],
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_slice(&self.position_size[..3])
    }

    pub fn color(&self) -> Vec3 {
        Vec3::from_slice(&self.color_opacity[..3])
    }

    /// Convert a point cloud into opaque primitives of uniform size.
    pub fn from_cloud(cloud: &PointCloud, size: f32) -> Vec<Self> {
        cloud
            .iter()
            .map(|(position, color)| Self::new(position, size, color, 1.0))
            .collect()
    }
}

/// Shared camera uniform layout between host and shader.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_matrix: [[f32; 4]; 4],
    pub proj_matrix: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub _padding: f32,
}

impl CameraUniforms {
    pub fn from_matrices(view: Mat4, proj: Mat4, eye: Vec3) -> Self {
        Self {
            view_matrix: view.to_cols_array_2d(),
            proj_matrix: proj.to_cols_array_2d(),
            view_pos: [eye.x, eye.y, eye.z],
            _padding: 0.0,
        }
    }
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self::from_matrices(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudpeek_data::DEFAULT_POINT_COLOR;

    #[test]
    fn test_layout_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<PointPrimitive>(), 32);
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 144);
    }

    #[test]
    fn test_from_uncolored_cloud() {
        let cloud = PointCloud::from_positions(vec![Vec3::new(1.0, 2.0, 3.0)]);
        let points = PointPrimitive::from_cloud(&cloud, 0.05);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(points[0].color(), DEFAULT_POINT_COLOR);
        assert_eq!(points[0].position_size[3], 0.05);
        assert_eq!(points[0].color_opacity[3], 1.0);
    }

    #[test]
    fn test_from_colored_cloud() {
        let cloud =
            PointCloud::with_colors(vec![Vec3::ZERO, Vec3::ONE], vec![Vec3::X, Vec3::Z]).unwrap();
        let colors: Vec<Vec3> = PointPrimitive::from_cloud(&cloud, 1.0)
            .iter()
            .map(PointPrimitive::color)
            .collect();
        assert_eq!(colors, vec![Vec3::X, Vec3::Z]);
    }

    #[test]
    fn test_uniforms_from_matrices() {
        let eye = Vec3::new(0.0, 1.0, 5.0);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let uniforms = CameraUniforms::from_matrices(view, Mat4::IDENTITY, eye);
        assert_eq!(uniforms.view_pos, [0.0, 1.0, 5.0]);
        assert_eq!(uniforms.view_matrix, view.to_cols_array_2d());
        assert_eq!(uniforms.proj_matrix, Mat4::IDENTITY.to_cols_array_2d());
    }
}
