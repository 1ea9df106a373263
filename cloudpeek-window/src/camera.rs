use cloudpeek_gpu::SceneBounds;
use glam::{Mat4, Vec2, Vec3};

/// Closest the camera may get to its orbit center, in world units.
const MIN_DISTANCE: f32 = 1e-4;

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Far plane distance for a freshly framed scene, in scene radii.
const FAR_RADII: f32 = 20.0;

/// Slack kept between the farthest scene point and the far plane.
const FAR_MARGIN: f32 = 1.1;

/// Camera pose representing position and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Center/focus point that the camera orbits around.
    pub center: Vec3,
    /// Camera position in world space.
    pub position: Vec3,
    /// Yaw angle in radians (rotation around Y axis).
    pub yaw: f32,
    /// Pitch angle in radians (rotation around X axis).
    pub pitch: f32,
}

impl CameraPose {
    /// Create a new camera pose.
    pub fn new(position: Vec3, center: Vec3) -> Self {
        let forward = (center - position).normalize_or(-Vec3::Z);
        let yaw = forward.x.atan2(-forward.z);
        let pitch = forward.y.clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            center,
            position,
            yaw,
            pitch,
        }
    }

    /// Unit view direction derived from yaw and pitch.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, -cos_pitch * cos_yaw)
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize_or(Vec3::Y)
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.center).length()
    }

    /// Orbit around the center point.
    pub fn orbit(&mut self, delta: Vec2, sensitivity: f32) {
        let distance = self.distance();
        self.yaw += delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.position = self.center - self.forward() * distance;
    }

    /// Pan the camera and center together, scaled by the orbit distance.
    pub fn pan(&mut self, delta: Vec2, sensitivity: f32) {
        let distance = self.distance();
        let pan = (-delta.x * self.right() + delta.y * self.up()) * sensitivity * distance;
        self.center += pan;
        self.position += pan;
    }

    /// Move toward (positive) or away from (negative) the center by a fraction of the distance.
    pub fn dolly(&mut self, amount: f32) {
        let distance = self.distance();
        let new_distance = (distance * (1.0 - amount).max(0.05)).max(MIN_DISTANCE);
        self.position = self.center - self.forward() * new_distance;
    }
}

/// Camera that manages position and view matrix.
pub struct Camera {
    pose: CameraPose,
    home: CameraPose,
}

impl Camera {
    /// Creates a camera at the given position looking at the center.
    pub fn new(position: Vec3, center: Vec3) -> Self {
        let pose = CameraPose::new(position, center);
        Self { pose, home: pose }
    }

    /// Frame the whole scene: look at its center from the +Z side.
    pub fn framing(bounds: &SceneBounds) -> Self {
        let position = bounds.center + Vec3::new(0.0, 0.0, bounds.radius * 2.5);
        Self::new(position, bounds.center)
    }

    /// Get the current pose.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Apply a pose to the camera.
    pub fn apply_pose(&mut self, pose: &CameraPose) {
        self.pose = *pose;
    }

    /// Return to the pose the camera was created with.
    pub fn reset(&mut self) {
        self.pose = self.home;
    }

    /// Get the camera position.
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.pose.position, self.pose.forward(), self.pose.up())
    }
}

/// Projection matrix configuration.
pub struct Projection {
    width: u32,
    height: u32,
    fov: f32,
    near: f32,
    far: f32,
}

impl Projection {
    /// Create a new projection.
    pub fn new(width: u32, height: u32, fov: f32, near: f32, far: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            fov,
            near,
            far,
        }
    }

    /// Perspective projection with clip planes sized to the scene.
    pub fn for_bounds(width: u32, height: u32, bounds: &SceneBounds) -> Self {
        Self::new(
            width,
            height,
            std::f32::consts::FRAC_PI_3,
            bounds.radius * 1e-3,
            bounds.radius * FAR_RADII,
        )
    }

    /// Move the far plane so every point of `bounds` stays in front of it when seen from `eye`.
    pub fn fit_depth(&mut self, eye: Vec3, bounds: &SceneBounds) {
        let reach = (eye - bounds.center).length() + bounds.radius;
        self.far = (reach * FAR_MARGIN).max(bounds.radius * FAR_RADII);
    }

    /// Get the projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov,
            self.width as f32 / self.height as f32,
            self.near,
            self.far,
        )
    }

    /// Update the projection size.
    pub fn update_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }
}
