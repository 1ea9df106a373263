//! Shader source code embedded at compile time.

/// Point cloud shader - round billboards, one triangle per point.
pub const POINT: &str = include_str!("../shaders/point.wgsl");
