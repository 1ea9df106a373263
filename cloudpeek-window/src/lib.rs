mod app;
mod camera;
mod controls;

pub use app::{ViewerError, run_with_delegate};
pub use camera::{Camera, CameraPose, Projection};
pub use controls::{CameraControl, Controls, InputState, MouseController};
pub use cloudpeek_gpu::delegates::{PointDelegate, PointInitData};
pub use cloudpeek_gpu::{DelegateError, RenderContext, RenderDelegate, SceneBounds};
