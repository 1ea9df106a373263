use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::camera::{Camera, CameraPose};

/// Per-frame snapshot of input state that controllers can inspect.
#[derive(Debug, Default)]
pub struct InputState {
    mouse_position: Option<Vec2>,
    scroll_delta: f32,
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
}

impl InputState {
    pub fn mouse_position(&self) -> Option<Vec2> {
        self.mouse_position
    }

    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    fn end_frame(&mut self) {
        self.scroll_delta = 0.0;
        self.keys_pressed.clear();
    }

    fn record_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.scroll_delta += amount;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => {
                        if self.keys_down.insert(key) {
                            self.keys_pressed.insert(key);
                        }
                    }
                    ElementState::Released => {
                        self.keys_down.remove(&key);
                    }
                }
            }
            WindowEvent::Focused(false) => {
                self.keys_down.clear();
            }
            _ => {}
        }
    }
}

/// Trait for camera controllers. Implementations react to events and propose new poses.
pub trait CameraControl {
    /// Handle an individual window event. Return true if the event was consumed.
    fn handle_event(&mut self, event: &WindowEvent, input: &InputState) -> bool {
        let _ = (event, input);
        false
    }

    /// Per-frame update hook. Returns the pose to apply, if any.
    fn update(&mut self, input: &InputState, current: &CameraPose) -> Option<CameraPose>;

    /// Called when the camera is reset so controllers can drop in-flight drags.
    fn on_reset(&mut self) {}
}

/// Collection of camera controllers plus the reset binding.
pub struct Controls {
    input: InputState,
    controllers: Vec<Box<dyn CameraControl>>,
    reset_key: KeyCode,
}

impl Controls {
    pub fn new() -> Self {
        let mut controls = Self::empty();
        controls.add_controller(Box::new(MouseController::default()));
        controls
    }

    pub fn empty() -> Self {
        Self {
            input: InputState::default(),
            controllers: Vec::new(),
            reset_key: KeyCode::KeyR,
        }
    }

    pub fn add_controller(&mut self, controller: Box<dyn CameraControl>) -> &mut Self {
        self.controllers.push(controller);
        self
    }

    /// Record the event and offer it to every controller. Returns true if one consumed it.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        self.input.record_event(event);
        let mut consumed = false;
        for controller in self.controllers.iter_mut() {
            consumed |= controller.handle_event(event, &self.input);
        }
        consumed
    }

    /// Apply this frame's input to the camera.
    pub fn update(&mut self, camera: &mut Camera) {
        if self.input.just_pressed(self.reset_key) {
            camera.reset();
            for controller in self.controllers.iter_mut() {
                controller.on_reset();
            }
        } else {
            let mut pose = camera.pose();
            for controller in self.controllers.iter_mut() {
                if let Some(next) = controller.update(&self.input, &pose) {
                    pose = next;
                }
            }
            camera.apply_pose(&pose);
        }
        self.input.end_frame();
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
    Zoom,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    mode: DragMode,
    button: MouseButton,
    last: Option<Vec2>,
}

/// Orbit with the left button, pan with the middle button, zoom with the right
/// button or the scroll wheel.
#[derive(Debug)]
pub struct MouseController {
    rotate_button: MouseButton,
    pan_button: MouseButton,
    zoom_button: MouseButton,
    drag_state: Option<DragState>,
    rotation_sensitivity: f32,
    pan_sensitivity: f32,
    zoom_sensitivity: f32,
    scroll_sensitivity: f32,
}

impl MouseController {
    fn mode_for(&self, button: MouseButton) -> Option<DragMode> {
        if button == self.rotate_button {
            Some(DragMode::Rotate)
        } else if button == self.pan_button {
            Some(DragMode::Pan)
        } else if button == self.zoom_button {
            Some(DragMode::Zoom)
        } else {
            None
        }
    }
}

impl Default for MouseController {
    fn default() -> Self {
        Self {
            rotate_button: MouseButton::Left,
            pan_button: MouseButton::Middle,
            zoom_button: MouseButton::Right,
            drag_state: None,
            rotation_sensitivity: 0.005,
            pan_sensitivity: 0.0015,
            zoom_sensitivity: 0.005,
            scroll_sensitivity: 0.1,
        }
    }
}

impl CameraControl for MouseController {
    fn handle_event(&mut self, event: &WindowEvent, input: &InputState) -> bool {
        let WindowEvent::MouseInput { state, button, .. } = event else {
            return false;
        };
        match state {
            ElementState::Pressed => {
                if self.drag_state.is_some() {
                    return false;
                }
                let Some(mode) = self.mode_for(*button) else {
                    return false;
                };
                self.drag_state = Some(DragState {
                    mode,
                    button: *button,
                    last: input.mouse_position(),
                });
                true
            }
            ElementState::Released => {
                if self.drag_state.is_some_and(|drag| drag.button == *button) {
                    self.drag_state = None;
                    return true;
                }
                false
            }
        }
    }

    fn update(&mut self, input: &InputState, current: &CameraPose) -> Option<CameraPose> {
        let mut pose = *current;

        if let Some(drag) = self.drag_state.as_mut() {
            if let Some(position) = input.mouse_position() {
                if let Some(last) = drag.last {
                    let delta = position - last;
                    match drag.mode {
                        DragMode::Rotate => pose.orbit(delta, self.rotation_sensitivity),
                        DragMode::Pan => pose.pan(delta, self.pan_sensitivity),
                        DragMode::Zoom => pose.dolly(-delta.y * self.zoom_sensitivity),
                    }
                }
                drag.last = Some(position);
            }
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            pose.dolly(scroll * self.scroll_sensitivity);
        }

        (pose != *current).then_some(pose)
    }

    fn on_reset(&mut self) {
        self.drag_state = None;
    }
}
