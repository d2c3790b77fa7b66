//! Raw macroquad input to intents

use macroquad::prelude::{
    is_key_down, is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, mouse_position, mouse_wheel,
    KeyCode, MouseButton,
};

use super::{DragGesture, Intent, IntentQueue};
use crate::camera::{PanAxis, Sign};

/// Keys that can hold a pan direction
const PAN_KEYS: [KeyCode; 10] = [
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Q,
    KeyCode::E,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
];

/// Pan direction bound to a key, `None` for anything else
pub fn pan_binding(key: KeyCode) -> Option<(PanAxis, Sign)> {
    match key {
        KeyCode::D | KeyCode::Right => Some((PanAxis::Lateral, Sign::Positive)),
        KeyCode::A | KeyCode::Left => Some((PanAxis::Lateral, Sign::Negative)),
        KeyCode::W | KeyCode::Up => Some((PanAxis::Depth, Sign::Positive)),
        KeyCode::S | KeyCode::Down => Some((PanAxis::Depth, Sign::Negative)),
        KeyCode::E => Some((PanAxis::Vertical, Sign::Positive)),
        KeyCode::Q => Some((PanAxis::Vertical, Sign::Negative)),
        _ => None,
    }
}

/// One intent per distinct direction, even if two keys share it
pub fn pan_intents(held: &[KeyCode]) -> Vec<Intent> {
    let mut intents: Vec<Intent> = Vec::new();
    for &key in held {
        if let Some((axis, sign)) = pan_binding(key) {
            let intent = Intent::Pan { axis, sign };
            if !intents.contains(&intent) {
                intents.push(intent);
            }
        }
    }
    intents
}

/// Wheel delta to a zoom intent; positive scroll zooms in
pub fn wheel_intent(delta: f32) -> Option<Intent> {
    Sign::of(delta).map(Intent::Zoom)
}

/// Requests that belong to the application, not the camera
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppCommands {
    pub capture: bool,
    pub toggle_hud: bool,
    pub quit: bool,
}

pub struct InputMapper {
    drag: DragGesture,
}

impl InputMapper {
    pub fn new(rotation_threshold_px: f32) -> Self {
        Self {
            drag: DragGesture::new(rotation_threshold_px),
        }
    }

    /// Read this frame's input and enqueue intents
    pub fn poll(&mut self, queue: &mut IntentQueue) -> AppCommands {
        let held: Vec<KeyCode> = PAN_KEYS.iter().copied().filter(|&k| is_key_down(k)).collect();
        for intent in pan_intents(&held) {
            queue.push(intent);
        }

        // Rotation: horizontal left-drag
        let (mx, _) = mouse_position();
        if is_mouse_button_pressed(MouseButton::Left) {
            self.drag.begin(mx);
        } else if is_mouse_button_down(MouseButton::Left) {
            if let Some(sign) = self.drag.update(mx) {
                queue.push(Intent::Rotate(sign));
            }
        } else {
            self.drag.end();
        }

        if let Some(intent) = wheel_intent(mouse_wheel().1) {
            queue.push(intent);
        }

        AppCommands {
            capture: is_key_pressed(KeyCode::F12),
            toggle_hud: is_key_pressed(KeyCode::H),
            quit: is_key_pressed(KeyCode::Escape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(pan_binding(KeyCode::W), Some((PanAxis::Depth, Sign::Positive)));
        assert_eq!(pan_binding(KeyCode::Left), Some((PanAxis::Lateral, Sign::Negative)));
        assert_eq!(pan_binding(KeyCode::Q), Some((PanAxis::Vertical, Sign::Negative)));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        assert_eq!(pan_binding(KeyCode::Z), None);
        assert_eq!(pan_binding(KeyCode::Space), None);
        assert!(pan_intents(&[KeyCode::Z, KeyCode::Tab]).is_empty());
    }

    #[test]
    fn test_shared_direction_fires_once() {
        let intents = pan_intents(&[KeyCode::W, KeyCode::Up, KeyCode::D]);
        assert_eq!(
            intents,
            vec![
                Intent::Pan { axis: PanAxis::Depth, sign: Sign::Positive },
                Intent::Pan { axis: PanAxis::Lateral, sign: Sign::Positive },
            ]
        );
    }

    #[test]
    fn test_wheel() {
        assert_eq!(wheel_intent(1.0), Some(Intent::Zoom(Sign::Positive)));
        assert_eq!(wheel_intent(-120.0), Some(Intent::Zoom(Sign::Negative)));
        assert_eq!(wheel_intent(0.0), None);
    }
}
