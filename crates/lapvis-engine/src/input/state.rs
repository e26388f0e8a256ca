use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};

/// Current input state of the window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels; `None` when outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev` to the held state and records transitions into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(focused) => {
                if !*focused {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) && !*repeat {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton { button, state, x, y } => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton {
            button: MouseButton::Left,
            state,
            x: 10.0,
            y: 20.0,
        }
    }

    #[test]
    fn press_release_records_both_transitions() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, click(MouseButtonState::Pressed));
        assert!(st.buttons_down.contains(&MouseButton::Left));
        st.apply_event(&mut fr, click(MouseButtonState::Released));

        assert!(st.buttons_down.is_empty());
        assert!(fr.button_released(MouseButton::Left));
        assert_eq!(st.pointer_pos, Some((10.0, 20.0)));
    }

    #[test]
    fn release_without_press_is_not_a_click() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, click(MouseButtonState::Released));
        assert!(!fr.button_released(MouseButton::Left));
    }

    #[test]
    fn key_repeat_is_not_a_new_press() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let press = |repeat| InputEvent::Key { key: Key::Enter, state: KeyState::Pressed, repeat };

        st.apply_event(&mut fr, press(false));
        assert!(fr.key_pressed(Key::Enter));

        fr.clear();
        st.apply_event(&mut fr, press(true));
        assert!(!fr.key_pressed(Key::Enter));
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, click(MouseButtonState::Pressed));
        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(st.buttons_down.is_empty());
    }

    #[test]
    fn pointer_leave_forgets_position() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::PointerMoved { x: 1.0, y: 2.0 });
        st.apply_event(&mut fr, InputEvent::PointerLeft);
        assert_eq!(st.pointer_pos, None);
    }
}
