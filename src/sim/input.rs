//! Player movement intent from keyboard, touch and pointer
//!
//! Three sources compete; whichever acted last owns the intent. The intent is
//! resolved once per frame against the current player position.

use std::collections::HashSet;

use super::state::{Arena, Player};
use crate::config::Config;

/// Arrow keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    Left,
    Right,
}

impl ArrowKey {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(ArrowKey::Left),
            "ArrowRight" | "Right" => Some(ArrowKey::Right),
            _ => None,
        }
    }
}

/// Raw input, already in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(ArrowKey),
    KeyUp(ArrowKey),
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    TouchEnd,
    PointerDown { x: f32 },
    PointerMove { x: f32 },
    PointerUp,
}

impl InputEvent {
    /// Presses and drags start control; releases only end it
    pub fn is_release(&self) -> bool {
        matches!(
            self,
            InputEvent::KeyUp(_) | InputEvent::TouchEnd | InputEvent::PointerUp
        )
    }
}

/// Movement to apply this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputIntent {
    /// Px per nominal frame, scaled by frame time when applied
    pub velocity: f32,
    /// Immediate displacement (touch drag)
    pub shift: f32,
    /// Place the player here before anything else (pointer arrived)
    pub snap_to: Option<f32>,
    /// Movement this frame must not carry the player past this x (pointer target)
    pub stop_at: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum ControlSource {
    #[default]
    None,
    Keyboard,
    Touch,
    Pointer { x: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct InputController {
    held: HashSet<ArrowKey>,
    source: ControlSource,
    last_touch_x: Option<f32>,
    pending_shift: f32,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything (new session)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.held.insert(key);
                self.source = ControlSource::Keyboard;
            }
            InputEvent::KeyUp(key) => {
                self.held.remove(&key);
                if self.source == ControlSource::Keyboard && self.held.is_empty() {
                    self.source = ControlSource::None;
                }
            }
            InputEvent::TouchStart { x } => {
                self.last_touch_x = Some(x);
                self.pending_shift = 0.0;
                self.source = ControlSource::Touch;
            }
            InputEvent::TouchMove { x } => {
                let last = self.last_touch_x.unwrap_or(x);
                self.pending_shift += x - last;
                self.last_touch_x = Some(x);
                self.source = ControlSource::Touch;
            }
            InputEvent::TouchEnd => {
                self.last_touch_x = None;
                if self.source == ControlSource::Touch {
                    self.source = ControlSource::None;
                }
            }
            InputEvent::PointerDown { x } | InputEvent::PointerMove { x } => {
                let pressed = matches!(event, InputEvent::PointerDown { .. })
                    || matches!(self.source, ControlSource::Pointer { .. });
                if pressed {
                    self.source = ControlSource::Pointer { x };
                }
            }
            InputEvent::PointerUp => {
                if matches!(self.source, ControlSource::Pointer { .. }) {
                    self.source = ControlSource::None;
                }
            }
        }
    }

    fn keyboard_velocity(&self, config: &Config) -> f32 {
        if self.held.contains(&ArrowKey::Left) {
            -config.player_speed
        } else if self.held.contains(&ArrowKey::Right) {
            config.player_speed
        } else {
            0.0
        }
    }

    /// Resolve the intent for this frame. Touch displacement is consumed.
    pub fn intent(&mut self, player: &Player, arena: &Arena, config: &Config) -> InputIntent {
        let shift = std::mem::take(&mut self.pending_shift);
        match self.source {
            ControlSource::None => InputIntent::default(),
            ControlSource::Keyboard => InputIntent {
                velocity: self.keyboard_velocity(config),
                ..Default::default()
            },
            ControlSource::Touch => InputIntent {
                shift: shift * config.touch_sensitivity,
                ..Default::default()
            },
            ControlSource::Pointer { x } => {
                // Center the player under the pointer
                let target = (x - player.size / 2.0).clamp(0.0, player.max_x(arena));
                let distance = target - player.x;
                if distance.abs() > 1.0 {
                    InputIntent {
                        velocity: distance.signum() * distance.abs().min(config.player_speed),
                        stop_at: Some(target),
                        ..Default::default()
                    }
                } else {
                    InputIntent {
                        snap_to: Some(target),
                        ..Default::default()
                    }
                }
            }
        }
    }
}

/// Apply an intent to the player for a frame lasting `frame_ms`
pub fn apply_intent(
    player: &mut Player,
    intent: &InputIntent,
    frame_ms: f64,
    arena: &Arena,
) {
    if let Some(x) = intent.snap_to {
        player.set_x(x, arena);
    }
    player.velocity = intent.velocity;
    let step = intent.velocity * (frame_ms / crate::consts::NOMINAL_FRAME_MS) as f32;
    let mut x = player.x + intent.shift + step;
    // Long frames would otherwise overshoot and oscillate around the target
    if let Some(target) = intent.stop_at {
        let (from, to) = (player.x, x);
        if (from <= target && to > target) || (from >= target && to < target) {
            x = target;
        }
    }
    player.set_x(x, arena);
}
