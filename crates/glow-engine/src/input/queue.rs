/// DOM `keyCode` values the engine recognises.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const DIGIT_1: u32 = 49;
    pub const DIGIT_2: u32 = 50;
    pub const DIGIT_3: u32 = 51;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const E: u32 = 69;
    pub const P: u32 = 80;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
}

/// Input event types the engine understands.
/// Pointer coordinates are world pixels, already offset by the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A press ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to (x, y), pressed or not.
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
}

/// Events queued by the host between ticks.
/// The host pushes; the runner drains once per frame after `Game::update`.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: keys::SPACE });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn iter_preserves_arrival_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        q.push(InputEvent::PointerMove { x: 2.0, y: 2.0 });
        q.push(InputEvent::PointerUp { x: 3.0, y: 3.0 });
        let seen: Vec<_> = q.iter().copied().collect();
        assert_eq!(
            seen,
            vec![
                InputEvent::PointerDown { x: 1.0, y: 1.0 },
                InputEvent::PointerMove { x: 2.0, y: 2.0 },
                InputEvent::PointerUp { x: 3.0, y: 3.0 },
            ]
        );
        assert_eq!(q.len(), 3);
    }
}
