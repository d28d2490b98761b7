use bytemuck::{Pod, Zeroable};

/// A game event communicated from Rust to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: EventKind, a: f32, b: f32, c: f32) -> Self {
        Self {
            kind: kind as u32 as f32,
            a,
            b,
            c,
        }
    }

    /// Decoded kind, if it is one the engine knows.
    pub fn event_kind(&self) -> Option<EventKind> {
        EventKind::from_code(self.kind as u32)
    }
}

/// Event kinds written into `GameEvent::kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventKind {
    /// `a` = new placement tile code.
    TileTypeChanged = 1,
    /// `a` = 1.0 when erase mode is now on.
    EraseModeChanged = 2,
    /// `a`, `b` = spawn position.
    PlayerSpawned = 3,
    /// `a`, `b` = cell, `c` = tile code written.
    TileChanged = 4,
}

impl EventKind {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(EventKind::TileTypeChanged),
            2 => Some(EventKind::EraseModeChanged),
            3 => Some(EventKind::PlayerSpawned),
            4 => Some(EventKind::TileChanged),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn kind_survives_float_encoding() {
        let event = GameEvent::new(EventKind::PlayerSpawned, 100.0, 100.0, 0.0);
        assert_eq!(event.kind, 3.0);
        assert_eq!(event.event_kind(), Some(EventKind::PlayerSpawned));
        assert_eq!(GameEvent::default().event_kind(), None);
    }
}
