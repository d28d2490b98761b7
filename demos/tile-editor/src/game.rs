use glow_engine::*;

/// Drag-to-paint tile editor with light tiles and a platformer character.
///
/// Controls: drag to place or erase, `1` toggles Light/Dirt, `2` Stone,
/// `3` Grass, `E` toggles erase mode, `P` spawns the player, `A`/`D` move,
/// `Space` jumps.
pub struct TileEditor {
    placement: TileKind,
    erase_mode: bool,
    pointer_down: bool,
    held: PlayerIntent,
}

impl TileEditor {
    pub fn new() -> Self {
        Self {
            placement: TileKind::Dirt,
            erase_mode: false,
            pointer_down: false,
            held: PlayerIntent::default(),
        }
    }

    pub fn placement(&self) -> TileKind {
        self.placement
    }

    pub fn erase_mode(&self) -> bool {
        self.erase_mode
    }

    fn select(&mut self, ctx: &mut EngineContext, kind: TileKind) {
        if self.placement == kind {
            return;
        }
        self.placement = kind;
        log::info!("placing {:?}", kind);
        ctx.emit_event(GameEvent::new(
            EventKind::TileTypeChanged,
            kind.code() as f32,
            0.0,
            0.0,
        ));
    }

    fn toggle_erase(&mut self, ctx: &mut EngineContext) {
        self.erase_mode = !self.erase_mode;
        if self.erase_mode {
            log::info!("erase mode activated");
        } else {
            log::info!("erase mode deactivated");
        }
        let flag = if self.erase_mode { 1.0 } else { 0.0 };
        ctx.emit_event(GameEvent::new(EventKind::EraseModeChanged, flag, 0.0, 0.0));
    }

    /// Place or erase at a pixel position.
    fn paint(&self, ctx: &mut EngineContext, x: f32, y: f32) {
        let Some((cx, cy)) = ctx.cell_at(x, y) else {
            return;
        };
        let kind = if self.erase_mode {
            TileKind::Empty
        } else {
            self.placement
        };
        if ctx.place_tile(cx, cy, kind) {
            ctx.emit_event(GameEvent::new(
                EventKind::TileChanged,
                cx as f32,
                cy as f32,
                kind.code() as f32,
            ));
        }
    }

    fn key_down(&mut self, ctx: &mut EngineContext, key_code: u32) {
        match key_code {
            keys::DIGIT_1 => {
                let next = if self.placement == TileKind::Light {
                    TileKind::Dirt
                } else {
                    TileKind::Light
                };
                self.select(ctx, next);
            }
            keys::DIGIT_2 => self.select(ctx, TileKind::Stone),
            keys::DIGIT_3 => self.select(ctx, TileKind::Grass),
            keys::E => self.toggle_erase(ctx),
            keys::P => {
                if let Some(player) = ctx.spawn_player() {
                    let (x, y) = (player.pos.x, player.pos.y);
                    ctx.emit_event(GameEvent::new(EventKind::PlayerSpawned, x, y, 0.0));
                }
            }
            _ => {}
        }
        self.set_held(ctx, key_code, true);
    }

    /// Track movement keys. Ignored until the player exists.
    fn set_held(&mut self, ctx: &EngineContext, key_code: u32, down: bool) {
        if ctx.player.is_none() {
            return;
        }
        match key_code {
            keys::A => self.held.left = down,
            keys::D => self.held.right = down,
            keys::W => self.held.up = down,
            keys::S => self.held.down = down,
            keys::SPACE => self.held.jump = down,
            _ => {}
        }
    }
}

impl Default for TileEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for TileEditor {
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!(
            "tile editor: {}x{} cells, placing {:?}",
            ctx.grid.width(),
            ctx.grid.height(),
            self.placement
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => {
                    self.pointer_down = true;
                    self.paint(ctx, x, y);
                }
                InputEvent::PointerMove { x, y } => {
                    if self.pointer_down {
                        self.paint(ctx, x, y);
                    }
                }
                InputEvent::PointerUp { .. } => self.pointer_down = false,
                InputEvent::KeyDown { key_code } => self.key_down(ctx, key_code),
                InputEvent::KeyUp { key_code } => self.set_held(ctx, key_code, false),
            }
        }

        if let Some(player) = ctx.player.as_mut() {
            player.intent = self.held;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: f32 = 32.0;

    fn setup() -> (TileEditor, EngineContext) {
        let mut editor = TileEditor::new();
        let mut ctx = EngineContext::new(editor.config());
        editor.init(&mut ctx);
        (editor, ctx)
    }

    fn frame(editor: &mut TileEditor, ctx: &mut EngineContext, events: &[InputEvent]) {
        let mut input = InputQueue::new();
        for &event in events {
            input.push(event);
        }
        ctx.clear_frame_data();
        editor.update(ctx, &input);
        ctx.step_physics();
        ctx.update_lighting();
    }

    fn at(cx: i32, cy: i32) -> (f32, f32) {
        (cx as f32 * TILE + 5.0, cy as f32 * TILE + 5.0)
    }

    #[test]
    fn click_places_current_tile() {
        let (mut editor, mut ctx) = setup();
        let (x, y) = at(4, 7);
        frame(&mut editor, &mut ctx, &[InputEvent::PointerDown { x, y }]);
        assert_eq!(ctx.grid.get(4, 7), Some(TileKind::Dirt));
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].event_kind(), Some(EventKind::TileChanged));
    }

    #[test]
    fn drag_paints_only_while_pressed() {
        let (mut editor, mut ctx) = setup();
        let (x0, y0) = at(1, 1);
        let (x1, y1) = at(2, 1);
        let (x2, y2) = at(3, 1);
        let (x3, y3) = at(4, 1);
        frame(
            &mut editor,
            &mut ctx,
            &[
                InputEvent::PointerMove { x: x0, y: y0 },
                InputEvent::PointerDown { x: x1, y: y1 },
                InputEvent::PointerMove { x: x2, y: y2 },
                InputEvent::PointerUp { x: x2, y: y2 },
                InputEvent::PointerMove { x: x3, y: y3 },
            ],
        );
        assert_eq!(ctx.grid.get(1, 1), Some(TileKind::Empty));
        assert_eq!(ctx.grid.get(2, 1), Some(TileKind::Dirt));
        assert_eq!(ctx.grid.get(3, 1), Some(TileKind::Dirt));
        assert_eq!(ctx.grid.get(4, 1), Some(TileKind::Empty));
    }

    #[test]
    fn pointer_off_grid_is_ignored() {
        let (mut editor, mut ctx) = setup();
        frame(
            &mut editor,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: -10.0, y: 5.0 },
                InputEvent::PointerMove { x: 5000.0, y: 5.0 },
            ],
        );
        assert_eq!(ctx.grid.count(TileKind::Empty), ctx.grid.capacity());
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn key_1_toggles_light_and_dirt() {
        let (mut editor, mut ctx) = setup();
        let press = InputEvent::KeyDown { key_code: keys::DIGIT_1 };
        frame(&mut editor, &mut ctx, &[press]);
        assert_eq!(editor.placement(), TileKind::Light);
        assert_eq!(ctx.events[0].event_kind(), Some(EventKind::TileTypeChanged));
        assert_eq!(ctx.events[0].a, TileKind::Light.code() as f32);

        frame(&mut editor, &mut ctx, &[press]);
        assert_eq!(editor.placement(), TileKind::Dirt);
    }

    #[test]
    fn keys_2_and_3_select_stone_and_grass() {
        let (mut editor, mut ctx) = setup();
        frame(&mut editor, &mut ctx, &[InputEvent::KeyDown { key_code: keys::DIGIT_2 }]);
        assert_eq!(editor.placement(), TileKind::Stone);
        frame(&mut editor, &mut ctx, &[InputEvent::KeyDown { key_code: keys::DIGIT_3 }]);
        assert_eq!(editor.placement(), TileKind::Grass);
        // From anything but Light, `1` goes to Light.
        frame(&mut editor, &mut ctx, &[InputEvent::KeyDown { key_code: keys::DIGIT_1 }]);
        assert_eq!(editor.placement(), TileKind::Light);
    }

    #[test]
    fn erase_mode_clears_cells() {
        let (mut editor, mut ctx) = setup();
        let (x, y) = at(6, 6);
        frame(&mut editor, &mut ctx, &[InputEvent::PointerDown { x, y }, InputEvent::PointerUp { x, y }]);
        assert_eq!(ctx.grid.get(6, 6), Some(TileKind::Dirt));

        frame(
            &mut editor,
            &mut ctx,
            &[
                InputEvent::KeyDown { key_code: keys::E },
                InputEvent::PointerDown { x, y },
            ],
        );
        assert!(editor.erase_mode());
        assert_eq!(ctx.grid.get(6, 6), Some(TileKind::Empty));
        assert_eq!(ctx.events[0].event_kind(), Some(EventKind::EraseModeChanged));
        assert_eq!(ctx.events[0].a, 1.0);
    }

    #[test]
    fn placed_light_shows_up_in_the_map() {
        let (mut editor, mut ctx) = setup();
        let (x, y) = at(5, 5);
        frame(
            &mut editor,
            &mut ctx,
            &[
                InputEvent::KeyDown { key_code: keys::DIGIT_1 },
                InputEvent::PointerDown { x, y },
            ],
        );
        let map = ctx.light_map();
        assert!((map.get(5, 5) - 0.8).abs() < 1e-6);
        assert!((map.get(10, 5) - 0.4).abs() < 1e-5);
        assert_eq!(map.get(15, 5), 0.0);
    }

    #[test]
    fn movement_keys_ignored_before_spawn() {
        let (mut editor, mut ctx) = setup();
        frame(&mut editor, &mut ctx, &[InputEvent::KeyDown { key_code: keys::D }]);
        assert!(ctx.player.is_none());

        frame(&mut editor, &mut ctx, &[InputEvent::KeyDown { key_code: keys::P }]);
        let player = ctx.player.as_ref().unwrap();
        assert_eq!(player.intent, PlayerIntent::default());
        assert_eq!(player.vel.x, 0.0);
        assert!(ctx.events.iter().any(|e| e.event_kind() == Some(EventKind::PlayerSpawned)));
    }

    #[test]
    fn held_keys_drive_the_player_until_released() {
        let (mut editor, mut ctx) = setup();
        frame(&mut editor, &mut ctx, &[InputEvent::KeyDown { key_code: keys::P }]);
        frame(&mut editor, &mut ctx, &[InputEvent::KeyDown { key_code: keys::D }]);
        let x_after_press = ctx.player.as_ref().unwrap().pos.x;
        assert!(x_after_press > 100.0);

        frame(&mut editor, &mut ctx, &[]);
        assert!(ctx.player.as_ref().unwrap().intent.right);

        frame(&mut editor, &mut ctx, &[InputEvent::KeyUp { key_code: keys::D }]);
        assert!(!ctx.player.as_ref().unwrap().intent.right);
    }

    #[test]
    fn player_falls_through_an_erased_floor() {
        let (mut editor, mut ctx) = setup();
        ctx.grid.fill_rect(0, 10, 20, 1, TileKind::Stone);
        frame(&mut editor, &mut ctx, &[InputEvent::KeyDown { key_code: keys::P }]);
        for _ in 0..200 {
            frame(&mut editor, &mut ctx, &[]);
        }
        assert!(ctx.player.as_ref().unwrap().grounded);
        let rest_y = ctx.player.as_ref().unwrap().pos.y;

        let (x3, y) = at(3, 10);
        let (x4, _) = at(4, 10);
        frame(
            &mut editor,
            &mut ctx,
            &[
                InputEvent::KeyDown { key_code: keys::E },
                InputEvent::PointerDown { x: x3, y },
                InputEvent::PointerMove { x: x4, y },
                InputEvent::PointerUp { x: x4, y },
            ],
        );
        let player = ctx.player.as_ref().unwrap();
        assert!(player.pos.y > rest_y);
        assert!(!player.grounded);
    }
}
