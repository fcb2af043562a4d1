//! # Drag Selection Tests
//!
//! Pointer samples in, `select_start` / `select_next` / `select_end` out.

use std::collections::HashMap;
use std::time::Duration;

use tileboard_ui::{
    tile_factory, BoardConfig, GameLogic, HeadlessSurface, ItemInfo, PointerEvent,
    SectionRenderer, SelectEvent,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Start(u32),
    Next(u32),
    End,
}

#[derive(Default)]
struct Recorder {
    cells: HashMap<u32, ItemInfo>,
    calls: Vec<Call>,
}

impl Recorder {
    /// One tile per message, laid out left to right on row 0.
    fn with_row(count: u32) -> Self {
        let mut recorder = Self::default();
        for message in 0..count {
            recorder
                .cells
                .insert(message, ItemInfo::new(message, 0, 0, false));
        }
        recorder
    }
}

impl GameLogic<u32> for Recorder {
    fn select_start(&mut self, message: &u32) {
        self.calls.push(Call::Start(*message));
    }

    fn select_next(&mut self, message: &u32) {
        self.calls.push(Call::Next(*message));
    }

    fn select_end(&mut self) {
        self.calls.push(Call::End);
    }

    fn info(&self, message: &u32) -> ItemInfo {
        self.cells.get(message).copied().unwrap_or_default()
    }
}

fn board(recorder: &Recorder) -> SectionRenderer<u32, HeadlessSurface> {
    let mut section =
        SectionRenderer::new(BoardConfig::default(), HeadlessSurface::new(), tile_factory())
            .unwrap();
    let mut messages: Vec<_> = recorder.cells.keys().copied().collect();
    messages.sort_unstable();
    for message in messages {
        section.add(message).unwrap();
    }
    section.tick(Duration::ZERO, recorder);
    section
}

#[test]
fn test_drag_across_two_tiles() {
    let mut game = Recorder::with_row(3);
    let mut section = board(&game);
    section.activate();

    let a = section.registry().item_id(&0).unwrap();
    let b = section.registry().item_id(&1).unwrap();

    let events: Vec<_> = [
        PointerEvent::down(25.0, 25.0),
        PointerEvent::moved(30.0, 30.0),
        PointerEvent::moved(75.0, 25.0),
        PointerEvent::moved(80.0, 40.0),
        PointerEvent::up(80.0, 40.0),
    ]
    .into_iter()
    .filter_map(|event| section.pointer(event, &mut game))
    .collect();

    assert_eq!(
        events,
        [SelectEvent::Start(a), SelectEvent::Next(b), SelectEvent::End]
    );
    assert_eq!(game.calls, [Call::Start(0), Call::Next(1), Call::End]);
    assert!(!section.gesture().is_selecting());
}

#[test]
fn test_leave_ends_drag() {
    let mut game = Recorder::with_row(2);
    let mut section = board(&game);
    section.activate();

    section.pointer(PointerEvent::down(25.0, 25.0), &mut game);
    section.pointer(PointerEvent::leave(-5.0, 25.0), &mut game);
    section.pointer(PointerEvent::up(-5.0, 25.0), &mut game);

    assert_eq!(game.calls, [Call::Start(0), Call::End]);
}

#[test]
fn test_down_on_empty_cell_selects_nothing() {
    let mut game = Recorder::with_row(2);
    let mut section = board(&game);
    section.activate();

    section.pointer(PointerEvent::down(25.0, 325.0), &mut game);
    section.pointer(PointerEvent::moved(25.0, 25.0), &mut game);
    section.pointer(PointerEvent::up(25.0, 25.0), &mut game);

    assert!(game.calls.is_empty());
}

#[test]
fn test_inactive_section_ignores_pointer() {
    let mut game = Recorder::with_row(2);
    let mut section = board(&game);

    assert_eq!(section.pointer(PointerEvent::down(25.0, 25.0), &mut game), None);
    assert_eq!(section.surface().listener_installs(), 0);

    for _ in 0..3 {
        section.activate();
        section.deactivate();
    }

    for event in [
        PointerEvent::down(25.0, 25.0),
        PointerEvent::moved(75.0, 25.0),
        PointerEvent::up(75.0, 25.0),
    ] {
        assert_eq!(section.pointer(event, &mut game), None);
    }

    assert!(game.calls.is_empty());
    assert_eq!(section.surface().listener_installs(), 1);
}

#[test]
fn test_deactivation_keeps_drag_in_flight() {
    let mut game = Recorder::with_row(2);
    let mut section = board(&game);
    section.activate();

    section.pointer(PointerEvent::down(25.0, 25.0), &mut game);
    section.deactivate();
    section.pointer(PointerEvent::up(25.0, 25.0), &mut game);
    assert!(section.gesture().is_selecting());

    section.activate();
    section.pointer(PointerEvent::moved(75.0, 25.0), &mut game);
    section.pointer(PointerEvent::up(75.0, 25.0), &mut game);

    assert_eq!(game.calls, [Call::Start(0), Call::Next(1), Call::End]);
}

#[test]
fn test_hit_test_follows_falling_tile() {
    let mut game = Recorder::with_row(1);
    let mut section = board(&game);
    section.activate();

    game.cells.insert(0, ItemInfo::new(0, 4, 0, false));
    section.move_to(&0, 0, 4).unwrap();

    // Halfway through a 400 ms ease-in fall the tile has covered a quarter
    // of the distance: its top edge sits at 50 px.
    section.tick(Duration::from_millis(200), &game);

    section.pointer(PointerEvent::down(25.0, 25.0), &mut game);
    assert!(game.calls.is_empty());

    section.pointer(PointerEvent::down(25.0, 75.0), &mut game);
    assert_eq!(game.calls, [Call::Start(0)]);
}
