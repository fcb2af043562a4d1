//! # Board Lifecycle Tests
//!
//! Add / remove / move through the section renderer, with time advanced
//! by explicit ticks.

use std::collections::HashMap;
use std::time::Duration;

use tileboard_ui::{
    tile_factory, AnimationTiming, BoardConfig, BoardError, GameLogic, GridPos, HeadlessSurface,
    ItemInfo, Point, SectionRenderer,
};

type Section = SectionRenderer<u32, HeadlessSurface>;

/// Game stand-in: a map from message to displayable state.
#[derive(Default)]
struct Grid {
    cells: HashMap<u32, ItemInfo>,
}

impl Grid {
    fn place(&mut self, message: u32, col: u32, row: u32) {
        self.cells.insert(message, ItemInfo::new(col, row, message % 5, false));
    }
}

impl GameLogic<u32> for Grid {
    fn select_start(&mut self, _: &u32) {}
    fn select_next(&mut self, _: &u32) {}
    fn select_end(&mut self) {}

    fn info(&self, message: &u32) -> ItemInfo {
        self.cells.get(message).copied().unwrap_or_default()
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn section_with(config: BoardConfig) -> Section {
    SectionRenderer::new(config, HeadlessSurface::new(), tile_factory()).unwrap()
}

fn section() -> Section {
    section_with(BoardConfig::default())
}

// ============================================================================
// REGISTRY CONSISTENCY
// ============================================================================

#[test]
fn test_live_count_is_adds_minus_completed_removes() {
    let mut section = section();
    let mut grid = Grid::default();

    for message in 0..10 {
        grid.place(message, message % 8, message / 8);
        section.add(message).unwrap();
    }
    section.tick(ms(0), &grid);

    for message in [0, 2, 4] {
        section.remove(&message).unwrap();
    }
    assert_eq!(section.registry().len(), 10, "removal still animating");

    section.tick(ms(1000), &grid);
    assert_eq!(section.registry().len(), 7);

    let last = section.remove(&6).unwrap();
    section.tick(ms(1100), &grid);
    assert_eq!(section.registry().len(), 7);
    assert!(!last.is_resolved());

    section.tick(ms(2000), &grid);
    assert_eq!(section.registry().len(), 6);
    assert!(last.is_resolved());
    assert_eq!(section.surface().attached().len(), 6);
}

#[test]
fn test_evicted_items_release_surface_state() {
    let mut section = section();
    let mut grid = Grid::default();
    let mut now = ms(0);
    let mut evicted = Vec::new();

    for message in 0..200 {
        grid.place(message, 0, 0);
        let id = section.add(message).unwrap();
        evicted.push(section.registry().get(id).unwrap().element());
        section.tick(now, &grid);

        section.remove(&message).unwrap();
        now += ms(400);
        section.tick(now, &grid);
    }

    let surface = section.surface();
    assert!(section.registry().is_empty());
    assert_eq!(surface.created_count(), 200);
    assert_eq!(surface.element_count(), 0);
    assert!(evicted.iter().all(|&element| surface.snapshot(element).is_none()));
}

#[test]
fn test_readd_after_remove_gets_fresh_handle() {
    let mut section = section();
    let grid = Grid::default();

    let first = section.add(42).unwrap();
    section.remove(&42).unwrap();
    assert!(matches!(section.add(42), Err(BoardError::DuplicateMessage(_))));

    section.tick(ms(500), &grid);
    let second = section.add(42).unwrap();

    assert_ne!(first, second);
    assert_eq!(section.registry().item_id(&42), Some(second));
    assert!(section.registry().get(first).is_none());
}

#[test]
fn test_removed_item_is_hit_until_evicted() {
    let mut section = section();
    let mut grid = Grid::default();
    grid.place(1, 0, 0);

    let id = section.add(1).unwrap();
    section.tick(ms(0), &grid);

    let center = Point::new(25.0, 25.0);
    let registry_hit = |section: &Section| section.registry().find_at(section.surface(), center);
    assert_eq!(registry_hit(&section), Some(id));

    section.remove(&1).unwrap();
    section.tick(ms(100), &grid);
    assert_eq!(registry_hit(&section), Some(id));
    assert!(section.registry().is_departing(id));

    section.tick(ms(350), &grid);
    assert_eq!(registry_hit(&section), None);
    assert!(!section.registry().contains(&1));
    assert!(section.registry().message(id).is_none());
}

// ============================================================================
// MOVES
// ============================================================================

#[test]
fn test_move_settles_on_completion() {
    let mut section = section();
    let mut grid = Grid::default();
    grid.place(1, 2, 0);

    let id = section.add(1).unwrap();
    section.tick(ms(0), &grid);

    grid.place(1, 2, 3);
    let done = section.move_to(&1, 2, 3).unwrap();
    assert_eq!(section.scheduler().next_deadline(), Some(ms(300)));

    section.tick(ms(150), &grid);
    assert!(!done.is_resolved());
    assert_eq!(section.registry().get(id).unwrap().geometry(), None);

    section.tick(ms(300), &grid);
    assert!(done.is_resolved());
    assert_eq!(
        section.registry().get(id).unwrap().geometry(),
        Some(GridPos::new(2, 3))
    );
}

#[test]
fn test_move_completion_after_eviction_is_ignored() {
    let mut section = section();
    let mut grid = Grid::default();
    grid.place(1, 0, 0);

    section.add(1).unwrap();
    section.tick(ms(0), &grid);

    grid.place(1, 0, 5);
    let moved = section.move_to(&1, 0, 5).unwrap();
    let removed = section.remove(&1).unwrap();

    section.tick(ms(350), &grid);
    assert!(removed.is_resolved());
    assert!(section.registry().is_empty());

    let report = section.tick(ms(500), &grid);
    assert_eq!(report.fired, 1);
    assert_eq!(report.failed, 0);
    assert!(moved.is_resolved());
    assert!(section.registry().is_empty());
}

#[test]
fn test_move_of_departing_item_rejected() {
    let mut section = section();
    section.add(1).unwrap();
    section.remove(&1).unwrap();

    assert!(matches!(
        section.move_to(&1, 0, 1),
        Err(BoardError::ItemDeparting(_))
    ));
    assert!(matches!(section.remove(&1), Err(BoardError::ItemDeparting(_))));
    assert!(matches!(
        section.move_to(&9, 0, 1),
        Err(BoardError::UnknownMessage(_))
    ));
}

#[test]
fn test_move_durations_are_clamped() {
    let mut section = section_with(BoardConfig {
        timing: AnimationTiming {
            remove_ms: 350,
            move_ms_per_cell: 100,
            max_move_ms: 250,
        },
        ..BoardConfig::default()
    });
    let mut grid = Grid::default();
    grid.place(1, 0, 0);
    grid.place(2, 1, 6);

    section.add(1).unwrap();
    section.add(2).unwrap();
    section.tick(ms(10), &grid);

    section.move_to(&1, 0, 7).unwrap();
    assert_eq!(section.scheduler().next_deadline(), Some(ms(260)));

    section.move_to(&2, 1, 5).unwrap();
    assert_eq!(section.scheduler().next_deadline(), Some(ms(110)));

    // Never painted: moves instantly, completing on the next tick.
    section.add(3).unwrap();
    let instant = section.move_to(&3, 4, 4).unwrap();
    assert_eq!(section.scheduler().next_deadline(), Some(ms(10)));

    section.tick(ms(11), &grid);
    assert!(instant.is_resolved());
}
