//! Integration tests for the frame scheduler driving a small animation state.

use std::time::Duration;

use tileboard_core::{Completion, FrameScheduler, ItemId, SlotPool, TaskError};

/// Minimal stand-in for a board stage: a pool of tile names.
#[derive(Default)]
struct Stage {
    tiles: SlotPool<&'static str>,
    evicted: Vec<ItemId>,
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn schedule_eviction(
    scheduler: &mut FrameScheduler<Stage>,
    id: ItemId,
    after: Duration,
) -> Completion {
    let completion = Completion::pending();
    let done = completion.clone();
    scheduler.delay(after, move |stage, _| {
        done.resolve();
        stage
            .tiles
            .remove(id)
            .map(|_| stage.evicted.push(id))
            .ok_or(TaskError::StaleHandle(id))
    });
    completion
}

#[test]
fn test_eviction_visible_to_same_frame_render() {
    let mut scheduler = FrameScheduler::new();
    let mut stage = Stage::default();
    let a = stage.tiles.insert("a");
    let b = stage.tiles.insert("b");

    let removal = schedule_eviction(&mut scheduler, a, ms(350));

    let mut rendered = Vec::new();
    scheduler.tick(ms(16), &mut stage, |stage, _| rendered.push(stage.tiles.len()));
    assert!(!removal.is_resolved());

    scheduler.tick(ms(352), &mut stage, |stage, _| rendered.push(stage.tiles.len()));
    assert!(removal.is_resolved());
    assert_eq!(rendered, [2, 1]);
    assert_eq!(stage.evicted, [a]);
    assert!(stage.tiles.contains(b));
}

#[test]
fn test_double_eviction_fails_without_blocking_others() {
    let mut scheduler = FrameScheduler::new();
    let mut stage = Stage::default();
    let a = stage.tiles.insert("a");
    let b = stage.tiles.insert("b");

    let first = schedule_eviction(&mut scheduler, a, ms(10));
    let second = schedule_eviction(&mut scheduler, a, ms(10));
    let other = schedule_eviction(&mut scheduler, b, ms(10));

    let report = scheduler.tick(ms(10), &mut stage, |_, _| {});

    assert_eq!(report.fired, 3);
    assert_eq!(report.failed, 1);
    assert!(first.is_resolved() && second.is_resolved() && other.is_resolved());
    assert!(stage.tiles.is_empty());
}

#[test]
fn test_live_count_matches_adds_minus_completed_removes() {
    let mut scheduler = FrameScheduler::new();
    let mut stage = Stage::default();
    let names = ["a", "b", "c", "d", "e", "f"];
    let ids: Vec<_> = names.iter().map(|n| stage.tiles.insert(*n)).collect();

    let removals: Vec<_> = ids
        .iter()
        .take(4)
        .enumerate()
        .map(|(i, id)| schedule_eviction(&mut scheduler, *id, ms(100 * (i as u64 + 1))))
        .collect();

    scheduler.tick(ms(250), &mut stage, |_, _| {});
    let completed = removals.iter().filter(|c| c.is_resolved()).count();
    assert_eq!(completed, 2);
    assert_eq!(stage.tiles.len(), names.len() - completed);

    scheduler.tick(ms(1000), &mut stage, |_, _| {});
    assert_eq!(stage.tiles.len(), names.len() - 4);
    assert_eq!(scheduler.pending(), 0);
}
