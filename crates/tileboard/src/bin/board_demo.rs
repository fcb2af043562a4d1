//! # TILEBOARD Demo
//!
//! Plays a scripted chain game on a headless surface and prints what
//! happened.
//!
//! ```bash
//! # Default 8x8 board
//! board_demo
//!
//! # Custom board, verbose
//! RUST_LOG=tileboard_ui=debug board_demo config/board.toml
//! ```

use std::error::Error;
use std::time::Duration;

use tileboard::ui::{
    tile_factory, BoardConfig, GameLogic, HeadlessSurface, PointerEvent, SectionRenderer,
};
use tileboard::{BoardDriver, ChainGame, CommandBus, Tile, TARGET_FRAME_TIME};

/// Tile kinds on the sprite sheet.
const KINDS: u32 = 5;
/// Seed for the tile generator.
const SEED: u64 = 0x7115_B0A2;
/// Drags to attempt.
const ROUNDS: usize = 6;
/// Frames to let animations play out after each drag.
const SETTLE_FRAMES: u32 = 90;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => BoardConfig::load(&path)?,
        None => BoardConfig::default(),
    };
    tracing::info!(
        columns = config.columns,
        rows = config.rows,
        width = config.width,
        height = config.height,
        "board configured"
    );

    let (sender, receiver) = CommandBus::create_pair();
    let mut game = ChainGame::new(config.columns, config.rows, KINDS, SEED, sender);

    let section = SectionRenderer::new(config, HeadlessSurface::new(), tile_factory())?;
    let mut driver = BoardDriver::new(section, receiver);
    driver.section_mut().activate();

    let mut now = Duration::ZERO;
    let mut frames = 0_u64;
    let mut failed = 0_u64;

    let mut run_frames = |driver: &mut BoardDriver<Tile, HeadlessSurface>,
                          game: &mut ChainGame,
                          count: u32| {
        for _ in 0..count {
            let summary = driver.frame(now, &*game);
            for tile in summary.retired {
                game.forget(tile);
            }
            failed += u64::from(summary.tick.failed);
            frames += 1;
            now += TARGET_FRAME_TIME;
        }
    };

    run_frames(&mut driver, &mut game, 2);

    for round in 1..=ROUNDS {
        let Some(chain) = game.find_chain() else {
            tracing::info!(round, "no chain left on the board");
            break;
        };

        let geometry = *driver.section().geometry();
        let points: Vec<_> = chain
            .iter()
            .map(|tile| geometry.cell_center(game.info(tile).position))
            .collect();

        let Some((first, rest)) = points.split_first() else {
            continue;
        };
        driver.pointer(PointerEvent::down(first.x, first.y), &mut game);
        for point in rest {
            driver.pointer(PointerEvent::moved(point.x, point.y), &mut game);
        }
        let last = rest.last().unwrap_or(first);
        driver.pointer(PointerEvent::up(last.x, last.y), &mut game);

        tracing::info!(round, len = chain.len(), "drag played");
        run_frames(&mut driver, &mut game, SETTLE_FRAMES);
    }

    let stats = game.stats();
    let scheduler = driver.section().scheduler().stats();
    let surface = driver.section().surface();

    println!("═══════════════════════════════════════════════════════");
    println!("                  TILEBOARD DEMO");
    println!("═══════════════════════════════════════════════════════");
    println!("  Frames:            {frames}");
    println!("  Chains cleared:    {}", stats.chains);
    println!("  Tiles cleared:     {}", stats.tiles);
    println!("  Live items:        {}", driver.section().registry().len());
    println!("  Attached elements: {}", surface.attached().len());
    println!("  Tasks fired:       {} ({failed} failed)", scheduler.fired);
    println!("  Frame requests:    {}", surface.frame_requests());
    println!("═══════════════════════════════════════════════════════");

    Ok(())
}
