//! # Chain Game
//!
//! The demo game: drag across adjacent tiles of one kind; chains of three
//! or more are cleared, the tiles above fall, and fresh tiles fill the
//! holes.
//!
//! The game owns the truth (what sits in each cell). The board only asks
//! for it through [`GameLogic::info`] and hears about drags through the
//! `select_*` callbacks; every board change goes out over the command bus.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tileboard_ui::{GameLogic, ItemInfo};

use crate::bus::{BoardCommand, CommandSender};

/// Minimum chain length that clears.
pub const MIN_CHAIN: usize = 3;

/// Opaque tile token, the board's message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TileState {
    col: u32,
    row: u32,
    kind: u32,
    /// False once cleared; kept until the board finishes removing it.
    alive: bool,
}

/// Running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainStats {
    /// Chains cleared.
    pub chains: u64,
    /// Tiles cleared.
    pub tiles: u64,
    /// Drags that ended below the minimum chain length.
    pub fizzled: u64,
}

/// A chain-matching game on a `columns × rows` grid.
#[derive(Debug)]
pub struct ChainGame {
    columns: u32,
    rows: u32,
    kinds: u32,
    /// Row-major cell contents.
    grid: Vec<Option<Tile>>,
    tiles: HashMap<Tile, TileState>,
    chain: Vec<Tile>,
    next_tile: u64,
    rng: ChaCha8Rng,
    commands: CommandSender<Tile>,
    stats: ChainStats,
}

impl ChainGame {
    /// Creates a game and fills the board with random tiles.
    ///
    /// # Panics
    ///
    /// Panics if `kinds` is zero.
    #[must_use]
    pub fn new(columns: u32, rows: u32, kinds: u32, seed: u64, commands: CommandSender<Tile>) -> Self {
        assert!(kinds > 0, "a chain game needs at least one tile kind");
        let mut game = Self::empty(columns, rows, kinds, seed, commands);
        game.fill();
        game
    }

    /// Creates a game from a row-major layout of tile kinds.
    ///
    /// Cells beyond the layout are filled randomly.
    ///
    /// # Panics
    ///
    /// Panics if `kinds` is zero.
    #[must_use]
    pub fn from_layout(
        columns: u32,
        rows: u32,
        kinds: u32,
        layout: &[u32],
        seed: u64,
        commands: CommandSender<Tile>,
    ) -> Self {
        assert!(kinds > 0, "a chain game needs at least one tile kind");
        let mut game = Self::empty(columns, rows, kinds, seed, commands);
        for (index, &kind) in layout.iter().enumerate().take(game.grid.len()) {
            let index = index as u32;
            game.spawn(index % columns, index / columns, kind % kinds);
        }
        game.fill();
        game
    }

    fn empty(columns: u32, rows: u32, kinds: u32, seed: u64, commands: CommandSender<Tile>) -> Self {
        let cells = (columns * rows) as usize;
        Self {
            columns,
            rows,
            kinds,
            grid: vec![None; cells],
            tiles: HashMap::with_capacity(cells * 2),
            chain: Vec::with_capacity(16),
            next_tile: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            commands,
            stats: ChainStats::default(),
        }
    }

    /// Returns the grid width.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the grid height.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns the tile in a cell.
    #[must_use]
    pub fn tile_at(&self, col: u32, row: u32) -> Option<Tile> {
        self.index(col, row).and_then(|index| self.grid[index])
    }

    /// Returns a live tile's kind.
    #[must_use]
    pub fn kind_of(&self, tile: Tile) -> Option<u32> {
        self.live(tile).map(|state| state.kind)
    }

    /// Returns the current drag chain.
    #[must_use]
    pub fn chain(&self) -> &[Tile] {
        &self.chain
    }

    /// Returns running totals.
    #[must_use]
    pub const fn stats(&self) -> ChainStats {
        self.stats
    }

    /// Returns the number of tiles on the grid.
    #[must_use]
    pub fn live_tiles(&self) -> usize {
        self.grid.iter().flatten().count()
    }

    /// Drops the last state of a cleared tile once the board let it go.
    pub fn forget(&mut self, tile: Tile) {
        if self.tiles.get(&tile).is_some_and(|state| !state.alive) {
            self.tiles.remove(&tile);
        }
    }

    /// Finds a clearable chain, if the board has one.
    #[must_use]
    pub fn find_chain(&self) -> Option<Vec<Tile>> {
        for row in 0..self.rows {
            for col in 0..self.columns {
                let Some(start) = self.tile_at(col, row) else {
                    continue;
                };
                let mut path = vec![start];
                if self.extend(&mut path) {
                    return Some(path);
                }
            }
        }
        None
    }

    /// Depth-first search for a same-kind path of `MIN_CHAIN` tiles.
    fn extend(&self, path: &mut Vec<Tile>) -> bool {
        if path.len() >= MIN_CHAIN {
            return true;
        }
        let Some(&last) = path.last() else {
            return false;
        };
        let candidates: Vec<Tile> = self
            .neighbors(last)
            .filter(|tile| !path.contains(tile) && self.chains_with(path[0], *tile))
            .collect();
        for next in candidates {
            path.push(next);
            if self.extend(path) {
                return true;
            }
            path.pop();
        }
        false
    }

    fn neighbors(&self, tile: Tile) -> impl Iterator<Item = Tile> + '_ {
        let state = self.live(tile).copied();
        state.into_iter().flat_map(move |state| {
            (-1_i64..=1).flat_map(move |dr| {
                (-1_i64..=1).filter_map(move |dc| {
                    if dr == 0 && dc == 0 {
                        return None;
                    }
                    let col = u32::try_from(i64::from(state.col) + dc).ok()?;
                    let row = u32::try_from(i64::from(state.row) + dr).ok()?;
                    self.tile_at(col, row)
                })
            })
        })
    }

    fn live(&self, tile: Tile) -> Option<&TileState> {
        self.tiles.get(&tile).filter(|state| state.alive)
    }

    fn index(&self, col: u32, row: u32) -> Option<usize> {
        (col < self.columns && row < self.rows).then(|| (row * self.columns + col) as usize)
    }

    /// True if `tile` is live and of the same kind as `head`.
    fn chains_with(&self, head: Tile, tile: Tile) -> bool {
        match (self.live(head), self.live(tile)) {
            (Some(a), Some(b)) => a.kind == b.kind,
            _ => false,
        }
    }

    fn adjacent(&self, a: Tile, b: Tile) -> bool {
        match (self.live(a), self.live(b)) {
            (Some(a), Some(b)) => {
                let (dc, dr) = (a.col.abs_diff(b.col), a.row.abs_diff(b.row));
                dc <= 1 && dr <= 1 && dc + dr > 0
            }
            _ => false,
        }
    }

    fn send(&self, command: BoardCommand<Tile>) {
        if !self.commands.send(command) {
            tracing::warn!("board is gone; command not delivered");
        }
    }

    fn spawn(&mut self, col: u32, row: u32, kind: u32) {
        let Some(index) = self.index(col, row) else {
            return;
        };
        let tile = Tile(self.next_tile);
        self.next_tile += 1;
        self.tiles.insert(
            tile,
            TileState {
                col,
                row,
                kind,
                alive: true,
            },
        );
        self.grid[index] = Some(tile);
        self.send(BoardCommand::Add(tile));
    }

    /// Spawns a random tile in every empty cell. Returns how many spawned.
    pub fn fill(&mut self) -> usize {
        let mut spawned = 0;
        for row in 0..self.rows {
            for col in 0..self.columns {
                if self.tile_at(col, row).is_none() {
                    let kind = self.rng.gen_range(0..self.kinds);
                    self.spawn(col, row, kind);
                    spawned += 1;
                }
            }
        }
        spawned
    }

    /// Lets every column fall to the bottom, emitting moves.
    fn collapse(&mut self) {
        for col in 0..self.columns {
            let mut floor = self.rows;
            for row in (0..self.rows).rev() {
                let Some(tile) = self.tile_at(col, row) else {
                    continue;
                };
                floor -= 1;
                if floor == row {
                    continue;
                }

                self.grid[(floor * self.columns + col) as usize] = Some(tile);
                self.grid[(row * self.columns + col) as usize] = None;
                if let Some(state) = self.tiles.get_mut(&tile) {
                    state.row = floor;
                }
                self.send(BoardCommand::MoveTo {
                    message: tile,
                    col,
                    row: floor,
                });
            }
        }
    }

    fn resolve_chain(&mut self) {
        let chain = std::mem::take(&mut self.chain);
        if chain.len() < MIN_CHAIN {
            self.stats.fizzled += 1;
            tracing::debug!(len = chain.len(), "chain too short");
            return;
        }

        for tile in &chain {
            let Some(state) = self.tiles.get_mut(tile) else {
                continue;
            };
            state.alive = false;
            let index = (state.row * self.columns + state.col) as usize;
            self.grid[index] = None;
            self.send(BoardCommand::Remove(*tile));
        }

        let len = chain.len() as u64;
        self.stats.chains += 1;
        self.stats.tiles += len;
        tracing::debug!(len, "chain cleared");

        self.collapse();
        self.fill();
    }
}

impl GameLogic<Tile> for ChainGame {
    fn select_start(&mut self, tile: &Tile) {
        self.chain.clear();
        if self.live(*tile).is_some() {
            self.chain.push(*tile);
        }
    }

    fn select_next(&mut self, tile: &Tile) {
        let (Some(&head), Some(&last)) = (self.chain.first(), self.chain.last()) else {
            return;
        };

        // Dragging back onto the previous tile undoes the last step.
        if self.chain.len() >= 2 && self.chain[self.chain.len() - 2] == *tile {
            self.chain.pop();
            return;
        }

        if !self.chain.contains(tile) && self.chains_with(head, *tile) && self.adjacent(last, *tile) {
            self.chain.push(*tile);
        }
    }

    fn select_end(&mut self) {
        self.resolve_chain();
    }

    fn info(&self, tile: &Tile) -> ItemInfo {
        match self.tiles.get(tile) {
            Some(state) => ItemInfo::new(state.col, state.row, state.kind, self.chain.contains(tile)),
            None => {
                tracing::trace!(?tile, "info for unknown tile");
                ItemInfo::default()
            }
        }
    }
}
