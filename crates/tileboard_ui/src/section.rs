//! # Section Renderer
//!
//! Composition root of a board section. Wires the item registry, the
//! frame scheduler and the drag gesture to a host [`Surface`] and a
//! [`GameLogic`] collaborator.
//!
//! The host drives it with exactly two calls:
//!
//! ```text
//! every refresh:        section.tick(now, &game)
//! every pointer sample: section.pointer(event, &mut game)
//! ```

use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use tileboard_core::{Completion, FrameScheduler, ItemId, TaskError, TickReport};

use crate::config::BoardConfig;
use crate::error::BoardResult;
use crate::game::GameLogic;
use crate::gesture::{DragGesture, SelectEvent};
use crate::input::PointerEvent;
use crate::item::{ItemFactory, ItemSpec};
use crate::layout::{GridGeometry, GridPos};
use crate::registry::ItemRegistry;
use crate::render::SurfaceStyle;
use crate::surface::Surface;

/// The state delayed tasks mutate: items plus the surface they draw on.
pub struct Stage<M, S> {
    /// Live items.
    pub registry: ItemRegistry<M>,
    /// Host surface.
    pub surface: S,
}

impl<M, S> Stage<M, S>
where
    M: Clone + Eq + Hash + fmt::Debug,
    S: Surface,
{
    /// Evicts an item and detaches its element.
    pub fn evict(&mut self, id: ItemId) -> Option<M> {
        self.registry.evict(id, &mut self.surface)
    }

    /// Repaints every live item from the game's state, then presents.
    pub fn render_pass<G>(&mut self, game: &G, now: Duration)
    where
        G: GameLogic<M> + ?Sized,
    {
        let surface = &mut self.surface;
        self.registry.for_each_live_mut(|_, message, item| {
            item.render(&game.info(message), &mut *surface);
        });
        self.surface.present(now);
    }
}

/// Pointer activation of a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Activation {
    /// Never activated; no listeners installed yet.
    #[default]
    Never,
    /// Pointer samples are processed.
    Active,
    /// Pointer samples are ignored; listeners stay installed.
    Inactive,
}

/// A tile board bound to one host surface.
pub struct SectionRenderer<M, S> {
    config: BoardConfig,
    geometry: GridGeometry,
    stage: Stage<M, S>,
    scheduler: FrameScheduler<Stage<M, S>>,
    gesture: DragGesture,
    activation: Activation,
}

impl<M, S> SectionRenderer<M, S>
where
    M: Clone + Eq + Hash + fmt::Debug + 'static,
    S: Surface + 'static,
{
    /// Creates a section, styles the surface and arms the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`](crate::BoardError::InvalidConfig)
    /// when the grid is unusable.
    pub fn new(config: BoardConfig, mut surface: S, factory: ItemFactory) -> BoardResult<Self> {
        let geometry = GridGeometry::from_config(&config)?;

        surface.configure(&SurfaceStyle {
            width: geometry.width,
            height: geometry.height,
            background: config.background.clone(),
            tile_width: geometry.cell_width,
            tile_height: geometry.cell_height,
            selectable: false,
        });

        let spec = ItemSpec {
            cell_width: geometry.cell_width,
            cell_height: geometry.cell_height,
            image: config.item_image.clone(),
        };

        tracing::debug!(
            columns = geometry.columns,
            rows = geometry.rows,
            cell_width = geometry.cell_width,
            cell_height = geometry.cell_height,
            "section created"
        );

        surface.request_frame();

        Ok(Self {
            config,
            geometry,
            stage: Stage {
                registry: ItemRegistry::new(factory, spec),
                surface,
            },
            scheduler: FrameScheduler::new(),
            gesture: DragGesture::new(),
            activation: Activation::Never,
        })
    }

    /// Starts processing pointer samples.
    ///
    /// Listeners are installed on the first activation only.
    pub fn activate(&mut self) {
        if self.activation == Activation::Never {
            self.stage.surface.install_pointer_listeners();
            tracing::debug!("pointer listeners installed");
        }
        self.activation = Activation::Active;
    }

    /// Stops processing pointer samples. A drag in progress is kept.
    pub fn deactivate(&mut self) {
        if self.activation == Activation::Active {
            self.activation = Activation::Inactive;
        }
    }

    /// Returns true while pointer samples are processed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.activation == Activation::Active
    }

    /// Returns the activation state.
    #[must_use]
    pub const fn activation(&self) -> Activation {
        self.activation
    }

    /// Adds an item for `message`.
    ///
    /// # Errors
    ///
    /// [`BoardError::DuplicateMessage`](crate::BoardError::DuplicateMessage)
    /// if the message already has an item.
    pub fn add(&mut self, message: M) -> BoardResult<ItemId> {
        let Stage { registry, surface } = &mut self.stage;
        registry.add(message, surface)
    }

    /// Removes `message`'s item once its scale-out finishes.
    ///
    /// The returned completion resolves after the item is evicted.
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownMessage`](crate::BoardError::UnknownMessage) or
    /// [`BoardError::ItemDeparting`](crate::BoardError::ItemDeparting).
    pub fn remove(&mut self, message: &M) -> BoardResult<Completion> {
        let Stage { registry, surface } = &mut self.stage;
        let (id, duration) = registry.begin_remove(message, surface, &self.config.timing)?;

        let completion = Completion::pending();
        let done = completion.clone();
        self.scheduler.delay(duration, move |stage, _| {
            let evicted = stage.evict(id);
            done.resolve();
            match evicted {
                Some(_) => Ok(()),
                None => Err(TaskError::StaleHandle(id)),
            }
        });
        Ok(completion)
    }

    /// Moves `message`'s item to `(col, row)`.
    ///
    /// The item's logical position changes when the returned completion
    /// resolves. If the item is evicted first the move is dropped.
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownMessage`](crate::BoardError::UnknownMessage) or
    /// [`BoardError::ItemDeparting`](crate::BoardError::ItemDeparting).
    pub fn move_to(&mut self, message: &M, col: u32, row: u32) -> BoardResult<Completion> {
        let target = GridPos::new(col, row);
        let Stage { registry, surface } = &mut self.stage;
        let (id, duration) = registry.begin_move(message, target, surface, &self.config.timing)?;

        let completion = Completion::pending();
        let done = completion.clone();
        self.scheduler.delay(duration, move |stage, _| {
            stage.registry.settle(id, target);
            done.resolve();
            Ok(())
        });
        Ok(completion)
    }

    /// Feeds one pointer sample and notifies the game.
    ///
    /// Ignored while the section is not active.
    pub fn pointer<G>(&mut self, event: PointerEvent, game: &mut G) -> Option<SelectEvent>
    where
        G: GameLogic<M> + ?Sized,
    {
        if !self.is_active() {
            tracing::trace!(kind = ?event.kind, "pointer sample ignored; section inactive");
            return None;
        }

        let Stage { registry, surface } = &self.stage;
        let select = self
            .gesture
            .handle(event.kind, || registry.find_at(surface, event.position))?;

        match select {
            SelectEvent::Start(id) => {
                if let Some(message) = registry.message(id) {
                    game.select_start(message);
                }
            }
            SelectEvent::Next(id) => {
                if let Some(message) = registry.message(id) {
                    game.select_next(message);
                }
            }
            SelectEvent::End => game.select_end(),
        }

        tracing::trace!(?select, "selection");
        Some(select)
    }

    /// Runs one frame: due completions, render pass, then re-arm.
    pub fn tick<G>(&mut self, now: Duration, game: &G) -> TickReport
    where
        G: GameLogic<M> + ?Sized,
    {
        let report = self
            .scheduler
            .tick(now, &mut self.stage, |stage, clock| stage.render_pass(game, clock));
        self.stage.surface.request_frame();
        report
    }

    /// Returns the configuration the section was built from.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the grid geometry.
    #[must_use]
    pub const fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Returns the item registry.
    #[must_use]
    pub fn registry(&self) -> &ItemRegistry<M> {
        &self.stage.registry
    }

    /// Returns the frame scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler<Stage<M, S>> {
        &self.scheduler
    }

    /// Returns the host surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.stage.surface
    }

    /// Returns the host surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.stage.surface
    }

    /// Returns the drag gesture.
    #[must_use]
    pub const fn gesture(&self) -> &DragGesture {
        &self.gesture
    }
}

impl<M: fmt::Debug, S> fmt::Debug for SectionRenderer<M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionRenderer")
            .field("geometry", &self.geometry)
            .field("activation", &self.activation)
            .field("gesture", &self.gesture)
            .field("registry", &self.stage.registry)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
