//! Sprite-sheet tile.

use std::time::Duration;

use crate::animation::Easing;
use crate::config::AnimationTiming;
use crate::item::{ItemFactory, ItemInfo, ItemSpec, VisualItem};
use crate::layout::{GridPos, Point};
use crate::render::{ElementStyle, RenderCommand, TransitionProperty};
use crate::surface::{ElementId, Surface};

/// A tile cut from a sprite sheet.
///
/// Columns of the sheet are item kinds; the second row is the selected
/// frame.
#[derive(Debug, Clone)]
pub struct TileItem {
    element: ElementId,
    width: f32,
    height: f32,
    geometry: Option<GridPos>,
    painted: Option<Point>,
}

impl TileItem {
    /// Creates the tile's element on `surface`. The element is not attached.
    pub fn new(surface: &mut dyn Surface, spec: &ItemSpec) -> Self {
        let element = surface.create_element(&ElementStyle {
            width: spec.cell_width,
            height: spec.cell_height,
            image: spec.image.clone(),
        });
        Self {
            element,
            width: spec.cell_width,
            height: spec.cell_height,
            geometry: None,
            painted: None,
        }
    }

    /// Returns the top-left corner of the last paint.
    #[must_use]
    pub const fn painted(&self) -> Option<Point> {
        self.painted
    }
}

impl VisualItem for TileItem {
    fn element(&self) -> ElementId {
        self.element
    }

    fn geometry(&self) -> Option<GridPos> {
        self.geometry
    }

    fn begin_remove(&mut self, surface: &mut dyn Surface, timing: &AnimationTiming) -> Duration {
        let duration = timing.remove_duration();
        surface.apply(
            self.element,
            RenderCommand::Transition {
                property: TransitionProperty::Transform,
                easing: Easing::EaseIn,
                duration,
            },
        );
        surface.apply(self.element, RenderCommand::Scale { x: 0.0, y: 0.0 });
        duration
    }

    fn begin_move(
        &mut self,
        target: GridPos,
        surface: &mut dyn Surface,
        timing: &AnimationTiming,
    ) -> Duration {
        let duration = self.painted.map_or(Duration::ZERO, |painted| {
            let target_top = self.height * target.row as f32;
            timing.move_duration((target_top - painted.y) / self.height)
        });
        surface.apply(
            self.element,
            RenderCommand::Transition {
                property: TransitionProperty::Top,
                easing: Easing::EaseIn,
                duration,
            },
        );
        duration
    }

    fn settle(&mut self, position: GridPos) {
        self.geometry = Some(position);
    }

    fn render(&mut self, info: &ItemInfo, surface: &mut dyn Surface) {
        let origin = Point::new(
            self.width * info.position.col as f32,
            self.height * info.position.row as f32,
        );
        surface.apply(
            self.element,
            RenderCommand::Place {
                x: origin.x,
                y: origin.y,
            },
        );
        surface.apply(
            self.element,
            RenderCommand::SpriteOffset {
                x: -(self.width * info.kind as f32),
                y: if info.selected { -self.height } else { 0.0 },
            },
        );
        self.painted = Some(origin);
    }
}

/// Factory producing [`TileItem`]s.
#[must_use]
pub fn tile_factory() -> ItemFactory {
    Box::new(
        |surface: &mut dyn Surface, spec: &ItemSpec| -> Box<dyn VisualItem> {
            Box::new(TileItem::new(surface, spec))
        },
    )
}
