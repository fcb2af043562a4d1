//! Host surface abstraction.
//!
//! A [`Surface`] is everything the board needs from its host: element
//! creation and painting, a point-to-element query, pointer listener
//! installation and frame re-arming. Browser, GPU and terminal hosts
//! implement it; [`HeadlessSurface`] is the in-memory reference host.

use std::collections::HashMap;
use std::time::Duration;

use crate::animation::{Animation, Easing};
use crate::layout::{Point, Rect};
use crate::render::{ElementStyle, RenderCommand, SurfaceStyle, TransitionProperty};

/// Opaque identity of a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Host platform primitives consumed by the board.
pub trait Surface {
    /// Applies size, background and selection behavior to the surface.
    fn configure(&mut self, style: &SurfaceStyle);

    /// Creates a detached element.
    fn create_element(&mut self, style: &ElementStyle) -> ElementId;

    /// Attaches an element on top of the existing ones.
    fn append(&mut self, element: ElementId);

    /// Detaches an element and releases it. Unknown elements are ignored.
    fn detach(&mut self, element: ElementId);

    /// Applies one render command to an element.
    fn apply(&mut self, element: ElementId, command: RenderCommand);

    /// Returns the top-most attached element under `point`.
    fn element_at(&self, point: Point) -> Option<ElementId>;

    /// Installs down/move/up/leave pointer listeners.
    fn install_pointer_listeners(&mut self);

    /// Asks the host for another refresh callback.
    fn request_frame(&mut self);

    /// Surface-level render hook, run once per frame after all items.
    fn present(&mut self, now: Duration) {
        let _ = now;
    }
}

/// Transition settings for one property.
#[derive(Debug, Clone, Copy)]
struct Transition {
    easing: Easing,
    duration: Duration,
}

/// In-memory state of one element.
#[derive(Debug, Clone)]
struct Element {
    style: ElementStyle,
    left: f32,
    top: Animation,
    scale: Animation,
    sprite: Point,
    placed: bool,
    top_transition: Option<Transition>,
    transform_transition: Option<Transition>,
}

impl Element {
    fn new(style: ElementStyle) -> Self {
        Self {
            style,
            left: 0.0,
            top: Animation::new(0.0, Easing::Instant),
            scale: Animation::new(1.0, Easing::Instant),
            sprite: Point::ZERO,
            placed: false,
            top_transition: None,
            transform_transition: None,
        }
    }

    fn bounds(&self) -> Rect {
        let scale = self.scale.value();
        Rect::new(self.left, self.top.value(), self.style.width, self.style.height)
            .scaled(scale, scale)
    }

    fn apply(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::Place { x, y } => {
                self.left = x;
                match self.top_transition {
                    Some(transition) if self.placed => {
                        retarget(&mut self.top, transition, y);
                    }
                    _ => self.top.set_immediate(y),
                }
                self.placed = true;
            }
            RenderCommand::SpriteOffset { x, y } => self.sprite = Point::new(x, y),
            RenderCommand::Transition {
                property,
                easing,
                duration,
            } => {
                let transition = Some(Transition { easing, duration });
                match property {
                    TransitionProperty::Top => self.top_transition = transition,
                    TransitionProperty::Transform => self.transform_transition = transition,
                }
            }
            RenderCommand::Scale { x, .. } => match self.transform_transition {
                Some(transition) => retarget(&mut self.scale, transition, x),
                None => self.scale.set_immediate(x),
            },
        }
    }
}

fn retarget(animation: &mut Animation, transition: Transition, target: f32) {
    animation.set_easing(transition.easing);
    animation.set_duration(transition.duration);
    animation.set_target(target);
}

/// Snapshot of one element, for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSnapshot {
    /// Current on-screen bounds, including running transitions and scale.
    pub bounds: Rect,
    /// Current sprite offset.
    pub sprite: Point,
    /// Current uniform scale.
    pub scale: f32,
    /// Image shown by the element.
    pub image: String,
    /// Whether the element is attached to the surface.
    pub attached: bool,
}

/// In-memory host surface.
///
/// Elements are stacked in append order. Transitions are interpolated in
/// [`present`](Surface::present), so hit-testing sees tiles where they are
/// drawn mid-animation, like a real host does.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    style: Option<SurfaceStyle>,
    elements: HashMap<ElementId, Element>,
    attached: Vec<ElementId>,
    next_element: u64,
    created: usize,
    listener_installs: u32,
    frame_requests: u64,
    presented: u64,
    last_present: Option<Duration>,
}

impl HeadlessSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the style applied by [`Surface::configure`].
    #[must_use]
    pub fn style(&self) -> Option<&SurfaceStyle> {
        self.style.as_ref()
    }

    /// Returns attached elements, bottom-most first.
    #[must_use]
    pub fn attached(&self) -> &[ElementId] {
        &self.attached
    }

    /// Returns how many elements were ever created.
    #[must_use]
    pub const fn created_count(&self) -> usize {
        self.created
    }

    /// Returns how many elements are held in memory.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns how many times pointer listeners were installed.
    #[must_use]
    pub const fn listener_installs(&self) -> u32 {
        self.listener_installs
    }

    /// Returns how many refresh callbacks were requested.
    #[must_use]
    pub const fn frame_requests(&self) -> u64 {
        self.frame_requests
    }

    /// Returns how many frames were presented.
    #[must_use]
    pub const fn presented(&self) -> u64 {
        self.presented
    }

    /// Returns the current state of an element.
    #[must_use]
    pub fn snapshot(&self, element: ElementId) -> Option<ElementSnapshot> {
        self.elements.get(&element).map(|state| ElementSnapshot {
            bounds: state.bounds(),
            sprite: state.sprite,
            scale: state.scale.value(),
            image: state.style.image.clone(),
            attached: self.attached.contains(&element),
        })
    }
}

impl Surface for HeadlessSurface {
    fn configure(&mut self, style: &SurfaceStyle) {
        tracing::debug!(
            width = style.width,
            height = style.height,
            background = %style.background,
            "surface configured"
        );
        self.style = Some(style.clone());
    }

    fn create_element(&mut self, style: &ElementStyle) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element += 1;
        self.created += 1;
        self.elements.insert(id, Element::new(style.clone()));
        id
    }

    fn append(&mut self, element: ElementId) {
        if self.elements.contains_key(&element) && !self.attached.contains(&element) {
            self.attached.push(element);
        }
    }

    fn detach(&mut self, element: ElementId) {
        self.attached.retain(|&e| e != element);
        self.elements.remove(&element);
    }

    fn apply(&mut self, element: ElementId, command: RenderCommand) {
        if let Some(state) = self.elements.get_mut(&element) {
            state.apply(command);
        }
    }

    fn element_at(&self, point: Point) -> Option<ElementId> {
        self.attached.iter().rev().copied().find(|id| {
            self.elements
                .get(id)
                .is_some_and(|state| state.bounds().contains(point))
        })
    }

    fn install_pointer_listeners(&mut self) {
        self.listener_installs += 1;
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn present(&mut self, now: Duration) {
        let dt = self
            .last_present
            .map_or(0.0, |last| now.saturating_sub(last).as_secs_f32());
        self.last_present = Some(now);
        self.presented += 1;

        for id in &self.attached {
            if let Some(state) = self.elements.get_mut(id) {
                state.top.update(dt);
                state.scale.update(dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> ElementStyle {
        ElementStyle {
            width: 50.0,
            height: 50.0,
            image: "block.png".into(),
        }
    }

    #[test]
    fn test_element_at_prefers_top_most() {
        let mut surface = HeadlessSurface::new();
        let a = surface.create_element(&style());
        let b = surface.create_element(&style());
        surface.append(a);
        surface.append(b);
        surface.apply(a, RenderCommand::Place { x: 0.0, y: 0.0 });
        surface.apply(b, RenderCommand::Place { x: 25.0, y: 0.0 });

        assert_eq!(surface.element_at(Point::new(10.0, 10.0)), Some(a));
        assert_eq!(surface.element_at(Point::new(30.0, 10.0)), Some(b));
        assert_eq!(surface.element_at(Point::new(200.0, 10.0)), None);
    }

    #[test]
    fn test_detached_elements_are_not_hit() {
        let mut surface = HeadlessSurface::new();
        let a = surface.create_element(&style());
        surface.append(a);
        surface.apply(a, RenderCommand::Place { x: 0.0, y: 0.0 });
        surface.detach(a);

        assert_eq!(surface.element_at(Point::new(10.0, 10.0)), None);
        assert!(surface.snapshot(a).is_none());
    }

    #[test]
    fn test_detach_releases_element_state() {
        let mut surface = HeadlessSurface::new();
        for _ in 0..100 {
            let a = surface.create_element(&style());
            surface.append(a);
            surface.detach(a);
        }

        assert_eq!(surface.created_count(), 100);
        assert_eq!(surface.element_count(), 0);
        assert!(surface.attached().is_empty());
    }

    #[test]
    fn test_top_transition_interpolates_on_present() {
        let mut surface = HeadlessSurface::new();
        let a = surface.create_element(&style());
        surface.append(a);
        surface.apply(a, RenderCommand::Place { x: 0.0, y: 0.0 });
        surface.present(Duration::ZERO);

        surface.apply(
            a,
            RenderCommand::Transition {
                property: TransitionProperty::Top,
                easing: Easing::Linear,
                duration: Duration::from_millis(100),
            },
        );
        surface.apply(a, RenderCommand::Place { x: 0.0, y: 100.0 });
        surface.present(Duration::from_millis(50));

        let midway = surface.snapshot(a).unwrap().bounds;
        assert!((midway.y - 50.0).abs() < 0.01);

        surface.present(Duration::from_millis(100));
        assert!((surface.snapshot(a).unwrap().bounds.y - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_scale_out_shrinks_hit_area() {
        let mut surface = HeadlessSurface::new();
        let a = surface.create_element(&style());
        surface.append(a);
        surface.apply(a, RenderCommand::Place { x: 0.0, y: 0.0 });
        surface.apply(
            a,
            RenderCommand::Transition {
                property: TransitionProperty::Transform,
                easing: Easing::Linear,
                duration: Duration::from_millis(100),
            },
        );
        surface.apply(a, RenderCommand::Scale { x: 0.0, y: 0.0 });
        surface.present(Duration::ZERO);
        assert_eq!(surface.element_at(Point::new(2.0, 2.0)), Some(a));

        surface.present(Duration::from_millis(60));
        assert_eq!(surface.element_at(Point::new(2.0, 2.0)), None);
        assert_eq!(surface.element_at(Point::new(25.0, 25.0)), Some(a));
    }
}
