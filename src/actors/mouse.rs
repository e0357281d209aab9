//! The user's pointer: picks goo up through the world's mouse constraint

use glam::Vec2;
use rand::Rng;

use crate::engine::{Actor, ActorId, RenderContext, UpdateContext};
use crate::renderer::{DrawableId, Fill, Graphics, Layer, SceneTransform, Transform2D, colors};

#[derive(Debug, Clone, Copy)]
pub struct CursorOptions {
    /// Diameter in world units
    pub size: f32,
    pub color: u32,
}

impl CursorOptions {
    pub fn base() -> Self {
        Self {
            size: 3.0,
            color: colors::CURSOR,
        }
    }

    pub fn selection() -> Self {
        Self {
            size: 3.0,
            color: colors::CURSOR_SELECTION,
        }
    }
}

#[derive(Debug)]
pub struct UserMouse {
    id: ActorId,
    offset: Vec2,
    scale: Vec2,
    base_cursor: CursorOptions,
    selection_cursor: CursorOptions,
    position: Vec2,
    is_pressed: bool,
    has_selection: bool,
    graphics: Option<(DrawableId, DrawableId)>,
}

impl UserMouse {
    /// Mouse mapped through the renderer's scene transform
    pub fn new<R: Rng>(
        rng: &mut R,
        transform: &SceneTransform,
        base_cursor: CursorOptions,
        selection_cursor: CursorOptions,
        now: f32,
    ) -> Self {
        Self {
            id: ActorId::new(rng, now),
            offset: -transform.position / transform.scale,
            scale: Vec2::ONE / transform.scale,
            base_cursor,
            selection_cursor,
            position: Vec2::ZERO,
            is_pressed: false,
            has_selection: false,
            graphics: None,
        }
    }

    /// Screen pixels to world units
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        screen * self.scale + self.offset
    }

    /// World position from the last update
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    pub fn has_selection(&self) -> bool {
        self.has_selection
    }
}

impl Actor for UserMouse {
    fn id(&self) -> &ActorId {
        &self.id
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        self.position = self.to_world(ctx.pointer.position);
        self.is_pressed = ctx.pointer.pressed;
        ctx.world.mouse.position = self.position;
        ctx.world.mouse.pressed = self.is_pressed;

        let Some(selection) = ctx.world.mouse.body else {
            self.has_selection = false;
            return;
        };
        // Neutralize torque and center the grab on pickup
        if !self.has_selection {
            if let Some(body) = ctx.world.body_mut(selection) {
                body.torque = 0.0;
                body.set_angular_velocity(0.0);
            }
            ctx.world.mouse.point_b = Vec2::ZERO;
            log::debug!("mouse picked up body {selection}");
        }
        self.has_selection = true;
    }

    fn render(&mut self, layer: &mut Layer, _ctx: &RenderContext<'_>) {
        let (base, selection) = match self.graphics {
            Some(ids) => ids,
            None => {
                let base = self.base_cursor;
                let selection = self.selection_cursor;
                let ids = (
                    layer.add(Graphics::circle(base.size * 0.5, Fill::solid(base.color))),
                    layer.add(Graphics::circle(
                        selection.size * 0.5,
                        Fill::solid(selection.color),
                    )),
                );
                self.graphics = Some(ids);
                ids
            }
        };

        for (id, visible) in [(base, !self.has_selection), (selection, self.has_selection)] {
            if let Some(graphics) = layer.graphics_mut(id) {
                graphics.transform = Transform2D::at(self.position);
                graphics.visible = visible;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PointerState;
    use crate::renderer::Drawable;
    use crate::sim::{BodyOptions, CollisionFilter, World, categories};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn mouse() -> UserMouse {
        let transform = SceneTransform {
            position: Vec2::new(400.0, 300.0),
            scale: Vec2::splat(4.0),
        };
        UserMouse::new(
            &mut Pcg32::seed_from_u64(4),
            &transform,
            CursorOptions::base(),
            CursorOptions::selection(),
            0.0,
        )
    }

    fn update(mouse: &mut UserMouse, world: &mut World, pointer: PointerState) {
        let mut ctx = UpdateContext {
            world,
            pointer: &pointer,
            dt: 1.0 / 30.0,
            time: 0.0,
        };
        mouse.update(&mut ctx);
    }

    #[test]
    fn test_screen_to_world() {
        let mouse = mouse();
        assert_eq!(mouse.to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(mouse.to_world(Vec2::new(440.0, 280.0)), Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_pick_neutralizes_and_centers() {
        let mut world = World::new(Vec2::ZERO);
        let goo = world.add_body(BodyOptions {
            position: Vec2::new(10.0, 0.0),
            filter: CollisionFilter::new(
                categories::DYNAMIC,
                categories::PHYSICS | categories::MOUSE,
            ),
            ..Default::default()
        });
        let mut mouse = mouse();
        let mut pointer = PointerState::default();
        pointer.down(Vec2::new(440.0, 302.0));

        update(&mut mouse, &mut world, pointer);
        assert!(world.mouse.pressed);
        assert!(!mouse.has_selection());

        world.step(1000.0 / 30.0, 1.0);
        assert_eq!(world.mouse.body, Some(goo));
        world.body_mut(goo).unwrap().torque = 1.0;
        update(&mut mouse, &mut world, pointer);
        assert!(mouse.has_selection());
        assert_eq!(world.mouse.point_b, Vec2::ZERO);
        assert_eq!(world.body(goo).unwrap().torque, 0.0);

        pointer.up();
        update(&mut mouse, &mut world, pointer);
        world.step(1000.0 / 30.0, 1.0);
        update(&mut mouse, &mut world, pointer);
        assert!(!mouse.has_selection());
    }

    #[test]
    fn test_cursor_visibility() {
        let world = World::new(Vec2::ZERO);
        let mut mouse = mouse();
        let mut layer = Layer::new();
        mouse.has_selection = true;
        mouse.render(&mut layer, &RenderContext { world: &world, time: 0.0 });
        let visible: Vec<bool> = layer
            .iter()
            .map(|d| match d {
                Drawable::Graphics(g) => g.visible,
                Drawable::Sprite(s) => s.visible,
            })
            .collect();
        assert_eq!(visible, vec![false, true]);
    }
}
