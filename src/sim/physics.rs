//! Minimal physics world
//!
//! Circles and sensor sectors integrated with position Verlet, Matter-style:
//! - Time is in milliseconds, velocities are displacement per step
//! - Forces are accumulated per step and cleared after integration
//! - A time correction factor keeps velocities stable when the step changes
//!
//! Anything that needs more than circles belongs in a real physics engine.

use std::collections::BTreeSet;
use std::fmt;

use glam::Vec2;

use super::collision::{CollisionFilter, CollisionResult, Shape, categories, shapes_collide};
use crate::consts::{DEFAULT_FRICTION, DEFAULT_FRICTION_AIR, GRAVITY_SCALE, INERTIA_SCALE};

/// Body handle, allocated in increasing order
pub type BodyId = u32;

/// A force applied by one body to another each step
///
/// `source` owns the law, `target` is every other body in the world. Return
/// `None` to skip the pair. The returned force is applied to the target
/// only; the source feels no reaction.
pub trait ForceLaw: fmt::Debug {
    fn force(&self, source: &Body, target: &Body) -> Option<Vec2>;
}

/// Options for creating a body
#[derive(Debug, Clone)]
pub struct BodyOptions {
    pub label: &'static str,
    pub position: Vec2,
    /// Radians
    pub angle: f32,
    pub shape: Shape,
    pub density: f32,
    /// Contact friction (0 = ice, 1 = no slip)
    pub friction: f32,
    pub friction_air: f32,
    pub restitution: f32,
    pub is_static: bool,
    /// Sensors report collisions but are never pushed apart
    pub is_sensor: bool,
    pub filter: CollisionFilter,
}

impl Default for BodyOptions {
    fn default() -> Self {
        Self {
            label: "body",
            position: Vec2::ZERO,
            angle: 0.0,
            shape: Shape::Circle { radius: 1.0 },
            density: 0.001,
            friction: DEFAULT_FRICTION,
            friction_air: DEFAULT_FRICTION_AIR,
            restitution: 0.0,
            is_static: false,
            is_sensor: false,
            filter: CollisionFilter::default(),
        }
    }
}

/// A rigid body
#[derive(Debug)]
pub struct Body {
    pub id: BodyId,
    pub label: &'static str,
    pub shape: Shape,
    pub position: Vec2,
    pub position_prev: Vec2,
    pub angle: f32,
    pub angle_prev: f32,
    pub force: Vec2,
    pub torque: f32,
    pub mass: f32,
    pub inverse_mass: f32,
    pub inertia: f32,
    pub inverse_inertia: f32,
    pub friction: f32,
    pub friction_air: f32,
    pub restitution: f32,
    pub is_static: bool,
    pub is_sensor: bool,
    pub filter: CollisionFilter,
    pub attractors: Vec<Box<dyn ForceLaw>>,
}

impl Body {
    fn new(id: BodyId, options: BodyOptions) -> Self {
        let radius = options.shape.radius();
        let (mass, inverse_mass, inertia, inverse_inertia) = if options.is_static {
            (f32::INFINITY, 0.0, f32::INFINITY, 0.0)
        } else {
            let mass = options.shape.area() * options.density;
            let inertia = INERTIA_SCALE * mass * radius * radius * 0.5;
            (mass, 1.0 / mass, inertia, 1.0 / inertia)
        };

        Self {
            id,
            label: options.label,
            shape: options.shape,
            position: options.position,
            position_prev: options.position,
            angle: options.angle,
            angle_prev: options.angle,
            force: Vec2::ZERO,
            torque: 0.0,
            mass,
            inverse_mass,
            inertia,
            inverse_inertia,
            friction: options.friction.clamp(0.0, 1.0),
            friction_air: options.friction_air,
            restitution: options.restitution,
            is_static: options.is_static,
            is_sensor: options.is_sensor,
            filter: options.filter,
            attractors: Vec::new(),
        }
    }

    /// Displacement over the last step
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.position - self.position_prev
    }

    /// Rotation over the last step (radians)
    #[inline]
    pub fn angular_velocity(&self) -> f32 {
        self.angle - self.angle_prev
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.position_prev = self.position - velocity;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angle_prev = self.angle - angular_velocity;
    }

    /// Move without changing velocity
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        self.position_prev += delta;
    }

    /// Check if a world-space point is inside the body
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.shape.contains(point - self.position)
    }

    /// Narrow-phase test against another body, normal points toward `other`
    pub fn test(&self, other: &Body) -> CollisionResult {
        shapes_collide(self.position, &self.shape, other.position, &other.shape)
    }

    /// Whether the two bodies may collide and currently overlap
    pub fn collides(&self, other: &Body) -> bool {
        self.filter.can_collide(&other.filter) && self.test(other).hit
    }

    fn integrate(&mut self, delta_ms: f32, correction: f32) {
        let dt2 = delta_ms * delta_ms;
        let friction_air = 1.0 - self.friction_air;

        let velocity =
            self.velocity() * friction_air * correction + self.force * self.inverse_mass * dt2;
        self.position_prev = self.position;
        self.position += velocity;

        let angular_velocity = self.angular_velocity() * friction_air * correction
            + self.torque * self.inverse_inertia * dt2;
        self.angle_prev = self.angle;
        self.angle += angular_velocity;
    }
}

/// Start or end of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPhase {
    Start,
    End,
}

/// A pair of bodies that started or stopped touching this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub phase: CollisionPhase,
    pub a: BodyId,
    pub b: BodyId,
}

impl CollisionEvent {
    /// The other body of the pair, if `id` is part of it
    pub fn other(&self, id: BodyId) -> Option<BodyId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Drags a body toward the pointer
#[derive(Debug, Clone)]
pub struct MouseConstraint {
    /// Pointer position in world space
    pub position: Vec2,
    pub pressed: bool,
    /// Held body
    pub body: Option<BodyId>,
    /// Grab point in the held body's own frame
    pub point_b: Vec2,
    pub stiffness: f32,
    pub filter: CollisionFilter,
}

impl Default for MouseConstraint {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            pressed: false,
            body: None,
            point_b: Vec2::ZERO,
            stiffness: 1.0,
            filter: CollisionFilter::new(categories::MOUSE, categories::ANY),
        }
    }
}

/// All bodies and their contacts
#[derive(Debug)]
pub struct World {
    pub gravity: Vec2,
    pub gravity_scale: f32,
    pub mouse: MouseConstraint,
    bodies: Vec<Body>,
    next_id: BodyId,
    active_pairs: BTreeSet<(BodyId, BodyId)>,
    events: Vec<CollisionEvent>,
}

impl World {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            gravity_scale: GRAVITY_SCALE,
            mouse: MouseConstraint::default(),
            bodies: Vec::new(),
            next_id: 1,
            active_pairs: BTreeSet::new(),
            events: Vec::new(),
        }
    }

    pub fn add_body(&mut self, options: BodyOptions) -> BodyId {
        let id = self.next_id;
        self.next_id += 1;
        self.bodies.push(Body::new(id, options));
        id
    }

    pub fn remove_body(&mut self, id: BodyId) {
        self.bodies.retain(|b| b.id != id);
        self.active_pairs.retain(|(a, b)| *a != id && *b != id);
        if self.mouse.body == Some(id) {
            self.mouse.body = None;
        }
    }

    /// Attach a force law to a body
    pub fn add_attractor(&mut self, id: BodyId, law: Box<dyn ForceLaw>) {
        if let Some(body) = self.body_mut(id) {
            body.attractors.push(law);
        }
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Contacts that started or ended during the last step
    pub fn collision_events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Whether a pair is currently touching
    pub fn is_touching(&self, a: BodyId, b: BodyId) -> bool {
        self.active_pairs.contains(&(a.min(b), a.max(b)))
    }

    /// First movable body under a point that the mouse may grab
    pub fn body_at(&self, point: Vec2) -> Option<BodyId> {
        self.bodies
            .iter()
            .find(|b| {
                !b.is_static
                    && !b.is_sensor
                    && b.filter.can_collide(&self.mouse.filter)
                    && b.contains_point(point)
            })
            .map(|b| b.id)
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.active_pairs.clear();
        self.events.clear();
        self.mouse.body = None;
    }

    /// Advance the world by `delta_ms`
    pub fn step(&mut self, delta_ms: f32, correction: f32) {
        self.events.clear();

        self.apply_gravity();
        self.apply_attractors();
        self.update_mouse_selection();

        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.integrate(delta_ms, correction);
        }

        self.solve_mouse();
        self.detect_and_resolve();

        for body in &mut self.bodies {
            body.force = Vec2::ZERO;
            body.torque = 0.0;
        }
    }

    fn apply_gravity(&mut self) {
        let gravity = self.gravity * self.gravity_scale;
        if gravity == Vec2::ZERO {
            return;
        }
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.force += gravity * body.mass;
        }
    }

    fn apply_attractors(&mut self) {
        let mut pending = Vec::new();
        for (ia, source) in self.bodies.iter().enumerate() {
            for law in &source.attractors {
                for (ib, target) in self.bodies.iter().enumerate() {
                    if ia == ib {
                        continue;
                    }
                    if let Some(force) = law.force(source, target) {
                        pending.push((ib, force));
                    }
                }
            }
        }
        for (index, force) in pending {
            self.bodies[index].force += force;
        }
    }

    fn update_mouse_selection(&mut self) {
        if !self.mouse.pressed {
            self.mouse.body = None;
            return;
        }
        if self.mouse.body.is_some() {
            return;
        }
        let Some(id) = self.body_at(self.mouse.position) else {
            return;
        };
        let Some((position, angle, label)) = self.body(id).map(|b| (b.position, b.angle, b.label))
        else {
            return;
        };
        // Store the grab point in the body's own frame
        let offset = self.mouse.position - position;
        self.mouse.point_b = Vec2::from_angle(-angle).rotate(offset);
        self.mouse.body = Some(id);
        log::debug!("mouse picked body {id} ({label})");
    }

    fn solve_mouse(&mut self) {
        let Some(id) = self.mouse.body else {
            return;
        };
        let target = self.mouse.position;
        let stiffness = self.mouse.stiffness;
        let point_b = self.mouse.point_b;
        if let Some(body) = self.body_mut(id) {
            let anchor = body.position + Vec2::from_angle(body.angle).rotate(point_b);
            body.position += (target - anchor) * stiffness;
        }
    }

    fn detect_and_resolve(&mut self) {
        let mut current = BTreeSet::new();
        let count = self.bodies.len();

        for i in 0..count {
            for j in (i + 1)..count {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.is_static && b.is_static {
                    continue;
                }
                if !a.filter.can_collide(&b.filter) {
                    continue;
                }
                let result = a.test(b);
                if !result.hit {
                    continue;
                }
                current.insert((a.id.min(b.id), a.id.max(b.id)));

                if !a.is_sensor && !b.is_sensor {
                    let (left, right) = self.bodies.split_at_mut(j);
                    resolve_contact(&mut left[i], &mut right[0], &result);
                }
            }
        }

        for &(a, b) in current.difference(&self.active_pairs) {
            self.events.push(CollisionEvent {
                phase: CollisionPhase::Start,
                a,
                b,
            });
        }
        for &(a, b) in self.active_pairs.difference(&current) {
            self.events.push(CollisionEvent {
                phase: CollisionPhase::End,
                a,
                b,
            });
        }
        self.active_pairs = current;
    }
}

/// Push two touching bodies apart and exchange impulses
fn resolve_contact(a: &mut Body, b: &mut Body, contact: &CollisionResult) {
    let total_inverse_mass = a.inverse_mass + b.inverse_mass;
    if total_inverse_mass == 0.0 {
        return;
    }
    let normal = contact.normal;

    // Positional correction, without injecting velocity
    let correction = normal * (contact.penetration / total_inverse_mass);
    a.translate(-correction * a.inverse_mass);
    b.translate(correction * b.inverse_mass);

    let mut va = a.velocity();
    let mut vb = b.velocity();
    let mut wa = a.angular_velocity();
    let mut wb = b.angular_velocity();

    // Restitution along the normal
    let closing = (vb - va).dot(normal);
    if closing < 0.0 {
        let restitution = a.restitution.max(b.restitution);
        let j = -(1.0 + restitution) * closing / total_inverse_mass;
        va -= normal * j * a.inverse_mass;
        vb += normal * j * b.inverse_mass;
    }

    // Friction at the contact point, coupled to spin so torque can roll a body
    let tangent = normal.perp();
    let arm_a = normal * a.shape.radius();
    let arm_b = -normal * b.shape.radius();
    let surface_a = va + arm_a.perp() * wa;
    let surface_b = vb + arm_b.perp() * wb;
    let slip = (surface_b - surface_a).dot(tangent);
    let ra_t = arm_a.perp_dot(tangent);
    let rb_t = arm_b.perp_dot(tangent);
    let k = total_inverse_mass
        + ra_t * ra_t * a.inverse_inertia
        + rb_t * rb_t * b.inverse_inertia;
    if k > 0.0 {
        let friction = a.friction.min(b.friction);
        let jt = -slip / k * friction;
        let impulse = tangent * jt;
        va -= impulse * a.inverse_mass;
        vb += impulse * b.inverse_mass;
        wa -= arm_a.perp_dot(impulse) * a.inverse_inertia;
        wb += arm_b.perp_dot(impulse) * b.inverse_inertia;
    }

    if !a.is_static {
        a.set_velocity(va);
        a.set_angular_velocity(wa);
    }
    if !b.is_static {
        b.set_velocity(vb);
        b.set_angular_velocity(wb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arc::ArcSpan;

    fn ball(world: &mut World, position: Vec2) -> BodyId {
        world.add_body(BodyOptions {
            label: "ball",
            position,
            shape: Shape::Circle { radius: 1.0 },
            density: 1.0,
            ..Default::default()
        })
    }

    #[derive(Debug)]
    struct Pull(f32);

    impl ForceLaw for Pull {
        fn force(&self, source: &Body, target: &Body) -> Option<Vec2> {
            Some((source.position - target.position) * self.0)
        }
    }

    #[test]
    fn test_free_body_keeps_velocity() {
        let mut world = World::new(Vec2::ZERO);
        let id = ball(&mut world, Vec2::ZERO);
        world.body_mut(id).unwrap().friction_air = 0.0;
        world.body_mut(id).unwrap().set_velocity(Vec2::new(1.0, 0.0));
        for _ in 0..10 {
            world.step(1000.0 / 30.0, 1.0);
        }
        let body = world.body(id).unwrap();
        assert!((body.position - Vec2::new(10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut world = World::new(Vec2::new(0.0, 1.0));
        let id = ball(&mut world, Vec2::ZERO);
        world.step(1000.0 / 60.0, 1.0);
        assert!(world.body(id).unwrap().velocity().y > 0.0);
    }

    #[test]
    fn test_attractor_pulls_target() {
        let mut world = World::new(Vec2::ZERO);
        let anchor = world.add_body(BodyOptions {
            is_static: true,
            shape: Shape::Circle { radius: 5.0 },
            ..Default::default()
        });
        world.add_attractor(anchor, Box::new(Pull(1e-6)));
        let id = ball(&mut world, Vec2::new(40.0, 0.0));
        for _ in 0..5 {
            world.step(1000.0 / 60.0, 1.0);
        }
        assert!(world.body(id).unwrap().position.x < 40.0);
        // The static source never moves
        assert_eq!(world.body(anchor).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn test_collision_events_start_and_end() {
        let mut world = World::new(Vec2::ZERO);
        let sensor = world.add_body(BodyOptions {
            label: "sensor",
            shape: Shape::Sector {
                radius: 10.0,
                arc: ArcSpan::full(),
            },
            is_static: true,
            is_sensor: true,
            filter: CollisionFilter::new(categories::RIGID, categories::DYNAMIC),
            ..Default::default()
        });
        let id = world.add_body(BodyOptions {
            position: Vec2::new(-20.0, 0.0),
            filter: CollisionFilter::new(categories::DYNAMIC, categories::PHYSICS),
            friction_air: 0.0,
            ..Default::default()
        });
        world.body_mut(id).unwrap().set_velocity(Vec2::new(2.0, 0.0));

        let mut started = 0;
        let mut ended = 0;
        for _ in 0..30 {
            world.step(1000.0 / 60.0, 1.0);
            for event in world.collision_events() {
                assert_eq!(event.other(sensor), Some(id));
                match event.phase {
                    CollisionPhase::Start => started += 1,
                    CollisionPhase::End => ended += 1,
                }
            }
        }
        assert_eq!(started, 1);
        assert_eq!(ended, 1);
        // Sensors never deflect
        assert!((world.body(id).unwrap().velocity() - Vec2::new(2.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_filtered_pairs_ignored() {
        let mut world = World::new(Vec2::ZERO);
        let a = world.add_body(BodyOptions {
            filter: CollisionFilter::new(categories::RIGID, categories::RIGID),
            ..Default::default()
        });
        let b = world.add_body(BodyOptions {
            filter: CollisionFilter::new(categories::DYNAMIC, categories::DYNAMIC),
            ..Default::default()
        });
        world.step(1000.0 / 60.0, 1.0);
        assert!(world.collision_events().is_empty());
        assert!(!world.is_touching(a, b));
    }

    #[test]
    fn test_solid_contact_separates() {
        let mut world = World::new(Vec2::ZERO);
        let planet = world.add_body(BodyOptions {
            shape: Shape::Circle { radius: 10.0 },
            is_static: true,
            ..Default::default()
        });
        let id = ball(&mut world, Vec2::new(10.5, 0.0));
        world.step(1000.0 / 60.0, 1.0);
        let body = world.body(id).unwrap();
        assert!(body.position.x >= 11.0 - 1e-4);
        assert!(world.is_touching(planet, id));
    }

    #[test]
    fn test_restitution_bounces() {
        let mut world = World::new(Vec2::ZERO);
        world.add_body(BodyOptions {
            shape: Shape::Circle { radius: 10.0 },
            is_static: true,
            ..Default::default()
        });
        let id = world.add_body(BodyOptions {
            position: Vec2::new(12.0, 0.0),
            restitution: 1.0,
            friction_air: 0.0,
            ..Default::default()
        });
        world.body_mut(id).unwrap().set_velocity(Vec2::new(-1.5, 0.0));
        world.step(1000.0 / 60.0, 1.0);
        assert!(world.body(id).unwrap().velocity().x > 0.0);
    }

    #[test]
    fn test_torque_rolls_along_surface() {
        let mut world = World::new(Vec2::ZERO);
        world.add_body(BodyOptions {
            shape: Shape::Circle { radius: 20.0 },
            is_static: true,
            friction: 1.0,
            ..Default::default()
        });
        let id = world.add_body(BodyOptions {
            position: Vec2::new(0.0, -21.0),
            density: 1.0,
            friction: 1.0,
            ..Default::default()
        });
        for _ in 0..30 {
            // Keep it pressed into the planet and spin it
            let body = world.body_mut(id).unwrap();
            body.force += Vec2::new(0.0, 1e-4);
            body.torque = 1e-3;
            world.step(1000.0 / 60.0, 1.0);
        }
        let body = world.body(id).unwrap();
        assert!(body.angular_velocity().abs() > 0.0);
        assert!(body.position.x.abs() > 1e-3);
    }

    #[test]
    fn test_attractor_source_feels_no_reaction() {
        let mut world = World::new(Vec2::ZERO);
        let source = ball(&mut world, Vec2::ZERO);
        world.add_attractor(source, Box::new(Pull(1e-6)));
        let target = ball(&mut world, Vec2::new(40.0, 0.0));
        for _ in 0..5 {
            world.step(1000.0 / 60.0, 1.0);
        }
        assert!(world.body(target).unwrap().position.x < 40.0);
        assert_eq!(world.body(source).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn test_mouse_grab_point_in_body_frame() {
        let mut world = World::new(Vec2::ZERO);
        let id = world.add_body(BodyOptions {
            position: Vec2::new(5.0, 5.0),
            angle: std::f32::consts::FRAC_PI_2,
            filter: CollisionFilter::new(
                categories::DYNAMIC,
                categories::PHYSICS | categories::MOUSE,
            ),
            ..Default::default()
        });
        world.mouse.position = Vec2::new(5.2, 5.0);
        world.mouse.pressed = true;
        world.step(1000.0 / 60.0, 1.0);

        assert_eq!(world.mouse.body, Some(id));
        assert!((world.mouse.point_b - Vec2::new(0.0, -0.2)).length() < 1e-5);
        // Grabbing does not yank the body
        assert!((world.body(id).unwrap().position - Vec2::new(5.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_mouse_drag() {
        let mut world = World::new(Vec2::ZERO);
        let id = world.add_body(BodyOptions {
            position: Vec2::new(5.0, 5.0),
            filter: CollisionFilter::new(
                categories::DYNAMIC,
                categories::PHYSICS | categories::MOUSE,
            ),
            ..Default::default()
        });
        world.mouse.position = Vec2::new(5.2, 5.0);
        world.mouse.pressed = true;
        world.step(1000.0 / 60.0, 1.0);
        assert_eq!(world.mouse.body, Some(id));

        world.mouse.position = Vec2::new(20.2, 5.0);
        world.step(1000.0 / 60.0, 1.0);
        let body = world.body(id).unwrap();
        assert!((body.position - Vec2::new(20.0, 5.0)).length() < 1e-3);

        world.mouse.pressed = false;
        world.step(1000.0 / 60.0, 1.0);
        assert_eq!(world.mouse.body, None);
    }
}
