//! The simulation world
//!
//! `World` exclusively owns every object in an insertion-ordered store and
//! advances them with a fixed five-stage tick:
//! 1. input intake (edge-triggered spawn),
//! 2. integration of every simulated body,
//! 3. arena boundary constraint,
//! 4. gravity accumulation,
//! 5. collision detection and response.
//!
//! Gravity is accumulated *after* integration, so the gravity added in one
//! tick is consumed by the next tick's integration step.

use std::fmt;

use rand::Rng;
use tracing::{debug, info};

use crate::math::{rotation, Vec2f};
use crate::simulation::collision::{self, Response};
use crate::simulation::constraint::apply_boundary;
use crate::simulation::error::SimError;
use crate::simulation::input::{InputSample, SpawnTrigger};
use crate::simulation::integrator::IntegrationScheme;
use crate::simulation::params::{validate_friction, validate_gravity, validate_restitution, Arena, Parameters};
use crate::simulation::shape::{Object, Shape};

/// Stable handle to an object, never reused within a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only copy of an object handed to renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub shape: Shape,
    pub position: Vec2f,
    pub velocity: Option<Vec2f>, // None for static objects
}

impl ObjectSnapshot {
    pub fn has_body(&self) -> bool {
        self.velocity.is_some()
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<ObjectId>,
    pub collisions: usize,
}

#[derive(Debug)]
pub struct World {
    ids: Vec<ObjectId>, // parallel to `objects`
    objects: Vec<Object>,
    next_id: u64,
    params: Parameters,
    spawn_trigger: SpawnTrigger,
}

impl Default for World {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            objects: Vec::new(),
            next_id: 0,
            params: Parameters::default(),
            spawn_trigger: SpawnTrigger::default(),
        }
    }
}

impl World {
    pub fn new(params: Parameters) -> Result<Self, SimError> {
        params.validate()?;
        info!(
            gravity = ?params.gravity,
            restitution = params.restitution,
            friction = params.friction,
            arena_radius = params.arena.radius,
            "world created"
        );
        Ok(Self { params, ..Self::default() })
    }

    // =====================================================================
    // Configuration
    // =====================================================================

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn set_gravity(&mut self, gravity: Vec2f) -> Result<(), SimError> {
        validate_gravity(gravity)?;
        self.params.gravity = gravity;
        Ok(())
    }

    pub fn set_restitution(&mut self, restitution: f64) -> Result<(), SimError> {
        validate_restitution(restitution)?;
        self.params.restitution = restitution;
        Ok(())
    }

    pub fn set_friction(&mut self, friction: f64) -> Result<(), SimError> {
        validate_friction(friction)?;
        self.params.friction = friction;
        Ok(())
    }

    pub fn set_arena(&mut self, arena: Arena) -> Result<(), SimError> {
        arena.validate()?;
        self.params.arena = arena;
        Ok(())
    }

    // =====================================================================
    // Object store
    // =====================================================================

    /// Append a circle; a body is attached when `with_body` is set
    pub fn spawn_circle(
        &mut self,
        radius: f64,
        position: Vec2f,
        with_body: bool,
        scheme: IntegrationScheme,
    ) -> Result<ObjectId, SimError> {
        let shape = Shape::circle(radius)?;
        self.spawn(shape, position, with_body, scheme)
    }

    /// Append a rectangle; a body is attached when `with_body` is set
    pub fn spawn_rectangle(
        &mut self,
        width: f64,
        height: f64,
        position: Vec2f,
        with_body: bool,
        scheme: IntegrationScheme,
    ) -> Result<ObjectId, SimError> {
        let shape = Shape::rectangle(width, height)?;
        self.spawn(shape, position, with_body, scheme)
    }

    fn spawn(
        &mut self,
        shape: Shape,
        position: Vec2f,
        with_body: bool,
        scheme: IntegrationScheme,
    ) -> Result<ObjectId, SimError> {
        let object = if with_body {
            Object::new_dynamic(shape, position, scheme)?
        } else {
            Object::new_static(shape, position)?
        };
        Ok(self.add_object(object))
    }

    /// Take ownership of a caller-built object
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        debug!(%id, kind = object.shape().kind(), position = ?object.position(), "added object");
        self.ids.push(id);
        self.objects.push(object);
        id
    }

    /// Remove and return an object
    pub fn remove_object(&mut self, id: ObjectId) -> Result<Object, SimError> {
        let index = self.index_of(id).ok_or(SimError::UnknownObject(id))?;
        self.ids.remove(index);
        debug!(%id, "removed object");
        Ok(self.objects.remove(index))
    }

    /// Keep only the objects for which `keep` returns true
    pub fn retain_objects<F>(&mut self, mut keep: F)
    where
        F: FnMut(&ObjectSnapshot) -> bool,
    {
        let mut kept_ids = Vec::with_capacity(self.ids.len());
        let mut kept = Vec::with_capacity(self.objects.len());
        for (id, object) in self.ids.drain(..).zip(self.objects.drain(..)) {
            if keep(&snapshot(id, &object)) {
                kept_ids.push(id);
                kept.push(object);
            } else {
                debug!(%id, "removed object");
            }
        }
        self.ids = kept_ids;
        self.objects = kept;
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Snapshot of every object, in insertion order
    pub fn list_objects(&self) -> Vec<ObjectSnapshot> {
        self.ids
            .iter()
            .zip(&self.objects)
            .map(|(&id, object)| snapshot(id, object))
            .collect()
    }

    pub fn object(&self, id: ObjectId) -> Option<ObjectSnapshot> {
        self.index_of(id).map(|i| snapshot(id, &self.objects[i]))
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        // ids are handed out in increasing order and removal keeps order
        self.ids.binary_search(&id).ok()
    }

    // =====================================================================
    // Tick pipeline
    // =====================================================================

    /// Advance the world by `dt` seconds
    pub fn tick(&mut self, dt: f64, input: InputSample) -> Result<TickReport, SimError> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimError::InvalidArgument { what: "time step", value: dt });
        }

        let spawned = self.intake_input(&input)?;
        self.update_positions(dt);
        self.apply_constraints();
        self.apply_gravity();
        let collisions = self.check_collisions();

        Ok(TickReport { spawned, collisions })
    }

    /// [`World::tick`] with no input
    pub fn step(&mut self, dt: f64) -> Result<TickReport, SimError> {
        self.tick(dt, InputSample::released())
    }

    fn intake_input(&mut self, input: &InputSample) -> Result<Option<ObjectId>, SimError> {
        match self.spawn_trigger.poll(input) {
            Some(at) => {
                let (radius, scheme) = (self.params.spawn_radius, self.params.integrator);
                self.spawn_circle(radius, at, true, scheme).map(Some)
            }
            None => Ok(None),
        }
    }

    fn update_positions(&mut self, dt: f64) {
        for body in self.objects.iter_mut().filter_map(Object::body_mut) {
            body.update_position(dt);
        }
    }

    fn apply_constraints(&mut self) {
        let arena = self.params.arena;
        for object in &mut self.objects {
            apply_boundary(object, &arena);
        }
    }

    fn apply_gravity(&mut self) {
        let gravity = self.params.gravity;
        for body in self.objects.iter_mut().filter_map(Object::body_mut) {
            body.accelerate(gravity);
        }
    }

    fn check_collisions(&mut self) -> usize {
        let response = Response {
            restitution: self.params.restitution,
            friction: self.params.friction,
        };
        collision::resolve_all(&mut self.objects, &response)
    }

    // =====================================================================
    // Seeding
    // =====================================================================

    /// Drop `count` simulated circles at random points inside the arena
    pub fn scatter_circles<R: Rng>(
        &mut self,
        count: usize,
        min_radius: f64,
        max_radius: f64,
        rng: &mut R,
    ) -> Result<Vec<ObjectId>, SimError> {
        Shape::circle(min_radius)?;
        if !(max_radius >= min_radius) {
            return Err(SimError::InvalidArgument { what: "max radius", value: max_radius });
        }

        let arena = self.params.arena;
        let scheme = self.params.integrator;
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let radius = rng.gen_range(min_radius..=max_radius);
            let reach = (arena.radius - radius).max(0.0);
            // sqrt keeps the density uniform over the disc
            let distance = reach * rng.gen::<f64>().sqrt();
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let position = arena.center + rotation(angle) * Vec2f::new(distance, 0.0);
            ids.push(self.spawn_circle(radius, position, true, scheme)?);
        }
        Ok(ids)
    }
}

fn snapshot(id: ObjectId, object: &Object) -> ObjectSnapshot {
    ObjectSnapshot {
        id,
        shape: *object.shape(),
        position: object.position(),
        velocity: object.body().map(|b| b.velocity()),
    }
}
