//! Pairwise collision detection and impulse response
//!
//! Detection is a total function over every pair of shape kinds and yields a
//! [`Contact`] (normal pointing from A to B, penetration depth). Rectangles are
//! axis-aligned and centred on their position.
//!
//! The response is a single pass over all unordered pairs in insertion order,
//! with no broad phase and no iteration: each approaching pair gets
//! - a normal impulse scaled by `1 + restitution`,
//! - a tangential friction impulse scaled by `friction`,
//! - a 50/50 positional correction of the overlap (mass is ignored here).
//!
//! Pairs already separating are left alone even while still overlapping.

use tracing::trace;

use crate::math::{Vec2f, Vector2FloatExt};
use crate::simulation::body::Body;
use crate::simulation::shape::{Object, Shape};

/// Empirical divisor applied to post-impact velocities
pub const VELOCITY_DAMPING: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vec2f, // unit normal from A towards B (zero if undefined)
    pub depth: f64, // penetration depth, > 0
}

/// Coefficients of the collision response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    pub restitution: f64,
    pub friction: f64,
}

/// Test two objects for overlap
/// Objects without a body never collide.
pub fn detect(a: &Object, b: &Object) -> Option<Contact> {
    if !(a.has_body() && b.has_body()) {
        return None;
    }
    let (pa, pb) = (a.position(), b.position());

    match (*a.shape(), *b.shape()) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => circle_vs_circle(pa, ra, pb, rb),
        (Shape::Circle { radius }, Shape::Rectangle { .. }) => {
            circle_vs_rect(pa, radius, pb, b.shape().half_extents())
        }
        (Shape::Rectangle { .. }, Shape::Circle { radius }) => {
            circle_vs_rect(pb, radius, pa, a.shape().half_extents()).map(|mut c| {
                c.normal = -c.normal;
                c
            })
        }
        (Shape::Rectangle { .. }, Shape::Rectangle { .. }) => {
            rect_vs_rect(pa, a.shape().half_extents(), pb, b.shape().half_extents())
        }
    }
}

/// Circles collide when their centres are closer than the sum of the radii
fn circle_vs_circle(pa: Vec2f, ra: f64, pb: Vec2f, rb: f64) -> Option<Contact> {
    let delta = pb - pa;
    let distance = delta.length();
    let sum = ra + rb;
    if distance >= sum {
        return None;
    }
    Some(Contact {
        normal: delta.normalize_or_zero(),
        depth: sum - distance,
    })
}

fn circle_vs_rect(pc: Vec2f, radius: f64, pr: Vec2f, half: Vec2f) -> Option<Contact> {
    let local = pc - pr;
    let inside = local.x.abs() <= half.x && local.y.abs() <= half.y;

    if inside {
        // Push out along the axis of least penetration
        let pen_x = half.x - local.x.abs();
        let pen_y = half.y - local.y.abs();
        let (normal, pen) = if pen_x < pen_y {
            (Vec2f::new(-local.x.signum(), 0.0), pen_x)
        } else {
            (Vec2f::new(0.0, -local.y.signum()), pen_y)
        };
        return Some(Contact { normal, depth: radius + pen });
    }

    let closest = Vec2f::new(local.x.clamp(-half.x, half.x), local.y.clamp(-half.y, half.y));
    let offset = local - closest; // from the closest rectangle point to the circle centre
    let distance = offset.length();
    if distance >= radius {
        return None;
    }
    Some(Contact {
        normal: -offset.normalize_or_zero(),
        depth: radius - distance,
    })
}

fn rect_vs_rect(pa: Vec2f, ha: Vec2f, pb: Vec2f, hb: Vec2f) -> Option<Contact> {
    let delta = pb - pa;
    let overlap_x = ha.x + hb.x - delta.x.abs();
    let overlap_y = ha.y + hb.y - delta.y.abs();
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }
    if overlap_x < overlap_y {
        Some(Contact { normal: Vec2f::new(delta.x.signum(), 0.0), depth: overlap_x })
    } else {
        Some(Contact { normal: Vec2f::new(0.0, delta.y.signum()), depth: overlap_y })
    }
}

/// Apply the impulse/friction response and positional correction to a pair
/// Returns `false` when the pair is not approaching along the normal.
pub fn resolve(a: &mut Body, b: &mut Body, contact: &Contact, response: &Response) -> bool {
    let n = contact.normal;
    let va = a.velocity();
    let vb = b.velocity();

    let relative_velocity = vb - va;
    let relative_speed = relative_velocity.dot(&n);

    // Approaching means B closes in on A along n
    if relative_speed >= 0.0 {
        return false;
    }

    let impulse = -(1.0 + response.restitution) * relative_speed / (a.mass().recip() + b.mass().recip());

    let tangent = relative_velocity - n * relative_speed;
    let friction_impulse = tangent.normalize_or_zero() * impulse * response.friction;

    let new_va = ((va.add_scalar(-impulse) - friction_impulse) / a.mass()).component_mul(&n) / VELOCITY_DAMPING;
    let new_vb = ((vb.add_scalar(impulse) + friction_impulse) / b.mass()).component_mul(&n) / VELOCITY_DAMPING;
    a.set_velocity(new_va);
    b.set_velocity(new_vb);

    let correction = n * (0.5 * contact.depth);
    a.set_position(a.position() - correction);
    b.set_position(b.position() + correction);
    true
}

/// Exhaustive O(n^2) pass over all unordered pairs, in order
/// Each pair sees the positions left by the pairs resolved before it.
/// Returns the number of pairs resolved.
pub fn resolve_all(objects: &mut [Object], response: &Response) -> usize {
    let n = objects.len();
    let mut resolved = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let Some(contact) = detect(&objects[i], &objects[j]) else {
                continue;
            };

            let (head, tail) = objects.split_at_mut(j);
            let (Some(a), Some(b)) = (head[i].body_mut(), tail[0].body_mut()) else {
                continue;
            };

            if resolve(a, b, &contact, response) {
                trace!(i, j, depth = contact.depth, "resolved collision");
                resolved += 1;
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::integrator::IntegrationScheme;

    fn dynamic(shape: Shape, p: Vec2f) -> Object {
        Object::new_dynamic(shape, p, IntegrationScheme::Verlet).unwrap()
    }

    fn circle(r: f64, x: f64, y: f64) -> Object {
        dynamic(Shape::circle(r).unwrap(), Vec2f::new(x, y))
    }

    fn rect(w: f64, h: f64, x: f64, y: f64) -> Object {
        dynamic(Shape::rectangle(w, h).unwrap(), Vec2f::new(x, y))
    }

    const RESPONSE: Response = Response { restitution: 0.2, friction: 0.1 };

    #[test]
    fn circles_touching_only_when_closer_than_radii() {
        assert!(detect(&circle(20.0, 0.0, 0.0), &circle(20.0, 39.9, 0.0)).is_some());
        assert!(detect(&circle(20.0, 0.0, 0.0), &circle(20.0, 40.0, 0.0)).is_none());
        let c = detect(&circle(20.0, 0.0, 0.0), &circle(20.0, 10.0, 0.0)).unwrap();
        assert_eq!(c.normal, Vec2f::new(1.0, 0.0));
        assert!((c.depth - 30.0).abs() < 1e-12);
    }

    #[test]
    fn coincident_circles_have_zero_normal() {
        let c = detect(&circle(5.0, 1.0, 1.0), &circle(5.0, 1.0, 1.0)).unwrap();
        assert_eq!(c.normal, Vec2f::zeros());
        assert!(!c.depth.is_nan());
    }

    #[test]
    fn static_objects_never_collide() {
        let s = Object::new_static(Shape::circle(20.0).unwrap(), Vec2f::zeros()).unwrap();
        assert!(detect(&s, &circle(20.0, 1.0, 0.0)).is_none());
        assert!(detect(&circle(20.0, 1.0, 0.0), &s).is_none());
    }

    #[test]
    fn circle_rect_normals_point_from_a_to_b() {
        // circle left of a rectangle, overlapping its left face
        let c = circle(10.0, 0.0, 0.0);
        let r = rect(20.0, 20.0, 15.0, 0.0);
        let ab = detect(&c, &r).unwrap();
        assert!((ab.normal - Vec2f::new(1.0, 0.0)).norm() < 1e-12);
        assert!((ab.depth - 5.0).abs() < 1e-12);

        let ba = detect(&r, &c).unwrap();
        assert!((ba.normal - Vec2f::new(-1.0, 0.0)).norm() < 1e-12);
        assert!((ba.depth - 5.0).abs() < 1e-12);
    }

    #[test]
    fn circle_centre_inside_rect() {
        let c = circle(5.0, 8.0, 0.0);
        let r = rect(20.0, 40.0, 0.0, 0.0);
        let contact = detect(&c, &r).unwrap();
        // shallowest exit is through the right face, so B lies to the left
        assert_eq!(contact.normal, Vec2f::new(-1.0, 0.0));
        assert!((contact.depth - 7.0).abs() < 1e-12);
    }

    #[test]
    fn circle_near_rect_corner_misses() {
        let c = circle(5.0, 14.0, 14.0);
        let r = rect(20.0, 20.0, 0.0, 0.0);
        assert!(detect(&c, &r).is_none());
    }

    #[test]
    fn rect_rect_uses_axis_of_least_overlap() {
        let a = rect(20.0, 20.0, 0.0, 0.0);
        let b = rect(20.0, 20.0, 5.0, 18.0);
        let c = detect(&a, &b).unwrap();
        assert_eq!(c.normal, Vec2f::new(0.0, 1.0));
        assert!((c.depth - 2.0).abs() < 1e-12);
        assert!(detect(&a, &rect(10.0, 10.0, 30.0, 0.0)).is_none());
    }

    #[test]
    fn approaching_pair_is_pushed_apart() {
        let mut objects = vec![circle(20.0, 0.0, 0.0), circle(20.0, 10.0, 0.0)];
        objects[0].body_mut().unwrap().set_velocity(Vec2f::new(1.0, 0.0));
        objects[1].body_mut().unwrap().set_velocity(Vec2f::new(-1.0, 0.0));

        assert_eq!(resolve_all(&mut objects, &RESPONSE), 1);

        // full 30 unit overlap split evenly
        assert!((objects[0].position() - Vec2f::new(-15.0, 0.0)).norm() < 1e-9);
        assert!((objects[1].position() - Vec2f::new(25.0, 0.0)).norm() < 1e-9);

        // impulse = 1.2 * 2 / (2 / 500) = 600, so v = (v0 -/+ 600) / 500 / 25 along n;
        // the Verlet velocity also carries the 15 unit correction over a 1/60 s step
        let va = objects[0].body().unwrap().velocity();
        let vb = objects[1].body().unwrap().velocity();
        assert!((va.x - ((1.0 - 600.0) / 500.0 / VELOCITY_DAMPING - 15.0 * 60.0)).abs() < 1e-6);
        assert!((vb.x - ((-1.0 + 600.0) / 500.0 / VELOCITY_DAMPING + 15.0 * 60.0)).abs() < 1e-6);
        assert!(va.y.abs() < 1e-9);
    }

    #[test]
    fn separating_pair_is_left_alone() {
        let mut objects = vec![circle(20.0, 0.0, 0.0), circle(20.0, 10.0, 0.0)];
        objects[0].body_mut().unwrap().set_velocity(Vec2f::new(-1.0, 0.0));
        objects[1].body_mut().unwrap().set_velocity(Vec2f::new(1.0, 0.0));
        let before = objects.clone();
        assert_eq!(resolve_all(&mut objects, &RESPONSE), 0);
        assert_eq!(objects, before);
    }

    fn circle_with(scheme: IntegrationScheme, x: f64, v: f64) -> Object {
        let mut o = Object::new_dynamic(Shape::circle(20.0).unwrap(), Vec2f::new(x, 0.0), scheme).unwrap();
        o.body_mut().unwrap().set_velocity(Vec2f::new(v, 0.0));
        o
    }

    #[test]
    fn mixed_schemes_compare_velocities_in_the_same_units() {
        // Euler at 60 units/s behind a Verlet body at 90 units/s: separating
        let mut objects = vec![
            circle_with(IntegrationScheme::Euler, 0.0, 60.0),
            circle_with(IntegrationScheme::Verlet, 10.0, 90.0),
        ];
        let before = objects.clone();
        assert_eq!(resolve_all(&mut objects, &RESPONSE), 0);
        assert_eq!(objects, before);

        // same pair with the Verlet body slower: approaching
        let mut objects = vec![
            circle_with(IntegrationScheme::Euler, 0.0, 60.0),
            circle_with(IntegrationScheme::Verlet, 10.0, 30.0),
        ];
        assert_eq!(resolve_all(&mut objects, &RESPONSE), 1);
        assert!(objects[0].position().x < 0.0);
        assert!(objects[1].position().x > 10.0);
    }

    #[test]
    fn resolve_all_handles_mixed_shapes() {
        let mut objects = vec![
            circle(10.0, 0.0, 0.0),
            rect(20.0, 20.0, 15.0, 0.0),
            Object::new_static(Shape::rectangle(5.0, 5.0).unwrap(), Vec2f::zeros()).unwrap(),
        ];
        objects[0].body_mut().unwrap().set_velocity(Vec2f::new(2.0, 0.0));
        assert_eq!(resolve_all(&mut objects, &RESPONSE), 1);
        assert!(objects[0].position().x < 0.0);
        assert!(objects[1].position().x > 15.0);
        assert_eq!(objects[2].position(), Vec2f::zeros());
    }
}
