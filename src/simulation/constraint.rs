//! Circular arena boundary constraint

use crate::math::Vector2FloatExt;
use crate::simulation::params::Arena;
use crate::simulation::shape::Object;

/// Project a simulated object back inside `arena`
///
/// The allowed distance from the centre is `arena.radius - extent`, where the
/// extent is the shape's bounding radius (half-diagonal for rectangles).
/// Objects larger than the arena are pinned to its centre. Returns whether
/// the object was moved.
pub fn apply_boundary(object: &mut Object, arena: &Arena) -> bool {
    let extent = object.shape().bounding_radius();
    let Some(body) = object.body_mut() else {
        return false;
    };

    let v = arena.center - body.position();
    let distance = v.length();
    let effective_radius = (arena.radius - extent).max(0.0);

    if distance > effective_radius {
        // zero when the object sits exactly on the centre
        let n = v.normalize_or_zero();
        body.set_position(arena.center - n * effective_radius);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2f;
    use crate::simulation::integrator::IntegrationScheme;
    use crate::simulation::shape::Shape;

    fn circle_at(radius: f64, p: Vec2f) -> Object {
        Object::new_dynamic(Shape::circle(radius).unwrap(), p, IntegrationScheme::Verlet).unwrap()
    }

    #[test]
    fn outside_object_is_projected_onto_the_rim() {
        let arena = Arena::default();
        let mut o = circle_at(20.0, Vec2f::new(1000.0, 500.0));
        assert!(apply_boundary(&mut o, &arena));
        assert!((o.position() - Vec2f::new(930.0, 500.0)).norm() < 1e-9);
    }

    #[test]
    fn inside_object_is_untouched() {
        let arena = Arena::default();
        let mut o = circle_at(20.0, Vec2f::new(600.0, 600.0));
        assert!(!apply_boundary(&mut o, &arena));
        assert_eq!(o.position(), Vec2f::new(600.0, 600.0));
    }

    #[test]
    fn rectangle_uses_half_diagonal() {
        let arena = Arena::default();
        let shape = Shape::rectangle(60.0, 80.0).unwrap();
        let mut o = Object::new_dynamic(shape, Vec2f::new(500.0, 0.0), IntegrationScheme::Verlet).unwrap();
        apply_boundary(&mut o, &arena);
        let d = o.position().distance(&arena.center);
        assert!((d - (450.0 - 50.0)).abs() < 1e-9);
    }

    #[test]
    fn oversized_object_at_centre_does_not_produce_nan() {
        let arena = Arena { center: Vec2f::new(0.0, 0.0), radius: 10.0 };
        let mut o = circle_at(50.0, Vec2f::zeros());
        apply_boundary(&mut o, &arena);
        assert_eq!(o.position(), Vec2f::zeros());
    }

    #[test]
    fn static_objects_are_ignored() {
        let arena = Arena::default();
        let mut o = Object::new_static(Shape::circle(5.0).unwrap(), Vec2f::new(5000.0, 0.0)).unwrap();
        assert!(!apply_boundary(&mut o, &arena));
        assert_eq!(o.position(), Vec2f::new(5000.0, 0.0));
    }
}
