//! Per-body time integrators
//!
//! Three schemes advance a single body by `dt` using the acceleration
//! accumulated since the previous step:
//! - position Verlet (velocity reconstructed from `position - previous_position`)
//! - semi-implicit Euler
//! - classical 4th-order Runge–Kutta on `(position, velocity)`
//!
//! Every scheme clears the accumulator once it has been consumed, so forces
//! never carry over from one tick to the next. A zero step consumes the
//! accumulator and moves nothing, whatever the body's velocity.

use serde::Deserialize;

use crate::math::Vec2f;
use crate::simulation::body::Body;

/// Which integrator a body uses
/// `integrator: "verlet"`, `"euler"` or `"rk4"` in scenario files
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationScheme {
    Euler, // semi-implicit Euler, explicit velocity
    #[default]
    Verlet, // position Verlet, implicit velocity
    Rk4, // classical Runge–Kutta, explicit velocity
}

/// Advance `body` by `dt` with its selected scheme
pub fn integrate(body: &mut Body, dt: f64) {
    // zero, negative or NaN steps only consume the accumulator
    if !(dt > 0.0) {
        body.acceleration = Vec2f::zeros();
        return;
    }
    match body.scheme {
        IntegrationScheme::Verlet => integrate_verlet(body, dt),
        IntegrationScheme::Euler => integrate_euler(body, dt),
        IntegrationScheme::Rk4 => integrate_rk4(body, dt),
    }
}

/// Position Verlet step:
/// d = x - x_prev, x_prev = x, x = x + d + a dt^2
fn integrate_verlet(body: &mut Body, dt: f64) {
    let displacement = body.position - body.previous_position;
    body.previous_position = body.position;
    body.position += displacement + body.acceleration * dt * dt;
    body.acceleration = Vec2f::zeros();
    body.step = dt;
    body.velocity = (body.position - body.previous_position) / dt;
}

/// Semi-implicit Euler: kick the velocity first, then drift with the new one
fn integrate_euler(body: &mut Body, dt: f64) {
    body.previous_position = body.position;
    body.velocity += body.acceleration * dt;
    body.position += body.velocity * dt;
    body.acceleration = Vec2f::zeros();
    body.step = dt;
}

fn integrate_rk4(body: &mut Body, dt: f64) {
    // The accumulator is the only force source, so it is constant over the step
    let a = body.acceleration;
    let (x, v) = rk4_step(body.position, body.velocity, dt, |_, _| a);

    body.previous_position = body.position;
    body.position = x;
    body.velocity = v;
    body.acceleration = Vec2f::zeros();
    body.step = dt;
}

/// One RK4 step for x' = v, v' = accel(x, v)
/// Returns the new `(position, velocity)`
pub fn rk4_step<F>(x: Vec2f, v: Vec2f, dt: f64, accel: F) -> (Vec2f, Vec2f)
where
    F: Fn(Vec2f, Vec2f) -> Vec2f,
{
    let half_dt = 0.5 * dt;

    // k1 at the start of the interval
    let k1_x = v;
    let k1_v = accel(x, v);

    // k2, k3 at the midpoint using the previous slope
    let k2_x = v + k1_v * half_dt;
    let k2_v = accel(x + k1_x * half_dt, k2_x);

    let k3_x = v + k2_v * half_dt;
    let k3_v = accel(x + k2_x * half_dt, k3_x);

    // k4 at the end of the interval
    let k4_x = v + k3_v * dt;
    let k4_v = accel(x + k3_x * dt, k4_x);

    let sixth = dt / 6.0;
    let x_next = x + (k1_x + k2_x * 2.0 + k3_x * 2.0 + k4_x) * sixth;
    let v_next = v + (k1_v + k2_v * 2.0 + k3_v * 2.0 + k4_v) * sixth;
    (x_next, v_next)
}
