use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Knot spacing for the Catmull-Rom evaluator.
///
/// Controls how chord length between control points stretches the parameter
/// space. Uniform is the classic basis; centripetal avoids loops and
/// overshoot when waypoint spacing is uneven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    /// Equal knot intervals regardless of chord length.
    Uniform,
    /// Knot intervals proportional to the square root of chord length.
    #[default]
    Centripetal,
    /// Knot intervals proportional to chord length.
    Chordal,
}

impl Spacing {
    /// Exponent applied to chord lengths when placing knots.
    pub fn alpha(self) -> f32 {
        match self {
            Spacing::Uniform => 0.0,
            Spacing::Centripetal => 0.5,
            Spacing::Chordal => 1.0,
        }
    }
}

/// Chords at or below this length are degenerate when placing knots.
const DEGENERATE_CHORD: f32 = 1e-6;

/// Below this angle the quaternion log/exp use the first-order form.
const SMALL_ANGLE: f32 = 1e-6;

/// Knot interval for one chord of the control window.
///
/// Clamped windows repeat an edge point, collapsing a chord to zero. A
/// degenerate chord takes a neutral interval of 1, which keeps every
/// pyramid weight near unity. Flooring the interval at a tiny epsilon
/// instead blows the weights up to chord/epsilon, and their cancellation
/// leaves visible position noise at world coordinate scale.
fn knot_interval(a: Vec3, b: Vec3, alpha: f32) -> f32 {
    let chord = a.distance(b);
    if chord <= DEGENERATE_CHORD {
        1.0
    } else {
        chord.powf(alpha)
    }
}

/// Interpolated position between `p1` and `p2` at `t` in [0, 1].
///
/// Barry-Goldman recursive evaluation over knots placed by `spacing`. With
/// `Spacing::Uniform` this reduces to the classic Catmull-Rom basis. The
/// curve passes through `p1` at t = 0 and `p2` at t = 1.
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32, spacing: Spacing) -> Vec3 {
    let alpha = spacing.alpha();
    let dt0 = knot_interval(p0, p1, alpha);
    let dt1 = knot_interval(p1, p2, alpha);
    let dt2 = knot_interval(p2, p3, alpha);

    let t0 = 0.0;
    let t1 = t0 + dt0;
    let t2 = t1 + dt1;
    let t3 = t2 + dt2;
    let u = t1 + t * dt1;

    let a1 = p0 * ((t1 - u) / (t1 - t0)) + p1 * ((u - t0) / (t1 - t0));
    let a2 = p1 * ((t2 - u) / (t2 - t1)) + p2 * ((u - t1) / (t2 - t1));
    let a3 = p2 * ((t3 - u) / (t3 - t2)) + p3 * ((u - t2) / (t3 - t2));
    let b1 = a1 * ((t2 - u) / (t2 - t0)) + a2 * ((u - t0) / (t2 - t0));
    let b2 = a2 * ((t3 - u) / (t3 - t1)) + a3 * ((u - t1) / (t3 - t1));
    b1 * ((t2 - u) / (t2 - t1)) + b2 * ((u - t1) / (t2 - t1))
}

/// Logarithm of a unit quaternion: a pure quaternion holding axis times
/// angle. Stays on the principal branch for inputs with w >= 0.
pub fn quat_ln(q: Quat) -> Quat {
    let v = Vec3::new(q.x, q.y, q.z);
    let len = v.length();
    if len < SMALL_ANGLE {
        return Quat::from_xyzw(q.x, q.y, q.z, 0.0);
    }
    let angle = len.atan2(q.w);
    let r = v * (angle / len);
    Quat::from_xyzw(r.x, r.y, r.z, 0.0)
}

/// Exponential of a pure quaternion, inverse of [`quat_ln`].
pub fn quat_exp(q: Quat) -> Quat {
    let v = Vec3::new(q.x, q.y, q.z);
    let angle = v.length();
    if angle < SMALL_ANGLE {
        return Quat::from_xyzw(q.x, q.y, q.z, 1.0).normalize();
    }
    let (sin, cos) = angle.sin_cos();
    let r = v * (sin / angle);
    Quat::from_xyzw(r.x, r.y, r.z, cos)
}

/// Inner quadrangle point for squad at key `q` given its two neighbors:
/// `q * exp(-(ln(q^-1 * prev) + ln(q^-1 * next)) / 4)`.
pub fn squad_inner(prev: Quat, q: Quat, next: Quat) -> Quat {
    let inv = q.inverse();
    let arg = (quat_ln(inv * prev) + quat_ln(inv * next)) * -0.25;
    (q * quat_exp(arg)).normalize()
}

/// Spherical quadrangle interpolation between `q1` and `q2`.
///
/// `a` and `b` are the inner quadrangle points at either end. Exact at the
/// endpoints: t = 0 yields `q1`, t = 1 yields `q2`.
pub fn squad(q1: Quat, q2: Quat, a: Quat, b: Quat, t: f32) -> Quat {
    let outer = q1.slerp(q2, t);
    let inner = a.slerp(b, t);
    outer.slerp(inner, 2.0 * t * (1.0 - t))
}
