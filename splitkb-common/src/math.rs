/// Ease-in curve used to shape pointer acceleration.
///
/// A cubic Bezier through `(0, 0)` and `(1, 1)` with two inner control values. `takeoff` shapes the
/// curve near `t = 0` and `growth` near `t = 1`. `t` is clamped to `0.0..=1.0`.
pub fn accel_curve(t: f32, takeoff: f32, growth: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    let t2 = t * t;

    3.0 * u * u * t * takeoff + 3.0 * u * t2 * growth + t2 * t
}

/// Linear interpolation between `from` and `to`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
#[path = "math_test.rs"]
mod test;
