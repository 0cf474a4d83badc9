//! Pointer motion shaping driven by [crate::user_config::PointingConfig].

use embassy_time::{Duration, Instant};
use splitkb_common::math::{accel_curve, lerp};

use crate::user_config::{AccelConfig, JigglerConfig};

/// Speed above `offset`, in counts per millisecond, over which the curve runs from none to
/// full acceleration.
pub const SPEED_SPAN: f32 = 2.0;

pub const JIGGLE_PERIOD: Duration = Duration::from_secs(1);

/// Sub-count motion carried from one report to the next.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Remainder {
    x: f32,
    y: f32,
}

fn abs(v: f32) -> f32 {
    if v < 0.0 {
        -v
    } else {
        v
    }
}

/// Counts per millisecond. Uses `max + min / 2` in place of the euclidean length.
fn speed(dx: i16, dy: i16, dt_ms: u16) -> f32 {
    let (ax, ay) = (abs(dx as f32), abs(dy as f32));
    let (hi, lo) = if ax > ay { (ax, ay) } else { (ay, ax) };
    (hi + lo * 0.5) / dt_ms.max(1) as f32
}

pub fn multiplier(config: &AccelConfig, speed: f32) -> f32 {
    if !config.enabled {
        return 1.0;
    }
    let t = (speed - config.offset) / SPEED_SPAN;
    lerp(1.0, config.limit, accel_curve(t, config.takeoff, config.growth))
}

fn carry(v: f32, fraction: &mut f32) -> i16 {
    let r = v + *fraction;
    let ticks = r as i16;
    *fraction = (r - ticks as f32).clamp(-1.0, 1.0);
    ticks
}

/// Scale one motion report of `dx, dy` counts gathered over `dt_ms`.
pub fn accelerate(
    config: &AccelConfig,
    dx: i16,
    dy: i16,
    dt_ms: u16,
    rem: &mut Remainder,
) -> (i16, i16) {
    if !config.enabled {
        *rem = Remainder::default();
        return (dx, dy);
    }
    let m = multiplier(config, speed(dx, dy, dt_ms));
    (
        carry(dx as f32 * m, &mut rem.x),
        carry(dy as f32 * m, &mut rem.y),
    )
}

/// Keeps the host awake by nudging the pointer back and forth while the pointer is idle.
#[derive(Debug, Default)]
pub struct Jiggler {
    last_motion: Option<Instant>,
    last_jiggle: Option<Instant>,
    away: bool,
}

impl Jiggler {
    pub const fn new() -> Self {
        Self {
            last_motion: None,
            last_jiggle: None,
            away: false,
        }
    }

    /// Record real pointer motion.
    pub fn motion(&mut self, now: Instant) {
        self.last_motion = Some(now);
        self.last_jiggle = None;
        self.away = false;
    }

    /// The move to report now, if one is due. Moves alternate between `+1` and `-1` so the
    /// pointer ends where it started.
    pub fn poll(&mut self, config: &JigglerConfig, now: Instant) -> Option<(i8, i8)> {
        if !config.enabled {
            return None;
        }
        let since = *self.last_motion.get_or_insert(now);
        let idle = now.checked_duration_since(since)?;
        if idle < Duration::from_secs(config.timeout_s as u64) {
            return None;
        }
        if let Some(at) = self.last_jiggle {
            if now.checked_duration_since(at)? < JIGGLE_PERIOD {
                return None;
            }
        }

        self.last_jiggle = Some(now);
        self.away = !self.away;
        let d = if self.away { 1 } else { -1 };
        Some((d, d))
    }
}

#[cfg(test)]
#[path = "pointing_test.rs"]
mod test;
