use crate::user_config::UserConfig;

use super::*;

fn accel_on() -> AccelConfig {
    AccelConfig {
        enabled: true,
        ..UserConfig::default().pointing.accel
    }
}

#[test]
fn disabled_passes_through() {
    let config = UserConfig::default().pointing.accel;
    assert!(!config.enabled);
    let mut rem = Remainder::default();
    assert_eq!(accelerate(&config, 37, -5, 8, &mut rem), (37, -5));
    assert_eq!(multiplier(&config, 100.0), 1.0);
}

#[test]
fn multiplier_grows_with_speed() {
    let config = accel_on();
    let mut prev = multiplier(&config, 0.0);
    assert_eq!(prev, 1.0);
    for i in 1..=40 {
        let m = multiplier(&config, i as f32 * 0.125);
        assert!(m >= prev, "{m} < {prev} at {i}");
        prev = m;
    }
    assert_eq!(multiplier(&config, config.offset + SPEED_SPAN), config.limit);
    assert_eq!(multiplier(&config, 50.0), config.limit);
}

#[test]
fn fast_motion_is_scaled() {
    let config = accel_on();
    let mut rem = Remainder::default();
    assert_eq!(accelerate(&config, 30, 0, 1, &mut rem), (120, 0));
    assert_eq!(accelerate(&config, 0, -30, 1, &mut rem), (0, -120));
}

#[test]
fn fractions_carry() {
    let config = AccelConfig {
        enabled: true,
        takeoff: 0.0,
        growth: 0.0,
        offset: -10.0,
        limit: 0.5,
    };
    let mut rem = Remainder::default();
    let xs: [i16; 4] = core::array::from_fn(|_| accelerate(&config, 1, -1, 1, &mut rem).0);
    assert_eq!(xs, [0, 1, 0, 1]);

    let mut rem = Remainder::default();
    let ys: [i16; 4] = core::array::from_fn(|_| accelerate(&config, 1, -1, 1, &mut rem).1);
    assert_eq!(ys, [0, -1, 0, -1]);
}

#[test]
fn jiggler_waits_for_idle_then_alternates() {
    let config = JigglerConfig {
        enabled: true,
        timeout_s: 30,
    };
    let mut j = Jiggler::new();
    j.motion(Instant::from_secs(100));

    assert_eq!(j.poll(&config, Instant::from_secs(129)), None);
    assert_eq!(j.poll(&config, Instant::from_secs(130)), Some((1, 1)));
    assert_eq!(j.poll(&config, Instant::from_millis(130_500)), None);
    assert_eq!(j.poll(&config, Instant::from_secs(131)), Some((-1, -1)));
    assert_eq!(j.poll(&config, Instant::from_secs(132)), Some((1, 1)));

    j.motion(Instant::from_secs(133));
    assert_eq!(j.poll(&config, Instant::from_secs(140)), None);
    assert_eq!(j.poll(&config, Instant::from_secs(163)), Some((1, 1)));
}

#[test]
fn jiggler_disabled() {
    let mut j = Jiggler::new();
    let config = JigglerConfig {
        enabled: false,
        timeout_s: 0,
    };
    assert_eq!(j.poll(&config, Instant::from_secs(1000)), None);
}
