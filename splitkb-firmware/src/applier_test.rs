use splitkb_common::mods::{led, MOD_BIT_LSHIFT};

use crate::{
    keyboard_test_stub::{Calls, FakeEeconfig, FakeKeyboard},
    user_config::Rotation,
};

use super::*;

macro_rules! setup {
    ($shadow:ident, $kb:ident, $ee:ident, $x:block) => {{
        #[allow(unused_mut)]
        let mut $shadow: Option<RuntimeSnapshot> = None;
        #[allow(unused_mut)]
        let mut $kb = FakeKeyboard::default();
        #[allow(unused_mut)]
        let mut $ee = FakeEeconfig {
            default_layer: 1,
            ..Default::default()
        };
        $x
    }};
}

/// Apply `next` the way the slave does, keeping it as the new shadow.
fn apply(
    shadow: &mut Option<RuntimeSnapshot>,
    next: RuntimeSnapshot,
    kb: &mut FakeKeyboard,
    ee: &mut FakeEeconfig,
) {
    apply_runtime(shadow.as_ref(), &next, kb, ee);
    *shadow = Some(next);
}

#[test]
fn identical_snapshot_twice_has_no_second_effects() {
    setup!(shadow, kb, ee, {
        let mut snap = RuntimeSnapshot::default();
        snap.mods.mods = MOD_BIT_LSHIFT;
        snap.layers.default_layer_state = 4;
        snap.keymap_config_raw = 0x10;
        snap.internals.is_caps_word = true;
        snap.internals.auto_mouse_toggled = true;
        snap.audio.clicky_enable = true;
        snap.unicode_mode = 2;
        snap.wpm_count = 30;

        apply(&mut shadow, snap, &mut kb, &mut ee);
        let calls = kb.calls.clone();
        let updates = ee.updates;
        assert!(updates > 0);

        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(kb.calls, calls);
        assert_eq!(ee.updates, updates);
    });
}

#[test]
fn caps_word_toggled_once() {
    setup!(shadow, kb, ee, {
        let mut snap = RuntimeSnapshot::default();
        snap.internals.is_caps_word = true;

        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(kb.calls.toggle_caps_word, 1);
        assert!(kb.internals.is_caps_word);

        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(kb.calls.toggle_caps_word, 1);

        snap.internals.is_caps_word = false;
        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(kb.calls.toggle_caps_word, 2);
        assert!(!kb.internals.is_caps_word);
    });
}

#[test]
fn toggles_compare_with_live_state() {
    setup!(shadow, kb, ee, {
        // live subsystem already matches, even though the shadow does not
        kb.internals.auto_mouse_toggled = true;
        let mut snap = RuntimeSnapshot::default();
        snap.internals.auto_mouse_toggled = true;

        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(kb.calls.toggle_auto_mouse, 0);

        snap.internals.auto_mouse_toggled = false;
        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(kb.calls.toggle_auto_mouse, 1);
        assert!(!kb.internals.auto_mouse_toggled);
    });
}

#[test]
fn suspend_and_wake() {
    setup!(shadow, kb, ee, {
        let mut snap = RuntimeSnapshot::default();
        snap.internals.is_device_suspended = true;
        apply(&mut shadow, snap, &mut kb, &mut ee);
        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!((kb.calls.suspend, kb.calls.wakeup), (1, 0));

        snap.internals.is_device_suspended = false;
        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!((kb.calls.suspend, kb.calls.wakeup), (1, 1));
    });
}

#[test]
fn direct_fields() {
    setup!(shadow, kb, ee, {
        let mut snap = RuntimeSnapshot::default();
        snap.mods.weak_mods = MOD_BIT_LSHIFT;
        snap.layers.layer_state = 0b110;
        snap.leds = led::CAPS_LOCK;
        snap.wpm_count = 120;
        snap.internals.swap_hands = true;

        apply(&mut shadow, RuntimeSnapshot::default(), &mut kb, &mut ee);
        kb.calls = Calls::default();
        ee.updates = 0;

        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(kb.mods.weak_mods, MOD_BIT_LSHIFT);
        assert_eq!(kb.layer_state, 0b110);
        assert_eq!(kb.leds, led::CAPS_LOCK);
        assert_eq!(kb.wpm, 120);
        assert!(kb.internals.swap_hands);
        assert_eq!(shadow, Some(snap));
        assert_eq!(
            kb.calls,
            Calls {
                set_mods: 1,
                set_layer_state: 1,
                set_host_leds: 1,
                set_wpm: 1,
                set_swap_hands: 1,
                ..Default::default()
            }
        );
        assert_eq!(ee.updates, 0);
    });
}

#[test]
fn persists_only_when_stored_value_differs() {
    setup!(shadow, kb, ee, {
        ee.keymap = 0x22;
        let mut snap = RuntimeSnapshot::default();
        snap.keymap_config_raw = 0x22;
        snap.debug_config_raw = 1;
        snap.layers.default_layer_state = 1;

        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(kb.keymap_config, 0x22);
        assert_eq!(kb.debug_config, 1);
        assert_eq!(kb.default_layer_state, 1);
        // keymap and default layer already stored; only debug written
        assert_eq!(ee.updates, 1);
        assert_eq!(ee.debug, 1);

        snap.layers.default_layer_state = 2;
        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(ee.updates, 2);
        assert_eq!(ee.default_layer, 2);
    });
}

#[test]
fn audio_and_unicode_persisted() {
    setup!(shadow, kb, ee, {
        let mut snap = RuntimeSnapshot::default();
        snap.audio.enable = true;
        snap.audio.clicky_freq = 1000.0;
        snap.unicode_mode = 3;

        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(kb.audio, snap.audio);
        assert_eq!(ee.audio, 1);
        assert_eq!(kb.unicode_mode, 3);
        assert_eq!(ee.unicode_mode, 3);

        // frequency alone is not a switch change
        snap.audio.clicky_freq = 500.0;
        apply(&mut shadow, snap, &mut kb, &mut ee);
        assert_eq!(kb.calls.set_audio, 1);
    });
}

#[test]
fn config_overwrite_and_persist() {
    setup!(_shadow, kb, ee, {
        let mut local = UserConfig::blank();
        let incoming = UserConfig::default();

        assert!(apply_config(&mut local, incoming, &mut kb, &mut ee));
        assert_eq!(local, incoming);
        assert_eq!(ee.user, incoming.to_bytes());
        assert_eq!(ee.updates, 1);
        assert_eq!(kb.calls.reinit_display, 0);

        assert!(!apply_config(&mut local, incoming, &mut kb, &mut ee));
        assert_eq!(ee.updates, 1);

        let mut rotated = incoming;
        rotated.display.rotation = Rotation::R90;
        assert!(apply_config(&mut local, rotated, &mut kb, &mut ee));
        assert_eq!(kb.calls.reinit_display, 1);
        assert_eq!(kb.display.map(|d| d.rotation), Some(Rotation::R90));
        assert_eq!(ee.updates, 2);
    });
}

#[test]
fn first_snapshot_overrides_local_values() {
    setup!(shadow, kb, ee, {
        kb.keymap_config = 0x10;
        kb.debug_config = 1;
        kb.layer_state = 0b100;
        kb.wpm = 50;
        ee.keymap = 0x10;
        ee.debug = 1;
        ee.default_layer = 4;

        let snap = RuntimeSnapshot::default();
        apply(&mut shadow, snap, &mut kb, &mut ee);
        apply(&mut shadow, snap, &mut kb, &mut ee);

        assert_eq!(kb.keymap_config, 0);
        assert_eq!(kb.debug_config, 0);
        assert_eq!(kb.layer_state, 0);
        assert_eq!(kb.default_layer_state, 0);
        assert_eq!(kb.wpm, 0);
        assert_eq!((ee.keymap, ee.debug, ee.default_layer), (0, 0, 0));
        assert_eq!(kb.calls.set_keymap_config, 1);
        // not suspended, so nothing to wake from
        assert_eq!((kb.calls.suspend, kb.calls.wakeup), (0, 0));
    });
}
