//! Slave side: pushes received state into local subsystems.
//!
//! Side effects only run for values that changed. Values backed by a toggle-only API (caps word,
//! auto mouse) and values owned by a local subsystem (audio, unicode) are compared against the
//! live subsystem; the rest are compared against the previously applied snapshot.

use core::mem;

use crate::{
    eeconfig::{self, Eeconfig},
    keyboard::StateSink,
    snapshot::RuntimeSnapshot,
    user_config::UserConfig,
};

/// Whether `field` differs between `prev` and `next`. Everything differs from no previous frame.
fn changed<T: PartialEq>(
    prev: Option<&RuntimeSnapshot>,
    next: &RuntimeSnapshot,
    field: impl Fn(&RuntimeSnapshot) -> T,
) -> bool {
    prev.map_or(true, |p| field(p) != field(next))
}

/// Apply what changed from `prev` to `next`.
///
/// `prev` is the last snapshot applied, or `None` before the first one. In that case every field
/// is pushed so the slave adopts the master's values even where they match the zero default.
pub fn apply_runtime(
    prev: Option<&RuntimeSnapshot>,
    next: &RuntimeSnapshot,
    sink: &mut impl StateSink,
    ee: &mut impl Eeconfig,
) {
    let was_suspended = prev.is_some_and(|p| p.internals.is_device_suspended);
    if next.internals.is_device_suspended != was_suspended {
        if next.internals.is_device_suspended {
            sink.suspend_power_down();
        } else {
            sink.suspend_wakeup();
        }
    }

    if !StateSink::audio(&*sink).same_switches(&next.audio) {
        sink.set_audio(&next.audio);
        let raw = next.audio.raw();
        if ee.read_audio() != raw {
            ee.update_audio(raw);
        }
    }

    if StateSink::unicode_mode(&*sink) != next.unicode_mode {
        sink.set_unicode_mode(next.unicode_mode);
        if ee.read_unicode_mode() != next.unicode_mode {
            ee.update_unicode_mode(next.unicode_mode);
        }
    }

    if sink.auto_mouse_toggled() != next.internals.auto_mouse_toggled {
        sink.toggle_auto_mouse();
    }

    if changed(prev, next, |s| s.internals.swap_hands) {
        sink.set_swap_hands(next.internals.swap_hands);
    }

    if sink.caps_word() != next.internals.is_caps_word {
        sink.toggle_caps_word();
    }

    if changed(prev, next, |s| s.mods) {
        sink.set_mods(&next.mods);
    }

    if changed(prev, next, |s| s.layers.layer_state) {
        sink.set_layer_state(next.layers.layer_state);
    }
    if changed(prev, next, |s| s.layers.default_layer_state) {
        sink.set_default_layer_state(next.layers.default_layer_state);
        if ee.read_default_layer() != next.layers.default_layer_state {
            ee.update_default_layer(next.layers.default_layer_state);
        }
    }

    if changed(prev, next, |s| s.leds) {
        sink.set_host_leds(next.leds);
    }

    if changed(prev, next, |s| s.wpm_count) {
        sink.set_wpm(next.wpm_count);
    }

    if changed(prev, next, |s| s.keymap_config_raw) {
        sink.set_keymap_config_raw(next.keymap_config_raw);
        if ee.read_keymap() != next.keymap_config_raw {
            ee.update_keymap(next.keymap_config_raw);
        }
    }

    if changed(prev, next, |s| s.debug_config_raw) {
        sink.set_debug_config_raw(next.debug_config_raw);
        if ee.read_debug() != next.debug_config_raw {
            ee.update_debug(next.debug_config_raw);
        }
    }
}

/// Replace `local` with `incoming` if they differ at all, persisting the result.
///
/// Returns whether anything changed.
pub fn apply_config(
    local: &mut UserConfig,
    incoming: UserConfig,
    sink: &mut impl StateSink,
    ee: &mut impl Eeconfig,
) -> bool {
    if local.to_bytes() == incoming.to_bytes() {
        return false;
    }

    let prev = mem::replace(local, incoming);
    eeconfig::save_user_config(ee, local);

    if prev.display.needs_reinit(&local.display) {
        sink.reinit_display(&local.display);
    }
    true
}

#[cfg(test)]
#[path = "applier_test.rs"]
mod test;
