use crate::{
    keyboard::StateSource,
    snapshot::{LayerState, MenuRuntime, RuntimeSnapshot},
};

/// Master side: gathers live state into the runtime snapshot.
#[derive(Default)]
pub struct Updater {
    last_dirty: bool,
}

impl Updater {
    pub const fn new() -> Self {
        Self { last_dirty: false }
    }

    /// Re-read every field of `snapshot` from its owning subsystem.
    ///
    /// The menu dirty flag is held for one extra tick after it clears so the slave sees the
    /// transition.
    pub fn update(&mut self, source: &impl StateSource, snapshot: &mut RuntimeSnapshot) {
        snapshot.mods = source.mods();
        snapshot.layers = LayerState {
            layer_state: source.layer_state(),
            default_layer_state: source.default_layer_state(),
        };
        snapshot.leds = source.host_leds();
        snapshot.wpm_count = source.wpm();
        snapshot.keymap_config_raw = source.keymap_config_raw();
        snapshot.debug_config_raw = source.debug_config_raw();
        snapshot.audio = source.audio();
        snapshot.unicode_mode = source.unicode_mode();
        snapshot.internals = source.internals();

        let dirty = source.menu_dirty();
        snapshot.display.menu = source.menu_state();
        snapshot.display.runtime = MenuRuntime {
            dirty: dirty || self.last_dirty,
            has_rendered: source.menu_has_rendered(),
        };
        self.last_dirty = dirty;
    }
}

#[cfg(test)]
#[path = "updater_test.rs"]
mod test;
