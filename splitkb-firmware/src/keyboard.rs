//! The keyboard subsystems the sync layer reads from and writes to.
//!
//! These are implemented by the board: they own mods, layers, audio and the rest, the sync layer
//! only moves their values between halves.

use crate::{
    snapshot::{AudioState, Internals, MenuState, ModState},
    user_config::DisplayConfig,
};

/// Live state the master gathers into the runtime snapshot each tick.
pub trait StateSource {
    fn mods(&self) -> ModState;
    fn layer_state(&self) -> u32;
    fn default_layer_state(&self) -> u32;
    fn host_leds(&self) -> u8;
    fn wpm(&self) -> u8;
    fn keymap_config_raw(&self) -> u16;
    fn debug_config_raw(&self) -> u8;
    fn audio(&self) -> AudioState;
    fn unicode_mode(&self) -> u8;
    fn internals(&self) -> Internals;
    fn menu_state(&self) -> MenuState;
    fn menu_dirty(&self) -> bool;
    fn menu_has_rendered(&self) -> bool;
}

/// Local subsystems the slave pushes received state into.
///
/// The getters report the subsystem's live value so that toggles are only issued when the
/// incoming value really differs.
pub trait StateSink {
    fn suspend_power_down(&mut self);
    fn suspend_wakeup(&mut self);

    fn audio(&self) -> AudioState;
    fn set_audio(&mut self, audio: &AudioState);

    fn unicode_mode(&self) -> u8;
    fn set_unicode_mode(&mut self, mode: u8);

    fn auto_mouse_toggled(&self) -> bool;
    /// The auto-mouse feature only offers a toggle.
    fn toggle_auto_mouse(&mut self);

    fn set_swap_hands(&mut self, swapped: bool);

    fn caps_word(&self) -> bool;
    fn toggle_caps_word(&mut self);

    fn set_mods(&mut self, mods: &ModState);
    fn set_layer_state(&mut self, state: u32);
    fn set_default_layer_state(&mut self, state: u32);
    fn set_host_leds(&mut self, leds: u8);
    fn set_wpm(&mut self, wpm: u8);
    fn set_keymap_config_raw(&mut self, raw: u16);
    fn set_debug_config_raw(&mut self, raw: u8);

    /// Run display initialization again, e.g. after a rotation change.
    fn reinit_display(&mut self, display: &DisplayConfig);
}
