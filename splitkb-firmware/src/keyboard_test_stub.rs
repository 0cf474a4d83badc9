//! Test doubles for the board collaborators: keyboard subsystems, persistence and the link.

extern crate std;

use std::vec::Vec;

use splitkb_common::rpc::ChannelId;

use crate::{
    eeconfig::Eeconfig,
    keyboard::{StateSink, StateSource},
    snapshot::{AudioState, Internals, MenuState, ModState},
    transport::Transport,
    user_config::DisplayConfig,
};

/// How many times each side effect ran.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Calls {
    pub suspend: usize,
    pub wakeup: usize,
    pub set_audio: usize,
    pub set_unicode_mode: usize,
    pub toggle_auto_mouse: usize,
    pub set_swap_hands: usize,
    pub toggle_caps_word: usize,
    pub set_mods: usize,
    pub set_layer_state: usize,
    pub set_default_layer_state: usize,
    pub set_host_leds: usize,
    pub set_wpm: usize,
    pub set_keymap_config: usize,
    pub set_debug_config: usize,
    pub reinit_display: usize,
}

#[derive(Debug, Default, Clone)]
pub struct FakeKeyboard {
    pub mods: ModState,
    pub layer_state: u32,
    pub default_layer_state: u32,
    pub leds: u8,
    pub wpm: u8,
    pub keymap_config: u16,
    pub debug_config: u8,
    pub audio: AudioState,
    pub unicode_mode: u8,
    pub internals: Internals,
    pub menu: MenuState,
    pub menu_dirty: bool,
    pub menu_has_rendered: bool,
    pub display: Option<DisplayConfig>,
    pub calls: Calls,
}

impl StateSource for FakeKeyboard {
    fn mods(&self) -> ModState {
        self.mods
    }

    fn layer_state(&self) -> u32 {
        self.layer_state
    }

    fn default_layer_state(&self) -> u32 {
        self.default_layer_state
    }

    fn host_leds(&self) -> u8 {
        self.leds
    }

    fn wpm(&self) -> u8 {
        self.wpm
    }

    fn keymap_config_raw(&self) -> u16 {
        self.keymap_config
    }

    fn debug_config_raw(&self) -> u8 {
        self.debug_config
    }

    fn audio(&self) -> AudioState {
        self.audio
    }

    fn unicode_mode(&self) -> u8 {
        self.unicode_mode
    }

    fn internals(&self) -> Internals {
        self.internals
    }

    fn menu_state(&self) -> MenuState {
        self.menu
    }

    fn menu_dirty(&self) -> bool {
        self.menu_dirty
    }

    fn menu_has_rendered(&self) -> bool {
        self.menu_has_rendered
    }
}

impl StateSink for FakeKeyboard {
    fn suspend_power_down(&mut self) {
        self.calls.suspend += 1;
        self.internals.is_device_suspended = true;
    }

    fn suspend_wakeup(&mut self) {
        self.calls.wakeup += 1;
        self.internals.is_device_suspended = false;
    }

    fn audio(&self) -> AudioState {
        self.audio
    }

    fn set_audio(&mut self, audio: &AudioState) {
        self.calls.set_audio += 1;
        self.audio = *audio;
    }

    fn unicode_mode(&self) -> u8 {
        self.unicode_mode
    }

    fn set_unicode_mode(&mut self, mode: u8) {
        self.calls.set_unicode_mode += 1;
        self.unicode_mode = mode;
    }

    fn auto_mouse_toggled(&self) -> bool {
        self.internals.auto_mouse_toggled
    }

    fn toggle_auto_mouse(&mut self) {
        self.calls.toggle_auto_mouse += 1;
        self.internals.auto_mouse_toggled = !self.internals.auto_mouse_toggled;
    }

    fn set_swap_hands(&mut self, swapped: bool) {
        self.calls.set_swap_hands += 1;
        self.internals.swap_hands = swapped;
    }

    fn caps_word(&self) -> bool {
        self.internals.is_caps_word
    }

    fn toggle_caps_word(&mut self) {
        self.calls.toggle_caps_word += 1;
        self.internals.is_caps_word = !self.internals.is_caps_word;
    }

    fn set_mods(&mut self, mods: &ModState) {
        self.calls.set_mods += 1;
        self.mods = *mods;
    }

    fn set_layer_state(&mut self, state: u32) {
        self.calls.set_layer_state += 1;
        self.layer_state = state;
    }

    fn set_default_layer_state(&mut self, state: u32) {
        self.calls.set_default_layer_state += 1;
        self.default_layer_state = state;
    }

    fn set_host_leds(&mut self, leds: u8) {
        self.calls.set_host_leds += 1;
        self.leds = leds;
    }

    fn set_wpm(&mut self, wpm: u8) {
        self.calls.set_wpm += 1;
        self.wpm = wpm;
    }

    fn set_keymap_config_raw(&mut self, raw: u16) {
        self.calls.set_keymap_config += 1;
        self.keymap_config = raw;
    }

    fn set_debug_config_raw(&mut self, raw: u8) {
        self.calls.set_debug_config += 1;
        self.debug_config = raw;
    }

    fn reinit_display(&mut self, display: &DisplayConfig) {
        self.calls.reinit_display += 1;
        self.display = Some(*display);
    }
}

/// Persistence double that counts every update call, changed or not.
#[derive(Debug, Default, Clone)]
pub struct FakeEeconfig {
    pub keymap: u16,
    pub debug: u8,
    pub default_layer: u32,
    pub audio: u8,
    pub unicode_mode: u8,
    pub user: Vec<u8>,
    pub updates: usize,
}

impl Eeconfig for FakeEeconfig {
    fn read_keymap(&self) -> u16 {
        self.keymap
    }

    fn update_keymap(&mut self, raw: u16) {
        self.updates += 1;
        self.keymap = raw;
    }

    fn read_debug(&self) -> u8 {
        self.debug
    }

    fn update_debug(&mut self, raw: u8) {
        self.updates += 1;
        self.debug = raw;
    }

    fn read_default_layer(&self) -> u32 {
        self.default_layer
    }

    fn update_default_layer(&mut self, state: u32) {
        self.updates += 1;
        self.default_layer = state;
    }

    fn read_audio(&self) -> u8 {
        self.audio
    }

    fn update_audio(&mut self, raw: u8) {
        self.updates += 1;
        self.audio = raw;
    }

    fn read_unicode_mode(&self) -> u8 {
        self.unicode_mode
    }

    fn update_unicode_mode(&mut self, mode: u8) {
        self.updates += 1;
        self.unicode_mode = mode;
    }

    fn read_user_datablock(&self, buf: &mut [u8]) {
        buf.fill(0);
        let len = buf.len().min(self.user.len());
        buf[..len].copy_from_slice(&self.user[..len]);
    }

    fn update_user_datablock(&mut self, data: &[u8]) {
        self.updates += 1;
        self.user = data.into();
    }
}

/// A link that records every frame it accepts.
#[derive(Debug, Clone)]
pub struct TestLink {
    pub connected: bool,
    /// When false every send fails as if the link were busy.
    pub accept: bool,
    pub attempts: usize,
    pub sent: Vec<(ChannelId, Vec<u8>)>,
}

impl Default for TestLink {
    fn default() -> Self {
        Self {
            connected: true,
            accept: true,
            attempts: 0,
            sent: Vec::new(),
        }
    }
}

impl TestLink {
    pub fn sent_on(&self, id: ChannelId) -> usize {
        self.sent.iter().filter(|(i, _)| *i == id).count()
    }

    pub fn last_on(&self, id: ChannelId) -> Option<&[u8]> {
        self.sent
            .iter()
            .rev()
            .find(|(i, _)| *i == id)
            .map(|(_, d)| d.as_slice())
    }
}

impl Transport for TestLink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn send(&mut self, id: ChannelId, payload: &[u8]) -> bool {
        self.attempts += 1;
        if !self.accept {
            return false;
        }
        self.sent.push((id, payload.into()));
        true
    }
}
