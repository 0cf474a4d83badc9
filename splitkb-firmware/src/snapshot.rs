//! Runtime state shared from the master half to the slave half.

use splitkb_common::rpc::RPC_BUFFER_SIZE;

use crate::wire::{Packed, Reader, Writer};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModState {
    pub mods: u8,
    pub weak_mods: u8,
    pub oneshot_mods: u8,
    pub oneshot_locked_mods: u8,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerState {
    pub layer_state: u32,
    pub default_layer_state: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AudioState {
    pub enable: bool,
    pub clicky_enable: bool,
    pub clicky_freq: f32,
    pub clicky_rand: f32,
    pub music_enable: bool,
}
impl AudioState {
    /// The persisted audio byte: enable, clicky and music bits.
    pub fn raw(&self) -> u8 {
        (self.enable as u8) | (self.clicky_enable as u8) << 1 | (self.music_enable as u8) << 2
    }

    pub fn same_switches(&self, other: &AudioState) -> bool {
        self.raw() == other.raw()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Internals {
    pub is_device_suspended: bool,
    pub swap_hands: bool,
    pub is_caps_word: bool,
    pub host_driver_disabled: bool,
    pub tap_toggling: bool,
    pub auto_mouse_toggled: bool,
}

pub const MENU_STACK_DEPTH: usize = 5;

/// Where the on-screen menu currently is. Opaque to the sync layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuState {
    pub is_in_menu: bool,
    pub selected_child: u8,
    pub menu_stack: [u8; MENU_STACK_DEPTH],
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuRuntime {
    pub dirty: bool,
    pub has_rendered: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    pub menu: MenuState,
    pub runtime: MenuRuntime,
}

/// Everything one half needs to know about the other half's live state.
///
/// The master fills this every tick; the slave only ever holds a shadow copy of whatever arrived
/// last.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuntimeSnapshot {
    pub mods: ModState,
    pub layers: LayerState,
    pub leds: u8,
    pub wpm_count: u8,
    pub keymap_config_raw: u16,
    pub debug_config_raw: u8,
    pub audio: AudioState,
    pub unicode_mode: u8,
    pub internals: Internals,
    pub display: DisplayState,
}

impl Packed for RuntimeSnapshot {
    const SIZE: usize = 36;

    fn pack(&self, w: &mut Writer<'_>) {
        let m = &self.mods;
        w.put_bytes(&[m.mods, m.weak_mods, m.oneshot_mods, m.oneshot_locked_mods]);
        w.put_u32(self.layers.layer_state);
        w.put_u32(self.layers.default_layer_state);
        w.put_u8(self.leds);
        w.put_u8(self.wpm_count);
        w.put_u16(self.keymap_config_raw);
        w.put_u8(self.debug_config_raw);

        let a = &self.audio;
        w.put_flags(&[a.enable, a.clicky_enable, a.music_enable]);
        w.put_f32(a.clicky_freq);
        w.put_f32(a.clicky_rand);

        w.put_u8(self.unicode_mode);

        let i = &self.internals;
        w.put_flags(&[
            i.is_device_suspended,
            i.swap_hands,
            i.is_caps_word,
            i.host_driver_disabled,
            i.tap_toggling,
            i.auto_mouse_toggled,
        ]);

        let d = &self.display;
        w.put_flags(&[d.menu.is_in_menu, d.runtime.dirty, d.runtime.has_rendered]);
        w.put_u8(d.menu.selected_child);
        w.put_bytes(&d.menu.menu_stack);
        w.put_u8(0);
    }

    fn unpack(r: &mut Reader<'_>) -> Self {
        let [mods, weak_mods, oneshot_mods, oneshot_locked_mods] = r.array();
        let mods = ModState {
            mods,
            weak_mods,
            oneshot_mods,
            oneshot_locked_mods,
        };
        let layers = LayerState {
            layer_state: r.u32(),
            default_layer_state: r.u32(),
        };
        let leds = r.u8();
        let wpm_count = r.u8();
        let keymap_config_raw = r.u16();
        let debug_config_raw = r.u8();

        let [enable, clicky_enable, music_enable] = r.flags();
        let audio = AudioState {
            enable,
            clicky_enable,
            clicky_freq: r.f32(),
            clicky_rand: r.f32(),
            music_enable,
        };

        let unicode_mode = r.u8();

        let [
            is_device_suspended,
            swap_hands,
            is_caps_word,
            host_driver_disabled,
            tap_toggling,
            auto_mouse_toggled,
        ] = r.flags();
        let internals = Internals {
            is_device_suspended,
            swap_hands,
            is_caps_word,
            host_driver_disabled,
            tap_toggling,
            auto_mouse_toggled,
        };

        let [is_in_menu, dirty, has_rendered] = r.flags();
        let selected_child = r.u8();
        let menu_stack = r.array();
        let _reserved = r.u8();

        Self {
            mods,
            layers,
            leds,
            wpm_count,
            keymap_config_raw,
            debug_config_raw,
            audio,
            unicode_mode,
            internals,
            display: DisplayState {
                menu: MenuState {
                    is_in_menu,
                    selected_child,
                    menu_stack,
                },
                runtime: MenuRuntime {
                    dirty,
                    has_rendered,
                },
            },
        }
    }
}

impl RuntimeSnapshot {
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0; Self::SIZE];
        self.pack_into(&mut buf);
        buf
    }
}

const _: () = assert!(RuntimeSnapshot::SIZE <= RPC_BUFFER_SIZE);

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod test;
