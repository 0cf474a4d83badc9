//! Modifier and host LED bit layouts as they appear in the runtime snapshot.

pub const MOD_BIT_LCTRL: u8 = 0x01;
pub const MOD_BIT_LSHIFT: u8 = 0x02;
pub const MOD_BIT_LALT: u8 = 0x04;
pub const MOD_BIT_LGUI: u8 = 0x08;
pub const MOD_BIT_RCTRL: u8 = 0x10;
pub const MOD_BIT_RSHIFT: u8 = 0x20;
pub const MOD_BIT_RALT: u8 = 0x40;
pub const MOD_BIT_RGUI: u8 = 0x80;

pub const MOD_MASK_SHIFT: u8 = MOD_BIT_LSHIFT | MOD_BIT_RSHIFT;

pub mod led {
    pub const NUM_LOCK: u8 = 0x01;
    pub const CAPS_LOCK: u8 = 0x02;
    pub const SCROLL_LOCK: u8 = 0x04;
    pub const COMPOSE: u8 = 0x08;
    pub const KANA: u8 = 0x10;
}
