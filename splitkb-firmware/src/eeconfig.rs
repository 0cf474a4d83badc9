//! Non-volatile configuration storage.
//!
//! [Eeconfig] is the narrow persistence surface the sync layer uses: a few per-subsystem values
//! plus one opaque user datablock holding the packed [crate::user_config::UserConfig].
//! [FlashEeconfig] stores all of it in a single erase block of a [NorFlash].

use embedded_storage::nor_flash::{self, NorFlash, ReadNorFlash};

use crate::{user_config::UserConfig, wire::Packed};

pub trait Eeconfig {
    fn read_keymap(&self) -> u16;
    fn update_keymap(&mut self, raw: u16);

    fn read_debug(&self) -> u8;
    fn update_debug(&mut self, raw: u8);

    fn read_default_layer(&self) -> u32;
    fn update_default_layer(&mut self, state: u32);

    fn read_audio(&self) -> u8;
    fn update_audio(&mut self, raw: u8);

    fn read_unicode_mode(&self) -> u8;
    fn update_unicode_mode(&mut self, mode: u8);

    fn read_user_datablock(&self, buf: &mut [u8]);
    fn update_user_datablock(&mut self, data: &[u8]);
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EeconfigError {
    NotAligned,
    OutOfBounds,
    Unknown,
}

fn map_flash_error(err: impl nor_flash::NorFlashError) -> EeconfigError {
    match err.kind() {
        nor_flash::NorFlashErrorKind::NotAligned => EeconfigError::NotAligned,
        nor_flash::NorFlashErrorKind::OutOfBounds => EeconfigError::OutOfBounds,
        _ => EeconfigError::Unknown,
    }
}

const MAGIC: [u8; 2] = 0xfeedu16.to_le_bytes();

const MAGIC_AT: usize = 0;
const KEYMAP_AT: usize = 2;
const DEBUG_AT: usize = 4;
const DEFAULT_LAYER_AT: usize = 5;
const AUDIO_AT: usize = 9;
const UNICODE_AT: usize = 10;
const USER_AT: usize = 11;
const USER_END: usize = USER_AT + UserConfig::SIZE;

/// Bytes of flash the block occupies.
pub const EECONFIG_SIZE: usize = 64;

const _: () = assert!(USER_END <= EECONFIG_SIZE);

const fn assert_geometry<const BASE: u32>(erase_size: usize, write_size: usize) -> usize {
    assert!(erase_size >= EECONFIG_SIZE);
    assert!(BASE as usize % erase_size == 0);
    assert!(EECONFIG_SIZE % write_size == 0);
    erase_size
}

/// [Eeconfig] kept in one erase block starting at `BASE`.
///
/// A RAM mirror answers every read. Updates that do not change the mirror never touch flash;
/// anything else erases the block and writes the mirror back.
///
/// Every effective update costs one erase cycle of the whole block (4 KiB on RP2040 flash), so
/// callers should only update values the user changed on purpose: keymap, debug and default layer
/// changes, or a new user config. Per-tick state such as layer state or mods must not land here.
pub struct FlashEeconfig<'d, F: NorFlash, const BASE: u32> {
    flash: &'d mut F,
    mirror: [u8; EECONFIG_SIZE],
}

impl<'d, F: NorFlash, const BASE: u32> FlashEeconfig<'d, F, BASE> {
    const ERASE_SIZE: usize = assert_geometry::<BASE>(F::ERASE_SIZE, F::WRITE_SIZE);

    /// Load the block, formatting it with defaults when it was never written by this firmware.
    pub fn new(flash: &'d mut F) -> Result<Self, EeconfigError> {
        let mut ee = Self {
            flash,
            mirror: [0; EECONFIG_SIZE],
        };
        ee.flash
            .read(BASE, &mut ee.mirror)
            .map_err(map_flash_error)?;

        if ee.mirror[MAGIC_AT..KEYMAP_AT] != MAGIC {
            crate::info!("eeconfig: formatting storage");
            ee.mirror = Self::formatted();
            ee.flush()?;
        }
        Ok(ee)
    }

    fn formatted() -> [u8; EECONFIG_SIZE] {
        let mut mirror = [0; EECONFIG_SIZE];
        mirror[MAGIC_AT..KEYMAP_AT].copy_from_slice(&MAGIC);
        mirror[DEFAULT_LAYER_AT..AUDIO_AT].copy_from_slice(&1u32.to_le_bytes());
        mirror
    }

    /// Wipe everything back to defaults, including the user datablock.
    pub fn reset(&mut self) {
        self.mirror = Self::formatted();
        self.flush_or_warn();
    }

    fn flush(&mut self) -> Result<(), EeconfigError> {
        let end = BASE + Self::ERASE_SIZE as u32;
        self.flash.erase(BASE, end).map_err(map_flash_error)?;
        self.flash
            .write(BASE, &self.mirror)
            .map_err(map_flash_error)
    }

    fn flush_or_warn(&mut self) {
        if let Err(err) = self.flush() {
            crate::warn!("eeconfig: write failed {:?}", err);
        }
    }

    fn update(&mut self, at: usize, data: &[u8]) {
        let slot = &mut self.mirror[at..at + data.len()];
        if *slot != *data {
            slot.copy_from_slice(data);
            self.flush_or_warn();
        }
    }

    fn bytes<const N: usize>(&self, at: usize) -> [u8; N] {
        let mut out = [0; N];
        out.copy_from_slice(&self.mirror[at..at + N]);
        out
    }
}

impl<F: NorFlash, const BASE: u32> Eeconfig for FlashEeconfig<'_, F, BASE> {
    fn read_keymap(&self) -> u16 {
        u16::from_le_bytes(self.bytes(KEYMAP_AT))
    }

    fn update_keymap(&mut self, raw: u16) {
        self.update(KEYMAP_AT, &raw.to_le_bytes());
    }

    fn read_debug(&self) -> u8 {
        self.mirror[DEBUG_AT]
    }

    fn update_debug(&mut self, raw: u8) {
        self.update(DEBUG_AT, &[raw]);
    }

    fn read_default_layer(&self) -> u32 {
        u32::from_le_bytes(self.bytes(DEFAULT_LAYER_AT))
    }

    fn update_default_layer(&mut self, state: u32) {
        self.update(DEFAULT_LAYER_AT, &state.to_le_bytes());
    }

    fn read_audio(&self) -> u8 {
        self.mirror[AUDIO_AT]
    }

    fn update_audio(&mut self, raw: u8) {
        self.update(AUDIO_AT, &[raw]);
    }

    fn read_unicode_mode(&self) -> u8 {
        self.mirror[UNICODE_AT]
    }

    fn update_unicode_mode(&mut self, mode: u8) {
        self.update(UNICODE_AT, &[mode]);
    }

    fn read_user_datablock(&self, buf: &mut [u8]) {
        let len = buf.len().min(USER_END - USER_AT);
        buf[..len].copy_from_slice(&self.mirror[USER_AT..USER_AT + len]);
    }

    fn update_user_datablock(&mut self, data: &[u8]) {
        let len = data.len().min(USER_END - USER_AT);
        self.update(USER_AT, &data[..len]);
    }
}

/// Read the persisted [UserConfig], or `None` if the datablock was never initialized.
pub fn load_user_config(ee: &impl Eeconfig) -> Option<UserConfig> {
    let mut buf = [0; UserConfig::SIZE];
    ee.read_user_datablock(&mut buf);
    UserConfig::from_bytes(&buf).filter(|c| c.is_initialized())
}

pub fn save_user_config(ee: &mut impl Eeconfig, config: &UserConfig) {
    ee.update_user_datablock(&config.to_bytes());
}

#[cfg(test)]
#[path = "eeconfig_test.rs"]
mod test;
