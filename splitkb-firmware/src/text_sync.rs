//! Short text shown on the slave's display but produced on the master: the last autocorrection
//! and a rolling log of typed glyphs.

use heapless::String;
use splitkb_common::{mods::MOD_MASK_SHIFT, rpc::RPC_BUFFER_SIZE};

use crate::wire::{Packed, Reader, Writer};

pub const AUTOCORRECT_LEN: usize = 21;
pub const KEYLOG_LEN: usize = 32;

/// The most recent typo and what it was corrected to.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AutocorrectText {
    typo: String<AUTOCORRECT_LEN>,
    correction: String<AUTOCORRECT_LEN>,
}

/// Copy as much of `from` as fits, never splitting a character.
fn truncated(from: &str) -> String<AUTOCORRECT_LEN> {
    let mut s = String::new();
    for ch in from.chars() {
        if s.push(ch).is_err() {
            break;
        }
    }
    s
}

fn put_padded(w: &mut Writer<'_>, s: &str) {
    let mut field = [0; AUTOCORRECT_LEN];
    field[..s.len()].copy_from_slice(s.as_bytes());
    w.put_bytes(&field);
}

fn padded(r: &mut Reader<'_>) -> String<AUTOCORRECT_LEN> {
    let field: [u8; AUTOCORRECT_LEN] = r.array();
    let len = field.iter().position(|b| *b == 0).unwrap_or(AUTOCORRECT_LEN);
    match core::str::from_utf8(&field[..len]) {
        Ok(s) => truncated(s),
        Err(_) => String::new(),
    }
}

impl AutocorrectText {
    pub fn new(typo: &str, correction: &str) -> Self {
        Self {
            typo: truncated(typo),
            correction: truncated(correction),
        }
    }

    pub fn typo(&self) -> &str {
        &self.typo
    }

    pub fn correction(&self) -> &str {
        &self.correction
    }

    pub fn is_empty(&self) -> bool {
        self.typo.is_empty() && self.correction.is_empty()
    }
}

impl Packed for AutocorrectText {
    const SIZE: usize = AUTOCORRECT_LEN * 2;

    fn pack(&self, w: &mut Writer<'_>) {
        put_padded(w, &self.typo);
        put_padded(w, &self.correction);
    }

    fn unpack(r: &mut Reader<'_>) -> Self {
        let typo = padded(r);
        let correction = padded(r);
        Self { typo, correction }
    }
}

/// The last [KEYLOG_LEN] glyphs typed, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keylog {
    line: [u8; KEYLOG_LEN],
}

impl Default for Keylog {
    fn default() -> Self {
        Self {
            line: [b' '; KEYLOG_LEN],
        }
    }
}

impl Keylog {
    /// Append one glyph, dropping the oldest. Non-ASCII glyphs are shown as `?`.
    pub fn push(&mut self, glyph: u8) {
        self.line.rotate_left(1);
        self.line[KEYLOG_LEN - 1] = if glyph.is_ascii_graphic() || glyph == b' ' {
            glyph
        } else {
            b'?'
        };
    }

    /// Log a HID keycode; keys without a glyph are ignored.
    pub fn push_keycode(&mut self, keycode: u8, mods: u8) {
        if let Some(glyph) = glyph_for(keycode, mods & MOD_MASK_SHIFT != 0) {
            self.push(glyph);
        }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.line).unwrap_or("")
    }
}

fn glyph_for(keycode: u8, shifted: bool) -> Option<u8> {
    const DIGITS: &[u8; 10] = b"1234567890";
    const SHIFTED_DIGITS: &[u8; 10] = b"!@#$%^&*()";
    Some(match keycode {
        0x04..=0x1d => {
            let base = if shifted { b'A' } else { b'a' };
            base + keycode - 0x04
        }
        0x1e..=0x27 => {
            let table = if shifted { SHIFTED_DIGITS } else { DIGITS };
            table[(keycode - 0x1e) as usize]
        }
        0x28 => b'^', // enter
        0x2a => b'<', // backspace
        0x2c => b'_', // space
        _ => return None,
    })
}

impl Packed for Keylog {
    const SIZE: usize = KEYLOG_LEN;

    fn pack(&self, w: &mut Writer<'_>) {
        w.put_bytes(&self.line);
    }

    fn unpack(r: &mut Reader<'_>) -> Self {
        let mut log = Self { line: r.array() };
        for b in log.line.iter_mut() {
            if !(b.is_ascii_graphic() || *b == b' ') {
                *b = b'?';
            }
        }
        log
    }
}

impl AutocorrectText {
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0; Self::SIZE];
        self.pack_into(&mut buf);
        buf
    }
}

impl Keylog {
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        self.line
    }
}

const _: () = assert!(AutocorrectText::SIZE <= RPC_BUFFER_SIZE);
const _: () = assert!(Keylog::SIZE <= RPC_BUFFER_SIZE);

#[cfg(test)]
#[path = "text_sync_test.rs"]
mod test;
