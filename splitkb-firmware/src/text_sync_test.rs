extern crate std;

use splitkb_common::mods::MOD_BIT_RSHIFT;

use super::*;

#[test]
fn autocorrect_truncates_long_words() {
    let text = AutocorrectText::new("teh", "a-very-long-correction-word");
    assert_eq!(text.typo(), "teh");
    assert_eq!(text.correction(), "a-very-long-correctio");
    assert_eq!(text.correction().len(), AUTOCORRECT_LEN);
    assert!(!text.is_empty());
    assert!(AutocorrectText::default().is_empty());
}

#[test]
fn autocorrect_truncates_on_char_boundary() {
    let fits = std::format!("{}é", "a".repeat(19));
    assert_eq!(AutocorrectText::new(&fits, "").typo(), fits);

    let too_long = std::format!("{}é", "a".repeat(20));
    assert_eq!(AutocorrectText::new(&too_long, "").typo(), "a".repeat(20));
}

#[test]
fn autocorrect_wire_fields() {
    let text = AutocorrectText::new("recieve", "receive");
    let bytes = text.to_bytes();
    assert_eq!(&bytes[..7], b"recieve");
    assert_eq!(bytes[7], 0);
    assert_eq!(&bytes[21..28], b"receive");
    assert_eq!(AutocorrectText::from_bytes(&bytes), Some(text));

    let mut garbage = bytes;
    garbage[0] = 0xff;
    assert_eq!(AutocorrectText::from_bytes(&garbage).unwrap().typo(), "");
}

#[test]
fn keylog_rolls() {
    let mut log = Keylog::default();
    assert_eq!(log.as_str().trim(), "");
    for g in b"hello" {
        log.push(*g);
    }
    assert!(log.as_str().ends_with("hello"));
    assert_eq!(log.as_str().len(), KEYLOG_LEN);

    for _ in 0..KEYLOG_LEN {
        log.push(b'x');
    }
    assert!(!log.as_str().contains('h'));

    log.push(0x07);
    assert!(log.as_str().ends_with("x?"));
}

#[test]
fn keylog_keycodes() {
    let mut log = Keylog::default();
    log.push_keycode(0x0b, 0); // h
    log.push_keycode(0x04, MOD_BIT_RSHIFT); // A
    log.push_keycode(0x1e, 0); // 1
    log.push_keycode(0x1f, MOD_BIT_RSHIFT); // @
    log.push_keycode(0x2c, 0);
    log.push_keycode(0xe1, 0); // modifiers have no glyph
    assert!(log.as_str().ends_with("hA1@_"));

    let decoded = Keylog::from_bytes(&log.to_bytes()).unwrap();
    assert_eq!(decoded, log);
}
