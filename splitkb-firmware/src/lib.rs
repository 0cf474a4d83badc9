#![no_std]
pub mod applier;
pub mod eeconfig;
pub mod hooks;
pub mod housekeeping;
pub mod keyboard;
pub mod pointing;
pub mod snapshot;
pub mod text_sync;
pub mod throttle;
pub mod transport;
pub mod updater;
pub mod user_config;
pub mod wire;

#[cfg(any(test, feature = "test-utils"))]
pub mod flash_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod keyboard_test_stub;

#[macro_use]
mod macros;
