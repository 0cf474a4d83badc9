//! Keymap-level callbacks.
//!
//! A keymap registers these once at startup to run its own code alongside the sync layer.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::CriticalSectionMutex;

use crate::{housekeeping::Role, user_config::UserConfig};

pub type HousekeepingFn = &'static (dyn Fn(Role) + Sync);
pub type ConfigAppliedFn = &'static (dyn Fn(&UserConfig) + Sync);

struct Hooks {
    housekeeping: Option<HousekeepingFn>,
    config_applied: Option<ConfigAppliedFn>,
}

const fn no_hooks() -> Hooks {
    Hooks {
        housekeeping: None,
        config_applied: None,
    }
}

static HOOKS: CriticalSectionMutex<RefCell<Hooks>> =
    CriticalSectionMutex::new(RefCell::new(no_hooks()));

pub(crate) fn housekeeping(role: Role) {
    if let Some(f) = HOOKS.lock(|r| r.borrow().housekeeping) {
        f(role);
    }
}

pub(crate) fn config_applied(config: &UserConfig) {
    if let Some(f) = HOOKS.lock(|r| r.borrow().config_applied) {
        f(config);
    }
}

/// Register a function called on both halves at the end of every housekeeping tick.
///
/// ```
/// use splitkb_firmware::{hooks::handle_housekeeping, housekeeping::Role};
///
/// fn blink_on_slave(role: Role) {
///     if role == Role::Slave {
///         // drive an indicator LED
///     }
/// }
///
/// handle_housekeeping(Some(&blink_on_slave));
/// ```
pub fn handle_housekeeping(value: Option<HousekeepingFn>) {
    HOOKS.lock(|r| r.borrow_mut().housekeeping = value);
}

/// Register a function called on the slave after a new [UserConfig] has been applied.
pub fn handle_config_applied(value: Option<ConfigAppliedFn>) {
    HOOKS.lock(|r| r.borrow_mut().config_applied = value);
}
