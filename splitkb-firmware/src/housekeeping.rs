//! The per-tick driver: gather, detect change and send on the master; apply on the slave.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Instant, Ticker};
use embedded_hal::digital::InputPin;
use splitkb_common::rpc::{self, ChannelId};

use crate::{
    applier,
    eeconfig::{self, Eeconfig},
    hooks,
    keyboard::{StateSink, StateSource},
    snapshot::RuntimeSnapshot,
    text_sync::{AutocorrectText, Keylog},
    throttle::{ChangeDetector, SyncOutcome},
    transport::{RpcInbox, RpcReceiver, Transport},
    updater::Updater,
    user_config::UserConfig,
    wire::Packed,
};

const RUNTIME_SIZE: usize = RuntimeSnapshot::SIZE;
const CONFIG_SIZE: usize = UserConfig::SIZE;
const AUTOCORRECT_SIZE: usize = AutocorrectText::SIZE;
const KEYLOG_SIZE: usize = Keylog::SIZE;

/// Which half this is. Decided once at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Connected to the host.
    Master,
    Slave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoleError {
    PinRead,
}

impl Role {
    /// Read the handedness/role pin.
    pub fn from_pin(pin: &mut impl InputPin, master_when_high: bool) -> Result<Self, RoleError> {
        let high = pin.is_high().map_err(|_| RoleError::PinRead)?;
        Ok(if high == master_when_high {
            Self::Master
        } else {
            Self::Slave
        })
    }

    pub fn is_master(&self) -> bool {
        matches!(self, Self::Master)
    }
}

/// What one housekeeping tick did on each channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncReport {
    pub connected: bool,
    pub runtime: SyncOutcome,
    pub config: SyncOutcome,
    pub autocorrect: SyncOutcome,
    pub keylog: SyncOutcome,
}
impl SyncReport {
    fn idle(connected: bool) -> Self {
        Self {
            connected,
            runtime: SyncOutcome::Idle,
            config: SyncOutcome::Idle,
            autocorrect: SyncOutcome::Idle,
            keylog: SyncOutcome::Idle,
        }
    }
}

/// All replicated state for one half, plus the per-channel change detectors.
///
/// On the master this is the source of truth that gets sent; on the slave it is the shadow of
/// whatever the master sent last.
pub struct SplitSync {
    role: Role,
    runtime: RuntimeSnapshot,
    /// Slave only: a snapshot has been applied since boot.
    runtime_applied: bool,
    config: UserConfig,
    autocorrect: AutocorrectText,
    keylog: Keylog,
    updater: Updater,
    runtime_sync: ChangeDetector<RUNTIME_SIZE>,
    config_sync: ChangeDetector<CONFIG_SIZE>,
    autocorrect_sync: ChangeDetector<AUTOCORRECT_SIZE>,
    keylog_sync: ChangeDetector<KEYLOG_SIZE>,
}

impl SplitSync {
    /// Zeroed state; nothing read from storage.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            runtime: RuntimeSnapshot::default(),
            runtime_applied: false,
            config: UserConfig::blank(),
            autocorrect: AutocorrectText::default(),
            keylog: Keylog::default(),
            updater: Updater::new(),
            runtime_sync: ChangeDetector::new(),
            config_sync: ChangeDetector::new(),
            autocorrect_sync: ChangeDetector::new(),
            keylog_sync: ChangeDetector::new(),
        }
    }

    /// Boot-time setup. The master hydrates its [UserConfig] from storage, writing defaults if
    /// storage was never initialized; the slave waits for the first sync.
    pub fn init(role: Role, ee: &mut impl Eeconfig) -> Self {
        let mut sync = Self::new(role);
        if role.is_master() {
            sync.config = match eeconfig::load_user_config(ee) {
                Some(config) => config,
                None => {
                    crate::info!("user config uninitialized; writing defaults");
                    let config = UserConfig::default();
                    eeconfig::save_user_config(ee, &config);
                    config
                }
            };
        }
        sync
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn runtime(&self) -> &RuntimeSnapshot {
        &self.runtime
    }

    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    pub fn autocorrect(&self) -> &AutocorrectText {
        &self.autocorrect
    }

    pub fn keylog(&self) -> &Keylog {
        &self.keylog
    }

    /// Change the user config, persisting it if anything changed. The next master tick sends it.
    pub fn update_config(&mut self, ee: &mut impl Eeconfig, f: impl FnOnce(&mut UserConfig)) {
        let before = self.config.to_bytes();
        f(&mut self.config);
        if before != self.config.to_bytes() {
            eeconfig::save_user_config(ee, &self.config);
        }
    }

    pub fn set_autocorrect(&mut self, typo: &str, correction: &str) {
        self.autocorrect = AutocorrectText::new(typo, correction);
    }

    pub fn log_keycode(&mut self, keycode: u8, mods: u8) {
        self.keylog.push_keycode(keycode, mods);
    }

    /// Run one scan cycle's worth of sync.
    pub fn housekeeping(
        &mut self,
        now: Instant,
        link: &mut impl Transport,
        source: &impl StateSource,
    ) -> SyncReport {
        let report = if !link.is_connected() {
            SyncReport::idle(false)
        } else if self.role.is_master() {
            self.master_tick(now, link, source)
        } else {
            // the slave only applies; that happens as frames arrive
            SyncReport::idle(true)
        };

        hooks::housekeeping(self.role);
        report
    }

    fn master_tick(
        &mut self,
        now: Instant,
        link: &mut impl Transport,
        source: &impl StateSource,
    ) -> SyncReport {
        self.updater.update(source, &mut self.runtime);

        let runtime = self
            .runtime_sync
            .poll(now, &self.runtime.to_bytes(), sender(link, rpc::RUNTIME_STATE));
        let config = self
            .config_sync
            .poll(now, &self.config.to_bytes(), sender(link, rpc::USER_CONFIG));
        let autocorrect = self.autocorrect_sync.poll(
            now,
            &self.autocorrect.to_bytes(),
            sender(link, rpc::AUTOCORRECT_TEXT),
        );
        let keylog = self
            .keylog_sync
            .poll(now, &self.keylog.to_bytes(), sender(link, rpc::KEYLOGGER_TEXT));

        SyncReport {
            connected: true,
            runtime,
            config,
            autocorrect,
            keylog,
        }
    }

    /// Apply one inbound frame. Returns `false` if `id` is not a sync channel.
    ///
    /// Frames whose size does not match the expected layout are dropped.
    pub fn receive(
        &mut self,
        id: ChannelId,
        data: &[u8],
        sink: &mut impl StateSink,
        ee: &mut impl Eeconfig,
    ) -> bool {
        if !rpc::ALL_CHANNELS.contains(&id) {
            return false;
        }
        if self.role.is_master() {
            crate::debug!("master ignoring frame on {}", id);
            return true;
        }

        match id {
            rpc::RUNTIME_STATE => match RuntimeSnapshot::from_bytes(data) {
                Some(snapshot) => {
                    let prev = self.runtime_applied.then_some(&self.runtime);
                    applier::apply_runtime(prev, &snapshot, sink, ee);
                    self.runtime = snapshot;
                    self.runtime_applied = true;
                }
                None => size_mismatch(id, data.len(), RUNTIME_SIZE),
            },
            rpc::USER_CONFIG => match UserConfig::from_bytes(data) {
                Some(config) => {
                    if applier::apply_config(&mut self.config, config, sink, ee) {
                        hooks::config_applied(&self.config);
                    }
                }
                None => size_mismatch(id, data.len(), CONFIG_SIZE),
            },
            rpc::AUTOCORRECT_TEXT => match AutocorrectText::from_bytes(data) {
                Some(text) => self.autocorrect = text,
                None => size_mismatch(id, data.len(), AUTOCORRECT_SIZE),
            },
            _ => match Keylog::from_bytes(data) {
                Some(log) => self.keylog = log,
                None => size_mismatch(id, data.len(), KEYLOG_SIZE),
            },
        }
        true
    }

    /// Borrow this state as an [RpcReceiver] bound to the local subsystems.
    pub fn receiver<'a, K: StateSink, E: Eeconfig>(
        &'a mut self,
        sink: &'a mut K,
        ee: &'a mut E,
    ) -> Receiver<'a, K, E> {
        Receiver {
            sync: self,
            sink,
            ee,
        }
    }
}

fn sender<'l>(link: &'l mut impl Transport, id: ChannelId) -> impl FnOnce(&[u8]) -> bool + 'l {
    move |data: &[u8]| {
        let ok = link.send(id, data);
        if !ok {
            crate::debug!("send failed on {}", id);
        }
        ok
    }
}

fn size_mismatch(id: ChannelId, got: usize, want: usize) {
    crate::debug!("dropping frame on {}: {} bytes, expected {}", id, got, want);
}

pub struct Receiver<'a, K: StateSink, E: Eeconfig> {
    sync: &'a mut SplitSync,
    sink: &'a mut K,
    ee: &'a mut E,
}

impl<K: StateSink, E: Eeconfig> RpcReceiver for Receiver<'_, K, E> {
    fn receive(&mut self, id: ChannelId, data: &[u8]) -> bool {
        self.sync.receive(id, data, self.sink, self.ee)
    }
}

/// Drive `sync` forever: a housekeeping tick every `period`, and inbound frames applied as they
/// arrive.
pub async fn run<L, K, E, M, const N: usize>(
    sync: &mut SplitSync,
    link: &mut L,
    keyboard: &mut K,
    ee: &mut E,
    inbox: &RpcInbox<M, N>,
    period: Duration,
) -> !
where
    L: Transport,
    K: StateSource + StateSink,
    E: Eeconfig,
    M: RawMutex,
{
    crate::info!("split sync running as {:?}", sync.role());
    let mut ticker = Ticker::every(period);
    loop {
        match select(ticker.next(), inbox.receive()).await {
            Either::First(()) => {
                sync.housekeeping(Instant::now(), link, &*keyboard);
            }
            Either::Second(frame) => {
                sync.receive(frame.id, frame.payload(), keyboard, ee);
            }
        }
    }
}

#[cfg(test)]
#[path = "housekeeping_test.rs"]
mod test;
