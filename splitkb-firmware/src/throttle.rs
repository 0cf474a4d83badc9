use embassy_time::{Duration, Instant};
use splitkb_common::rpc::THROTTLE_MS;

pub const THROTTLE: Duration = Duration::from_millis(THROTTLE_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncOutcome {
    /// Nothing changed and the last send is still fresh.
    Idle,
    Sent,
    /// A send was due but the link refused it.
    Failed,
}

/// Decides when one channel's value has to go over the link again.
///
/// A value is resent when its packed bytes differ from the last value handed to the link, or when
/// more than [THROTTLE] has passed since the last successful send.
pub struct ChangeDetector<const N: usize> {
    cached: [u8; N],
    last_send: Option<Instant>,
}

impl<const N: usize> Default for ChangeDetector<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ChangeDetector<N> {
    pub const fn new() -> Self {
        Self {
            cached: [0; N],
            last_send: None,
        }
    }

    pub fn needs_sync(&self, now: Instant, current: &[u8; N]) -> bool {
        if self.cached != *current {
            return true;
        }
        match self.last_send {
            None => true,
            Some(at) => now.checked_duration_since(at).unwrap_or(Duration::MIN) > THROTTLE,
        }
    }

    /// Run one evaluation, calling `send` if a sync is due.
    ///
    /// The cache takes `current` before the result of `send` is known, so a failed send is not
    /// retried until the throttle ceiling passes.
    pub fn poll(
        &mut self,
        now: Instant,
        current: &[u8; N],
        send: impl FnOnce(&[u8]) -> bool,
    ) -> SyncOutcome {
        if !self.needs_sync(now, current) {
            return SyncOutcome::Idle;
        }

        self.cached = *current;
        if send(current) {
            self.last_send = Some(now);
            SyncOutcome::Sent
        } else {
            SyncOutcome::Failed
        }
    }

    pub fn cached(&self) -> &[u8; N] {
        &self.cached
    }

    pub fn last_send(&self) -> Option<Instant> {
        self.last_send
    }
}

#[cfg(test)]
#[path = "throttle_test.rs"]
mod test;
