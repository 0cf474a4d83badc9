//! The master to slave link: fixed-size framed messages multiplexed by channel id.
//!
//! The link itself belongs to the board. The sync layer only needs [Transport] to send and an
//! [RpcInbox] that the link driver fills with inbound frames.

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel};
use splitkb_common::rpc::{ChannelId, RPC_BUFFER_SIZE};

/// Outbound half of the link.
pub trait Transport {
    /// Whether the other half is currently reachable.
    fn is_connected(&self) -> bool;

    /// Queue one frame. Must not block; returns `false` if the link is busy or down.
    fn send(&mut self, id: ChannelId, payload: &[u8]) -> bool;
}

/// A handler for inbound frames, registered per channel id.
pub trait RpcReceiver {
    /// Handle a frame. Returns `false` when `id` is not a channel this receiver registered.
    fn receive(&mut self, id: ChannelId, data: &[u8]) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    TooLarge,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RpcFrame {
    pub id: ChannelId,
    len: u8,
    data: [u8; RPC_BUFFER_SIZE],
}
impl RpcFrame {
    pub fn new(id: ChannelId, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > RPC_BUFFER_SIZE {
            return Err(FrameError::TooLarge);
        }
        let mut data = [0; RPC_BUFFER_SIZE];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            len: payload.len() as u8,
            data,
        })
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }
}

/// Inbound frames waiting to be applied.
///
/// The link driver posts from its own context; the housekeeping loop drains it.
pub struct RpcInbox<M: RawMutex, const N: usize>(Channel<M, RpcFrame, N>);
impl<M: RawMutex, const N: usize> Default for RpcInbox<M, N> {
    fn default() -> Self {
        Self(Channel::new())
    }
}
impl<M: RawMutex, const N: usize> RpcInbox<M, N> {
    /// Queue an inbound frame. Frames that do not fit, or arrive while the inbox is full, are
    /// dropped.
    pub fn post(&self, id: ChannelId, payload: &[u8]) -> bool {
        match RpcFrame::new(id, payload) {
            Ok(frame) => self.0.try_send(frame).is_ok(),
            Err(err) => {
                crate::debug!("dropping inbound frame {}: {:?}", id, err);
                false
            }
        }
    }

    pub async fn receive(&self) -> RpcFrame {
        self.0.receive().await
    }

    pub fn try_receive(&self) -> Option<RpcFrame> {
        self.0.try_receive().ok()
    }

    /// Hand every queued frame to `receiver`. Returns how many frames a receiver accepted.
    pub fn dispatch(&self, receiver: &mut impl RpcReceiver) -> usize {
        let mut handled = 0;
        while let Some(frame) = self.try_receive() {
            if receiver.receive(frame.id, frame.payload()) {
                handled += 1;
            } else {
                crate::debug!("no receiver for channel {}", frame.id);
            }
        }
        handled
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod test;
