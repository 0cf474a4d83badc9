//! Channel identifiers and frame limits for the master to slave link.

/// A numeric identifier multiplexing independent fixed-size message streams over one link.
pub type ChannelId = u8;

/// Largest payload one RPC frame can carry.
pub const RPC_BUFFER_SIZE: usize = 48;

pub const RUNTIME_STATE: ChannelId = 0x10;
pub const USER_CONFIG: ChannelId = 0x11;
pub const AUTOCORRECT_TEXT: ChannelId = 0x12;
pub const KEYLOGGER_TEXT: ChannelId = 0x13;

/// Every channel the sync layer registers, in send order.
pub const ALL_CHANNELS: [ChannelId; 4] =
    [RUNTIME_STATE, USER_CONFIG, AUTOCORRECT_TEXT, KEYLOGGER_TEXT];

/// Throttle ceiling: the longest any channel may go without being resent.
pub const THROTTLE_MS: u64 = 100;

#[cfg(test)]
#[path = "rpc_test.rs"]
mod test;
