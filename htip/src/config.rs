use core::time::Duration;

use crate::frame::MacForwardingRepr;

mod defaults {
    #![allow(unused)]
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

/// The values an [`Agent`](crate::Agent) puts in every frame it builds.
///
/// [`AgentConfig::default`] uses the values compiled into the crate. Each of
/// them can be changed at build time with an `HTIP_<NAME>` environment
/// variable, for example `HTIP_TTL=120` or `HTIP_MODEL_NAME=gateway`.
#[derive(Debug, Clone)]
pub struct AgentConfig<'a> {
    /// Port Description TLV.
    pub port_description: &'a [u8],
    /// Device category (device information 1).
    pub device_category: &'a [u8],
    /// Manufacturer code (device information 2).
    pub manufacturer_code: [u8; 6],
    /// Model name (device information 3).
    pub model_name: &'a [u8],
    /// Model number (device information 4).
    pub model_number: &'a [u8],
    /// Status (device information 50).
    pub status: &'a [u8],
    /// Channel use state in percent, clamped to 100 on the wire.
    pub channel_use_state: u8,
    /// Signal strength in percent, clamped to 100 on the wire.
    pub signal_strength: u8,
    /// Communication error rate in percent, clamped to 100 on the wire.
    pub communication_error: u8,
    /// Seconds between two announcement rounds.
    pub send_interval: u16,
    /// Time To Live in seconds.
    pub ttl: u16,
    /// Chassis ID to announce instead of the interface hardware address.
    pub chassis_mac: Option<[u8; 6]>,
    /// Number of times a frame is sent per interface and round.
    pub burst: u8,
    /// MAC forwarding entries appended after the device information.
    pub forwarding: &'a [MacForwardingRepr<'a>],
}

impl AgentConfig<'_> {
    /// The time the scheduler waits between two announcement rounds.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.send_interval as u64)
    }
}

impl Default for AgentConfig<'_> {
    fn default() -> Self {
        Self {
            port_description: defaults::PORT_DESCRIPTION.as_bytes(),
            device_category: defaults::DEVICE_CATEGORY.as_bytes(),
            manufacturer_code: defaults::MANUFACTURER_CODE,
            model_name: defaults::MODEL_NAME.as_bytes(),
            model_number: defaults::MODEL_NUMBER.as_bytes(),
            status: defaults::STATUS.as_bytes(),
            channel_use_state: defaults::CHANNEL_USE_STATE,
            signal_strength: defaults::SIGNAL_STRENGTH,
            communication_error: defaults::COMMUNICATION_ERROR,
            send_interval: defaults::SEND_INTERVAL,
            ttl: defaults::TTL,
            chassis_mac: None,
            burst: defaults::BURST,
            forwarding: &[],
        }
    }
}
