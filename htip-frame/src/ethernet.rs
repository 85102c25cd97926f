//! Ethernet II header for LLDP frames.

use htip_macros::frame;

use crate::buffer::FrameBuffer;
use crate::Result;

/// Length of an Ethernet II header.
pub const ETHERNET_HEADER_LEN: usize = 14;

/// The LLDP EtherType.
pub const ETHER_TYPE_LLDP: u16 = 0x88cc;

/// The broadcast hardware address.
pub const BROADCAST_ADDRESS: [u8; 6] = [0xff; 6];

/// Ethernet II header reader.
#[frame]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    /// Return the destination hardware address.
    #[bytes(6)]
    dst: &[u8],
    /// Return the source hardware address.
    #[bytes(6)]
    src: &[u8],
    /// Return the EtherType.
    ether_type: u16,
}

impl<T: AsRef<[u8]>> EthernetHeader<T> {
    /// Returns `true` if the EtherType is the LLDP EtherType.
    pub fn is_lldp(&self) -> bool {
        self.ether_type() == ETHER_TYPE_LLDP
    }

    /// Return the bytes following the header.
    pub fn payload(&self) -> &[u8] {
        &self.buffer.as_ref()[ETHERNET_HEADER_LEN..]
    }
}

/// Write an Ethernet header with a broadcast destination, `src` as source
/// address and the LLDP EtherType.
///
/// # Errors
///
/// Returns [`crate::Error::BufferOverflow`] if the header does not fit.
pub fn emit_ethernet_header<const N: usize>(
    buffer: &mut FrameBuffer<N>,
    src: &[u8; 6],
) -> Result<()> {
    if buffer.remaining() < ETHERNET_HEADER_LEN {
        return Err(crate::Error::BufferOverflow);
    }

    buffer.append(&BROADCAST_ADDRESS)?;
    buffer.append(src)?;
    buffer.append(&ETHER_TYPE_LLDP.to_be_bytes())
}
