//! Mandatory and basic LLDP TLVs.

use crate::buffer::FrameBuffer;
use crate::tlv::TlvType;
use crate::{Error, Result};

/// Chassis ID subtype.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum ChassisIdSubtype {
    /// Chassis component.
    ChassisComponent,
    /// Interface alias.
    InterfaceAlias,
    /// Port component.
    PortComponent,
    /// MAC address.
    MacAddress,
    /// Network address.
    NetworkAddress,
    /// Interface name.
    InterfaceName,
    /// Locally assigned.
    Local,
    /// Unknown subtype.
    Unknown(u8),
}

impl From<u8> for ChassisIdSubtype {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::ChassisComponent,
            2 => Self::InterfaceAlias,
            3 => Self::PortComponent,
            4 => Self::MacAddress,
            5 => Self::NetworkAddress,
            6 => Self::InterfaceName,
            7 => Self::Local,
            value => Self::Unknown(value),
        }
    }
}

impl From<ChassisIdSubtype> for u8 {
    fn from(value: ChassisIdSubtype) -> Self {
        match value {
            ChassisIdSubtype::ChassisComponent => 1,
            ChassisIdSubtype::InterfaceAlias => 2,
            ChassisIdSubtype::PortComponent => 3,
            ChassisIdSubtype::MacAddress => 4,
            ChassisIdSubtype::NetworkAddress => 5,
            ChassisIdSubtype::InterfaceName => 6,
            ChassisIdSubtype::Local => 7,
            ChassisIdSubtype::Unknown(value) => value,
        }
    }
}

/// Port ID subtype.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum PortIdSubtype {
    /// Interface alias.
    InterfaceAlias,
    /// Port component.
    PortComponent,
    /// MAC address.
    MacAddress,
    /// Network address.
    NetworkAddress,
    /// Interface name.
    InterfaceName,
    /// Agent circuit ID.
    AgentCircuitId,
    /// Locally assigned.
    Local,
    /// Unknown subtype.
    Unknown(u8),
}

impl From<u8> for PortIdSubtype {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::InterfaceAlias,
            2 => Self::PortComponent,
            3 => Self::MacAddress,
            4 => Self::NetworkAddress,
            5 => Self::InterfaceName,
            6 => Self::AgentCircuitId,
            7 => Self::Local,
            value => Self::Unknown(value),
        }
    }
}

impl From<PortIdSubtype> for u8 {
    fn from(value: PortIdSubtype) -> Self {
        match value {
            PortIdSubtype::InterfaceAlias => 1,
            PortIdSubtype::PortComponent => 2,
            PortIdSubtype::MacAddress => 3,
            PortIdSubtype::NetworkAddress => 4,
            PortIdSubtype::InterfaceName => 5,
            PortIdSubtype::AgentCircuitId => 6,
            PortIdSubtype::Local => 7,
            PortIdSubtype::Unknown(value) => value,
        }
    }
}

fn emit_subtyped<const N: usize>(
    buffer: &mut FrameBuffer<N>,
    tlv_type: TlvType,
    subtype: u8,
    id: &[u8],
) -> Result<()> {
    if buffer.remaining() < 2 + 1 + id.len() {
        return Err(Error::BufferOverflow);
    }

    let mut tlv = buffer.open_tlv(tlv_type)?;
    tlv.push(subtype)?;
    tlv.append(id)?;
    tlv.finalize().map(|_| ())
}

/// Write a Chassis ID TLV.
///
/// # Errors
///
/// Returns [`Error::BufferOverflow`] if the TLV does not fit.
pub fn emit_chassis_id<const N: usize>(
    buffer: &mut FrameBuffer<N>,
    subtype: ChassisIdSubtype,
    id: &[u8],
) -> Result<()> {
    emit_subtyped(buffer, TlvType::ChassisId, subtype.into(), id)
}

/// Write a Port ID TLV.
///
/// # Errors
///
/// Returns [`Error::BufferOverflow`] if the TLV does not fit.
pub fn emit_port_id<const N: usize>(
    buffer: &mut FrameBuffer<N>,
    subtype: PortIdSubtype,
    id: &[u8],
) -> Result<()> {
    emit_subtyped(buffer, TlvType::PortId, subtype.into(), id)
}

/// Write a Time To Live TLV, in seconds.
///
/// # Errors
///
/// Returns [`Error::BufferOverflow`] if the TLV does not fit.
pub fn emit_ttl<const N: usize>(buffer: &mut FrameBuffer<N>, seconds: u16) -> Result<()> {
    if buffer.remaining() < 2 + 2 {
        return Err(Error::BufferOverflow);
    }

    let mut tlv = buffer.open_tlv(TlvType::TimeToLive)?;
    tlv.push_u16(seconds)?;
    tlv.finalize().map(|_| ())
}

/// Write a Port Description TLV.
///
/// # Errors
///
/// Returns [`Error::BufferOverflow`] if the TLV does not fit.
pub fn emit_port_description<const N: usize>(
    buffer: &mut FrameBuffer<N>,
    description: &[u8],
) -> Result<()> {
    if buffer.remaining() < 2 + description.len() {
        return Err(Error::BufferOverflow);
    }

    let mut tlv = buffer.open_tlv(TlvType::PortDescription)?;
    tlv.append(description)?;
    tlv.finalize().map(|_| ())
}

/// Write the End Of LLDPDU TLV.
///
/// # Errors
///
/// Returns [`Error::BufferOverflow`] if the TLV does not fit.
pub fn emit_end_of_lldpdu<const N: usize>(buffer: &mut FrameBuffer<N>) -> Result<()> {
    if buffer.remaining() < 2 {
        return Err(Error::BufferOverflow);
    }

    buffer.append(&[0, 0])
}
