//! HTIP organizationally specific TLVs.
//!
//! ```notrust
//! +------+--------+-------------+---------+----------------+
//! | Type | Length | OUI         | Subtype | Content...     |
//! | 127  |        | E0 27 1A    |         |                |
//! +------+--------+-------------+---------+----------------+
//! ```

use htip_macros::frame;

use crate::buffer::FrameBuffer;
use crate::tlv::{TlvType, TlvWriter};
use crate::{Error, Result};

mod device_info;
pub use device_info::*;

mod forwarding;
pub use forwarding::*;

mod connectivity;
pub use connectivity::*;

/// The TTC OUI that starts every HTIP TLV.
pub const TTC_OUI: [u8; 3] = [0xe0, 0x27, 0x1a];

/// HTIP subtype, the fourth byte of an HTIP TLV.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum HtipSubtype {
    /// Device information.
    DeviceInformation,
    /// MAC forwarding table.
    MacForwarding,
    /// Ether bridge MAC addresses.
    EtherBridgeMacs,
    /// Extended connectivity information.
    ExtendedConnectivity,
    /// Extended MAC list.
    ExtendedMacList,
    /// Unknown subtype.
    Unknown(u8),
}

impl From<u8> for HtipSubtype {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::DeviceInformation,
            2 => Self::MacForwarding,
            3 => Self::EtherBridgeMacs,
            4 => Self::ExtendedConnectivity,
            5 => Self::ExtendedMacList,
            value => Self::Unknown(value),
        }
    }
}

impl From<HtipSubtype> for u8 {
    fn from(value: HtipSubtype) -> Self {
        match value {
            HtipSubtype::DeviceInformation => 1,
            HtipSubtype::MacForwarding => 2,
            HtipSubtype::EtherBridgeMacs => 3,
            HtipSubtype::ExtendedConnectivity => 4,
            HtipSubtype::ExtendedMacList => 5,
            HtipSubtype::Unknown(value) => value,
        }
    }
}

/// Reader for the value of an organizationally specific TLV.
#[frame]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganizationSpecific {
    /// Return the OUI.
    #[bytes(3)]
    oui: u32,
    /// Return the raw subtype.
    subtype: u8,
    /// Return the content following the subtype.
    #[bytes(0)]
    content: &[u8],
}

impl<T: AsRef<[u8]>> OrganizationSpecific<T> {
    /// Returns `true` if the OUI is [`TTC_OUI`].
    pub fn is_htip(&self) -> bool {
        self.buffer.as_ref()[..3] == TTC_OUI
    }

    /// Return the [`HtipSubtype`].
    pub fn htip_subtype(&self) -> HtipSubtype {
        HtipSubtype::from(self.subtype())
    }
}

/// Open a type 127 TLV and write the TTC OUI and `subtype`.
pub(crate) fn open_htip<const N: usize>(
    buffer: &mut FrameBuffer<N>,
    subtype: HtipSubtype,
) -> Result<TlvWriter<'_, N>> {
    let mut tlv = buffer.open_tlv(TlvType::OrganizationSpecific)?;
    tlv.append(&TTC_OUI)?;
    tlv.push(subtype.into())?;
    Ok(tlv)
}

/// A length-prefixed unsigned integer.
///
/// Widths 1, 2 and 4 are big-endian integers. Any other width is kept as raw
/// bytes without numeric interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarUint<'a> {
    /// One byte.
    U8(u8),
    /// Two bytes, big-endian.
    U16(u16),
    /// Four bytes, big-endian.
    U32(u32),
    /// Any other width.
    Raw(&'a [u8]),
}

impl<'a> VarUint<'a> {
    /// Interpret `bytes` using the width rule.
    pub fn parse(bytes: &'a [u8]) -> Self {
        match *bytes {
            [b] => Self::U8(b),
            [b0, b1] => Self::U16(u16::from_be_bytes([b0, b1])),
            [b0, b1, b2, b3] => Self::U32(u32::from_be_bytes([b0, b1, b2, b3])),
            _ => Self::Raw(bytes),
        }
    }

    /// Return the encoded width in bytes.
    pub fn width(&self) -> usize {
        match self {
            Self::U8(_) => 1,
            Self::U16(_) => 2,
            Self::U32(_) => 4,
            Self::Raw(bytes) => bytes.len(),
        }
    }

    /// Return the numeric value, `None` for raw bytes.
    pub fn value(&self) -> Option<u32> {
        match *self {
            Self::U8(v) => Some(v as u32),
            Self::U16(v) => Some(v as u32),
            Self::U32(v) => Some(v),
            Self::Raw(_) => None,
        }
    }

    /// Write the width byte followed by the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldTooLong`] for raw values longer than 255 bytes.
    pub fn emit<const N: usize>(&self, tlv: &mut TlvWriter<'_, N>) -> Result<()> {
        match *self {
            Self::U8(v) => tlv.push_prefixed(&[v]),
            Self::U16(v) => tlv.push_prefixed(&v.to_be_bytes()),
            Self::U32(v) => tlv.push_prefixed(&v.to_be_bytes()),
            Self::Raw(bytes) => tlv.push_prefixed(bytes),
        }
    }
}

impl core::fmt::Display for VarUint<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{value}"),
            None => {
                if let Self::Raw(bytes) = self {
                    for b in bytes.iter() {
                        write!(f, "{b:02x}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// A bounds-checked read cursor over an extension payload.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::MalformedExtension)?;
        if end > self.data.len() {
            return Err(Error::MalformedExtension);
        }

        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Read a length byte and that many bytes.
    pub(crate) fn prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.u8()?;
        self.take(len as usize)
    }
}
