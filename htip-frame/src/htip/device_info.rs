//! HTIP device information (subtype 1).
//!
//! The content is an information identifier followed by a length-prefixed
//! value, except for the vendor extension, which carries its own layout:
//!
//! ```notrust
//! +--------+--------+------------------+
//! | InfoId | Length | Data             |
//! +--------+--------+------------------+
//!
//! +--------+------------------+------+--------+------------------+
//! | 255    | Organization (6) | Type | Length | Data             |
//! +--------+------------------+------+--------+------------------+
//! ```

use htip_macros::frame;

use super::{open_htip, HtipSubtype};
use crate::buffer::FrameBuffer;
use crate::{Error, Result};

/// Values above this are clamped for percentage fields.
pub const MAX_PERCENTAGE: u8 = 100;

/// Device information identifier.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum DeviceInfoId {
    /// Device category.
    DeviceCategory,
    /// Manufacturer code, 6 bytes.
    ManufacturerCode,
    /// Model name.
    ModelName,
    /// Model number.
    ModelNumber,
    /// Channel use state, in percent.
    ChannelUseState,
    /// Signal strength, in percent.
    SignalStrength,
    /// Communication error rate, in percent.
    CommunicationError,
    /// Status string.
    Status,
    /// LLDPDU send interval, in seconds.
    SendInterval,
    /// Vendor specific extension.
    VendorExtension,
    /// Unknown identifier.
    Unknown(u8),
}

impl From<u8> for DeviceInfoId {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::DeviceCategory,
            2 => Self::ManufacturerCode,
            3 => Self::ModelName,
            4 => Self::ModelNumber,
            20 => Self::ChannelUseState,
            21 => Self::SignalStrength,
            22 => Self::CommunicationError,
            50 => Self::Status,
            80 => Self::SendInterval,
            255 => Self::VendorExtension,
            value => Self::Unknown(value),
        }
    }
}

impl From<DeviceInfoId> for u8 {
    fn from(value: DeviceInfoId) -> Self {
        match value {
            DeviceInfoId::DeviceCategory => 1,
            DeviceInfoId::ManufacturerCode => 2,
            DeviceInfoId::ModelName => 3,
            DeviceInfoId::ModelNumber => 4,
            DeviceInfoId::ChannelUseState => 20,
            DeviceInfoId::SignalStrength => 21,
            DeviceInfoId::CommunicationError => 22,
            DeviceInfoId::Status => 50,
            DeviceInfoId::SendInterval => 80,
            DeviceInfoId::VendorExtension => 255,
            DeviceInfoId::Unknown(value) => value,
        }
    }
}

/// A reader for the content of a device information TLV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInformation<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> DeviceInformation<T> {
    /// Create a new [`DeviceInformation`] reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedPayload`] if the content is shorter than its
    /// length byte says, or if a vendor extension is incomplete.
    pub fn new(buffer: T) -> Result<Self> {
        let info = Self::new_unchecked(buffer);

        if !info.check_len() {
            return Err(Error::TruncatedPayload);
        }

        Ok(info)
    }

    fn check_len(&self) -> bool {
        let b = self.buffer.as_ref();

        if b.len() < 2 {
            return false;
        }

        match self.info_id() {
            DeviceInfoId::VendorExtension => VendorExtension::new(&b[1..])
                .map(|ext| ext.value().is_some())
                .unwrap_or(false),
            _ => b.len() >= 2 + b[1] as usize,
        }
    }

    /// Create a new [`DeviceInformation`] reader without length checking.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// Return the [`DeviceInfoId`].
    pub fn info_id(&self) -> DeviceInfoId {
        DeviceInfoId::from(self.buffer.as_ref()[0])
    }

    /// Return the length-prefixed value.
    ///
    /// For a vendor extension this is the whole extension record, see
    /// [`DeviceInformation::vendor_extension`].
    pub fn data(&self) -> &[u8] {
        let b = self.buffer.as_ref();
        match self.info_id() {
            DeviceInfoId::VendorExtension => &b[1..],
            _ => &b[2..][..b[1] as usize],
        }
    }

    /// Return the vendor extension reader, if this is one.
    pub fn vendor_extension(&self) -> Option<VendorExtension<&[u8]>> {
        match self.info_id() {
            DeviceInfoId::VendorExtension => {
                Some(VendorExtension::new_unchecked(&self.buffer.as_ref()[1..]))
            }
            _ => None,
        }
    }
}

/// Reader for a vendor extension record.
#[frame]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorExtension {
    /// Return the organization code.
    #[bytes(6)]
    org_code: &[u8],
    /// Return the vendor defined information type.
    info_type: u8,
    /// Return the length of the vendor data.
    length: u8,
    /// Return the bytes following the length field.
    #[bytes(0)]
    tail: &[u8],
}

impl<T: AsRef<[u8]>> VendorExtension<T> {
    /// Return the vendor data, `None` if the record is shorter than its
    /// length field.
    pub fn value(&self) -> Option<&[u8]> {
        self.tail().get(..self.length() as usize)
    }
}

/// A high-level representation of a vendor extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct VendorExtensionRepr<'a> {
    /// The organization code.
    pub org_code: [u8; 6],
    /// The vendor defined information type.
    pub info_type: u8,
    /// The vendor data.
    pub data: &'a [u8],
}

/// A high-level representation of a device information field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum DeviceInfoRepr<'a> {
    /// Device category.
    DeviceCategory(&'a [u8]),
    /// Manufacturer code.
    ManufacturerCode([u8; 6]),
    /// Model name.
    ModelName(&'a [u8]),
    /// Model number.
    ModelNumber(&'a [u8]),
    /// Channel use state, clamped to 100 when written.
    ChannelUseState(u8),
    /// Signal strength, clamped to 100 when written.
    SignalStrength(u8),
    /// Communication error rate, clamped to 100 when written.
    CommunicationError(u8),
    /// Status string.
    Status(&'a [u8]),
    /// Send interval in seconds.
    SendInterval(u16),
    /// Vendor extension.
    VendorExtension(VendorExtensionRepr<'a>),
}

impl<'a> DeviceInfoRepr<'a> {
    /// Parse a device information reader.
    ///
    /// Returns `Ok(None)` for identifiers that are not decoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedExtension`] when a fixed-width field has the
    /// wrong length.
    pub fn parse(info: &DeviceInformation<&'a [u8]>) -> Result<Option<Self>> {
        let b: &'a [u8] = info.buffer;
        let data: &'a [u8] = match info.info_id() {
            DeviceInfoId::VendorExtension => &b[1..],
            _ => &b[2..][..b[1] as usize],
        };

        let one_byte = || match data {
            [value] => Ok(*value),
            _ => Err(Error::MalformedExtension),
        };

        Ok(Some(match info.info_id() {
            DeviceInfoId::DeviceCategory => Self::DeviceCategory(data),
            DeviceInfoId::ManufacturerCode => Self::ManufacturerCode(
                data.try_into().map_err(|_| Error::MalformedExtension)?,
            ),
            DeviceInfoId::ModelName => Self::ModelName(data),
            DeviceInfoId::ModelNumber => Self::ModelNumber(data),
            DeviceInfoId::ChannelUseState => Self::ChannelUseState(one_byte()?),
            DeviceInfoId::SignalStrength => Self::SignalStrength(one_byte()?),
            DeviceInfoId::CommunicationError => Self::CommunicationError(one_byte()?),
            DeviceInfoId::Status => Self::Status(data),
            DeviceInfoId::SendInterval => match *data {
                [b0, b1] => Self::SendInterval(u16::from_be_bytes([b0, b1])),
                _ => return Err(Error::MalformedExtension),
            },
            DeviceInfoId::VendorExtension => {
                let ext = VendorExtension::new(data)?;
                let value = data[VendorExtension::<&[u8]>::size()..]
                    .get(..ext.length() as usize)
                    .ok_or(Error::TruncatedPayload)?;
                let mut org_code = [0u8; 6];
                org_code.copy_from_slice(ext.org_code());
                Self::VendorExtension(VendorExtensionRepr {
                    org_code,
                    info_type: ext.info_type(),
                    data: value,
                })
            }
            DeviceInfoId::Unknown(_) => return Ok(None),
        }))
    }

    /// Return the [`DeviceInfoId`] of this field.
    pub fn info_id(&self) -> DeviceInfoId {
        match self {
            Self::DeviceCategory(_) => DeviceInfoId::DeviceCategory,
            Self::ManufacturerCode(_) => DeviceInfoId::ManufacturerCode,
            Self::ModelName(_) => DeviceInfoId::ModelName,
            Self::ModelNumber(_) => DeviceInfoId::ModelNumber,
            Self::ChannelUseState(_) => DeviceInfoId::ChannelUseState,
            Self::SignalStrength(_) => DeviceInfoId::SignalStrength,
            Self::CommunicationError(_) => DeviceInfoId::CommunicationError,
            Self::Status(_) => DeviceInfoId::Status,
            Self::SendInterval(_) => DeviceInfoId::SendInterval,
            Self::VendorExtension(_) => DeviceInfoId::VendorExtension,
        }
    }

    /// Return the length of the whole TLV, header included.
    pub fn buffer_len(&self) -> usize {
        // header, OUI, subtype, info id
        let fixed = 2 + 3 + 1 + 1;
        fixed
            + match self {
                Self::DeviceCategory(data)
                | Self::ModelName(data)
                | Self::ModelNumber(data)
                | Self::Status(data) => 1 + data.len(),
                Self::ManufacturerCode(_) => 1 + 6,
                Self::ChannelUseState(_)
                | Self::SignalStrength(_)
                | Self::CommunicationError(_) => 1 + 1,
                Self::SendInterval(_) => 1 + 2,
                Self::VendorExtension(ext) => 6 + 1 + 1 + ext.data.len(),
            }
    }

    /// Write this field as a device information TLV.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldTooLong`] if a value exceeds 255 bytes, and
    /// [`Error::BufferOverflow`] if the TLV does not fit.
    pub fn emit<const N: usize>(&self, buffer: &mut FrameBuffer<N>) -> Result<()> {
        let variable = match self {
            Self::DeviceCategory(data)
            | Self::ModelName(data)
            | Self::ModelNumber(data)
            | Self::Status(data) => data.len(),
            Self::VendorExtension(ext) => ext.data.len(),
            _ => 0,
        };

        if variable > u8::MAX as usize {
            return Err(Error::FieldTooLong);
        }

        if buffer.remaining() < self.buffer_len() {
            return Err(Error::BufferOverflow);
        }

        let mut tlv = open_htip(buffer, HtipSubtype::DeviceInformation)?;
        tlv.push(self.info_id().into())?;

        match *self {
            Self::DeviceCategory(data)
            | Self::ModelName(data)
            | Self::ModelNumber(data)
            | Self::Status(data) => tlv.push_prefixed(data)?,
            Self::ManufacturerCode(code) => tlv.push_prefixed(&code)?,
            Self::ChannelUseState(value)
            | Self::SignalStrength(value)
            | Self::CommunicationError(value) => {
                tlv.push_prefixed(&[value.min(MAX_PERCENTAGE)])?
            }
            Self::SendInterval(seconds) => tlv.push_prefixed(&seconds.to_be_bytes())?,
            Self::VendorExtension(ext) => {
                tlv.append(&ext.org_code)?;
                tlv.push(ext.info_type)?;
                tlv.push_prefixed(ext.data)?;
            }
        }

        tlv.finalize().map(|_| ())
    }
}
