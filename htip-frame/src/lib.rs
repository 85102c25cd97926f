//! Zero-copy read and write structures for LLDP frames carrying HTIP
//! extensions.
//!
//! HTIP (Home-network Topology Identifying Protocol, TTC JJ-300.00) rides on
//! top of LLDP. Every HTIP field is carried in an organizationally specific
//! TLV (type 127) that starts with the TTC OUI `E0:27:1A` followed by an HTIP
//! subtype.
//!
//! ## Writing a frame
//!
//! Frames are written incrementally into a [`FrameBuffer`]. Each TLV is opened
//! with [`FrameBuffer::open_tlv`], which reserves the two header bytes and
//! returns a [`TlvWriter`]. The header is patched with the packed type and
//! length when the writer is finalized, or when it is dropped.
//!
//! ```
//! # use htip_frame::*;
//! let mut frame = FrameBuffer::new();
//! emit_ethernet_header(&mut frame, &[0x02, 0, 0, 0, 0, 0x01]).unwrap();
//! emit_chassis_id(&mut frame, ChassisIdSubtype::MacAddress, &[0x02, 0, 0, 0, 0, 0x01]).unwrap();
//! emit_port_id(&mut frame, PortIdSubtype::InterfaceAlias, b"eth0").unwrap();
//! emit_ttl(&mut frame, 120).unwrap();
//! DeviceInfoRepr::DeviceCategory(b"router").emit(&mut frame).unwrap();
//! emit_end_of_lldpdu(&mut frame).unwrap();
//!
//! let report = Report::parse(frame.as_bytes());
//! assert!(report.is_well_formed());
//! assert_eq!(report.ttl(), Some(120));
//! ```
//!
//! ## Reading a frame
//!
//! [`Report::parse`] copies the received bytes, walks the TLVs and records
//! where every known field lives. Parsing never fails: a frame that does not
//! end with the End Of LLDPDU TLV, or that contains a malformed TLV, yields a
//! report whose [`Report::is_well_formed`] returns `false`. Fields decoded
//! before the failure stay available.
//!
//! The low-level readers ([`Tlv`], [`OrganizationSpecific`],
//! [`DeviceInformation`], [`MacForwarding`], [`ExtendedConnectivity`], ...)
//! can be used directly on any buffer.
//!
//! ## Projections
//!
//! [`Report`] implements [`core::fmt::Display`] as a human readable report,
//! and [`Report::json`] returns the JSON interchange projection.
#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(test)]
mod tests;

mod buffer;
pub use buffer::FrameBuffer;

mod tlv;
pub use tlv::*;

mod ethernet;
pub use ethernet::*;

mod lldp;
pub use lldp::*;

mod htip;
pub use htip::*;

mod report;
pub use report::*;

mod display;
pub use display::Json;

/// The Ethernet MTU, which is also the capacity of a [`FrameBuffer`].
pub const MTU: usize = 1500;

/// The largest captured frame a [`Report`] keeps: one MTU plus the Ethernet
/// header.
pub const MAX_FRAME_LEN: usize = MTU + ETHERNET_HEADER_LEN;

/// The maximum number of MAC forwarding entries kept by a [`Report`].
pub const MAX_PORTS: usize = 64;

/// An error that can occur when reading or writing an LLDP/HTIP frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A write would exceed the capacity of the frame buffer.
    BufferOverflow,
    /// A TLV writer was used after it was finalized.
    InvalidHandle,
    /// Fewer than two bytes are left where a TLV header is expected.
    TruncatedHeader,
    /// The buffer is shorter than the length a field declares.
    TruncatedPayload,
    /// The TLV type is not part of the dispatch table.
    UnknownType,
    /// An HTIP extension is inconsistent with its own length, or misses a
    /// required field.
    MalformedExtension,
    /// A value does not fit its one-byte length prefix, or a MAC identifier
    /// does not match the declared width.
    FieldTooLong,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BufferOverflow => write!(f, "buffer overflow"),
            Error::InvalidHandle => write!(f, "tlv writer already finalized"),
            Error::TruncatedHeader => write!(f, "truncated tlv header"),
            Error::TruncatedPayload => write!(f, "truncated payload"),
            Error::UnknownType => write!(f, "unknown tlv type"),
            Error::MalformedExtension => write!(f, "malformed htip extension"),
            Error::FieldTooLong => write!(f, "field too long"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A type alias for `Result<T, htip_frame::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
