//! HTIP extended connectivity information (subtype 4).
//!
//! ```notrust
//! +---------+------+--------+--------+-----------+
//! | PortLen | Port | MacLen | MacNum | PerHostNr |
//! +---------+------+--------+--------+-----------+
//!   MacNum times:
//!   +-----+----------+----------+----------+----------+----------------+
//!   | MAC | SigFlag  | [Signal] | ErrFlag  | [Error]  | [Vendor rec.]  |
//!   +-----+----------+----------+----------+----------+----------------+
//! +-----------+-----------+------------+----------+---------+----------------+
//! | PerPortNr | PairedNum | Paired MAC | ChanNum  | Channel | [Vendor rec.]  |
//! +-----------+-----------+------------+----------+---------+----------------+
//! ```
//!
//! A vendor record (`length + bytes`) follows each host when more than two
//! per-host fields are declared, and follows the channel block when more than
//! two per-port fields are declared. Its content is not interpreted.

use super::device_info::MAX_PERCENTAGE;
use super::{open_htip, Cursor, HtipSubtype, VarUint};
use crate::buffer::FrameBuffer;
use crate::{Error, Result};

/// Number of per-host and per-port fields with a known meaning.
const KNOWN_INFO_FIELDS: u8 = 2;

/// A reader for an extended connectivity record.
///
/// Every field is bounds checked against the content length; a record that
/// runs past it is rejected by [`ExtendedConnectivity::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedConnectivity<T: AsRef<[u8]>> {
    buffer: T,
}

#[derive(Debug, Clone, Copy, Default)]
struct Layout<'a> {
    port: &'a [u8],
    mac_length: u8,
    host_count: u8,
    per_host: u8,
    hosts: &'a [u8],
    per_port: u8,
    paired_count: u8,
    paired: &'a [u8],
    channel: &'a [u8],
    vendor: Option<&'a [u8]>,
    consumed: usize,
}

fn vendor_record<'a>(cursor: &mut Cursor<'a>) -> Result<Option<&'a [u8]>> {
    let record = cursor.prefixed()?;
    Ok((!record.is_empty()).then_some(record))
}

fn read_host<'a>(cursor: &mut Cursor<'a>, mac_length: u8, per_host: u8) -> Result<HostInfo<'a>> {
    let mac = cursor.take(mac_length as usize)?;

    let mut optional = || -> Result<Option<u8>> {
        match cursor.u8()? {
            0 => Ok(None),
            _ => Ok(Some(cursor.u8()?)),
        }
    };
    let signal_strength = optional()?;
    let error_rate = optional()?;

    let vendor_info = if per_host > KNOWN_INFO_FIELDS {
        vendor_record(cursor)?
    } else {
        None
    };

    Ok(HostInfo {
        mac,
        signal_strength,
        error_rate,
        vendor_info,
    })
}

impl<T: AsRef<[u8]>> ExtendedConnectivity<T> {
    /// Create a new [`ExtendedConnectivity`] reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedExtension`] if any field would be read past
    /// the end of the content.
    pub fn new(buffer: T) -> Result<Self> {
        let record = Self::new_unchecked(buffer);
        record.layout()?;
        Ok(record)
    }

    /// Create a new [`ExtendedConnectivity`] reader without validation.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    fn layout(&self) -> Result<Layout<'_>> {
        let mut cursor = Cursor::new(self.buffer.as_ref());

        let port = cursor.prefixed()?;
        let mac_length = cursor.u8()?;
        let host_count = cursor.u8()?;
        let per_host = cursor.u8()?;

        let hosts_start = cursor.position();
        for _ in 0..host_count {
            read_host(&mut cursor, mac_length, per_host)?;
        }
        let hosts = &self.buffer.as_ref()[hosts_start..cursor.position()];

        let per_port = cursor.u8()?;
        let paired_count = cursor.u8()?;
        let paired = cursor.take(paired_count as usize * mac_length as usize)?;
        let channel = cursor.prefixed()?;

        let vendor = if per_port > KNOWN_INFO_FIELDS {
            vendor_record(&mut cursor)?
        } else {
            None
        };

        Ok(Layout {
            port,
            mac_length,
            host_count,
            per_host,
            hosts,
            per_port,
            paired_count,
            paired,
            channel,
            vendor,
            consumed: cursor.position(),
        })
    }

    fn fields(&self) -> Layout<'_> {
        self.layout().unwrap_or_default()
    }

    /// Return the port number.
    pub fn port_number(&self) -> VarUint<'_> {
        VarUint::parse(self.fields().port)
    }

    /// Return the width of every MAC identifier in this record.
    pub fn mac_length(&self) -> u8 {
        self.fields().mac_length
    }

    /// Return the number of hosts.
    pub fn host_count(&self) -> u8 {
        self.fields().host_count
    }

    /// Return the declared number of per-host fields.
    pub fn per_host_info_count(&self) -> u8 {
        self.fields().per_host
    }

    /// Return an [`Iterator`] over the hosts.
    pub fn hosts(&self) -> HostIterator<'_> {
        let layout = self.fields();
        HostIterator {
            cursor: Cursor::new(layout.hosts),
            mac_length: layout.mac_length,
            per_host: layout.per_host,
            remaining: layout.host_count,
        }
    }

    /// Return the declared number of per-port fields.
    pub fn per_port_info_count(&self) -> u8 {
        self.fields().per_port
    }

    /// Return an [`Iterator`] over the paired MAC identifiers.
    pub fn paired_macs(&self) -> core::slice::ChunksExact<'_, u8> {
        let layout = self.fields();
        layout
            .paired
            .chunks_exact((layout.mac_length as usize).max(1))
    }

    /// Return the number of paired MAC identifiers.
    pub fn paired_count(&self) -> u8 {
        self.fields().paired_count
    }

    /// Return the channel usage bytes.
    pub fn channel_usage(&self) -> &[u8] {
        self.fields().channel
    }

    /// Return the per-port vendor record.
    pub fn port_vendor_info(&self) -> Option<&[u8]> {
        self.fields().vendor
    }

    /// Return the number of bytes described by the record. Trailing bytes
    /// after it are tolerated.
    pub fn record_len(&self) -> usize {
        self.fields().consumed
    }
}

/// One host of an extended connectivity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostInfo<'f> {
    /// The MAC identifier.
    pub mac: &'f [u8],
    /// Signal strength in percent.
    pub signal_strength: Option<u8>,
    /// Error rate in percent.
    pub error_rate: Option<u8>,
    /// The vendor record, if more than two fields are declared per host.
    pub vendor_info: Option<&'f [u8]>,
}

/// An [`Iterator`] over the hosts of an [`ExtendedConnectivity`] record.
#[derive(Debug, Clone)]
pub struct HostIterator<'f> {
    cursor: Cursor<'f>,
    mac_length: u8,
    per_host: u8,
    remaining: u8,
}

impl<'f> Iterator for HostIterator<'f> {
    type Item = HostInfo<'f>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        match read_host(&mut self.cursor, self.mac_length, self.per_host) {
            Ok(host) => Some(host),
            Err(_) => {
                self.remaining = 0;
                None
            }
        }
    }
}

/// A host written into an extended connectivity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostInfoRepr<'a> {
    /// The MAC identifier, exactly `mac_length` bytes.
    pub mac: &'a [u8],
    /// Signal strength in percent. Values above 100 are written as absent.
    pub signal_strength: Option<u8>,
    /// Error rate in percent. Values above 100 are written as absent.
    pub error_rate: Option<u8>,
    /// Vendor record, written when more than two per-host fields are
    /// declared.
    pub vendor_info: Option<&'a [u8]>,
}

/// A high-level representation of an extended connectivity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedConnectivityRepr<'a> {
    /// Port number.
    pub port_number: VarUint<'a>,
    /// Width of every MAC identifier.
    pub mac_length: u8,
    /// Declared number of per-host fields.
    pub per_host_info_count: u8,
    /// The hosts.
    pub hosts: &'a [HostInfoRepr<'a>],
    /// Declared number of per-port fields.
    pub per_port_info_count: u8,
    /// MAC identifiers paired with the port.
    pub paired_macs: &'a [&'a [u8]],
    /// Channel usage bytes.
    pub channel_usage: &'a [u8],
    /// Vendor record, written when more than two per-port fields are
    /// declared.
    pub port_vendor_info: Option<&'a [u8]>,
}

fn percentage(value: Option<u8>) -> Option<u8> {
    value.filter(|v| *v <= MAX_PERCENTAGE)
}

impl ExtendedConnectivityRepr<'_> {
    fn check(&self) -> Result<()> {
        let max = u8::MAX as usize;
        let mac_length = self.mac_length as usize;

        if self.port_number.width() > max
            || self.hosts.len() > max
            || self.paired_macs.len() > max
            || self.channel_usage.len() > max
            || self.port_vendor_info.map_or(0, <[u8]>::len) > max
        {
            return Err(Error::FieldTooLong);
        }

        for host in self.hosts {
            if host.mac.len() != mac_length || host.vendor_info.map_or(0, <[u8]>::len) > max {
                return Err(Error::FieldTooLong);
            }
        }

        if self.paired_macs.iter().any(|mac| mac.len() != mac_length) {
            return Err(Error::FieldTooLong);
        }

        Ok(())
    }

    /// Return the length of the whole TLV, header included.
    pub fn buffer_len(&self) -> usize {
        let mut len = 2 + 4;
        len += 1 + self.port_number.width();
        len += 3;

        for host in self.hosts {
            len += host.mac.len();
            len += 1 + percentage(host.signal_strength).map_or(0, |_| 1);
            len += 1 + percentage(host.error_rate).map_or(0, |_| 1);
            if self.per_host_info_count > KNOWN_INFO_FIELDS {
                len += 1 + host.vendor_info.map_or(0, <[u8]>::len);
            }
        }

        len += 2 + self.paired_macs.iter().map(|mac| mac.len()).sum::<usize>();
        len += 1 + self.channel_usage.len();

        if self.per_port_info_count > KNOWN_INFO_FIELDS {
            len += 1 + self.port_vendor_info.map_or(0, <[u8]>::len);
        }

        len
    }

    /// Write this record as an extended connectivity TLV.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldTooLong`] if a count or length exceeds 255 or a
    /// MAC identifier is not `mac_length` bytes wide, and
    /// [`Error::BufferOverflow`] if the TLV does not fit.
    pub fn emit<const N: usize>(&self, buffer: &mut FrameBuffer<N>) -> Result<()> {
        self.check()?;

        if buffer.remaining() < self.buffer_len() {
            return Err(Error::BufferOverflow);
        }

        let mut tlv = open_htip(buffer, HtipSubtype::ExtendedConnectivity)?;

        self.port_number.emit(&mut tlv)?;
        tlv.push(self.mac_length)?;
        tlv.push(self.hosts.len() as u8)?;
        tlv.push(self.per_host_info_count)?;

        for host in self.hosts {
            tlv.append(host.mac)?;

            for value in [host.signal_strength, host.error_rate] {
                match percentage(value) {
                    Some(value) => tlv.append(&[1, value])?,
                    None => tlv.push(0)?,
                }
            }

            if self.per_host_info_count > KNOWN_INFO_FIELDS {
                tlv.push_prefixed(host.vendor_info.unwrap_or_default())?;
            }
        }

        tlv.push(self.per_port_info_count)?;
        tlv.push(self.paired_macs.len() as u8)?;
        for mac in self.paired_macs {
            tlv.append(mac)?;
        }

        tlv.push_prefixed(self.channel_usage)?;

        if self.per_port_info_count > KNOWN_INFO_FIELDS {
            tlv.push_prefixed(self.port_vendor_info.unwrap_or_default())?;
        }

        tlv.finalize().map(|_| ())
    }
}
