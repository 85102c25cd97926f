//! MAC address lists: MAC forwarding table (subtype 2), ether bridge MACs
//! (subtype 3) and the extended MAC list (subtype 5).

use super::{open_htip, Cursor, HtipSubtype, VarUint};
use crate::buffer::FrameBuffer;
use crate::{Error, Result};

/// Length of a MAC address.
pub const MAC_LEN: usize = 6;

/// An [`Iterator`] over packed 6-byte MAC addresses.
#[derive(Debug, Clone)]
pub struct MacIterator<'f> {
    chunks: core::slice::ChunksExact<'f, u8>,
}

impl<'f> MacIterator<'f> {
    fn new(data: &'f [u8]) -> Self {
        Self {
            chunks: data.chunks_exact(MAC_LEN),
        }
    }
}

impl<'f> Iterator for MacIterator<'f> {
    type Item = &'f [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }
}

/// A reader for one MAC forwarding table entry.
///
/// ```notrust
/// +-------+---------+---------+-------------+-------+---------------+
/// | IfLen | IfType  | PortLen | Port number | Count | MACs (6 each) |
/// +-------+---------+---------+-------------+-------+---------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacForwarding<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> MacForwarding<T> {
    /// Create a new [`MacForwarding`] reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedExtension`] if a field runs past the end of
    /// the content.
    pub fn new(buffer: T) -> Result<Self> {
        let entry = Self::new_unchecked(buffer);
        entry.layout()?;
        Ok(entry)
    }

    /// Create a new [`MacForwarding`] reader without checking the layout.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// Return the interface type, port number and MAC block.
    fn layout(&self) -> Result<(&[u8], &[u8], &[u8])> {
        let mut cursor = Cursor::new(self.buffer.as_ref());
        let if_type = cursor.prefixed()?;
        let port = cursor.prefixed()?;
        let count = cursor.u8()? as usize;
        let macs = cursor.take(count * MAC_LEN)?;
        Ok((if_type, port, macs))
    }

    fn fields(&self) -> (&[u8], &[u8], &[u8]) {
        let empty: &[u8] = &[];
        self.layout().unwrap_or((empty, empty, empty))
    }

    /// Return the interface type.
    pub fn interface_type(&self) -> VarUint<'_> {
        VarUint::parse(self.fields().0)
    }

    /// Return the port number.
    pub fn port_number(&self) -> VarUint<'_> {
        VarUint::parse(self.fields().1)
    }

    /// Return the number of MAC addresses.
    pub fn mac_count(&self) -> usize {
        self.fields().2.len() / MAC_LEN
    }

    /// Return an [`Iterator`] over the MAC addresses.
    pub fn macs(&self) -> MacIterator<'_> {
        MacIterator::new(self.fields().2)
    }

    /// Return the number of bytes used by this entry.
    pub fn entry_len(&self) -> usize {
        let (if_type, port, macs) = self.fields();
        3 + if_type.len() + port.len() + macs.len()
    }
}

/// A high-level representation of a MAC forwarding table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacForwardingRepr<'a> {
    /// Interface type, usually an IANA ifType.
    pub interface_type: VarUint<'a>,
    /// Port number.
    pub port_number: VarUint<'a>,
    /// The MAC addresses learned on the port.
    pub macs: &'a [[u8; 6]],
}

impl MacForwardingRepr<'_> {
    /// Return the length of the whole TLV, header included.
    pub fn buffer_len(&self) -> usize {
        2 + 4 + 1 + self.interface_type.width() + 1 + self.port_number.width() + 1
            + self.macs.len() * MAC_LEN
    }

    /// Write this entry as a MAC forwarding TLV.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldTooLong`] if a width or the MAC count exceeds
    /// 255, and [`Error::BufferOverflow`] if the TLV does not fit.
    pub fn emit<const N: usize>(&self, buffer: &mut FrameBuffer<N>) -> Result<()> {
        let count = u8::try_from(self.macs.len()).map_err(|_| Error::FieldTooLong)?;
        if self.interface_type.width() > u8::MAX as usize
            || self.port_number.width() > u8::MAX as usize
        {
            return Err(Error::FieldTooLong);
        }

        if buffer.remaining() < self.buffer_len() {
            return Err(Error::BufferOverflow);
        }

        let mut tlv = open_htip(buffer, HtipSubtype::MacForwarding)?;
        self.interface_type.emit(&mut tlv)?;
        self.port_number.emit(&mut tlv)?;
        tlv.push(count)?;
        for mac in self.macs {
            tlv.append(mac)?;
        }
        tlv.finalize().map(|_| ())
    }
}

/// A reader for the ether bridge MAC list.
///
/// ```notrust
/// +-------+---------------+
/// | Count | MACs (6 each) |
/// +-------+---------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtherBridgeMacs<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> EtherBridgeMacs<T> {
    /// Create a new [`EtherBridgeMacs`] reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedExtension`] if the content is shorter than
    /// the count says.
    pub fn new(buffer: T) -> Result<Self> {
        let list = Self::new_unchecked(buffer);

        let b = list.buffer.as_ref();
        if b.is_empty() || b.len() < 1 + b[0] as usize * MAC_LEN {
            return Err(Error::MalformedExtension);
        }

        Ok(list)
    }

    /// Create a new [`EtherBridgeMacs`] reader without length checking.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// Return the number of MAC addresses.
    pub fn count(&self) -> usize {
        self.buffer.as_ref()[0] as usize
    }

    /// Return an [`Iterator`] over the MAC addresses.
    pub fn macs(&self) -> MacIterator<'_> {
        MacIterator::new(&self.buffer.as_ref()[1..][..self.count() * MAC_LEN])
    }
}

/// Write an ether bridge MAC list TLV.
///
/// # Errors
///
/// Returns [`Error::FieldTooLong`] for more than 255 addresses, and
/// [`Error::BufferOverflow`] if the TLV does not fit.
pub fn emit_ether_bridge_macs<const N: usize>(
    buffer: &mut FrameBuffer<N>,
    macs: &[[u8; 6]],
) -> Result<()> {
    let count = u8::try_from(macs.len()).map_err(|_| Error::FieldTooLong)?;
    if buffer.remaining() < 2 + 4 + 1 + macs.len() * MAC_LEN {
        return Err(Error::BufferOverflow);
    }

    let mut tlv = open_htip(buffer, HtipSubtype::EtherBridgeMacs)?;
    tlv.push(count)?;
    for mac in macs {
        tlv.append(mac)?;
    }
    tlv.finalize().map(|_| ())
}

/// A reader for the extended MAC list, whose entries may have any length.
///
/// ```notrust
/// +-------+-----+-----------+-----+-----------+-----+
/// | Count | Len | Entry ... | Len | Entry ... | ... |
/// +-------+-----+-----------+-----+-----------+-----+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedMacList<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> ExtendedMacList<T> {
    /// Create a new [`ExtendedMacList`] reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedExtension`] if an entry runs past the end of
    /// the content.
    pub fn new(buffer: T) -> Result<Self> {
        let list = Self::new_unchecked(buffer);

        let mut cursor = Cursor::new(list.buffer.as_ref());
        for _ in 0..cursor.u8()? {
            cursor.prefixed()?;
        }

        Ok(list)
    }

    /// Create a new [`ExtendedMacList`] reader without checking the entries.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// Return the declared number of entries.
    pub fn count(&self) -> usize {
        self.buffer.as_ref()[0] as usize
    }

    /// Return the width of the first entry, `None` for an empty list.
    pub fn first_width(&self) -> Option<usize> {
        self.entries().next().map(<[u8]>::len)
    }

    /// Return an [`Iterator`] over the entries.
    pub fn entries(&self) -> ExtendedMacIterator<'_> {
        let b = self.buffer.as_ref();
        ExtendedMacIterator {
            cursor: Cursor::new(&b[1..]),
            remaining: b[0],
        }
    }
}

/// An [`Iterator`] over the entries of an [`ExtendedMacList`].
#[derive(Debug, Clone)]
pub struct ExtendedMacIterator<'f> {
    cursor: Cursor<'f>,
    remaining: u8,
}

impl<'f> Iterator for ExtendedMacIterator<'f> {
    type Item = &'f [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        match self.cursor.prefixed() {
            Ok(entry) => Some(entry),
            Err(_) => {
                self.remaining = 0;
                None
            }
        }
    }
}

/// Write an extended MAC list TLV.
///
/// # Errors
///
/// Returns [`Error::FieldTooLong`] for more than 255 entries or an entry
/// longer than 255 bytes, and [`Error::BufferOverflow`] if the TLV does not
/// fit.
pub fn emit_extended_mac_list<const N: usize>(
    buffer: &mut FrameBuffer<N>,
    entries: &[&[u8]],
) -> Result<()> {
    let count = u8::try_from(entries.len()).map_err(|_| Error::FieldTooLong)?;
    if entries.iter().any(|entry| entry.len() > u8::MAX as usize) {
        return Err(Error::FieldTooLong);
    }

    let len = entries.iter().map(|entry| 1 + entry.len()).sum::<usize>();
    if buffer.remaining() < 2 + 4 + 1 + len {
        return Err(Error::BufferOverflow);
    }

    let mut tlv = open_htip(buffer, HtipSubtype::ExtendedMacList)?;
    tlv.push(count)?;
    for entry in entries {
        tlv.push_prefixed(entry)?;
    }
    tlv.finalize().map(|_| ())
}
