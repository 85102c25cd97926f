//! LLDP TLV readers and writers.
//!
//! ```notrust
//! +--------+--------+----------------------------+
//! |  Type  | Length |  Value (0-511 octets)...   |
//! | 7 bits | 9 bits |                            |
//! +--------+--------+----------------------------+
//! ```
//!
//! The header is big-endian; the length counts the value bytes only.

use crate::buffer::FrameBuffer;
use crate::{Error, Result};

const LENGTH_MASK: u16 = 0x01ff;
const TYPE_SHIFT: u16 = 9;

/// LLDP TLV type.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum TlvType {
    /// End Of LLDPDU, terminates the frame.
    EndOfLldpdu,
    /// Chassis ID.
    ChassisId,
    /// Port ID.
    PortId,
    /// Time To Live.
    TimeToLive,
    /// Port Description.
    PortDescription,
    /// Optional LLDP TLVs 5 to 8 (system name, system description, system
    /// capabilities, management address). They are counted, not decoded.
    Reserved(u8),
    /// Organizationally Specific TLV.
    OrganizationSpecific,
    /// Any other type.
    Unknown(u8),
}

impl From<u8> for TlvType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::EndOfLldpdu,
            1 => Self::ChassisId,
            2 => Self::PortId,
            3 => Self::TimeToLive,
            4 => Self::PortDescription,
            5..=8 => Self::Reserved(value),
            127 => Self::OrganizationSpecific,
            value => Self::Unknown(value),
        }
    }
}

impl From<TlvType> for u8 {
    fn from(value: TlvType) -> Self {
        match value {
            TlvType::EndOfLldpdu => 0,
            TlvType::ChassisId => 1,
            TlvType::PortId => 2,
            TlvType::TimeToLive => 3,
            TlvType::PortDescription => 4,
            TlvType::Reserved(value) => value,
            TlvType::OrganizationSpecific => 127,
            TlvType::Unknown(value) => value,
        }
    }
}

/// A reader for an LLDP TLV.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Tlv<T: AsRef<[u8]>> {
    data: T,
}

impl<T: AsRef<[u8]>> Tlv<T> {
    /// Create a new [`Tlv`] reader from a given buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedHeader`] if fewer than two bytes are
    /// available, and [`Error::TruncatedPayload`] if the buffer is shorter
    /// than the declared length.
    pub fn new(data: T) -> Result<Self> {
        let tlv = Self::new_unchecked(data);

        if tlv.data.as_ref().len() < 2 {
            return Err(Error::TruncatedHeader);
        }

        if tlv.data.as_ref().len() < tlv.total_len() {
            return Err(Error::TruncatedPayload);
        }

        Ok(tlv)
    }

    /// Create a new [`Tlv`] reader from a given buffer without length
    /// checking.
    pub fn new_unchecked(data: T) -> Self {
        Self { data }
    }

    fn header(&self) -> u16 {
        let b = &self.data.as_ref()[..2];
        u16::from_be_bytes([b[0], b[1]])
    }

    /// Return the raw 7-bit type field.
    pub fn raw_type(&self) -> u8 {
        (self.header() >> TYPE_SHIFT) as u8
    }

    /// Return the [`TlvType`].
    pub fn tlv_type(&self) -> TlvType {
        TlvType::from(self.raw_type())
    }

    /// Return the length field value.
    pub fn length(&self) -> usize {
        (self.header() & LENGTH_MASK) as usize
    }

    /// Return the length of the TLV including its header.
    pub fn total_len(&self) -> usize {
        2 + self.length()
    }

    /// Return the value of this TLV.
    pub fn value(&self) -> &[u8] {
        &self.data.as_ref()[2..][..self.length()]
    }
}

/// An [`Iterator`] over the TLVs of an LLDPDU.
///
/// The iterator stops after the End Of LLDPDU TLV, or after yielding the first
/// error.
#[derive(Debug)]
pub struct TlvIterator<'f> {
    data: &'f [u8],
    offset: usize,
    terminated: bool,
}

impl<'f> TlvIterator<'f> {
    /// Create an iterator over the TLVs in `data`.
    pub fn new(data: &'f [u8]) -> Self {
        Self {
            data,
            offset: 0,
            terminated: false,
        }
    }

    /// Return the offset of the next TLV.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'f> Iterator for TlvIterator<'f> {
    type Item = Result<Tlv<&'f [u8]>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.terminated {
            return None;
        }

        match Tlv::new(&self.data[self.offset..]) {
            Ok(tlv) => {
                self.offset += tlv.total_len();
                self.terminated = tlv.tlv_type() == TlvType::EndOfLldpdu;
                Some(Ok(tlv))
            }
            Err(err) => {
                self.terminated = true;
                Some(Err(err))
            }
        }
    }
}

/// A writer for one TLV, anchored at the offset of its header.
///
/// The writer holds the frame buffer exclusively, so the next TLV can only be
/// opened once this one is gone. The header is written by
/// [`TlvWriter::finalize`], or on drop if it was never called.
///
/// The length field has 9 bits: a value of 512 bytes or more is written
/// modulo 512.
///
/// A write that fails removes the whole TLV, header included, from the
/// buffer. The writer is unusable afterwards.
#[derive(Debug)]
pub struct TlvWriter<'b, const N: usize> {
    buffer: &'b mut FrameBuffer<N>,
    anchor: usize,
    tlv_type: u8,
    finalized: bool,
}

impl<'b, const N: usize> TlvWriter<'b, N> {
    /// Reserve a zeroed two byte header at the cursor of `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferOverflow`] if the header does not fit.
    pub fn open(buffer: &'b mut FrameBuffer<N>, tlv_type: TlvType) -> Result<Self> {
        let anchor = buffer.len();
        buffer.append(&[0, 0])?;

        Ok(Self {
            buffer,
            anchor,
            tlv_type: u8::from(tlv_type) & 0x7f,
            finalized: false,
        })
    }

    /// Return the number of value bytes written so far.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.buffer.len() - self.anchor - 2
    }

    /// Append bytes to the value of this TLV.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] after finalization, and
    /// [`Error::BufferOverflow`] if the bytes do not fit.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        if self.finalized {
            return Err(Error::InvalidHandle);
        }

        self.buffer.append(bytes).map_err(|err| self.discard(err))
    }

    /// Append a single byte to the value of this TLV.
    ///
    /// # Errors
    ///
    /// See [`TlvWriter::append`].
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.append(&[byte])
    }

    /// Append a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// See [`TlvWriter::append`].
    pub fn push_u16(&mut self, value: u16) -> Result<()> {
        self.append(&value.to_be_bytes())
    }

    /// Append a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// See [`TlvWriter::append`].
    pub fn push_u32(&mut self, value: u32) -> Result<()> {
        self.append(&value.to_be_bytes())
    }

    /// Append a one byte length prefix followed by `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldTooLong`] if `bytes` is longer than 255 bytes,
    /// see also [`TlvWriter::append`].
    pub fn push_prefixed(&mut self, bytes: &[u8]) -> Result<()> {
        if self.finalized {
            return Err(Error::InvalidHandle);
        }

        let len = u8::try_from(bytes.len()).map_err(|_| self.discard(Error::FieldTooLong))?;
        self.push(len)?;
        self.append(bytes)
    }

    /// Roll the buffer back to the anchor and retire the writer.
    fn discard(&mut self, err: Error) -> Error {
        self.buffer.truncate(self.anchor);
        self.finalized = true;
        err
    }

    /// Patch the header with the packed type and length.
    ///
    /// Returns the length written in the header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if the TLV was already finalized.
    pub fn finalize(&mut self) -> Result<u16> {
        if self.finalized {
            return Err(Error::InvalidHandle);
        }

        let length = (self.len() as u16) & LENGTH_MASK;
        let header = ((self.tlv_type as u16) << TYPE_SHIFT) | length;
        self.buffer.patch(self.anchor, header.to_be_bytes());
        self.finalized = true;

        Ok(length)
    }
}

impl<const N: usize> Drop for TlvWriter<'_, N> {
    fn drop(&mut self) {
        if !self.finalized {
            let _ = self.finalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_bit_layout() {
        let tlv = Tlv::new(&[0x02, 0x07, 0x04, 0, 0, 0, 0, 0, 0x01][..]).unwrap();
        assert_eq!(tlv.tlv_type(), TlvType::ChassisId);
        assert_eq!(tlv.length(), 7);
        assert_eq!(tlv.value(), &[0x04, 0, 0, 0, 0, 0, 0x01]);

        // The low bit of the first byte is the ninth length bit.
        let mut data = [0u8; 2 + 300];
        data[0] = (127 << 1) | 1;
        data[1] = 44;
        let tlv = Tlv::new(&data[..]).unwrap();
        assert_eq!(tlv.tlv_type(), TlvType::OrganizationSpecific);
        assert_eq!(tlv.length(), 300);
    }

    #[test]
    fn decode_errors() {
        assert_eq!(Tlv::new(&[0x02][..]), Err(Error::TruncatedHeader));
        assert_eq!(Tlv::new(&[][..]), Err(Error::TruncatedHeader));
        assert_eq!(
            Tlv::new(&[0x06, 0x02, 0x00][..]),
            Err(Error::TruncatedPayload)
        );
    }

    #[test]
    fn type_table() {
        assert_eq!(TlvType::from(0), TlvType::EndOfLldpdu);
        assert_eq!(TlvType::from(3), TlvType::TimeToLive);
        assert_eq!(TlvType::from(5), TlvType::Reserved(5));
        assert_eq!(TlvType::from(8), TlvType::Reserved(8));
        assert_eq!(TlvType::from(9), TlvType::Unknown(9));
        assert_eq!(TlvType::from(127), TlvType::OrganizationSpecific);
        assert_eq!(u8::from(TlvType::OrganizationSpecific), 127);
    }

    #[test]
    fn writer_patches_header() {
        let mut buffer = FrameBuffer::new();
        {
            let mut tlv = buffer.open_tlv(TlvType::TimeToLive).unwrap();
            tlv.push_u16(120).unwrap();
            assert_eq!(tlv.finalize(), Ok(2));
        }
        assert_eq!(buffer.as_bytes(), &[0x06, 0x02, 0x00, 0x78]);
    }

    #[test]
    fn writer_finalizes_on_drop() {
        let mut buffer = FrameBuffer::new();
        {
            let mut tlv = buffer.open_tlv(TlvType::PortDescription).unwrap();
            tlv.append(b"eth").unwrap();
        }
        assert_eq!(buffer.as_bytes(), &[0x08, 0x03, b'e', b't', b'h']);
    }

    #[test]
    fn writer_rejects_use_after_finalize() {
        let mut buffer = FrameBuffer::new();
        let mut tlv = buffer.open_tlv(TlvType::EndOfLldpdu).unwrap();
        assert_eq!(tlv.finalize(), Ok(0));
        assert_eq!(tlv.finalize(), Err(Error::InvalidHandle));
        assert_eq!(tlv.push(1), Err(Error::InvalidHandle));
        drop(tlv);
        assert_eq!(buffer.as_bytes(), &[0x00, 0x00]);
    }

    #[test]
    fn failed_write_removes_the_tlv() {
        let mut buffer = FrameBuffer::<8>::allocate();
        buffer.append(&[0x06, 0x02, 0x00, 0x03]).unwrap();
        {
            let mut tlv = buffer.open_tlv(TlvType::PortDescription).unwrap();
            tlv.append(b"et").unwrap();
            assert_eq!(tlv.append(b"h0"), Err(Error::BufferOverflow));
            assert_eq!(tlv.push(b'h'), Err(Error::InvalidHandle));
            assert_eq!(tlv.finalize(), Err(Error::InvalidHandle));
        }
        assert_eq!(buffer.as_bytes(), &[0x06, 0x02, 0x00, 0x03]);

        let mut buffer = FrameBuffer::new();
        {
            let mut tlv = buffer.open_tlv(TlvType::PortDescription).unwrap();
            tlv.push(1).unwrap();
            assert_eq!(tlv.push_prefixed(&[0; 256]), Err(Error::FieldTooLong));
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn length_is_masked_to_nine_bits() {
        let mut buffer = FrameBuffer::new();
        let payload = [0xabu8; 600];
        {
            let mut tlv = buffer.open_tlv(TlvType::PortDescription).unwrap();
            tlv.append(&payload).unwrap();
            assert_eq!(tlv.finalize(), Ok((600 % 512) as u16));
        }

        let tlv = Tlv::new_unchecked(buffer.as_bytes());
        assert_eq!(tlv.tlv_type(), TlvType::PortDescription);
        assert_eq!(tlv.length(), 600 % 512);
    }

    #[test]
    fn iterator_stops_at_end() {
        let data = [0x06, 0x02, 0x00, 0x78, 0x00, 0x00, 0xff, 0xff];
        let mut iter = TlvIterator::new(&data);
        assert_eq!(iter.next().unwrap().unwrap().tlv_type(), TlvType::TimeToLive);
        assert_eq!(iter.next().unwrap().unwrap().tlv_type(), TlvType::EndOfLldpdu);
        assert!(iter.next().is_none());
        assert_eq!(iter.offset(), 6);
    }

    #[test]
    fn iterator_reports_truncation_once() {
        let data = [0x06, 0x02, 0x00];
        let mut iter = TlvIterator::new(&data);
        assert_eq!(iter.next().unwrap(), Err(Error::TruncatedPayload));
        assert!(iter.next().is_none());
    }
}
