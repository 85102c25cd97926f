//! Decoding a whole frame into a [`Report`].

use crate::ethernet::{EthernetHeader, ETHERNET_HEADER_LEN};
use crate::htip::*;
use crate::lldp::{ChassisIdSubtype, PortIdSubtype};
use crate::tlv::{Tlv, TlvType};
use crate::{Error, Result, MAX_FRAME_LEN, MAX_PORTS};

/// The location of a field inside the stored frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Span {
    start: usize,
    len: usize,
}

impl Span {
    fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }
}

/// A decoded field: its length, an optional numeric interpretation and a view
/// into the stored frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoField<'a> {
    /// Length of the field in bytes.
    pub len: usize,
    /// Numeric interpretation, the subtype for Chassis ID and Port ID.
    pub count: Option<u32>,
    /// The raw bytes.
    pub data: Option<&'a [u8]>,
}

/// The result of decoding a frame.
///
/// A report owns a copy of the frame; every accessor returns a view into that
/// copy. Decoding never fails: check [`Report::is_well_formed`] before
/// trusting the content. Fields decoded before an error stay available.
#[derive(Debug, Clone)]
pub struct Report {
    frame: heapless::Vec<u8, MAX_FRAME_LEN>,
    has_header: bool,
    well_formed: bool,
    error: Option<Error>,

    chassis_id: Option<(u8, Span)>,
    port_id: Option<(u8, Span)>,
    ttl: Option<u16>,
    port_description: Option<Span>,
    reserved_tlvs: usize,

    device_category: Option<Span>,
    manufacturer_code: Option<Span>,
    model_name: Option<Span>,
    model_number: Option<Span>,
    channel_use_state: Option<u8>,
    signal_strength: Option<u8>,
    communication_error: Option<u8>,
    status: Option<Span>,
    send_interval: Option<u16>,
    vendor_extension: Option<Span>,

    forwarding: heapless::Vec<Span, MAX_PORTS>,
    dropped_forwarding_entries: usize,
    ether_bridge_macs: Option<Span>,
    extended_mac_list: Option<Span>,
    extended_connectivity: Option<Span>,
}

impl Report {
    fn empty(input: &[u8], has_header: bool) -> Self {
        let mut frame = heapless::Vec::new();
        let len = input.len().min(MAX_FRAME_LEN);
        // Cannot fail, the slice is at most MAX_FRAME_LEN long.
        let _ = frame.extend_from_slice(&input[..len]);

        Self {
            frame,
            has_header,
            well_formed: false,
            error: None,
            chassis_id: None,
            port_id: None,
            ttl: None,
            port_description: None,
            reserved_tlvs: 0,
            device_category: None,
            manufacturer_code: None,
            model_name: None,
            model_number: None,
            channel_use_state: None,
            signal_strength: None,
            communication_error: None,
            status: None,
            send_interval: None,
            vendor_extension: None,
            forwarding: heapless::Vec::new(),
            dropped_forwarding_entries: 0,
            ether_bridge_macs: None,
            extended_mac_list: None,
            extended_connectivity: None,
        }
    }

    /// Decode a frame that starts with its Ethernet header.
    ///
    /// Frames longer than [`MAX_FRAME_LEN`] are cut to that length.
    pub fn parse(frame: &[u8]) -> Self {
        let mut report = Self::empty(frame, true);

        if frame.len() < ETHERNET_HEADER_LEN {
            report.has_header = false;
            report.error = Some(Error::TruncatedHeader);
            return report;
        }

        let len = report.frame.len();
        report.run(&frame[..len], ETHERNET_HEADER_LEN);
        report
    }

    /// Decode a bare LLDPDU, without Ethernet header.
    pub fn parse_payload(payload: &[u8]) -> Self {
        let mut report = Self::empty(payload, false);
        let len = report.frame.len();
        report.run(&payload[..len], 0);
        report
    }

    fn run(&mut self, frame: &[u8], start: usize) {
        match self.walk(frame, start) {
            Ok(()) => self.well_formed = true,
            Err(err) => self.error = Some(err),
        }
    }

    /// Walk the TLVs of `frame`, which holds the same bytes as the stored
    /// copy, until the End Of LLDPDU TLV.
    fn walk(&mut self, frame: &[u8], start: usize) -> Result<()> {
        let mut offset = start;

        loop {
            let tlv = Tlv::new(&frame[offset..])?;
            let value = tlv.value();
            let value_start = offset + 2;

            match tlv.tlv_type() {
                TlvType::EndOfLldpdu => return Ok(()),
                TlvType::ChassisId => {
                    let (&subtype, id) = value.split_first().ok_or(Error::TruncatedPayload)?;
                    self.chassis_id = Some((subtype, Span::new(value_start + 1, id.len())));
                }
                TlvType::PortId => {
                    let (&subtype, id) = value.split_first().ok_or(Error::TruncatedPayload)?;
                    self.port_id = Some((subtype, Span::new(value_start + 1, id.len())));
                }
                TlvType::TimeToLive => match *value {
                    [b0, b1, ..] => self.ttl = Some(u16::from_be_bytes([b0, b1])),
                    _ => return Err(Error::TruncatedPayload),
                },
                TlvType::PortDescription => {
                    self.port_description = Some(Span::new(value_start, value.len()));
                }
                TlvType::Reserved(_) => self.reserved_tlvs += 1,
                TlvType::OrganizationSpecific => self.organization_specific(value, value_start)?,
                TlvType::Unknown(_) => return Err(Error::UnknownType),
            }

            offset += tlv.total_len();
        }
    }

    fn organization_specific(&mut self, value: &[u8], value_start: usize) -> Result<()> {
        let org = OrganizationSpecific::new(value)?;
        if !org.is_htip() {
            return Ok(());
        }

        let content = org.content();
        let start = value_start + OrganizationSpecific::<&[u8]>::size();
        let whole = Span::new(start, content.len());

        match org.htip_subtype() {
            HtipSubtype::DeviceInformation => self.device_information(content, start)?,
            HtipSubtype::MacForwarding => {
                let entry = MacForwarding::new(content)?;
                if self
                    .forwarding
                    .push(Span::new(start, entry.entry_len()))
                    .is_err()
                {
                    self.dropped_forwarding_entries += 1;
                }
            }
            HtipSubtype::EtherBridgeMacs => {
                EtherBridgeMacs::new(content)?;
                self.ether_bridge_macs = Some(whole);
            }
            HtipSubtype::ExtendedConnectivity => {
                ExtendedConnectivity::new(content)?;
                self.extended_connectivity = Some(whole);
            }
            HtipSubtype::ExtendedMacList => {
                ExtendedMacList::new(content)?;
                self.extended_mac_list = Some(whole);
            }
            HtipSubtype::Unknown(_) => (),
        }

        Ok(())
    }

    fn device_information(&mut self, content: &[u8], start: usize) -> Result<()> {
        let info = DeviceInformation::new(content)?;
        let data = Span::new(start + 2, info.data().len());

        match DeviceInfoRepr::parse(&info)? {
            Some(DeviceInfoRepr::DeviceCategory(_)) => self.device_category = Some(data),
            Some(DeviceInfoRepr::ManufacturerCode(_)) => self.manufacturer_code = Some(data),
            Some(DeviceInfoRepr::ModelName(_)) => self.model_name = Some(data),
            Some(DeviceInfoRepr::ModelNumber(_)) => self.model_number = Some(data),
            Some(DeviceInfoRepr::ChannelUseState(v)) => self.channel_use_state = Some(v),
            Some(DeviceInfoRepr::SignalStrength(v)) => self.signal_strength = Some(v),
            Some(DeviceInfoRepr::CommunicationError(v)) => self.communication_error = Some(v),
            Some(DeviceInfoRepr::Status(_)) => self.status = Some(data),
            Some(DeviceInfoRepr::SendInterval(v)) => self.send_interval = Some(v),
            Some(DeviceInfoRepr::VendorExtension(_)) => {
                self.vendor_extension = Some(Span::new(start + 1, content.len() - 1));
            }
            None => (),
        }

        Ok(())
    }

    fn slice(&self, span: Span) -> &[u8] {
        &self.frame[span.start..][..span.len]
    }

    fn field(&self, span: Option<Span>) -> Option<&[u8]> {
        span.map(|span| self.slice(span))
    }

    /// Returns `true` if the End Of LLDPDU TLV was reached without error.
    pub fn is_well_formed(&self) -> bool {
        self.well_formed
    }

    /// Return the error that stopped decoding.
    pub fn error(&self) -> Option<Error> {
        self.error
    }

    /// Return the stored frame.
    pub fn as_bytes(&self) -> &[u8] {
        &self.frame
    }

    /// Return the Ethernet header, `None` for a bare LLDPDU.
    pub fn ethernet_header(&self) -> Option<EthernetHeader<&[u8]>> {
        if self.has_header {
            Some(EthernetHeader::new_unchecked(&self.frame[..ETHERNET_HEADER_LEN]))
        } else {
            None
        }
    }

    /// Return the Ethernet source address.
    pub fn src(&self) -> Option<&[u8]> {
        self.has_header.then(|| &self.frame[6..12])
    }

    /// Returns `true` if both frames were sent from the same hardware
    /// address.
    pub fn is_from_same_source(&self, other: &Report) -> bool {
        match (self.src(), other.src()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Return the Chassis ID; [`InfoField::count`] holds the subtype.
    pub fn chassis_id(&self) -> Option<InfoField<'_>> {
        self.chassis_id.map(|(subtype, span)| InfoField {
            len: span.len,
            count: Some(subtype as u32),
            data: Some(self.slice(span)),
        })
    }

    /// Return the Chassis ID subtype.
    pub fn chassis_id_subtype(&self) -> Option<ChassisIdSubtype> {
        self.chassis_id.map(|(subtype, _)| subtype.into())
    }

    /// Return the Port ID; [`InfoField::count`] holds the subtype.
    pub fn port_id(&self) -> Option<InfoField<'_>> {
        self.port_id.map(|(subtype, span)| InfoField {
            len: span.len,
            count: Some(subtype as u32),
            data: Some(self.slice(span)),
        })
    }

    /// Return the Port ID subtype.
    pub fn port_id_subtype(&self) -> Option<PortIdSubtype> {
        self.port_id.map(|(subtype, _)| subtype.into())
    }

    /// Return the time to live in seconds.
    pub fn ttl(&self) -> Option<u16> {
        self.ttl
    }

    /// Return the port description.
    pub fn port_description(&self) -> Option<&[u8]> {
        self.field(self.port_description)
    }

    /// Return the number of optional LLDP TLVs (types 5 to 8) that were
    /// skipped.
    pub fn reserved_tlv_count(&self) -> usize {
        self.reserved_tlvs
    }

    /// Return the device category.
    pub fn device_category(&self) -> Option<&[u8]> {
        self.field(self.device_category)
    }

    /// Return the manufacturer code.
    pub fn manufacturer_code(&self) -> Option<&[u8]> {
        self.field(self.manufacturer_code)
    }

    /// Return the model name.
    pub fn model_name(&self) -> Option<&[u8]> {
        self.field(self.model_name)
    }

    /// Return the model number.
    pub fn model_number(&self) -> Option<&[u8]> {
        self.field(self.model_number)
    }

    /// Return the channel use state in percent.
    pub fn channel_use_state(&self) -> Option<u8> {
        self.channel_use_state
    }

    /// Return the signal strength in percent.
    pub fn signal_strength(&self) -> Option<u8> {
        self.signal_strength
    }

    /// Return the communication error rate in percent.
    pub fn communication_error(&self) -> Option<u8> {
        self.communication_error
    }

    /// Return the status string.
    pub fn status(&self) -> Option<&[u8]> {
        self.field(self.status)
    }

    /// Return the LLDPDU send interval in seconds.
    pub fn send_interval(&self) -> Option<u16> {
        self.send_interval
    }

    /// Return the last vendor extension.
    pub fn vendor_extension(&self) -> Option<VendorExtension<&[u8]>> {
        self.field(self.vendor_extension)
            .map(VendorExtension::new_unchecked)
    }

    /// Return an [`Iterator`] over the stored MAC forwarding entries.
    pub fn forwarding_table(&self) -> impl ExactSizeIterator<Item = MacForwarding<&[u8]>> + '_ {
        self.forwarding
            .iter()
            .map(|span| MacForwarding::new_unchecked(self.slice(*span)))
    }

    /// Return the number of MAC forwarding entries that did not fit in the
    /// table.
    pub fn dropped_forwarding_entries(&self) -> usize {
        self.dropped_forwarding_entries
    }

    /// Return the ether bridge MAC list.
    pub fn ether_bridge_macs(&self) -> Option<EtherBridgeMacs<&[u8]>> {
        self.field(self.ether_bridge_macs)
            .map(EtherBridgeMacs::new_unchecked)
    }

    /// Return the extended MAC list.
    pub fn extended_mac_list(&self) -> Option<ExtendedMacList<&[u8]>> {
        self.field(self.extended_mac_list)
            .map(ExtendedMacList::new_unchecked)
    }

    /// Return the extended connectivity record.
    pub fn extended_connectivity(&self) -> Option<ExtendedConnectivity<&[u8]>> {
        self.field(self.extended_connectivity)
            .map(ExtendedConnectivity::new_unchecked)
    }
}
