use crate::config::AgentConfig;
use crate::frame::*;
use crate::iface::{LinkInterface, LinkSender};

/// An HTIP agent.
///
/// The agent builds the announcement frame for an interface from its
/// [`AgentConfig`], sends it on every interface that is ready, and decodes
/// the frames received from other nodes.
#[derive(Debug, Clone)]
pub struct Agent<'a> {
    config: AgentConfig<'a>,
}

impl<'a> Agent<'a> {
    /// Create an agent announcing the values of `config`.
    pub fn new(config: AgentConfig<'a>) -> Self {
        Self { config }
    }

    /// Return the configuration of the agent.
    pub fn config(&self) -> &AgentConfig<'a> {
        &self.config
    }

    /// Build the announcement frame for `iface`.
    ///
    /// The frame holds, in order: the Ethernet header, the Chassis ID (MAC
    /// address), the Port ID (interface name), the TTL, the Port Description,
    /// the HTIP device information, the configured MAC forwarding entries and
    /// the End Of LLDPDU TLV.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldTooLong`] when a configured value does not fit
    /// its length prefix, and [`Error::BufferOverflow`] when the frame does
    /// not fit one MTU.
    pub fn build_frame<I: LinkInterface + ?Sized>(&self, iface: &I) -> Result<FrameBuffer> {
        let mut frame = FrameBuffer::new();
        self.emit(&mut frame, iface)?;
        debug!("built {} byte frame for {}", frame.len(), iface.name());
        Ok(frame)
    }

    fn emit<I: LinkInterface + ?Sized>(&self, frame: &mut FrameBuffer, iface: &I) -> Result<()> {
        let config = &self.config;
        let hardware_address = iface.hardware_address();
        let chassis = config.chassis_mac.unwrap_or(hardware_address);

        emit_ethernet_header(frame, &hardware_address)?;
        emit_chassis_id(frame, ChassisIdSubtype::MacAddress, &chassis)?;
        emit_port_id(frame, PortIdSubtype::InterfaceAlias, iface.name().as_bytes())?;
        emit_ttl(frame, config.ttl)?;
        emit_port_description(frame, config.port_description)?;

        let device_information = [
            DeviceInfoRepr::DeviceCategory(config.device_category),
            DeviceInfoRepr::ManufacturerCode(config.manufacturer_code),
            DeviceInfoRepr::ModelName(config.model_name),
            DeviceInfoRepr::ModelNumber(config.model_number),
            DeviceInfoRepr::ChannelUseState(config.channel_use_state),
            DeviceInfoRepr::SignalStrength(config.signal_strength),
            DeviceInfoRepr::CommunicationError(config.communication_error),
            DeviceInfoRepr::Status(config.status),
            DeviceInfoRepr::SendInterval(config.send_interval),
        ];
        for field in &device_information {
            field.emit(frame)?;
        }

        for entry in config.forwarding {
            entry.emit(frame)?;
        }

        emit_end_of_lldpdu(frame)
    }

    /// Run one announcement round.
    ///
    /// Every interface whose flags contain [`InterfaceFlags::ANNOUNCE`]
    /// receives the frame [`Agent::build_frame`] returns for it, `burst`
    /// times. A failed send is logged and does not stop the round.
    ///
    /// Returns the number of frames that were sent successfully.
    ///
    /// [`InterfaceFlags::ANNOUNCE`]: crate::InterfaceFlags::ANNOUNCE
    pub fn announce<I, S>(&self, interfaces: &[I], sender: &mut S) -> usize
    where
        I: LinkInterface,
        S: LinkSender<I>,
    {
        let mut sent = 0;

        for iface in interfaces {
            if !iface.flags().can_announce() {
                trace!("skipping interface {}", iface.name());
                continue;
            }

            let frame = match self.build_frame(iface) {
                Ok(frame) => frame,
                Err(err) => {
                    error!("cannot build frame for {}: {}", iface.name(), err);
                    continue;
                }
            };

            for attempt in 1..=self.config.burst {
                match sender.send(iface, frame.as_bytes()) {
                    Ok(()) => {
                        trace!("sent frame {} on {}", attempt, iface.name());
                        sent += 1;
                    }
                    Err(_) => {
                        warn!("sending frame {} on {} failed", attempt, iface.name());
                    }
                }
            }
        }

        sent
    }

    /// Decode a received frame.
    ///
    /// Returns `None` for frames that are not LLDP frames. Malformed LLDP
    /// frames still yield a [`Report`] holding the fields decoded before the
    /// error.
    pub fn receive(&self, bytes: &[u8]) -> Option<Report> {
        let Ok(header) = EthernetHeader::new(bytes) else {
            trace!("ignoring {} byte runt frame", bytes.len());
            return None;
        };

        if !header.is_lldp() {
            trace!("ignoring frame with ether type {:x}", header.ether_type());
            return None;
        }

        let report = Report::parse(bytes);

        if let Some(err) = report.error() {
            warn!("malformed lldp frame: {}", err);
        }

        let dropped = report.dropped_forwarding_entries();
        if dropped > 0 {
            warn!("forwarding table full, dropped {} entries", dropped);
        }

        Some(report)
    }
}
