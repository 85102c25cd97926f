use crate::*;

mod parsing;

pub(crate) const SRC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

/// Header, Chassis ID (MAC), Port ID "eth0", TTL 120, category "router".
pub(crate) fn router_frame() -> FrameBuffer {
    let mut frame = FrameBuffer::new();
    emit_ethernet_header(&mut frame, &SRC).unwrap();
    emit_chassis_id(&mut frame, ChassisIdSubtype::MacAddress, &SRC).unwrap();
    emit_port_id(&mut frame, PortIdSubtype::InterfaceAlias, b"eth0").unwrap();
    emit_ttl(&mut frame, 120).unwrap();
    DeviceInfoRepr::DeviceCategory(b"router").emit(&mut frame).unwrap();
    emit_end_of_lldpdu(&mut frame).unwrap();
    frame
}

#[test]
fn emit_router_frame() {
    let frame = router_frame();

    let expected = hex::decode(concat!(
        "ffffffffffff", "020000000001", "88cc",
        "0207", "04", "020000000001",
        "0405", "01", "65746830",
        "0602", "0078",
        "fe0c", "e0271a", "01", "01", "06", "726f75746572",
        "0000",
    ))
    .unwrap();

    assert_eq!(frame.as_bytes(), &expected[..]);
}

#[test]
fn device_info_round_trip() {
    let fields = [
        DeviceInfoRepr::DeviceCategory(b"jaist prototype"),
        DeviceInfoRepr::ManufacturerCode(*b"123456"),
        DeviceInfoRepr::ModelName(b"esp32 prototype"),
        DeviceInfoRepr::ModelNumber(b"esp32_0001"),
        DeviceInfoRepr::ChannelUseState(2),
        DeviceInfoRepr::SignalStrength(80),
        DeviceInfoRepr::CommunicationError(0),
        DeviceInfoRepr::Status(b"OK"),
        DeviceInfoRepr::SendInterval(10),
    ];

    let mut frame = FrameBuffer::new();
    for field in &fields {
        field.emit(&mut frame).unwrap();
    }
    emit_end_of_lldpdu(&mut frame).unwrap();

    let report = Report::parse_payload(frame.as_bytes());
    assert!(report.is_well_formed());
    assert_eq!(report.device_category(), Some(&b"jaist prototype"[..]));
    assert_eq!(report.manufacturer_code(), Some(&b"123456"[..]));
    assert_eq!(report.model_name(), Some(&b"esp32 prototype"[..]));
    assert_eq!(report.model_number(), Some(&b"esp32_0001"[..]));
    assert_eq!(report.channel_use_state(), Some(2));
    assert_eq!(report.signal_strength(), Some(80));
    assert_eq!(report.communication_error(), Some(0));
    assert_eq!(report.status(), Some(&b"OK"[..]));
    assert_eq!(report.send_interval(), Some(10));

    // Every field also decodes through the low-level reader.
    let mut tlvs = TlvIterator::new(frame.as_bytes());
    for field in &fields {
        let tlv = tlvs.next().unwrap().unwrap();
        let org = OrganizationSpecific::new(tlv.value()).unwrap();
        let info = DeviceInformation::new(org.content()).unwrap();
        assert_eq!(DeviceInfoRepr::parse(&info), Ok(Some(*field)));
    }
}

#[test]
fn clamped_values_do_not_round_trip() {
    let mut frame = FrameBuffer::new();
    DeviceInfoRepr::ChannelUseState(101).emit(&mut frame).unwrap();
    DeviceInfoRepr::CommunicationError(255).emit(&mut frame).unwrap();
    emit_end_of_lldpdu(&mut frame).unwrap();

    let report = Report::parse_payload(frame.as_bytes());
    assert_eq!(report.channel_use_state(), Some(100));
    assert_eq!(report.communication_error(), Some(100));
}

#[test]
fn length_field_is_masked() {
    for len in [0usize, 1, 255, 511, 512, 513, 1000] {
        let mut frame = FrameBuffer::new();
        {
            let mut tlv = frame.open_tlv(TlvType::PortDescription).unwrap();
            tlv.append(&vec![0x41; len]).unwrap();
            assert_eq!(tlv.finalize(), Ok((len % 512) as u16));
        }

        let tlv = Tlv::new(frame.as_bytes()).unwrap();
        assert_eq!(tlv.length(), len % 512, "payload of {len} bytes");
        assert_eq!(tlv.tlv_type(), TlvType::PortDescription);
    }
}

#[test]
fn full_buffer_reports_overflow() {
    let mut frame = FrameBuffer::new();
    frame.append(&[0; MTU - 5]).unwrap();

    assert_eq!(emit_ttl(&mut frame, 1), Ok(()));
    assert_eq!(frame.remaining(), 1);
    assert_eq!(
        DeviceInfoRepr::Status(b"OK").emit(&mut frame),
        Err(Error::BufferOverflow)
    );
    assert_eq!(emit_end_of_lldpdu(&mut frame), Err(Error::BufferOverflow));
    assert_eq!(frame.len(), MTU - 1);
}
