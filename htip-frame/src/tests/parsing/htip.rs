use crate::tests::SRC;
use crate::*;

fn with_header(build: impl FnOnce(&mut FrameBuffer)) -> FrameBuffer {
    let mut frame = FrameBuffer::new();
    emit_ethernet_header(&mut frame, &SRC).unwrap();
    build(&mut frame);
    frame
}

#[test]
fn forwarding_table_is_capped() {
    let frame = with_header(|frame| {
        for port in 0..70u8 {
            MacForwardingRepr {
                interface_type: VarUint::U8(6),
                port_number: VarUint::U8(port),
                macs: &[],
            }
            .emit(frame)
            .unwrap();
        }
        emit_end_of_lldpdu(frame).unwrap();
    });

    let report = Report::parse(frame.as_bytes());
    assert!(report.is_well_formed());
    assert_eq!(report.forwarding_table().len(), MAX_PORTS);
    assert_eq!(report.dropped_forwarding_entries(), 6);

    let last = report.forwarding_table().last().unwrap();
    assert_eq!(last.port_number(), VarUint::U8(63));
}

#[test]
fn forwarding_entries() {
    let frame = with_header(|frame| {
        MacForwardingRepr {
            interface_type: VarUint::U16(71),
            port_number: VarUint::U32(7),
            macs: &[[0x02, 0, 0, 0, 0, 0x10], [0x02, 0, 0, 0, 0, 0x11]],
        }
        .emit(frame)
        .unwrap();
        MacForwardingRepr {
            interface_type: VarUint::Raw(&[0xab, 0xcd, 0xef]),
            port_number: VarUint::U8(1),
            macs: &[],
        }
        .emit(frame)
        .unwrap();
        emit_end_of_lldpdu(frame).unwrap();
    });

    let report = Report::parse(frame.as_bytes());
    assert!(report.is_well_formed());

    let mut table = report.forwarding_table();
    let entry = table.next().unwrap();
    assert_eq!(entry.interface_type(), VarUint::U16(71));
    assert_eq!(entry.port_number(), VarUint::U32(7));
    assert_eq!(entry.mac_count(), 2);
    assert_eq!(entry.macs().nth(1), Some(&[0x02, 0, 0, 0, 0, 0x11][..]));

    let entry = table.next().unwrap();
    assert_eq!(entry.interface_type(), VarUint::Raw(&[0xab, 0xcd, 0xef]));
    assert_eq!(entry.interface_type().value(), None);
    assert_eq!(entry.mac_count(), 0);
    assert!(table.next().is_none());
}

#[test]
fn malformed_forwarding_entry() {
    // Count of 2 MAC addresses, only one present.
    let report = Report::parse(
        &hex::decode(concat!(
            "ffffffffffff02000000000188cc",
            "fe0fe0271a02", "0106", "0101", "02", "020000000010",
            "0000",
        ))
        .unwrap(),
    );

    assert!(!report.is_well_formed());
    assert_eq!(report.error(), Some(Error::MalformedExtension));
    assert_eq!(report.forwarding_table().len(), 0);
}

#[test]
fn device_information_extensions() {
    let frame = with_header(|frame| {
        DeviceInfoRepr::Status(b"OK").emit(frame).unwrap();
        DeviceInfoRepr::VendorExtension(VendorExtensionRepr {
            org_code: *b"jaist1",
            info_type: 3,
            data: &[1, 2, 3],
        })
        .emit(frame)
        .unwrap();
        emit_end_of_lldpdu(frame).unwrap();
    });

    let report = Report::parse(frame.as_bytes());
    assert!(report.is_well_formed());
    assert_eq!(report.status(), Some(&b"OK"[..]));

    let ext = report.vendor_extension().unwrap();
    assert_eq!(ext.org_code(), b"jaist1");
    assert_eq!(ext.info_type(), 3);
    assert_eq!(ext.value(), Some(&[1, 2, 3][..]));
}

#[test]
fn unknown_device_information_is_skipped() {
    let report = Report::parse(
        &hex::decode(concat!(
            "ffffffffffff02000000000188cc",
            "fe08e0271a01", "09", "02", "abcd",
            "0000",
        ))
        .unwrap(),
    );

    assert!(report.is_well_formed());
}

#[test]
fn malformed_device_information() {
    // Signal strength with a two byte value.
    let report = Report::parse(
        &hex::decode(concat!(
            "ffffffffffff02000000000188cc",
            "fe08e0271a01", "15", "02", "0101",
            "0000",
        ))
        .unwrap(),
    );
    assert_eq!(report.error(), Some(Error::MalformedExtension));

    // Declared length runs past the TLV.
    let report = Report::parse(
        &hex::decode(concat!(
            "ffffffffffff02000000000188cc",
            "fe07e0271a01", "01", "05", "61",
            "0000",
        ))
        .unwrap(),
    );
    assert_eq!(report.error(), Some(Error::TruncatedPayload));
}

#[test]
fn mac_lists() {
    let frame = with_header(|frame| {
        emit_ether_bridge_macs(frame, &[[0x02, 0, 0, 0, 0, 0x20], [0x02, 0, 0, 0, 0, 0x21]])
            .unwrap();
        emit_extended_mac_list(frame, &[&b"4444"[..], &b"AAAAAAAAAA"[..]]).unwrap();
        emit_end_of_lldpdu(frame).unwrap();
    });

    let report = Report::parse(frame.as_bytes());
    assert!(report.is_well_formed());

    let bridge = report.ether_bridge_macs().unwrap();
    assert_eq!(bridge.count(), 2);
    assert_eq!(bridge.macs().last(), Some(&[0x02, 0, 0, 0, 0, 0x21][..]));

    let list = report.extended_mac_list().unwrap();
    assert_eq!(list.count(), 2);
    assert_eq!(list.first_width(), Some(4));
    assert_eq!(list.entries().last(), Some(&b"AAAAAAAAAA"[..]));
}

#[test]
fn extended_connectivity() {
    let hosts = [HostInfoRepr {
        mac: &[0x02, 0, 0, 0, 0, 0x30],
        signal_strength: Some(55),
        error_rate: None,
        vendor_info: None,
    }];
    let frame = with_header(|frame| {
        ExtendedConnectivityRepr {
            port_number: VarUint::U8(2),
            mac_length: 6,
            per_host_info_count: 2,
            hosts: &hosts,
            per_port_info_count: 2,
            paired_macs: &[],
            channel_usage: &[40],
            port_vendor_info: None,
        }
        .emit(frame)
        .unwrap();
        emit_end_of_lldpdu(frame).unwrap();
    });

    let report = Report::parse(frame.as_bytes());
    assert!(report.is_well_formed());

    let ext = report.extended_connectivity().unwrap();
    assert_eq!(ext.port_number(), VarUint::U8(2));
    let host = ext.hosts().next().unwrap();
    assert_eq!(host.mac, &[0x02, 0, 0, 0, 0, 0x30]);
    assert_eq!(host.signal_strength, Some(55));
    assert_eq!(host.error_rate, None);
    assert_eq!(ext.channel_usage(), &[40]);
}

#[test]
fn malformed_connectivity_stops_parsing() {
    // One host declared, but the TLV ends after the MAC address.
    let report = Report::parse(
        &hex::decode(concat!(
            "ffffffffffff02000000000188cc",
            "0602000a",
            "fe0fe0271a04", "0101", "06", "01", "02", "020000000030",
            "0000",
        ))
        .unwrap(),
    );

    assert!(!report.is_well_formed());
    assert_eq!(report.error(), Some(Error::MalformedExtension));
    assert_eq!(report.ttl(), Some(10));
    assert!(report.extended_connectivity().is_none());
}

#[test]
fn unknown_htip_subtype_is_skipped() {
    let report = Report::parse(
        &hex::decode(concat!(
            "ffffffffffff02000000000188cc",
            "fe05e0271a0900",
            "0000",
        ))
        .unwrap(),
    );

    assert!(report.is_well_formed());
}
