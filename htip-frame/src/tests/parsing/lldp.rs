use crate::tests::{router_frame, SRC};
use crate::*;

const HEADER: &str = "ffffffffffff02000000000188cc";

fn frame(tlvs: &str) -> std::vec::Vec<u8> {
    hex::decode(format!("{HEADER}{tlvs}")).unwrap()
}

#[test]
fn parse_router_frame() {
    let frame = router_frame();
    let report = Report::parse(frame.as_bytes());

    assert!(report.is_well_formed());
    assert_eq!(report.error(), None);
    assert_eq!(report.src(), Some(&SRC[..]));

    let header = report.ethernet_header().unwrap();
    assert!(header.is_lldp());
    assert_eq!(header.dst(), &BROADCAST_ADDRESS);

    let chassis = report.chassis_id().unwrap();
    assert_eq!(chassis.len, 6);
    assert_eq!(chassis.count, Some(4));
    assert_eq!(chassis.data, Some(&SRC[..]));
    assert_eq!(report.chassis_id_subtype(), Some(ChassisIdSubtype::MacAddress));

    let port = report.port_id().unwrap();
    assert_eq!(port.count, Some(1));
    assert_eq!(port.data, Some(&b"eth0"[..]));
    assert_eq!(report.port_id_subtype(), Some(PortIdSubtype::InterfaceAlias));

    assert_eq!(report.ttl(), Some(120));
    assert_eq!(report.port_description(), None);
    assert_eq!(report.device_category(), Some(&b"router"[..]));
    assert_eq!(report.as_bytes(), frame.as_bytes());
}

#[test]
fn parse_header_and_terminator() {
    let report = Report::parse(&frame("0000"));

    assert!(report.is_well_formed());
    assert_eq!(report.src(), Some(&SRC[..]));
    assert!(report.chassis_id().is_none());
    assert!(report.port_id().is_none());
    assert!(report.ttl().is_none());
    assert!(report.port_description().is_none());
    assert!(report.device_category().is_none());
    assert!(report.manufacturer_code().is_none());
    assert!(report.model_name().is_none());
    assert!(report.model_number().is_none());
    assert!(report.channel_use_state().is_none());
    assert!(report.signal_strength().is_none());
    assert!(report.communication_error().is_none());
    assert!(report.status().is_none());
    assert!(report.send_interval().is_none());
    assert!(report.vendor_extension().is_none());
    assert_eq!(report.forwarding_table().len(), 0);
    assert!(report.ether_bridge_macs().is_none());
    assert!(report.extended_mac_list().is_none());
    assert!(report.extended_connectivity().is_none());
}

#[test]
fn missing_terminator() {
    let report = Report::parse(&frame("0602007808034c414e"));

    assert!(!report.is_well_formed());
    assert_eq!(report.error(), Some(Error::TruncatedHeader));
    assert_eq!(report.ttl(), Some(120));
    assert_eq!(report.port_description(), Some(&b"LAN"[..]));
}

#[test]
fn truncated_payload() {
    // The port description declares 9 bytes but only 3 follow.
    let report = Report::parse(&frame("060200780809494545"));

    assert!(!report.is_well_formed());
    assert_eq!(report.error(), Some(Error::TruncatedPayload));
    assert_eq!(report.ttl(), Some(120));
    assert!(report.port_description().is_none());
}

#[test]
fn truncated_header() {
    let report = Report::parse(&frame("060200780a"));
    assert_eq!(report.error(), Some(Error::TruncatedHeader));

    let report = Report::parse(&hex::decode("ffffffffffff0200").unwrap());
    assert!(!report.is_well_formed());
    assert_eq!(report.error(), Some(Error::TruncatedHeader));
    assert_eq!(report.src(), None);
}

#[test]
fn short_mandatory_tlvs() {
    let report = Report::parse(&frame("06010000"));
    assert_eq!(report.error(), Some(Error::TruncatedPayload));

    let report = Report::parse(&frame("02000000"));
    assert_eq!(report.error(), Some(Error::TruncatedPayload));
}

#[test]
fn unknown_type_stops_parsing() {
    // TTL, then type 9, then a terminator that is never reached.
    let report = Report::parse(&frame("060200781201ff0000"));

    assert!(!report.is_well_formed());
    assert_eq!(report.error(), Some(Error::UnknownType));
    assert_eq!(report.ttl(), Some(120));
}

#[test]
fn reserved_tlvs_are_counted() {
    // System name (5) and system capabilities (7).
    let report = Report::parse(&frame(concat!("0a03687470", "0e0400040004", "0000")));

    assert!(report.is_well_formed());
    assert_eq!(report.reserved_tlv_count(), 2);
}

#[test]
fn foreign_organization_is_skipped() {
    // IEEE 802.3 OUI 00:12:0f, subtype 4 (maximum frame size).
    let report = Report::parse(&frame("fe0600120f0405ee0000"));

    assert!(report.is_well_formed());
    assert!(report.device_category().is_none());
}

#[test]
fn short_organization_tlv() {
    let report = Report::parse(&frame("fe02e0270000"));
    assert_eq!(report.error(), Some(Error::TruncatedPayload));
}

#[test]
fn parse_bare_payload() {
    let report = Report::parse_payload(&hex::decode("0602000a0000").unwrap());

    assert!(report.is_well_formed());
    assert_eq!(report.src(), None);
    assert!(report.ethernet_header().is_none());
    assert_eq!(report.ttl(), Some(10));
}

#[test]
fn oversized_input_is_cut() {
    let mut input = frame("0000");
    input.resize(MAX_FRAME_LEN + 100, 0xaa);

    let report = Report::parse(&input);
    assert!(report.is_well_formed());
    assert_eq!(report.as_bytes().len(), MAX_FRAME_LEN);
}

#[test]
fn same_source() {
    let a = Report::parse(&frame("0000"));
    let b = Report::parse(&frame("0602000a0000"));
    let c = Report::parse(&hex::decode("ffffffffffff02000000000288cc0000").unwrap());
    let d = Report::parse_payload(&[0, 0]);

    assert!(a.is_from_same_source(&b));
    assert!(!a.is_from_same_source(&c));
    assert!(!a.is_from_same_source(&d));
}
