use crate::tests::{router_frame, SRC};
use crate::*;

#[test]
fn router_json() {
    let report = Report::parse(router_frame().as_bytes());

    assert_eq!(
        format!("{}", report.json()),
        concat!(
            "{\n",
            "\"src\":\"02:00:00:00:00:01\",\n",
            "\"chasisId\":\"02:00:00:00:00:01\",\n",
            "\"portId\":\"eth0\",\n",
            "\"ttl\":\"120\",\n",
            "\"deviceCategory\":\"router\"\n",
            "}",
        )
    );
}

#[test]
fn forwarding_table_json() {
    let mut frame = FrameBuffer::new();
    emit_ethernet_header(&mut frame, &SRC).unwrap();
    emit_chassis_id(&mut frame, ChassisIdSubtype::Local, b"dev\0").unwrap();
    MacForwardingRepr {
        interface_type: VarUint::U8(6),
        port_number: VarUint::U8(5),
        macs: &[[0xaa; 6], [0xbb; 6]],
    }
    .emit(&mut frame)
    .unwrap();
    MacForwardingRepr {
        interface_type: VarUint::U8(6),
        port_number: VarUint::U16(6),
        macs: &[],
    }
    .emit(&mut frame)
    .unwrap();
    emit_end_of_lldpdu(&mut frame).unwrap();

    let report = Report::parse(frame.as_bytes());
    let json = format!("{}", report.json());

    assert_eq!(
        json,
        concat!(
            "{\n",
            "\"src\":\"02:00:00:00:00:01\",\n",
            "\"chasisId\":\"dev\",\n",
            "\"forwardingTable\":[\n",
            "{\n",
            "\"interfaceType\":\"6\",\n",
            "\"portNumber\":\"5\",\n",
            "\"macentries\":[\n",
            "\"aa:aa:aa:aa:aa:aa\",\n",
            "\"bb:bb:bb:bb:bb:bb\"]\n",
            "},\n",
            "{\n",
            "\"interfaceType\":\"6\",\n",
            "\"portNumber\":\"6\",\n",
            "\"macentries\":[\n",
            "]\n",
            "}]\n",
            "}",
        )
    );

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["forwardingTable"][0]["macentries"][1], "bb:bb:bb:bb:bb:bb");
    assert_eq!(value["forwardingTable"][1]["portNumber"], "6");
}

#[test]
fn header_only_json() {
    let report = Report::parse(&hex::decode("ffffffffffff02000000000188cc0000").unwrap());
    assert_eq!(
        format!("{}", report.json()),
        "{\n\"src\":\"02:00:00:00:00:01\"\n}"
    );

    let report = Report::parse_payload(&[0, 0]);
    assert_eq!(format!("{}", report.json()), "{\n}");
}

#[test]
fn json_key_order() {
    let mut frame = FrameBuffer::new();
    emit_ethernet_header(&mut frame, &SRC).unwrap();
    DeviceInfoRepr::ModelNumber(b"esp32_0001").emit(&mut frame).unwrap();
    DeviceInfoRepr::ManufacturerCode(*b"123456").emit(&mut frame).unwrap();
    emit_port_description(&mut frame, b"IEEE802.3").unwrap();
    emit_ttl(&mut frame, 3).unwrap();
    emit_port_id(&mut frame, PortIdSubtype::MacAddress, &[0x02, 0, 0, 0, 0, 0x09]).unwrap();
    emit_end_of_lldpdu(&mut frame).unwrap();

    let json = format!("{}", Report::parse(frame.as_bytes()).json());
    let keys: std::vec::Vec<&str> = json
        .lines()
        .filter_map(|line| line.strip_prefix('"'))
        .filter_map(|line| line.split('"').next())
        .collect();

    assert_eq!(
        keys,
        [
            "src",
            "portId",
            "ttl",
            "portDescription",
            "manufacturerCode",
            "modelNumber"
        ]
    );
    assert!(json.contains("\"portId\":\"02:00:00:00:00:09\""));
}

#[test]
fn router_text() {
    let report = Report::parse(router_frame().as_bytes());

    assert_eq!(
        format!("{report}"),
        concat!(
            "LLDP REPORT\n",
            "---------------\n",
            "Parse result: GOOD\n",
            "Source MAC: 02:00:00:00:00:01\n",
            "  Chassis ID: 02:00:00:00:00:01\n",
            "  Chassis ID (type): 4\n",
            "  Port ID: eth0\n",
            "  Port ID (type): 1\n",
            "  Time To Live: 120\n",
            "HTIP REPORT\n",
            "  Device category: router\n",
            "------END------\n",
        )
    );
}

#[test]
fn malformed_text() {
    let report = Report::parse(&hex::decode("ffffffffffff02000000000188cc0602000a").unwrap());

    assert_eq!(
        format!("{report}"),
        concat!(
            "LLDP REPORT\n",
            "---------------\n",
            "Parse result: BAD (truncated tlv header)\n",
            "Source MAC: 02:00:00:00:00:01\n",
            "  Time To Live: 10\n",
            "HTIP REPORT\n",
            "------END------\n",
        )
    );
}

#[test]
fn htip_text() {
    let mut frame = FrameBuffer::new();
    emit_ethernet_header(&mut frame, &SRC).unwrap();
    DeviceInfoRepr::SignalStrength(80).emit(&mut frame).unwrap();
    DeviceInfoRepr::SendInterval(10).emit(&mut frame).unwrap();
    MacForwardingRepr {
        interface_type: VarUint::U8(6),
        port_number: VarUint::U16(1),
        macs: &[[0x02, 0, 0, 0, 0, 0x0a]],
    }
    .emit(&mut frame)
    .unwrap();
    emit_ether_bridge_macs(&mut frame, &[[0x02, 0, 0, 0, 0, 0x0b]]).unwrap();
    emit_end_of_lldpdu(&mut frame).unwrap();

    let report = Report::parse(frame.as_bytes());
    assert_eq!(
        format!("{report}"),
        concat!(
            "LLDP REPORT\n",
            "---------------\n",
            "Parse result: GOOD\n",
            "Source MAC: 02:00:00:00:00:01\n",
            "HTIP REPORT\n",
            "  Signal Strength: 80%\n",
            "  Send Interval: 10s\n",
            "MAC forwarding table: 1\n",
            "  iface type: 6 (1 bytes)\n",
            "  port number: 1 (2 bytes)\n",
            "  number of mac addresses: 1\n",
            "   mac: 02:00:00:00:00:0a\n",
            "Ether bridge MAC addresses: 1\n",
            "  mac: 02:00:00:00:00:0b\n",
            "------END------\n",
        )
    );
}

#[cfg(feature = "serde")]
#[test]
fn serde_matches_json() {
    let report = Report::parse(router_frame().as_bytes());

    let serialized = serde_json::to_value(&report).unwrap();
    let projected: serde_json::Value = serde_json::from_str(&format!("{}", report.json())).unwrap();

    assert_eq!(serialized, projected);
}

#[test]
fn empty_identifiers_are_not_shown() {
    let mut frame = FrameBuffer::new();
    emit_ethernet_header(&mut frame, &SRC).unwrap();
    emit_chassis_id(&mut frame, ChassisIdSubtype::Local, b"").unwrap();
    emit_port_id(&mut frame, PortIdSubtype::InterfaceName, b"").unwrap();
    emit_end_of_lldpdu(&mut frame).unwrap();

    let report = Report::parse(frame.as_bytes());
    assert_eq!(report.chassis_id().unwrap().len, 0);

    assert_eq!(
        format!("{report}"),
        concat!(
            "LLDP REPORT\n",
            "---------------\n",
            "Parse result: GOOD\n",
            "Source MAC: 02:00:00:00:00:01\n",
            "HTIP REPORT\n",
            "------END------\n",
        )
    );
    assert_eq!(
        format!("{}", report.json()),
        "{\n\"src\":\"02:00:00:00:00:01\"\n}"
    );
}
