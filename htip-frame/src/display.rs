//! Text and JSON projections of a [`Report`].

use core::fmt::{Display, Formatter, Result};

use crate::htip::{MacForwarding, VarUint};
use crate::lldp::{ChassisIdSubtype, PortIdSubtype};
use crate::report::Report;

/// A hardware address formatted as lowercase, colon separated hex.
struct Mac<'a>(&'a [u8]);

impl Display for Mac<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (i, b) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(":")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Bytes formatted as text, without escaping. One trailing NUL is dropped;
/// invalid UTF-8 is replaced.
struct Text<'a>(&'a [u8]);

impl Display for Text<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let bytes = self.0.strip_suffix(&[0]).unwrap_or(self.0);
        for chunk in bytes.utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_str("\u{fffd}")?;
            }
        }
        Ok(())
    }
}

/// Bytes formatted as plain hex.
struct Hex<'a>(&'a [u8]);

impl Display for Hex<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// A Chassis ID or Port ID: MAC address subtypes with 6 bytes are formatted as
/// a MAC address, anything else as text.
enum Identifier<'a> {
    Mac(&'a [u8]),
    Text(&'a [u8]),
}

impl<'a> Identifier<'a> {
    fn new(is_mac: bool, data: &'a [u8]) -> Self {
        if is_mac && data.len() == 6 {
            Self::Mac(data)
        } else {
            Self::Text(data)
        }
    }
}

impl Display for Identifier<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Mac(data) => Mac(data).fmt(f),
            Self::Text(data) => Text(data).fmt(f),
        }
    }
}

fn non_empty(field: Option<&[u8]>) -> Option<&[u8]> {
    field.filter(|data| !data.is_empty())
}

impl Report {
    fn chassis_id_display(&self) -> Option<Identifier<'_>> {
        let field = self.chassis_id()?;
        let data = non_empty(field.data)?;
        let is_mac = self.chassis_id_subtype() == Some(ChassisIdSubtype::MacAddress);
        Some(Identifier::new(is_mac, data))
    }

    fn port_id_display(&self) -> Option<Identifier<'_>> {
        let field = self.port_id()?;
        let data = non_empty(field.data)?;
        let is_mac = self.port_id_subtype() == Some(PortIdSubtype::MacAddress);
        Some(Identifier::new(is_mac, data))
    }

    /// Text fields of the JSON object, in key order, after `src`, `chasisId`,
    /// `portId` and `ttl`.
    fn json_text_fields(&self) -> [(&'static str, Option<&[u8]>); 5] {
        [
            ("portDescription", self.port_description()),
            ("deviceCategory", self.device_category()),
            ("manufacturerCode", self.manufacturer_code()),
            ("modelName", self.model_name()),
            ("modelNumber", self.model_number()),
        ]
    }

    /// Return the JSON projection of this report.
    ///
    /// The object has one key per line, in the order `src`, `chasisId`,
    /// `portId`, `ttl`, `portDescription`, `deviceCategory`,
    /// `manufacturerCode`, `modelName`, `modelNumber`, `forwardingTable`.
    /// Absent fields are omitted. Every value is a string; text is written
    /// verbatim, so embedded quotes are not escaped.
    pub fn json(&self) -> Json<'_> {
        Json { report: self }
    }
}

/// The JSON projection of a [`Report`], see [`Report::json`].
#[derive(Debug, Clone, Copy)]
pub struct Json<'a> {
    report: &'a Report,
}

struct Object<'a, 'b> {
    f: &'a mut Formatter<'b>,
    empty: bool,
}

impl Object<'_, '_> {
    fn key(&mut self, key: &str) -> Result {
        if !self.empty {
            self.f.write_str(",\n")?;
        }
        self.empty = false;
        write!(self.f, "\"{key}\":")
    }

    fn string(&mut self, key: &str, value: impl Display) -> Result {
        self.key(key)?;
        write!(self.f, "\"{value}\"")
    }
}

fn json_forwarding_entry(f: &mut Formatter<'_>, entry: &MacForwarding<&[u8]>) -> Result {
    write!(
        f,
        "{{\n\"interfaceType\":\"{}\",\n\"portNumber\":\"{}\",\n\"macentries\":[\n",
        entry.interface_type(),
        entry.port_number()
    )?;
    for (i, mac) in entry.macs().enumerate() {
        if i != 0 {
            f.write_str(",\n")?;
        }
        write!(f, "\"{}\"", Mac(mac))?;
    }
    f.write_str("]\n}")
}

impl Display for Json<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let report = self.report;

        f.write_str("{\n")?;
        let mut object = Object { f, empty: true };

        if let Some(src) = report.src() {
            object.string("src", Mac(src))?;
        }
        if let Some(id) = report.chassis_id_display() {
            object.string("chasisId", id)?;
        }
        if let Some(id) = report.port_id_display() {
            object.string("portId", id)?;
        }
        if let Some(ttl) = report.ttl() {
            object.string("ttl", ttl)?;
        }
        for (key, value) in report.json_text_fields() {
            if let Some(value) = non_empty(value) {
                object.string(key, Text(value))?;
            }
        }

        if report.forwarding_table().len() != 0 {
            object.key("forwardingTable")?;
            object.f.write_str("[\n")?;
            for (i, entry) in report.forwarding_table().enumerate() {
                if i != 0 {
                    object.f.write_str(",\n")?;
                }
                json_forwarding_entry(object.f, &entry)?;
            }
            object.f.write_str("]")?;
        }

        if !object.empty {
            object.f.write_str("\n")?;
        }
        object.f.write_str("}")
    }
}

fn var_uint(value: VarUint<'_>) -> impl Display + '_ {
    struct Width<'a>(VarUint<'a>);

    impl Display for Width<'_> {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            write!(f, "{} ({} bytes)", self.0, self.0.width())
        }
    }

    Width(value)
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "LLDP REPORT")?;
        writeln!(f, "---------------")?;
        match self.error() {
            None if self.is_well_formed() => writeln!(f, "Parse result: GOOD")?,
            None => writeln!(f, "Parse result: BAD")?,
            Some(err) => writeln!(f, "Parse result: BAD ({err})")?,
        }

        if let Some(src) = self.src() {
            writeln!(f, "Source MAC: {}", Mac(src))?;
        }
        if let Some(id) = self.chassis_id_display() {
            writeln!(f, "  Chassis ID: {id}")?;
            if let Some(subtype) = self.chassis_id().and_then(|field| field.count) {
                writeln!(f, "  Chassis ID (type): {subtype}")?;
            }
        }
        if let Some(id) = self.port_id_display() {
            writeln!(f, "  Port ID: {id}")?;
            if let Some(subtype) = self.port_id().and_then(|field| field.count) {
                writeln!(f, "  Port ID (type): {subtype}")?;
            }
        }
        if let Some(ttl) = self.ttl() {
            writeln!(f, "  Time To Live: {ttl}")?;
        }
        if let Some(description) = non_empty(self.port_description()) {
            writeln!(f, "  Port Description: {}", Text(description))?;
        }
        if self.reserved_tlv_count() != 0 {
            writeln!(f, "  Skipped optional TLVs: {}", self.reserved_tlv_count())?;
        }

        writeln!(f, "HTIP REPORT")?;
        let texts = [
            ("Device category", self.device_category()),
            ("Manufacturer Code", self.manufacturer_code()),
            ("Model Name", self.model_name()),
            ("Model Number", self.model_number()),
        ];
        for (label, value) in texts {
            if let Some(value) = non_empty(value) {
                writeln!(f, "  {label}: {}", Text(value))?;
            }
        }
        let percentages = [
            ("Channel Use State", self.channel_use_state()),
            ("Signal Strength", self.signal_strength()),
            ("Communication Error", self.communication_error()),
        ];
        for (label, value) in percentages {
            if let Some(value) = value {
                writeln!(f, "  {label}: {value}%")?;
            }
        }
        if let Some(status) = non_empty(self.status()) {
            writeln!(f, "  Status: {}", Text(status))?;
        }
        if let Some(interval) = self.send_interval() {
            writeln!(f, "  Send Interval: {interval}s")?;
        }
        if let Some(ext) = self.vendor_extension() {
            writeln!(
                f,
                "  Vendor Extension: {} type {} data {}",
                Text(ext.org_code()),
                ext.info_type(),
                Hex(ext.value().unwrap_or_default())
            )?;
        }

        if self.forwarding_table().len() != 0 {
            writeln!(f, "MAC forwarding table: {}", self.forwarding_table().len())?;
            for entry in self.forwarding_table() {
                writeln!(f, "  iface type: {}", var_uint(entry.interface_type()))?;
                writeln!(f, "  port number: {}", var_uint(entry.port_number()))?;
                writeln!(f, "  number of mac addresses: {}", entry.mac_count())?;
                for mac in entry.macs() {
                    writeln!(f, "   mac: {}", Mac(mac))?;
                }
            }
        }
        if self.dropped_forwarding_entries() != 0 {
            writeln!(
                f,
                "  dropped forwarding entries: {}",
                self.dropped_forwarding_entries()
            )?;
        }

        if let Some(list) = self.ether_bridge_macs().filter(|list| list.count() != 0) {
            writeln!(f, "Ether bridge MAC addresses: {}", list.count())?;
            for mac in list.macs() {
                writeln!(f, "  mac: {}", Mac(mac))?;
            }
        }

        if let Some(list) = self.extended_mac_list().filter(|list| list.count() != 0) {
            writeln!(f, "Extended MAC list: {}", list.count())?;
            for entry in list.entries() {
                writeln!(f, "  mac: {}", Hex(entry))?;
            }
        }

        if let Some(ext) = self.extended_connectivity() {
            writeln!(
                f,
                "Extended connectivity: port {}",
                var_uint(ext.port_number())
            )?;
            for host in ext.hosts() {
                write!(f, "  host: {}", Hex(host.mac))?;
                if let Some(signal) = host.signal_strength {
                    write!(f, " signal {signal}%")?;
                }
                if let Some(error) = host.error_rate {
                    write!(f, " error {error}%")?;
                }
                writeln!(f)?;
            }
            for mac in ext.paired_macs() {
                writeln!(f, "  paired: {}", Hex(mac))?;
            }
            if !ext.channel_usage().is_empty() {
                writeln!(f, "  channel usage: {}", Hex(ext.channel_usage()))?;
            }
        }

        writeln!(f, "------END------")
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use core::fmt::Display;

    use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

    use super::{non_empty, Mac, Text};
    use crate::htip::MacForwarding;
    use crate::report::Report;

    struct Collect<T: Display>(T);

    impl<T: Display> Serialize for Collect<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(&self.0)
        }
    }

    struct Macs<'a>(&'a MacForwarding<&'a [u8]>);

    impl Serialize for Macs<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.0.mac_count()))?;
            for mac in self.0.macs() {
                seq.serialize_element(&Collect(Mac(mac)))?;
            }
            seq.end()
        }
    }

    struct Entry<'a>(MacForwarding<&'a [u8]>);

    impl Serialize for Entry<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(3))?;
            map.serialize_entry("interfaceType", &Collect(self.0.interface_type()))?;
            map.serialize_entry("portNumber", &Collect(self.0.port_number()))?;
            map.serialize_entry("macentries", &Macs(&self.0))?;
            map.end()
        }
    }

    struct Table<'a>(&'a Report);

    impl Serialize for Table<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.0.forwarding_table().len()))?;
            for entry in self.0.forwarding_table() {
                seq.serialize_element(&Entry(entry))?;
            }
            seq.end()
        }
    }

    /// Serializes the same object as [`Report::json`], with escaped strings.
    impl Serialize for Report {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;

            if let Some(src) = self.src() {
                map.serialize_entry("src", &Collect(Mac(src)))?;
            }
            if let Some(id) = self.chassis_id_display() {
                map.serialize_entry("chasisId", &Collect(id))?;
            }
            if let Some(id) = self.port_id_display() {
                map.serialize_entry("portId", &Collect(id))?;
            }
            if let Some(ttl) = self.ttl() {
                map.serialize_entry("ttl", &Collect(ttl))?;
            }
            for (key, value) in self.json_text_fields() {
                if let Some(value) = non_empty(value) {
                    map.serialize_entry(key, &Collect(Text(value)))?;
                }
            }
            if self.forwarding_table().len() != 0 {
                map.serialize_entry("forwardingTable", &Table(self))?;
            }

            map.end()
        }
    }
}
