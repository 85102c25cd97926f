use colored::*;
use htip_frame::{ChassisIdSubtype, PortIdSubtype, Report, BROADCAST_ADDRESS};

struct Writer<'b> {
    buffer: &'b mut String,
    indent: usize,
}

impl<'b> Writer<'b> {
    fn new(buffer: &'b mut String) -> Self {
        Self { buffer, indent: 0 }
    }

    fn increase_indent(&mut self) {
        self.indent += 2;
    }

    fn decrease_indent(&mut self) {
        self.indent -= 2;
    }

    fn write(&mut self, s: String) {
        self.buffer.push_str(&" ".repeat(self.indent));
        self.buffer.push_str(&s);
    }

    fn writeln(&mut self, s: String) {
        self.write(s);
        self.buffer.push('\n');
    }

    fn field(&mut self, name: &str, value: impl core::fmt::Display) {
        self.writeln(format!("{}: {}", name.bold(), value));
    }

    fn section(&mut self, title: &str) {
        self.writeln(title.underline().bold().to_string());
    }
}

fn mac(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

fn text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(&[0]).unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// What the parser prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// The coloured report.
    #[default]
    Report,
    /// The JSON projection.
    Json,
}

/// Turns captured frames into printable text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameParser {
    /// What to print.
    pub output: Output,
    /// The input starts at the LLDPDU, without an Ethernet header.
    pub payload_only: bool,
}

impl FrameParser {
    /// Decode a hex string and render it. Whitespace and colons are ignored.
    pub fn parse_hex(&self, input: &str) -> Result<String, hex::FromHexError> {
        let input: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ':')
            .collect();
        let data = hex::decode(input)?;
        log::debug!("decoded {} bytes", data.len());
        Ok(self.parse(&data))
    }

    /// Decode a frame and render it.
    pub fn parse(&self, input: &[u8]) -> String {
        let report = if self.payload_only {
            Report::parse_payload(input)
        } else {
            Report::parse(input)
        };

        match self.output {
            Output::Json => format!("{}\n", report.json()),
            Output::Report => render(&report),
        }
    }
}

fn render(report: &Report) -> String {
    let mut buffer = String::new();
    let mut w = Writer::new(&mut buffer);

    // -----------------------------------------------------------------
    // Ethernet
    // -----------------------------------------------------------------
    if let Some(header) = report.ethernet_header() {
        w.section("Ethernet");
        w.increase_indent();
        w.field(
            "dst",
            format!(
                "{}{}",
                mac(header.dst()),
                if header.dst() == &BROADCAST_ADDRESS[..] {
                    " (broadcast)"
                } else {
                    ""
                }
            ),
        );
        w.field("src", mac(header.src()));
        w.field("ether type", format!("{:04x}", header.ether_type()));
        w.decrease_indent();
    }

    // -----------------------------------------------------------------
    // LLDP
    // -----------------------------------------------------------------
    w.section("LLDP");
    w.increase_indent();
    if let (Some(chassis), Some(subtype)) = (report.chassis_id(), report.chassis_id_subtype()) {
        let data = chassis.data.unwrap_or_default();
        let value = if subtype == ChassisIdSubtype::MacAddress && data.len() == 6 {
            mac(data)
        } else {
            text(data)
        };
        w.field("chassis id", format!("{value} ({subtype:?})"));
    }
    if let (Some(port), Some(subtype)) = (report.port_id(), report.port_id_subtype()) {
        let data = port.data.unwrap_or_default();
        let value = if subtype == PortIdSubtype::MacAddress && data.len() == 6 {
            mac(data)
        } else {
            text(data)
        };
        w.field("port id", format!("{value} ({subtype:?})"));
    }
    if let Some(ttl) = report.ttl() {
        w.field("ttl", ttl);
    }
    if let Some(description) = report.port_description() {
        w.field("port description", text(description));
    }
    if report.reserved_tlv_count() > 0 {
        w.field("other tlvs", report.reserved_tlv_count());
    }
    w.decrease_indent();

    // -----------------------------------------------------------------
    // HTIP
    // -----------------------------------------------------------------
    w.section("HTIP");
    w.increase_indent();
    render_device_information(&mut w, report);
    render_forwarding(&mut w, report);
    render_connectivity(&mut w, report);
    w.decrease_indent();

    // -----------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------
    w.section("Status");
    w.increase_indent();
    match report.error() {
        None => w.writeln("well formed".green().to_string()),
        Some(err) => w.writeln(format!("{}: {}", "malformed".red(), err)),
    }
    w.decrease_indent();

    buffer
}

fn render_device_information(w: &mut Writer, report: &Report) {
    let texts = [
        ("device category", report.device_category()),
        ("manufacturer code", report.manufacturer_code()),
        ("model name", report.model_name()),
        ("model number", report.model_number()),
        ("status", report.status()),
    ];
    let percentages = [
        ("channel use state", report.channel_use_state()),
        ("signal strength", report.signal_strength()),
        ("communication error", report.communication_error()),
    ];

    let present = texts.iter().any(|(_, v)| v.is_some())
        || percentages.iter().any(|(_, v)| v.is_some())
        || report.send_interval().is_some()
        || report.vendor_extension().is_some();
    if !present {
        return;
    }

    w.writeln(format!("{}", "Device Information".italic()));
    w.increase_indent();
    for (name, value) in texts {
        if let Some(value) = value {
            w.field(name, text(value));
        }
    }
    for (name, value) in percentages {
        if let Some(value) = value {
            w.field(name, format!("{value}%"));
        }
    }
    if let Some(interval) = report.send_interval() {
        w.field("send interval", format!("{interval}s"));
    }
    if let Some(ext) = report.vendor_extension() {
        w.field(
            "vendor extension",
            format!(
                "{} type {}: {}",
                text(ext.org_code()),
                ext.info_type(),
                hex::encode(ext.value().unwrap_or_default())
            ),
        );
    }
    w.decrease_indent();
}

fn render_forwarding(w: &mut Writer, report: &Report) {
    let table = report.forwarding_table();
    if table.len() > 0 {
        w.writeln(format!("{}", "MAC Forwarding Table".italic()));
        w.increase_indent();
        for entry in table {
            w.writeln(format!(
                "{} {} ({} {})",
                "port".bold(),
                entry.port_number(),
                "iface type".bold(),
                entry.interface_type()
            ));
            w.increase_indent();
            for address in entry.macs() {
                w.writeln(mac(address));
            }
            w.decrease_indent();
        }
        if report.dropped_forwarding_entries() > 0 {
            w.field("dropped", report.dropped_forwarding_entries());
        }
        w.decrease_indent();
    }

    if let Some(bridge) = report.ether_bridge_macs() {
        w.writeln(format!("{}", "Ether Bridge MACs".italic()));
        w.increase_indent();
        for address in bridge.macs() {
            w.writeln(mac(address));
        }
        w.decrease_indent();
    }

    if let Some(list) = report.extended_mac_list() {
        w.writeln(format!("{}", "Extended MAC List".italic()));
        w.increase_indent();
        for entry in list.entries() {
            w.writeln(hex::encode(entry));
        }
        w.decrease_indent();
    }
}

fn render_connectivity(w: &mut Writer, report: &Report) {
    let Some(ext) = report.extended_connectivity() else {
        return;
    };

    w.writeln(format!("{}", "Extended Connectivity".italic()));
    w.increase_indent();
    w.field("port", ext.port_number());
    for host in ext.hosts() {
        w.field("host", mac(host.mac));
        w.increase_indent();
        if let Some(signal) = host.signal_strength {
            w.field("signal strength", format!("{signal}%"));
        }
        if let Some(error) = host.error_rate {
            w.field("error rate", format!("{error}%"));
        }
        if let Some(vendor) = host.vendor_info {
            w.field("vendor", hex::encode(vendor));
        }
        w.decrease_indent();
    }
    for pair in ext.paired_macs() {
        w.field("paired", mac(pair));
    }
    if !ext.channel_usage().is_empty() {
        w.field("channel usage", format!("{:?}", ext.channel_usage()));
    }
    if let Some(vendor) = ext.port_vendor_info() {
        w.field("vendor", hex::encode(vendor));
    }
    w.decrease_indent();
}
