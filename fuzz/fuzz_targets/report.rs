#![no_main]

use htip_frame::{Report, MAX_FRAME_LEN};

use libfuzzer_sys::{fuzz_target, Corpus};

fuzz_target!(|data: &[u8]| -> Corpus {
    if data.len() > MAX_FRAME_LEN {
        return Corpus::Reject;
    }

    let report = Report::parse(data);
    let _ = format!("{}", report.json());
    let _ = format!("{report}");

    for entry in report.forwarding_table() {
        let _ = entry.macs().count();
    }
    if let Some(ext) = report.extended_connectivity() {
        let _ = ext.hosts().count();
        let _ = ext.paired_macs().count();
    }
    if let Some(list) = report.extended_mac_list() {
        let _ = list.entries().count();
    }

    Corpus::Keep
});
