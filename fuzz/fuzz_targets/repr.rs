#![no_main]

use htip_frame::*;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<DeviceInfoRepr>, ChassisIdSubtype, &[u8], u16)| {
    let (fields, subtype, chassis, ttl) = input;
    if chassis.len() > u8::MAX as usize {
        return;
    }

    let mut frame = FrameBuffer::new();
    if emit_chassis_id(&mut frame, subtype, chassis).is_err() {
        return;
    }
    let _ = emit_ttl(&mut frame, ttl);

    for field in &fields {
        if field.emit(&mut frame).is_err() {
            return;
        }
    }
    if emit_end_of_lldpdu(&mut frame).is_err() {
        return;
    }

    let report = Report::parse_payload(frame.as_bytes());
    assert!(report.is_well_formed());
});
