use std::collections::HashMap;
use std::env;
use std::fmt::Write;
use std::path::PathBuf;

fn main() {
    // (Variable, Type, Default value)
    let mut configs: HashMap<&str, (&str, &str)> = HashMap::from([
        ("PORT_DESCRIPTION", ("&str", "\"IEEE802.3\"")),
        ("DEVICE_CATEGORY", ("&str", "\"jaist prototype\"")),
        ("MANUFACTURER_CODE", ("[u8; 6]", "*b\"123456\"")),
        ("MODEL_NAME", ("&str", "\"esp32 prototype\"")),
        ("MODEL_NUMBER", ("&str", "\"esp32_0001\"")),
        ("STATUS", ("&str", "\"OK\"")),
        ("CHANNEL_USE_STATE", ("u8", "2")),
        ("SIGNAL_STRENGTH", ("u8", "80")),
        ("COMMUNICATION_ERROR", ("u8", "0")),
        ("SEND_INTERVAL", ("u16", "10")),
        ("TTL", ("u16", "3")),
        ("BURST", ("u8", "3")),
    ]);

    // Make sure we get rerun if needed
    println!("cargo:rerun-if-changed=build.rs");
    for name in configs.keys() {
        println!("cargo:rerun-if-env-changed=HTIP_{name}");
    }

    let mut data = String::new();

    for (var, value) in std::env::vars() {
        if let Some(name) = var.strip_prefix("HTIP_") {
            // discard from hashmap as a way of consuming the setting
            let Some((_, (ty, _))) = configs.remove_entry(name) else {
                panic!("Wrong configuration name {name}");
            };

            // Text settings are given unquoted in the environment
            let value = match ty {
                "&str" => format!("{value:?}"),
                "[u8; 6]" => {
                    assert!(
                        value.is_ascii() && value.len() == 6,
                        "HTIP_{name} must be 6 ASCII characters"
                    );
                    format!("*b{value:?}")
                }
                _ => value,
            };

            writeln!(data, "pub const {name}: {ty} = {value};").unwrap();
        }
    }

    // Take the remaining configs and write the default value to the file
    for (name, (ty, value)) in configs.iter() {
        writeln!(data, "pub const {name}: {ty} = {value};").unwrap();
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    let out_file = out_dir.join("config.rs");
    std::fs::write(out_file, data).unwrap();
}
