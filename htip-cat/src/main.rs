use clap::Parser;
use htip_cat::{FrameParser, Output};

/// `cat` for LLDP frames carrying HTIP extensions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The frame to parse, as hex. Spaces and colons are ignored.
    #[clap(value_parser(clap::builder::NonEmptyStringValueParser::new()))]
    input: String,

    /// Print the JSON projection instead of the report.
    #[arg(long)]
    json: bool,

    /// The input is a bare LLDPDU without an Ethernet header.
    #[arg(long)]
    payload: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let output = if args.json { Output::Json } else { Output::Report };

    let parser = FrameParser {
        output,
        payload_only: args.payload,
    };

    match parser.parse_hex(&args.input) {
        Ok(text) => print!("{text}"),
        Err(err) => {
            eprintln!("invalid input: {err}");
            std::process::exit(1);
        }
    }
}
