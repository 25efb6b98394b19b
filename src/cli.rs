//! Command line interface for the `elemfrag` diagnostic binary.
//!
//! Buffers are passed and printed as hexadecimal strings so that captured
//! frames can be pasted straight from a packet trace.

use clap::{Args, Parser, Subcommand};

use super::config::{KindArg, parse_octet};

/// Command line arguments for the `elemfrag` binary.
#[derive(Debug, Parser)]
#[command(
    name = "elemfrag",
    version,
    about = "Fragment and reassemble IEEE 802.11 elements and sub-elements"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Framing shared by every subcommand.
#[derive(Debug, Args)]
pub struct KindOpts {
    /// Unit kind: `element` or `subelement:<fragment id>`.
    #[arg(long, default_value = "element")]
    pub kind: KindArg,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report whether a payload of the given length needs fragmenting.
    Plan {
        #[command(flatten)]
        kind: KindOpts,
        /// Identifier of the lead unit.
        #[arg(long, value_parser = parse_octet)]
        id: u8,
        /// Payload length in bytes.
        #[arg(long)]
        len: usize,
    },
    /// Build a fragment sequence from a hex payload.
    Build {
        #[command(flatten)]
        kind: KindOpts,
        /// Identifier of the lead unit.
        #[arg(long, value_parser = parse_octet)]
        id: u8,
        /// Element ID Extension, used when the identifier is 255.
        #[arg(long, value_parser = parse_octet, default_value = "0")]
        ext: u8,
        /// Payload bytes as hex.
        payload: String,
    },
    /// Report whether a hex buffer starts with a fragment sequence.
    Scan {
        #[command(flatten)]
        kind: KindOpts,
        /// Buffer bytes as hex, starting at the lead unit's identifier.
        buffer: String,
    },
    /// Reassemble the fragment sequence at the start of a hex buffer.
    Defrag {
        #[command(flatten)]
        kind: KindOpts,
        /// Buffer bytes as hex, starting at the lead unit's identifier.
        buffer: String,
    },
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command, KindArg};

    #[test]
    fn parses_plan_with_subelement_kind() {
        let cli = Cli::parse_from([
            "elemfrag",
            "plan",
            "--kind",
            "subelement:254",
            "--id",
            "0",
            "--len",
            "300",
        ]);
        let Command::Plan { kind, id, len } = cli.command else {
            panic!("expected plan subcommand");
        };
        assert_eq!(kind.kind, KindArg::Subelement { fragment_id: 254 });
        assert_eq!((id, len), (0, 300));
    }

    #[test]
    fn build_defaults_to_element_kind() {
        let cli = Cli::parse_from(["elemfrag", "build", "--id", "0xff", "--ext", "107", "abcd"]);
        let Command::Build {
            kind,
            id,
            ext,
            payload,
        } = cli.command
        else {
            panic!("expected build subcommand");
        };
        assert_eq!(kind.kind, KindArg::Element);
        assert_eq!((id, ext), (255, 107));
        assert_eq!(payload, "abcd");
    }

    #[test]
    fn rejects_malformed_kind() {
        assert!(Cli::try_parse_from(["elemfrag", "scan", "--kind", "vendor", "00"]).is_err());
    }
}
