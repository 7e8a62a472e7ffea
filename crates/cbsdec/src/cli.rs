use std::fmt::Display;

use clap::{builder::TypedValueParser, error::ErrorKind, value_parser, CommandFactory, Parser};

/// Standard input filename
const STDIN_FILE: &str = "-";

const USAGE_SHORT: &str = r#"
This program accepts Cell Broadcast PDUs, as hexadecimal strings, and decodes their headers. PDUs are read from the command line or, if none are given, one per line from the input --file.

See --help for more details.
"#;

const USAGE_LONG: &str = r##"
This program accepts Cell Broadcast PDUs, as hexadecimal strings, and decodes their headers per 3GPP TS 23.041. Public Warning System messages are classified as ETWS or CMAS alerts.

PDUs may be given on the command line

    cbsdec 0000111201110000

or read one per line from a file or standard input

    cbsdec --file pdus.txt
    modem-dump | cbsdec --pws-only

Hex digits may be separated by whitespace, ":", "-", "_", or ",", and may begin with "0x". Blank lines and lines which begin with "#" are ignored. Lines which cannot be decoded are reported as warnings (see -v) and skipped.

Each decoded header is printed on one line. Use --detail to print every field.

The message body is not decoded.
"##;

const ADVANCED: &str = "Advanced Decoder Options";

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING, not even decoded headers
    #[arg(short, long)]
    pub quiet: bool,

    /// Input file (or "-" for stdin)
    ///
    /// Used only if no PDUs are given on the command line.
    /// Each line contains one hex-encoded PDU.
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    /// Print only Public Warning System messages
    #[arg(long)]
    pub pws_only: bool,

    /// Print every header field on its own line
    #[arg(long)]
    pub detail: bool,

    /// Maximum length of a GSM PDU (octets)
    ///
    /// Longer PDUs are decoded as UMTS.
    #[arg(long, default_value_t = cbspws::PDU_LENGTH_GSM)]
    #[arg(value_parser = value_parser!(u16).range(6..).map(usize::from))]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub gsm_max_len: usize,

    /// Maximum length of an ETWS primary notification (octets)
    ///
    /// Longer ETWS PDUs are decoded as secondary notifications.
    /// Zero disables primary notifications.
    #[arg(long, default_value_t = cbspws::PDU_LENGTH_ETWS)]
    #[arg(value_parser = value_parser!(u16).map(usize::from))]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub etws_max_len: usize,

    /// Hex-encoded PDUs to decode. Optional.
    pub pdu: Vec<String>,
}

impl Args {
    /// Return true if the user requests input from stdin
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}
