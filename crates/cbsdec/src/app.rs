//! Line-oriented decoding loop
//!
//! Each input line holds one hex-encoded PDU. Lines are decoded
//! independently: a line which cannot be decoded is reported and
//! skipped, and decoding continues with the next line.

use std::fmt;
use std::io::BufRead;

use anyhow::{anyhow, Context};
use lazy_static::lazy_static;
use log::{debug, error, warn};
use regex::Regex;

use cbspws::{CbsHeader, Classification, CmasInfo, EtwsInfo, FormatDetector, HeaderParser};

use crate::cli::Args;

/// Run the application
///
/// Decodes every line of `input` with the given `parser` and
/// prints the results to stdout, as configured by `cfg`. Returns
/// a tally of what was decoded once `input` is exhausted.
pub fn run<D, I, S>(cfg: &Config, parser: &HeaderParser<D>, input: I) -> Summary
where
    D: FormatDetector,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut summary = Summary::default();

    for (lineno, line) in input.into_iter().enumerate() {
        let hdr = match process(parser, line.as_ref()) {
            Ok(Some(hdr)) => hdr,
            Ok(None) => continue,
            Err(err) => {
                warn!("input {}: {:#}", lineno + 1, err);
                summary.failed += 1;
                continue;
            }
        };

        summary.decoded += 1;
        if hdr.is_emergency_message() {
            summary.pws += 1;
        } else if cfg.pws_only {
            debug!("input {}: skipped: not a warning message", lineno + 1);
            continue;
        }

        if cfg.quiet {
            continue;
        }

        if cfg.detail {
            println!("{}", Detail(&hdr));
        } else {
            println!("{}", hdr);
        }
    }

    summary
}

/// Split `reader` into lines
///
/// Lines which are not valid UTF-8 are converted lossily, so
/// they fail to decode and are reported like any other bad line.
/// Input ends at EOF or at the first read error, which is logged.
pub fn input_lines<R>(reader: R) -> impl Iterator<Item = String>
where
    R: BufRead,
{
    reader.split(b'\n').map_while(|line| match line {
        Ok(line) => Some(String::from_utf8_lossy(&line).into_owned()),
        Err(err) => {
            error!("unable to read input: {}", err);
            None
        }
    })
}

/// Output configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    quiet: bool,
    pws_only: bool,
    detail: bool,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            quiet: args.quiet,
            pws_only: args.pws_only,
            detail: args.detail,
        }
    }
}

/// Tally of decoded input
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Headers decoded successfully
    pub decoded: usize,

    /// Lines which could not be decoded
    pub failed: usize,

    /// Decoded headers which are public warning messages
    pub pws: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "decoded {} PDU(s), {} public warning(s); {} failed",
            self.decoded, self.pws, self.failed
        )
    }
}

/// Multi-line rendering of every header field
struct Detail<'hdr>(&'hdr CbsHeader);

impl<'hdr> fmt::Display for Detail<'hdr> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hdr = self.0;
        writeln!(f, "{}", hdr)?;
        writeln!(f, "    format:             {}", hdr.format())?;
        writeln!(f, "    geographical scope: {}", hdr.geographical_scope())?;
        writeln!(
            f,
            "    serial number:      0x{:04x} (message code {}, update {})",
            hdr.serial_number(),
            hdr.message_code(),
            hdr.update_number()
        )?;
        writeln!(
            f,
            "    message identifier: 0x{:04x} ({})",
            hdr.message_identifier(),
            hdr.message_identifier()
        )?;
        if let Some(dcs) = hdr.data_coding_scheme() {
            writeln!(f, "    data coding scheme: 0x{:02x}", dcs)?;
        }
        if let (Some(index), Some(count)) = (hdr.page_index(), hdr.number_of_pages()) {
            writeln!(f, "    page:               {} of {}", index, count)?;
        }

        match hdr.classification() {
            Classification::None => writeln!(f, "    classification:     none"),
            Classification::Etws(etws) => fmt_etws(f, etws),
            Classification::Cmas(cmas) => fmt_cmas(f, cmas),
        }
    }
}

fn fmt_etws(f: &mut fmt::Formatter<'_>, etws: &EtwsInfo) -> fmt::Result {
    writeln!(
        f,
        "    classification:     ETWS {}",
        if etws.is_primary() {
            "primary notification"
        } else {
            "secondary notification"
        }
    )?;
    writeln!(
        f,
        "    warning type:       {} ({})",
        etws.warning(),
        etws.warning_type()
    )?;
    writeln!(f, "    user alert:         {}", etws.is_emergency_user_alert())?;
    writeln!(f, "    popup:              {}", etws.is_popup_alert())?;
    if let Some(ts) = etws.primary_notification_timestamp() {
        writeln!(f, "    timestamp:          {}", ts)?;
    }
    if let Some(octet) = etws.primary_warning_type_octet() {
        writeln!(f, "    octet 4 type:       {}", octet)?;
    }
    if let Some(sig) = etws.primary_notification_signature() {
        writeln!(f, "    signature:          {}", to_hex(sig))?;
    }
    Ok(())
}

fn fmt_cmas(f: &mut fmt::Formatter<'_>, cmas: &CmasInfo) -> fmt::Result {
    writeln!(f, "    classification:     CMAS")?;
    writeln!(f, "    message class:      {}", cmas.message_class())?;
    writeln!(f, "    severity:           {}", cmas.severity())?;
    writeln!(f, "    urgency:            {}", cmas.urgency())?;
    writeln!(f, "    certainty:          {}", cmas.certainty())?;
    writeln!(f, "    category:           {}", cmas.category())?;
    writeln!(f, "    response type:      {}", cmas.response_type())
}

// Decode one input line
//
// Blank lines and comments produce `Ok(None)`.
fn process<D>(parser: &HeaderParser<D>, line: &str) -> Result<Option<CbsHeader>, anyhow::Error>
where
    D: FormatDetector,
{
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let pdu = parse_hex(line)?;
    let hdr = parser
        .parse(&pdu)
        .with_context(|| format!("unable to decode PDU \"{}\"", line))?;

    debug!("decoded {} octet PDU as {}", pdu.len(), hdr.format());
    Ok(Some(hdr))
}

/// Convert a hexadecimal string to bytes
///
/// The string may begin with `0x` and may contain separators
/// between digits.
fn parse_hex(text: &str) -> Result<Vec<u8>, anyhow::Error> {
    lazy_static! {
        static ref PREFIX: Regex = Regex::new(r"^\s*0[xX]").expect("bad prefix regexp");
        static ref SEPARATORS: Regex = Regex::new(r"[\s:,_\-]+").expect("bad separator regexp");
        static ref HEX_OCTETS: Regex =
            Regex::new(r"^(?:[0-9A-Fa-f]{2})+$").expect("bad hex regexp");
    }

    let digits = PREFIX.replace(text, "");
    let digits = SEPARATORS.replace_all(&digits, "");
    if !HEX_OCTETS.is_match(&digits) {
        return Err(anyhow!(
            "\"{}\" is not an even number of hexadecimal digits",
            text.trim()
        ));
    }

    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| anyhow!("invalid hex octet in \"{}\"", text.trim()))
        })
        .collect()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use cbspws::{CmasMessageClass, EtwsWarningType, Format, HeaderParserBuilder};

    #[test]
    fn test_parse_hex() {
        assert_eq!(vec![0x00, 0x11, 0xab], parse_hex("0011ab").unwrap());
        assert_eq!(vec![0x00, 0x11, 0xab], parse_hex("0x0011AB").unwrap());
        assert_eq!(vec![0x00, 0x11, 0xab], parse_hex(" 00:11-ab ").unwrap());
        assert_eq!(vec![0x00, 0x11, 0xab], parse_hex("00 11_ab,").unwrap());

        assert!(parse_hex("").is_err());
        assert!(parse_hex("0x").is_err());
        assert!(parse_hex("001").is_err());
        assert!(parse_hex("0g11").is_err());
        assert!(parse_hex("0 01").is_err());
    }

    #[test]
    fn test_process() {
        let parser = HeaderParserBuilder::new().build();

        assert!(process(&parser, "").unwrap().is_none());
        assert!(process(&parser, "   ").unwrap().is_none());
        assert!(process(&parser, "# a comment").unwrap().is_none());

        // too short
        assert!(process(&parser, "0011").is_err());

        // not hex
        assert!(process(&parser, "hello world").is_err());

        // UMTS but not a CBS message
        let mut umts = "02".to_owned();
        umts.push_str(&"00".repeat(99));
        assert!(process(&parser, &umts).is_err());

        let hdr = process(&parser, "0x00 00 11 12 01 11").unwrap().unwrap();
        assert_eq!(Format::Gsm, hdr.format());
        assert_eq!(
            CmasMessageClass::PresidentialLevelAlert,
            hdr.cmas_info().unwrap().message_class()
        );

        let hdr = process(&parser, "00:00:11:01:01:80").unwrap().unwrap();
        assert_eq!(Format::EtwsPrimary, hdr.format());
        assert_eq!(EtwsWarningType::Tsunami, hdr.etws_info().unwrap().warning());
    }

    #[test]
    fn test_run_summary() {
        let parser = HeaderParserBuilder::new().build();
        let cfg = Config {
            quiet: true,
            pws_only: true,
            detail: false,
        };

        let input = [
            "# test vectors",
            "000011120111",
            "0000003201 11",
            "",
            "00001103 0180",
            "zz",
            "0011",
        ];

        let summary = run(&cfg, &parser, input.iter());
        assert_eq!(
            Summary {
                decoded: 3,
                failed: 2,
                pws: 2,
            },
            summary
        );
        assert_eq!(
            "decoded 3 PDU(s), 2 public warning(s); 2 failed",
            format!("{}", summary)
        );
    }

    #[test]
    fn test_input_lines() {
        let parser = HeaderParserBuilder::new().build();
        let cfg = Config {
            quiet: true,
            ..Config::default()
        };

        // a line of garbage bytes does not end the input
        let input: &[u8] = b"000011120111\n\xff\xfe\r\n000011120111\n000011120111";
        let lines: Vec<String> = input_lines(input).collect();
        assert_eq!(4, lines.len());
        assert_eq!("000011120111", lines[3]);

        let summary = run(&cfg, &parser, input_lines(input));
        assert_eq!(
            Summary {
                decoded: 3,
                failed: 1,
                pws: 3,
            },
            summary
        );
    }

    #[test]
    fn test_detail() {
        let hdr = CbsHeader::new(&[0x40, 0x10, 0x11, 0x13, 0x01, 0x23]).unwrap();
        let out = format!("{}", Detail(&hdr));
        assert!(out.contains("message identifier: 0x1113 (4371)"));
        assert!(out.contains("message code 1, update 0"));
        assert!(out.contains("page:               2 of 3"));
        assert!(out.contains("classification:     CMAS"));

        let hdr = CbsHeader::new(&[0x00, 0x00, 0x00, 0x32, 0x01, 0x11]).unwrap();
        let out = format!("{}", Detail(&hdr));
        assert!(out.contains("classification:     none"));

        let hdr = CbsHeader::new(&[0x00, 0x00, 0x11, 0x00, 0x01, 0x80]).unwrap();
        let out = format!("{}", Detail(&hdr));
        assert!(out.contains("ETWS primary notification"));
        assert!(out.contains("user alert:         true"));
        assert!(out.contains("popup:              true"));
        assert!(out.contains("octet 4 type:       0"));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!("00ff10", to_hex(&[0x00, 0xff, 0x10]));
        assert_eq!("", to_hex(&[]));
    }
}
