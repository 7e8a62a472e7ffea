//! # cbspws: Cell Broadcast Header Parser
//!
//! This crate decodes the headers of
//! [Cell Broadcast](https://en.wikipedia.org/wiki/Cell_Broadcast)
//! messages, per 3GPP TS 23.041, and classifies
//! [Public Warning System](https://en.wikipedia.org/wiki/Public_warning_system)
//! alerts. It determines the wire format of a Cell Broadcast PDU,
//! extracts its routing and identification fields, and reports
//! whether the message is an ETWS warning or a CMAS alert.
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these licenses
//! carefully as they may affect your rights.
//!
//! This crate has not been certified as an emergency alert receiver
//! or for any other purpose. The author **strongly discourages** its
//! use in any safety-critical applications.
//!
//! ## Example
//!
//! You will first need to obtain Cell Broadcast PDUs from a modem.
//! Obtaining PDUs is beyond the scope of this crate. Each PDU is a
//! byte slice of 6 to about 90 octets, exactly as it was received
//! over the air.
//!
//! ```
//! use cbspws::{CbsHeader, Classification, CmasMessageClass, Format};
//!
//! # let pdu_from_modem = || vec![0x00u8, 0x00, 0x11, 0x12, 0x01, 0x11];
//! let pdu: Vec<u8> = pdu_from_modem();
//!
//! // in actual implementations, handle this error gracefully!
//! let hdr = CbsHeader::new(&pdu).expect("invalid PDU");
//! assert_eq!(Format::Gsm, hdr.format());
//!
//! match hdr.classification() {
//!     Classification::Etws(etws) => {
//!         println!("ETWS warning: {}", etws.warning());
//!     }
//!     Classification::Cmas(cmas) => {
//!         assert_eq!(CmasMessageClass::PresidentialLevelAlert, cmas.message_class());
//!     }
//!     Classification::None => {
//!         println!("ordinary broadcast on channel {}", hdr.message_identifier());
//!     }
//! }
//! ```
//!
//! Invalid PDUs are reported as a [`HeaderDecodeErr`]. Only two
//! things are errors: a PDU which is too short to contain a header,
//! and a UMTS PDU which is not a CBS message. Everything else is
//! decoded on a best-effort basis. Invalid page numbers become
//! page 1 of 1, and warning identifiers which are reserved but not
//! assigned are classified as `Unknown`.
//!
//! ## Background
//!
//! Cell Broadcast delivers short messages to every device in a
//! cell. Each message carries a *message identifier*, which acts
//! like a channel number. A range of identifiers is reserved for
//! the Public Warning System:
//!
//! * The Earthquake and Tsunami Warning System (ETWS), and
//!
//! * The Commercial Mobile Alert System (CMAS), known to the
//!   public as Wireless Emergency Alerts.
//!
//! The [`msgid`] module lists them. Each PDU arrives in one of
//! three [formats](Format). The format is decided by a
//! [`FormatDetector`], which may be replaced to accommodate
//! non-standard modems.
//!
//! The message body is *not* decoded by this crate, and multi-page
//! messages are not reassembled.
//!
//! ## Crate features
//!
//! * `chrono`: Use chrono to decode the
//!   [timestamp](EtwsInfo::primary_notification_timestamp) of ETWS
//!   primary notifications. If enabled, `chrono` becomes part of
//!   this crate's public API.

mod builder;
mod cmascodes;
mod detect;
mod header;
pub mod msgid;
mod parser;
mod pws;

pub use builder::HeaderParserBuilder;
pub use detect::{
    FormatDetector, StandardFormatDetector, MESSAGE_TYPE_CBS_MESSAGE, PDU_HEADER_LENGTH,
    PDU_LENGTH_ETWS, PDU_LENGTH_GSM,
};
pub use header::{CbsHeader, Format, GeographicalScope, HeaderDecodeErr};
pub use parser::HeaderParser;
pub use pws::{
    Classification, CmasCategory, CmasCertainty, CmasInfo, CmasMessageClass, CmasResponseType,
    CmasSeverity, CmasUrgency, EtwsInfo, EtwsWarningType,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_thread_safe() {
        assert_send_sync::<CbsHeader>();
        assert_send_sync::<HeaderParser>();
        assert_send_sync::<Classification>();

        let parser = HeaderParserBuilder::new().build();
        let pdu = [0x00u8, 0x00, 0x11, 0x14, 0x01, 0x12];
        let expect = parser.parse(&pdu);

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(expect, parser.parse(&pdu)));
            }
        });
    }
}
