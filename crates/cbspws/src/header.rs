//! Cell Broadcast message header

use std::fmt;

use log::debug;
use strum::EnumMessage;
use thiserror::Error;

use crate::builder::HeaderParserBuilder;
use crate::msgid;
use crate::pws::{Classification, CmasInfo, EtwsInfo};

/// Error decoding a `CbsHeader`
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderDecodeErr {
    /// The PDU is too short to contain a header
    #[error("invalid CBS PDU: shorter than the six-octet header")]
    InvalidPdu,

    /// The UMTS message type is not a CBS message
    #[error("unsupported UMTS message type {0}")]
    UnsupportedMessageType(u8),
}

/// Wire format of a Cell Broadcast PDU
///
/// See [`FormatDetector`](crate::FormatDetector).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum Format {
    /// GSM format (3GPP TS 23.041 §9.4.1.2)
    #[strum(serialize = "GSM", detailed_message = "GSM")]
    Gsm,

    /// UMTS format (3GPP TS 23.041 §9.4.2.2)
    #[strum(serialize = "UMTS", detailed_message = "UMTS")]
    Umts,

    /// ETWS primary notification (3GPP TS 23.041 §9.4.1.3)
    #[strum(serialize = "ETWS", detailed_message = "ETWS primary notification")]
    EtwsPrimary,
}

impl Format {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Short string representation, like "`GSM`"
    pub fn as_str(&self) -> &'static str {
        self.get_serializations()[0]
    }
}

impl fmt::Display for Format {
    /// Printable string
    ///
    /// * The normal form is a human-readable string
    /// * The alternate form is the short string like "`GSM`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

/// Geographical scope of the serial number
///
/// The scope determines the area over which a message with the
/// same serial number and message identifier is considered to
/// be the same message. It also signals when the message should
/// be displayed.
///
/// ```
/// use cbspws::GeographicalScope;
///
/// assert_eq!(GeographicalScope::LocationAreaWide, GeographicalScope::from(2));
/// assert_eq!(3, GeographicalScope::CellWide as u8);
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::EnumMessage,
)]
#[repr(u8)]
pub enum GeographicalScope {
    /// Cell wide, display immediately
    #[strum(detailed_message = "Cell wide (immediate)")]
    CellWideImmediate = 0,

    /// PLMN wide
    #[strum(detailed_message = "PLMN wide")]
    PlmnWide = 1,

    /// Location area (or service area) wide
    #[strum(detailed_message = "Location area wide")]
    LocationAreaWide = 2,

    /// Cell wide
    #[strum(detailed_message = "Cell wide")]
    CellWide = 3,
}

impl GeographicalScope {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }
}

impl From<u8> for GeographicalScope {
    /// Convert from the two-bit scope field
    ///
    /// Only the two least significant bits are used.
    fn from(gs: u8) -> Self {
        match gs & 0x03 {
            0 => GeographicalScope::CellWideImmediate,
            1 => GeographicalScope::PlmnWide,
            2 => GeographicalScope::LocationAreaWide,
            _ => GeographicalScope::CellWide,
        }
    }
}

impl fmt::Display for GeographicalScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// A decoded Cell Broadcast message header
///
/// Decodes the header of a Cell Broadcast PDU, as delivered by
/// the modem, per 3GPP TS 23.041. The message body is not
/// decoded. Multi-page messages are not reassembled: each
/// page is its own PDU with its own header.
///
/// ```
/// use cbspws::{CbsHeader, Format, GeographicalScope};
///
/// // GSM format: serial number 0x4012, message identifier 50,
/// // DCS 0x0f, page 2 of 3
/// let hdr = CbsHeader::new(&[0x40, 0x12, 0x00, 0x32, 0x0f, 0x23]).unwrap();
///
/// assert_eq!(Format::Gsm, hdr.format());
/// assert_eq!(GeographicalScope::PlmnWide, hdr.geographical_scope());
/// assert_eq!(0x4012, hdr.serial_number());
/// assert_eq!(0x0001, hdr.message_code());
/// assert_eq!(0x2, hdr.update_number());
/// assert_eq!(50, hdr.message_identifier());
/// assert_eq!(Some(0x0f), hdr.data_coding_scheme());
/// assert_eq!(Some(2), hdr.page_index());
/// assert_eq!(Some(3), hdr.number_of_pages());
/// assert!(!hdr.is_emergency_message());
/// ```
///
/// Headers whose message identifier falls in the Public Warning
/// System range are [classified](Classification) as ETWS or
/// CMAS warnings.
///
/// ```
/// # use cbspws::CbsHeader;
/// use cbspws::{CmasMessageClass, CmasSeverity};
///
/// let hdr = CbsHeader::new(&[0x00, 0x00, 0x11, 0x1c, 0x01, 0x11]).unwrap();
/// assert!(hdr.is_emergency_message());
///
/// let cmas = hdr.cmas_info().expect("not CMAS");
/// assert_eq!(CmasMessageClass::RequiredMonthlyTest, cmas.message_class());
/// assert_eq!(CmasSeverity::Unknown, cmas.severity());
/// ```
///
/// Only malformed PDUs fail to decode. Broken page numbers and
/// unrecognized warning identifiers are corrected or reported
/// as `Unknown`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CbsHeader {
    format: Format,
    geographical_scope: GeographicalScope,
    serial_number: u16,
    message_identifier: u16,

    // not applicable to ETWS primary notifications
    data_coding_scheme: Option<u8>,
    pages: Option<(u8, u8)>,

    classification: Classification,
}

impl CbsHeader {
    /// Decode a header from a complete PDU
    ///
    /// Uses the 3GPP TS 23.041 format detection rules. To use
    /// other rules, see [`HeaderParser`](crate::HeaderParser).
    pub fn new(pdu: &[u8]) -> Result<Self, HeaderDecodeErr> {
        HeaderParserBuilder::new().build().parse(pdu)
    }

    /// Extract fields from a `pdu` of the given `format`
    ///
    /// The `pdu` must be at least
    /// [`PDU_HEADER_LENGTH`](crate::PDU_HEADER_LENGTH) long.
    pub(crate) fn extract(format: Format, pdu: &[u8]) -> Self {
        match format {
            Format::Gsm => {
                let (geographical_scope, serial_number, message_identifier) = gsm_common(pdu);
                Self {
                    format,
                    geographical_scope,
                    serial_number,
                    message_identifier,
                    data_coding_scheme: Some(pdu[4]),
                    pages: Some(page_descriptor(pdu[5])),
                    classification: Classification::from_identifiers(
                        message_identifier,
                        serial_number,
                    ),
                }
            }
            Format::EtwsPrimary => {
                let (geographical_scope, serial_number, message_identifier) = gsm_common(pdu);
                let classification = match EtwsInfo::from_primary_notification(pdu) {
                    Some(etws) => Classification::Etws(etws),
                    None => Classification::from_identifiers(message_identifier, serial_number),
                };
                Self {
                    format,
                    geographical_scope,
                    serial_number,
                    message_identifier,
                    data_coding_scheme: None,
                    pages: None,
                    classification,
                }
            }
            Format::Umts => {
                let message_identifier = u16::from_be_bytes([pdu[1], pdu[2]]);
                let serial_number = u16::from_be_bytes([pdu[3], pdu[4]]);

                // UMTS PDUs carry one header for all pages
                Self {
                    format,
                    geographical_scope: GeographicalScope::from(pdu[3] >> 6),
                    serial_number,
                    message_identifier,
                    data_coding_scheme: Some(pdu[5]),
                    pages: Some((1, 1)),
                    classification: Classification::from_identifiers(
                        message_identifier,
                        serial_number,
                    ),
                }
            }
        }
    }

    /// Wire format
    pub fn format(&self) -> Format {
        self.format
    }

    /// Geographical scope
    ///
    /// The two most significant bits of the serial number. Use
    /// `as u8` to obtain the numeric value, `0..=3`.
    pub fn geographical_scope(&self) -> GeographicalScope {
        self.geographical_scope
    }

    /// Serial number
    ///
    /// The complete 16-bit serial number, including the
    /// geographical scope, message code, and update number.
    pub fn serial_number(&self) -> u16 {
        self.serial_number
    }

    /// Message code
    ///
    /// The ten-bit message code portion of the serial number.
    /// For ETWS secondary notifications, the two most significant
    /// bits of the message code are the alert flags.
    pub fn message_code(&self) -> u16 {
        (self.serial_number >> 4) & 0x03ff
    }

    /// Update number
    ///
    /// The four-bit update number portion of the serial number.
    pub fn update_number(&self) -> u8 {
        (self.serial_number & 0x000f) as u8
    }

    /// Message identifier
    ///
    /// Identifies the source and type of the message. This is
    /// also used as the *service category*, which is the CDMA
    /// name for the same concept. The two share one value space
    /// and one [`Classification`].
    pub fn message_identifier(&self) -> u16 {
        self.message_identifier
    }

    /// Service category
    ///
    /// Same as [`message_identifier()`](CbsHeader::message_identifier).
    #[inline]
    pub fn service_category(&self) -> u16 {
        self.message_identifier
    }

    /// Data coding scheme
    ///
    /// The character set and language of the message body. Not
    /// applicable to ETWS primary notifications, which have no
    /// body.
    pub fn data_coding_scheme(&self) -> Option<u8> {
        self.data_coding_scheme
    }

    /// Page index (1-based)
    ///
    /// Not applicable to ETWS primary notifications. UMTS
    /// headers are always page 1 of 1. GSM headers with invalid
    /// page numbers are also page 1 of 1.
    pub fn page_index(&self) -> Option<u8> {
        self.pages.map(|(index, _count)| index)
    }

    /// Total number of pages
    ///
    /// See [`page_index()`](CbsHeader::page_index).
    pub fn number_of_pages(&self) -> Option<u8> {
        self.pages.map(|(_index, count)| count)
    }

    /// Public Warning System classification
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// ETWS information, if this is an ETWS warning
    pub fn etws_info(&self) -> Option<&EtwsInfo> {
        self.classification.etws()
    }

    /// CMAS information, if this is a CMAS alert
    pub fn cmas_info(&self) -> Option<&CmasInfo> {
        self.classification.cmas()
    }

    /// Is the message identifier in the Public Warning System range?
    ///
    /// This includes identifiers which are reserved for PWS but
    /// which are neither ETWS nor CMAS.
    pub fn is_emergency_message(&self) -> bool {
        msgid::is_pws(self.message_identifier)
    }

    /// Is this an ETWS warning?
    pub fn is_etws_message(&self) -> bool {
        self.etws_info().is_some()
    }

    /// Is this a CMAS alert?
    pub fn is_cmas_message(&self) -> bool {
        self.cmas_info().is_some()
    }

    /// Is this an ETWS primary notification?
    pub fn is_etws_primary_notification(&self) -> bool {
        self.format == Format::EtwsPrimary
    }

    /// Was this header received in UMTS format?
    pub fn is_umts_format(&self) -> bool {
        self.format == Format::Umts
    }

    /// Release the classification
    ///
    /// Destroys this object and returns its classification.
    pub fn into_classification(self) -> Classification {
        self.classification
    }
}

impl fmt::Display for CbsHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#} GS={} serial=0x{:04x} id=0x{:04x}",
            self.format, self.geographical_scope as u8, self.serial_number, self.message_identifier
        )?;

        if let Some(dcs) = self.data_coding_scheme {
            write!(f, " DCS=0x{:02x}", dcs)?;
        }

        if let Some((index, count)) = self.pages {
            write!(f, " page {}/{}", index, count)?;
        }

        match &self.classification {
            Classification::None => Ok(()),
            cls => write!(f, ": {}", cls),
        }
    }
}

impl TryFrom<&[u8]> for CbsHeader {
    type Error = HeaderDecodeErr;

    #[inline]
    fn try_from(pdu: &[u8]) -> Result<Self, Self::Error> {
        Self::new(pdu)
    }
}

// Scope, serial number, and message identifier of GSM-like PDUs
//
// Shared by GSM and ETWS primary notifications.
fn gsm_common(pdu: &[u8]) -> (GeographicalScope, u16, u16) {
    (
        GeographicalScope::from(pdu[0] >> 6),
        u16::from_be_bytes([pdu[0], pdu[1]]),
        u16::from_be_bytes([pdu[2], pdu[3]]),
    )
}

// Page index and count from the GSM page parameter octet
//
// The high nibble is the page index and the low nibble is the
// page count. Invalid combinations are treated as page 1 of 1.
fn page_descriptor(octet: u8) -> (u8, u8) {
    let index = octet >> 4;
    let count = octet & 0x0f;
    if index == 0 || count == 0 || index > count {
        debug!(
            "header: invalid page parameter 0x{:02x}; assuming page 1 of 1",
            octet
        );
        (1, 1)
    } else {
        (index, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::detect::PDU_HEADER_LENGTH;
    use crate::pws::{CmasCertainty, CmasMessageClass, CmasSeverity, CmasUrgency, EtwsWarningType};

    // GSM PDU of `len` octets with the given header octets
    fn gsm(len: usize, header: [u8; 6]) -> Vec<u8> {
        let mut pdu = vec![0x55u8; len];
        pdu[..6].copy_from_slice(&header);
        pdu
    }

    #[test]
    fn test_page_descriptor() {
        assert_eq!((1, 1), page_descriptor(0x00));
        assert_eq!((1, 1), page_descriptor(0x21));
        assert_eq!((1, 1), page_descriptor(0x10));
        assert_eq!((1, 1), page_descriptor(0x05));
        assert_eq!((1, 1), page_descriptor(0x11));
        assert_eq!((2, 3), page_descriptor(0x23));
        assert_eq!((15, 15), page_descriptor(0xff));
    }

    #[test]
    fn test_too_short() {
        for len in 0..PDU_HEADER_LENGTH {
            assert_eq!(
                Err(HeaderDecodeErr::InvalidPdu),
                CbsHeader::new(&vec![0x01u8; len])
            );
        }
    }

    #[test]
    fn test_gsm() {
        let pdu = gsm(88, [0xc0, 0x12, 0x03, 0xe8, 0x01, 0x00]);
        let hdr = CbsHeader::new(&pdu).expect("bad pdu");

        assert_eq!(Format::Gsm, hdr.format());
        assert_eq!(GeographicalScope::CellWide, hdr.geographical_scope());
        assert_eq!(3, hdr.geographical_scope() as u8);
        assert_eq!(0xc012, hdr.serial_number());
        assert_eq!(1000, hdr.message_identifier());
        assert_eq!(1000, hdr.service_category());
        assert_eq!(Some(0x01), hdr.data_coding_scheme());
        assert_eq!(Some(1), hdr.page_index());
        assert_eq!(Some(1), hdr.number_of_pages());
        assert_eq!(&Classification::None, hdr.classification());
        assert!(!hdr.is_emergency_message());
        assert!(!hdr.is_etws_message());
        assert!(!hdr.is_cmas_message());
        assert!(!hdr.is_etws_primary_notification());
        assert!(!hdr.is_umts_format());

        let hdr = CbsHeader::new(&gsm(88, [0x00, 0x00, 0x00, 0x32, 0x0f, 0x21])).unwrap();
        assert_eq!(Some(1), hdr.page_index());
        assert_eq!(Some(1), hdr.number_of_pages());

        let hdr = CbsHeader::new(&gsm(88, [0x00, 0x00, 0x00, 0x32, 0x0f, 0x34])).unwrap();
        assert_eq!(Some(3), hdr.page_index());
        assert_eq!(Some(4), hdr.number_of_pages());
    }

    #[test]
    fn test_gsm_classification_depends_only_on_identifier() {
        for id in [0x0032u16, 0x1108, 0x1112, 0x1113, 0x111c, 0x112f, 0x1130, 0x18ff] {
            let expect = Classification::from_identifiers(id, 0x0000);
            let [hi, lo] = id.to_be_bytes();
            for other in [0x00u8, 0x21, 0x5a, 0xff] {
                let pdu = gsm(88, [0x0f, 0x0f, hi, lo, other, other]);
                let hdr = CbsHeader::new(&pdu).unwrap();
                assert_eq!(Format::Gsm, hdr.format());
                assert_eq!(&expect, hdr.classification());
            }
        }
    }

    #[test]
    fn test_gsm_etws_secondary() {
        // too long for a primary notification, so the flags are
        // in the serial number
        let hdr = CbsHeader::new(&gsm(88, [0x30, 0x00, 0x11, 0x01, 0x01, 0x80])).unwrap();
        assert_eq!(Format::Gsm, hdr.format());
        assert_eq!(Some(1), hdr.page_index());

        let etws = hdr.etws_info().expect("not ETWS");
        assert_eq!(1, etws.warning_type());
        assert!(etws.is_emergency_user_alert());
        assert!(etws.is_popup_alert());
        assert!(!etws.is_primary());
        assert_eq!(None, etws.warning_security_info());
        assert!(hdr.is_etws_message());
        assert!(hdr.is_emergency_message());

        // octets 4 and 5 do not matter here
        let hdr = CbsHeader::new(&gsm(57, [0x00, 0x00, 0x11, 0x00, 0x01, 0x80])).unwrap();
        let etws = hdr.etws_info().expect("not ETWS");
        assert_eq!(0, etws.warning_type());
        assert!(!etws.is_emergency_user_alert());
        assert!(!etws.is_popup_alert());
    }

    #[test]
    fn test_etws_primary() {
        let hdr = CbsHeader::new(&[0x30, 0x00, 0x11, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(Format::EtwsPrimary, hdr.format());
        assert!(hdr.is_etws_primary_notification());
        assert_eq!(None, hdr.data_coding_scheme());
        assert_eq!(None, hdr.page_index());
        assert_eq!(None, hdr.number_of_pages());

        // serial number flags are ignored for primary notifications
        let etws = hdr.etws_info().expect("not ETWS");
        assert_eq!(0, etws.warning_type());
        assert_eq!(EtwsWarningType::Earthquake, etws.warning());
        assert!(!etws.is_emergency_user_alert());
        assert!(!etws.is_popup_alert());
        assert!(etws.is_primary());
        assert_eq!(None, etws.warning_security_info());

        let mut pdu = vec![0x00, 0x00, 0x11, 0x01, 0x01, 0x80];
        pdu.extend(0..50u8);
        let hdr = CbsHeader::new(&pdu).unwrap();
        assert_eq!(Format::EtwsPrimary, hdr.format());

        let etws = hdr.etws_info().expect("not ETWS");
        assert_eq!(1, etws.warning_type());
        assert!(etws.is_emergency_user_alert());
        assert!(etws.is_popup_alert());
        assert_eq!(Some(&pdu[6..]), etws.warning_security_info());
        assert_eq!(Some(&pdu[13..56]), etws.primary_notification_signature());
    }

    #[test]
    fn test_umts() {
        let mut pdu = vec![0u8; 90];
        pdu[..6].copy_from_slice(&[0x01, 0x11, 0x13, 0x80, 0x25, 0x0f]);
        let hdr = CbsHeader::new(&pdu).unwrap();

        assert_eq!(Format::Umts, hdr.format());
        assert!(hdr.is_umts_format());
        assert_eq!(0x1113, hdr.message_identifier());
        assert_eq!(GeographicalScope::LocationAreaWide, hdr.geographical_scope());
        assert_eq!(0x8025, hdr.serial_number());
        assert_eq!(Some(0x0f), hdr.data_coding_scheme());
        assert_eq!(Some(1), hdr.page_index());
        assert_eq!(Some(1), hdr.number_of_pages());

        let cmas = hdr.cmas_info().expect("not CMAS");
        assert_eq!(CmasMessageClass::ExtremeThreat, cmas.message_class());
        assert_eq!(CmasSeverity::Extreme, cmas.severity());
        assert_eq!(CmasUrgency::Immediate, cmas.urgency());
        assert_eq!(CmasCertainty::Observed, cmas.certainty());

        // ETWS over UMTS is always a secondary notification
        pdu[1..5].copy_from_slice(&[0x11, 0x02, 0x20, 0x00]);
        let hdr = CbsHeader::new(&pdu).unwrap();
        let etws = hdr.etws_info().expect("not ETWS");
        assert_eq!(2, etws.warning_type());
        assert!(etws.is_emergency_user_alert());
        assert!(!etws.is_popup_alert());
        assert!(!etws.is_primary());

        pdu[0] = 0x02;
        assert_eq!(
            Err(HeaderDecodeErr::UnsupportedMessageType(2)),
            CbsHeader::new(&pdu)
        );
    }

    #[test]
    fn test_cmas_required_monthly_test() {
        let hdr = CbsHeader::new(&gsm(88, [0x00, 0x00, 0x11, 0x1c, 0x01, 0x11])).unwrap();
        let cmas = hdr.cmas_info().expect("not CMAS");
        assert_eq!(CmasMessageClass::RequiredMonthlyTest, cmas.message_class());
        assert!(cmas.severity().is_unknown());
        assert!(cmas.urgency().is_unknown());
        assert!(cmas.certainty().is_unknown());
        assert!(cmas.category().is_unknown());
        assert!(cmas.response_type().is_unknown());
        assert!(hdr.etws_info().is_none());
    }

    #[test]
    fn test_idempotent() {
        let pdu = gsm(40, [0x11, 0x22, 0x11, 0x15, 0x33, 0x12]);
        assert_eq!(CbsHeader::new(&pdu), CbsHeader::new(&pdu));

        let pdu = gsm(40, [0x11, 0x22, 0x11, 0x03, 0x33, 0x12]);
        assert_eq!(CbsHeader::new(&pdu), CbsHeader::try_from(pdu.as_slice()));
    }

    #[test]
    fn test_display() {
        let hdr = CbsHeader::new(&[0x40, 0x12, 0x00, 0x32, 0x0f, 0x23]).unwrap();
        assert_eq!(
            "GSM GS=1 serial=0x4012 id=0x0032 DCS=0x0f page 2/3",
            format!("{}", hdr)
        );

        let hdr = CbsHeader::new(&[0x00, 0x00, 0x11, 0x00, 0x01, 0x80]).unwrap();
        assert_eq!(
            "ETWS GS=0 serial=0x0000 id=0x1100: ETWS primary Earthquake (user alert: true, popup: true)",
            format!("{}", hdr)
        );
    }
}
