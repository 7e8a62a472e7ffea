//! Wire format detection

use log::{debug, trace};

use crate::header::{Format, HeaderDecodeErr};
use crate::msgid;

/// Minimum length of a Cell Broadcast PDU, in octets
pub const PDU_HEADER_LENGTH: usize = 6;

/// Maximum length of a GSM Cell Broadcast PDU, in octets
pub const PDU_LENGTH_GSM: usize = 88;

/// Maximum length of an ETWS primary notification PDU, in octets
pub const PDU_LENGTH_ETWS: usize = 56;

/// UMTS message type for a CBS message
pub const MESSAGE_TYPE_CBS_MESSAGE: u8 = 1;

/// Decides the wire format of a Cell Broadcast PDU
///
/// A `FormatDetector` examines a complete PDU and decides which
/// [`Format`] its header is encoded with. The
/// [`StandardFormatDetector`] implements 3GPP TS 23.041. Modems
/// which deviate from the standard can be accommodated with a
/// custom implementation, which is then handed to
/// [`HeaderParser::new()`](crate::HeaderParser::new).
///
/// ```
/// use cbspws::{Format, FormatDetector, HeaderDecodeErr, HeaderParser};
///
/// // a modem which only ever delivers GSM-format PDUs
/// struct GsmOnly;
///
/// impl FormatDetector for GsmOnly {
///     fn detect(&self, pdu: &[u8]) -> Result<Format, HeaderDecodeErr> {
///         if pdu.len() < 6 {
///             return Err(HeaderDecodeErr::InvalidPdu);
///         }
///         Ok(Format::Gsm)
///     }
/// }
///
/// let parser = HeaderParser::new(GsmOnly);
/// let hdr = parser.parse(&[0x00; 100]).unwrap();
/// assert_eq!(Format::Gsm, hdr.format());
/// ```
///
/// The parser guarantees that every PDU it extracts fields from
/// is at least [`PDU_HEADER_LENGTH`] octets long, regardless of
/// what the detector decides.
pub trait FormatDetector {
    /// Decide the format of `pdu`
    ///
    /// Implementations must fail with
    /// [`HeaderDecodeErr::InvalidPdu`] if `pdu` is shorter than
    /// [`PDU_HEADER_LENGTH`].
    fn detect(&self, pdu: &[u8]) -> Result<Format, HeaderDecodeErr>;
}

/// Detects the wire format per 3GPP TS 23.041
///
/// * PDUs no longer than the GSM maximum of 88 octets are GSM
///   PDUs. If the message identifier is an ETWS identifier and
///   the PDU is no longer than the ETWS maximum of 56 octets,
///   the PDU is an ETWS primary notification instead.
///
/// * Longer PDUs are UMTS PDUs. The first octet must be the CBS
///   message type (`1`).
///
/// The length limits may be changed with the
/// [`HeaderParserBuilder`](crate::HeaderParserBuilder).
///
/// ```
/// use cbspws::{Format, FormatDetector, HeaderDecodeErr, StandardFormatDetector};
///
/// let detector = StandardFormatDetector::default();
///
/// // ETWS message identifier, short PDU
/// assert_eq!(Ok(Format::EtwsPrimary), detector.detect(&[0, 0, 0x11, 0x00, 0, 0]));
///
/// // ordinary message identifier
/// assert_eq!(Ok(Format::Gsm), detector.detect(&[0, 0, 0x00, 0x32, 0, 0]));
///
/// // UMTS must start with the CBS message type
/// let mut umts = [0u8; 90];
/// assert_eq!(Err(HeaderDecodeErr::UnsupportedMessageType(0)), detector.detect(&umts));
/// umts[0] = 1;
/// assert_eq!(Ok(Format::Umts), detector.detect(&umts));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StandardFormatDetector {
    gsm_max_length: usize,
    etws_primary_max_length: usize,
}

impl StandardFormatDetector {
    /// Detector with the given length limits
    ///
    /// `gsm_max_length` is raised to at least
    /// [`PDU_HEADER_LENGTH`], and `etws_primary_max_length` is
    /// lowered to at most `gsm_max_length`.
    pub fn new(gsm_max_length: usize, etws_primary_max_length: usize) -> Self {
        let gsm_max_length = usize::max(gsm_max_length, PDU_HEADER_LENGTH);
        Self {
            gsm_max_length,
            etws_primary_max_length: usize::min(etws_primary_max_length, gsm_max_length),
        }
    }

    /// Maximum length of a GSM PDU
    pub fn gsm_max_length(&self) -> usize {
        self.gsm_max_length
    }

    /// Maximum length of an ETWS primary notification PDU
    pub fn etws_primary_max_length(&self) -> usize {
        self.etws_primary_max_length
    }
}

impl std::default::Default for StandardFormatDetector {
    fn default() -> Self {
        Self::new(PDU_LENGTH_GSM, PDU_LENGTH_ETWS)
    }
}

impl FormatDetector for StandardFormatDetector {
    fn detect(&self, pdu: &[u8]) -> Result<Format, HeaderDecodeErr> {
        if pdu.len() < PDU_HEADER_LENGTH {
            return Err(HeaderDecodeErr::InvalidPdu);
        }

        let format = if pdu.len() <= self.gsm_max_length {
            // GSM and ETWS primary share the message identifier octets
            let message_identifier = u16::from_be_bytes([pdu[2], pdu[3]]);
            if msgid::is_etws(message_identifier) && pdu.len() <= self.etws_primary_max_length {
                Format::EtwsPrimary
            } else {
                Format::Gsm
            }
        } else {
            if pdu[0] != MESSAGE_TYPE_CBS_MESSAGE {
                debug!("detect: unsupported UMTS message type {}", pdu[0]);
                return Err(HeaderDecodeErr::UnsupportedMessageType(pdu[0]));
            }
            Format::Umts
        };

        trace!("detect: {} octets: {:?} format", pdu.len(), format);
        Ok(format)
    }
}
