use crate::detect::{PDU_HEADER_LENGTH, PDU_LENGTH_ETWS, PDU_LENGTH_GSM};
use crate::parser::HeaderParser;

/// Builds a Cell Broadcast header parser
///
/// The builder comes with the 3GPP TS 23.041 defaults. These
/// only need to be changed for modems which deliver PDUs that
/// are padded, truncated, or otherwise not quite standard.
///
/// ```
/// use cbspws::{Format, HeaderParserBuilder};
///
/// let parser = HeaderParserBuilder::new()
///     .with_gsm_max_length(88)           // longer PDUs are UMTS
///     .with_etws_primary_max_length(56)  // longer ETWS PDUs are secondary
///     .build();
///
/// let mut pdu = [0u8; 56];
/// pdu[2] = 0x11;
/// assert_eq!(Format::EtwsPrimary, parser.parse(&pdu).unwrap().format());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HeaderParserBuilder {
    gsm_max_length: usize,
    etws_primary_max_length: usize,
}

impl HeaderParserBuilder {
    /// New parser with standard limits
    pub fn new() -> Self {
        Self {
            gsm_max_length: PDU_LENGTH_GSM,
            etws_primary_max_length: PDU_LENGTH_ETWS,
        }
    }

    /// Build a parser
    pub fn build(&self) -> HeaderParser {
        HeaderParser::from(self)
    }

    /// Maximum length of a GSM PDU (octets)
    ///
    /// PDUs which are longer than `len` are decoded as UMTS
    /// PDUs. The length is raised to at least the six-octet
    /// header length.
    pub fn with_gsm_max_length(&mut self, len: usize) -> &mut Self {
        self.gsm_max_length = len;
        self
    }

    /// Maximum length of an ETWS primary notification (octets)
    ///
    /// ETWS PDUs which are no longer than `len` are decoded as
    /// primary notifications. Longer ETWS PDUs are decoded as
    /// GSM secondary notifications. The length is clamped to the
    /// [GSM limit](HeaderParserBuilder::with_gsm_max_length),
    /// whichever order the two are set in. A value of zero
    /// disables primary notification decoding.
    pub fn with_etws_primary_max_length(&mut self, len: usize) -> &mut Self {
        self.etws_primary_max_length = len;
        self
    }

    /// Maximum length of a GSM PDU (octets)
    pub fn gsm_max_length(&self) -> usize {
        usize::max(self.gsm_max_length, PDU_HEADER_LENGTH)
    }

    /// Maximum length of an ETWS primary notification (octets)
    pub fn etws_primary_max_length(&self) -> usize {
        usize::min(self.etws_primary_max_length, self.gsm_max_length())
    }
}

impl std::default::Default for HeaderParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}
