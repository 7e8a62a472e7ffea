//! Header parser

use crate::builder::HeaderParserBuilder;
use crate::detect::{FormatDetector, StandardFormatDetector, PDU_HEADER_LENGTH};
use crate::header::{CbsHeader, HeaderDecodeErr};

/// Decodes Cell Broadcast headers
///
/// A `HeaderParser` pairs a [`FormatDetector`] with the field
/// extraction and PWS classification logic. Parsers hold no
/// state between calls: the same PDU always decodes to the same
/// header, and one parser may be shared freely between threads.
///
/// Most users will want the standard 3GPP behavior, which is
/// available via [`CbsHeader::new()`] or via a
/// [builder](HeaderParserBuilder).
///
/// ```
/// use cbspws::{Format, HeaderParserBuilder};
///
/// let parser = HeaderParserBuilder::new().build();
/// let hdr = parser.parse(&[0x00, 0x00, 0x11, 0x03, 0x00, 0x00]).unwrap();
/// assert_eq!(Format::EtwsPrimary, hdr.format());
/// ```
///
/// Custom detection strategies are supplied with
/// [`HeaderParser::new()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderParser<D = StandardFormatDetector> {
    detector: D,
}

impl<D> HeaderParser<D>
where
    D: FormatDetector,
{
    /// Parser which uses the given format `detector`
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    /// Decode the header of a complete `pdu`
    ///
    /// Fails if the PDU is too short or if the detector rejects
    /// it. Otherwise, returns the header and its classification.
    pub fn parse(&self, pdu: &[u8]) -> Result<CbsHeader, HeaderDecodeErr> {
        if pdu.len() < PDU_HEADER_LENGTH {
            return Err(HeaderDecodeErr::InvalidPdu);
        }

        let format = self.detector.detect(pdu)?;
        Ok(CbsHeader::extract(format, pdu))
    }

    /// The format detector
    pub fn detector(&self) -> &D {
        &self.detector
    }
}

impl std::default::Default for HeaderParser<StandardFormatDetector> {
    fn default() -> Self {
        HeaderParserBuilder::default().build()
    }
}

impl From<&HeaderParserBuilder> for HeaderParser<StandardFormatDetector> {
    fn from(cfg: &HeaderParserBuilder) -> Self {
        Self::new(StandardFormatDetector::new(
            cfg.gsm_max_length(),
            cfg.etws_primary_max_length(),
        ))
    }
}
