//! ETWS warning information

use std::fmt;

#[cfg(feature = "chrono")]
use chrono::{DateTime, Duration, TimeZone, Utc};
use strum::EnumMessage;

use crate::msgid;

/// Earthquake and Tsunami Warning System information
///
/// Usually obtained from a [`Classification`](crate::Classification)
/// via [`CbsHeader::etws_info()`](crate::CbsHeader::etws_info).
///
/// ETWS messages arrive in two forms:
///
/// 1. A *primary notification*, which is a short,
///    header-only PDU. Its alert flags are carried in two
///    dedicated octets, and it may be followed by *warning
///    security information*.
///
/// 2. A *secondary notification*, which is an ordinary GSM or
///    UMTS broadcast with a message body. Its alert flags are
///    carried in the serial number.
///
/// ```
/// use cbspws::{CbsHeader, EtwsWarningType, Format};
///
/// // ETWS primary notification: tsunami, user alert, popup
/// let hdr = CbsHeader::new(&[0x00, 0x00, 0x11, 0x01, 0x01, 0x80]).unwrap();
/// assert_eq!(Format::EtwsPrimary, hdr.format());
///
/// let etws = hdr.etws_info().expect("not ETWS");
/// assert_eq!(1, etws.warning_type());
/// assert_eq!(EtwsWarningType::Tsunami, etws.warning());
/// assert!(etws.is_emergency_user_alert());
/// assert!(etws.is_popup_alert());
/// assert!(etws.is_primary());
/// assert_eq!(None, etws.warning_security_info());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EtwsInfo {
    warning_type: u8,
    emergency_user_alert: bool,
    activate_popup: bool,
    primary: bool,
    warning_security_info: Option<Vec<u8>>,
    octet_warning_type: Option<u8>,
}

impl EtwsInfo {
    /// Construct from all fields
    pub fn new(
        warning_type: u8,
        emergency_user_alert: bool,
        activate_popup: bool,
        primary: bool,
        warning_security_info: Option<Vec<u8>>,
    ) -> Self {
        Self {
            warning_type,
            emergency_user_alert,
            activate_popup,
            primary,
            warning_security_info,
            octet_warning_type: None,
        }
    }

    /// Classify an ETWS secondary notification
    ///
    /// The alert flags are read from the `serial_number`, not the
    /// message identifier. Returns `None` if the
    /// `message_identifier` is not an ETWS identifier.
    pub fn from_serial_number(message_identifier: u16, serial_number: u16) -> Option<Self> {
        Some(Self::new(
            warning_type_of(message_identifier)?,
            serial_number & msgid::SERIAL_NUMBER_ETWS_EMERGENCY_USER_ALERT != 0,
            serial_number & msgid::SERIAL_NUMBER_ETWS_ACTIVATE_POPUP != 0,
            false,
            None,
        ))
    }

    /// Classify an ETWS primary notification
    ///
    /// `pdu` is the complete primary notification PDU. The alert
    /// flags are read from the dedicated octets which follow the
    /// message identifier. Any octets after the six-octet header
    /// are retained as the warning security information.
    ///
    /// Returns `None` if the message identifier is not an ETWS
    /// identifier or if `pdu` is too short to be a header.
    pub fn from_primary_notification(pdu: &[u8]) -> Option<Self> {
        let (header, security) = split_header(pdu)?;
        let message_identifier = u16::from_be_bytes([header[2], header[3]]);

        let mut etws = Self::new(
            warning_type_of(message_identifier)?,
            header[4] & 0x01 != 0,
            header[5] & 0x80 != 0,
            true,
            if security.is_empty() {
                None
            } else {
                Some(security.to_vec())
            },
        );
        etws.octet_warning_type = Some(header[4] >> 1);
        Some(etws)
    }

    /// Warning type code
    ///
    /// The offset of the message identifier from the first ETWS
    /// identifier, per 3GPP TS 23.041 §9.3.24. See
    /// [`warning()`](EtwsInfo::warning) for an enumerated form.
    pub fn warning_type(&self) -> u8 {
        self.warning_type
    }

    /// Warning type code carried in a primary notification
    ///
    /// Primary notifications repeat the warning type in the upper
    /// seven bits of octet 4. This value is informational only:
    /// [`warning_type()`](EtwsInfo::warning_type) is always taken
    /// from the message identifier, and the two may disagree.
    ///
    /// `None` for secondary notifications.
    ///
    /// ```
    /// use cbspws::EtwsInfo;
    ///
    /// let etws = EtwsInfo::from_primary_notification(&[0x00, 0x00, 0x11, 0x00, 0x03, 0x80]).unwrap();
    /// assert_eq!(0, etws.warning_type());
    /// assert_eq!(Some(1), etws.primary_warning_type_octet());
    /// ```
    pub fn primary_warning_type_octet(&self) -> Option<u8> {
        self.octet_warning_type
    }

    /// Warning type
    pub fn warning(&self) -> EtwsWarningType {
        EtwsWarningType::from(self.warning_type)
    }

    /// Should the user be alerted with sound and vibration?
    pub fn is_emergency_user_alert(&self) -> bool {
        self.emergency_user_alert
    }

    /// Should the alert be shown as a popup?
    pub fn is_popup_alert(&self) -> bool {
        self.activate_popup
    }

    /// Is this a primary notification?
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// Is this a test message?
    pub fn is_test(&self) -> bool {
        self.warning() == EtwsWarningType::Test
    }

    /// Warning security information
    ///
    /// The octets which follow a primary notification header, if
    /// any. Always `None` for secondary notifications.
    pub fn warning_security_info(&self) -> Option<&[u8]> {
        self.warning_security_info.as_deref()
    }

    /// Primary notification timestamp (UTC)
    ///
    /// Decodes the timestamp from the first seven octets of the
    /// [warning security information](EtwsInfo::warning_security_info).
    /// Each octet is a semi-octet BCD value with the least
    /// significant digit in the high nibble: year (since 2000),
    /// month, day, hour, minute, second, and time zone. The time
    /// zone is in signed quarter-hours; bit 3 is the sign.
    ///
    /// Returns `None` if the security information is absent, is
    /// too short, or does not encode a valid date.
    ///
    /// Requires `chrono`.
    #[cfg(feature = "chrono")]
    pub fn primary_notification_timestamp(&self) -> Option<DateTime<Utc>> {
        let ts = self
            .warning_security_info()?
            .get(..Self::SECURITY_TIMESTAMP_LENGTH)?;

        let tz_quarter_hours = bcd_byte_to_int(ts[6] & !0x08) as i64;
        let tz_quarter_hours = if ts[6] & 0x08 == 0 {
            tz_quarter_hours
        } else {
            -tz_quarter_hours
        };

        let local = Utc
            .with_ymd_and_hms(
                2000 + bcd_byte_to_int(ts[0]) as i32,
                bcd_byte_to_int(ts[1]),
                bcd_byte_to_int(ts[2]),
                bcd_byte_to_int(ts[3]),
                bcd_byte_to_int(ts[4]),
                bcd_byte_to_int(ts[5]),
            )
            .single()?;

        Some(local - Duration::minutes(15 * tz_quarter_hours))
    }

    /// Primary notification digital signature
    ///
    /// The 43 octets which follow the timestamp in the
    /// [warning security information](EtwsInfo::warning_security_info).
    /// Returns `None` unless the signature is present in full.
    pub fn primary_notification_signature(&self) -> Option<&[u8]> {
        self.warning_security_info()?
            .get(Self::SECURITY_TIMESTAMP_LENGTH..Self::SECURITY_INFO_LENGTH)
    }

    const SECURITY_TIMESTAMP_LENGTH: usize = 7;
    const SECURITY_INFO_LENGTH: usize = 50;
}

impl fmt::Display for EtwsInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ETWS {} {} (user alert: {}, popup: {})",
            if self.primary { "primary" } else { "secondary" },
            self.warning(),
            self.emergency_user_alert,
            self.activate_popup
        )
    }
}

/// ETWS warning type
///
/// Converted from the numeric [warning type code](EtwsInfo::warning_type).
/// Codes which are reserved for future extension are `Unknown`.
///
/// ```
/// use cbspws::EtwsWarningType;
///
/// assert_eq!(EtwsWarningType::EarthquakeAndTsunami, EtwsWarningType::from(2));
/// assert_eq!(EtwsWarningType::Unknown, EtwsWarningType::from(5));
/// assert_eq!("Earthquake", format!("{}", EtwsWarningType::Earthquake));
/// assert_eq!(Some(3), EtwsWarningType::Test.as_code());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage)]
#[repr(u8)]
pub enum EtwsWarningType {
    /// Earthquake
    #[strum(detailed_message = "Earthquake")]
    Earthquake = 0,

    /// Tsunami
    #[strum(detailed_message = "Tsunami")]
    Tsunami = 1,

    /// Earthquake and tsunami
    #[strum(detailed_message = "Earthquake and Tsunami")]
    EarthquakeAndTsunami = 2,

    /// Test message
    #[strum(detailed_message = "Test Message")]
    Test = 3,

    /// Other emergency
    #[strum(detailed_message = "Other Emergency")]
    OtherEmergency = 4,

    /// Unknown or reserved warning type
    #[strum(detailed_message = "Unknown")]
    Unknown = 0xff,
}

impl EtwsWarningType {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Numeric warning type code, or `None` for `Unknown`
    pub fn as_code(&self) -> Option<u8> {
        match self {
            EtwsWarningType::Unknown => None,
            known => Some(*known as u8),
        }
    }
}

impl std::default::Default for EtwsWarningType {
    fn default() -> Self {
        EtwsWarningType::Unknown
    }
}

impl From<u8> for EtwsWarningType {
    fn from(code: u8) -> Self {
        match code {
            0 => EtwsWarningType::Earthquake,
            1 => EtwsWarningType::Tsunami,
            2 => EtwsWarningType::EarthquakeAndTsunami,
            3 => EtwsWarningType::Test,
            4 => EtwsWarningType::OtherEmergency,
            _ => EtwsWarningType::Unknown,
        }
    }
}

impl fmt::Display for EtwsWarningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

// Warning type code for an ETWS `message_identifier`
fn warning_type_of(message_identifier: u16) -> Option<u8> {
    if !msgid::is_etws(message_identifier) {
        return None;
    }

    Some((message_identifier - msgid::ETWS_EARTHQUAKE_WARNING) as u8)
}

// Split a PDU into its six-octet header and the remainder
fn split_header(pdu: &[u8]) -> Option<(&[u8; 6], &[u8])> {
    if pdu.len() < 6 {
        return None;
    }

    let (header, rest) = pdu.split_at(6);
    Some((header.try_into().ok()?, rest))
}

// Semi-octet BCD, least significant digit in the high nibble
//
// Nibbles which are not decimal digits count as zero.
#[cfg(feature = "chrono")]
fn bcd_byte_to_int(b: u8) -> u32 {
    let ones = (b >> 4) as u32;
    let tens = (b & 0x0f) as u32;
    let ones = if ones <= 9 { ones } else { 0 };
    let tens = if tens <= 9 { tens * 10 } else { 0 };
    ones + tens
}
