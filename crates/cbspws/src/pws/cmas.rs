//! CMAS warning information

use std::fmt;

use strum::EnumMessage;

use crate::cmascodes;
use crate::msgid;

/// Commercial Mobile Alert System warning information
///
/// Usually obtained from a [`Classification`](crate::Classification)
/// via [`CbsHeader::cmas_info()`](crate::CbsHeader::cmas_info).
///
/// The message identifier of a CMAS broadcast implies the
/// [message class](CmasMessageClass). For extreme and severe
/// threats, it also implies the [severity](CmasSeverity),
/// [urgency](CmasUrgency), and [certainty](CmasCertainty).
///
/// ```
/// use cbspws::{CbsHeader, CmasCertainty, CmasMessageClass, CmasSeverity, CmasUrgency};
///
/// // GSM format, message identifier 0x1113, page 1 of 1
/// let hdr = CbsHeader::new(&[0x00, 0x10, 0x11, 0x13, 0x01, 0x11]).unwrap();
/// let cmas = hdr.cmas_info().expect("not CMAS");
///
/// assert_eq!(CmasMessageClass::ExtremeThreat, cmas.message_class());
/// assert_eq!(CmasSeverity::Extreme, cmas.severity());
/// assert_eq!(CmasUrgency::Immediate, cmas.urgency());
/// assert_eq!(CmasCertainty::Observed, cmas.certainty());
/// ```
///
/// The [category](CmasCategory) and [response type](CmasResponseType)
/// are carried in the message body, not the header. They are always
/// `Unknown` when decoded from a header. A body decoder may fill them
/// in with [`with_category()`](CmasInfo::with_category) and
/// [`with_response_type()`](CmasInfo::with_response_type).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CmasInfo {
    message_class: CmasMessageClass,
    category: CmasCategory,
    response_type: CmasResponseType,
    severity: CmasSeverity,
    urgency: CmasUrgency,
    certainty: CmasCertainty,
}

impl CmasInfo {
    /// Construct from all fields
    pub fn new(
        message_class: CmasMessageClass,
        category: CmasCategory,
        response_type: CmasResponseType,
        severity: CmasSeverity,
        urgency: CmasUrgency,
        certainty: CmasCertainty,
    ) -> Self {
        Self {
            message_class,
            category,
            response_type,
            severity,
            urgency,
            certainty,
        }
    }

    /// Classify a CMAS message identifier
    ///
    /// Returns `None` if `message_identifier` is not in the
    /// CMAS range. Identifiers which are in the CMAS range but
    /// are not assigned resolve to
    /// [`CmasMessageClass::Unknown`].
    pub fn from_message_identifier(message_identifier: u16) -> Option<Self> {
        if !msgid::is_cmas(message_identifier) {
            return None;
        }

        let (message_class, severity, urgency, certainty) = cmascodes::lookup(message_identifier);
        Some(Self::new(
            message_class,
            CmasCategory::Unknown,
            CmasResponseType::Unknown,
            severity,
            urgency,
            certainty,
        ))
    }

    /// Message class
    pub fn message_class(&self) -> CmasMessageClass {
        self.message_class
    }

    /// Event category
    ///
    /// Always `Unknown` when decoded from a header.
    pub fn category(&self) -> CmasCategory {
        self.category
    }

    /// Recommended response
    ///
    /// Always `Unknown` when decoded from a header.
    pub fn response_type(&self) -> CmasResponseType {
        self.response_type
    }

    /// Severity
    pub fn severity(&self) -> CmasSeverity {
        self.severity
    }

    /// Urgency
    pub fn urgency(&self) -> CmasUrgency {
        self.urgency
    }

    /// Certainty
    pub fn certainty(&self) -> CmasCertainty {
        self.certainty
    }

    /// Copy with the given event `category`
    pub fn with_category(self, category: CmasCategory) -> Self {
        Self { category, ..self }
    }

    /// Copy with the given `response_type`
    pub fn with_response_type(self, response_type: CmasResponseType) -> Self {
        Self {
            response_type,
            ..self
        }
    }

    /// Is this a test or exercise?
    ///
    /// True for the monthly test, exercise, and operator-defined
    /// classes. These are not live alerts.
    pub fn is_test(&self) -> bool {
        matches!(
            self.message_class,
            CmasMessageClass::RequiredMonthlyTest
                | CmasMessageClass::CmasExercise
                | CmasMessageClass::OperatorDefinedUse
        )
    }
}

impl fmt::Display for CmasInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CMAS {} (severity: {}, urgency: {}, certainty: {}, category: {}, response: {})",
            self.message_class,
            self.severity,
            self.urgency,
            self.certainty,
            self.category,
            self.response_type
        )
    }
}

/// CMAS message class
///
/// The message class is implied by the message identifier.
/// Identifiers with and without a language tag map to the same
/// class.
///
/// Extreme threats require *both* extreme severity and
/// immediate urgency. An extreme-severity alert with expected
/// urgency is classed as a severe threat.
///
/// ```
/// use cbspws::CmasMessageClass;
///
/// assert_eq!("Presidential Level Alert", CmasMessageClass::PresidentialLevelAlert.as_display_str());
/// assert_eq!("presidential", format!("{:#}", CmasMessageClass::PresidentialLevelAlert));
/// assert_eq!(CmasMessageClass::ChildAbductionEmergency, CmasMessageClass::from("amber"));
/// assert_eq!(CmasMessageClass::Unknown, CmasMessageClass::from("nope"));
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum CmasMessageClass {
    /// Presidential Level Alert
    ///
    /// Issued by the President of the United States or a
    /// designee. Always presented to the user.
    #[strum(serialize = "presidential", detailed_message = "Presidential Level Alert")]
    PresidentialLevelAlert,

    /// Extreme threat to life and property
    #[strum(serialize = "extreme", detailed_message = "Extreme Threat")]
    ExtremeThreat,

    /// Severe threat to life and property
    #[strum(serialize = "severe", detailed_message = "Severe Threat")]
    SevereThreat,

    /// Child Abduction Emergency (AMBER alert)
    #[strum(serialize = "amber", detailed_message = "Child Abduction Emergency")]
    ChildAbductionEmergency,

    /// Required Monthly Test
    #[strum(serialize = "test", detailed_message = "Required Monthly Test")]
    RequiredMonthlyTest,

    /// CMAS Exercise
    #[strum(serialize = "exercise", detailed_message = "CMAS Exercise")]
    CmasExercise,

    /// Reserved for use by the network operator
    #[strum(serialize = "operator", detailed_message = "Operator Defined Use")]
    OperatorDefinedUse,

    /// Unassigned identifier in the CMAS range
    #[strum(serialize = "", detailed_message = "Unknown")]
    Unknown,
}

/// CMAS event category
///
/// Categories follow the Common Alerting Protocol (CAP) and are
/// carried in the message body. Converts from and to the CAP
/// string.
///
/// ```
/// use cbspws::CmasCategory;
///
/// assert_eq!(CmasCategory::Cbrne, CmasCategory::from("CBRNE"));
/// assert_eq!("Met", format!("{:#}", CmasCategory::Met));
/// assert_eq!("Meteorological", format!("{}", CmasCategory::Met));
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum CmasCategory {
    /// Geophysical, including landslide
    #[strum(serialize = "Geo", detailed_message = "Geophysical")]
    Geo,

    /// Meteorological, including flood
    #[strum(serialize = "Met", detailed_message = "Meteorological")]
    Met,

    /// General emergency and public safety
    #[strum(serialize = "Safety", detailed_message = "Public Safety")]
    Safety,

    /// Law enforcement, military, homeland and local/private security
    #[strum(serialize = "Security", detailed_message = "Security")]
    Security,

    /// Rescue and recovery
    #[strum(serialize = "Rescue", detailed_message = "Rescue and Recovery")]
    Rescue,

    /// Fire suppression and rescue
    #[strum(serialize = "Fire", detailed_message = "Fire")]
    Fire,

    /// Medical and public health
    #[strum(serialize = "Health", detailed_message = "Health")]
    Health,

    /// Pollution and other environmental
    #[strum(serialize = "Env", detailed_message = "Environmental")]
    Env,

    /// Public and private transportation
    #[strum(serialize = "Transport", detailed_message = "Transportation")]
    Transport,

    /// Utility, telecommunication, other non-transport infrastructure
    #[strum(serialize = "Infra", detailed_message = "Infrastructure")]
    Infra,

    /// Chemical, biological, radiological, nuclear or high-yield
    /// explosive threat or attack
    #[strum(serialize = "CBRNE", detailed_message = "CBRNE")]
    Cbrne,

    /// Other events
    #[strum(serialize = "Other", detailed_message = "Other")]
    Other,

    /// Not known, or not yet decoded from the body
    #[strum(serialize = "", detailed_message = "Unknown")]
    Unknown,
}

/// CMAS recommended response
///
/// Response types follow the Common Alerting Protocol (CAP) and
/// are carried in the message body.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum CmasResponseType {
    /// Take shelter in place
    #[strum(serialize = "Shelter", detailed_message = "Shelter")]
    Shelter,

    /// Relocate
    #[strum(serialize = "Evacuate", detailed_message = "Evacuate")]
    Evacuate,

    /// Make preparations
    #[strum(serialize = "Prepare", detailed_message = "Prepare")]
    Prepare,

    /// Execute a pre-planned activity
    #[strum(serialize = "Execute", detailed_message = "Execute")]
    Execute,

    /// Attend to information sources
    #[strum(serialize = "Monitor", detailed_message = "Monitor")]
    Monitor,

    /// Avoid the subject event
    #[strum(serialize = "Avoid", detailed_message = "Avoid")]
    Avoid,

    /// Evaluate the information in this message
    #[strum(serialize = "Assess", detailed_message = "Assess")]
    Assess,

    /// No action recommended
    #[strum(serialize = "None", detailed_message = "None")]
    None,

    /// Not known, or not yet decoded from the body
    #[strum(serialize = "", detailed_message = "Unknown")]
    Unknown,
}

/// CMAS severity
///
/// Defined only for extreme and severe threats. All other
/// message classes have `Unknown` severity.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum CmasSeverity {
    /// Extraordinary threat to life or property
    #[strum(serialize = "Extreme", detailed_message = "Extreme")]
    Extreme,

    /// Significant threat to life or property
    #[strum(serialize = "Severe", detailed_message = "Severe")]
    Severe,

    /// Severity not implied by the message identifier
    #[strum(serialize = "", detailed_message = "Unknown")]
    Unknown,
}

/// CMAS urgency
///
/// Defined only for extreme and severe threats.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum CmasUrgency {
    /// Responsive action should be taken immediately
    #[strum(serialize = "Immediate", detailed_message = "Immediate")]
    Immediate,

    /// Responsive action should be taken within the next hour
    #[strum(serialize = "Expected", detailed_message = "Expected")]
    Expected,

    /// Urgency not implied by the message identifier
    #[strum(serialize = "", detailed_message = "Unknown")]
    Unknown,
}

/// CMAS certainty
///
/// Defined only for extreme and severe threats.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum CmasCertainty {
    /// Determined to have occurred or to be ongoing
    #[strum(serialize = "Observed", detailed_message = "Observed")]
    Observed,

    /// Likely (probability > ~50%)
    #[strum(serialize = "Likely", detailed_message = "Likely")]
    Likely,

    /// Certainty not implied by the message identifier
    #[strum(serialize = "", detailed_message = "Unknown")]
    Unknown,
}

// String conversions shared by every CMAS enumeration
//
// * `from()` parses the short code and never fails; anything
//   unrecognized is `Unknown`.
// * `Display` prints the human-readable string. The alternate
//   form `{:#}` prints the short code.
macro_rules! cmas_enum_strings {
    ($($ty:ident),+) => {
        $(
            impl $ty {
                /// Parse from short code, or `Unknown`
                pub fn from<S>(code: S) -> Self
                where
                    S: AsRef<str>,
                {
                    str::parse(code.as_ref()).unwrap_or_default()
                }

                /// Human-readable string representation
                pub fn as_display_str(&self) -> &'static str {
                    self.get_detailed_message().expect("missing definition")
                }

                /// Short code representation
                ///
                /// The empty string for `Unknown`.
                pub fn as_code_str(&self) -> &'static str {
                    self.get_serializations()[0]
                }

                /// True if this is the `Unknown` value
                pub fn is_unknown(&self) -> bool {
                    *self == Self::Unknown
                }
            }

            impl std::default::Default for $ty {
                fn default() -> Self {
                    Self::Unknown
                }
            }

            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &'static str {
                    self.as_code_str()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    if f.alternate() {
                        self.as_code_str().fmt(f)
                    } else {
                        self.as_display_str().fmt(f)
                    }
                }
            }
        )+
    };
}

cmas_enum_strings!(
    CmasMessageClass,
    CmasCategory,
    CmasResponseType,
    CmasSeverity,
    CmasUrgency,
    CmasCertainty
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_message_identifier() {
        assert_eq!(None, CmasInfo::from_message_identifier(0x1111));
        assert_eq!(None, CmasInfo::from_message_identifier(0x1130));

        let info = CmasInfo::from_message_identifier(msgid::CMAS_SEVERE_EXPECTED_LIKELY).unwrap();
        assert_eq!(CmasMessageClass::SevereThreat, info.message_class());
        assert_eq!(CmasSeverity::Severe, info.severity());
        assert_eq!(CmasUrgency::Expected, info.urgency());
        assert_eq!(CmasCertainty::Likely, info.certainty());
        assert_eq!(CmasCategory::Unknown, info.category());
        assert_eq!(CmasResponseType::Unknown, info.response_type());
        assert!(!info.is_test());

        // in range, but not assigned
        let info = CmasInfo::from_message_identifier(0x112E).unwrap();
        assert_eq!(CmasMessageClass::Unknown, info.message_class());
        assert!(info.severity().is_unknown());
        assert!(info.urgency().is_unknown());
        assert!(info.certainty().is_unknown());
    }

    #[test]
    fn test_tests_are_tests() {
        for id in [
            msgid::CMAS_REQUIRED_MONTHLY_TEST,
            msgid::CMAS_EXERCISE,
            msgid::CMAS_OPERATOR_DEFINED_USE,
        ] {
            assert!(CmasInfo::from_message_identifier(id).unwrap().is_test());
        }

        assert!(!CmasInfo::from_message_identifier(msgid::CMAS_PRESIDENTIAL_LEVEL)
            .unwrap()
            .is_test());
    }

    #[test]
    fn test_body_fields() {
        let info = CmasInfo::from_message_identifier(msgid::CMAS_CHILD_ABDUCTION_EMERGENCY)
            .unwrap()
            .with_category(CmasCategory::from("Rescue"))
            .with_response_type(CmasResponseType::from("Monitor"));

        assert_eq!(CmasCategory::Rescue, info.category());
        assert_eq!(CmasResponseType::Monitor, info.response_type());
        assert_eq!(CmasMessageClass::ChildAbductionEmergency, info.message_class());
    }

    #[test]
    fn test_strings() {
        assert_eq!(CmasSeverity::Extreme, CmasSeverity::from("Extreme"));
        assert_eq!(CmasSeverity::Unknown, CmasSeverity::from("Minor"));
        assert_eq!(CmasUrgency::Unknown, CmasUrgency::from(""));
        assert_eq!(CmasResponseType::None, CmasResponseType::from("None"));
        assert_eq!("", CmasCertainty::Unknown.as_code_str());
        assert_eq!("Unknown", format!("{}", CmasCertainty::Unknown));
        assert_eq!("Likely", CmasCertainty::Likely.as_ref());

        // inherent from() never fails; TryFrom is strict
        assert_eq!(CmasCategory::Rescue, CmasCategory::try_from("Rescue").unwrap());
        assert!(CmasCategory::try_from("Rescued").is_err());
        assert_eq!(CmasCategory::Unknown, CmasCategory::from("Rescued"));

        let info = CmasInfo::from_message_identifier(msgid::CMAS_EXTREME_IMMEDIATE_LIKELY).unwrap();
        assert_eq!(
            "CMAS Extreme Threat (severity: Extreme, urgency: Immediate, certainty: Likely, category: Unknown, response: Unknown)",
            format!("{}", info)
        );
    }
}
