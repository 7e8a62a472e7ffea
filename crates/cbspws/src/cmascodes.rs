//! CMAS message identifier codebook
//!
//! Maps each assigned CMAS message identifier to the
//! classification it implies. See [`msgid`](crate::msgid) for the
//! list of identifiers.

use phf::phf_map;

use crate::pws::{CmasCertainty, CmasMessageClass, CmasSeverity, CmasUrgency};

/// An entry in [`CODEBOOK`].
pub(crate) type CmasEntry = (CmasMessageClass, CmasSeverity, CmasUrgency, CmasCertainty);

/// Entry for identifiers which are not in the codebook
const UNKNOWN_ENTRY: CmasEntry = (
    CmasMessageClass::Unknown,
    CmasSeverity::Unknown,
    CmasUrgency::Unknown,
    CmasCertainty::Unknown,
);

/// Lookup a CMAS message identifier in the database
///
/// Identifiers which are not assigned, including those outside
/// of the CMAS range, resolve to all-`Unknown`.
pub(crate) fn lookup(message_identifier: u16) -> CmasEntry {
    CODEBOOK
        .get(&message_identifier)
        .cloned()
        .unwrap_or(UNKNOWN_ENTRY)
}

/// Database of CMAS message identifiers
///
/// Severity, urgency, and certainty are only defined for the
/// extreme and severe alerts. Note that extreme-severity alerts
/// with *expected* urgency are severe threats.
static CODEBOOK: phf::Map<u16, CmasEntry> = phf_map! {
    // presidential
    0x1112u16 => (CmasMessageClass::PresidentialLevelAlert, CmasSeverity::Unknown, CmasUrgency::Unknown, CmasCertainty::Unknown),
    0x111Fu16 => (CmasMessageClass::PresidentialLevelAlert, CmasSeverity::Unknown, CmasUrgency::Unknown, CmasCertainty::Unknown),

    // extreme threats
    0x1113u16 => (CmasMessageClass::ExtremeThreat, CmasSeverity::Extreme, CmasUrgency::Immediate, CmasCertainty::Observed),
    0x1120u16 => (CmasMessageClass::ExtremeThreat, CmasSeverity::Extreme, CmasUrgency::Immediate, CmasCertainty::Observed),
    0x1114u16 => (CmasMessageClass::ExtremeThreat, CmasSeverity::Extreme, CmasUrgency::Immediate, CmasCertainty::Likely),
    0x1121u16 => (CmasMessageClass::ExtremeThreat, CmasSeverity::Extreme, CmasUrgency::Immediate, CmasCertainty::Likely),

    // severe threats
    0x1115u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Extreme, CmasUrgency::Expected, CmasCertainty::Observed),
    0x1122u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Extreme, CmasUrgency::Expected, CmasCertainty::Observed),
    0x1116u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Extreme, CmasUrgency::Expected, CmasCertainty::Likely),
    0x1123u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Extreme, CmasUrgency::Expected, CmasCertainty::Likely),
    0x1117u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Severe, CmasUrgency::Immediate, CmasCertainty::Observed),
    0x1124u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Severe, CmasUrgency::Immediate, CmasCertainty::Observed),
    0x1118u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Severe, CmasUrgency::Immediate, CmasCertainty::Likely),
    0x1125u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Severe, CmasUrgency::Immediate, CmasCertainty::Likely),
    0x1119u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Severe, CmasUrgency::Expected, CmasCertainty::Observed),
    0x1126u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Severe, CmasUrgency::Expected, CmasCertainty::Observed),
    0x111Au16 => (CmasMessageClass::SevereThreat, CmasSeverity::Severe, CmasUrgency::Expected, CmasCertainty::Likely),
    0x1127u16 => (CmasMessageClass::SevereThreat, CmasSeverity::Severe, CmasUrgency::Expected, CmasCertainty::Likely),

    // AMBER
    0x111Bu16 => (CmasMessageClass::ChildAbductionEmergency, CmasSeverity::Unknown, CmasUrgency::Unknown, CmasCertainty::Unknown),
    0x1128u16 => (CmasMessageClass::ChildAbductionEmergency, CmasSeverity::Unknown, CmasUrgency::Unknown, CmasCertainty::Unknown),

    // tests and operator use
    0x111Cu16 => (CmasMessageClass::RequiredMonthlyTest, CmasSeverity::Unknown, CmasUrgency::Unknown, CmasCertainty::Unknown),
    0x1129u16 => (CmasMessageClass::RequiredMonthlyTest, CmasSeverity::Unknown, CmasUrgency::Unknown, CmasCertainty::Unknown),
    0x111Du16 => (CmasMessageClass::CmasExercise, CmasSeverity::Unknown, CmasUrgency::Unknown, CmasCertainty::Unknown),
    0x112Au16 => (CmasMessageClass::CmasExercise, CmasSeverity::Unknown, CmasUrgency::Unknown, CmasCertainty::Unknown),
    0x111Eu16 => (CmasMessageClass::OperatorDefinedUse, CmasSeverity::Unknown, CmasUrgency::Unknown, CmasCertainty::Unknown),
    0x112Bu16 => (CmasMessageClass::OperatorDefinedUse, CmasSeverity::Unknown, CmasUrgency::Unknown, CmasCertainty::Unknown),
};
