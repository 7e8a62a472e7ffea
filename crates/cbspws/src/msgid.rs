//! # Message Identifiers Known to `cbspws`
//!
//! Cell Broadcast message identifiers (3GPP TS 23.041 §9.4.1.2.2)
//! which are reserved for the Public Warning System.
//!
//! | Identifier          | Description                                 |
//! |---------------------|---------------------------------------------|
//! | `0x1100`            | ETWS: Earthquake warning                    |
//! | `0x1101`            | ETWS: Tsunami warning                       |
//! | `0x1102`            | ETWS: Earthquake and tsunami warning        |
//! | `0x1103`            | ETWS: Test message                          |
//! | `0x1104`            | ETWS: Other emergency type                  |
//! | `0x1105`–`0x1107`   | ETWS: reserved for future extension         |
//! | `0x1112`            | CMAS: Presidential Level Alert              |
//! | `0x1113`            | CMAS: Extreme, Immediate, Observed          |
//! | `0x1114`            | CMAS: Extreme, Immediate, Likely            |
//! | `0x1115`            | CMAS: Extreme, Expected, Observed           |
//! | `0x1116`            | CMAS: Extreme, Expected, Likely             |
//! | `0x1117`            | CMAS: Severe, Immediate, Observed           |
//! | `0x1118`            | CMAS: Severe, Immediate, Likely             |
//! | `0x1119`            | CMAS: Severe, Expected, Observed            |
//! | `0x111A`            | CMAS: Severe, Expected, Likely              |
//! | `0x111B`            | CMAS: Child Abduction Emergency             |
//! | `0x111C`            | CMAS: Required Monthly Test                 |
//! | `0x111D`            | CMAS: Exercise                              |
//! | `0x111E`            | CMAS: Operator Defined Use                  |
//! | `0x111F`–`0x112B`   | CMAS: as above, "with language" variants    |
//!
//! Every CMAS identifier in `0x1112`–`0x111E` has a "with language"
//! twin which is exactly [`CMAS_LANGUAGE_OFFSET`] higher. The two
//! carry the same alert in different languages and classify
//! identically.
//!
//! ## See Also
//!
//! * [`Classification`](crate::Classification)
//! * [`CbsHeader::message_identifier()`](crate::CbsHeader::message_identifier)

/// First identifier reserved for the Public Warning System
pub const PWS_FIRST_IDENTIFIER: u16 = 0x1100;

/// Last identifier reserved for the Public Warning System
pub const PWS_LAST_IDENTIFIER: u16 = 0x18FF;

/// Mask applied to an identifier before comparing to [`ETWS_TYPE`]
pub const ETWS_TYPE_MASK: u16 = 0xFFF8;

/// Masked identifier value of all ETWS messages
pub const ETWS_TYPE: u16 = 0x1100;

/// ETWS earthquake warning, the first ETWS identifier
pub const ETWS_EARTHQUAKE_WARNING: u16 = 0x1100;

/// ETWS tsunami warning
pub const ETWS_TSUNAMI_WARNING: u16 = 0x1101;

/// ETWS earthquake and tsunami warning
pub const ETWS_EARTHQUAKE_AND_TSUNAMI_WARNING: u16 = 0x1102;

/// ETWS test message
pub const ETWS_TEST_MESSAGE: u16 = 0x1103;

/// ETWS other emergency type
pub const ETWS_OTHER_EMERGENCY_TYPE: u16 = 0x1104;

/// First identifier reserved for CMAS
pub const CMAS_FIRST_IDENTIFIER: u16 = 0x1112;

/// Last identifier reserved for CMAS
pub const CMAS_LAST_IDENTIFIER: u16 = 0x112F;

/// CMAS Presidential Level Alert
pub const CMAS_PRESIDENTIAL_LEVEL: u16 = 0x1112;

/// CMAS Extreme threat: Immediate urgency, Observed certainty
pub const CMAS_EXTREME_IMMEDIATE_OBSERVED: u16 = 0x1113;

/// CMAS Extreme threat: Immediate urgency, Likely certainty
pub const CMAS_EXTREME_IMMEDIATE_LIKELY: u16 = 0x1114;

/// CMAS Extreme severity: Expected urgency, Observed certainty
pub const CMAS_EXTREME_EXPECTED_OBSERVED: u16 = 0x1115;

/// CMAS Extreme severity: Expected urgency, Likely certainty
pub const CMAS_EXTREME_EXPECTED_LIKELY: u16 = 0x1116;

/// CMAS Severe threat: Immediate urgency, Observed certainty
pub const CMAS_SEVERE_IMMEDIATE_OBSERVED: u16 = 0x1117;

/// CMAS Severe threat: Immediate urgency, Likely certainty
pub const CMAS_SEVERE_IMMEDIATE_LIKELY: u16 = 0x1118;

/// CMAS Severe threat: Expected urgency, Observed certainty
pub const CMAS_SEVERE_EXPECTED_OBSERVED: u16 = 0x1119;

/// CMAS Severe threat: Expected urgency, Likely certainty
pub const CMAS_SEVERE_EXPECTED_LIKELY: u16 = 0x111A;

/// CMAS Child Abduction Emergency (AMBER alert)
pub const CMAS_CHILD_ABDUCTION_EMERGENCY: u16 = 0x111B;

/// CMAS Required Monthly Test
pub const CMAS_REQUIRED_MONTHLY_TEST: u16 = 0x111C;

/// CMAS Exercise
pub const CMAS_EXERCISE: u16 = 0x111D;

/// CMAS Operator Defined Use
pub const CMAS_OPERATOR_DEFINED_USE: u16 = 0x111E;

/// Distance between an English CMAS identifier and its language variant
pub const CMAS_LANGUAGE_OFFSET: u16 = 0x000D;

/// Serial number bit: ETWS emergency user alert
pub const SERIAL_NUMBER_ETWS_EMERGENCY_USER_ALERT: u16 = 0x2000;

/// Serial number bit: ETWS activate popup
pub const SERIAL_NUMBER_ETWS_ACTIVATE_POPUP: u16 = 0x1000;

/// True if `id` is in the Public Warning System range
#[inline]
pub fn is_pws(id: u16) -> bool {
    (PWS_FIRST_IDENTIFIER..=PWS_LAST_IDENTIFIER).contains(&id)
}

/// True if `id` is an ETWS identifier
#[inline]
pub fn is_etws(id: u16) -> bool {
    id & ETWS_TYPE_MASK == ETWS_TYPE
}

/// True if `id` is a CMAS identifier
#[inline]
pub fn is_cmas(id: u16) -> bool {
    (CMAS_FIRST_IDENTIFIER..=CMAS_LAST_IDENTIFIER).contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert!(is_etws(ETWS_EARTHQUAKE_WARNING));
        assert!(is_etws(ETWS_OTHER_EMERGENCY_TYPE));
        assert!(is_etws(0x1107));
        assert!(!is_etws(0x1108));
        assert!(!is_etws(0x10FF));

        assert!(is_cmas(CMAS_PRESIDENTIAL_LEVEL));
        assert!(is_cmas(CMAS_LAST_IDENTIFIER));
        assert!(!is_cmas(0x1111));
        assert!(!is_cmas(0x1130));

        // ETWS and CMAS never overlap, and both are PWS
        for id in 0..=u16::MAX {
            assert!(!(is_etws(id) && is_cmas(id)), "overlap at {:#06x}", id);
            if is_etws(id) || is_cmas(id) {
                assert!(is_pws(id));
            }
        }

        assert!(is_pws(PWS_LAST_IDENTIFIER));
        assert!(!is_pws(PWS_LAST_IDENTIFIER + 1));
        assert!(!is_pws(0x0032));
    }
}
