//! Public Warning System classification

mod cmas;
mod etws;

use std::fmt;

pub use cmas::{
    CmasCategory, CmasCertainty, CmasInfo, CmasMessageClass, CmasResponseType, CmasSeverity,
    CmasUrgency,
};
pub use etws::{EtwsInfo, EtwsWarningType};

/// Public Warning System classification
///
/// Every [`CbsHeader`](crate::CbsHeader) is classified by its
/// message identifier. A message may be an ETWS warning, a CMAS
/// alert, or neither. It is never both.
///
/// ```
/// use cbspws::{Classification, CmasMessageClass};
///
/// let cls = Classification::from_identifiers(0x111C, 0x0000);
/// assert_eq!(
///     CmasMessageClass::RequiredMonthlyTest,
///     cls.cmas().unwrap().message_class()
/// );
/// assert!(cls.etws().is_none());
///
/// // an ordinary, non-emergency broadcast channel
/// assert_eq!(Classification::None, Classification::from_identifiers(50, 0x0000));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Not a public warning
    None,

    /// Earthquake and Tsunami Warning System
    Etws(EtwsInfo),

    /// Commercial Mobile Alert System
    Cmas(CmasInfo),
}

impl Classification {
    /// Classify by message identifier and serial number
    ///
    /// ETWS alert flags are read from the `serial_number`. This
    /// classifies everything *except* ETWS primary notifications,
    /// which carry their flags elsewhere. See
    /// [`EtwsInfo::from_primary_notification()`].
    pub fn from_identifiers(message_identifier: u16, serial_number: u16) -> Self {
        if let Some(etws) = EtwsInfo::from_serial_number(message_identifier, serial_number) {
            Classification::Etws(etws)
        } else if let Some(cmas) = CmasInfo::from_message_identifier(message_identifier) {
            Classification::Cmas(cmas)
        } else {
            Classification::None
        }
    }

    /// ETWS information, if this is an ETWS warning
    pub fn etws(&self) -> Option<&EtwsInfo> {
        match self {
            Classification::Etws(etws) => Some(etws),
            _ => None,
        }
    }

    /// CMAS information, if this is a CMAS alert
    pub fn cmas(&self) -> Option<&CmasInfo> {
        match self {
            Classification::Cmas(cmas) => Some(cmas),
            _ => None,
        }
    }

    /// True if not a public warning
    pub fn is_none(&self) -> bool {
        matches!(self, Classification::None)
    }

    /// True for ETWS or CMAS tests and exercises
    pub fn is_test(&self) -> bool {
        match self {
            Classification::None => false,
            Classification::Etws(etws) => etws.is_test(),
            Classification::Cmas(cmas) => cmas.is_test(),
        }
    }
}

impl std::default::Default for Classification {
    fn default() -> Self {
        Classification::None
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::None => "not PWS".fmt(f),
            Classification::Etws(etws) => etws.fmt(f),
            Classification::Cmas(cmas) => cmas.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::msgid;

    #[test]
    fn test_from_identifiers() {
        let cls = Classification::from_identifiers(msgid::ETWS_EARTHQUAKE_WARNING, 0x0000);
        let etws = cls.etws().expect("not ETWS");
        assert_eq!(0, etws.warning_type());
        assert!(cls.cmas().is_none());
        assert!(!cls.is_none());

        let cls = Classification::from_identifiers(msgid::ETWS_TSUNAMI_WARNING, 0x0000);
        assert_eq!(1, cls.etws().unwrap().warning_type());

        let cls = Classification::from_identifiers(msgid::CMAS_EXTREME_IMMEDIATE_OBSERVED, 0);
        let cmas = cls.cmas().expect("not CMAS");
        assert_eq!(CmasSeverity::Extreme, cmas.severity());
        assert_eq!(CmasUrgency::Immediate, cmas.urgency());
        assert_eq!(CmasCertainty::Observed, cmas.certainty());
        assert!(cls.etws().is_none());

        // PWS range, but neither ETWS nor CMAS
        assert!(Classification::from_identifiers(0x1108, 0x3000).is_none());
        assert!(Classification::from_identifiers(0x1130, 0x3000).is_none());
        assert!(Classification::from_identifiers(0x0000, 0x3000).is_none());
    }

    #[test]
    fn test_exclusive() {
        for id in 0x1000..=0x1200u16 {
            match Classification::from_identifiers(id, 0xffff) {
                Classification::None => assert!(!msgid::is_etws(id) && !msgid::is_cmas(id)),
                Classification::Etws(_) => assert!(msgid::is_etws(id)),
                Classification::Cmas(_) => assert!(msgid::is_cmas(id)),
            }
        }
    }

    #[test]
    fn test_is_test() {
        assert!(Classification::from_identifiers(msgid::ETWS_TEST_MESSAGE, 0).is_test());
        assert!(Classification::from_identifiers(msgid::CMAS_EXERCISE, 0).is_test());
        assert!(!Classification::from_identifiers(msgid::CMAS_PRESIDENTIAL_LEVEL, 0).is_test());
        assert!(!Classification::None.is_test());
    }
}
