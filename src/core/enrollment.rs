//! Enrollment options shown on the dashboard.
//!
//! Static catalog, defined once at startup. Founders-edition entries carry a
//! backend program id; future-edition entries carry a group code and let the
//! coach pick a pupil count in the next step.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// What kind of enrollment an option leads to.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentKind {
    #[display("team")]
    Team,
    #[display("class")]
    Class,
    #[display("future")]
    Future,
}

/// Program edition an option belongs to.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    #[display("founders")]
    Founders,
    #[display("future")]
    Future,
}

/// One selectable enrollment path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentOption {
    pub kind: EnrollmentKind,
    /// Backend program id (founders options only).
    pub program: Option<i64>,
    /// Group code "5" or "8" (future options only).
    pub group: Option<&'static str>,
    pub edition: Edition,
    /// Display label, resolved through the locale tables.
    pub label_key: &'static str,
}

/// Program ids: 1 = Explore team, 2 = Challenge team, 4 = Explore class,
/// 5 = Challenge class.
pub const ENROLLMENT_OPTIONS: [EnrollmentOption; 6] = [
    EnrollmentOption {
        kind: EnrollmentKind::Team,
        program: Some(1),
        group: None,
        edition: Edition::Founders,
        label_key: "dashboard.optionFoundersTeamExplore",
    },
    EnrollmentOption {
        kind: EnrollmentKind::Team,
        program: Some(2),
        group: None,
        edition: Edition::Founders,
        label_key: "dashboard.optionFoundersTeamChallenge",
    },
    EnrollmentOption {
        kind: EnrollmentKind::Class,
        program: Some(4),
        group: None,
        edition: Edition::Founders,
        label_key: "dashboard.optionFoundersClassExplore",
    },
    EnrollmentOption {
        kind: EnrollmentKind::Class,
        program: Some(5),
        group: None,
        edition: Edition::Founders,
        label_key: "dashboard.optionFoundersClassChallenge",
    },
    EnrollmentOption {
        kind: EnrollmentKind::Future,
        program: None,
        group: Some("5"),
        edition: Edition::Future,
        label_key: "dashboard.optionFutureGroup5",
    },
    EnrollmentOption {
        kind: EnrollmentKind::Future,
        program: None,
        group: Some("8"),
        edition: Edition::Future,
        label_key: "dashboard.optionFutureGroup8",
    },
];

/// Pupil counts a future-edition group can enroll with.
pub const FUTURE_PUPIL_OPTIONS: [u8; 3] = [8, 16, 24];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn founders_options_carry_a_program_id() {
        for option in ENROLLMENT_OPTIONS
            .iter()
            .filter(|o| o.edition == Edition::Founders)
        {
            assert!(option.program.is_some(), "{} has no program", option.label_key);
            assert!(option.group.is_none());
        }
    }

    #[test]
    fn future_options_carry_a_group_code() {
        let future: Vec<_> = ENROLLMENT_OPTIONS
            .iter()
            .filter(|o| o.edition == Edition::Future)
            .collect();
        assert_eq!(future.len(), 2);
        for option in future {
            assert_eq!(option.kind, EnrollmentKind::Future);
            assert!(option.program.is_none());
            assert!(matches!(option.group, Some("5") | Some("8")));
        }
    }

    #[test]
    fn program_ids_are_unique() {
        let mut ids: Vec<i64> = ENROLLMENT_OPTIONS.iter().filter_map(|o| o.program).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 4, 5]);
    }

    #[test]
    fn pupil_counts_are_the_three_offered_sizes() {
        assert_eq!(FUTURE_PUPIL_OPTIONS, [8, 16, 24]);
    }
}
