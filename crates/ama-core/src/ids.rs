//! ID prefixes and case number formatting.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`; the store generates the random
//! part. Civic actions additionally carry a human-facing case number.

use chrono::{DateTime, Datelike, Utc};

pub const PREFIX_PROFILE: &str = "usr";
pub const PREFIX_COMMUNITY: &str = "com";
pub const PREFIX_POST: &str = "pst";
pub const PREFIX_COMMENT: &str = "cmt";
pub const PREFIX_VOTE: &str = "vot";
pub const PREFIX_CIVIC_ACTION: &str = "act";
pub const PREFIX_ACTION_UPDATE: &str = "acu";
pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_PROMISE: &str = "prm";
pub const PREFIX_ATTENDANCE: &str = "att";
pub const PREFIX_QUERY: &str = "qry";
pub const PREFIX_DIVISION: &str = "div";
pub const PREFIX_INSTITUTION: &str = "ins";
pub const PREFIX_OFFICE_HOLDER: &str = "ofh";
pub const PREFIX_FEATURE_FLAG: &str = "flg";
pub const PREFIX_AUDIT: &str = "aud";

/// Prefix shared by all civic action case numbers.
pub const CASE_NUMBER_PREFIX: &str = "CA";

/// Format a civic action case number, e.g. `CA-2026-3F9A1C`.
///
/// `suffix` is the random part (hex); it is upper-cased and cut to 6 chars.
#[must_use]
pub fn format_case_number(reported_at: DateTime<Utc>, suffix: &str) -> String {
    let suffix: String = suffix
        .chars()
        .filter(char::is_ascii_hexdigit)
        .take(6)
        .collect::<String>()
        .to_ascii_uppercase();
    format!("{CASE_NUMBER_PREFIX}-{}-{suffix}", reported_at.year())
}

/// Check that an ID carries the expected prefix.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('-') && rest.len() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn case_number_uses_year_and_uppercase_suffix() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        assert_eq!(format_case_number(at, "3f9a1c7e"), "CA-2026-3F9A1C");
    }

    #[test]
    fn case_number_drops_non_hex() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_case_number(at, "zz12ab"), "CA-2025-12AB");
    }

    #[test]
    fn prefix_check() {
        assert!(has_prefix("pst-a3f8b2c1", PREFIX_POST));
        assert!(!has_prefix("pst", PREFIX_POST));
        assert!(!has_prefix("pstx-1", PREFIX_POST));
        assert!(!has_prefix("cmt-a3f8b2c1", PREFIX_POST));
    }
}
