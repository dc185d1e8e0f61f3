//! Display projections of domain records.
//!
//! Everything here is fail-open: a missing participant renders as
//! "Unknown", an unparseable date comes back unchanged, an unknown split
//! tag gets the equal-split label. Bad data should never take a screen
//! down.

use chrono::NaiveDate;
use engine::{DateRange, PaidBy, Participant, SplitMethod};

const UNKNOWN: &str = "Unknown";

/// Resolves a participant id to their display name.
pub fn participant_name<'a>(participants: &'a [Participant], id: &str) -> &'a str {
    participants
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.as_str())
        .unwrap_or(UNKNOWN)
}

/// Who paid, as one display string. Multiple payers are comma-joined in
/// their stored order; ids outside the roster each resolve to "Unknown".
pub fn paid_by_names(paid_by: &PaidBy, participants: &[Participant]) -> String {
    match paid_by {
        PaidBy::One(id) => participant_name(participants, id).to_string(),
        PaidBy::Many(ids) => {
            if ids.is_empty() {
                return UNKNOWN.to_string();
            }
            ids.iter()
                .map(|id| participant_name(participants, id))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

pub fn split_method_label(method: SplitMethod) -> &'static str {
    match method {
        SplitMethod::Equal => "Equal split",
        SplitMethod::Custom => "Custom split",
        SplitMethod::Percentage => "Percentage split",
    }
}

/// Label for a raw tag as it appears in foreign data. Unrecognized tags
/// read as equal splits, matching how the engine parses them.
pub fn split_method_label_for_tag(tag: &str) -> &'static str {
    split_method_label(SplitMethod::from_tag(tag))
}

/// "2024-01-05" becomes "Jan 5, 2024". Anything that does not parse as an
/// ISO date is returned unchanged, with a warning in the log.
pub fn short_date(value: &str) -> String {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(err) => {
            tracing::warn!("unparseable date \"{value}\": {err}");
            value.to_string()
        }
    }
}

/// Inclusive range shown on trip headers, e.g. "Jan 2, 2024 - Jan 9, 2024".
pub fn date_range_label(range: &DateRange) -> String {
    format!("{} - {}", short_date(&range.start), short_date(&range.end))
}

/// Attachment sizes in the unit that keeps the number small.
pub fn file_size_label(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    match bytes {
        b if b >= GB => format!("{:.1} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{b} B"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new("p1", "Ada"),
            Participant::new("p2", "Bruno"),
        ]
    }

    #[test]
    fn single_payer_resolves_to_their_name() {
        let paid_by = PaidBy::One("p1".to_string());
        assert_eq!(paid_by_names(&paid_by, &roster()), "Ada");
    }

    #[test]
    fn unknown_payer_renders_as_unknown() {
        let paid_by = PaidBy::One("ghost".to_string());
        assert_eq!(paid_by_names(&paid_by, &roster()), "Unknown");
    }

    #[test]
    fn multiple_payers_are_comma_joined_in_order() {
        let paid_by = PaidBy::Many(vec!["p2".to_string(), "p1".to_string()]);
        assert_eq!(paid_by_names(&paid_by, &roster()), "Bruno, Ada");
    }

    #[test]
    fn unknown_ids_in_a_payer_list_each_fall_back() {
        let paid_by = PaidBy::Many(vec!["p1".to_string(), "ghost".to_string()]);
        assert_eq!(paid_by_names(&paid_by, &roster()), "Ada, Unknown");
    }

    #[test]
    fn empty_payer_list_renders_as_unknown() {
        let paid_by = PaidBy::Many(Vec::new());
        assert_eq!(paid_by_names(&paid_by, &roster()), "Unknown");
    }

    #[test]
    fn split_labels_match_the_method() {
        assert_eq!(split_method_label(SplitMethod::Equal), "Equal split");
        assert_eq!(split_method_label(SplitMethod::Custom), "Custom split");
        assert_eq!(
            split_method_label(SplitMethod::Percentage),
            "Percentage split"
        );
    }

    #[test]
    fn unrecognized_tag_reads_as_equal_split() {
        assert_eq!(split_method_label_for_tag("bogus"), "Equal split");
        assert_eq!(split_method_label_for_tag(""), "Equal split");
        assert_eq!(split_method_label_for_tag("percentage"), "Percentage split");
    }

    #[test]
    fn iso_dates_render_short() {
        assert_eq!(short_date("2024-01-05"), "Jan 5, 2024");
        assert_eq!(short_date("2023-12-25"), "Dec 25, 2023");
    }

    #[test]
    fn unparseable_dates_come_back_unchanged() {
        assert_eq!(short_date("sometime in June"), "sometime in June");
        assert_eq!(short_date(""), "");
        assert_eq!(short_date("2024-13-40"), "2024-13-40");
    }

    #[test]
    fn file_sizes_pick_a_sensible_unit() {
        assert_eq!(file_size_label(512), "512 B");
        assert_eq!(file_size_label(2048), "2.0 KB");
        assert_eq!(file_size_label(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(file_size_label(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
