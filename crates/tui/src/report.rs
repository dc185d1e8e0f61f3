//! CSV expense reports.

use std::path::{Path, PathBuf};

use chrono::Utc;
use chrono_tz::Tz;
use csv::Writer;
use engine::Group;
use serde::Serialize;

use crate::{error::Result, ui::format};

#[derive(Serialize)]
struct ReportRow {
    date: String,
    description: String,
    category: &'static str,
    amount_minor: i64,
    currency: &'static str,
    paid_by: String,
    split_method: &'static str,
    participants: String,
}

/// Writes one CSV row per expense and returns the report path. The
/// filename carries a timestamp in the viewer's timezone so repeated
/// downloads never clobber each other.
pub fn write_csv(group: &Group, reports_dir: &Path, timezone: Tz) -> Result<PathBuf> {
    std::fs::create_dir_all(reports_dir)?;
    let stamp = Utc::now().with_timezone(&timezone).format("%Y%m%d-%H%M%S");
    let path = reports_dir.join(format!("{}-{stamp}.csv", group.id));

    let mut writer = Writer::from_path(&path)?;
    for expense in &group.expenses {
        let names: Vec<&str> = expense
            .split_between
            .iter()
            .map(|id| format::participant_name(&group.participants, id))
            .collect();
        writer.serialize(ReportRow {
            date: expense.date.clone(),
            description: expense.description.clone(),
            category: expense.category.label(),
            amount_minor: expense.amount.minor(),
            currency: group.currency.code(),
            paid_by: format::paid_by_names(&expense.paid_by, &group.participants),
            split_method: format::split_method_label(expense.split_method),
            participants: names.join(", "),
        })?;
    }
    writer.flush()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use engine::{
        Currency, Expense, ExpenseCategory, Group, GroupKind, GroupStatus, Money, PaidBy,
        Participant,
    };

    use super::*;

    fn group() -> Group {
        Group {
            id: "trip-rome".to_string(),
            name: "Rome".to_string(),
            kind: GroupKind::Trip,
            description: None,
            date_range: None,
            currency: Currency::Eur,
            status: GroupStatus::Active,
            participants: vec![
                Participant::new("p1", "Ada"),
                Participant::new("p2", "Bruno"),
            ],
            expenses: vec![
                Expense::new(
                    "e1",
                    "Trattoria dinner",
                    Money::new(8400),
                    "2024-05-10",
                    ExpenseCategory::Food,
                    PaidBy::One("p1".to_string()),
                    vec!["p1".to_string(), "p2".to_string()],
                )
                .unwrap(),
            ],
            settlements: Vec::new(),
        }
    }

    #[test]
    fn report_contains_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_csv(&group(), dir.path(), chrono_tz::Europe::Rome).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some(
                "date,description,category,amount_minor,currency,paid_by,split_method,participants"
            )
        );
        let row = lines.next().unwrap();
        assert!(row.contains("Trattoria dinner"));
        assert!(row.contains("8400"));
        assert!(row.contains("Ada"));
        assert!(row.contains("Equal split"));
    }

    #[test]
    fn filename_is_prefixed_with_the_group_id() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_csv(&group(), dir.path(), chrono_tz::Europe::Rome).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        assert!(name.starts_with("trip-rome-"));
        assert!(name.ends_with(".csv"));
    }
}
