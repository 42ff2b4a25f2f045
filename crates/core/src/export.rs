//! CSV encoding helpers for the admin export.
//!
//! The export writes one row per survey response with a stable column
//! order; the schedule map is flattened into `date=shift` pairs inside a
//! single cell. Quoting follows RFC 4180: fields containing commas,
//! quotes, or newlines are wrapped in double quotes with inner quotes
//! doubled.

use crate::schedule::ScheduleMap;

/// Quote a single CSV field if it contains a delimiter, quote, or newline.
pub fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join pre-encoded fields into a CSV row (no trailing newline).
pub fn csv_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|f| csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Flatten a schedule map into a single `date=shift; date=shift` cell.
///
/// Entries come out date-sorted because [`ScheduleMap`] is a `BTreeMap`.
pub fn flatten_schedule(schedule: &ScheduleMap) -> String {
    schedule
        .iter()
        .map(|(date, shift)| format!("{date}={shift}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_field_unquoted() {
        assert_eq!(csv_field("icu"), "icu");
    }

    #[test]
    fn comma_forces_quoting() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn newline_forces_quoting() {
        assert_eq!(csv_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn row_joins_and_escapes() {
        let row = csv_row(["1", "ward, icu", "ok"]);
        assert_eq!(row, "1,\"ward, icu\",ok");
    }

    #[test]
    fn schedule_flattens_sorted() {
        let mut schedule = ScheduleMap::new();
        schedule.insert("2025-04-02".into(), "OFF".into());
        schedule.insert("2025-04-01".into(), "D".into());

        assert_eq!(flatten_schedule(&schedule), "2025-04-01=D; 2025-04-02=OFF");
    }

    #[test]
    fn empty_schedule_flattens_empty() {
        assert_eq!(flatten_schedule(&ScheduleMap::new()), "");
    }
}
