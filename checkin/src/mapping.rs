//! Mapping between raw spreadsheet grids and participant records.

use crate::domain::{ABSENT, Day, Participant, id_key};
use shared::{Error, Result};
use std::collections::HashMap;

pub const BOOKING_ID: &str = "Booking ID";
pub const UNIQUE_ID: &str = "Unique ID";
pub const NAME: &str = "Name";
pub const EMAIL: &str = "Email";
pub const MOBILE: &str = "Mobile Number";
pub const COLLEGE: &str = "College Name";
pub const DEPARTMENT: &str = "Department";
pub const ROLL_NO: &str = "Roll No";
pub const EVENT_NAME: &str = "Event Name";

/// The raw contents of one day tab. Row 0 of `rows` is the header row.
#[derive(Clone, Debug)]
pub struct SheetTab {
    pub day: Day,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTab {
    /// Returns `None` for a tab with no rows at all.
    pub fn from_values(day: Day, rows: Vec<Vec<String>>) -> Option<Self> {
        let headers = rows.first()?.clone();
        Some(Self { day, headers, rows })
    }

    pub fn tab_name(&self) -> &'static str {
        self.day.tab_name()
    }

    pub fn column(&self, name: &str) -> Result<usize> {
        column_index(&self.headers, name).ok_or_else(|| Error::ColumnNotFound {
            column: name.to_string(),
            tab: self.tab_name().to_string(),
        })
    }

    /// Index into `rows` of the first data row whose Booking ID matches `id`.
    pub fn find_row(&self, id: &str) -> Result<Option<usize>> {
        let id_idx = self.column(BOOKING_ID)?;
        let target = id_key(id);
        if target.is_empty() {
            return Ok(None);
        }

        Ok(self
            .rows
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| {
                row.get(id_idx)
                    .is_some_and(|cell| id_key(cell) == target)
            })
            .map(|(idx, _)| idx))
    }

    pub fn participant_at(&self, row_idx: usize) -> Option<Participant> {
        self.rows
            .get(row_idx)
            .and_then(|row| map_row(row, &self.headers, self.day))
    }

    /// Every data row that carries an id.
    pub fn participants(&self) -> impl Iterator<Item = Participant> + '_ {
        self.rows
            .iter()
            .skip(1)
            .filter_map(|row| map_row(row, &self.headers, self.day))
    }
}

pub fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Cell value under the named column, or `""` when the column or cell is absent.
pub fn cell<'a>(row: &'a [String], headers: &[String], name: &str) -> &'a str {
    column_index(headers, name)
        .and_then(|idx| row.get(idx))
        .map(String::as_str)
        .unwrap_or("")
}

pub fn map_row(row: &[String], headers: &[String], day: Day) -> Option<Participant> {
    let get = |name: &str| cell(row, headers, name).to_string();

    let id = match cell(row, headers, BOOKING_ID) {
        "" => get(UNIQUE_ID),
        id => id.to_string(),
    };
    if id.is_empty() {
        return None;
    }

    let mut participant = Participant {
        id,
        name: get(NAME),
        email: get(EMAIL),
        mobile: get(MOBILE),
        college: get(COLLEGE),
        department: get(DEPARTMENT),
        roll_no: get(ROLL_NO),
        ..Default::default()
    };

    participant
        .events
        .insert(day.key().to_string(), get(EVENT_NAME));

    for session in day.sessions() {
        let status = match cell(row, headers, &session.column_header()) {
            "" => ABSENT.to_string(),
            value => value.to_uppercase(),
        };
        participant.attendance.insert(session.key(), status);
    }

    Some(participant)
}

/// Merge participants from several tabs, keyed by lower-cased id, in first-seen order.
pub fn merge_participants<'a, I>(tabs: I) -> Vec<Participant>
where
    I: IntoIterator<Item = &'a SheetTab>,
{
    let mut merged: Vec<Participant> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for tab in tabs {
        for participant in tab.participants() {
            let key = id_key(&participant.id);
            match positions.get(&key) {
                Some(&pos) => merged[pos].merge(participant),
                None => {
                    positions.insert(key, merged.len());
                    merged.push(participant);
                }
            }
        }
    }

    merged
}

/// Bijective base-26 column name for a 0-based index: 0 -> A, 26 -> AA.
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A1 address of a single cell, e.g. `'Day 1'!E5`. `row_number` is 1-based.
pub fn cell_address(tab_name: &str, column_index: usize, row_number: usize) -> String {
    format!(
        "'{}'!{}{}",
        tab_name.replace('\'', "''"),
        column_letter(column_index),
        row_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PRESENT;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn day1_tab() -> SheetTab {
        SheetTab::from_values(
            Day::Day1,
            vec![
                strings(&[
                    "Booking ID", "Name", "Email", "Mobile Number", "College Name",
                    "Department", "Roll No", "Event Name", "Day 1 FN", "Day 1 AN",
                ]),
                strings(&[
                    "BK1", "Alice", "alice@example.com", "98765", "Tech U", "CSE", "CSE-1",
                    "Keynote", "present", "",
                ]),
                strings(&["", "Nobody"]),
                strings(&["BK2", "Bob"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(4), "E");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(51), "AZ");
        assert_eq!(column_letter(52), "BA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_cell_address() {
        assert_eq!(cell_address("Day 1", 8, 2), "'Day 1'!I2");
        assert_eq!(cell_address("Bob's", 0, 10), "'Bob''s'!A10");
    }

    #[test]
    fn test_map_row_full() {
        let tab = day1_tab();
        let p = tab.participant_at(1).unwrap();

        assert_eq!(p.id, "BK1");
        assert_eq!(p.name, "Alice");
        assert_eq!(p.email, "alice@example.com");
        assert_eq!(p.mobile, "98765");
        assert_eq!(p.college, "Tech U");
        assert_eq!(p.department, "CSE");
        assert_eq!(p.roll_no, "CSE-1");
        assert_eq!(p.events["day1"], "Keynote");
        assert_eq!(p.attendance["day1_fn"], PRESENT);
        assert_eq!(p.attendance["day1_an"], ABSENT);
        assert_eq!(p.attendance.len(), 2);
    }

    #[test]
    fn test_map_row_ragged_and_empty() {
        let tab = day1_tab();
        assert!(tab.participant_at(2).is_none());

        let bob = tab.participant_at(3).unwrap();
        assert_eq!(bob.email, "");
        assert_eq!(bob.events["day1"], "");
        assert_eq!(bob.attendance["day1_an"], ABSENT);
    }

    #[test]
    fn test_map_row_falls_back_to_unique_id() {
        let headers = strings(&["Unique ID", "Name", "Day 2 FN"]);
        let row = strings(&["U-77", "Dana", "Present"]);
        let p = map_row(&row, &headers, Day::Day2).unwrap();
        assert_eq!(p.id, "U-77");
        assert_eq!(p.attendance["day2_fn"], PRESENT);
        assert_eq!(p.attendance["day2_an"], ABSENT);
        assert!(p.events.contains_key("day2"));
    }

    #[test]
    fn test_find_row_is_case_insensitive() {
        let tab = day1_tab();
        assert_eq!(tab.find_row("bk2").unwrap(), Some(3));
        assert_eq!(tab.find_row(" BK1 ").unwrap(), Some(1));
        assert_eq!(tab.find_row("BK9").unwrap(), None);
    }

    #[test]
    fn test_find_row_folds_unicode_case() {
        let tab = SheetTab::from_values(
            Day::Day1,
            vec![strings(&["Booking ID", "Name"]), strings(&["ÄRGER-7", "Anna"])],
        )
        .unwrap();
        assert_eq!(tab.find_row("ärger-7").unwrap(), Some(1));
        assert_eq!(tab.find_row("").unwrap(), None);
    }

    #[test]
    fn test_find_row_never_matches_header() {
        let tab = day1_tab();
        assert_eq!(tab.find_row("Booking ID").unwrap(), None);
    }

    #[test]
    fn test_find_row_without_booking_column() {
        let tab = SheetTab::from_values(
            Day::Day2,
            vec![strings(&["Unique ID", "Name"]), strings(&["U1", "A"])],
        )
        .unwrap();
        assert!(matches!(
            tab.find_row("U1"),
            Err(Error::ColumnNotFound { column, tab }) if column == "Booking ID" && tab == "Day 2"
        ));
    }

    #[test]
    fn test_from_values_rejects_empty_grid() {
        assert!(SheetTab::from_values(Day::Day1, vec![]).is_none());
    }

    #[test]
    fn test_merge_participants_across_tabs() {
        let day1 = day1_tab();
        let day2 = SheetTab::from_values(
            Day::Day2,
            vec![
                strings(&["Booking ID", "Name", "Event Name", "Day 2 FN", "Day 2 AN"]),
                strings(&["BK3", "Carol", "Seminar", "", ""]),
                strings(&["bk1", "Alice Again", "Marathon", "PRESENT", "absent"]),
            ],
        )
        .unwrap();

        let merged = merge_participants([&day1, &day2]);
        let ids: Vec<&str> = merged.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["BK1", "BK2", "BK3"]);

        let alice = &merged[0];
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.events["day1"], "Keynote");
        assert_eq!(alice.events["day2"], "Marathon");
        assert_eq!(alice.attendance["day2_fn"], PRESENT);
        assert_eq!(alice.attendance["day2_an"], ABSENT);
        assert_eq!(alice.attendance.len(), 4);
    }
}
