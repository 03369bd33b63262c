use serde::{Deserialize, Serialize};
use shared::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const PRESENT: &str = "PRESENT";
pub const ABSENT: &str = "ABSENT";

/// One of the three event days, each backed by its own spreadsheet tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Day1,
    Day2,
    Day3,
}

impl Day {
    pub const ALL: [Day; 3] = [Day::Day1, Day::Day2, Day::Day3];

    pub fn number(self) -> u8 {
        match self {
            Day::Day1 => 1,
            Day::Day2 => 2,
            Day::Day3 => 3,
        }
    }

    /// Spreadsheet tab holding this day's rows.
    pub fn tab_name(self) -> &'static str {
        match self {
            Day::Day1 => "Day 1",
            Day::Day2 => "Day 2",
            Day::Day3 => "Day 3",
        }
    }

    /// Key used in a participant's `events` map.
    pub fn key(self) -> &'static str {
        match self {
            Day::Day1 => "day1",
            Day::Day2 => "day2",
            Day::Day3 => "day3",
        }
    }

    pub fn sessions(self) -> [Session; 2] {
        [
            Session::new(self, Slot::Forenoon),
            Session::new(self, Slot::Afternoon),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Forenoon,
    Afternoon,
}

impl Slot {
    pub fn key(self) -> &'static str {
        match self {
            Slot::Forenoon => "fn",
            Slot::Afternoon => "an",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Slot::Forenoon => "FN",
            Slot::Afternoon => "AN",
        }
    }
}

/// An attendance slot, mapped to exactly one spreadsheet column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Session {
    pub day: Day,
    pub slot: Slot,
}

impl Session {
    pub const ALL: [Session; 6] = [
        Session::new(Day::Day1, Slot::Forenoon),
        Session::new(Day::Day1, Slot::Afternoon),
        Session::new(Day::Day2, Slot::Forenoon),
        Session::new(Day::Day2, Slot::Afternoon),
        Session::new(Day::Day3, Slot::Forenoon),
        Session::new(Day::Day3, Slot::Afternoon),
    ];

    pub const fn new(day: Day, slot: Slot) -> Self {
        Self { day, slot }
    }

    /// e.g. `day2_an`
    pub fn key(&self) -> String {
        format!("{}_{}", self.day.key(), self.slot.key())
    }

    /// e.g. `Day 2 AN`
    pub fn column_header(&self) -> String {
        format!("{} {}", self.day.tab_name(), self.slot.header())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for Session {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Session::ALL
            .into_iter()
            .find(|session| session.key() == normalized)
            .ok_or_else(|| Error::InvalidSession(s.to_string()))
    }
}

impl Serialize for Session {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for Session {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A participant as served by the API, merged across all day tabs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub college: String,
    pub department: String,
    pub roll_no: String,
    /// day key (`day1`) -> event name
    pub events: BTreeMap<String, String>,
    /// session key (`day1_fn`) -> upper-case status
    pub attendance: BTreeMap<String, String>,
}

impl Participant {
    /// Fold another partial record for the same participant into this one.
    /// Identity fields stay as first seen; events and attendance from `other` win.
    pub fn merge(&mut self, other: Participant) {
        self.events.extend(other.events);
        self.attendance.extend(other.attendance);
    }

    pub fn status(&self, session: Session) -> &str {
        self.attendance
            .get(&session.key())
            .map(String::as_str)
            .unwrap_or(ABSENT)
    }

    pub fn is_present(&self, session: Session) -> bool {
        self.status(session) == PRESENT
    }

    pub fn has_id(&self, id: &str) -> bool {
        id_key(&self.id) == id_key(id)
    }

    /// Case-insensitive search over name, id and college.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&self.name, &self.id, &self.college]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Comparison key for participant ids: trimmed and lower-cased.
pub fn id_key(id: &str) -> String {
    id.trim().to_lowercase()
}

/// Status as it will be written to the sheet.
pub fn normalize_status(status: &str) -> Result<String> {
    let status = status.trim();
    if status.is_empty() {
        return Err(Error::InvalidInput("status must not be empty".into()));
    }
    Ok(status.to_uppercase())
}
