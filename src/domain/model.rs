use chrono::{DateTime, FixedOffset, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 一天中的時間（時、分），不強制檢查範圍
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockTime {
    pub hours: u8,
    pub minutes: u8,
}

impl ClockTime {
    pub fn new(hours: u8, minutes: u8) -> Self {
        Self { hours, minutes }
    }

    pub fn is_valid(&self) -> bool {
        self.hours < 24 && self.minutes < 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Regular hours for one weekday. When `is_closed` is set the times are
/// ignored and the business is closed that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    #[serde(with = "weekday_number")]
    pub weekday: Weekday,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default)]
    pub is_closed: bool,
}

/// Hours for a specific date or run of dates.
///
/// If `start_time` and `end_time` fall on different calendar dates the entry
/// covers every date from the start date to the end date, each open from the
/// start's time of day to the end's time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOverrideHours {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub is_closed: bool,
}

impl DateOverrideHours {
    pub fn spans_multiple_days(&self) -> bool {
        self.start_time.date_naive() != self.end_time.date_naive()
    }

    /// Calendar dates covered by this entry, inclusive on both ends.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_time.date_naive();
        self.start_time
            .date_naive()
            .iter_days()
            .take_while(move |day| *day <= end)
    }
}

/// A titled collection of weekly and date-specific hours.
///
/// `active` only controls whether the set shows up in the active listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoursSet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub active: bool,
    #[serde(rename = "generic_hours", default, deserialize_with = "null_as_empty")]
    pub generic: Vec<WeeklyHours>,
    #[serde(rename = "specific_hours", default, deserialize_with = "null_as_empty")]
    pub specific: Vec<DateOverrideHours>,
}

/// The unit of storage, and the body of a PUT request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedHoursSet {
    pub name: String,
    #[serde(rename = "hours_set")]
    pub set: HoursSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Replaced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursNamesResponse {
    pub hours_names: Vec<String>,
}

/// 只解析 `active` 欄位，其餘內容忽略
#[derive(Debug, Deserialize)]
pub(crate) struct ActiveFlag {
    #[serde(default)]
    pub active: bool,
}

// 舊資料可能把空陣列存成 null
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Weekdays travel as integers, 0 = Sunday through 6 = Saturday.
mod weekday_number {
    use chrono::Weekday;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(day.num_days_from_sunday() as u8)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Weekday, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(Weekday::Sun),
            1 => Ok(Weekday::Mon),
            2 => Ok(Weekday::Tue),
            3 => Ok(Weekday::Wed),
            4 => Ok(Weekday::Thu),
            5 => Ok(Weekday::Fri),
            6 => Ok(Weekday::Sat),
            other => Err(de::Error::custom(format!(
                "weekday must be between 0 and 6, got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn monday_nine_to_five() -> WeeklyHours {
        WeeklyHours {
            weekday: Weekday::Mon,
            start_time: ClockTime::new(9, 0),
            end_time: ClockTime::new(17, 0),
            is_closed: false,
        }
    }

    #[test]
    fn test_weekly_hours_wire_format() {
        let value = serde_json::to_value(monday_nine_to_five()).unwrap();
        assert_eq!(
            value,
            json!({
                "weekday": 1,
                "start_time": {"hours": 9, "minutes": 0},
                "end_time": {"hours": 17, "minutes": 0},
                "is_closed": false
            })
        );
    }

    #[test]
    fn test_sunday_is_zero() {
        let parsed: WeeklyHours = serde_json::from_value(json!({
            "weekday": 0,
            "start_time": {"hours": 10, "minutes": 30},
            "end_time": {"hours": 14, "minutes": 0},
            "is_closed": true
        }))
        .unwrap();
        assert_eq!(parsed.weekday, Weekday::Sun);
        assert!(parsed.is_closed);
    }

    #[test]
    fn test_weekday_out_of_range_is_rejected() {
        let result = serde_json::from_value::<WeeklyHours>(json!({
            "weekday": 7,
            "start_time": {"hours": 9, "minutes": 0},
            "end_time": {"hours": 17, "minutes": 0},
            "is_closed": false
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_hours_set_accepts_null_lists() {
        let parsed: HoursSet = serde_json::from_value(json!({
            "title": "Default",
            "active": true,
            "generic_hours": null,
            "specific_hours": null
        }))
        .unwrap();
        assert!(parsed.generic.is_empty());
        assert!(parsed.specific.is_empty());

        let missing: HoursSet = serde_json::from_value(json!({"title": "Bare"})).unwrap();
        assert!(!missing.active);
        assert!(missing.generic.is_empty());

        let untitled: HoursSet = serde_json::from_value(json!({"active": true})).unwrap();
        assert_eq!(untitled.title, "");
    }

    #[test]
    fn test_named_set_uses_hours_set_key() {
        let named: NamedHoursSet = serde_json::from_value(json!({
            "name": "shop",
            "hours_set": {"title": "Default", "active": true, "generic_hours": [], "specific_hours": []}
        }))
        .unwrap();
        assert_eq!(named.name, "shop");
        assert_eq!(named.set.title, "Default");
    }

    #[test]
    fn test_override_date_span() {
        let entry: DateOverrideHours = serde_json::from_value(json!({
            "start_time": "2024-12-24T10:00:00-05:00",
            "end_time": "2024-12-26T14:00:00-05:00",
            "is_closed": false
        }))
        .unwrap();
        assert!(entry.spans_multiple_days());

        let dates: Vec<String> = entry.dates().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2024-12-24", "2024-12-25", "2024-12-26"]);
    }

    #[test]
    fn test_single_day_override() {
        let entry: DateOverrideHours = serde_json::from_value(json!({
            "start_time": "2024-07-04T00:00:00Z",
            "end_time": "2024-07-04T23:59:00Z",
            "is_closed": true
        }))
        .unwrap();
        assert!(!entry.spans_multiple_days());
        assert_eq!(entry.dates().count(), 1);
    }

    #[test]
    fn test_clock_time_display_and_range() {
        assert_eq!(ClockTime::new(9, 5).to_string(), "09:05");
        assert!(ClockTime::new(23, 59).is_valid());
        assert!(!ClockTime::new(24, 0).is_valid());
        assert!(!ClockTime::new(12, 60).is_valid());
    }
}
