use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Month/day/year without padding, e.g. `12/31/2024` or `1/5/2025`.
pub const DATE_FORMAT: &str = "%-m/%-d/%Y";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// 持久化的計數紀錄：`{"date":"12/31/2024","count":7}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub count: u64,
}

impl CounterRecord {
    pub fn new(date: NaiveDate, count: u64) -> Self {
        Self { date, count }
    }

    /// Fresh record for `date` with no tickets issued yet.
    pub fn starting(date: NaiveDate) -> Self {
        Self::new(date, 0)
    }
}

/// 單次請求產生的票券內容，不會被保存
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDocument {
    pub date: String,
    pub time: String,
    pub ticket_number: u64,
}

impl TicketDocument {
    pub fn new(date: impl Into<String>, time: impl Into<String>, ticket_number: u64) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            ticket_number,
        }
    }

    pub fn issued_at(now: NaiveDateTime, ticket_number: u64) -> Self {
        Self::new(
            now.format(DATE_FORMAT).to_string(),
            now.format(TIME_FORMAT).to_string(),
            ticket_number,
        )
    }
}

#[derive(Debug, Clone)]
pub struct IssuedTicket {
    pub number: u64,
    pub document: TicketDocument,
    pub bytes: Vec<u8>,
}

impl IssuedTicket {
    pub fn filename(&self) -> String {
        format!("ticket-{}.pdf", self.number)
    }
}

pub mod calendar_date {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const ISO_FORMAT: &str = "%Y-%m-%d";

    pub fn format(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Accepts `M/D/YYYY` (zero padding optional) and ISO `YYYY-MM-DD`.
    pub fn parse(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, "%m/%d/%Y")
            .or_else(|_| NaiveDate::parse_from_str(value, ISO_FORMAT))
            .ok()
    }

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognised calendar date: {raw}"))
        })
    }
}
