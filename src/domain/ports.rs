use crate::domain::model::{CounterRecord, TicketDocument};
use crate::utils::error::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::path::Path;

/// Durable home of the single `{date, count}` record.
pub trait CounterStore: Send + Sync {
    /// Never fails: a missing or unreadable record yields `{today, 0}`.
    fn load(&self, today: NaiveDate) -> CounterRecord;

    /// Replaces the persisted record. Either the whole new record lands or the
    /// previous one stays in place.
    fn save(&self, record: &CounterRecord) -> Result<()>;
}

pub trait TicketRenderer: Send + Sync {
    fn render(&self, document: &TicketDocument) -> Result<Vec<u8>>;
}

/// 取得本地時間，測試時可替換成固定時鐘
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn state_file(&self) -> &Path;
    fn json_logs(&self) -> bool;

    fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }
}
