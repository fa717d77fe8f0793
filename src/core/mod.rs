pub mod dispenser;
pub mod sequencer;

pub use crate::domain::model::{CounterRecord, IssuedTicket, TicketDocument};
pub use crate::domain::ports::{Clock, ConfigProvider, CounterStore, SystemClock, TicketRenderer};
pub use crate::utils::error::Result;
