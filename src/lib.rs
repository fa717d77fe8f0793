pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use self::adapters::{http::build_router, pdf::PdfTicketRenderer, storage::JsonFileStore};
pub use self::config::{CliConfig, TomlConfig};
pub use self::core::{dispenser::TicketDispenser, sequencer::TicketSequencer};
pub use self::domain::ports::SystemClock;
pub use self::utils::error::{Result, TicketError};
