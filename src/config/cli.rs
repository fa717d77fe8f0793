use clap::Parser;
use std::path::PathBuf;

/// 命令列參數；未指定的值沿用 TOML 或預設值
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "ticket-dispenser")]
#[command(about = "Issues daily numbered queue tickets as PDF documents")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// File holding the persisted {date, count} record
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
