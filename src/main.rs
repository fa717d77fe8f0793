use clap::Parser;
use std::sync::Arc;
use ticket_dispenser::adapters::http;
use ticket_dispenser::core::ConfigProvider;
use ticket_dispenser::utils::logger;
use ticket_dispenser::{
    build_router, CliConfig, JsonFileStore, PdfTicketRenderer, SystemClock, TicketDispenser,
    TicketError, TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入並驗證配置，失敗時尚未初始化日誌，直接輸出到 stderr
    let config = match TomlConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_logger(config.verbose(), config.json_logs());
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?})",
            e,
            e.category()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }
}

async fn run(config: &TomlConfig) -> Result<(), TicketError> {
    let store = JsonFileStore::new(config.state_file());
    tracing::info!("📁 State file: {}", store.path().display());

    let dispenser = Arc::new(TicketDispenser::new(
        store,
        PdfTicketRenderer::new(),
        SystemClock,
    ));
    let app = build_router(dispenser);

    let address = config.bind_address();
    let listener = http::bind(&address).await?;

    tracing::info!("Server is running on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down gracefully...");
}
