//! HTTP surface: a single `GET /generate-ticket` endpoint.

use crate::core::dispenser::TicketDispenser;
use crate::core::{Clock, CounterStore, TicketRenderer};
use crate::utils::error::{Result, TicketError};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub const TICKET_ROUTE: &str = "/generate-ticket";

pub fn build_router<S, R, C>(dispenser: Arc<TicketDispenser<S, R, C>>) -> Router
where
    S: CounterStore + 'static,
    R: TicketRenderer + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(TICKET_ROUTE, get(generate_ticket::<S, R, C>))
        .with_state(dispenser)
        .layer(TraceLayer::new_for_http())
}

/// 綁定監聽位址，失敗時歸類為系統錯誤
pub async fn bind(address: &str) -> Result<TcpListener> {
    let listener = TcpListener::bind(address).await?;
    Ok(listener)
}

async fn generate_ticket<S, R, C>(
    State(dispenser): State<Arc<TicketDispenser<S, R, C>>>,
) -> std::result::Result<Response, TicketError>
where
    S: CounterStore + 'static,
    R: TicketRenderer + 'static,
    C: Clock + 'static,
{
    let ticket = dispenser.issue().await?;
    let disposition = format!("attachment; filename=\"{}\"", ticket.filename());
    let length = ticket.bytes.len().to_string();

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, length),
        ],
        ticket.bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CounterRecord, TicketDocument};
    use crate::utils::error::ErrorCategory;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{NaiveDate, NaiveDateTime};
    use tower::ServiceExt;

    struct MemoryStore;

    impl CounterStore for MemoryStore {
        fn load(&self, today: NaiveDate) -> CounterRecord {
            CounterRecord::starting(today)
        }

        fn save(&self, _record: &CounterRecord) -> Result<()> {
            Ok(())
        }
    }

    struct StubRenderer;

    impl TicketRenderer for StubRenderer {
        fn render(&self, document: &TicketDocument) -> Result<Vec<u8>> {
            Ok(format!("ticket {}", document.ticket_number).into_bytes())
        }
    }

    struct NoonClock;

    impl Clock for NoonClock {
        fn now(&self) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 12, 31)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        }
    }

    fn app() -> Router {
        build_router(Arc::new(TicketDispenser::new(
            MemoryStore,
            StubRenderer,
            NoonClock,
        )))
    }

    #[tokio::test]
    async fn test_ticket_headers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(TICKET_ROUTE)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"ticket-1.pdf\""
        );
        assert_eq!(headers[header::CONTENT_LENGTH], "8");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/tickets").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_is_not_allowed() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(TICKET_ROUTE)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_bind_on_busy_port_is_system_error() {
        let taken = bind("127.0.0.1:0").await.unwrap();
        let address = taken.local_addr().unwrap().to_string();

        let err = bind(&address).await.unwrap_err();

        assert!(matches!(err, TicketError::IoError(_)));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(
            err.recovery_suggestion(),
            "Check file permissions and that the port is free"
        );
    }
}
