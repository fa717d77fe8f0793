use crate::core::sequencer::TicketSequencer;
use crate::core::{Clock, CounterRecord, CounterStore, TicketRenderer};
use crate::domain::model::{IssuedTicket, TicketDocument};
use crate::utils::error::{Result, TicketError};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Issues tickets: sequencing, persistence and rendering for one request.
///
/// The in-memory record is created at startup from the store, mutated once
/// per request and flushed to the store before the ticket is rendered.
pub struct TicketDispenser<S: CounterStore, R: TicketRenderer, C: Clock> {
    store: Arc<S>,
    renderer: R,
    clock: C,
    sequencer: TicketSequencer,
    state: Mutex<CounterRecord>,
}

impl<S: CounterStore + 'static, R: TicketRenderer, C: Clock> TicketDispenser<S, R, C> {
    pub fn new(store: S, renderer: R, clock: C) -> Self {
        let today = clock.now().date();
        let record = store.load(today);
        tracing::info!(
            date = %record.date,
            count = record.count,
            "📂 Counter state loaded"
        );

        Self {
            store: Arc::new(store),
            renderer,
            clock,
            sequencer: TicketSequencer::new(),
            state: Mutex::new(record),
        }
    }

    pub async fn issue(&self) -> Result<IssuedTicket> {
        // 取時間、遞增、存檔必須在同一把鎖內完成
        let (now, number) = {
            let mut current = self.state.lock().await;
            let now = self.clock.now();

            let mut next = current.clone();
            let number = self.sequencer.next(now, &mut next);

            // 存檔失敗時記憶體維持原值，避免與磁碟不一致
            self.persist(next.clone()).await?;
            *current = next;

            (now, number)
        };

        let document = TicketDocument::issued_at(now, number);
        let bytes = self.renderer.render(&document)?;

        tracing::info!(
            ticket = number,
            date = %document.date,
            time = %document.time,
            bytes = bytes.len(),
            "🎫 Ticket issued"
        );

        Ok(IssuedTicket {
            number,
            document,
            bytes,
        })
    }

    /// fsync 會阻塞，交給 blocking 執行緒池
    async fn persist(&self, record: CounterRecord) -> Result<()> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.save(&record))
            .await
            .map_err(|e| TicketError::IoError(std::io::Error::other(e)))?
    }

    pub async fn snapshot(&self) -> CounterRecord {
        self.state.lock().await.clone()
    }
}
