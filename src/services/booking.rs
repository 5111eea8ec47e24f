use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::booking::{ledger, BookingAction, BookingDesk, BookingNotice, Effect};
use crate::error::AppError;
use crate::models::{BookingRecord, SeatGrid};
use crate::store::KeyValueStore;

/// Держит стол бронирования под мьютексом и синхронизирует историю с хранилищем.
pub struct BookingService {
    desk: Mutex<BookingDesk>,
    store: Arc<dyn KeyValueStore>,
}

impl BookingService {
    /// Восстанавливает историю из хранилища; занятые места выводятся из неё при чтении.
    pub async fn load(grid: SeatGrid, store: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let history = ledger::load(store.as_ref()).await?;
        Ok(Self {
            desk: Mutex::new(BookingDesk::new(grid, history)),
            store,
        })
    }

    pub async fn desk(&self) -> MutexGuard<'_, BookingDesk> {
        self.desk.lock().await
    }

    /// Действия, меняющие историю, считаются на копии и фиксируются только после
    /// успешной записи в хранилище. Остальные применяются на месте.
    pub async fn dispatch(
        &self,
        action: BookingAction,
    ) -> Result<MutexGuard<'_, BookingDesk>, AppError> {
        let mut desk = self.desk.lock().await;
        let label = format!("{:?}", action);

        if !action.touches_ledger() {
            desk.reduce(action).inspect_err(|notice| {
                debug!("Rejected {}: {}", label, notice);
            })?;
            return Ok(desk);
        }

        let mut next = desk.clone();
        let effect = next.reduce(action).inspect_err(|notice| {
            debug!("Rejected {}: {}", label, notice);
        })?;

        match effect {
            Effect::PersistLedger => {
                ledger::save(self.store.as_ref(), next.ledger()).await?;
                info!("Booking history saved ({} records)", next.ledger().len());
            }
            Effect::RemoveLedger => {
                ledger::clear(self.store.as_ref()).await?;
                info!("Booking history cleared");
            }
            Effect::None => {}
        }

        *desk = next;
        Ok(desk)
    }

    pub async fn confirm(&self) -> Result<BookingRecord, AppError> {
        let desk = self.dispatch(BookingAction::Confirm).await?;
        let record = desk
            .ledger()
            .last()
            .cloned()
            .ok_or(BookingNotice::NothingSelected)?;
        info!(
            "Booked {} seat(s) for {}: {}",
            record.quantity,
            record.name,
            record.seats.join(", ")
        );
        Ok(record)
    }
}
