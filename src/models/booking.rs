use serde::{Deserialize, Serialize};

use super::SeatId;

/// Одна подтверждённая бронь. После записи в историю не меняется.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub name: String,
    pub seats: Vec<SeatId>,
    /// Сколько мест реально забронировано (длина `seats`), а не заявленное количество
    pub quantity: usize,
}

impl BookingRecord {
    pub fn new(name: impl Into<String>, seats: Vec<SeatId>) -> Self {
        let quantity = seats.len();
        Self {
            name: name.into(),
            seats,
            quantity,
        }
    }
}
