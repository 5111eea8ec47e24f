use serde::Serialize;

use crate::config::SeatingConfig;

/// Номер места, например `A1`.
pub type SeatId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Empty,
    Selected,
    Reserved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub id: SeatId,
    pub row: String,
    pub number: u32,
    pub status: SeatStatus,
}

/// Схема зала в порядке отображения (по рядам, слева направо).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatGrid {
    slots: Vec<(String, u32)>,
}

impl SeatGrid {
    pub fn new(rows: &str, seats_per_row: u32) -> Self {
        let slots = rows
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(|row| (1..=seats_per_row).map(move |n| (row.to_string(), n)))
            .collect();
        Self { slots }
    }

    pub fn from_config(seating: &SeatingConfig) -> Self {
        Self::new(&seating.rows, seating.seats_per_row)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, seat_id: &str) -> bool {
        self.ids().any(|id| id == seat_id)
    }

    /// Номера мест в порядке схемы
    pub fn ids(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.slots.iter().map(|(row, n)| format!("{}{}", row, n))
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.slots.iter().map(|(row, n)| (row.as_str(), *n))
    }
}

impl Default for SeatGrid {
    fn default() -> Self {
        Self::from_config(&SeatingConfig::default())
    }
}
