//! Seat selection state machine.
//!
//! A [`BookingDesk`] owns the seat grid, the booking ledger and the state of
//! the booking form. Every user event is a [`BookingAction`] fed through
//! [`BookingDesk::reduce`]; a rejected action returns a [`BookingNotice`] and
//! leaves the desk untouched. A successful action returns the storage
//! [`Effect`] the caller has to carry out before committing the new state.

pub mod ledger;

use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::models::{BookingRecord, Seat, SeatGrid, SeatId, SeatStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Выбор мест закрыт, пока не введены имя и количество
    Locked,
    Selecting,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingForm {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingAction {
    StartSelecting { name: String, quantity: u32 },
    Select(SeatId),
    Deselect(SeatId),
    Confirm,
    ClearHistory,
}

impl BookingAction {
    /// Может ли действие изменить историю (и потребовать записи в хранилище)
    pub fn touches_ledger(&self) -> bool {
        matches!(self, BookingAction::Confirm | BookingAction::ClearHistory)
    }
}

/// Что нужно сделать с хранилищем после успешного перехода.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    PersistLedger,
    RemoveLedger,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingNotice {
    #[error("Please enter your name and the number of seats you want to book.")]
    MissingDetails,
    #[error("Please enter your name and the number of seats before selecting.")]
    SelectionLocked,
    #[error("You cannot select more than {quantity} seat(s).")]
    QuantityExceeded { quantity: u32 },
    #[error("{selected} seat(s) are already selected, release some before lowering the quantity to {quantity}.")]
    QuantityBelowSelection { selected: usize, quantity: u32 },
    #[error("Seat {0} is already reserved.")]
    SeatReserved(SeatId),
    #[error("Seat {0} does not exist.")]
    UnknownSeat(SeatId),
    #[error("Select at least one seat before booking.")]
    NothingSelected,
}

/// Снимок для отображения: схема зала с вычисленными статусами и состояние формы.
#[derive(Debug, Clone, Serialize)]
pub struct SeatMap {
    pub phase: Phase,
    pub form: BookingForm,
    pub selected: Vec<SeatId>,
    pub seats: Vec<Seat>,
}

#[derive(Debug, Clone)]
pub struct BookingDesk {
    grid: SeatGrid,
    ledger: Vec<BookingRecord>,
    phase: Phase,
    form: BookingForm,
    selection: Vec<SeatId>,
}

impl BookingDesk {
    pub fn new(grid: SeatGrid, ledger: Vec<BookingRecord>) -> Self {
        Self {
            grid,
            ledger,
            phase: Phase::Locked,
            form: BookingForm::default(),
            selection: Vec::new(),
        }
    }

    pub fn reduce(&mut self, action: BookingAction) -> Result<Effect, BookingNotice> {
        match action {
            BookingAction::StartSelecting { name, quantity } => self.start_selecting(&name, quantity),
            BookingAction::Select(seat) => self.select(seat),
            BookingAction::Deselect(seat) => Ok(self.deselect(&seat)),
            BookingAction::Confirm => self.confirm(),
            BookingAction::ClearHistory => Ok(self.clear_history()),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn selection(&self) -> &[SeatId] {
        &self.selection
    }

    pub fn ledger(&self) -> &[BookingRecord] {
        &self.ledger
    }

    pub fn reserved(&self) -> BTreeSet<SeatId> {
        ledger::reserved_seats(&self.ledger)
    }

    pub fn seat_map(&self) -> SeatMap {
        let reserved = self.reserved();
        let seats = self
            .grid
            .slots()
            .map(|(row, number)| {
                let id = format!("{}{}", row, number);
                let status = if reserved.contains(&id) {
                    SeatStatus::Reserved
                } else if self.selection.contains(&id) {
                    SeatStatus::Selected
                } else {
                    SeatStatus::Empty
                };
                Seat {
                    id,
                    row: row.to_string(),
                    number,
                    status,
                }
            })
            .collect();

        SeatMap {
            phase: self.phase,
            form: self.form.clone(),
            selected: self.selection.clone(),
            seats,
        }
    }

    fn start_selecting(&mut self, name: &str, quantity: u32) -> Result<Effect, BookingNotice> {
        let name = name.trim();
        if name.is_empty() || quantity == 0 {
            return Err(BookingNotice::MissingDetails);
        }
        if self.selection.len() > quantity as usize {
            return Err(BookingNotice::QuantityBelowSelection {
                selected: self.selection.len(),
                quantity,
            });
        }

        self.form = BookingForm {
            name: name.to_string(),
            quantity,
        };
        self.phase = Phase::Selecting;
        Ok(Effect::None)
    }

    fn select(&mut self, seat: SeatId) -> Result<Effect, BookingNotice> {
        if self.phase != Phase::Selecting {
            return Err(BookingNotice::SelectionLocked);
        }
        if !self.grid.contains(&seat) {
            return Err(BookingNotice::UnknownSeat(seat));
        }
        if self.reserved().contains(&seat) {
            return Err(BookingNotice::SeatReserved(seat));
        }
        if self.selection.contains(&seat) {
            return Ok(Effect::None);
        }
        if self.selection.len() >= self.form.quantity as usize {
            return Err(BookingNotice::QuantityExceeded {
                quantity: self.form.quantity,
            });
        }

        self.selection.push(seat);
        Ok(Effect::None)
    }

    fn deselect(&mut self, seat: &str) -> Effect {
        self.selection.retain(|s| s != seat);
        Effect::None
    }

    fn confirm(&mut self) -> Result<Effect, BookingNotice> {
        if self.form.name.trim().is_empty() || self.form.quantity == 0 {
            return Err(BookingNotice::MissingDetails);
        }
        if self.selection.is_empty() {
            return Err(BookingNotice::NothingSelected);
        }
        // Двойная бронь запрещена: место могло попасть в историю уже после выбора
        let reserved = self.reserved();
        if let Some(taken) = self.selection.iter().find(|s| reserved.contains(*s)) {
            return Err(BookingNotice::SeatReserved(taken.clone()));
        }

        let seats = std::mem::take(&mut self.selection);
        self.ledger
            .push(BookingRecord::new(self.form.name.trim(), seats));
        self.form = BookingForm::default();
        self.phase = Phase::Locked;
        Ok(Effect::PersistLedger)
    }

    fn clear_history(&mut self) -> Effect {
        self.ledger.clear();
        Effect::RemoveLedger
    }
}
