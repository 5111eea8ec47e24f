pub mod seat;
pub mod booking;
pub mod student;

pub use seat::{Seat, SeatGrid, SeatId, SeatStatus};
pub use booking::BookingRecord;
pub use student::Student;
