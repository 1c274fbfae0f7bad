pub mod exception;
pub mod recurring_slot;
pub mod week;
