pub mod recurring_slot;
pub mod slot_exception;
