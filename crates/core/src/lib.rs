//! # Weekslot Core
//!
//! Domain types and rules for a weekly recurring schedule with date-specific
//! exceptions. The storage engine is abstracted behind [`store::SlotStore`];
//! [`service::SlotService`] validates input and drives the store, and
//! [`materializer`] resolves recurring slots and exceptions into concrete
//! per-date slots for a week.

pub mod errors;
pub mod materializer;
pub mod memory;
pub mod models;
pub mod service;
pub mod store;
pub mod time;
