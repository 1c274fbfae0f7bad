use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;
use weekslot_core::{
    models::{
        exception::{ExceptionChange, SlotException},
        recurring_slot::{NewRecurringSlot, RecurringSlot},
    },
    store::{ExceptionWrite, SlotInsert, SlotStore},
};

// Mock store for testing the service and handlers without a database
mock! {
    pub SlotStore {}

    #[async_trait]
    impl SlotStore for SlotStore {
        async fn insert_recurring_slot(
            &self,
            slot: &NewRecurringSlot,
        ) -> eyre::Result<SlotInsert>;

        async fn list_recurring_slots(&self) -> eyre::Result<Vec<RecurringSlot>>;

        async fn list_exceptions_on(
            &self,
            dates: &[NaiveDate],
        ) -> eyre::Result<Vec<SlotException>>;

        async fn apply_exception(
            &self,
            recurring_slot_id: Uuid,
            date: NaiveDate,
            change: ExceptionChange,
        ) -> eyre::Result<ExceptionWrite>;
    }
}
