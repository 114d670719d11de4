//! mockall doubles for the store traits, shared by the API tests.

use async_trait::async_trait;
use commonslot_core::{
    models::{BusyEvent, DateRange, MemberId},
    sources::{EventSource, MemberDirectory},
};
use mockall::mock;
use uuid::Uuid;

mock! {
    pub EventStore {}

    #[async_trait]
    impl EventSource for EventStore {
        async fn query_events_for_member(
            &self,
            member_id: &str,
            range: Option<DateRange>,
        ) -> eyre::Result<Vec<BusyEvent>>;
    }
}

mock! {
    pub GroupDirectory {}

    #[async_trait]
    impl MemberDirectory for GroupDirectory {
        async fn group_members(&self, group_id: Uuid) -> eyre::Result<Option<Vec<MemberId>>>;
    }
}
