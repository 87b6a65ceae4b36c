use async_trait::async_trait;
use classgrid_core::{
    models::section::{SectionId, SectionRecord},
    store::ScheduleUpdate,
};
use mockall::mock;

// Mock collaborator for testing
mock! {
    pub SectionStore {}

    #[async_trait]
    impl classgrid_core::store::SectionStore for SectionStore {
        async fn load_sections(&self) -> eyre::Result<Vec<SectionRecord>>;

        async fn on_schedule_update(
            &self,
            section_id: SectionId,
            update: ScheduleUpdate,
        ) -> eyre::Result<()>;

        async fn on_section_update(&self, section: SectionRecord) -> eyre::Result<()>;
    }
}
