//! PostgreSQL-backed section collaborator.

use async_trait::async_trait;
use classgrid_core::{
    models::section::{SectionId, SectionRecord},
    store::{ScheduleUpdate, SectionStore},
};
use eyre::Result;

use crate::{DbPool, models::DbSection, repositories::section};

#[derive(Debug, Clone)]
pub struct PgSectionStore {
    pool: DbPool,
}

impl PgSectionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionStore for PgSectionStore {
    async fn load_sections(&self) -> Result<Vec<SectionRecord>> {
        let rows = section::list_sections(&self.pool).await?;
        Ok(rows.into_iter().map(SectionRecord::from).collect())
    }

    async fn on_schedule_update(&self, section_id: SectionId, update: ScheduleUpdate) -> Result<()> {
        section::update_section_schedule(
            &self.pool,
            section_id,
            &update.schedule_string(),
            update.duration_minutes as i32,
        )
        .await?;
        Ok(())
    }

    async fn on_section_update(&self, record: SectionRecord) -> Result<()> {
        let row = DbSection {
            id: record.id,
            course_id: record.course_id,
            name: record.name,
            schedule: Some(record.schedule),
            max_capacity: record.max_capacity,
            current_enrollment: record.current_enrollment,
            active: record.active,
            duration_minutes: record.duration_minutes,
        };
        section::update_section(&self.pool, &row).await?;
        Ok(())
    }
}
