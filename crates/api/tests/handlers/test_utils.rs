use std::sync::Arc;

use axum_test::TestServer;
use classgrid_api::{ApiState, build_router};
use classgrid_core::{
    grid::{GridConfig, TimeGrid},
    models::section::{SectionId, SectionRecord},
};
use classgrid_db::mock::MockSectionStore;

pub struct TestContext {
    pub store: MockSectionStore,
}

impl TestContext {
    /// A context with no expectations set on the store.
    pub fn new() -> Self {
        Self {
            store: MockSectionStore::new(),
        }
    }

    /// A context whose store serves `records` once, at startup.
    pub fn with_sections(records: Vec<SectionRecord>) -> Self {
        let mut store = MockSectionStore::new();
        store
            .expect_load_sections()
            .times(1)
            .returning(move || Ok(records.clone()));

        Self { store }
    }

    pub async fn server(self) -> TestServer {
        let grid = TimeGrid::new(GridConfig::half_hourly()).unwrap();
        let state = ApiState::load(grid, Arc::new(self.store))
            .await
            .expect("Failed to load timetable");

        TestServer::new(build_router(Arc::new(state))).expect("Failed to start test server")
    }
}

pub fn record(id: SectionId, schedule: &str, duration_minutes: Option<i32>) -> SectionRecord {
    SectionRecord {
        id,
        course_id: 1,
        name: format!("Section {}", id),
        schedule: schedule.to_string(),
        max_capacity: 20,
        current_enrollment: 5,
        active: true,
        duration_minutes,
    }
}
