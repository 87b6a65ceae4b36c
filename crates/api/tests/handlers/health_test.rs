use classgrid_api::routes::health::{HealthResponse, VersionResponse};

use crate::test_utils::{TestContext, record};

#[tokio::test]
async fn test_health_reports_section_counts() {
    let server = TestContext::with_sections(vec![
        record(1, "Sunday 09:00-10:00", None),
        record(2, "TBD", None),
    ])
    .server()
    .await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: HealthResponse = response.json();
    assert_eq!(body.status, "ok");
    assert_eq!(body.sections, 2);
    assert_eq!(body.unscheduled, 1);
}

#[tokio::test]
async fn test_version() {
    let server = TestContext::with_sections(vec![]).server().await;

    let body: VersionResponse = server.get("/version").await.json();

    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}
