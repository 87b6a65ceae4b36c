use axum::http::StatusCode;
use classgrid_api::middleware::error_handling::map_error;
use classgrid_core::errors::GridError;
use rstest::rstest;

#[rstest]
#[case(GridError::NotFound("Section with ID 9 not found".to_string()), StatusCode::NOT_FOUND)]
#[case(GridError::Validation("Invalid length".to_string()), StatusCode::BAD_REQUEST)]
#[case(GridError::StaleMove("Section 1 moved".to_string()), StatusCode::CONFLICT)]
#[case(GridError::Persistence(eyre::eyre!("Database error")), StatusCode::BAD_GATEWAY)]
#[case(
    GridError::Internal(Box::new(std::io::Error::other("Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: GridError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}
