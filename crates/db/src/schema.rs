use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Sections are created by course management; the timetable only edits
    // their schedule and duration columns.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sections (
            id SERIAL PRIMARY KEY,
            course_id INTEGER NOT NULL,
            name VARCHAR(255) NOT NULL,
            schedule VARCHAR(64) NOT NULL DEFAULT 'TBD',
            max_capacity INTEGER NOT NULL DEFAULT 0,
            current_enrollment INTEGER NOT NULL DEFAULT 0,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            duration_minutes INTEGER NULL,
            CONSTRAINT valid_enrollment CHECK (current_enrollment >= 0),
            CONSTRAINT valid_duration CHECK (
                duration_minutes IS NULL
                OR (duration_minutes BETWEEN 30 AND 360 AND duration_minutes % 30 = 0)
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sections_course_id ON sections(course_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
