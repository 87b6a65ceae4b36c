use crate::models::DbSection;
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};

pub async fn list_sections(pool: &Pool<Postgres>) -> Result<Vec<DbSection>> {
    let sections = sqlx::query_as::<_, DbSection>(
        r#"
        SELECT id, course_id, name, schedule, max_capacity, current_enrollment, active, duration_minutes
        FROM sections
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    tracing::debug!("Loaded {} sections", sections.len());
    Ok(sections)
}

pub async fn update_section_schedule(
    pool: &Pool<Postgres>,
    id: i32,
    schedule: &str,
    duration_minutes: i32,
) -> Result<DbSection> {
    tracing::debug!(
        "Updating section schedule: id={}, schedule={}, duration={}",
        id, schedule, duration_minutes
    );

    let section = sqlx::query_as::<_, DbSection>(
        r#"
        UPDATE sections
        SET schedule = $2, duration_minutes = $3
        WHERE id = $1
        RETURNING id, course_id, name, schedule, max_capacity, current_enrollment, active, duration_minutes
        "#,
    )
    .bind(id)
    .bind(schedule)
    .bind(duration_minutes)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Section {} not found", id))?;

    Ok(section)
}

pub async fn update_section(pool: &Pool<Postgres>, section: &DbSection) -> Result<DbSection> {
    tracing::debug!("Updating section: id={}", section.id);

    let updated = sqlx::query_as::<_, DbSection>(
        r#"
        UPDATE sections
        SET course_id = $2, name = $3, schedule = $4, max_capacity = $5,
            current_enrollment = $6, active = $7, duration_minutes = $8
        WHERE id = $1
        RETURNING id, course_id, name, schedule, max_capacity, current_enrollment, active, duration_minutes
        "#,
    )
    .bind(section.id)
    .bind(section.course_id)
    .bind(&section.name)
    .bind(&section.schedule)
    .bind(section.max_capacity)
    .bind(section.current_enrollment)
    .bind(section.active)
    .bind(section.duration_minutes)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Section {} not found", section.id))?;

    Ok(updated)
}
