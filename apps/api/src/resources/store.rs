use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::duplicate_as_validation;
use crate::errors::AppError;
use crate::models::resource::{LearningResourceRow, ResourceCandidate};
use crate::resources::filters::ResourceFilter;
use crate::resources::validation::NewResource;
use crate::skills::resolve_skills;

const DUPLICATE: &str = "Resource already exists";

const RESOURCE_SKILLS: &str = "ARRAY(SELECT s.name FROM resource_skills rs JOIN skills s ON s.id = rs.skill_id \
     WHERE rs.resource_id = r.id ORDER BY rs.position) AS related_skills";

fn resource_select() -> String {
    format!(
        "SELECT r.id, r.title, r.platform, r.url, {RESOURCE_SKILLS}, r.cost, r.description, \
         r.created_at FROM learning_resources r"
    )
}

pub async fn list_resources(
    pool: &PgPool,
    filter: &ResourceFilter,
) -> Result<Vec<LearningResourceRow>, AppError> {
    let sql = format!(
        r#"{}
        WHERE ($1::text IS NULL OR EXISTS (
                SELECT 1 FROM resource_skills rs JOIN skills s ON s.id = rs.skill_id
                WHERE rs.resource_id = r.id AND s.name ILIKE $1))
          AND ($2::text IS NULL OR lower(r.cost) = lower($2))
          AND ($3::text IS NULL OR r.platform ILIKE $3)
        ORDER BY r.created_at DESC, r.id
        "#,
        resource_select()
    );

    Ok(sqlx::query_as::<_, LearningResourceRow>(&sql)
        .bind(filter.skill_pattern.as_deref())
        .bind(filter.cost.as_deref())
        .bind(filter.platform_pattern.as_deref())
        .fetch_all(pool)
        .await?)
}

pub async fn get_resource(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<LearningResourceRow>, AppError> {
    let sql = format!("{} WHERE r.id = $1", resource_select());
    Ok(sqlx::query_as::<_, LearningResourceRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn get_resources_by_ids(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<LearningResourceRow>, AppError> {
    let sql = format!("{} WHERE r.id = ANY($1)", resource_select());
    Ok(sqlx::query_as::<_, LearningResourceRow>(&sql)
        .bind(ids.to_vec())
        .fetch_all(pool)
        .await?)
}

/// Every resource as a match candidate, newest first.
pub async fn list_candidates(pool: &PgPool) -> Result<Vec<ResourceCandidate>, AppError> {
    let sql = format!(
        "SELECT r.id, r.title, r.platform, {RESOURCE_SKILLS} FROM learning_resources r \
         ORDER BY r.created_at DESC, r.id"
    );
    Ok(sqlx::query_as::<_, ResourceCandidate>(&sql)
        .fetch_all(pool)
        .await?)
}

/// Rejects a resource whose title and url are both already present.
pub async fn create_resource(
    pool: &PgPool,
    resource: NewResource,
) -> Result<LearningResourceRow, AppError> {
    let mut tx = pool.begin().await?;

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM learning_resources WHERE title = $1 AND url = $2)",
    )
    .bind(&resource.title)
    .bind(&resource.url)
    .fetch_one(&mut *tx)
    .await?;
    if exists {
        return Err(AppError::Validation(DUPLICATE.to_string()));
    }

    let resource_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO learning_resources (id, title, platform, url, cost, description)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(resource_id)
    .bind(&resource.title)
    .bind(&resource.platform)
    .bind(&resource.url)
    .bind(resource.cost.as_str())
    .bind(&resource.description)
    .execute(&mut *tx)
    .await
    .map_err(|e| duplicate_as_validation(e, DUPLICATE))?;

    let skills = resolve_skills(&mut *tx, &resource.related_skills).await?;
    for (position, skill) in skills.iter().enumerate() {
        sqlx::query(
            "INSERT INTO resource_skills (resource_id, skill_id, position) VALUES ($1, $2, $3)",
        )
        .bind(resource_id)
        .bind(skill.id)
        .bind(position as i32)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!("Created learning resource {resource_id} '{}'", resource.title);

    get_resource(pool, resource_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resource {resource_id} not found")))
}
