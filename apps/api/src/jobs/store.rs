use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::duplicate_as_validation;
use crate::errors::AppError;
use crate::jobs::filters::JobFilter;
use crate::jobs::validation::NewJob;
use crate::models::job::{JobCandidate, JobRow};
use crate::skills::resolve_skills;

const DUPLICATE: &str = "Job already exists";

/// Skill names of job `j`, in the order they were attached.
const JOB_SKILLS: &str = "ARRAY(SELECT s.name FROM job_skills js JOIN skills s ON s.id = js.skill_id \
     WHERE js.job_id = j.id ORDER BY js.position) AS required_skills";

fn job_select() -> String {
    format!(
        "SELECT j.id, j.title, j.company, j.location, j.is_remote, {JOB_SKILLS}, \
         j.recommended_experience, j.job_type, j.description, j.posted_at FROM jobs j"
    )
}

/// Newest first.
pub async fn list_jobs(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobRow>, AppError> {
    let sql = format!(
        r#"{}
        WHERE ($1::text IS NULL OR EXISTS (
                SELECT 1 FROM job_skills js JOIN skills s ON s.id = js.skill_id
                WHERE js.job_id = j.id AND s.name ILIKE $1))
          AND ($2::text IS NULL OR j.location ILIKE $2)
          AND (NOT $3 OR j.is_remote)
          AND ($4::text IS NULL OR lower(j.job_type) = lower($4))
        ORDER BY j.posted_at DESC, j.id
        "#,
        job_select()
    );

    Ok(sqlx::query_as::<_, JobRow>(&sql)
        .bind(filter.skill_pattern.as_deref())
        .bind(filter.location_pattern.as_deref())
        .bind(filter.remote_only)
        .bind(filter.job_type.as_deref())
        .fetch_all(pool)
        .await?)
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, AppError> {
    let sql = format!("{} WHERE j.id = $1", job_select());
    Ok(sqlx::query_as::<_, JobRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

/// Rows for `ids`, in no particular order.
pub async fn get_jobs_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<JobRow>, AppError> {
    let sql = format!("{} WHERE j.id = ANY($1)", job_select());
    Ok(sqlx::query_as::<_, JobRow>(&sql)
        .bind(ids.to_vec())
        .fetch_all(pool)
        .await?)
}

/// Every job as a match candidate, newest first.
pub async fn list_candidates(pool: &PgPool) -> Result<Vec<JobCandidate>, AppError> {
    let sql = format!(
        "SELECT j.id, j.title, j.company, {JOB_SKILLS} FROM jobs j ORDER BY j.posted_at DESC, j.id"
    );
    Ok(sqlx::query_as::<_, JobCandidate>(&sql)
        .fetch_all(pool)
        .await?)
}

/// Inserts a job and attaches its skills in one transaction.
/// A job with the same title and company already present is rejected.
pub async fn create_job(pool: &PgPool, job: NewJob) -> Result<JobRow, AppError> {
    let mut tx = pool.begin().await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM jobs WHERE title = $1 AND company = $2)")
            .bind(&job.title)
            .bind(&job.company)
            .fetch_one(&mut *tx)
            .await?;
    if exists {
        return Err(AppError::Validation(DUPLICATE.to_string()));
    }

    let job_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO jobs
            (id, title, company, location, is_remote, recommended_experience, job_type, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(job_id)
    .bind(&job.title)
    .bind(&job.company)
    .bind(&job.location)
    .bind(job.is_remote)
    .bind(&job.recommended_experience)
    .bind(job.job_type.as_str())
    .bind(&job.description)
    .execute(&mut *tx)
    .await
    .map_err(|e| duplicate_as_validation(e, DUPLICATE))?;

    let skills = resolve_skills(&mut *tx, &job.required_skills).await?;
    for (position, skill) in skills.iter().enumerate() {
        sqlx::query("INSERT INTO job_skills (job_id, skill_id, position) VALUES ($1, $2, $3)")
            .bind(job_id)
            .bind(skill.id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    info!("Created job {job_id} '{}' at {}", job.title, job.company);

    get_job(pool, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}
