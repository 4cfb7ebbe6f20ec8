use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::db::duplicate_as_validation;
use crate::errors::AppError;
use crate::models::project::ProjectRow;
use crate::models::skill::Skill;
use crate::models::user::ProfileView;
use crate::skills::{find_skill, resolve_skills, slugify};
use crate::users::validation::{NewProject, NewUser, ProfileUpdate};

const USERNAME_TAKEN: &str = "Username already taken";

const PROFILE_SELECT: &str = r#"
    SELECT u.id, p.fullname, u.email, u.username, p.education, p.experience, p.bio,
           ARRAY(SELECT s.name FROM user_skills us JOIN skills s ON s.id = us.skill_id
                 WHERE us.user_id = u.id ORDER BY us.position) AS skills,
           ARRAY(SELECT c.title FROM user_preferred_careers uc JOIN careers c ON c.id = uc.career_id
                 WHERE uc.user_id = u.id ORDER BY uc.position) AS preferred_careers,
           p.cv_text,
           ARRAY(SELECT c.title FROM user_suggested_roles ur JOIN careers c ON c.id = ur.career_id
                 WHERE ur.user_id = u.id ORDER BY ur.position) AS suggested_roles,
           COALESCE((SELECT json_agg(json_build_object(
                            'id', pr.id, 'title', pr.title, 'description', pr.description,
                            'link', pr.link, 'created_at', pr.created_at)
                        ORDER BY pr.created_at DESC, pr.id)
                     FROM projects pr WHERE pr.user_id = u.id), '[]'::json) AS projects
    FROM users u
    JOIN user_profiles p ON p.user_id = u.id
"#;

pub async fn get_profile_view(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileView>, AppError> {
    let sql = format!("{PROFILE_SELECT} WHERE u.id = $1");
    Ok(sqlx::query_as::<_, ProfileView>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?)
}

pub async fn get_profile_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<ProfileView>, AppError> {
    let sql = format!("{PROFILE_SELECT} WHERE u.username = $1");
    Ok(sqlx::query_as::<_, ProfileView>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?)
}

pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AppError> {
    Ok(
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?,
    )
}

/// Creates the user and an empty profile. The username starts as a fresh UUID.
pub async fn register_user(pool: &PgPool, user: NewUser) -> Result<ProfileView, AppError> {
    let mut tx = pool.begin().await?;

    let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(&user.email)
        .fetch_one(&mut *tx)
        .await?;
    if taken {
        return Err(AppError::Validation(
            "A user with that email already exists".to_string(),
        ));
    }

    let user_id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email, username) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(&user.email)
        .bind(Uuid::new_v4().to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| duplicate_as_validation(e, "A user with that email already exists"))?;

    sqlx::query("INSERT INTO user_profiles (user_id, fullname) VALUES ($1, $2)")
        .bind(user_id)
        .bind(&user.fullname)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!("Registered user {user_id}");

    require_profile(pool, user_id).await
}

pub async fn set_username(
    pool: &PgPool,
    user_id: Uuid,
    username: &str,
) -> Result<ProfileView, AppError> {

    let owner: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    if owner.is_some_and(|id| id != user_id) {
        return Err(AppError::Validation(USERNAME_TAKEN.to_string()));
    }

    sqlx::query("UPDATE users SET username = $2 WHERE id = $1")
        .bind(user_id)
        .bind(username)
        .execute(pool)
        .await
        .map_err(|e| duplicate_as_validation(e, USERNAME_TAKEN))?;

    require_profile(pool, user_id).await
}

/// Applies the present fields of `update`; skill and career lists are replaced wholesale.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<ProfileView, AppError> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        r#"
        UPDATE user_profiles SET
            fullname   = COALESCE($2, fullname),
            education  = COALESCE($3, education),
            experience = COALESCE($4, experience),
            bio        = COALESCE($5, bio),
            cv_text    = COALESCE($6, cv_text),
            updated_at = now()
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .bind(&update.fullname)
    .bind(&update.education)
    .bind(&update.experience)
    .bind(&update.bio)
    .bind(&update.cv_text)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(profile_not_found(user_id));
    }

    if let Some(names) = &update.skills {
        replace_user_skills(&mut *tx, user_id, names).await?;
    }
    if let Some(titles) = &update.preferred_careers {
        replace_preferred_careers(&mut *tx, user_id, titles).await?;
    }

    tx.commit().await?;
    info!("Updated profile for user {user_id}");

    require_profile(pool, user_id).await
}

async fn replace_user_skills(
    conn: &mut PgConnection,
    user_id: Uuid,
    names: &[String],
) -> Result<(), AppError> {
    let skills = resolve_skills(&mut *conn, names).await?;

    sqlx::query("DELETE FROM user_skills WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    for (position, skill) in skills.iter().enumerate() {
        sqlx::query("INSERT INTO user_skills (user_id, skill_id, position) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(skill.id)
            .bind(position as i32)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

async fn replace_preferred_careers(
    conn: &mut PgConnection,
    user_id: Uuid,
    titles: &[String],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM user_preferred_careers WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    let mut seen: Vec<Uuid> = Vec::with_capacity(titles.len());
    for title in titles {
        let career_id = resolve_career(&mut *conn, title).await?;
        if seen.contains(&career_id) {
            continue;
        }
        sqlx::query(
            "INSERT INTO user_preferred_careers (user_id, career_id, position) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(career_id)
        .bind(seen.len() as i32)
        .execute(&mut *conn)
        .await?;
        seen.push(career_id);
    }
    Ok(())
}

/// Get-or-create a career by exact title.
async fn resolve_career(conn: &mut PgConnection, title: &str) -> Result<Uuid, AppError> {
    sqlx::query("INSERT INTO careers (id, title) VALUES ($1, $2) ON CONFLICT (title) DO NOTHING")
        .bind(Uuid::new_v4())
        .bind(title)
        .execute(&mut *conn)
        .await?;
    Ok(sqlx::query_scalar("SELECT id FROM careers WHERE title = $1")
        .bind(title)
        .fetch_one(&mut *conn)
        .await?)
}

/// Appends suggested roles; ones already suggested keep their place.
pub async fn add_suggested_roles(
    pool: &PgPool,
    user_id: Uuid,
    titles: &[String],
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    for title in titles {
        let career_id = resolve_career(&mut *tx, title).await?;
        sqlx::query(
            r#"
            INSERT INTO user_suggested_roles (user_id, career_id, position)
            SELECT $1, $2, COALESCE(MAX(position) + 1, 0) FROM user_suggested_roles WHERE user_id = $1
            ON CONFLICT (user_id, career_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(career_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!("Added {} suggested role(s) for user {user_id}", titles.len());
    Ok(())
}

pub async fn create_project(
    pool: &PgPool,
    user_id: Uuid,
    project: NewProject,
) -> Result<ProjectRow, AppError> {
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects (id, user_id, title, description, link)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, title, description, link, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.link)
    .fetch_one(pool)
    .await?;

    info!("Created project {} for user {user_id}", row.id);
    Ok(row)
}

/// Deletes one of the user's own projects. Someone else's project is
/// indistinguishable from a missing one.
pub async fn delete_project(pool: &PgPool, user_id: Uuid, project_id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
        .bind(project_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound("Project not found".to_string()));
    }
    info!("Deleted project {project_id} for user {user_id}");
    Ok(())
}

pub async fn list_skill_names(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>, AppError> {
    Ok(sqlx::query_scalar(
        r#"
        SELECT s.name FROM user_skills us JOIN skills s ON s.id = us.skill_id
        WHERE us.user_id = $1
        ORDER BY us.position
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Appends skills to the profile; ones already held are left where they are.
pub async fn add_skills(pool: &PgPool, user_id: Uuid, names: &[String]) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    let skills = resolve_skills(&mut *tx, names).await?;

    for skill in &skills {
        sqlx::query(
            r#"
            INSERT INTO user_skills (user_id, skill_id, position)
            SELECT $1, $2, COALESCE(MAX(position) + 1, 0) FROM user_skills WHERE user_id = $1
            ON CONFLICT (user_id, skill_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(skill.id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!("Added {} skill(s) for user {user_id}", skills.len());
    Ok(())
}

/// Detaches a skill given by name (or anything that slugifies the same).
pub async fn remove_skill(pool: &PgPool, user_id: Uuid, name: &str) -> Result<(), AppError> {
    let mut conn = pool.acquire().await?;
    let skill = match find_skill(&mut *conn, name).await? {
        Some(skill) => Some(skill),
        None => {
            sqlx::query_as::<_, Skill>(
                "SELECT id, name, slug FROM skills WHERE slug = $1 ORDER BY name LIMIT 1",
            )
            .bind(slugify(name))
            .fetch_optional(&mut *conn)
            .await?
        }
    };
    let skill = skill.ok_or_else(|| AppError::NotFound("Skill not found".to_string()))?;

    sqlx::query("DELETE FROM user_skills WHERE user_id = $1 AND skill_id = $2")
        .bind(user_id)
        .bind(skill.id)
        .execute(&mut *conn)
        .await?;
    info!("Removed skill '{}' for user {user_id}", skill.name);
    Ok(())
}

async fn require_profile(pool: &PgPool, user_id: Uuid) -> Result<ProfileView, AppError> {
    get_profile_view(pool, user_id)
        .await?
        .ok_or_else(|| profile_not_found(user_id))
}

pub fn profile_not_found(user_id: Uuid) -> AppError {
    AppError::NotFound(format!("Profile for user {user_id} not found"))
}
