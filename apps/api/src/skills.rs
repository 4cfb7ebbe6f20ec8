//! Canonical skill identities. A skill is identified by its case-insensitive
//! name; the slug is derived once at creation.

use std::sync::OnceLock;

use regex::Regex;
use sqlx::PgConnection;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::skill::Skill;

fn non_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("static regex"))
}

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-\s]+").expect("static regex"))
}

/// Lower-cased, hyphenated, ASCII-folded form of a name.
/// `"Machine Learning"` → `"machine-learning"`, `"Café"` → `"cafe"`.
pub fn slugify(name: &str) -> String {
    // NFKD splits accented letters into base + combining mark; anything still
    // outside ASCII after that has no fold and is dropped.
    let ascii: String = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .collect();
    let lowered = ascii.to_lowercase();
    let stripped = non_word().replace_all(&lowered, "");
    separators()
        .replace_all(&stripped, "-")
        .trim_matches(|c: char| c == '-' || c == '_')
        .to_string()
}

/// Finds the skill whose name equals `name` ignoring case, creating it if
/// absent. Blank names resolve to `None`.
pub async fn resolve_skill(conn: &mut PgConnection, name: &str) -> Result<Option<Skill>, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    if let Some(existing) = find_skill(conn, name).await? {
        return Ok(Some(existing));
    }

    // A concurrent insert of the same name loses quietly; re-read below.
    sqlx::query("INSERT INTO skills (id, name, slug) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING")
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(slugify(name))
        .execute(&mut *conn)
        .await?;

    find_skill(conn, name)
        .await?
        .map(Some)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("skill '{name}' vanished after insert")))
}

/// Resolves every name, dropping blanks and names that collapse to the same skill.
pub async fn resolve_skills<S: AsRef<str>>(
    conn: &mut PgConnection,
    names: &[S],
) -> Result<Vec<Skill>, AppError> {
    let mut skills: Vec<Skill> = Vec::with_capacity(names.len());
    for name in names {
        if let Some(skill) = resolve_skill(conn, name.as_ref()).await? {
            if !skills.iter().any(|s| s.id == skill.id) {
                skills.push(skill);
            }
        }
    }
    Ok(skills)
}

pub async fn find_skill(conn: &mut PgConnection, name: &str) -> Result<Option<Skill>, AppError> {
    Ok(sqlx::query_as::<_, Skill>(
        "SELECT id, name, slug FROM skills WHERE lower(name) = lower($1)",
    )
    .bind(name.trim())
    .fetch_optional(&mut *conn)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Machine Learning"), "machine-learning");
        assert_eq!(slugify("Python"), "python");
    }

    #[test]
    fn test_slugify_strips_punctuation_and_collapses() {
        assert_eq!(slugify("  Node.js -- Express "), "nodejs-express");
        assert_eq!(slugify("C++"), "c");
        assert_eq!(slugify("_private_"), "private");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Café Ops"), "cafe-ops");
        assert_eq!(slugify("Señor Über Naïve"), "senor-uber-naive");
        assert_eq!(slugify("ﬁnance"), "finance");
    }

    #[test]
    fn test_slugify_drops_unfoldable() {
        assert_eq!(slugify("日本語 NLP"), "nlp");
        assert_eq!(slugify("Data → Ops"), "data-ops");
    }

    #[test]
    fn test_slugify_same_for_case_variants() {
        assert_eq!(slugify("PostgreSQL"), slugify("postgresql"));
    }
}
