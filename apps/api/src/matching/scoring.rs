use crate::matching::normalize::SkillSet;

/// Score given to a candidate that lists no required skills.
pub const NO_REQUIREMENT_BASELINE: f64 = 0.5;

/// Fraction of the candidate's required skills covered by the user's skills.
///
/// - no requirements → `NO_REQUIREMENT_BASELINE`
/// - requirements but no user skills → 0.0
/// - otherwise |user ∩ required| / |required|
///
/// Extra user skills never lower the score.
pub fn skill_overlap(user_skills: &SkillSet, required_skills: &SkillSet) -> f64 {
    if required_skills.is_empty() {
        return NO_REQUIREMENT_BASELINE;
    }
    if user_skills.is_empty() {
        return 0.0;
    }
    let matching = user_skills.intersection_len(required_skills);
    matching as f64 / required_skills.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::normalize::normalize_skills;

    fn set(names: &[&str]) -> SkillSet {
        normalize_skills(names)
    }

    #[test]
    fn test_perfect_overlap() {
        let s = set(&["python", "django", "sql"]);
        assert_eq!(skill_overlap(&s, &s), 1.0);
    }

    #[test]
    fn test_partial_overlap() {
        let user = set(&["python", "django"]);
        let required = set(&["python", "django", "sql", "aws"]);
        assert_eq!(skill_overlap(&user, &required), 0.5);
    }

    #[test]
    fn test_no_overlap() {
        let user = set(&["javascript", "react"]);
        let required = set(&["python", "django"]);
        assert_eq!(skill_overlap(&user, &required), 0.0);
    }

    #[test]
    fn test_empty_required_is_baseline() {
        assert_eq!(skill_overlap(&set(&["python"]), &set(&[])), 0.5);
        assert_eq!(skill_overlap(&set(&[]), &set(&[])), 0.5);
    }

    #[test]
    fn test_empty_user_is_zero() {
        assert_eq!(skill_overlap(&set(&[]), &set(&["python", "django"])), 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(skill_overlap(&set(&["Python"]), &set(&["python"])), 1.0);
    }

    #[test]
    fn test_extra_user_skills_do_not_penalize() {
        let user = set(&["python", "django", "sql"]);
        assert_eq!(skill_overlap(&user, &set(&["python"])), 1.0);
    }

    #[test]
    fn test_score_bounded() {
        let users = [
            set(&[]),
            set(&["a"]),
            set(&["a", "b", "c", "d"]),
            set(&["x", "y"]),
        ];
        let required = [set(&["a"]), set(&["a", "b"]), set(&["a", "z", "q"])];
        for u in &users {
            for r in &required {
                let score = skill_overlap(u, r);
                assert!((0.0..=1.0).contains(&score), "Score was {score}");
            }
        }
    }
}
