use std::cmp::Ordering;

use serde::Serialize;
use uuid::Uuid;

use crate::matching::normalize::{normalize_skills, SkillSet};
use crate::matching::scoring::skill_overlap;

/// Anything that can be ranked against a user's skills: a stable id plus the
/// candidate's own skill names in their original case.
pub trait MatchCandidate {
    fn candidate_id(&self) -> Uuid;
    fn skill_names(&self) -> &[String];
}

/// Scored outcome of comparing one candidate with one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub candidate_id: Uuid,
    pub score: f64,
    /// Candidate skill names (original case) present in the user's set.
    pub matching_skills: Vec<String>,
    pub total_skills: usize,
}

/// Scores every candidate, sorts by `(score, matching_skills.len())` descending
/// and keeps the first `limit`. `limit <= 0` yields nothing.
///
/// The sort is stable: candidates equal on both keys keep the order in which
/// they were supplied.
#[allow(dead_code)]
pub fn rank<C: MatchCandidate>(
    user_skills: &SkillSet,
    candidates: &[C],
    limit: i64,
) -> Vec<MatchResult> {
    rank_candidates(user_skills, candidates, limit)
        .into_iter()
        .map(|(_, result)| result)
        .collect()
}

/// Same ordering as [`rank`], but each result stays paired with the candidate
/// it was scored from.
pub fn rank_candidates<'a, C: MatchCandidate>(
    user_skills: &SkillSet,
    candidates: &'a [C],
    limit: i64,
) -> Vec<(&'a C, MatchResult)> {
    let Some(limit) = clamp_limit(limit) else {
        return Vec::new();
    };

    let mut scored: Vec<(&C, MatchResult)> = candidates
        .iter()
        .map(|candidate| (candidate, score_candidate(user_skills, candidate)))
        .collect();

    scored.sort_by(|(_, a), (_, b)| compare_results(a, b));
    scored.truncate(limit);
    scored
}

fn score_candidate<C: MatchCandidate>(user_skills: &SkillSet, candidate: &C) -> MatchResult {
    let names = candidate.skill_names();
    let required = normalize_skills(names);

    let matching_skills = names
        .iter()
        .filter(|name| user_skills.contains_name(name))
        .cloned()
        .collect();

    MatchResult {
        candidate_id: candidate.candidate_id(),
        score: skill_overlap(user_skills, &required),
        matching_skills,
        total_skills: required.len(),
    }
}

/// Descending by score, then by number of matched skills.
fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.matching_skills.len().cmp(&a.matching_skills.len()))
}

fn clamp_limit(limit: i64) -> Option<usize> {
    if limit <= 0 {
        return None;
    }
    Some(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub {
        id: Uuid,
        skills: Vec<String>,
    }

    impl MatchCandidate for Stub {
        fn candidate_id(&self) -> Uuid {
            self.id
        }

        fn skill_names(&self) -> &[String] {
            &self.skills
        }
    }

    fn stub(skills: &[&str]) -> Stub {
        Stub {
            id: Uuid::new_v4(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn user(names: &[&str]) -> SkillSet {
        normalize_skills(names)
    }

    #[test]
    fn test_ranks_by_score_then_match_count() {
        let u = user(&["python", "django", "sql"]);
        let a = stub(&["Python", "Django", "SQL"]);
        let b = stub(&["Python"]);
        let c = stub(&["JavaScript", "React"]);
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);

        let results = rank(&u, &[c, b, a], 10);
        let ids: Vec<Uuid> = results.iter().map(|r| r.candidate_id).collect();
        assert_eq!(ids, vec![a_id, b_id, c_id]);

        assert_eq!(results[0].score, 1.0);
        assert_eq!(results[0].matching_skills.len(), 3);
        assert_eq!(results[1].score, 1.0);
        assert_eq!(results[1].matching_skills.len(), 1);
        assert_eq!(results[2].score, 0.0);
        assert!(results[2].matching_skills.is_empty());
    }

    #[test]
    fn test_matching_skills_keep_original_case_and_order() {
        let u = user(&["sql", "python"]);
        let results = rank(&u, &[stub(&["Python", "AWS", "SQL"])], 10);
        assert_eq!(results[0].matching_skills, vec!["Python", "SQL"]);
        assert_eq!(results[0].total_skills, 3);
    }

    #[test]
    fn test_total_skills_counts_distinct_names() {
        let results = rank(&user(&[]), &[stub(&["Python", "python", "Go"])], 10);
        assert_eq!(results[0].total_skills, 2);
    }

    #[test]
    fn test_limit_truncates_to_highest() {
        let u = user(&["python", "django", "sql"]);
        let a = stub(&["python", "django", "sql"]);
        let b = stub(&["python"]);
        let c = stub(&["go"]);
        let (a_id, b_id) = (a.id, b.id);

        let results = rank(&u, &[c, b, a], 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].candidate_id, a_id);
        assert_eq!(results[1].candidate_id, b_id);
    }

    #[test]
    fn test_non_positive_limit_is_empty() {
        let u = user(&["python"]);
        let candidates = vec![stub(&["python"]), stub(&["go"])];
        assert!(rank(&u, &candidates, 0).is_empty());
        assert!(rank(&u, &candidates, -5).is_empty());
    }

    #[test]
    fn test_empty_user_scores_zero_everywhere() {
        let candidates = vec![stub(&["python"]), stub(&["go", "rust"]), stub(&["sql"])];
        let results = rank(&user(&[]), &candidates, 10);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_no_requirement_candidate_sits_at_baseline() {
        let u = user(&["python"]);
        let open = stub(&[]);
        let partial = stub(&["python", "go", "sql"]);
        let full = stub(&["python"]);
        let (open_id, partial_id, full_id) = (open.id, partial.id, full.id);

        let results = rank(&u, &[partial, open, full], 10);
        let ids: Vec<Uuid> = results.iter().map(|r| r.candidate_id).collect();
        assert_eq!(ids, vec![full_id, open_id, partial_id]);
        assert_eq!(results[1].score, 0.5);
    }

    #[test]
    fn test_equal_keys_keep_supplied_order() {
        let u = user(&["python"]);
        let first = stub(&["python", "go"]);
        let second = stub(&["python", "rust"]);
        let (first_id, second_id) = (first.id, second.id);

        let results = rank(&u, &[first, second], 10);
        assert_eq!(results[0].candidate_id, first_id);
        assert_eq!(results[1].candidate_id, second_id);
    }

    #[test]
    fn test_does_not_mutate_inputs() {
        let u = user(&["python"]);
        let candidates = vec![stub(&["Go"]), stub(&["Python"])];
        let before: Vec<Uuid> = candidates.iter().map(|c| c.id).collect();
        let _ = rank(&u, &candidates, 10);
        let after: Vec<Uuid> = candidates.iter().map(|c| c.id).collect();
        assert_eq!(before, after);
        assert_eq!(candidates[1].skills, vec!["Python"]);
        assert!(u.contains_name("python"));
    }

    #[test]
    fn test_rank_candidates_pairs_each_result_with_its_source() {
        let u = user(&["python"]);
        let shared = Uuid::new_v4();
        let go = Stub { id: shared, skills: vec!["Go".into()] };
        let py = Stub { id: shared, skills: vec!["Python".into()] };

        let candidates = [go, py];
        let ranked = rank_candidates(&u, &candidates, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0.skills, vec!["Python"]);
        assert_eq!(ranked[0].1.score, 1.0);
        assert_eq!(ranked[1].0.skills, vec!["Go"]);
        assert_eq!(ranked[1].1.score, 0.0);
    }
}
