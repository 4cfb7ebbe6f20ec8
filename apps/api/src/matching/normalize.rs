use std::collections::HashSet;

/// Lower-cased, deduplicated skill names. The comparison key for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet(HashSet<String>);

impl SkillSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive membership test against a raw (un-normalized) name.
    pub fn contains_name(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    pub fn intersection_len(&self, other: &SkillSet) -> usize {
        // Iterate the smaller side.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.0.iter().filter(|s| large.0.contains(*s)).count()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        normalize_skills(iter)
    }
}

/// Lower-cases every name and collapses duplicates.
pub fn normalize_skills<I, S>(names: I) -> SkillSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SkillSet(
        names
            .into_iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect(),
    )
}
