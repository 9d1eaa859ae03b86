// src/types/search.rs
use crate::config::SearchMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    /// Free text as typed by the user.
    Skills(String),
    Structured { hard: Vec<String>, soft: Vec<String> },
}

impl SearchCriteria {
    /// Builds criteria from raw form input for the configured mode.
    /// Structured mode splits both inputs on commas.
    pub fn from_input(mode: SearchMode, skills: &str, soft_skills: Option<&str>) -> Self {
        match mode {
            SearchMode::Form => Self::Skills(skills.trim().to_string()),
            SearchMode::Json => Self::Structured {
                hard: split_list(skills),
                soft: soft_skills.map(split_list).unwrap_or_default(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Skills(text) => text.trim().is_empty(),
            Self::Structured { hard, soft } => hard.is_empty() && soft.is_empty(),
        }
    }
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
