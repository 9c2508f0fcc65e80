use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use trip_errors::AppError;
use uuid::Uuid;

use super::vote::{score, VoteEntry, VoteValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Activity,
    Food,
    Hotel,
    Transport,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Activity,
        Category::Food,
        Category::Hotel,
        Category::Transport,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Food => "food",
            Self::Hotel => "hotel",
            Self::Transport => "transport",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Activity => "Aktivität",
            Self::Food => "Essen",
            Self::Hotel => "Hotel",
            Self::Transport => "Transport",
            Self::Other => "Sonstiges",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unbekannte Kategorie: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub place_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub link: Option<String>,
    pub cost_estimate: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Raw values of the "new suggestion" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionForm {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub link: String,
    pub cost_estimate: String,
}

/// A validated suggestion form, optional fields blank-to-`None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub link: Option<String>,
    pub cost_estimate: Option<String>,
}

/// A suggestion as fetched for display: its creator, its votes and the
/// score derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSuggestion {
    pub suggestion: Suggestion,
    pub creator_name: Option<String>,
    pub votes: Vec<VoteEntry>,
    pub score: i32,
}

impl ScoredSuggestion {
    pub fn new(suggestion: Suggestion, creator_name: Option<String>, votes: Vec<VoteEntry>) -> Self {
        let score = score(&votes);
        Self {
            suggestion,
            creator_name,
            votes,
            score,
        }
    }

    pub fn id(&self) -> Uuid {
        self.suggestion.id
    }

    pub fn vote_of(&self, user_id: Uuid) -> Option<VoteValue> {
        self.votes
            .iter()
            .find(|v| v.user_id == user_id)
            .map(|v| v.value)
    }
}

/// All suggestions of one place, in fetch order (newest first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionBoard {
    pub place_id: Uuid,
    pub suggestions: Vec<ScoredSuggestion>,
}

impl SuggestionBoard {
    pub fn new(place_id: Uuid, suggestions: Vec<ScoredSuggestion>) -> Self {
        Self {
            place_id,
            suggestions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn find(&self, suggestion_id: Uuid) -> Option<&ScoredSuggestion> {
        self.suggestions.iter().find(|s| s.id() == suggestion_id)
    }

    /// Highest score first; equal scores keep fetch order.
    pub fn by_score(&self) -> Vec<ScoredSuggestion> {
        let mut sorted = self.suggestions.clone();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }

    pub fn newest_first(&self) -> Vec<ScoredSuggestion> {
        let mut sorted = self.suggestions.clone();
        sorted.sort_by(|a, b| b.suggestion.created_at.cmp(&a.suggestion.created_at));
        sorted
    }
}
