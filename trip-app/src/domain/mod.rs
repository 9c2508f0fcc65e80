mod audit;
mod committed;
mod notice;
mod place;
mod places_view;
mod suggestion;
mod user;
mod vote;

pub use audit::{AuditAction, AuditEntity, AuditEntry};
pub use committed::Committed;
pub use notice::Notice;
pub use place::{Place, PlaceDraft, PlaceForm};
pub use places_view::PlacesViewState;
pub use suggestion::{
    Category, ScoredSuggestion, Suggestion, SuggestionBoard, SuggestionDraft, SuggestionForm,
};
pub use user::User;
pub use vote::{decide_vote, score, InvalidVoteValue, VoteEntry, VoteMutation, VoteValue};
