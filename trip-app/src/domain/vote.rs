use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audit::AuditAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("vote value must be +1 or -1, got {0}")]
pub struct InvalidVoteValue(pub i16);

/// A single user's opinion on a suggestion. Stored as +1 / -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl TryFrom<i16> for VoteValue {
    type Error = InvalidVoteValue;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(InvalidVoteValue(other)),
        }
    }
}

impl From<VoteValue> for i16 {
    fn from(value: VoteValue) -> Self {
        value.as_i16()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEntry {
    pub user_id: Uuid,
    pub value: VoteValue,
}

impl VoteEntry {
    pub fn new(user_id: Uuid, value: VoteValue) -> Self {
        Self { user_id, value }
    }
}

/// The one store change a vote click turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteMutation {
    Insert { value: VoteValue },
    Update { previous: VoteValue, value: VoteValue },
    Delete { previous: VoteValue },
}

impl VoteMutation {
    pub fn action(&self) -> AuditAction {
        match self {
            Self::Insert { .. } => AuditAction::Create,
            Self::Update { .. } => AuditAction::Update,
            Self::Delete { .. } => AuditAction::Delete,
        }
    }

    /// Value recorded before the change, `None` when no row existed.
    pub fn previous(&self) -> Option<VoteValue> {
        match self {
            Self::Insert { .. } => None,
            Self::Update { previous, .. } | Self::Delete { previous } => Some(*previous),
        }
    }

    /// Value the row holds afterwards, `None` when the row is gone.
    pub fn resulting(&self) -> Option<VoteValue> {
        match self {
            Self::Insert { value } | Self::Update { value, .. } => Some(*value),
            Self::Delete { .. } => None,
        }
    }
}

/// Decide how a click on `requested` changes `user_id`'s vote.
///
/// Clicking the direction already voted removes the vote, clicking the other
/// direction flips it, and a first click creates it.
pub fn decide_vote(user_id: Uuid, votes: &[VoteEntry], requested: VoteValue) -> VoteMutation {
    match votes.iter().find(|v| v.user_id == user_id) {
        None => VoteMutation::Insert { value: requested },
        Some(existing) if existing.value == requested => VoteMutation::Delete {
            previous: existing.value,
        },
        Some(existing) => VoteMutation::Update {
            previous: existing.value,
            value: requested,
        },
    }
}

pub fn score(votes: &[VoteEntry]) -> i32 {
    votes.iter().map(|v| i32::from(v.value.as_i16())).sum()
}
