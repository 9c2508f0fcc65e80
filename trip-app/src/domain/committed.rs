use serde::{Deserialize, Serialize};

/// Outcome of a change the store accepted. `refreshed` holds the reloaded
/// list, or `None` when reloading failed after the commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committed<T> {
    pub refreshed: Option<T>,
}

impl<T> Committed<T> {
    pub fn fresh(value: T) -> Self {
        Self {
            refreshed: Some(value),
        }
    }

    pub fn stale() -> Self {
        Self { refreshed: None }
    }

    pub fn is_stale(&self) -> bool {
        self.refreshed.is_none()
    }
}
