mod cast_vote;
mod interfaces;
mod manage_places;
mod manage_suggestions;
mod user_directory;

#[cfg(test)]
pub(crate) mod testing;

pub use cast_vote::CastVote;
pub use interfaces::{AuditLog, StoreError, TripStore};
pub use manage_places::ManagePlaces;
pub use manage_suggestions::ManageSuggestions;
pub use user_directory::UserDirectory;

use trip_errors::AppError;

use crate::domain::Committed;

/// A failed reload does not undo the change before it, so it is logged and
/// reported as stale.
pub(crate) fn after_commit<T>(refreshed: Result<T, AppError>) -> Committed<T> {
    match refreshed {
        Ok(value) => Committed::fresh(value),
        Err(e) => {
            tracing::warn!("Reload after committed change failed: {}", e);
            Committed::stale()
        }
    }
}
