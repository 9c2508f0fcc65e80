use std::sync::Arc;

use serde_json::json;
use trip_errors::AppError;
use uuid::Uuid;

use super::after_commit;
use super::interfaces::{AuditLog, TripStore};
use super::manage_suggestions::load_board;
use crate::domain::{
    decide_vote, AuditEntity, AuditEntry, Committed, SuggestionBoard, VoteMutation, VoteValue,
};

/// Applies one vote click and hands back the refreshed board of the
/// suggestion's place.
pub struct CastVote {
    store: Arc<dyn TripStore>,
    audit: Arc<dyn AuditLog>,
}

impl CastVote {
    pub fn new(store: Arc<dyn TripStore>, audit: Arc<dyn AuditLog>) -> Self {
        Self { store, audit }
    }

    pub async fn execute(
        &self,
        actor: Option<Uuid>,
        suggestion_id: Uuid,
        requested: VoteValue,
    ) -> Result<Committed<SuggestionBoard>, AppError> {
        let user_id = actor.ok_or(AppError::NoUserSelected)?;

        let current = self
            .store
            .find_suggestion(suggestion_id)
            .await
            .map_err(|e| e.into_app_error(AppError::LoadFailed))?
            .ok_or(AppError::NotFound)?;

        let mutation = decide_vote(user_id, &current.votes, requested);
        let result = match mutation {
            VoteMutation::Insert { value } => {
                self.store.insert_vote(suggestion_id, user_id, value).await
            }
            VoteMutation::Update { value, .. } => {
                self.store.update_vote(suggestion_id, user_id, value).await
            }
            VoteMutation::Delete { .. } => self.store.delete_vote(suggestion_id, user_id).await,
        };
        result.map_err(|e| {
            tracing::error!(suggestion_id = %suggestion_id, "Failed to apply vote: {}", e);
            match mutation {
                VoteMutation::Insert { .. } => e.into_app_error(AppError::CreateFailed),
                VoteMutation::Update { .. } => e.into_app_error(AppError::UpdateFailed),
                VoteMutation::Delete { .. } => e.into_app_error(AppError::DeleteFailed),
            }
        })?;

        let value_of = |v: Option<VoteValue>| v.map(|v| json!({ "value": v.as_i16() }));
        self.audit
            .write(
                AuditEntry::new(
                    mutation.action(),
                    AuditEntity::Vote,
                    suggestion_id,
                    value_of(mutation.previous()),
                    value_of(mutation.resulting()),
                )
                .by(Some(user_id)),
            )
            .await;
        tracing::info!(
            suggestion_id = %suggestion_id,
            user_id = %user_id,
            "Vote {}",
            mutation.action().as_str()
        );

        Ok(after_commit(
            load_board(self.store.as_ref(), current.suggestion.place_id).await,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeStore, RecordingAudit};
    use crate::domain::{AuditAction, VoteEntry};

    struct Fixture {
        store: Arc<FakeStore>,
        audit: Arc<RecordingAudit>,
        service: CastVote,
        suggestion: Uuid,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(FakeStore::default());
        let audit = Arc::new(RecordingAudit::default());
        let place = store.seed_place("Bergen");
        let suggestion = store.seed_suggestion(place, "Fløibanen");
        let service = CastVote::new(store.clone(), audit.clone());
        Fixture {
            store,
            audit,
            service,
            suggestion,
        }
    }

    #[tokio::test]
    async fn test_vote_without_user_is_rejected() {
        let f = fixture();
        let before = f.store.calls();

        let err = f
            .service
            .execute(None, f.suggestion, VoteValue::Up)
            .await
            .unwrap_err();

        assert_eq!(err, AppError::NoUserSelected);
        assert_eq!(f.store.calls(), before);
        assert!(f.audit.entries().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_scenario() {
        let f = fixture();
        let (u1, u2, u3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        f.store.seed_vote(f.suggestion, u1, VoteValue::Up);
        f.store.seed_vote(f.suggestion, u2, VoteValue::Up);
        f.store.seed_vote(f.suggestion, u3, VoteValue::Down);

        let board = f
            .service
            .execute(Some(u1), f.suggestion, VoteValue::Up)
            .await
            .unwrap()
            .refreshed
            .unwrap();
        let s = board.find(f.suggestion).unwrap();
        assert_eq!(s.score, 0);
        assert_eq!(s.vote_of(u1), None);

        let board = f
            .service
            .execute(Some(u1), f.suggestion, VoteValue::Down)
            .await
            .unwrap()
            .refreshed
            .unwrap();
        let s = board.find(f.suggestion).unwrap();
        assert_eq!(s.score, -1);
        assert_eq!(
            s.votes,
            vec![
                VoteEntry::new(u2, VoteValue::Up),
                VoteEntry::new(u3, VoteValue::Down),
                VoteEntry::new(u1, VoteValue::Down),
            ]
        );

        let entries = f.audit.entries();
        assert_eq!(entries[0].action, AuditAction::Delete);
        assert_eq!(entries[0].before, Some(json!({ "value": 1 })));
        assert_eq!(entries[0].after, None);
        assert_eq!(entries[1].action, AuditAction::Create);
        assert_eq!(entries[1].before, None);
        assert_eq!(entries[1].after, Some(json!({ "value": -1 })));
    }

    #[tokio::test]
    async fn test_switching_direction_keeps_one_row() {
        let f = fixture();
        let user = Uuid::new_v4();

        f.service.execute(Some(user), f.suggestion, VoteValue::Up).await.unwrap();
        let board = f
            .service
            .execute(Some(user), f.suggestion, VoteValue::Down)
            .await
            .unwrap()
            .refreshed
            .unwrap();

        let s = board.find(f.suggestion).unwrap();
        assert_eq!(s.votes, vec![VoteEntry::new(user, VoteValue::Down)]);
        assert_eq!(s.score, -1);

        let update = f.audit.entries().pop().unwrap();
        assert_eq!(update.action, AuditAction::Update);
        assert_eq!(update.entity, AuditEntity::Vote);
        assert_eq!(update.entity_id, f.suggestion);
        assert_eq!(update.before, Some(json!({ "value": 1 })));
        assert_eq!(update.after, Some(json!({ "value": -1 })));
    }

    #[tokio::test]
    async fn test_same_vote_twice_removes_row() {
        let f = fixture();
        let user = Uuid::new_v4();

        f.service.execute(Some(user), f.suggestion, VoteValue::Down).await.unwrap();
        let board = f
            .service
            .execute(Some(user), f.suggestion, VoteValue::Down)
            .await
            .unwrap()
            .refreshed
            .unwrap();

        let s = board.find(f.suggestion).unwrap();
        assert!(s.votes.is_empty());
        assert_eq!(s.score, 0);
    }

    #[tokio::test]
    async fn test_score_matches_votes_after_many_clicks() {
        let f = fixture();
        let users: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let clicks = [
            (0, VoteValue::Up),
            (1, VoteValue::Down),
            (0, VoteValue::Down),
            (2, VoteValue::Up),
            (1, VoteValue::Down),
            (3, VoteValue::Up),
            (2, VoteValue::Up),
            (0, VoteValue::Up),
        ];

        for (who, value) in clicks {
            let board = f
                .service
                .execute(Some(users[who]), f.suggestion, value)
                .await
                .unwrap()
                .refreshed
                .unwrap();
            let s = board.find(f.suggestion).unwrap();
            let sum: i32 = s.votes.iter().map(|v| i32::from(v.value.as_i16())).sum();
            assert_eq!(s.score, sum);
            for user in &users {
                assert!(s.votes.iter().filter(|v| v.user_id == *user).count() <= 1);
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_suggestion() {
        let f = fixture();
        let err = f
            .service
            .execute(Some(Uuid::new_v4()), Uuid::new_v4(), VoteValue::Up)
            .await
            .unwrap_err();
        assert_eq!(err, AppError::NotFound);
    }

    #[tokio::test]
    async fn test_failed_vote_skips_audit() {
        let f = fixture();
        f.store.fail_on_vote("deadlock detected");

        let err = f
            .service
            .execute(Some(Uuid::new_v4()), f.suggestion, VoteValue::Up)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Fehler beim Erstellen");
        assert!(f.audit.entries().is_empty());
    }

    #[tokio::test]
    async fn test_failed_switch_keeps_vote() {
        let f = fixture();
        let user = Uuid::new_v4();
        f.store.seed_vote(f.suggestion, user, VoteValue::Up);
        f.store.fail_on_vote("serialization failure");

        let err = f
            .service
            .execute(Some(user), f.suggestion, VoteValue::Down)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Fehler beim Speichern");
        assert!(f.audit.entries().is_empty());
        assert_eq!(
            f.store.votes_of(f.suggestion),
            vec![VoteEntry::new(user, VoteValue::Up)]
        );
    }

    #[tokio::test]
    async fn test_failed_toggle_off_keeps_vote() {
        let f = fixture();
        let user = Uuid::new_v4();
        f.store.seed_vote(f.suggestion, user, VoteValue::Down);
        f.store.fail_on_vote("serialization failure");

        let err = f
            .service
            .execute(Some(user), f.suggestion, VoteValue::Down)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Fehler beim Löschen");
        assert!(f.audit.entries().is_empty());
        assert_eq!(
            f.store.votes_of(f.suggestion),
            vec![VoteEntry::new(user, VoteValue::Down)]
        );
    }

    #[tokio::test]
    async fn test_reload_failure_after_vote() {
        let f = fixture();
        let user = Uuid::new_v4();
        // lookup and insert succeed, the reload fails
        f.store.fail_after(2, "connection reset");

        let committed = f
            .service
            .execute(Some(user), f.suggestion, VoteValue::Up)
            .await
            .unwrap();

        assert!(committed.is_stale());
        assert_eq!(f.audit.entries().len(), 1);
        assert_eq!(
            f.store.votes_of(f.suggestion),
            vec![VoteEntry::new(user, VoteValue::Up)]
        );
    }
}
