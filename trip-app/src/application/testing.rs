//! In-memory `TripStore` and `AuditLog` doubles for use-case tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use super::interfaces::{AuditLog, StoreError, TripStore};
use crate::domain::{
    AuditEntry, Category, Place, PlaceDraft, ScoredSuggestion, Suggestion, SuggestionDraft, User,
    VoteEntry, VoteValue,
};

#[derive(Default)]
struct State {
    users: Vec<User>,
    places: Vec<Place>,
    suggestions: Vec<Suggestion>,
    votes: Vec<(Uuid, VoteEntry)>,
    calls: usize,
    ticks: i64,
    fail_next: Option<String>,
    fail_votes: Option<String>,
    fail_after: Option<(usize, String)>,
}

impl State {
    fn now(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap() + Duration::seconds(self.ticks)
    }

    fn scored(&self, suggestion: &Suggestion) -> ScoredSuggestion {
        let creator = suggestion
            .created_by
            .and_then(|id| self.users.iter().find(|u| u.id == id))
            .map(|u| u.name.clone());
        let votes = self
            .votes
            .iter()
            .filter(|(sid, _)| *sid == suggestion.id)
            .map(|(_, v)| *v)
            .collect();
        ScoredSuggestion::new(suggestion.clone(), creator, votes)
    }
}

#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
}

impl FakeStore {
    /// Number of trait calls made so far. Seeding is not counted.
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn fail_next(&self, message: &str) {
        self.state.lock().unwrap().fail_next = Some(message.to_string());
    }

    pub fn fail_on_vote(&self, message: &str) {
        self.state.lock().unwrap().fail_votes = Some(message.to_string());
    }

    pub fn seed_user(&self, name: &str) -> Uuid {
        let user = User::new(name.to_string());
        let id = user.id;
        self.state.lock().unwrap().users.push(user);
        id
    }

    pub fn seed_place(&self, name: &str) -> Uuid {
        let mut state = self.state.lock().unwrap();
        let id = Uuid::new_v4();
        let created_at = Some(state.now());
        state.places.push(Place {
            id,
            name: name.to_string(),
            region: None,
            created_by: None,
            created_at,
        });
        id
    }

    pub fn seed_suggestion(&self, place_id: Uuid, title: &str) -> Uuid {
        let mut state = self.state.lock().unwrap();
        let id = Uuid::new_v4();
        let created_at = Some(state.now());
        state.suggestions.push(Suggestion {
            id,
            place_id,
            title: title.to_string(),
            description: None,
            category: Category::Activity,
            link: None,
            cost_estimate: None,
            created_by: None,
            created_at,
        });
        id
    }

    pub fn seed_vote(&self, suggestion_id: Uuid, user_id: Uuid, value: VoteValue) {
        self.state
            .lock()
            .unwrap()
            .votes
            .push((suggestion_id, VoteEntry::new(user_id, value)));
    }

    /// Vote rows of a suggestion, read without counting as a call.
    pub fn votes_of(&self, suggestion_id: Uuid) -> Vec<VoteEntry> {
        self.state
            .lock()
            .unwrap()
            .votes
            .iter()
            .filter(|(sid, _)| *sid == suggestion_id)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Fails the call made after `skip` more successful ones.
    pub fn fail_after(&self, skip: usize, message: &str) {
        let mut state = self.state.lock().unwrap();
        state.fail_after = Some((skip, message.to_string()));
    }

    fn begin(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if let Some((skip, message)) = state.fail_after.take() {
            if skip == 0 {
                state.fail_next = Some(message);
            } else {
                state.fail_after = Some((skip - 1, message));
            }
        }
        match state.fail_next.take() {
            Some(message) => Err(StoreError::Backend(message)),
            None => Ok(state),
        }
    }

    fn begin_vote(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        let state = self.begin()?;
        match state.fail_votes.clone() {
            Some(message) => Err(StoreError::Backend(message)),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl TripStore for FakeStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let state = self.begin()?;
        let mut users = state.users.clone();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let state = self.begin()?;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, name: &str) -> Result<User, StoreError> {
        let mut state = self.begin()?;
        let user = User {
            created_at: Some(state.now()),
            ..User::new(name.to_string())
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn list_places(&self) -> Result<Vec<Place>, StoreError> {
        let state = self.begin()?;
        let mut places = state.places.clone();
        places.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(places)
    }

    async fn find_place(&self, id: Uuid) -> Result<Option<Place>, StoreError> {
        let state = self.begin()?;
        Ok(state.places.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_place(
        &self,
        draft: &PlaceDraft,
        created_by: Option<Uuid>,
    ) -> Result<Place, StoreError> {
        let mut state = self.begin()?;
        let place = Place {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            region: draft.region.clone(),
            created_by,
            created_at: Some(state.now()),
        };
        state.places.push(place.clone());
        Ok(place)
    }

    async fn update_place(&self, id: Uuid, draft: &PlaceDraft) -> Result<Place, StoreError> {
        let mut state = self.begin()?;
        let place = state
            .places
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        place.name = draft.name.clone();
        place.region = draft.region.clone();
        Ok(place.clone())
    }

    async fn delete_place(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.begin()?;
        let removed: Vec<Uuid> = state
            .suggestions
            .iter()
            .filter(|s| s.place_id == id)
            .map(|s| s.id)
            .collect();
        state.places.retain(|p| p.id != id);
        state.suggestions.retain(|s| s.place_id != id);
        state.votes.retain(|(sid, _)| !removed.contains(sid));
        Ok(())
    }

    async fn list_suggestions(&self, place_id: Uuid) -> Result<Vec<ScoredSuggestion>, StoreError> {
        let state = self.begin()?;
        let mut suggestions: Vec<&Suggestion> = state
            .suggestions
            .iter()
            .filter(|s| s.place_id == place_id)
            .collect();
        suggestions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(suggestions.into_iter().map(|s| state.scored(s)).collect())
    }

    async fn find_suggestion(&self, id: Uuid) -> Result<Option<ScoredSuggestion>, StoreError> {
        let state = self.begin()?;
        Ok(state
            .suggestions
            .iter()
            .find(|s| s.id == id)
            .map(|s| state.scored(s)))
    }

    async fn insert_suggestion(
        &self,
        place_id: Uuid,
        draft: &SuggestionDraft,
        created_by: Option<Uuid>,
    ) -> Result<Suggestion, StoreError> {
        let mut state = self.begin()?;
        let suggestion = Suggestion {
            id: Uuid::new_v4(),
            place_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category,
            link: draft.link.clone(),
            cost_estimate: draft.cost_estimate.clone(),
            created_by,
            created_at: Some(state.now()),
        };
        state.suggestions.push(suggestion.clone());
        Ok(suggestion)
    }

    async fn delete_suggestion(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.begin()?;
        state.suggestions.retain(|s| s.id != id);
        state.votes.retain(|(sid, _)| *sid != id);
        Ok(())
    }

    async fn insert_vote(
        &self,
        suggestion_id: Uuid,
        user_id: Uuid,
        value: VoteValue,
    ) -> Result<(), StoreError> {
        let mut state = self.begin_vote()?;
        if state
            .votes
            .iter()
            .any(|(sid, v)| *sid == suggestion_id && v.user_id == user_id)
        {
            return Err(StoreError::Backend("duplicate key value".to_string()));
        }
        state.votes.push((suggestion_id, VoteEntry::new(user_id, value)));
        Ok(())
    }

    async fn update_vote(
        &self,
        suggestion_id: Uuid,
        user_id: Uuid,
        value: VoteValue,
    ) -> Result<(), StoreError> {
        let mut state = self.begin_vote()?;
        let (_, vote) = state
            .votes
            .iter_mut()
            .find(|(sid, v)| *sid == suggestion_id && v.user_id == user_id)
            .ok_or(StoreError::NotFound)?;
        vote.value = value;
        Ok(())
    }

    async fn delete_vote(&self, suggestion_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        let mut state = self.begin_vote()?;
        state
            .votes
            .retain(|(sid, v)| !(*sid == suggestion_id && v.user_id == user_id));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAudit {
    entries: Mutex<Vec<AuditEntry>>,
}

impl RecordingAudit {
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

#[async_trait]
impl AuditLog for RecordingAudit {
    async fn write(&self, entry: AuditEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}
