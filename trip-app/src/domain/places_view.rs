use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::place::Place;
use super::suggestion::SuggestionBoard;

/// Page state of the places screen. Only ever replaced with freshly
/// fetched data, never patched locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacesViewState {
    pub places: Vec<Place>,
    pub selected: Option<Uuid>,
    pub board: Option<SuggestionBoard>,
}

impl PlacesViewState {
    /// Keeps the current selection while it still exists, otherwise falls
    /// back to the first place.
    pub fn places_loaded(&mut self, places: Vec<Place>) {
        let still_there = self
            .selected
            .is_some_and(|id| places.iter().any(|p| p.id == id));
        if !still_there {
            self.selected = places.first().map(|p| p.id);
            self.board = None;
        }
        self.places = places;
    }

    pub fn place_deleted(&mut self, places: Vec<Place>) {
        self.places = places;
        self.selected = None;
        self.board = None;
    }

    pub fn select(&mut self, place_id: Uuid) {
        if self.selected != Some(place_id) {
            self.selected = Some(place_id);
            self.board = None;
        }
    }

    /// Drops boards that arrive after the user already switched places.
    pub fn board_loaded(&mut self, board: SuggestionBoard) -> bool {
        if self.selected == Some(board.place_id) {
            self.board = Some(board);
            true
        } else {
            false
        }
    }

    pub fn selected_place(&self) -> Option<&Place> {
        let id = self.selected?;
        self.places.iter().find(|p| p.id == id)
    }
}
