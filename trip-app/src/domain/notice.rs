/// Success toasts shown after a committed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    PlaceAdded,
    PlaceUpdated,
    PlaceDeleted,
    SuggestionAdded,
    SuggestionDeleted,
    UserAdded,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Self::PlaceAdded => "Ort hinzugefügt",
            Self::PlaceUpdated => "Ort aktualisiert",
            Self::PlaceDeleted => "Ort gelöscht",
            Self::SuggestionAdded => "Vorschlag hinzugefügt",
            Self::SuggestionDeleted => "Vorschlag gelöscht",
            Self::UserAdded => "Benutzer hinzugefügt",
        }
    }
}
