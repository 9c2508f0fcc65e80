use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Ungültige Eingabe: {0}")]
    Validation(String),

    #[error("Kein Benutzer ausgewählt")]
    NoUserSelected,

    #[error("Nicht gefunden")]
    NotFound,

    #[error("Erstellen fehlgeschlagen: {0}")]
    CreateFailed(String),

    #[error("Speichern fehlgeschlagen: {0}")]
    UpdateFailed(String),

    #[error("Löschen fehlgeschlagen: {0}")]
    DeleteFailed(String),

    #[error("Laden fehlgeschlagen: {0}")]
    LoadFailed(String),

    #[error("Interner Fehler: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Text shown in the error toast. Store details stay in the logs.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(msg) => msg,
            Self::NoUserSelected => "Bitte wähle zuerst einen Benutzer",
            Self::NotFound => "Nicht gefunden",
            Self::CreateFailed(_) => "Fehler beim Erstellen",
            Self::UpdateFailed(_) => "Fehler beim Speichern",
            Self::DeleteFailed(_) => "Fehler beim Löschen",
            Self::LoadFailed(_) => "Fehler beim Laden",
            Self::Internal(_) => "Interner Fehler. Bitte später erneut versuchen.",
        }
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = match &self {
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::NoUserSelected => StatusCode::UNAUTHORIZED,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::CreateFailed(_)
                | AppError::UpdateFailed(_)
                | AppError::DeleteFailed(_)
                | AppError::LoadFailed(_) => StatusCode::BAD_GATEWAY,
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let message = self.user_message().to_string();
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = AppError::validation("Titel ist erforderlich");
        assert_eq!(err.user_message(), "Titel ist erforderlich");
    }

    #[test]
    fn test_store_details_are_hidden() {
        let err = AppError::DeleteFailed("foreign key violation".to_string());
        assert_eq!(err.user_message(), "Fehler beim Löschen");
        assert!(err.to_string().contains("foreign key violation"));
    }

    #[test]
    fn test_serde_roundtrip_keeps_variant() {
        let json = serde_json::to_string(&AppError::NoUserSelected).unwrap();
        let back: AppError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AppError::NoUserSelected);
    }
}
