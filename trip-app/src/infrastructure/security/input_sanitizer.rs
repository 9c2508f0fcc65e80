use crate::domain::{PlaceDraft, PlaceForm, SuggestionDraft, SuggestionForm};
use regex_lite::Regex;
use std::sync::LazyLock;
use trip_errors::AppError;

const MAX_URL_LENGTH: usize = 2048;

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("link pattern is valid"));

pub struct InputSanitizer;

impl InputSanitizer {
    pub fn validate_place(form: &PlaceForm) -> Result<PlaceDraft, AppError> {
        let name = form.name.trim();
        if name.is_empty() {
            tracing::warn!("Rejected place without name");
            return Err(AppError::validation("Ortsname ist erforderlich"));
        }

        Ok(PlaceDraft {
            name: name.to_string(),
            region: Self::optional(&form.region),
        })
    }

    pub fn validate_user_name(name: &str) -> Result<String, AppError> {
        let name = name.trim();
        if name.is_empty() {
            tracing::warn!("Rejected user without name");
            return Err(AppError::validation("Name ist erforderlich"));
        }
        Ok(name.to_string())
    }

    pub fn validate_suggestion(form: &SuggestionForm) -> Result<SuggestionDraft, AppError> {
        let title = form.title.trim();
        if title.is_empty() {
            tracing::warn!("Rejected suggestion without title");
            return Err(AppError::validation("Titel ist erforderlich"));
        }

        Ok(SuggestionDraft {
            title: title.to_string(),
            description: Self::optional(&form.description),
            category: form.category,
            link: Self::validate_link(&form.link)?,
            cost_estimate: Self::optional(&form.cost_estimate),
        })
    }

    /// Blank links are allowed and mean "no link".
    pub fn validate_link(link: &str) -> Result<Option<String>, AppError> {
        let link = link.trim();
        if link.is_empty() {
            return Ok(None);
        }

        if link.len() > MAX_URL_LENGTH {
            return Err(AppError::validation("Link ist zu lang"));
        }

        if !LINK_PATTERN.is_match(link) {
            tracing::warn!("Rejected malformed link: {}", link);
            return Err(AppError::validation("Link muss eine gültige URL sein"));
        }

        Ok(Some(link.to_string()))
    }

    fn optional(value: &str) -> Option<String> {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}
