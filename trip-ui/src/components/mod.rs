mod confirm_dialog;
mod loading_spinner;
mod place_manager;
mod suggestion_card;
mod suggestion_form;
mod toast;
mod user_picker;

pub use confirm_dialog::{ConfirmDialog, PendingDelete};
pub use loading_spinner::LoadingSpinner;
pub use place_manager::PlaceManager;
pub use suggestion_card::SuggestionCard;
pub use suggestion_form::SuggestionDialog;
pub use toast::{Toast, ToastKind, ToastMessage};
pub use user_picker::UserPicker;
