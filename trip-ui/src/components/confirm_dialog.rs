use leptos::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDelete {
    Place(Uuid),
    Suggestion(Uuid),
}

impl PendingDelete {
    pub fn description(self) -> &'static str {
        match self {
            Self::Place(_) => {
                "Dieser Ort und alle zugehörigen Vorschläge werden gelöscht. Dies kann nicht rückgängig gemacht werden."
            }
            Self::Suggestion(_) => {
                "Dieser Vorschlag wird gelöscht. Dies kann nicht rückgängig gemacht werden."
            }
        }
    }
}

#[component]
pub fn ConfirmDialog(
    pending: RwSignal<Option<PendingDelete>>,
    #[prop(into)] on_confirm: Callback<PendingDelete>,
) -> impl IntoView {
    move || {
        pending.get().map(|target| {
            view! {
                <div class="dialog-backdrop">
                    <div class="dialog" role="alertdialog">
                        <h3 class="dialog__title">"Löschen bestätigen"</h3>
                        <p class="dialog__text">{target.description()}</p>
                        <div class="dialog__actions">
                            <button class="btn btn--outline" on:click=move |_| pending.set(None)>
                                "Abbrechen"
                            </button>
                            <button
                                class="btn btn--danger"
                                on:click=move |_| {
                                    pending.set(None);
                                    on_confirm.run(target);
                                }
                            >
                                "Löschen"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
