use leptos::prelude::*;
use trip_app::domain::{Category, SuggestionForm};

/// Dialog for a new suggestion. Stays open until the caller closes it, so a
/// rejected form keeps its values.
#[component]
pub fn SuggestionDialog(
    open: RwSignal<bool>,
    #[prop(into)] place_name: Signal<String>,
    #[prop(into)] on_submit: Callback<SuggestionForm>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let category = RwSignal::new(Category::default());
    let link = RwSignal::new(String::new());
    let cost_estimate = RwSignal::new(String::new());

    // cleared whenever the dialog closes
    Effect::new(move |_| {
        if !open.get() {
            title.set(String::new());
            description.set(String::new());
            category.set(Category::default());
            link.set(String::new());
            cost_estimate.set(String::new());
        }
    });

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(SuggestionForm {
            title: title.get(),
            description: description.get(),
            category: category.get(),
            link: link.get(),
            cost_estimate: cost_estimate.get(),
        });
    };

    move || {
        open.get().then(|| {
            view! {
                <div class="dialog-backdrop">
                    <form class="dialog" on:submit=submit>
                        <h3 class="dialog__title">"Neuer Vorschlag für " {move || place_name.get()}</h3>
                        <input
                            class="dialog__input"
                            placeholder="Titel *"
                            prop:value=move || title.get()
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                        <textarea
                            class="dialog__input"
                            placeholder="Beschreibung"
                            prop:value=move || description.get()
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                        <select
                            class="dialog__input"
                            prop:value=move || category.get().as_str()
                            on:change=move |ev| {
                                category.set(event_target_value(&ev).parse().unwrap_or_default())
                            }
                        >
                            {Category::ALL
                                .into_iter()
                                .map(|c| view! { <option value={c.as_str()}>{c.label()}</option> })
                                .collect::<Vec<_>>()}
                        </select>
                        <input
                            class="dialog__input"
                            placeholder="Link (optional)"
                            prop:value=move || link.get()
                            on:input=move |ev| link.set(event_target_value(&ev))
                        />
                        <input
                            class="dialog__input"
                            placeholder="Geschätzte Kosten (optional)"
                            prop:value=move || cost_estimate.get()
                            on:input=move |ev| cost_estimate.set(event_target_value(&ev))
                        />
                        <div class="dialog__actions">
                            <button type="button" class="btn btn--outline" on:click=move |_| open.set(false)>
                                "Abbrechen"
                            </button>
                            <button type="submit" class="btn">"Hinzufügen"</button>
                        </div>
                    </form>
                </div>
            }
        })
    }
}
