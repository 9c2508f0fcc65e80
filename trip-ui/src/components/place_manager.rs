use leptos::prelude::*;
use trip_app::domain::{Place, PlaceForm};
use uuid::Uuid;

/// Chips for every place with inline edit, plus the "new place" form.
///
/// `editing` and `adding` belong to the caller, which closes the editor or
/// the form once the change went through. A rejected change keeps the input.
#[component]
pub fn PlaceManager(
    #[prop(into)] places: Signal<Vec<Place>>,
    editing: RwSignal<Option<Uuid>>,
    adding: RwSignal<bool>,
    #[prop(into)] on_create: Callback<PlaceForm>,
    #[prop(into)] on_rename: Callback<(Uuid, PlaceForm)>,
    #[prop(into)] on_delete: Callback<Uuid>,
) -> impl IntoView {
    let edit_name = RwSignal::new(String::new());
    let edit_region = RwSignal::new(String::new());

    let new_name = RwSignal::new(String::new());
    let new_region = RwSignal::new(String::new());

    Effect::new(move |_| {
        if !adding.get() {
            new_name.set(String::new());
            new_region.set(String::new());
        }
    });

    let reset_new = move || adding.set(false);
    let submit_new = move || on_create.run(PlaceForm::new(new_name.get(), new_region.get()));
    let on_new_key = move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
        "Enter" => submit_new(),
        "Escape" => reset_new(),
        _ => {}
    };

    view! {
        <section class="places">
            <h2 class="places__title">"Orte verwalten"</h2>
            <div class="places__list">
                {move || {
                    places
                        .get()
                        .into_iter()
                        .map(|place| {
                            let id = place.id;
                            let name = place.name.clone();
                            let region = place.region.clone().unwrap_or_default();
                            if editing.get() == Some(id) {
                                view! {
                                    <div class="place-chip place-chip--editing">
                                        <input
                                            class="place-chip__input"
                                            placeholder="Name"
                                            prop:value=move || edit_name.get()
                                            on:input=move |ev| edit_name.set(event_target_value(&ev))
                                        />
                                        <input
                                            class="place-chip__input"
                                            placeholder="Region"
                                            prop:value=move || edit_region.get()
                                            on:input=move |ev| edit_region.set(event_target_value(&ev))
                                        />
                                        <button
                                            class="icon-btn"
                                            title="Speichern"
                                            on:click=move |_| {
                                                on_rename.run((id, PlaceForm::new(edit_name.get(), edit_region.get())))
                                            }
                                        >
                                            "✓"
                                        </button>
                                        <button class="icon-btn" title="Abbrechen" on:click=move |_| editing.set(None)>
                                            "✕"
                                        </button>
                                    </div>
                                }
                                    .into_any()
                            } else {
                                let shown_region = place.region.clone();
                                view! {
                                    <div class="place-chip">
                                        <span class="place-chip__name">{place.name}</span>
                                        {shown_region.map(|r| view! { <span class="place-chip__region">" (" {r} ")"</span> })}
                                        <button
                                            class="icon-btn"
                                            title="Bearbeiten"
                                            on:click=move |_| {
                                                edit_name.set(name.clone());
                                                edit_region.set(region.clone());
                                                editing.set(Some(id));
                                            }
                                        >
                                            "✎"
                                        </button>
                                        <button
                                            class="icon-btn icon-btn--danger"
                                            title="Löschen"
                                            on:click=move |_| on_delete.run(id)
                                        >
                                            "🗑"
                                        </button>
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                {move || {
                    if adding.get() {
                        view! {
                            <div class="place-form">
                                <input
                                    class="place-chip__input"
                                    placeholder="Ortsname *"
                                    prop:value=move || new_name.get()
                                    on:input=move |ev| new_name.set(event_target_value(&ev))
                                    on:keydown=on_new_key
                                />
                                <input
                                    class="place-chip__input"
                                    placeholder="Region"
                                    prop:value=move || new_region.get()
                                    on:input=move |ev| new_region.set(event_target_value(&ev))
                                    on:keydown=on_new_key
                                />
                                <button class="btn" on:click=move |_| submit_new()>"Erstellen"</button>
                                <button class="btn btn--outline" on:click=move |_| reset_new()>"Abbrechen"</button>
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <button class="btn btn--outline" on:click=move |_| adding.set(true)>
                                "+ Neuer Ort"
                            </button>
                        }
                            .into_any()
                    }
                }}
            </div>
        </section>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    fn bergen() -> Place {
        Place {
            id: Uuid::new_v4(),
            name: "Bergen".to_string(),
            region: Some("Vestland".to_string()),
            created_by: None,
            created_at: None,
        }
    }

    fn render(place: Place, editing: RwSignal<Option<Uuid>>) -> String {
        let adding = RwSignal::new(false);
        view! {
            <PlaceManager
                places=Signal::stored(vec![place])
                editing=editing
                adding=adding
                on_create=|_: PlaceForm| {}
                on_rename=|_: (Uuid, PlaceForm)| {}
                on_delete=|_: Uuid| {}
            />
        }
        .to_html()
    }

    #[test]
    fn test_editor_stays_open_until_caller_closes_it() {
        let owner = Owner::new();
        owner.with(|| {
            let place = bergen();
            let editing = RwSignal::new(Some(place.id));

            assert!(render(place.clone(), editing).contains("place-chip--editing"));

            editing.set(None);
            let html = render(place, editing);
            assert!(!html.contains("place-chip--editing"));
            assert!(html.contains("Bergen"));
        });
    }
}
