use leptos::prelude::*;
use trip_app::domain::User;
use uuid::Uuid;

/// Picks the acting user, or adds a new traveller. The caller closes the
/// add form through `adding` once the user exists.
#[component]
pub fn UserPicker(
    #[prop(into)] users: Signal<Vec<User>>,
    #[prop(into)] current: Signal<Option<User>>,
    adding: RwSignal<bool>,
    #[prop(into)] on_select: Callback<Uuid>,
    #[prop(into)] on_create: Callback<String>,
) -> impl IntoView {
    let selected_id = move || current.get().map(|u| u.id.to_string()).unwrap_or_default();
    let new_name = RwSignal::new(String::new());

    Effect::new(move |_| {
        if !adding.get() {
            new_name.set(String::new());
        }
    });

    let on_key = move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
        "Enter" => on_create.run(new_name.get()),
        "Escape" => adding.set(false),
        _ => {}
    };

    view! {
        <div class="user-picker">
            <label class="user-picker__label" for="user-picker">"Ich bin:"</label>
            <select
                id="user-picker"
                class="user-picker__select"
                prop:value=selected_id
                on:change=move |ev| {
                    if let Ok(id) = event_target_value(&ev).parse::<Uuid>() {
                        on_select.run(id);
                    }
                }
            >
                <option value="">"Benutzer wählen"</option>
                {move || {
                    users
                        .get()
                        .into_iter()
                        .map(|u| view! { <option value={u.id.to_string()}>{u.name}</option> })
                        .collect::<Vec<_>>()
                }}
            </select>
            {move || {
                if adding.get() {
                    view! {
                        <input
                            class="user-picker__select"
                            placeholder="Name *"
                            prop:value=move || new_name.get()
                            on:input=move |ev| new_name.set(event_target_value(&ev))
                            on:keydown=on_key
                        />
                        <button class="icon-btn" title="Speichern" on:click=move |_| on_create.run(new_name.get())>
                            "✓"
                        </button>
                        <button class="icon-btn" title="Abbrechen" on:click=move |_| adding.set(false)>
                            "✕"
                        </button>
                    }
                        .into_any()
                } else {
                    view! {
                        <button class="btn btn--outline" on:click=move |_| adding.set(true)>
                            "+ Benutzer"
                        </button>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
