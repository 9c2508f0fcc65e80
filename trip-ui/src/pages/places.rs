use leptos::prelude::*;
use leptos::task::spawn_local;
use server_fn::ServerFnError;
use trip_app::domain::{
    Committed, Notice, Place, PlaceForm, PlacesViewState, SuggestionBoard, SuggestionForm, User,
    VoteValue,
};
use trip_app::infrastructure::security::InputSanitizer;
use uuid::Uuid;

use crate::components::{
    ConfirmDialog, LoadingSpinner, PendingDelete, PlaceManager, SuggestionCard, SuggestionDialog,
    Toast, ToastMessage, UserPicker,
};

#[cfg(feature = "ssr")]
mod ssr_support {
    use server_fn::ServerFnError;
    use tower_sessions::Session;
    use trip_app::AppContext;
    use trip_errors::AppError;
    use uuid::Uuid;

    pub const USER_KEY: &str = "user_id";

    pub fn context() -> Result<AppContext, ServerFnError> {
        leptos::prelude::use_context::<AppContext>()
            .ok_or_else(|| ServerFnError::new(AppError::Internal("missing AppContext".into()).user_message()))
    }

    pub async fn session() -> Result<Session, ServerFnError> {
        leptos_axum::extract::<Session>().await.map_err(Into::into)
    }

    /// The user picked on the page, if any.
    pub async fn actor() -> Result<Option<Uuid>, ServerFnError> {
        actor_in(&session().await?).await
    }

    pub async fn actor_in(session: &Session) -> Result<Option<Uuid>, ServerFnError> {
        session.get::<Uuid>(USER_KEY).await.map_err(|e| {
            tracing::error!("Failed to read session: {}", e);
            fail(AppError::Internal(e.to_string()))
        })
    }

    pub fn fail(err: AppError) -> ServerFnError {
        ServerFnError::new(err.user_message())
    }

}

#[server(ListUsersFn, "/api", endpoint = "list_users")]
pub async fn list_users() -> Result<Vec<User>, ServerFnError> {
    use ssr_support::*;

    context()?.users.list().await.map_err(fail)
}

#[server(AddUserFn, "/api", endpoint = "add_user")]
pub async fn add_user(name: String) -> Result<Vec<User>, ServerFnError> {
    use ssr_support::*;

    let ctx = context()?;
    ctx.users.create(&name).await.map_err(fail)?;
    ctx.users.list().await.map_err(fail)
}

#[server(CurrentUserFn, "/api", endpoint = "current_user")]
pub async fn current_user() -> Result<Option<User>, ServerFnError> {
    use ssr_support::*;

    let ctx = context()?;
    match actor().await? {
        Some(id) => ctx.users.find(id).await.map_err(fail),
        None => Ok(None),
    }
}

#[server(SelectUserFn, "/api", endpoint = "select_user")]
pub async fn select_user(user_id: Uuid) -> Result<User, ServerFnError> {
    use ssr_support::*;
    use trip_errors::AppError;

    let user = context()?.users.require(user_id).await.map_err(fail)?;
    session()
        .await?
        .insert(USER_KEY, user.id)
        .await
        .map_err(|e| fail(AppError::Internal(e.to_string())))?;
    tracing::info!(user_id = %user.id, "Acting user selected");
    Ok(user)
}

#[server(ListPlacesFn, "/api", endpoint = "list_places")]
pub async fn list_places() -> Result<Vec<Place>, ServerFnError> {
    use ssr_support::*;

    context()?.places.list().await.map_err(fail)
}

#[server(AddPlaceFn, "/api", endpoint = "add_place")]
pub async fn add_place(form: PlaceForm) -> Result<Committed<Vec<Place>>, ServerFnError> {
    use ssr_support::*;

    let ctx = context()?;
    ctx.places.create(actor().await?, form).await.map_err(fail)
}

#[server(RenamePlaceFn, "/api", endpoint = "rename_place")]
pub async fn rename_place(
    place_id: Uuid,
    form: PlaceForm,
) -> Result<Committed<Vec<Place>>, ServerFnError> {
    use ssr_support::*;

    let ctx = context()?;
    ctx.places
        .rename(actor().await?, place_id, form)
        .await
        .map_err(fail)
}

#[server(DeletePlaceFn, "/api", endpoint = "delete_place")]
pub async fn delete_place(place_id: Uuid) -> Result<Committed<Vec<Place>>, ServerFnError> {
    use ssr_support::*;

    let ctx = context()?;
    ctx.places.delete(actor().await?, place_id).await.map_err(fail)
}

#[server(LoadBoardFn, "/api", endpoint = "load_board")]
pub async fn load_board(place_id: Uuid) -> Result<SuggestionBoard, ServerFnError> {
    use ssr_support::*;

    context()?.suggestions.board(place_id).await.map_err(fail)
}

#[server(AddSuggestionFn, "/api", endpoint = "add_suggestion")]
pub async fn add_suggestion(
    place_id: Uuid,
    form: SuggestionForm,
) -> Result<Committed<SuggestionBoard>, ServerFnError> {
    use ssr_support::*;

    let ctx = context()?;
    ctx.suggestions
        .create(actor().await?, place_id, form)
        .await
        .map_err(fail)
}

#[server(DeleteSuggestionFn, "/api", endpoint = "delete_suggestion")]
pub async fn delete_suggestion(
    place_id: Uuid,
    suggestion_id: Uuid,
) -> Result<Committed<SuggestionBoard>, ServerFnError> {
    use ssr_support::*;

    let ctx = context()?;
    ctx.suggestions
        .delete(actor().await?, place_id, suggestion_id)
        .await
        .map_err(fail)
}

#[server(VoteFn, "/api", endpoint = "vote")]
pub async fn vote(
    suggestion_id: Uuid,
    value: i16,
) -> Result<Committed<SuggestionBoard>, ServerFnError> {
    use ssr_support::*;
    use trip_errors::AppError;

    let value = VoteValue::try_from(value)
        .map_err(|e| fail(AppError::validation(e.to_string())))?;
    let ctx = context()?;
    ctx.cast_vote
        .execute(actor().await?, suggestion_id, value)
        .await
        .map_err(fail)
}

fn error_text(err: ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message,
        other => other.to_string(),
    }
}

/// The committed change's list, reloaded once more if the server could not.
async fn committed_places(committed: Committed<Vec<Place>>) -> Result<Vec<Place>, ServerFnError> {
    match committed.refreshed {
        Some(places) => Ok(places),
        None => list_places().await,
    }
}

async fn committed_board(
    committed: Committed<SuggestionBoard>,
    place_id: Uuid,
) -> Result<SuggestionBoard, ServerFnError> {
    match committed.refreshed {
        Some(board) => Ok(board),
        None => load_board(place_id).await,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoardTab {
    Top,
    New,
}

#[component]
pub fn PlacesPage() -> impl IntoView {
    let state = RwSignal::new(PlacesViewState::default());
    let users = RwSignal::new(Vec::<User>::new());
    let me = RwSignal::new(None::<User>);
    let loading = RwSignal::new(true);
    let toast = RwSignal::new(None::<ToastMessage>);
    let pending_delete = RwSignal::new(None::<PendingDelete>);
    let show_form = RwSignal::new(false);
    let tab = RwSignal::new(BoardTab::Top);

    let editing_place = RwSignal::new(None::<Uuid>);
    let adding_place = RwSignal::new(false);
    let adding_user = RwSignal::new(false);

    let report = move |err: ServerFnError| toast.set(Some(ToastMessage::error(error_text(err))));
    let apply_board = move |loaded: Result<SuggestionBoard, ServerFnError>| match loaded {
        Ok(board) => state.update(|s| {
            s.board_loaded(board);
        }),
        Err(e) => report(e),
    };

    Effect::new(move |_| {
        spawn_local(async move {
            match list_places().await {
                Ok(places) => state.update(|s| s.places_loaded(places)),
                Err(e) => report(e),
            }
            loading.set(false);
            if let Ok(list) = list_users().await {
                users.set(list);
            }
            if let Ok(user) = current_user().await {
                me.set(user);
            }
        });
    });

    let selected = Memo::new(move |_| state.with(|s| s.selected));
    Effect::new(move |_| {
        if let Some(place_id) = selected.get() {
            spawn_local(async move { apply_board(load_board(place_id).await) });
        }
    });

    let reject = move |message: String| toast.set(Some(ToastMessage::error(message)));
    let succeed = move |notice: Notice| toast.set(Some(ToastMessage::success(notice)));

    let on_select_user = move |user_id: Uuid| {
        spawn_local(async move {
            match select_user(user_id).await {
                Ok(user) => me.set(Some(user)),
                Err(e) => report(e),
            }
        });
    };

    let on_create_user = move |name: String| {
        if let Err(e) = InputSanitizer::validate_user_name(&name) {
            reject(e.user_message().to_string());
            return;
        }
        spawn_local(async move {
            match add_user(name).await {
                Ok(list) => {
                    users.set(list);
                    adding_user.set(false);
                    succeed(Notice::UserAdded);
                }
                Err(e) => report(e),
            }
        });
    };

    let on_create_place = move |form: PlaceForm| {
        if let Err(e) = InputSanitizer::validate_place(&form) {
            reject(e.user_message().to_string());
            return;
        }
        spawn_local(async move {
            match add_place(form).await {
                Ok(committed) => {
                    adding_place.set(false);
                    succeed(Notice::PlaceAdded);
                    match committed_places(committed).await {
                        Ok(places) => state.update(|s| s.places_loaded(places)),
                        Err(e) => report(e),
                    }
                }
                Err(e) => report(e),
            }
        });
    };

    let on_rename_place = move |(place_id, form): (Uuid, PlaceForm)| {
        if let Err(e) = InputSanitizer::validate_place(&form) {
            reject(e.user_message().to_string());
            return;
        }
        spawn_local(async move {
            match rename_place(place_id, form).await {
                Ok(committed) => {
                    editing_place.set(None);
                    succeed(Notice::PlaceUpdated);
                    match committed_places(committed).await {
                        Ok(places) => state.update(|s| s.places_loaded(places)),
                        Err(e) => report(e),
                    }
                }
                Err(e) => report(e),
            }
        });
    };

    let on_confirm_delete = move |target: PendingDelete| {
        spawn_local(async move {
            match target {
                PendingDelete::Place(place_id) => match delete_place(place_id).await {
                    Ok(committed) => {
                        succeed(Notice::PlaceDeleted);
                        match committed_places(committed).await {
                            Ok(places) => state.update(|s| s.place_deleted(places)),
                            Err(e) => {
                                state.update(|s| {
                                    let remaining = s
                                        .places
                                        .iter()
                                        .filter(|p| p.id != place_id)
                                        .cloned()
                                        .collect();
                                    s.place_deleted(remaining);
                                });
                                report(e);
                            }
                        }
                    }
                    Err(e) => report(e),
                },
                PendingDelete::Suggestion(suggestion_id) => {
                    let Some(place_id) = state.with_untracked(|s| s.selected) else {
                        return;
                    };
                    match delete_suggestion(place_id, suggestion_id).await {
                        Ok(committed) => {
                            succeed(Notice::SuggestionDeleted);
                            apply_board(committed_board(committed, place_id).await);
                        }
                        Err(e) => report(e),
                    }
                }
            }
        });
    };

    let on_add_suggestion = move |form: SuggestionForm| {
        let Some(place_id) = state.with_untracked(|s| s.selected) else {
            reject("Bitte wähle zuerst einen Ort".to_string());
            return;
        };
        if let Err(e) = InputSanitizer::validate_suggestion(&form) {
            reject(e.user_message().to_string());
            return;
        }
        spawn_local(async move {
            match add_suggestion(place_id, form).await {
                Ok(committed) => {
                    show_form.set(false);
                    succeed(Notice::SuggestionAdded);
                    apply_board(committed_board(committed, place_id).await);
                }
                Err(e) => report(e),
            }
        });
    };

    let on_vote = move |(suggestion_id, value): (Uuid, VoteValue)| {
        let Some(place_id) = state.with_untracked(|s| s.selected) else {
            return;
        };
        spawn_local(async move {
            match vote(suggestion_id, value.as_i16()).await {
                Ok(committed) => apply_board(committed_board(committed, place_id).await),
                Err(e) => report(e),
            }
        });
    };

    let places = Signal::derive(move || state.with(|s| s.places.clone()));
    let selected_name = Signal::derive(move || {
        state.with(|s| s.selected_place().map(|p| p.name.clone()).unwrap_or_default())
    });

    view! {
        <div class="page">
            <header class="page__header">
                <h1 class="page__title">"Orte & Vorschläge"</h1>
                <UserPicker
                    users=users
                    current=me
                    adding=adding_user
                    on_select=on_select_user
                    on_create=on_create_user
                />
            </header>

            <Toast message=toast/>

            {move || loading.get().then(|| view! { <LoadingSpinner/> })}

            <PlaceManager
                places=places
                editing=editing_place
                adding=adding_place
                on_create=on_create_place
                on_rename=on_rename_place
                on_delete=move |id: Uuid| pending_delete.set(Some(PendingDelete::Place(id)))
            />

            <nav class="place-tabs">
                {move || {
                    let current = selected.get();
                    state
                        .with(|s| s.places.clone())
                        .into_iter()
                        .map(|place| {
                            let id = place.id;
                            let class = if current == Some(id) { "btn" } else { "btn btn--outline" };
                            view! {
                                <button
                                    class=class
                                    on:click=move |_| state.update(|s| s.select(id))
                                >
                                    {place.name}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </nav>

            {move || {
                selected.get().map(|_| {
                    view! {
                        <section class="board">
                            <div class="board__header">
                                <h2 class="board__title">{move || selected_name.get()}</h2>
                                <button class="btn" on:click=move |_| show_form.set(true)>
                                    "+ Vorschlag"
                                </button>
                            </div>

                            <div class="tabs">
                                <button
                                    class=move || if tab.get() == BoardTab::Top { "tabs__tab tabs__tab--active" } else { "tabs__tab" }
                                    on:click=move |_| tab.set(BoardTab::Top)
                                >
                                    "Top (nach Score)"
                                </button>
                                <button
                                    class=move || if tab.get() == BoardTab::New { "tabs__tab tabs__tab--active" } else { "tabs__tab" }
                                    on:click=move |_| tab.set(BoardTab::New)
                                >
                                    "Neu"
                                </button>
                            </div>

                            {move || {
                                let user_id = me.with(|u| u.as_ref().map(|u| u.id));
                                let Some(board) = state.with(|s| s.board.clone()) else {
                                    return view! { <p class="board__empty">"Lade Vorschläge..."</p> }.into_any();
                                };
                                if board.is_empty() {
                                    return view! {
                                        <p class="board__empty">"Noch keine Vorschläge für diesen Ort"</p>
                                    }
                                        .into_any();
                                }
                                let ordered = match tab.get() {
                                    BoardTab::Top => board.by_score(),
                                    BoardTab::New => board.newest_first(),
                                };
                                view! {
                                    <div class="board__list">
                                        {ordered
                                            .into_iter()
                                            .map(|suggestion| {
                                                view! {
                                                    <SuggestionCard
                                                        suggestion=suggestion
                                                        current_user=user_id
                                                        on_vote=on_vote
                                                        on_delete=move |id: Uuid| {
                                                            pending_delete.set(Some(PendingDelete::Suggestion(id)))
                                                        }
                                                    />
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }}
                        </section>
                    }
                })
            }}

            <SuggestionDialog open=show_form place_name=selected_name on_submit=on_add_suggestion/>
            <ConfirmDialog pending=pending_delete on_confirm=on_confirm_delete/>
        </div>
    }
}
