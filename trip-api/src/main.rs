use axum::{
    extract::Path,
    routing::{get, post},
    Json, Router,
};
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use tower_http::compression::CompressionLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use trip_app::domain::SuggestionBoard;
use trip_app::AppContext;
use trip_errors::AppError;
use trip_ui::pages::{
    AddPlaceFn, AddSuggestionFn, AddUserFn, CurrentUserFn, DeletePlaceFn, DeleteSuggestionFn,
    ListPlacesFn, ListUsersFn, LoadBoardFn, RenamePlaceFn, SelectUserFn, VoteFn,
};
use trip_ui::App;
use uuid::Uuid;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let app_context = match AppContext::connect(&database_url).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    // Comma separated travellers created on first start, e.g. "Maren,Anders"
    if let Ok(names) = std::env::var("TRIP_USERS") {
        match app_context.users.ensure(names.split(',')).await {
            Ok(added) => tracing::info!("Seeded {} users from TRIP_USERS", added),
            Err(e) => {
                tracing::error!("Failed to seed users: {}", e);
                std::process::exit(1);
            }
        }
    }

    let routes = generate_route_list(App);

    server_fn::axum::register_explicit::<ListUsersFn>();
    server_fn::axum::register_explicit::<AddUserFn>();
    server_fn::axum::register_explicit::<CurrentUserFn>();
    server_fn::axum::register_explicit::<SelectUserFn>();
    server_fn::axum::register_explicit::<ListPlacesFn>();
    server_fn::axum::register_explicit::<AddPlaceFn>();
    server_fn::axum::register_explicit::<RenamePlaceFn>();
    server_fn::axum::register_explicit::<DeletePlaceFn>();
    server_fn::axum::register_explicit::<LoadBoardFn>();
    server_fn::axum::register_explicit::<AddSuggestionFn>();
    server_fn::axum::register_explicit::<DeleteSuggestionFn>();
    server_fn::axum::register_explicit::<VoteFn>();
    tracing::info!("Registered server functions");

    let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

    let app = Router::new()
        .route("/data/places/{place_id}/board", get({
            let ctx = app_context.clone();
            move |path: Path<Uuid>| {
                let ctx = ctx.clone();
                async move { board_json(ctx, path.0).await }
            }
        }))
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |req| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || provide_context(ctx.clone()),
                        req
                    ).await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(session_layer)
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

async fn board_json(ctx: AppContext, place_id: Uuid) -> Result<Json<SuggestionBoard>, AppError> {
    let board = ctx.suggestions.board(place_id).await?;
    Ok(Json(board))
}

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    let css = r#"
        :root {
            --base: #faf4ed;
            --surface: #fffaf3;
            --overlay: #f2e9e1;
            --muted: #9893a5;
            --subtle: #797593;
            --text: #575279;
            --love: #b4637a;
            --gold: #ea9d34;
            --pine: #286983;
            --foam: #56949f;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: 'Inter', -apple-system, sans-serif;
            background: var(--base);
            color: var(--text);
            min-height: 100vh;
        }
        .container { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
        .page__header { display: flex; justify-content: space-between; align-items: center; gap: 1rem; margin-bottom: 1.5rem; }
        .page__title { color: var(--pine); font-size: 1.8rem; font-weight: 800; }
        .btn {
            padding: 0.5rem 1rem; background: var(--pine); color: var(--base);
            border: 2px solid var(--pine); border-radius: 8px; font-weight: 600; cursor: pointer;
        }
        .btn:disabled { background: var(--muted); border-color: var(--muted); cursor: not-allowed; }
        .btn--outline { background: transparent; color: var(--pine); }
        .btn--danger { background: var(--love); border-color: var(--love); }
        .toast { border-radius: 8px; padding: 0.75rem 1rem; margin-bottom: 1rem; display: flex; justify-content: space-between; }
        .toast__text { flex: 1; }
        .toast__close { background: none; border: none; cursor: pointer; }
        .toast--success { background: #e3f1ee; border: 2px solid var(--foam); }
        .toast--error { background: #fce8ec; border: 2px solid var(--love); color: #8b3d4d; }
        .loading { display: flex; flex-direction: column; align-items: center; padding: 2rem; }
        .loading__spinner {
            width: 40px; height: 40px; border: 4px solid var(--overlay);
            border-top-color: var(--gold); border-radius: 50%; animation: spin 1s linear infinite;
        }
        @keyframes spin { to { transform: rotate(360deg); } }
        .loading__text { margin-top: 1rem; color: var(--subtle); font-style: italic; }
        .places { background: var(--surface); border: 2px solid var(--overlay); border-radius: 12px; padding: 1rem; margin-bottom: 1rem; }
        .places__title { font-size: 1.1rem; color: var(--subtle); margin-bottom: 0.75rem; }
        .places__list { display: flex; flex-direction: column; gap: 0.35rem; }
        .place-chip { display: flex; gap: 0.5rem; align-items: center; padding: 0.35rem 0; }
        .place-chip--editing { background: var(--overlay); border-radius: 8px; padding: 0.35rem; }
        .place-chip__name { font-weight: 600; }
        .place-chip__region { color: var(--muted); font-size: 0.9rem; }
        .place-chip__input { padding: 0.35rem 0.5rem; border: 2px solid var(--overlay); border-radius: 6px; }
        .place-form { display: flex; gap: 0.5rem; margin-top: 0.75rem; flex-wrap: wrap; }
        .place-tabs { display: flex; gap: 0.5rem; flex-wrap: wrap; margin-bottom: 1.5rem; }
        .user-picker { display: flex; gap: 0.5rem; align-items: center; }
        .user-picker__label { color: var(--subtle); font-size: 0.9rem; }
        .user-picker__select { padding: 0.35rem 0.5rem; border: 2px solid var(--overlay); border-radius: 6px; background: var(--surface); }
        .icon-btn { background: none; border: none; cursor: pointer; color: var(--subtle); }
        .icon-btn--danger { color: var(--love); }
        .board { background: var(--surface); border: 2px solid var(--overlay); border-radius: 12px; padding: 1.25rem; }
        .board__header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem; }
        .board__title { color: var(--love); font-size: 1.4rem; }
        .board__list { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); }
        .board__empty { color: var(--muted); text-align: center; padding: 2rem 0; }
        .tabs { display: flex; gap: 0.5rem; margin-bottom: 1rem; }
        .tabs__tab { background: none; border: none; padding: 0.5rem 0.75rem; color: var(--subtle); cursor: pointer; border-bottom: 2px solid transparent; }
        .tabs__tab--active { color: var(--pine); border-bottom-color: var(--pine); font-weight: 600; }
        .card { border: 2px solid var(--overlay); border-radius: 10px; padding: 1rem; background: var(--base); display: flex; gap: 0.75rem; }
        .card__body { flex: 1; }
        .card__header { display: flex; justify-content: space-between; align-items: flex-start; gap: 0.5rem; }
        .card__title { font-size: 1.1rem; margin-bottom: 0.25rem; }
        .card__description { margin-top: 0.35rem; line-height: 1.5; }
        .card__link { color: var(--pine); word-break: break-all; }
        .card__meta { color: var(--subtle); font-size: 0.85rem; margin-top: 0.5rem; }
        .badge { display: inline-block; padding: 0.1rem 0.5rem; border-radius: 999px; font-size: 0.75rem; background: var(--overlay); }
        .badge--food { background: #fdf0dc; }
        .badge--hotel { background: #e3f1ee; }
        .badge--transport { background: #e4eef3; }
        .vote { display: flex; flex-direction: column; align-items: center; gap: 0.25rem; }
        .vote__score { color: var(--muted); font-weight: 700; }
        .vote__score--positive { color: var(--pine); }
        .vote__score--negative { color: var(--love); }
        .vote__btn { background: none; border: 2px solid var(--overlay); border-radius: 6px; padding: 0.2rem 0.5rem; cursor: pointer; }
        .vote__btn--up { border-color: var(--pine); background: #e3f1ee; }
        .vote__btn--down { border-color: var(--love); background: #fce8ec; }
        .dialog-backdrop { position: fixed; inset: 0; background: rgba(87, 82, 121, 0.4); display: flex; align-items: center; justify-content: center; }
        .dialog { background: var(--surface); border-radius: 12px; padding: 1.5rem; width: min(480px, 92vw); display: flex; flex-direction: column; gap: 0.75rem; }
        .dialog__title { font-size: 1.2rem; color: var(--pine); }
        .dialog__text { color: var(--subtle); }
        .dialog__input { padding: 0.5rem 0.75rem; border: 2px solid var(--overlay); border-radius: 8px; background: var(--base); font-size: 1rem; }
        .dialog__actions { display: flex; justify-content: flex-end; gap: 0.5rem; }
    "#;

    view! {
        <!DOCTYPE html>
        <html lang="de">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🧭</text></svg>"/>
                <style>{css}</style>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
