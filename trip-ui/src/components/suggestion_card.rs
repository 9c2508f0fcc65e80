use leptos::prelude::*;
use trip_app::domain::{Category, ScoredSuggestion, VoteValue};
use uuid::Uuid;

fn category_class(category: Category) -> &'static str {
    match category {
        Category::Activity => "badge badge--activity",
        Category::Food => "badge badge--food",
        Category::Hotel => "badge badge--hotel",
        Category::Transport => "badge badge--transport",
        Category::Other => "badge badge--other",
    }
}

fn score_class(score: i32) -> &'static str {
    if score > 0 {
        "vote__score vote__score--positive"
    } else if score < 0 {
        "vote__score vote__score--negative"
    } else {
        "vote__score"
    }
}

#[component]
pub fn SuggestionCard(
    suggestion: ScoredSuggestion,
    current_user: Option<Uuid>,
    #[prop(into)] on_vote: Callback<(Uuid, VoteValue)>,
    #[prop(into)] on_delete: Callback<Uuid>,
) -> impl IntoView {
    let id = suggestion.id();
    let user_vote = current_user.and_then(|user| suggestion.vote_of(user));
    let score = suggestion.score;
    let creator = suggestion
        .creator_name
        .clone()
        .unwrap_or_else(|| "Unbekannt".to_string());
    let created = suggestion
        .suggestion
        .created_at
        .map(|at| at.format("%d.%m.%Y").to_string());
    let up_class = if user_vote == Some(VoteValue::Up) {
        "vote__btn vote__btn--up"
    } else {
        "vote__btn"
    };
    let down_class = if user_vote == Some(VoteValue::Down) {
        "vote__btn vote__btn--down"
    } else {
        "vote__btn"
    };
    let s = suggestion.suggestion;

    view! {
        <article class="card">
            <div class="vote">
                <button
                    class=up_class
                    title="Dafür"
                    on:click=move |_| on_vote.run((id, VoteValue::Up))
                >
                    "👍"
                </button>
                <span class={score_class(score)}>{score}</span>
                <button
                    class=down_class
                    title="Dagegen"
                    on:click=move |_| on_vote.run((id, VoteValue::Down))
                >
                    "👎"
                </button>
            </div>
            <div class="card__body">
                <div class="card__header">
                    <h3 class="card__title">{s.title}</h3>
                    <span class={category_class(s.category)}>{s.category.label()}</span>
                </div>
                {s.description.map(|d| view! { <p class="card__description">{d}</p> })}
                <div class="card__meta">
                    {s.cost_estimate.map(|c| view! { <span>"~" {c}</span> })}
                    {s.link.map(|href| view! {
                        <a href=href target="_blank" rel="noopener noreferrer" class="card__link">"Link"</a>
                    })}
                    <span>"von " {creator}</span>
                    {created.map(|d| view! { <span>{d}</span> })}
                    <button
                        class="icon-btn icon-btn--danger card__delete"
                        title="Löschen"
                        on:click=move |_| on_delete.run(id)
                    >
                        "🗑"
                    </button>
                </div>
            </div>
        </article>
    }
}
