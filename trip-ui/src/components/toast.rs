use leptos::prelude::*;
use trip_app::domain::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn success(notice: Notice) -> Self {
        Self {
            kind: ToastKind::Success,
            text: notice.message().to_string(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            text: text.into(),
        }
    }
}

#[component]
pub fn Toast(message: RwSignal<Option<ToastMessage>>) -> impl IntoView {
    move || {
        message.get().map(|toast| {
            let class = match toast.kind {
                ToastKind::Success => "toast toast--success",
                ToastKind::Error => "toast toast--error",
            };
            view! {
                <div class=class role="status">
                    <span class="toast__text">{toast.text}</span>
                    <button class="toast__close" on:click=move |_| message.set(None)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
