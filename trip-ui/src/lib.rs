pub mod components;
pub mod pages;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use pages::PlacesPage;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Orte & Vorschläge | Reiseplaner"/>
        <Meta name="description" content="Orte sammeln, Vorschläge machen und gemeinsam abstimmen"/>

        <Router>
            <main class="container">
                <Routes fallback=|| "Seite nicht gefunden">
                    <Route path=path!("/") view=PlacesPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
