mod api;
mod components;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatWidget;
use components::product_grid::ProductGrid;
use components::search::SearchBox;
use state::StorefrontState;

/// Root storefront component.
#[component]
fn App() -> impl IntoView {
    let state = StorefrontState::provide();

    // Load the first page and contact numbers on mount
    state.load_page(1);
    state.load_contact();

    view! {
        <header class="navbar">
            <a href="/" class="brand">"Farooq Pharmacy"</a>
            <SearchBox />
        </header>
        <main>
            {move || state.error.get().map(|err| view! { <div class="error-banner">{err}</div> })}
            <ProductGrid />
        </main>
        <ChatWidget />
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
