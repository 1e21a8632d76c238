use leptos::ev;
use leptos::prelude::*;
use storefront_core::search::MIN_QUERY_LEN;

use crate::state::StorefrontState;

/// Navbar search box with a dropdown of up to five matches.
#[component]
pub fn SearchBox() -> impl IntoView {
    let state = expect_context::<StorefrontState>();
    let (open, set_open) = signal(false);

    let on_input = move |ev: ev::Event| state.search(event_target_value(&ev));
    let close = move || {
        set_open.set(false);
        state.clear_search();
    };

    let results_view = move || {
        let query = state.search_query.get();
        let results = state.search_results.get();
        if !results.is_empty() {
            results
                .into_iter()
                .map(|product| {
                    view! {
                        <a href="#products" class="search-result" on:click=move |_| close()>
                            {product.image_url.clone().map(|src| {
                                view! { <img src=src alt=product.name.clone() /> }
                            })}
                            <div>
                                <p class="name">{product.name.clone()}</p>
                                <p class="price">{format!("Rs. {}", product.price)}</p>
                            </div>
                        </a>
                    }
                })
                .collect_view()
                .into_any()
        } else if query.chars().count() >= MIN_QUERY_LEN {
            view! {
                <div class="search-empty">
                    {format!("No medicines found for \"{query}\"")}
                </div>
            }
            .into_any()
        } else {
            view! {
                <div class="search-empty">"Type at least 2 characters to search"</div>
            }
            .into_any()
        }
    };

    view! {
        <div class="search">
            <button class="search-toggle" on:click=move |_| set_open.update(|o| *o = !*o)>
                "Search"
            </button>
            <Show when=move || open.get()>
                <div class="search-dropdown">
                    <input
                        type="text"
                        placeholder="Search medicines..."
                        prop:value=move || state.search_query.get()
                        on:input=on_input
                    />
                    <div class="search-results">
                        {results_view}
                    </div>
                </div>
            </Show>
        </div>
    }
}
