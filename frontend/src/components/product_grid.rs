use leptos::prelude::*;
use storefront_core::Product;

use crate::state::StorefrontState;

/// Paged product grid with per-product WhatsApp order buttons.
#[component]
pub fn ProductGrid() -> impl IntoView {
    let state = expect_context::<StorefrontState>();

    view! {
        <section id="products" class="product-grid">
            <h2>"Our Medicines"</h2>
            {move || match state.page.get() {
                None => view! { <div class="loading">"Loading products..."</div> }.into_any(),
                Some(page) if page.items.is_empty() => {
                    view! { <div class="empty-state">"No products available yet"</div> }.into_any()
                }
                Some(page) => view! {
                    <div class="grid">
                        {page.items.into_iter().map(|product| view! { <ProductCard product=product /> }).collect_view()}
                    </div>
                    <Pager current=page.page total=page.total_pages />
                }
                .into_any(),
            }}
        </section>
    }
}

#[component]
fn ProductCard(product: Product) -> impl IntoView {
    let state = expect_context::<StorefrontState>();
    let on_order = {
        let product = product.clone();
        move |_| state.order(&product)
    };

    view! {
        <div class="product-card">
            {product.image_url.clone().map(|src| view! { <img src=src alt=product.name.clone() /> })}
            <h3>{product.name.clone()}</h3>
            {product.description.clone().map(|d| view! { <p class="description">{d}</p> })}
            <p class="price">{format!("Rs. {}", product.price)}</p>
            <button class="order-btn" on:click=on_order>"Order on WhatsApp"</button>
        </div>
    }
}

/// Hidden when everything fits on one page.
#[component]
fn Pager(current: usize, total: usize) -> impl IntoView {
    let state = expect_context::<StorefrontState>();
    if total <= 1 {
        return ().into_any();
    }

    let go = move |page: usize| move |_| state.load_page(page);

    view! {
        <nav class="pager">
            <button disabled={current == 1} on:click={go(current.saturating_sub(1).max(1))}>
                "Previous"
            </button>
            {(1..=total)
                .map(|n| {
                    let css_class = if n == current { "page-btn active" } else { "page-btn" };
                    view! { <button class=css_class on:click={go(n)}>{n}</button> }
                })
                .collect_view()}
            <button disabled={current == total} on:click={go((current + 1).min(total))}>
                "Next"
            </button>
        </nav>
    }
    .into_any()
}
