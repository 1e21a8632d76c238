use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_core::order::{build_order_message, whatsapp_link, DEFAULT_PHONE, DEFAULT_WHATSAPP_NUMBER};
use storefront_core::search::MIN_QUERY_LEN;
use storefront_core::{ChatSession, ContactSettings, Page, Product, QuerySequencer};

use crate::api;

/// Shared storefront state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct StorefrontState {
    // --- Read signals (for components to subscribe to) ---
    pub page: ReadSignal<Option<Page<Product>>>,
    pub search_query: ReadSignal<String>,
    pub search_results: ReadSignal<Vec<Product>>,
    pub chat: ReadSignal<ChatSession>,
    pub contact: ReadSignal<ContactSettings>,
    pub error: ReadSignal<Option<String>>,

    // --- Write signals (for mutating state) ---
    pub set_page: WriteSignal<Option<Page<Product>>>,
    pub set_search_query: WriteSignal<String>,
    pub set_search_results: WriteSignal<Vec<Product>>,
    pub set_chat: WriteSignal<ChatSession>,
    pub set_contact: WriteSignal<ContactSettings>,
    pub set_error: WriteSignal<Option<String>>,

    search_seq: StoredValue<QuerySequencer>,
}

impl StorefrontState {
    /// Create a new `StorefrontState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (page, set_page) = signal(None::<Page<Product>>);
        let (search_query, set_search_query) = signal(String::new());
        let (search_results, set_search_results) = signal(Vec::<Product>::new());
        let (chat, set_chat) = signal(ChatSession::new());
        let (contact, set_contact) = signal(ContactSettings {
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            phone: DEFAULT_PHONE.to_string(),
        });
        let (error, set_error) = signal(None::<String>);

        let state = Self {
            page,
            search_query,
            search_results,
            chat,
            contact,
            error,
            set_page,
            set_search_query,
            set_search_results,
            set_chat,
            set_contact,
            set_error,
            search_seq: StoredValue::new(QuerySequencer::new()),
        };

        provide_context(state);
        state
    }

    /// Load one catalog page from the backend.
    pub fn load_page(&self, page: usize) {
        let state = *self;
        state.set_error.set(None);
        spawn_local(async move {
            match api::fetch_products(page).await {
                Ok(p) => state.set_page.set(Some(p)),
                Err(e) => {
                    log::error!("Failed to fetch products: {e}");
                    state.set_error.set(Some(e));
                }
            }
        });
    }

    /// Replace the defaults with the configured contact numbers.
    pub fn load_contact(&self) {
        let set_contact = self.set_contact;
        spawn_local(async move {
            match api::fetch_contact().await {
                Ok(contact) => set_contact.set(contact),
                Err(e) => log::warn!("Using default contact numbers: {e}"),
            }
        });
    }

    /// Every keystroke issues a new stamp; only the newest response is shown.
    pub fn search(&self, text: String) {
        let mut seq = 0;
        self.search_seq.update_value(|s| seq = s.issue());
        self.set_search_query.set(text.clone());

        if text.chars().count() < MIN_QUERY_LEN {
            self.set_search_results.set(Vec::new());
            return;
        }

        let search_seq = self.search_seq;
        let set_results = self.set_search_results;
        spawn_local(async move {
            match api::search_products(&text, seq).await {
                Ok(resp) if search_seq.with_value(|s| s.is_current(resp.seq)) => {
                    set_results.set(resp.results);
                }
                Ok(resp) => log::debug!("Dropping stale search response #{}", resp.seq),
                Err(e) => {
                    log::warn!("Search failed: {e}");
                    if search_seq.with_value(|s| s.is_current(seq)) {
                        set_results.set(Vec::new());
                    }
                }
            }
        });
    }

    pub fn clear_search(&self) {
        self.search(String::new());
    }

    pub fn toggle_chat(&self) {
        self.set_chat.update(|chat| chat.toggle());
    }

    /// Submit a chat turn. Ignored while a reply is pending or input is blank.
    pub fn send_message(&self, text: String) {
        let mut request = None;
        self.set_chat.update(|chat| request = chat.begin_submit(&text));
        let Some(request) = request else {
            return;
        };

        let set_chat = self.set_chat;
        spawn_local(async move {
            let outcome = api::send_chat(&request).await.map(|r| r.reply);
            if let Err(e) = &outcome {
                log::error!("Chat request failed: {e}");
            }
            set_chat.update(|chat| {
                chat.resolve(outcome);
            });
        });
    }

    /// Open a prefilled WhatsApp order for `product` in a new tab.
    pub fn order(&self, product: &Product) {
        let message = build_order_message(product);
        let encoded = String::from(js_sys::encode_uri_component(&message));
        let url = whatsapp_link(&self.contact.get_untracked().whatsapp_number, &encoded);
        if let Err(e) = window().open_with_url_and_target(&url, "_blank") {
            log::error!("Failed to open order link: {e:?}");
        }
    }
}
