use std::sync::Arc;

use server_api::ApiContext;
use storage::CircuitStore;

use crate::{config::Settings, page::render_page};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) page: Arc<str>,
}

impl AppState {
    /// Composes the page once; the record set never changes after startup.
    pub(crate) fn new(store: CircuitStore, settings: &Settings) -> Self {
        let api = ApiContext {
            store,
            page_size: settings.page_size,
        };
        let page = render_page(&api, settings.layout);
        Self {
            api,
            page: page.into(),
        }
    }
}
