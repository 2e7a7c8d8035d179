//! Everything a hook needs, passed in explicitly instead of read from globals.

use std::rc::Rc;

use super::api_utils::{api_base, ApiClient};
use super::config::ClientConfig;
use super::http::{GlooTransport, HttpTransport};
use super::runtime::{BrowserRuntime, Runtime};
use crate::system::auth::api::restore;
use crate::system::auth::context::SessionContext;

#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<ClientConfig>,
    pub session: SessionContext,
    pub api: ApiClient,
    pub runtime: Rc<dyn Runtime>,
}

impl AppContext {
    pub fn new(
        config: ClientConfig,
        session: SessionContext,
        transport: Rc<dyn HttpTransport>,
        runtime: Rc<dyn Runtime>,
    ) -> Self {
        let api = ApiClient::new(api_base(&config), transport, session);
        Self {
            config: Rc::new(config),
            session,
            api,
            runtime,
        }
    }

    /// Browser wiring: fetch transport, leptos task queue, stored session.
    pub fn browser(config: ClientConfig) -> Self {
        let session = SessionContext::new();
        if restore(session) {
            log::info!("session restored from storage");
        }
        Self::new(config, session, Rc::new(GlooTransport), Rc::new(BrowserRuntime))
    }

    pub fn min_visible_ms(&self) -> u32 {
        self.config.loading.min_visible_ms
    }
}
