//! App-wide context: config, the backend client and the persisted identity.
//!
//! The identity pair lives in a platform-appropriate [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): browser local storage via [`store::LocalStore`]
//! - **Native**: a directory under the user's data dir via [`store::FileStore`]
//!
//! Components never touch storage directly. They read [`AppContext`] with
//! [`use_app`] and go through its methods, which keep the stored username and
//! the client's identity headers in step.

use api::geo::{MapboxClient, StaticMap};
use api::{AddressAutocomplete, ApiClient, LatLng};
use dioxus::prelude::*;
use store::{GatorPoolConfig, Session};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;

/// Open the identity store for this platform.
pub fn make_session() -> Session<PlatformStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Session::new(store::LocalStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("gatorpool");
        Session::new(store::FileStore::new(base))
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Session::new(store::MemoryStore::new())
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub config: GatorPoolConfig,
    client: Signal<ApiClient>,
    session: Session<PlatformStore>,
    maps: MapboxClient,
}

impl AppContext {
    /// A snapshot of the client with the current identity headers. Does not
    /// subscribe the caller, so resources do not rerun on sign-in.
    pub fn client(&self) -> ApiClient {
        self.client.peek().clone()
    }

    pub fn maps(&self) -> MapboxClient {
        self.maps.clone()
    }

    /// One per input field; each keeps its own sequence counter.
    pub fn autocomplete(&self) -> AddressAutocomplete<MapboxClient> {
        AddressAutocomplete::new(self.maps.clone(), &self.config.geocoding)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.current().is_signed_in()
    }

    /// Remember who signed in and send it on every later request.
    pub fn signed_in_as(&mut self, username: &str) {
        self.session.set_username(username);
        let identity = self.session.current();
        tracing::info!("signed in as {}", identity.username);
        let next = self.client.peek().with_identity(identity);
        self.client.set(next);
    }

    /// Forget the account locally. The device id is kept.
    pub fn signed_out(&mut self) {
        self.session.clear();
        let next = self.client.peek().with_identity(self.session.current());
        self.client.set(next);
    }

    /// Base static map with the configured style and fallback viewport.
    pub fn static_map(&self) -> StaticMap {
        StaticMap::new(
            self.config.geocoding.style.clone(),
            self.config.geocoding.access_token.clone(),
            LatLng::new(self.config.map.center_lat, self.config.map.center_lng),
            self.config.map.zoom,
        )
    }
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

/// Wraps the whole app. Generates the device id on first run.
#[component]
pub fn SessionProvider(config: GatorPoolConfig, children: Element) -> Element {
    let session = use_hook(make_session);
    let identity = use_hook(|| session.init());
    let client = use_signal(|| ApiClient::new(config.api.base_url.clone(), identity.clone()));

    use_context_provider(|| AppContext {
        maps: MapboxClient::new(config.geocoding.access_token.clone()),
        config: config.clone(),
        client,
        session: session.clone(),
    });

    rsx! {
        {children}
    }
}
