//! The signed-in account, rehydrated from the backend on every protected mount.

use api::Account;
use dioxus::prelude::*;

use crate::session::AppContext;

#[derive(Debug, Clone, PartialEq)]
pub struct AccountState {
    pub account: Option<Account>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AccountState {
    fn default() -> Self {
        Self {
            account: None,
            loading: true,
            error: None,
        }
    }
}

impl AccountState {
    /// The account, or an empty one while it is still loading.
    pub fn current(&self) -> Account {
        self.account.clone().unwrap_or_default()
    }
}

/// Returns a signal that updates whenever the account is reloaded.
pub fn use_account() -> Signal<AccountState> {
    use_context::<Signal<AccountState>>()
}

/// Load the account with dashboard extras and store it in `state`.
pub async fn reload_account(app: &AppContext, mut state: Signal<AccountState>) {
    match app.client().load_in(true).await {
        Ok(account) => {
            tracing::debug!("account loaded, driver_verified={}", account.driver_verified);
            state.set(AccountState {
                account: Some(account),
                loading: false,
                error: None,
            });
        }
        Err(e) => {
            tracing::warn!("account load failed: {}", e);
            let previous = state.peek().account.clone();
            state.set(AccountState {
                account: previous,
                loading: false,
                error: Some(e.user_message()),
            });
        }
    }
}

/// Provides [`AccountState`] to everything under the protected layout.
#[component]
pub fn AccountProvider(children: Element) -> Element {
    let state = use_signal(AccountState::default);
    use_context_provider(|| state);

    rsx! {
        {children}
    }
}
