//! Navigation by [`Page`].
//!
//! The route enum lives in the platform crate, so shared views cannot name
//! it. The platform installs a [`PageNavigator`] inside its router that turns
//! a [`Page`] into one of its routes; views only ever see pages.

use dioxus::prelude::*;

use crate::screen::Page;

#[derive(Clone, Copy)]
pub struct PageNavigator {
    push: Callback<Page>,
    replace: Callback<Page>,
}

impl PageNavigator {
    pub fn push(&self, page: Page) {
        tracing::debug!("navigate to {}", page.path());
        self.push.call(page);
    }

    /// Navigate without leaving a history entry, e.g. for redirects.
    pub fn replace(&self, page: Page) {
        tracing::debug!("redirect to {}", page.path());
        self.replace.call(page);
    }
}

pub fn use_pages() -> PageNavigator {
    use_context::<PageNavigator>()
}

/// Install the navigator. Must be rendered inside the platform's router.
pub fn provide_pages(push: impl FnMut(Page) + 'static, replace: impl FnMut(Page) + 'static) -> PageNavigator {
    let push = use_callback(push);
    let replace = use_callback(replace);
    use_context_provider(|| PageNavigator { push, replace })
}
