//! Port for server-driven navigation.
use crate::domain::{Redirect, ViewPath};

/// Issues the navigation that ends a successful action.
///
/// The returned [`Redirect`] must be handed back to the caller unchanged;
/// nothing in the action runs after it.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate the client to `path`.
    fn redirect(&self, path: &ViewPath) -> Redirect;
}

/// Navigator that always redirects to the requested path.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServerNavigator;

impl Navigator for ServerNavigator {
    fn redirect(&self, path: &ViewPath) -> Redirect {
        Redirect::to(path.clone())
    }
}
