use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Dashboard views, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Dashboard,
    Analytics,
    Logs,
    Providers,
    Mappings,
    Playground,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Dashboard,
        Route::Analytics,
        Route::Logs,
        Route::Providers,
        Route::Mappings,
        Route::Playground,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Analytics => "/analytics",
            Route::Logs => "/logs",
            Route::Providers => "/providers",
            Route::Mappings => "/mappings",
            Route::Playground => "/playground",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Dashboard => "dashboard",
            Route::Analytics => "analytics",
            Route::Logs => "logs",
            Route::Providers => "providers",
            Route::Mappings => "mappings",
            Route::Playground => "playground",
        }
    }

    /// Resolves a path, ignoring a trailing slash. Unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }
}

/// Receives navigation requests from stores. Fire and forget: a navigator
/// must not block and has no way to refuse.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Forwards navigation requests to whoever owns the receiving end.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        if self.tx.send(route).is_err() {
            tracing::debug!(target: "router", route = route.name(), "navigation dropped, no listener");
        }
    }
}

/// Navigator for headless use; requests are logged and discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn navigate(&self, route: Route) {
        tracing::trace!(target: "router", route = route.name(), "navigation ignored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_from_path_normalizes_trailing_slash() {
        assert_eq!(Route::from_path("/playground/"), Some(Route::Playground));
        assert_eq!(Route::from_path(""), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn test_channel_navigator_delivers_in_order() {
        let (nav, mut rx) = ChannelNavigator::new();
        nav.navigate(Route::Logs);
        nav.navigate(Route::Playground);
        assert_eq!(rx.try_recv().ok(), Some(Route::Logs));
        assert_eq!(rx.try_recv().ok(), Some(Route::Playground));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_is_not_an_error() {
        let (nav, rx) = ChannelNavigator::new();
        drop(rx);
        nav.navigate(Route::Playground);
    }
}
