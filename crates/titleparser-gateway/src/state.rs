use std::sync::Arc;

use titleparser_resolver::Dispatcher;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<Dispatcher>,
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            shutdown: CancellationToken::new(),
        }
    }

    /// Cancelling `token` abandons in-flight resolutions.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn shutdown(&self) -> &CancellationToken {
        &self.shutdown
    }
}
