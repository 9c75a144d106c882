//! HTTP server for the triage service
//!
//! - `GET /health` - service identity, always 200
//! - `GET /` - static form page
//! - `POST /predict` - triage a JSON body, 422 on validation failure

mod rejection;
mod routes;

pub use routes::routes;

use crate::config::ServerSection;
use crate::error::TriageResult;
use std::future::Future;
use tracing::info;

/// Triage HTTP server bound from a [`ServerSection`]
pub struct TriageServer {
    config: ServerSection,
}

impl TriageServer {
    pub fn new(config: ServerSection) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerSection {
        &self.config
    }

    /// Bind and serve until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> TriageResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.socket_addr()?;
        let (bound, server) = warp::serve(routes(self.config.body_limit_bytes))
            .try_bind_with_graceful_shutdown(addr, shutdown)?;

        info!("Triage API listening on http://{}", bound);
        server.await;
        info!("Triage API stopped");

        Ok(())
    }
}
