use std::time::Instant;
use surf::middleware::{Middleware, Next};
use surf::{Client, Request, Response, Result};

/// Logs every outgoing request and the status it came back with
#[derive(Debug, Default, Clone, Copy)]
pub struct SurfLogging;

#[surf::utils::async_trait]
impl Middleware for SurfLogging {
    async fn handle(&self, req: Request, client: Client, next: Next<'_>) -> Result<Response> {
        let method = req.method();
        let url = req.url().clone();
        log::debug!("{} {}", method, url);

        let start = Instant::now();
        match next.run(req, client).await {
            Ok(res) => {
                log::debug!(
                    "{} {} -> {} ({} ms)",
                    method,
                    url,
                    res.status(),
                    start.elapsed().as_millis()
                );
                Ok(res)
            }
            Err(err) => {
                log::warn!("{} {} failed: {}", method, url, err);
                Err(err)
            }
        }
    }
}
