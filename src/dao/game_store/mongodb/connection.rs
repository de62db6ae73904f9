use std::{iter, time::Duration};

use mongodb::{Client, Database, bson::doc};
use tokio::time::sleep;
use tracing::{info, warn};

use super::{
    config::MongoConfig,
    error::{MongoDaoError, MongoResult},
};

/// How long the store keeps pinging a server that is still starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pings attempted before giving up, the first one included.
    pub max_attempts: u32,
    /// Pause after the first failed ping.
    pub initial_delay: Duration,
    /// Upper bound of the doubling pause.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Replace the attempt count and the delay cap when given.
    pub fn with_overrides(mut self, max_attempts: Option<u32>, max_delay_ms: Option<u64>) -> Self {
        if let Some(attempts) = max_attempts {
            self.max_attempts = attempts.max(1);
        }
        if let Some(ms) = max_delay_ms {
            self.max_delay = Duration::from_millis(ms);
        }
        self
    }

    fn next_delay(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_delay)
    }

    /// Pauses between consecutive pings; one fewer than `max_attempts`.
    pub fn delays(self) -> impl Iterator<Item = Duration> {
        let first = self.initial_delay.min(self.max_delay);
        iter::successors(Some(first), move |delay| Some(self.next_delay(*delay)))
            .take(self.max_attempts.saturating_sub(1) as usize)
    }
}

/// Open the configured database, waiting until the server answers a ping.
pub async fn establish_connection(config: &MongoConfig) -> MongoResult<Database> {
    let client = Client::with_options(config.options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(&config.database_name);

    let mut delays = config.retry.delays();
    let mut attempts = 0;
    loop {
        attempts += 1;
        let Err(source) = database.run_command(doc! { "ping": 1 }).await else {
            info!(database = %config.database_name, attempts, "MongoDB answered ping");
            return Ok(database);
        };

        let Some(delay) = delays.next() else {
            return Err(MongoDaoError::InitialPing { attempts, source });
        };
        warn!(
            database = %config.database_name,
            attempts,
            retry_in_ms = delay.as_millis() as u64,
            error = %source,
            "MongoDB not reachable yet"
        );
        sleep(delay).await;
    }
}
