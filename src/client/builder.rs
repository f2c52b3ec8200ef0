// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client builder.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::PollingCache;
use crate::client::Lupusec;
use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::history::HistoryLog;
use crate::protocol::{HttpClient, HttpConfig, Protocol};
use crate::types::PanelModel;

#[derive(Debug, Clone)]
enum HistorySource {
    HomeDirectory,
    File(PathBuf),
    Disabled,
}

/// Builder for a [`Lupusec`] client.
///
/// Created by [`Lupusec::http`] or [`Lupusec::http_config`].
///
/// # Examples
///
/// ```no_run
/// use lupusec_lib::Lupusec;
/// use lupusec_lib::types::PanelModel;
///
/// # async fn example() -> lupusec_lib::Result<()> {
/// // Polls the panel once before returning
/// let panel = Lupusec::http("192.168.1.50")
///     .with_credentials("admin", "secret")
///     .with_model(PanelModel::Xt2)
///     .build()
///     .await?;
///
/// // No network access until the first call
/// let panel = Lupusec::http("192.168.1.50")
///     .with_credentials("admin", "secret")
///     .without_history()
///     .build_without_probe()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LupusecBuilder {
    config: HttpConfig,
    model: PanelModel,
    history: HistorySource,
    clock: Arc<dyn Clock>,
    cache_ttl: Duration,
}

impl LupusecBuilder {
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self {
            config,
            model: PanelModel::default(),
            history: HistorySource::HomeDirectory,
            clock: Arc::new(SystemClock),
            cache_ttl: PollingCache::<(), ()>::DEFAULT_TTL,
        }
    }

    /// Sets the Basic Auth credentials of the web interface.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.config = self.config.with_credentials(username, password);
        self
    }

    /// Sets the HTTP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Sets the panel firmware family. Defaults to XT1.
    #[must_use]
    pub fn with_model(mut self, model: PanelModel) -> Self {
        self.model = model;
        self
    }

    /// Stores the history log at `path` instead of the home directory.
    #[must_use]
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history = HistorySource::File(path.into());
        self
    }

    /// Keeps the history log in memory only.
    #[must_use]
    pub fn without_history(mut self) -> Self {
        self.history = HistorySource::Disabled;
        self
    }

    /// Replaces the time source of the polling cache.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Sets how long poll responses are reused. Defaults to two seconds.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Returns the HTTP configuration.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the client and polls the panel, sensors and switches once.
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be created or the first poll
    /// fails.
    pub async fn build(self) -> Result<Lupusec<HttpClient>, Error> {
        let mut lupusec = self.build_without_probe()?;
        lupusec.refresh().await?;
        Ok(lupusec)
    }

    /// Builds the client without contacting the panel.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build_without_probe(self) -> Result<Lupusec<HttpClient>, Error> {
        let client = self.config.clone().into_client()?;
        Ok(self.build_with_protocol(client))
    }

    /// Builds a client on top of another transport, without contacting the
    /// panel.
    ///
    /// The HTTP settings of this builder are ignored.
    #[must_use]
    pub fn build_with_protocol<P: Protocol>(self, protocol: P) -> Lupusec<P> {
        let history = match self.history {
            HistorySource::File(path) => HistoryLog::load(path),
            HistorySource::Disabled => HistoryLog::in_memory(),
            HistorySource::HomeDirectory => {
                if let Some(path) = HistoryLog::default_path() {
                    HistoryLog::load(path)
                } else {
                    tracing::warn!("Could not determine home directory, history is not persisted");
                    HistoryLog::in_memory()
                }
            }
        };
        let cache = PollingCache::new(self.cache_ttl, self.clock);
        Lupusec::from_parts(protocol, self.model, cache, history)
    }
}
