// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The panel client.
//!
//! [`Lupusec`] ties the transport, the polling cache, the device registry
//! and the history log together. Reads poll the panel (at most once per
//! endpoint within the cache TTL) and reconcile the answer into the
//! registry; writes post to the panel and update the registry once the
//! panel accepts them.
//!
//! A cached payload is reconciled once. Until that succeeds, every read
//! decodes it again, so a payload that fails to decode keeps failing for
//! as long as it is cached.
//!
//! ```no_run
//! use lupusec_lib::Lupusec;
//!
//! # async fn example() -> lupusec_lib::Result<()> {
//! let mut panel = Lupusec::http("192.168.1.50")
//!     .with_credentials("admin", "secret")
//!     .build()
//!     .await?;
//!
//! for area in panel.areas().await? {
//!     println!("{area}");
//! }
//!
//! if panel.set_armed(1).await? {
//!     println!("Area 1 armed");
//! }
//! # Ok(())
//! # }
//! ```

mod builder;

use std::collections::HashSet;

pub use builder::LupusecBuilder;

use crate::cache::PollingCache;
use crate::device::{Area, BinarySensor, Device, PowerSwitch, classify, classify_switch};
use crate::error::{DeviceError, Error};
use crate::history::HistoryLog;
use crate::protocol::{ApiResponse, Endpoint, HttpClient, HttpConfig, Protocol};
use crate::registry::DeviceRegistry;
use crate::response::{
    ActionResult, DeviceListResponse, HistoryResponse, HistoryRow, PanelCondResponse,
    PowerSwitchListResponse,
};
use crate::types::{AreaMode, DeviceId, DeviceKind, HomeLevel, PanelModel, SwitchStatus};

/// Client for a Lupusec alarm panel.
///
/// The type parameter is the transport; it defaults to [`HttpClient`].
/// All operations take `&mut self`: the client is meant to be driven by a
/// single caller.
#[derive(Debug)]
pub struct Lupusec<P: Protocol = HttpClient> {
    protocol: P,
    model: PanelModel,
    cache: PollingCache<Endpoint, ApiResponse>,
    reconciled: HashSet<Endpoint>,
    registry: DeviceRegistry,
    history: HistoryLog,
}

impl Lupusec<HttpClient> {
    /// Starts building a client for the panel at `host`.
    #[must_use]
    pub fn http(host: impl Into<String>) -> LupusecBuilder {
        LupusecBuilder::new(HttpConfig::new(host))
    }

    /// Starts building a client from a full HTTP configuration.
    #[must_use]
    pub fn http_config(config: HttpConfig) -> LupusecBuilder {
        LupusecBuilder::new(config)
    }
}

impl<P: Protocol> Lupusec<P> {
    pub(crate) fn from_parts(
        protocol: P,
        model: PanelModel,
        cache: PollingCache<Endpoint, ApiResponse>,
        history: HistoryLog,
    ) -> Self {
        Self {
            protocol,
            model,
            cache,
            reconciled: HashSet::new(),
            registry: DeviceRegistry::new(),
            history,
        }
    }

    /// Returns the panel firmware family.
    #[must_use]
    pub fn model(&self) -> PanelModel {
        self.model
    }

    /// Returns the transport.
    #[must_use]
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Returns the devices as of the last poll, without polling.
    #[must_use]
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Returns the history log.
    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    // ========== Fetching ==========

    /// Returns the response of a read endpoint, served from the cache while
    /// it is fresh.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails.
    pub async fn fetch(&mut self, endpoint: Endpoint) -> Result<ApiResponse, Error> {
        if !self.cache.is_fresh(&endpoint) {
            self.reconciled.remove(&endpoint);
        }
        let protocol = &self.protocol;
        let response = self
            .cache
            .get_or_fetch(endpoint, || protocol.get(endpoint))
            .await?;
        Ok(response)
    }

    /// Like [`fetch`](Self::fetch), but returns `None` when the cached
    /// payload has already been reconciled into the registry.
    async fn fetch_unreconciled(
        &mut self,
        endpoint: Endpoint,
    ) -> Result<Option<ApiResponse>, Error> {
        if self.cache.is_fresh(&endpoint) && self.reconciled.contains(&endpoint) {
            tracing::trace!(endpoint = %endpoint, "Serving from cache");
            return Ok(None);
        }
        self.fetch(endpoint).await.map(Some)
    }

    /// Fetches the panel condition.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be parsed.
    pub async fn fetch_panel(&mut self) -> Result<PanelCondResponse, Error> {
        Ok(self.fetch(Endpoint::Panel).await?.parse()?)
    }

    /// Fetches the sensor rows from the list matching the panel model.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be parsed.
    pub async fn fetch_sensors(&mut self) -> Result<DeviceListResponse, Error> {
        let endpoint = self.model.sensor_endpoint();
        Ok(self.fetch(endpoint).await?.parse()?)
    }

    /// Fetches the power switch rows.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be parsed.
    pub async fn fetch_power_switches(&mut self) -> Result<PowerSwitchListResponse, Error> {
        Ok(self.fetch(Endpoint::PowerSwitches).await?.parse()?)
    }

    /// Fetches the latest history rows.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be parsed.
    pub async fn fetch_history(&mut self) -> Result<Vec<HistoryRow>, Error> {
        let history: HistoryResponse = self.fetch(Endpoint::History).await?.parse()?;
        Ok(history.hisrows)
    }

    // ========== Polling ==========

    /// Polls the panel condition and updates the areas.
    ///
    /// When a new panel payload is reconciled, the history is checked for
    /// new alarm entries as well. A payload that was already reconciled
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Returns error if the panel request fails or reports an unknown mode.
    pub async fn poll_panel(&mut self) -> Result<(), Error> {
        let Some(response) = self.fetch_unreconciled(Endpoint::Panel).await? else {
            return Ok(());
        };
        let panel: PanelCondResponse = response.parse()?;
        self.registry.reconcile_panel(&panel.areas()?)?;
        self.reconciled.insert(Endpoint::Panel);
        self.check_history().await;
        Ok(())
    }

    /// Polls the sensor list and updates the binary sensors.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or a row cannot be decoded.
    pub async fn poll_sensors(&mut self) -> Result<(), Error> {
        let endpoint = self.model.sensor_endpoint();
        let Some(response) = self.fetch_unreconciled(endpoint).await? else {
            return Ok(());
        };
        let list: DeviceListResponse = response.parse()?;
        let devices = self.registry.reconcile(&list.senrows, classify)?;
        self.reconciled.insert(endpoint);
        tracing::debug!(devices = devices.len(), "Sensors polled");
        Ok(())
    }

    /// Polls the power switch list and updates the switches.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or a row cannot be decoded.
    pub async fn poll_switches(&mut self) -> Result<(), Error> {
        let Some(response) = self.fetch_unreconciled(Endpoint::PowerSwitches).await? else {
            return Ok(());
        };
        let list: PowerSwitchListResponse = response.parse()?;
        let devices = self.registry.reconcile(&list.pssrows, classify_switch)?;
        self.reconciled.insert(Endpoint::PowerSwitches);
        tracing::debug!(devices = devices.len(), "Power switches polled");
        Ok(())
    }

    /// Polls the panel, sensors and switches.
    ///
    /// # Errors
    ///
    /// Returns the first polling error.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.poll_panel().await?;
        self.poll_sensors().await?;
        self.poll_switches().await
    }

    async fn check_history(&mut self) {
        let rows = match self.fetch_history().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Could not check alarm history: {e}");
                return;
            }
        };

        let new_rows = self.history.record_new(rows);

        for area in self.registry.areas_mut() {
            area.set_history_alarm(false);
        }

        for row in new_rows.iter().filter(|row| row.is_alarm_trigger()) {
            match row.area() {
                Some(number) => {
                    tracing::warn!(area = number, "Alarm triggered");
                    if let Some(area) = self.registry.area_mut(number) {
                        area.set_history_alarm(true);
                    }
                }
                None => {
                    tracing::warn!("Alarm triggered");
                    for area in self.registry.areas_mut() {
                        area.set_history_alarm(true);
                    }
                }
            }
        }

        if !new_rows.is_empty()
            && let Err(e) = self.history.save()
        {
            tracing::error!("Failed to save history log: {e}");
        }
    }

    // ========== Reading ==========

    /// Refreshes everything and returns the registry.
    ///
    /// # Errors
    ///
    /// Returns the first polling error.
    pub async fn devices(&mut self) -> Result<&DeviceRegistry, Error> {
        self.refresh().await?;
        Ok(&self.registry)
    }

    /// Refreshes everything and returns one device.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if no device has this id.
    pub async fn device(&mut self, id: impl Into<DeviceId>) -> Result<&Device, Error> {
        let id = id.into();
        self.refresh().await?;
        self.registry.get(&id).ok_or(Error::DeviceNotFound(id))
    }

    /// Polls the panel and returns all areas.
    ///
    /// # Errors
    ///
    /// Returns error if the panel poll fails.
    pub async fn areas(&mut self) -> Result<Vec<&Area>, Error> {
        self.poll_panel().await?;
        Ok(self.registry.areas().collect())
    }

    /// Polls the panel and returns one area.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the panel does not report the area.
    pub async fn area(&mut self, number: u8) -> Result<&Area, Error> {
        self.poll_panel().await?;
        self.registry
            .area(number)
            .ok_or_else(|| Error::DeviceNotFound(DeviceId::area(number)))
    }

    /// Polls the sensor list and returns all binary sensors.
    ///
    /// # Errors
    ///
    /// Returns error if the sensor poll fails.
    pub async fn binary_sensors(&mut self) -> Result<Vec<&BinarySensor>, Error> {
        self.poll_sensors().await?;
        Ok(self.registry.binary_sensors().collect())
    }

    /// Polls the power switch list and returns all switches.
    ///
    /// # Errors
    ///
    /// Returns error if the switch poll fails.
    pub async fn switches(&mut self) -> Result<Vec<&PowerSwitch>, Error> {
        self.poll_switches().await?;
        Ok(self.registry.switches().collect())
    }

    // ========== Alarm Control ==========

    /// Sets the mode of an area.
    ///
    /// Returns `Ok(false)` if the panel rejected the request; the area then
    /// keeps its previous mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the panel does not report the area,
    /// or an error if the request fails.
    pub async fn set_mode(&mut self, area: u8, mode: AreaMode) -> Result<bool, Error> {
        if self.registry.area(area).is_none() {
            self.poll_panel().await?;
        }
        if self.registry.area(area).is_none() {
            return Err(Error::DeviceNotFound(DeviceId::area(area)));
        }

        let params = [("mode", mode.code().to_string()), ("area", area.to_string())];
        let result: ActionResult = self
            .protocol
            .post(Endpoint::SetMode, &params)
            .await?
            .parse()?;

        if !result.is_success() {
            tracing::warn!(
                area,
                mode = %mode,
                code = ?result.code(),
                message = result.message(),
                "Panel rejected mode change"
            );
            return Ok(false);
        }

        if let Some(target) = self.registry.area_mut(area) {
            target.set_mode(mode);
        }
        tracing::info!(area, mode = %mode, "Mode changed");
        Ok(true)
    }

    /// Arms an area.
    ///
    /// # Errors
    ///
    /// See [`set_mode`](Self::set_mode).
    pub async fn set_armed(&mut self, area: u8) -> Result<bool, Error> {
        self.set_mode(area, AreaMode::Armed).await
    }

    /// Disarms an area.
    ///
    /// # Errors
    ///
    /// See [`set_mode`](Self::set_mode).
    pub async fn set_disarmed(&mut self, area: u8) -> Result<bool, Error> {
        self.set_mode(area, AreaMode::Disarmed).await
    }

    /// Puts an area into home mode 1, 2 or 3.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for any other level, before anything is sent.
    /// See [`set_mode`](Self::set_mode) for the rest.
    pub async fn set_home(&mut self, area: u8, level: u8) -> Result<bool, Error> {
        let level = HomeLevel::new(level)?;
        self.set_mode(area, AreaMode::home(level)).await
    }

    // ========== Switch Control ==========

    /// Turns a power switch on.
    ///
    /// Returns `Ok(false)` if the panel rejected the request; the switch
    /// then keeps its previous status.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` for an unknown id,
    /// `DeviceError::WrongKind` if the id is not a switch, or an error if
    /// the request fails.
    pub async fn switch_on(&mut self, id: impl Into<DeviceId>) -> Result<bool, Error> {
        self.set_switch(id.into(), SwitchStatus::On).await
    }

    /// Turns a power switch off.
    ///
    /// # Errors
    ///
    /// See [`switch_on`](Self::switch_on).
    pub async fn switch_off(&mut self, id: impl Into<DeviceId>) -> Result<bool, Error> {
        self.set_switch(id.into(), SwitchStatus::Off).await
    }

    async fn set_switch(&mut self, id: DeviceId, status: SwitchStatus) -> Result<bool, Error> {
        if !self.registry.contains(&id) {
            self.poll_switches().await?;
        }
        match self.registry.get(&id) {
            Some(Device::Switch(_)) => {}
            Some(other) => {
                return Err(DeviceError::WrongKind {
                    id,
                    kind: other.kind_name(),
                    expected: DeviceKind::Switch.as_str(),
                }
                .into());
            }
            None => return Err(Error::DeviceNotFound(id)),
        }

        let switch = if status.is_on() { "1" } else { "0" };
        let params = [("id", id.to_string()), ("switch", switch.to_string())];
        let result: ActionResult = self
            .protocol
            .post(Endpoint::SwitchPower, &params)
            .await?
            .parse()?;

        if !result.is_success() {
            tracing::warn!(
                %id,
                status = %status,
                code = ?result.code(),
                message = result.message(),
                "Panel rejected switch request"
            );
            return Ok(false);
        }

        if let Some(target) = self.registry.switch_mut(&id) {
            target.set_status(status);
        }
        tracing::info!(%id, status = %status, "Switch changed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    use super::*;
    use crate::clock::ManualClock;
    use crate::error::{ParseError, ProtocolError};

    /// Transport answering from canned bodies and recording requests.
    #[derive(Debug, Default)]
    struct FakePanel {
        gets: Cell<usize>,
        posts: RefCell<Vec<(Endpoint, Vec<(String, String)>)>>,
        panel: RefCell<String>,
        post_result: Cell<i64>,
    }

    impl FakePanel {
        fn with_panel(mode: &str) -> Self {
            let fake = Self::default();
            fake.set_panel(mode);
            fake.post_result.set(1);
            fake
        }

        fn set_panel(&self, mode: &str) {
            *self.panel.borrow_mut() =
                format!(r#"{{"updates": {{"mode_a1": "{mode}", "alarm_ex": 0}}}}"#);
        }
    }

    impl Protocol for FakePanel {
        async fn get(&self, endpoint: Endpoint) -> Result<ApiResponse, ProtocolError> {
            self.gets.set(self.gets.get() + 1);
            let body = match endpoint {
                Endpoint::Panel => self.panel.borrow().clone(),
                Endpoint::History => r#"{"hisrows": []}"#.to_string(),
                Endpoint::PowerSwitches => {
                    r#"{"pssrows": [{"id": "9", "name": "Lamp", "status": "{WEB_MSG_PSS_OFF}"}]}"#
                        .to_string()
                }
                _ => {
                    return Err(ProtocolError::Status {
                        endpoint: endpoint.to_string(),
                        status: 404,
                    });
                }
            };
            Ok(ApiResponse::new(body))
        }

        async fn post(
            &self,
            endpoint: Endpoint,
            params: &[(&str, String)],
        ) -> Result<ApiResponse, ProtocolError> {
            self.posts.borrow_mut().push((
                endpoint,
                params
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), v.clone()))
                    .collect(),
            ));
            Ok(ApiResponse::new(format!(
                r#"{{"result": {}, "message": ""}}"#,
                self.post_result.get()
            )))
        }
    }

    fn client(fake: FakePanel) -> (Lupusec<FakePanel>, ManualClock) {
        let clock = ManualClock::new();
        let lupusec = Lupusec::http("unused")
            .without_history()
            .with_clock(clock.clone())
            .build_with_protocol(fake);
        (lupusec, clock)
    }

    #[tokio::test]
    async fn cache_hit_does_not_revert_local_mode() {
        let (mut lupusec, _clock) = client(FakePanel::with_panel("{AREA_MODE_0}"));
        lupusec.poll_panel().await.unwrap();

        assert!(lupusec.set_armed(1).await.unwrap());
        let area = lupusec.area(1).await.unwrap();
        assert_eq!(area.mode(), AreaMode::Armed);
    }

    #[tokio::test]
    async fn expired_cache_reads_panel_again() {
        let (mut lupusec, clock) = client(FakePanel::with_panel("{AREA_MODE_0}"));
        lupusec.poll_panel().await.unwrap();
        lupusec.protocol().set_panel("{AREA_MODE_1}");

        clock.advance(Duration::from_secs(3));
        assert_eq!(lupusec.area(1).await.unwrap().mode(), AreaMode::Armed);
    }

    #[tokio::test]
    async fn set_mode_posts_code_and_area() {
        let (mut lupusec, _clock) = client(FakePanel::with_panel("{AREA_MODE_0}"));
        assert!(lupusec.set_home(1, 3).await.unwrap());

        let posts = lupusec.protocol().posts.borrow();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, Endpoint::SetMode);
        assert_eq!(
            posts[0].1,
            vec![
                ("mode".to_string(), "4".to_string()),
                ("area".to_string(), "1".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn invalid_home_level_sends_nothing() {
        let (mut lupusec, _clock) = client(FakePanel::with_panel("{AREA_MODE_0}"));
        let err = lupusec.set_home(1, 4).await.unwrap_err();
        assert!(matches!(err, Error::Value(_)));
        assert_eq!(lupusec.protocol().gets.get(), 0);
        assert!(lupusec.protocol().posts.borrow().is_empty());
    }

    #[tokio::test]
    async fn rejected_mode_change_keeps_mode() {
        let fake = FakePanel::with_panel("{AREA_MODE_0}");
        fake.post_result.set(0);
        let (mut lupusec, _clock) = client(fake);

        assert!(!lupusec.set_armed(1).await.unwrap());
        assert!(lupusec.registry().area(1).unwrap().is_disarmed());
    }

    #[tokio::test]
    async fn unknown_area_is_not_found() {
        let (mut lupusec, _clock) = client(FakePanel::with_panel("{AREA_MODE_0}"));
        let err = lupusec.set_armed(2).await.unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(id) if id == DeviceId::area(2)));
        assert!(lupusec.protocol().posts.borrow().is_empty());
    }

    #[tokio::test]
    async fn switch_on_updates_status() {
        let (mut lupusec, _clock) = client(FakePanel::with_panel("{AREA_MODE_0}"));
        assert!(lupusec.switch_on("9").await.unwrap());

        let switches = lupusec.switches().await.unwrap();
        assert_eq!(switches.len(), 1);
        assert!(switches[0].is_on());
    }

    #[tokio::test]
    async fn switching_an_area_is_wrong_kind() {
        let (mut lupusec, _clock) = client(FakePanel::with_panel("{AREA_MODE_0}"));
        lupusec.poll_panel().await.unwrap();
        let err = lupusec.switch_off(DeviceId::area(1)).await.unwrap_err();
        assert!(matches!(err, Error::Device(DeviceError::WrongKind { .. })));
    }

    #[tokio::test]
    async fn decode_error_repeats_while_cached() {
        let (mut lupusec, _clock) = client(FakePanel::with_panel("{AREA_MODE_9}"));

        let first = lupusec.areas().await.unwrap_err();
        assert!(matches!(first, Error::Parse(ParseError::InvalidState { .. })));
        let second = lupusec.areas().await.unwrap_err();
        assert!(matches!(second, Error::Parse(ParseError::InvalidState { .. })));

        assert_eq!(lupusec.protocol().gets.get(), 1);
        assert!(lupusec.registry().is_empty());
    }

    #[tokio::test]
    async fn decode_error_clears_after_refetch() {
        let (mut lupusec, clock) = client(FakePanel::with_panel("{AREA_MODE_9}"));
        assert!(lupusec.areas().await.is_err());

        lupusec.protocol().set_panel("{AREA_MODE_1}");
        clock.advance(Duration::from_secs(3));
        assert_eq!(lupusec.area(1).await.unwrap().mode(), AreaMode::Armed);
    }

    #[tokio::test]
    async fn fetched_panel_is_reconciled_on_next_read() {
        let (mut lupusec, _clock) = client(FakePanel::with_panel("{AREA_MODE_1}"));
        lupusec.fetch_panel().await.unwrap();
        assert!(lupusec.registry().is_empty());

        let areas = lupusec.areas().await.unwrap();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].number(), 1);
        assert!(lupusec.set_disarmed(1).await.unwrap());
        // panel and history, nothing more
        assert_eq!(lupusec.protocol().gets.get(), 2);
    }

    #[tokio::test]
    async fn fetched_switches_are_reconciled_before_switching() {
        let (mut lupusec, _clock) = client(FakePanel::with_panel("{AREA_MODE_0}"));
        lupusec.fetch_power_switches().await.unwrap();

        assert!(lupusec.switch_on("9").await.unwrap());
        assert_eq!(lupusec.protocol().gets.get(), 1);
        assert!(lupusec.registry().get(&DeviceId::new("9")).unwrap().is_on());
    }

    #[tokio::test]
    async fn sensor_poll_error_keeps_areas() {
        let (mut lupusec, _clock) = client(FakePanel::with_panel("{AREA_MODE_2}"));
        assert!(lupusec.poll_panel().await.is_ok());
        assert!(lupusec.poll_sensors().await.is_err());
        assert!(lupusec.registry().area(1).unwrap().is_home());
    }
}
