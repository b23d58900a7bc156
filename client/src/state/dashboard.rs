//! Dashboard title, loaded lazily and renamed optimistically.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use crate::net::api::{ApiError, BoardApi};
use crate::net::types::{DEFAULT_DASHBOARD_TITLE, DashboardSettings};

/// Cached dashboard settings for the signed-in user.
#[derive(Clone, Debug, Default)]
pub struct DashboardTitle {
    settings: Option<DashboardSettings>,
    /// Displayed title. Runs ahead of `settings` while a rename is in flight.
    title: Option<String>,
}

impl DashboardTitle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The title to display. Falls back to the default before the first load.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_DASHBOARD_TITLE)
    }

    /// Server settings from the last load or successful rename.
    #[must_use]
    pub fn settings(&self) -> Option<&DashboardSettings> {
        self.settings.as_ref()
    }

    /// Fetch the settings on first call; later calls return the cached title.
    ///
    /// # Errors
    ///
    /// Returns the API error; the default title stays in place.
    pub async fn load(&mut self, api: &impl BoardApi) -> Result<&str, ApiError> {
        if self.settings.is_none() {
            match api.get_dashboard().await {
                Ok(settings) => self.accept(settings),
                Err(e) => {
                    tracing::warn!(error = %e, "dashboard load failed");
                    return Err(e);
                }
            }
        }
        Ok(self.title())
    }

    /// Show `title` immediately and return the title it replaced.
    ///
    /// Returns `None` for blank or unchanged titles, which need no request.
    pub fn begin_rename(&mut self, title: &str) -> Option<String> {
        let title = title.trim();
        if title.is_empty() || title == self.title() {
            return None;
        }
        let previous = self.title().to_owned();
        self.title = Some(title.to_owned());
        Some(previous)
    }

    /// Keep the server's settings, or put `previous` back on failure.
    ///
    /// # Errors
    ///
    /// Passes the API error through after restoring the title.
    pub fn settle_rename(
        &mut self,
        previous: String,
        result: Result<DashboardSettings, ApiError>,
    ) -> Result<(), ApiError> {
        match result {
            Ok(settings) => {
                self.accept(settings);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "dashboard rename failed; title restored");
                self.title = Some(previous);
                Err(e)
            }
        }
    }

    /// Rename the dashboard. Returns `false` when nothing needed sending.
    ///
    /// # Errors
    ///
    /// Returns the API error after restoring the previous title.
    pub async fn rename(&mut self, api: &impl BoardApi, title: &str) -> Result<bool, ApiError> {
        let Some(previous) = self.begin_rename(title) else {
            return Ok(false);
        };
        let result = api.update_dashboard(self.title()).await;
        self.settle_rename(previous, result)?;
        Ok(true)
    }

    fn accept(&mut self, settings: DashboardSettings) {
        self.title = Some(settings.title.clone());
        self.settings = Some(settings);
    }
}
