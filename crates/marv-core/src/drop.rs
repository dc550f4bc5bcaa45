//! The drop operation: remove the history-tracking store.

use crate::driver::Driver;
use crate::error::{CoreError, CoreResult};

/// Remove the driver's history-tracking store.
///
/// A connect failure propagates immediately. Once connected, disconnect is
/// always attempted; a drop failure is preferred over a disconnect failure.
pub async fn drop(driver: &dyn Driver) -> CoreResult<()> {
    log::debug!("Connecting driver");
    driver.connect().await.map_err(CoreError::from)?;

    log::debug!("Dropping migrations");
    let dropped = driver.drop_migrations().await;
    log::debug!("Disconnecting driver");
    let disconnected = driver.disconnect().await;

    dropped.and(disconnected).map_err(CoreError::from)
}

#[cfg(test)]
#[path = "drop_test.rs"]
mod tests;
