//! Headless screens: the state each page holds and the actions it offers.
//!
//! A screen never issues a second mutation while one is in flight; a call
//! made during that window fails with [`ClientError::Busy`].

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ClientError, ClientResult};

pub mod admin_catalog;
pub mod admin_dashboard;
pub mod admin_orders;
pub mod browse;
pub mod checkout;
pub mod order_viewer;

pub use admin_catalog::CatalogAdmin;
pub use admin_dashboard::DashboardScreen;
pub use admin_orders::{AdminOrdersScreen, OrderReviewer};
pub use browse::BrowseScreen;
pub use checkout::{CheckoutOutcome, CheckoutScreen};
pub use order_viewer::OrderViewer;

/// Disables a screen's triggering control while a request is in flight.
#[derive(Debug, Default)]
pub(crate) struct InFlight(AtomicBool);

impl InFlight {
    pub(crate) fn begin(&self) -> ClientResult<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::Busy)?;
        Ok(InFlightGuard(&self.0))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub(crate) struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
