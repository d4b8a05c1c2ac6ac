//! Admin dashboard.

use foodnova_orders::DashboardStats;

use crate::api::ApiClient;
use crate::error::ClientResult;

#[derive(Debug, Clone)]
pub struct DashboardScreen {
    api: ApiClient,
}

impl DashboardScreen {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Orders and products are fetched together, then summarised.
    pub async fn load(&self) -> ClientResult<DashboardStats> {
        let (orders, products) =
            tokio::try_join!(self.api.admin_orders(), self.api.admin_products())?;
        Ok(DashboardStats::compute(&orders, &products))
    }
}
