use serde_json::Value;

use crate::api::client::CAPACITY_ENDPOINT;
use crate::api::{MarketApi, RegionDetail};
use crate::core::CheckError;
use crate::notify::Notifier;

use super::{data_list, CheckOutcome};

/// Reports every region whose entitlement is on and whose capacity is not
/// `insufficient`. Stateless: a region that stays available is reported on
/// every check.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapacityChecker;

impl CapacityChecker {
    pub fn new() -> Self {
        Self
    }

    pub async fn check(&self, api: &dyn MarketApi, notifier: &dyn Notifier) -> CheckOutcome {
        let regions = match self.available_regions(api).await {
            Ok(regions) => regions,
            Err(e) => {
                tracing::error!("❌ Capacity check failed: {}", e);
                return CheckOutcome::Failed;
            }
        };

        if regions.is_empty() {
            return CheckOutcome::Quiet;
        }

        for region in &regions {
            tracing::info!(
                "🎉 Capacity available in {} (status: {})",
                region.region_name(),
                region.capacity_status()
            );
            let delivery = notifier.notify(&format_capacity_alert(region)).await;
            tracing::debug!("Capacity notification delivery: {:?}", delivery);
        }

        CheckOutcome::Notified(regions.len())
    }

    async fn available_regions(&self, api: &dyn MarketApi) -> Result<Vec<RegionDetail>, CheckError> {
        let body = api.capacity_listing().await?;
        let groups = data_list(&body, CAPACITY_ENDPOINT)?;

        let mut available = Vec::new();
        for group in groups {
            let details = match group.get("data") {
                Some(Value::Array(details)) if !details.is_empty() => details,
                _ => continue,
            };

            for entry in details {
                match serde_json::from_value::<RegionDetail>(entry.clone()) {
                    Ok(region) if region.is_available() => available.push(region),
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Skipping malformed region record {}: {}", entry, e),
                }
            }
        }

        Ok(available)
    }
}

pub fn format_capacity_alert(region: &RegionDetail) -> String {
    format!(
        "🎉 Entitlement and capacity available in {}!\nCapacity status: sufficient",
        region.region_name()
    )
}
