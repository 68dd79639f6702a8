use crate::api::client::STORE_ENDPOINT;
use crate::api::{ItemKey, MarketApi, StoreItem};
use crate::core::CheckError;
use crate::notify::Notifier;

use super::recency_cache::RecencyCache;
use super::{data_list, CheckOutcome};

/// Detects marketplace listings that have not been seen before and reports them
/// in one aggregated message.
pub struct StoreChecker {
    cache: RecencyCache<ItemKey>,
}

impl StoreChecker {
    pub fn new(cache: RecencyCache<ItemKey>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &RecencyCache<ItemKey> {
        &self.cache
    }

    pub async fn check(&mut self, api: &dyn MarketApi, notifier: &dyn Notifier) -> CheckOutcome {
        match self.detect_new_items(api).await {
            Ok(items) if items.is_empty() => CheckOutcome::Quiet,
            Ok(items) => {
                tracing::info!("🆕 {} new store item(s) detected", items.len());
                let delivery = notifier.notify(&format_new_items(&items)).await;
                tracing::debug!("Store notification delivery: {:?}", delivery);
                CheckOutcome::Notified(1)
            }
            Err(e) => {
                tracing::error!("❌ Store check failed: {}", e);
                CheckOutcome::Failed
            }
        }
    }

    /// Items whose id was observed for the first time, in listing order. The
    /// cache is left untouched unless the payload has the expected shape.
    async fn detect_new_items(&mut self, api: &dyn MarketApi) -> Result<Vec<StoreItem>, CheckError> {
        let body = api.store_listing().await?;
        let entries = data_list(&body, STORE_ENDPOINT)?;

        let mut new_items = Vec::new();
        for entry in entries {
            let item: StoreItem = match serde_json::from_value(entry.clone()) {
                Ok(item) => item,
                Err(e) => {
                    tracing::warn!("Skipping malformed store entry {}: {}", entry, e);
                    continue;
                }
            };

            let Some(id) = item.item_key() else {
                continue;
            };

            if self.cache.observe(&id) {
                tracing::debug!("New store item {} ({})", id, item.display_name());
                new_items.push(item);
            }
        }

        Ok(new_items)
    }
}

impl Default for StoreChecker {
    fn default() -> Self {
        Self::new(RecencyCache::default())
    }
}

pub fn format_new_items(items: &[StoreItem]) -> String {
    let blocks: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "📦 {}\n📍 {}\n💰 {}",
                item.display_name(),
                item.location(),
                item.price()
            )
        })
        .collect();

    format!("🛒 New items detected:\n\n{}", blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketApi;
    use crate::core::ApiError;
    use crate::notify::{Delivery, MockNotifier};
    use serde_json::json;

    fn api_returning(body: serde_json::Value) -> MockMarketApi {
        let mut api = MockMarketApi::new();
        api.expect_store_listing()
            .returning(move || Ok(body.clone()));
        api
    }

    fn silent_notifier() -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        notifier
    }

    #[tokio::test]
    async fn test_only_new_items_are_reported() {
        let mut checker = StoreChecker::default();
        checker.cache.observe(&ItemKey::Text("A".to_string()));

        let api = api_returning(json!({"data": [
            {"id": "A", "name": "Old box", "location": "Paris", "price": 1},
            {"id": "B", "name": "New box", "location": "Tokyo", "price": "4.99"},
        ]}));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|text: &str| text.contains("New box") && !text.contains("Old box"))
            .times(1)
            .returning(|_| Delivery::Sent);

        assert_eq!(checker.check(&api, &notifier).await, CheckOutcome::Notified(1));
        assert!(checker.cache().contains(&ItemKey::Text("B".to_string())));
    }

    #[tokio::test]
    async fn test_repeat_listing_is_quiet() {
        let mut checker = StoreChecker::default();
        let body = json!({"data": [{"id": 7, "name": "Box"}]});

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).returning(|_| Delivery::Sent);

        let api = api_returning(body);
        assert_eq!(checker.check(&api, &notifier).await, CheckOutcome::Notified(1));
        assert_eq!(checker.check(&api, &notifier).await, CheckOutcome::Quiet);
    }

    #[tokio::test]
    async fn test_items_without_id_are_ignored() {
        let mut checker = StoreChecker::default();
        let api = api_returning(json!({"data": [{"name": "No id"}, {"id": "", "name": "Empty"}]}));

        assert_eq!(checker.check(&api, &silent_notifier()).await, CheckOutcome::Quiet);
        assert!(checker.cache().is_empty());
    }

    #[tokio::test]
    async fn test_status_error_is_soft_failure() {
        let mut checker = StoreChecker::default();
        let mut api = MockMarketApi::new();
        api.expect_store_listing().returning(|| {
            Err(ApiError::Status {
                endpoint: STORE_ENDPOINT,
                status: 503,
            })
        });

        assert_eq!(checker.check(&api, &silent_notifier()).await, CheckOutcome::Failed);
        assert!(checker.cache().is_empty());
    }

    #[tokio::test]
    async fn test_non_list_data_leaves_cache_untouched() {
        let mut checker = StoreChecker::default();
        let api = api_returning(json!({"data": {"id": "A"}}));

        assert_eq!(checker.check(&api, &silent_notifier()).await, CheckOutcome::Failed);
        assert!(checker.cache().is_empty());
    }

    #[tokio::test]
    async fn test_null_data_is_shape_failure() {
        let mut checker = StoreChecker::default();
        let api = api_returning(json!({"data": null}));

        assert_eq!(checker.check(&api, &silent_notifier()).await, CheckOutcome::Failed);
        assert!(checker.cache().is_empty());
    }

    #[tokio::test]
    async fn test_numeric_and_textual_ids_are_separate_items() {
        let mut checker = StoreChecker::default();
        let api = api_returning(json!({"data": [
            {"id": 42, "name": "Numeric"},
            {"id": "42", "name": "Textual"},
        ]}));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|text: &str| text.contains("Numeric") && text.contains("Textual"))
            .times(1)
            .returning(|_| Delivery::Sent);

        assert_eq!(checker.check(&api, &notifier).await, CheckOutcome::Notified(1));
        assert_eq!(checker.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_disabled_notifier_still_records_items() {
        let mut checker = StoreChecker::default();
        let api = api_returning(json!({"data": [{"id": "A"}]}));

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).returning(|_| Delivery::Disabled);

        assert_eq!(checker.check(&api, &notifier).await, CheckOutcome::Notified(1));
        assert!(checker.cache().contains(&ItemKey::Text("A".to_string())));
    }

    #[test]
    fn test_message_format_keeps_source_order() {
        let items: Vec<StoreItem> = vec![
            serde_json::from_value(json!({"id": 1, "name": "First", "location": "HK", "price": 3})).unwrap(),
            serde_json::from_value(json!({"id": 2, "name": "Second"})).unwrap(),
        ];

        assert_eq!(
            format_new_items(&items),
            "🛒 New items detected:\n\n📦 First\n📍 HK\n💰 3\n\n📦 Second\n📍 \n💰 N/A"
        );
    }
}
