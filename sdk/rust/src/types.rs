//! Data types for the Herald SDK.
//!
//! Records mirror what the service returns. Fields the SDK does not model
//! are kept in a flattened map so nothing is lost on the way through.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Subscription types

/// A named class of subscribable event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SubscriptionKey {
    /// Subscription key identifier.
    pub key: String,
    /// Human readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Feature the key belongs to (e.g. "incidents").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    /// Remaining fields as returned by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A binding of an account to a delivery target for a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AccountSubscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    /// Integrations the subscription delivers to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub integrations: Vec<IntegrationRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference to an integration from a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct IntegrationRef {
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub integration_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Subscription keys an integration is subscribed to within one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AccountSubscriptionKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscription_keys: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Integration types

/// A configured delivery target (e.g. a webhook) for an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Integration {
    pub id: String,
    /// Integration kind, e.g. "webhook".
    #[serde(rename = "type")]
    pub integration_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Type-specific configuration (target URL, headers, ...).
    #[serde(flatten)]
    pub config: Map<String, Value>,
}

/// Body of an integration create or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    /// Type-specific configuration.
    #[serde(flatten)]
    pub config: Map<String, Value>,
}

impl IntegrationPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the integration name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the delivery target URL.
    pub fn target_url(mut self, target_url: impl Into<String>) -> Self {
        self.target_url = Some(target_url.into());
        self
    }

    /// Set an arbitrary configuration field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }
}

/// Catalog entry describing a supported integration kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct IntegrationType {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Notification types

/// A single dispatched or queued notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Notification {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Delivery status, e.g. "sent" or "failed".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A notification sent for an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct IncidentNotification {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A page of notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    /// Token for the next page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a notification create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NotificationPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    pub fn subscription_key(mut self, key: impl Into<String>) -> Self {
        self.subscription_key = Some(key.into());
        self
    }

    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Body of a notification update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationUpdate {
    pub status: String,
}

impl NotificationUpdate {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Filter and paging parameters for listing notifications.
///
/// Keys are sent to the service as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationQuery(Map<String, Value>);

impl NotificationQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Maximum number of results.
    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit)
    }

    /// Continuation token from a previous page.
    pub fn continuation(self, token: impl Into<String>) -> Self {
        self.param("continuation", token.into())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for NotificationQuery {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// Response envelopes

#[derive(Debug, Deserialize)]
pub(crate) struct SubscriptionsEnvelope {
    pub subscriptions: Vec<AccountSubscription>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountsEnvelope<T> {
    pub accounts: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntegrationsEnvelope {
    pub integrations: Vec<Integration>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntegrationTypesEnvelope {
    pub integration_types: Vec<IntegrationType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NotificationsEnvelope<T> {
    pub notifications: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integration_keeps_unknown_fields() {
        let raw = json!({
            "id": "int-1",
            "type": "webhook",
            "account_id": "2",
            "target_url": "https://example.com/hook",
            "headers": {"X-Token": "abc"}
        });
        let integration: Integration = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(integration.integration_type, "webhook");
        assert_eq!(integration.config["target_url"], "https://example.com/hook");
        assert_eq!(serde_json::to_value(&integration).unwrap(), raw);
    }

    #[test]
    fn notification_requires_id() {
        let result: serde_json::Result<Notification> =
            serde_json::from_value(json!({"status": "sent"}));
        assert!(result.is_err());
    }

    #[test]
    fn query_serializes_as_plain_object() {
        let query = NotificationQuery::new().limit(10).param("status", "failed");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"limit": 10, "status": "failed"})
        );
    }

    #[test]
    fn payload_omits_unset_fields() {
        let payload = IntegrationPayload::new().name("ops hook");
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"name": "ops hook"}));
    }
}
