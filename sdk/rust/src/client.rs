//! Herald client implementation.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::http::default_transport;
use crate::transport::{Method, Request, Transport};
use crate::types::{
    AccountSubscription, AccountSubscriptionKeys, AccountsEnvelope, IncidentNotification,
    Integration, IntegrationPayload, IntegrationType, IntegrationTypesEnvelope,
    IntegrationsEnvelope, Notification, NotificationList, NotificationPayload, NotificationQuery,
    NotificationUpdate, NotificationsEnvelope, SubscriptionKey, SubscriptionsEnvelope,
};

const SERVICE_NAME: &str = "herald";
const SERVICE_VERSION: &str = "v1";

/// The Herald client.
///
/// Each method issues exactly one request through the bound [`Transport`]
/// and decodes the response into its declared type. Identifiers are
/// interpolated into paths as given.
///
/// # Example
///
/// ```no_run
/// use herald_sdk::HeraldClient;
///
/// # async fn example() -> herald_sdk::Result<()> {
/// // Bound to the shared default transport (configured from HERALD_* variables)
/// let client = HeraldClient::new(None)?;
///
/// for key in client.get_all_subscription_keys().await? {
///     println!("{}: {:?}", key.key, key.feature);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HeraldClient {
    transport: Arc<dyn Transport>,
}

impl HeraldClient {
    /// Create a client over `transport`, or over the shared default
    /// transport when `None`.
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Result<Self> {
        let transport = match transport {
            Some(transport) => transport,
            None => default_transport()?,
        };
        Ok(Self { transport })
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// The transport this client sends requests through.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    fn request(&self, path: impl Into<String>) -> Request {
        Request::new(SERVICE_NAME, SERVICE_VERSION, path)
    }

    fn account_request(&self, account_id: &str, path: impl Into<String>) -> Request {
        self.request(path).account(account_id)
    }

    async fn send(&self, method: Method, request: Request) -> Result<Value> {
        tracing::debug!(
            %method,
            path = %request.path,
            account_id = request.account_id.as_deref(),
            "herald call"
        );
        match method {
            Method::Get => self.transport.get(request).await,
            Method::Post => self.transport.post(request).await,
            Method::Put => self.transport.put(request).await,
            Method::Delete => self.transport.delete(request).await,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, method: Method, request: Request) -> Result<T> {
        let body = self.send(method, request).await?;
        Ok(serde_json::from_value(body)?)
    }

    // Subscriptions

    /// Get all subscription keys.
    ///
    /// `GET /herald/v1/subscription_keys`
    pub async fn get_all_subscription_keys(&self) -> Result<Vec<SubscriptionKey>> {
        self.fetch(Method::Get, self.request("/subscription_keys")).await
    }

    /// Get all subscriptions of an account for a feature.
    ///
    /// `GET /herald/v1/:account_id/subscriptions/:feature`
    ///
    /// # Arguments
    ///
    /// * `account_id` - Account ID
    /// * `feature` - Feature name of the subscription key (e.g. "incidents", "search")
    pub async fn get_all_account_subscriptions_by_feature(
        &self,
        account_id: &str,
        feature: &str,
    ) -> Result<Vec<AccountSubscription>> {
        let request = self.account_request(account_id, format!("/subscriptions/{}", feature));
        let envelope: SubscriptionsEnvelope = self.fetch(Method::Get, request).await?;
        Ok(envelope.subscriptions)
    }

    /// Get the subscriptions of an integration for a feature, across all
    /// accounts.
    ///
    /// `GET /herald/v1/integrations/:integration_id/subscriptions/:feature`
    pub async fn get_all_integration_subscriptions_by_feature(
        &self,
        integration_id: &str,
        feature: &str,
    ) -> Result<Vec<AccountSubscriptionKeys>> {
        let request = self.request(format!(
            "/integrations/{}/subscriptions/{}",
            integration_id, feature
        ));
        let envelope: AccountsEnvelope<AccountSubscriptionKeys> =
            self.fetch(Method::Get, request).await?;
        Ok(envelope.accounts)
    }

    /// Get all subscriptions of a user.
    ///
    /// `GET /herald/v1/users/:user_id/subscriptions`
    pub async fn get_all_user_subscriptions(
        &self,
        user_id: &str,
    ) -> Result<Vec<AccountSubscription>> {
        let request = self.request(format!("/users/{}/subscriptions", user_id));
        let envelope: AccountsEnvelope<AccountSubscription> =
            self.fetch(Method::Get, request).await?;
        Ok(envelope.accounts)
    }

    /// Get the subscriptions of a user for a feature.
    ///
    /// `GET /herald/v1/users/:user_id/subscriptions/:feature`
    pub async fn get_all_user_subscriptions_by_feature(
        &self,
        user_id: &str,
        feature: &str,
    ) -> Result<Vec<AccountSubscription>> {
        let request = self.request(format!("/users/{}/subscriptions/{}", user_id, feature));
        let envelope: AccountsEnvelope<AccountSubscription> =
            self.fetch(Method::Get, request).await?;
        Ok(envelope.accounts)
    }

    /// Get the subscription keys an integration is subscribed to.
    ///
    /// `GET /herald/v1/:account_id/integrations/:integration_id/subscriptions`
    pub async fn get_integration_subscriptions(
        &self,
        account_id: &str,
        integration_id: &str,
    ) -> Result<AccountSubscriptionKeys> {
        let request = self.account_request(
            account_id,
            format!("/integrations/{}/subscriptions", integration_id),
        );
        self.fetch(Method::Get, request).await
    }

    /// Get the subscription keys an integration is subscribed to for a feature.
    ///
    /// `GET /herald/v1/:account_id/integrations/:integration_id/subscriptions/:feature`
    pub async fn get_integration_subscriptions_by_feature(
        &self,
        account_id: &str,
        integration_id: &str,
        feature: &str,
    ) -> Result<AccountSubscriptionKeys> {
        let request = self.account_request(
            account_id,
            format!("/integrations/{}/subscriptions/{}", integration_id, feature),
        );
        self.fetch(Method::Get, request).await
    }

    // Integrations

    /// Create an integration of the given type.
    ///
    /// `POST /herald/v1/:account_id/integrations/:type`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use herald_sdk::{HeraldClient, IntegrationPayload};
    /// # async fn example(client: HeraldClient) -> herald_sdk::Result<()> {
    /// let payload = IntegrationPayload::new()
    ///     .name("ops webhook")
    ///     .target_url("https://hooks.example.com/herald");
    ///
    /// let integration = client.create_integration("12345678", "webhook", &payload).await?;
    /// println!("created {}", integration.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_integration(
        &self,
        account_id: &str,
        integration_type: &str,
        payload: &IntegrationPayload,
    ) -> Result<Integration> {
        let request = self
            .account_request(account_id, format!("/integrations/{}", integration_type))
            .data(to_body(payload)?);
        self.fetch(Method::Post, request).await
    }

    /// Delete an integration.
    ///
    /// `DELETE /herald/v1/:account_id/integrations/:integration_id`
    ///
    /// Returns whatever the transport reports for the deletion; the HTTP
    /// transport yields the status code when the response has no body.
    pub async fn delete_integration(&self, account_id: &str, integration_id: &str) -> Result<Value> {
        let request =
            self.account_request(account_id, format!("/integrations/{}", integration_id));
        self.send(Method::Delete, request).await
    }

    /// Get an integration by ID.
    ///
    /// `GET /herald/v1/:account_id/integrations/:integration_id`
    pub async fn get_integration_by_id(
        &self,
        account_id: &str,
        integration_id: &str,
    ) -> Result<Integration> {
        let request =
            self.account_request(account_id, format!("/integrations/{}", integration_id));
        self.fetch(Method::Get, request).await
    }

    /// Get all integrations of an account.
    ///
    /// `GET /herald/v1/:account_id/integrations`
    pub async fn get_integrations_by_account(&self, account_id: &str) -> Result<Vec<Integration>> {
        let request = self.account_request(account_id, "/integrations");
        let envelope: IntegrationsEnvelope = self.fetch(Method::Get, request).await?;
        Ok(envelope.integrations)
    }

    /// Get the catalog of supported integration types.
    ///
    /// `GET /herald/v1/integration_types`
    pub async fn get_integration_types(&self) -> Result<Vec<IntegrationType>> {
        let envelope: IntegrationTypesEnvelope = self
            .fetch(Method::Get, self.request("/integration_types"))
            .await?;
        Ok(envelope.integration_types)
    }

    /// Update an integration.
    ///
    /// `PUT /herald/v1/:account_id/integrations/:integration_id`
    pub async fn update_integration(
        &self,
        account_id: &str,
        integration_id: &str,
        payload: &IntegrationPayload,
    ) -> Result<Integration> {
        let request = self
            .account_request(account_id, format!("/integrations/{}", integration_id))
            .data(to_body(payload)?);
        self.fetch(Method::Put, request).await
    }

    // Notifications

    /// Get a notification by ID.
    ///
    /// `GET /herald/v1/notifications/:notification_id`
    pub async fn get_notification_by_id(&self, notification_id: &str) -> Result<Notification> {
        let request = self.request(format!("/notifications/{}", notification_id));
        self.fetch(Method::Get, request).await
    }

    /// List the notifications of an account.
    ///
    /// `GET /herald/v1/:account_id/notifications`
    ///
    /// The query is sent as-is.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use herald_sdk::{HeraldClient, NotificationQuery};
    /// # async fn example(client: HeraldClient) -> herald_sdk::Result<()> {
    /// let query = NotificationQuery::new().limit(50).param("status", "failed");
    /// let page = client.get_notifications_by_account("12345678", &query).await?;
    ///
    /// for notification in &page.notifications {
    ///     println!("{} {:?}", notification.id, notification.status);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_notifications_by_account(
        &self,
        account_id: &str,
        query: &NotificationQuery,
    ) -> Result<NotificationList> {
        let request = self
            .account_request(account_id, "/notifications")
            .params(query.as_map().clone());
        self.fetch(Method::Get, request).await
    }

    /// Get a notification by ID within an account.
    ///
    /// `GET /herald/v1/:account_id/notifications/id/:notification_id`
    pub async fn get_notification_by_id_and_account(
        &self,
        account_id: &str,
        notification_id: &str,
    ) -> Result<Notification> {
        let request =
            self.account_request(account_id, format!("/notifications/id/{}", notification_id));
        self.fetch(Method::Get, request).await
    }

    /// Get the notifications sent for an incident.
    ///
    /// `GET /herald/v1/:account_id/notifications/features/incidents/incidents/:incident_id`
    pub async fn get_sent_notifications_by_incident_id(
        &self,
        account_id: &str,
        incident_id: &str,
    ) -> Result<Vec<IncidentNotification>> {
        let request = self.account_request(
            account_id,
            format!("/notifications/features/incidents/incidents/{}", incident_id),
        );
        let envelope: NotificationsEnvelope<IncidentNotification> =
            self.fetch(Method::Get, request).await?;
        Ok(envelope.notifications)
    }

    /// List the notifications of an account for a feature.
    ///
    /// `GET /herald/v1/:account_id/notifications/:feature`
    pub async fn get_notifications_by_feature(
        &self,
        account_id: &str,
        feature: &str,
        query: &NotificationQuery,
    ) -> Result<Vec<Notification>> {
        let request = self
            .account_request(account_id, format!("/notifications/{}", feature))
            .params(query.as_map().clone());
        let envelope: NotificationsEnvelope<Notification> =
            self.fetch(Method::Get, request).await?;
        Ok(envelope.notifications)
    }

    /// List the notifications of an account for a feature and subkey.
    ///
    /// `GET /herald/v1/:account_id/notifications/:feature/:subkey`
    pub async fn get_notifications_by_feature_and_subkey(
        &self,
        account_id: &str,
        feature: &str,
        subkey: &str,
        query: &NotificationQuery,
    ) -> Result<Vec<Notification>> {
        let request = self
            .account_request(account_id, format!("/notifications/{}/{}", feature, subkey))
            .params(query.as_map().clone());
        let envelope: NotificationsEnvelope<Notification> =
            self.fetch(Method::Get, request).await?;
        Ok(envelope.notifications)
    }

    /// Create a notification.
    ///
    /// `POST /herald/v1/:account_id/notifications`
    pub async fn create_notification(
        &self,
        account_id: &str,
        payload: &NotificationPayload,
    ) -> Result<Notification> {
        let request = self
            .account_request(account_id, "/notifications")
            .data(to_body(payload)?);
        self.fetch(Method::Post, request).await
    }

    /// Update a notification, e.g. its status.
    ///
    /// `PUT /herald/v1/:account_id/notifications/:notification_id`
    pub async fn update_notification(
        &self,
        account_id: &str,
        notification_id: &str,
        update: &NotificationUpdate,
    ) -> Result<Notification> {
        let request = self
            .account_request(account_id, format!("/notifications/{}", notification_id))
            .data(to_body(update)?);
        self.fetch(Method::Put, request).await
    }
}

fn to_body<T: Serialize>(payload: &T) -> Result<Value> {
    Ok(serde_json::to_value(payload)?)
}
