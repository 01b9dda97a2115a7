//! # herald-sdk
//!
//! Rust SDK for Herald, the notification and subscription management service.
//!
//! ## Quick Start
//!
//! ```no_run
//! use herald_sdk::{HeraldClient, NotificationQuery};
//!
//! #[tokio::main]
//! async fn main() -> herald_sdk::Result<()> {
//!     // Uses the shared default transport, configured from the environment
//!     let client = HeraldClient::new(None)?;
//!
//!     // Integrations configured for an account
//!     for integration in client.get_integrations_by_account("12345678").await? {
//!         println!("{} ({})", integration.id, integration.integration_type);
//!     }
//!
//!     // Recent incident notifications
//!     let query = NotificationQuery::new().limit(20);
//!     let notifications = client
//!         .get_notifications_by_feature("12345678", "incidents", &query)
//!         .await?;
//!     println!("{} notifications", notifications.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Transports
//!
//! The client never performs HTTP itself. Requests go through a [`Transport`];
//! [`HttpTransport`] is the `reqwest` implementation, and the shared default
//! instance is created from `HERALD_API_URL`, `HERALD_API_TOKEN` and
//! `HERALD_TIMEOUT_SECS` on first use.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use herald_sdk::{HeraldClient, HttpTransport};
//!
//! let transport = HttpTransport::builder()
//!     .base_url("http://localhost:8080")
//!     .token("my-token")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! let client = HeraldClient::with_transport(Arc::new(transport));
//! # Ok::<(), herald_sdk::HeraldError>(())
//! ```

mod client;
mod error;
mod http;
mod transport;
mod types;

pub use async_trait::async_trait;
pub use client::HeraldClient;
pub use error::{HeraldError, Result};
pub use http::{default_transport, set_default_transport, HttpTransport, HttpTransportBuilder};
pub use transport::{Method, Request, Transport};
pub use types::{
    AccountSubscription, AccountSubscriptionKeys, IncidentNotification, Integration,
    IntegrationPayload, IntegrationRef, IntegrationType, Notification, NotificationList,
    NotificationPayload, NotificationQuery, NotificationUpdate, SubscriptionKey,
};
