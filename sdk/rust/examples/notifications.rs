//! Example: List recent incident notifications and mark one as read

use herald_sdk::{HeraldClient, NotificationQuery, NotificationUpdate};

#[tokio::main]
async fn main() -> herald_sdk::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let account_id = std::env::args().nth(1).unwrap_or_else(|| "12345678".to_string());

    // Bound to the default transport (HERALD_API_URL / HERALD_API_TOKEN)
    let client = HeraldClient::new(None)?;

    let query = NotificationQuery::new().limit(10);
    let notifications = client
        .get_notifications_by_feature(&account_id, "incidents", &query)
        .await?;

    println!("{} incident notifications", notifications.len());
    for notification in &notifications {
        println!(
            "  {} [{}]",
            notification.id,
            notification.status.as_deref().unwrap_or("unknown")
        );
    }

    if let Some(first) = notifications.first() {
        let updated = client
            .update_notification(&account_id, &first.id, &NotificationUpdate::status("read"))
            .await?;
        println!("Marked {} as {:?}", updated.id, updated.status);
    }

    Ok(())
}
