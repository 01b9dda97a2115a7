//! Example: Create a webhook integration and list the account's integrations

use std::sync::Arc;

use herald_sdk::{HeraldClient, HttpTransport, IntegrationPayload};

#[tokio::main]
async fn main() -> herald_sdk::Result<()> {
    let account_id = std::env::args().nth(1).unwrap_or_else(|| "12345678".to_string());
    let target_url = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "https://hooks.example.com/herald".to_string());

    // Explicit transport instead of the shared default
    let transport = HttpTransport::from_env()?;
    let client = HeraldClient::with_transport(Arc::new(transport));

    let types = client.get_integration_types().await?;
    println!("Supported integration types:");
    for integration_type in &types {
        println!("  {}", integration_type.type_name);
    }

    let payload = IntegrationPayload::new()
        .name("example webhook")
        .target_url(target_url);
    let created = client
        .create_integration(&account_id, "webhook", &payload)
        .await?;
    println!("Created integration {}", created.id);

    for integration in client.get_integrations_by_account(&account_id).await? {
        println!(
            "  {} {} {}",
            integration.id,
            integration.integration_type,
            integration.name.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
