//! Publish example
//!
//! Usage:
//!   PUSHER_INSTANCE_ID=... PUSHER_SECRET_KEY=... cargo run --example publish

use push_notifications::{ClientConfig, PushNotifications, PushNotificationsClient};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env()?;
    let interest = std::env::var("PUSHER_INTEREST").unwrap_or_else(|_| "hello".to_string());
    let user_id = std::env::var("PUSHER_USER_ID").unwrap_or_else(|_| "user-001".to_string());

    println!("=== Push Notifications Rust Client Example ===");
    println!("Instance: {}", config.instance_id);
    println!("Interest: {}", interest);
    println!("User: {}", user_id);
    println!();

    let client = PushNotificationsClient::with_config(config)?;

    let payload = json!({
        "apns": {"aps": {"alert": {"title": "Hello", "body": "Hello, world!"}}},
        "fcm": {"notification": {"title": "Hello", "body": "Hello, world!"}},
        "web": {"notification": {"title": "Hello", "body": "Hello, world!"}},
    });

    println!("Publishing to interest '{}'...", interest);
    let publish_id = client.publish_to_interests(&[interest.as_str()], &payload).await?;
    println!("✓ Published! publishId: {}", publish_id);
    println!();

    println!("Publishing to user '{}'...", user_id);
    match client.publish_to_users(&[user_id.as_str()], &payload).await {
        Ok(publish_id) => println!("✓ Published! publishId: {}", publish_id),
        Err(e) if e.is_api() => println!("✗ Rejected by the service: {}", e),
        Err(e) => return Err(e.into()),
    }
    println!();

    let token = client.authenticate_user(&user_id)?;
    println!("✓ Token for '{}': {}...", user_id, &token[..token.len().min(40)]);

    Ok(())
}
