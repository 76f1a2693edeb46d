//! Simple SDK Example
//!
//! Produces a few messages and consumes them back.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package qbroker-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --example simple
//!    ```

use qbroker_sdk::QBrokerClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("qbroker SDK - Simple Example");
    println!("============================\n");

    // 1. Point the client at the daemon
    let client = QBrokerClient::connect("http://127.0.0.1:8080")?;
    println!("1. Using broker at {}\n", client.base_url());

    // 2. Produce
    println!("2. Producing...");
    for i in 1..=3 {
        match client.put("example", format!("message #{}", i)).await {
            Ok(()) => println!("   ✓ message #{}", i),
            Err(e) if e.is_queue_full() => println!("   ✗ queue full, skipping #{}", i),
            Err(e) => return Err(e.into()),
        }
    }
    println!();

    // 3. Consume until the queue stays empty for a second
    println!("3. Consuming...");
    while let Some(message) = client.get("example", Some(1)).await? {
        println!("   ← {}", message);
    }
    println!();

    // 4. Registry snapshot
    let stats = client.stats().await?;
    println!(
        "4. {} of {} queues in use",
        stats.queue_count, stats.max_queues
    );

    Ok(())
}
