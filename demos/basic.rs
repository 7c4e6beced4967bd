//! Basic example demonstrating the Linode API client.
//!
//! Run with:
//! ```
//! LINODE_TOKEN=your-token cargo run --example basic
//! ```

use std::time::Duration;

use linodeapi::{
    list_instance_volumes, wait_for_instance_status, Event, Filter, Get, Instance,
    InstanceStatus, LinodeClient, List, ListOptions, Region,
};

#[tokio::main]
async fn main() -> linodeapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from the environment or ~/.config/linode
    println!("Creating Linode client...");
    let client = LinodeClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List first page of instances
    println!("\n--- Listing Instances (first page) ---");
    let page = Instance::list_page(&client, &(), &ListOptions::for_page(1).with_page_size(25)).await?;
    println!(
        "Page {}/{} ({} instances total)",
        page.page, page.pages, page.results
    );
    for instance in &page.data {
        println!(
            "  - {} ({}) {:?} in {}",
            instance.label, instance.id, instance.status, instance.region
        );
    }

    // Filter server-side through X-Filter
    println!("\n--- Running Instances ---");
    let opts = ListOptions::default().with_filter(&Filter::eq("status", "running"));
    let running = Instance::list_all(&client, &(), Some(&opts)).await?;
    println!("{} running", running.len());

    // Drill into the first instance
    if let Some(first) = page.data.first() {
        println!("\n--- Instance {} ---", first.id);
        let instance = Instance::get(&client, first.id).await?;
        println!("Label: {}", instance.label);
        println!("Type: {}", instance.instance_type.as_deref().unwrap_or("-"));
        println!("IPv4: {:?}", instance.ipv4);

        let volumes = list_instance_volumes(&client, instance.id, None).await?;
        println!("Volumes: {}", volumes.len());
        for volume in volumes {
            println!("  - {} ({} GB)", volume.label, volume.size);
        }

        if !instance.is_running() {
            println!("\nWaiting up to 10s for {} to come up...", instance.label);
            match wait_for_instance_status(
                &client,
                instance.id,
                InstanceStatus::Running,
                Duration::from_secs(10),
            )
            .await
            {
                Ok(i) => println!("{} is running", i.label),
                Err(e) => println!("Still not running: {}", e),
            }
        }
    }

    // Regions have string IDs
    println!("\n--- Regions ---");
    let regions = Region::list_all(&client, &(), None).await?;
    println!("{} regions available", regions.len());

    // Recent account activity
    println!("\n--- Recent Events ---");
    let events = Event::list_page(&client, &(), &ListOptions::for_page(1).with_page_size(25)).await?;
    for event in events.data.iter().take(5) {
        println!("  - {} {} {:?}", event.id, event.action, event.status);
    }

    println!("\nDone!");
    Ok(())
}
