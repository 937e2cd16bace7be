use ons_sdk_rs::{Ons, OnsNetwork};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Get name from command line or use default
    let name = std::env::args().nth(1).unwrap_or_else(|| "mehrab.ons".to_string());

    println!("Connecting to ONS on Emerald Mainnet...");
    let ons = Ons::new(OnsNetwork::Mainnet);
    ons.init().await?;

    println!("\nResolving name: {}", name);
    let handle = ons.name(&name)?;

    match handle.get_address().await {
        Ok(address) => {
            println!("\n✓ Name found!");
            println!("  Name: {}", handle.as_str());
            println!("  Address: {}", address);

            if let Some(twitter) = handle.get_twitter().await? {
                println!("  Twitter: {}", twitter);
            }
            if let Some(email) = handle.get_email().await? {
                println!("  Email: {}", email);
            }
            if let Some(website) = handle.get_website().await? {
                println!("  Website: {}", website);
            }

            println!("  Avatar: {}", handle.get_avatar_url().await?);
        }
        Err(e) => {
            eprintln!("\n✗ Error resolving name: {}", e);
        }
    }

    Ok(())
}
