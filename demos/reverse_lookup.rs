use ons_sdk_rs::{Ons, OnsNetwork};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Get address from command line or use default
    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string());

    println!("Connecting to ONS on Emerald Mainnet...");
    let ons = Ons::new(OnsNetwork::Mainnet);
    ons.init().await?;

    println!("\nReverse lookup for address: {}", address);

    match ons.get_name(&address).await {
        Ok(name) => {
            println!("\n✓ Primary name: {}", name);
        }
        Err(e) => {
            eprintln!("\n✗ Error: {}", e);
        }
    }

    Ok(())
}
