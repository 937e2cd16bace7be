//! # ONS SDK for Rust
//!
//! A Rust SDK for the Oasis Name Service (ONS) - resolve `.ons` names and
//! their profile records on Oasis Emerald.
//!
//! Deployed contract instances are located through an on-chain address book;
//! all reads go through `eth_call`, and contract revert reasons are
//! translated into a small fixed vocabulary of user-facing errors.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ons_sdk_rs::{Ons, OnsNetwork};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect to Emerald mainnet
//!     let ons = Ons::new(OnsNetwork::Mainnet);
//!     ons.init().await?;
//!
//!     // Forward lookup
//!     let name = ons.name("mehrab.ons")?;
//!     println!("Owner: {}", name.get_address().await?);
//!
//!     // Profile records
//!     if let Some(twitter) = name.get_twitter().await? {
//!         println!("Twitter: {}", twitter);
//!     }
//!
//!     // Reverse lookup
//!     let primary = ons.get_name("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").await?;
//!     println!("Primary name: {}", primary);
//!
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod client;
pub mod contracts;
pub mod error;
pub mod metadata;
pub mod models;
pub mod name;
pub mod ons;
pub mod registry;
pub mod tx;

// Re-exports
pub use client::{EvmClient, HttpProvider, JsonRpcProvider};
pub use error::{OnsError, OnsResult, RevertReason};
pub use metadata::FALLBACK_AVATAR_URL;
pub use models::{contract_keys, Address, NftMetadata, OnsNetwork, TokenId};
pub use name::Name;
pub use ons::Ons;
pub use registry::AddressBook;
pub use tx::UnsignedCall;
