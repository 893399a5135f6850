//! Run a throwaway local DynamoDB emulator for integration tests.
//!
//! Downloads the official DynamoDB Local tarball once, unpacks it under a
//! temp directory, launches it on a JVM, waits for the endpoint to answer,
//! and tears it down afterwards.
//!
//! # Example
//!
//! ```no_run
//! use ddb_local::LocalDynamoDb;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut db = LocalDynamoDb::ephemeral().await?;
//!     db.start().await?;
//!     println!("endpoint is {}", db.endpoint());
//!     db.stop().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dist;
pub mod emulator;
pub mod install;
pub mod net;
pub mod process;
pub mod runtime;

pub use config::LocalDbConfig;
pub use emulator::instance::{with_running, LocalDynamoDb};
