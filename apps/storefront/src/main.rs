//! # Storefront Entry Point
//!
//! Setup lives in `lib.rs` so it can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    storefront_app::run().await
}
