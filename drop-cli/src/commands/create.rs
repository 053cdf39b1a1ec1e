//! Create a session on the relay.

use crate::client::RelayClient;
use anyhow::Result;

pub async fn run(client: &RelayClient, code: Option<&str>) -> Result<()> {
    let created = client.create_session(code).await?;
    println!("Session created: {}", created.session_id);
    println!("Share this code with other devices to exchange files.");
    Ok(())
}
