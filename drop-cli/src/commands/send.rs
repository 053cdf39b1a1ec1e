//! Upload a file into a session.

use crate::client::RelayClient;
use anyhow::Result;
use drop_types::SessionCode;
use std::path::Path;

pub async fn run(client: &RelayClient, code: &str, path: &Path) -> Result<()> {
    let code = SessionCode::new(code);
    let response = client.upload(&code, path).await?;

    println!(
        "Uploaded {} ({} bytes) to session {}",
        response.file.name, response.file.size, code
    );
    println!("File id: {}", response.file.id);
    Ok(())
}
