//! Join a session and print its file listing.

use crate::client::RelayClient;
use anyhow::Result;
use drop_types::SessionCode;

pub async fn run(client: &RelayClient, code: &str) -> Result<()> {
    let code = SessionCode::new(code);
    let info = client.describe(&code).await?;

    println!("Session {} ({} files)", info.session_id, info.file_count);
    for file in &info.files {
        println!(
            "  {}  {}  {} bytes  from {}",
            file.id, file.name, file.size, file.uploaded_by
        );
    }
    if info.files.is_empty() {
        println!("  (no files yet)");
    }
    Ok(())
}
