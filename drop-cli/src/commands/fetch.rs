//! Download a file from a session.

use crate::client::RelayClient;
use anyhow::{Context, Result};
use drop_types::SessionCode;
use std::path::{Path, PathBuf};

pub async fn run(
    client: &RelayClient,
    code: &str,
    file_id: &str,
    output: Option<&Path>,
) -> Result<()> {
    let code = SessionCode::new(code);

    // Without an explicit output path, name the file what the uploader did.
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let info = client.describe(&code).await?;
            let name = info
                .files
                .iter()
                .find(|f| f.id.to_string() == file_id)
                .map(|f| f.name.clone())
                .unwrap_or_else(|| file_id.to_string());
            PathBuf::from(name)
        }
    };

    let bytes = client.fetch(&code, file_id).await?;
    tokio::fs::write(&output, &bytes)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Saved {} bytes to {}", bytes.len(), output.display());
    Ok(())
}
