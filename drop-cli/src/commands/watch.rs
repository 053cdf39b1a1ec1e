//! Poll a session and print newly appeared files.
//!
//! The relay has no push channel; visibility of other participants' uploads
//! comes from polling the describe endpoint on a fixed cadence.

use crate::client::RelayClient;
use anyhow::Result;
use drop_types::{FileId, SessionCode};
use std::collections::HashSet;
use std::time::Duration;

pub async fn run(client: &RelayClient, code: &str, interval_secs: u64) -> Result<()> {
    let code = SessionCode::new(code);
    let mut seen: HashSet<FileId> = HashSet::new();
    let mut first_poll = true;

    println!("Watching session {} (every {}s, Ctrl-C to stop)", code, interval_secs);

    loop {
        match client.describe(&code).await {
            Ok(info) => {
                for file in &info.files {
                    if seen.insert(file.id) && !first_poll {
                        println!(
                            "New file: {}  {} bytes  from {}  (id {})",
                            file.name, file.size, file.uploaded_by, file.id
                        );
                    }
                }
                if first_poll {
                    println!("{} files already in session", info.file_count);
                    first_poll = false;
                }
            }
            // Transient failures are absorbed by the next poll.
            Err(e) => eprintln!("poll failed: {e}"),
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval_secs)) => {}
            _ = tokio::signal::ctrl_c() => {
                println!("stopped");
                return Ok(());
            }
        }
    }
}
