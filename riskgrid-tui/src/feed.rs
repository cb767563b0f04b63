//! Host envelope feed: one JSON value per line, from stdin or a file.

use std::path::PathBuf;

use log::{debug, info, warn};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Stdin,
    File(PathBuf),
}

/// Start reading `source` on a background task. The receiver yields every
/// line that parses as JSON; shape checks happen in the widget.
pub fn spawn(source: FeedSource) -> mpsc::Receiver<Value> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        match source {
            FeedSource::Stdin => {
                read_lines(BufReader::new(tokio::io::stdin()), tx).await;
            }
            FeedSource::File(path) => match tokio::fs::File::open(&path).await {
                Ok(file) => read_lines(BufReader::new(file), tx).await,
                Err(e) => warn!("Cannot open feed {}: {}", path.display(), e),
            },
        }
    });

    rx
}

/// A feed that never delivers anything.
pub fn idle() -> mpsc::Receiver<Value> {
    let (_, rx) = mpsc::channel(1);
    rx
}

async fn read_lines<R: AsyncBufRead + Unpin>(reader: R, tx: mpsc::Sender<Value>) {
    let mut lines = reader.lines();
    let mut count = 0usize;

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let Some(value) = parse_line(&line) else {
                    continue;
                };
                count += 1;
                if tx.send(value).await.is_err() {
                    // Receiver gone, app is shutting down
                    return;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Feed read error: {}", e);
                break;
            }
        }
    }

    info!("Feed closed after {} messages", count);
}

fn parse_line(line: &str) -> Option<Value> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Dropping non-JSON feed line: {}", e);
            None
        }
    }
}
