//! Quick-start driver for the Video Indexer Rust SDK.
//!
//! Run with:
//!   VIDEO_INDEXER_API_KEY=... \
//!   VIDEO_INDEXER_ACCOUNT_ID=... \
//!   VIDEO_INDEXER_LOCATION=eastasia \
//!   cargo run --example quickstart -- path/to/video.mp4 "my video"

use videoindexer::{ClientBuilder, PollOptions};

#[tokio::main]
async fn main() -> videoindexer::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "videoindexer=info".into()),
        )
        .init();

    // -----------------------------------------------------------------------
    // 1. Create a client (credentials from VIDEO_INDEXER_* env variables)
    // -----------------------------------------------------------------------
    let client = ClientBuilder::new().build()?;

    let path = std::env::args().nth(1).unwrap_or_else(|| "demo.mp4".into());
    let name = std::env::args().nth(2).unwrap_or_else(|| "demo video".into());

    // -----------------------------------------------------------------------
    // 2. Upload the video
    // -----------------------------------------------------------------------
    println!("Uploading {path}...");
    let video = client.upload(&path, &name, None).await?;
    println!("Upload complete. Video ID: {}", video.id);

    // -----------------------------------------------------------------------
    // 3. Wait for the remote analysis, reporting state on each poll
    // -----------------------------------------------------------------------
    let opts = PollOptions {
        on_progress: Some(Box::new(|index| {
            println!("  state: {}", index.state);
        })),
        ..Default::default()
    };

    let index = client.wait_for_processing(&video.id, opts).await?;

    // -----------------------------------------------------------------------
    // 4. Print the duration and the transcript
    // -----------------------------------------------------------------------
    if let Some(video) = index.videos.first() {
        println!("Duration: {}s", video.duration_in_seconds);
    }

    println!("Transcript:");
    for line in index.transcript() {
        println!("  {line}");
    }

    Ok(())
}
