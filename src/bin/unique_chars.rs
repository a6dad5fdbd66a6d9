//! Counts distinct characters in `POST /op` bodies.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    text_metrics::server::run(text_metrics::ops::UNIQUE_CHARS).await
}
