//! Counts Unicode scalar values in `POST /op` bodies.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    text_metrics::server::run(text_metrics::ops::CHAR_COUNT).await
}
