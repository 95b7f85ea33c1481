use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ragkit_cli::main_entry().await
}
