#[tokio::main]
async fn main() -> anyhow::Result<()> {
    flashy_backend::run().await
}
