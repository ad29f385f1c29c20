#[tokio::main]
async fn main() -> anyhow::Result<()> {
    form781_filler::run().await
}
