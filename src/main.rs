use topdeck::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    let catalog = cards::Catalog::load()?;
    hosting::Server::run(catalog).await?;
    Ok(())
}
