#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    helpdesk_assets_server::run().await
}
