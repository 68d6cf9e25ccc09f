#[actix_web::main]
async fn main() -> std::io::Result<()> {
    mediation_form_server::run().await
}
