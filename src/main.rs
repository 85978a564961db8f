#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    portal_rest::cli::run_cli().await
}
