//! Binary entrypoint for the `spacecopy` CLI.

#[tokio::main]
async fn main() {
    let exit_code = spacecopy_cli::run().await;
    std::process::exit(exit_code);
}
