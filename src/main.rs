//! `aqua-history` binary entry point.

use aqua::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = aqua::telemetry::init_tracing() {
        eprintln!("Warning: {e}");
    }

    match aqua::cli::run(&cli).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
