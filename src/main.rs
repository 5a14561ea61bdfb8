// src/main.rs

use cistep::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(status) => std::process::exit(status),
        Err(err) => {
            eprintln!("cistep error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> cistep::errors::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
