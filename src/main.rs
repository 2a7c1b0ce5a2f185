use comic_scraper::{run, Cli, Settings};
use env_logger::{Builder, Env, Target};
use log::error;
use std::process;

#[tokio::main]
async fn main() {
    // Init logging
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stdout);
    builder.init();

    // Parse Args
    let args = Cli::new();

    // Parse Settings
    let settings = Settings::new(&args.config_file);
    if let Err(e) = settings {
        error!("Configuration error: {}", e);
        process::exit(1);
    }
    let mut s = settings.unwrap();
    if let Some(dir) = args.output_directory {
        s.output_directory = dir;
    }
    if let Some(url) = args.base_url {
        s.base_url = url;
    }

    // Run
    if let Err(e) = run(s).await {
        error!("Application error: {:#}", e);
        process::exit(1);
    }
}
