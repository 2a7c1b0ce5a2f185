use clap::Parser;
use url::Url;

/// Download every comic page of a webcomic into a local directory
#[derive(clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file, the extension may be omitted
    #[arg(short, long, default_value = "comic")]
    pub config_file: String,

    /// Directory images are written to, overrides the configuration file
    #[arg(short, long)]
    pub output_directory: Option<String>,

    /// Homepage listing the episodes, overrides the configuration file
    #[arg(short, long)]
    pub base_url: Option<Url>,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}
