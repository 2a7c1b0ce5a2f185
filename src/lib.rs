pub mod configuration;
pub mod fetcher;
pub mod image_writer;
pub mod models;
pub mod page;
pub mod run;

pub use configuration::Settings;
pub use models::Cli;
pub use run::run;
