use crate::page::TagSelector;
use config::{Config, ConfigError, Environment};
use resolve_path::PathResolveExt;
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.peppercarrot.com/";

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub output_directory: String,
    pub selectors: Selectors,
}

/// Where episodes and comic pages live in the site's markup.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// Section of the homepage holding the list of episodes.
    pub container: TagSelector,
    /// One entry per episode inside the container.
    pub episode: TagSelector,
    /// Anchor inside an episode entry carrying `title` and `href`.
    pub episode_link: TagSelector,
    /// Comic page images on an episode page.
    pub comic_page: TagSelector,
}

impl Settings {
    /// Defaults, then `config_file` if it exists, then `COMIC_*` variables.
    /// Nested keys use `__`, e.g. `COMIC_SELECTORS__COMIC_PAGE__CLASS`.
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        Self::with_environment(config_file, environment())
    }

    fn with_environment(config_file: &str, env: Environment) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("output_directory", ".")?
            .set_default("selectors.container.tag", "div")?
            .set_default("selectors.container.class", "homecontent")?
            .set_default("selectors.episode.tag", "figure")?
            .set_default("selectors.episode_link.tag", "a")?
            .set_default("selectors.comic_page.tag", "img")?
            .set_default("selectors.comic_page.class", "comicpage")?
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(env)
            .build()?;
        builder.try_deserialize()
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_directory.resolve().into_owned()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("COMIC")
        .prefix_separator("_")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;

    #[test]
    fn load_config() {
        let c = Settings::new("comic.test.json").unwrap();

        assert_eq!("./test/comics", c.output_directory);
        assert_eq!("http://localhost:8080/", c.base_url.as_str());

        let container = TagSelector {
            tag: "section".into(),
            class: Some("episodes".into()),
        };
        assert_eq!(container, c.selectors.container);
        // Keys absent from the file keep their defaults
        assert_eq!(TagSelector::new("figure"), c.selectors.episode);
        assert_eq!(
            TagSelector::with_class("img", "comicpage"),
            c.selectors.comic_page
        );
    }

    #[test]
    fn missing_file_uses_defaults() {
        let c = Settings::new("does-not-exist").unwrap();

        assert_eq!(DEFAULT_BASE_URL, c.base_url.as_str());
        assert_eq!(".", c.output_directory);
        assert_eq!(
            TagSelector::with_class("div", "homecontent"),
            c.selectors.container
        );
        assert_eq!(TagSelector::new("a"), c.selectors.episode_link);
    }

    #[test]
    fn environment_overrides_file() {
        let vars = Map::from([
            ("COMIC_BASE_URL".to_string(), "http://comics.example/".to_string()),
            (
                "COMIC_SELECTORS__COMIC_PAGE__CLASS".to_string(),
                "strip".to_string(),
            ),
            ("OTHER_BASE_URL".to_string(), "http://ignored.example/".to_string()),
        ]);
        let c = Settings::with_environment("comic.test.json", environment().source(Some(vars)))
            .unwrap();

        assert_eq!("http://comics.example/", c.base_url.as_str());
        assert_eq!(TagSelector::with_class("img", "strip"), c.selectors.comic_page);
        // Untouched keys still come from the file
        assert_eq!("./test/comics", c.output_directory);
    }
}
