use crate::page::{Element, TagSelector};
use anyhow::{anyhow, Context};
use std::path::PathBuf;
use url::Url;

/// An episode entry found on the homepage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeLink {
    pub title: String,
    pub href: Url,
}

impl EpisodeLink {
    /// Reads the anchor inside an episode entry. `href` is resolved against
    /// the page the entry was found on.
    pub fn from_entry(
        entry: &Element,
        link: &TagSelector,
        page_url: &Url,
    ) -> anyhow::Result<Self> {
        let anchor = entry
            .find_first(link)
            .ok_or_else(|| anyhow!("episode entry has no `{}`", link))?;
        let href = anchor
            .attr("href")
            .ok_or_else(|| anyhow!("episode link has no href"))?;
        let href = page_url
            .join(href)
            .with_context(|| format!("invalid episode link `{}`", href))?;

        Ok(EpisodeLink {
            title: anchor.attr("title").unwrap_or_default().to_string(),
            href,
        })
    }
}

/// A comic page image found on an episode page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub src: Url,
}

impl ImageReference {
    pub fn from_element(image: &Element, page_url: &Url) -> anyhow::Result<Self> {
        let src = image
            .attr("src")
            .ok_or_else(|| anyhow!("comic page has no src"))?;
        let src = page_url
            .join(src)
            .with_context(|| format!("invalid image source `{}`", src))?;
        Ok(ImageReference { src })
    }
}

/// What a traversal did.
#[derive(Debug, Default)]
pub struct Report {
    pub episodes: usize,
    pub episodes_skipped: usize,
    pub images_skipped: usize,
    pub saved: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;

    fn first(html: &str, selector: &TagSelector) -> Element {
        Page::parse(html).find(selector).unwrap().unwrap()
    }

    #[test]
    fn episode_link_resolves_relative_href() {
        let base = Url::parse("https://www.peppercarrot.com/en/").unwrap();
        let entry = first(
            r#"<figure><a title="Episode 10" href="episode10.html">x</a></figure>"#,
            &TagSelector::new("figure"),
        );

        let link = EpisodeLink::from_entry(&entry, &TagSelector::new("a"), &base).unwrap();
        assert_eq!("Episode 10", link.title);
        assert_eq!(
            "https://www.peppercarrot.com/en/episode10.html",
            link.href.as_str()
        );
    }

    #[test]
    fn episode_link_without_title() {
        let base = Url::parse("https://www.peppercarrot.com/").unwrap();
        let entry = first(
            r#"<figure><a href="https://cdn.example.org/ep.html">x</a></figure>"#,
            &TagSelector::new("figure"),
        );

        let link = EpisodeLink::from_entry(&entry, &TagSelector::new("a"), &base).unwrap();
        assert_eq!("", link.title);
        assert_eq!("https://cdn.example.org/ep.html", link.href.as_str());
    }

    #[test]
    fn episode_link_requires_href() {
        let base = Url::parse("https://www.peppercarrot.com/").unwrap();
        let entry = first(
            r#"<figure><a title="Soon">x</a></figure>"#,
            &TagSelector::new("figure"),
        );
        assert!(EpisodeLink::from_entry(&entry, &TagSelector::new("a"), &base).is_err());

        let entry = first("<figure><span>x</span></figure>", &TagSelector::new("figure"));
        assert!(EpisodeLink::from_entry(&entry, &TagSelector::new("a"), &base).is_err());
    }

    #[test]
    fn image_reference_requires_src() {
        let base = Url::parse("https://www.peppercarrot.com/en/episode10.html").unwrap();
        let img = first(
            r#"<img class="comicpage" src="/0_sources/ep10/page01.jpg">"#,
            &TagSelector::new("img"),
        );
        let image = ImageReference::from_element(&img, &base).unwrap();
        assert_eq!(
            "https://www.peppercarrot.com/0_sources/ep10/page01.jpg",
            image.src.as_str()
        );

        let img = first(r#"<img class="comicpage">"#, &TagSelector::new("img"));
        assert!(ImageReference::from_element(&img, &base).is_err());
    }
}
