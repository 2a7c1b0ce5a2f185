use crate::configuration::{Selectors, Settings};
use crate::fetcher::{Fetched, Fetcher};
use crate::image_writer::{file_name_for, DownloadedImage};
use crate::models::{EpisodeLink, ImageReference, Report};
use crate::page::Page;
use anyhow::bail;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::fs;
use url::Url;

/// Homepage → episodes → comic pages, one request at a time, in document
/// order. Only a failure to read the homepage or to write an image stops the
/// run; anything else that fails is logged and skipped.
pub async fn run(settings: Settings) -> anyhow::Result<Report> {
    let fetcher = Fetcher::new();
    let selectors = &settings.selectors;
    let mut report = Report::default();
    let mut written = HashSet::new();

    let Some(homepage) = loaded(&settings.base_url, fetcher.fetch_text(&settings.base_url).await)
    else {
        bail!("unable to load homepage {}", settings.base_url);
    };
    let episodes = episode_links(&homepage, &settings.base_url, selectors)?;
    debug!("Found {} episodes", episodes.len());

    let output = settings.output_path();
    info!("Output Directory: {}", output.display());
    fs::create_dir_all(&output)?;

    for episode in episodes {
        report.episodes += 1;
        info!("{} : {}", episode.title, episode.href);

        let Some(page) = loaded(&episode.href, fetcher.fetch_text(&episode.href).await) else {
            report.episodes_skipped += 1;
            continue;
        };

        let images = comic_pages(&page, &episode.href, selectors)?;
        if images.is_empty() {
            warn!("No `{}` found on {}", selectors.comic_page, episode.href);
        }

        for image in images {
            info!("{}", image.src);
            let Some(file_name) = file_name_for(&image.src) else {
                warn!("No file name in {}, skipping", image.src);
                report.images_skipped += 1;
                continue;
            };

            let Some(bytes) = loaded(&image.src, fetcher.fetch(&image.src).await) else {
                report.images_skipped += 1;
                continue;
            };

            let downloaded = DownloadedImage::decode(file_name, &image.src, bytes)?;
            if !written.insert(downloaded.file_name.clone()) {
                warn!(
                    "{} from {} overwrites an image saved earlier in this run",
                    downloaded.file_name, image.src
                );
            }
            report.saved.push(downloaded.save(&output)?);
        }
    }

    info!(
        "Finished! {} images saved from {} episodes ({} episodes and {} images skipped)",
        report.saved.len(),
        report.episodes,
        report.episodes_skipped,
        report.images_skipped
    );
    Ok(report)
}

/// Body of a successful fetch. `None`, after logging, when the request failed
/// or answered with a non-success status.
fn loaded<B>(url: &Url, result: reqwest::Result<Fetched<B>>) -> Option<B> {
    match result {
        Ok(fetched) if fetched.is_success() => Some(fetched.body),
        Ok(fetched) => {
            error!("Failed to load {}: {}", url, fetched.status);
            None
        }
        Err(e) => {
            error!("Failed to load {}: {}", url, e);
            None
        }
    }
}

fn episode_links(
    html: &str,
    page_url: &Url,
    selectors: &Selectors,
) -> anyhow::Result<Vec<EpisodeLink>> {
    let page = Page::parse(html);
    let Some(container) = page.find(&selectors.container)? else {
        bail!(
            "homepage container `{}` not found at {}",
            selectors.container,
            page_url
        );
    };

    let mut links = Vec::new();
    for entry in container.find_all(&selectors.episode) {
        match EpisodeLink::from_entry(entry, &selectors.episode_link, page_url) {
            Ok(link) => links.push(link),
            Err(e) => warn!("Skipping episode entry on {}: {}", page_url, e),
        }
    }
    Ok(links)
}

fn comic_pages(
    html: &str,
    page_url: &Url,
    selectors: &Selectors,
) -> anyhow::Result<Vec<ImageReference>> {
    let page = Page::parse(html);
    let mut images = Vec::new();
    for element in page.select(&selectors.comic_page)? {
        match ImageReference::from_element(&element, page_url) {
            Ok(image) => images.push(image),
            Err(e) => warn!("Skipping image on {}: {}", page_url, e),
        }
    }
    Ok(images)
}
