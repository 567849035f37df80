use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use nasa_photos::cli::Cli;
use nasa_photos::collection::CollectionRepository;
use nasa_photos::config::Config;
use nasa_photos::http::{GetService, HttpGetService};
use nasa_photos::logging::init_tracing;
use nasa_photos::pager::{PagedCollection, Pager, PagerStatus};
use nasa_photos::photos::{
    AssetManifestRepository, HttpAssetManifestRepository, Photo, PhotoBuilder, PhotoDetailsModel,
    PhotoEntity,
};
use nasa_photos::present::{ListViewModel, PhotoDescriptionFormatter};

type PhotoList = ListViewModel<Photo, String>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let service: Arc<dyn GetService> = Arc::new(
        HttpGetService::from_config(&config.service).context("Failed to build HTTP client")?,
    );
    let search_url = config.search_url()?;
    tracing::info!(url = %search_url, pages = config.browse.pages, "Searching");

    let repository = CollectionRepository::<PhotoEntity>::new(search_url, Arc::clone(&service));
    let builder = PhotoBuilder;
    let pager = Arc::new(Pager::new(repository, move |index, item| {
        builder.make_photo(index, item)
    }));

    let formatter = PhotoDescriptionFormatter::new(config.browse.date_format.clone());
    let collection: Arc<dyn PagedCollection<Photo>> = pager.clone();
    let mut list = ListViewModel::new(collection, config.browse.max_retries, move |photo: &Photo| {
        let title = photo.title.as_deref().unwrap_or("(untitled)");
        let description = formatter.describe_photo(photo);
        if description.is_empty() {
            title.to_string()
        } else {
            format!("{title} - {description}")
        }
    });

    tokio::select! {
        result = load_pages(&mut list, config.browse.pages) => result?,
        _ = tokio::signal::ctrl_c() => {
            pager.cancel();
            eprintln!("Interrupted, showing results loaded so far");
        }
    }

    let manifests: Arc<dyn AssetManifestRepository> =
        Arc::new(HttpAssetManifestRepository::new(service));

    for (index, line) in list.items().iter().enumerate() {
        println!("{}. {}", index + 1, line);

        if !cli.details {
            continue;
        }
        let Some(photo) = list.select_item(index) else {
            continue;
        };
        let details = PhotoDetailsModel::new(
            photo,
            config.browse.preview_variants.clone(),
            Arc::clone(&manifests),
        );
        let mut errors = details.errors();
        details.reload().await;

        match (details.current().preview_url, errors.try_recv()) {
            (Some(url), _) => println!("   preview: {url}"),
            (None, Ok(error)) => println!("   preview unavailable: {error}"),
            (None, Err(_)) => println!("   no preview"),
        }
    }

    Ok(())
}

/// Fetches up to `pages` pages, retrying failures while the list offers it.
async fn load_pages(list: &mut PhotoList, pages: u32) -> Result<()> {
    for page in 1..=pages {
        list.fetch();
        list.wait_idle().await;

        while let Some(prompt) = list.try_error() {
            if !prompt.retry_offered {
                bail!("Giving up on page {page}: {}", prompt.message);
            }
            tracing::warn!(page, error = %prompt.message, "Retrying page");
            list.retry();
            list.wait_idle().await;
        }

        if list.status() == PagerStatus::Exhausted {
            tracing::info!(page, "No more results");
            break;
        }
    }
    Ok(())
}
