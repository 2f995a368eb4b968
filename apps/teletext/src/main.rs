use std::fs;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use teletext::config::Config;
use teletext::layout::TableColumn;
use teletext::legalize::legalize_page;
use teletext::models::{Colour, Page};
use teletext::pages::listings::{listing_page, ProgrammeEntry};
use teletext::pages::news::{article_pages, front_page, index_page, Article};
use teletext::pages::tables::table_page;
use teletext::substitute::{DateStamp, Substitutions};
use teletext::templates::{JsonDirSink, PageSink, TemplateStore};

/// Page numbers of the standing sections.
const FRONT_PAGE: u16 = 100;
const NEWS_INDEX_PAGE: u16 = 101;
const NEWS_FIRST_PAGE: u16 = 102;
const NEWS_MAX_PAGES: usize = 20;
const LISTINGS_PAGE: u16 = 300;
const STANDINGS_PAGE: u16 = 235;

/// One render run's worth of scraped feed data.
#[derive(Debug, Default, Deserialize)]
struct FeedBundle {
    #[serde(default)]
    articles: Vec<Article>,
    #[serde(default)]
    programmes: Vec<ProgrammeEntry>,
    #[serde(default)]
    standings: Vec<Map<String, Value>>,
}

fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting teletext renderer v{}", env!("CARGO_PKG_VERSION"));

    let feed: FeedBundle = {
        let raw = fs::read_to_string(&config.input)
            .with_context(|| format!("reading feed bundle {}", config.input.display()))?;
        serde_json::from_str(&raw).context("parsing feed bundle")?
    };
    info!(
        articles = feed.articles.len(),
        programmes = feed.programmes.len(),
        standings = feed.standings.len(),
        "feed bundle loaded"
    );

    let templates = TemplateStore::new(&config.template_dir);
    let mut sink = JsonDirSink::new(&config.output_dir)?;
    let subs = Substitutions::for_date(&DateStamp::today());

    // Each section renders independently; a broken template or feed section
    // must not take the whole run down.
    if let Err(e) = render_news(&feed, &templates, &subs, &mut sink) {
        warn!("news section failed: {e:#}");
    }
    if let Err(e) = render_listings(&feed, &templates, &subs, &mut sink) {
        warn!("listings section failed: {e:#}");
    }
    if let Err(e) = render_standings(&feed, &templates, &subs, &mut sink) {
        warn!("standings section failed: {e:#}");
    }

    info!("render run complete");
    Ok(())
}

fn export(page: Page, sink: &mut JsonDirSink) -> Result<()> {
    let page = legalize_page(page);
    sink.export(&page)?;
    Ok(())
}

fn render_news(
    feed: &FeedBundle,
    templates: &TemplateStore,
    subs: &Substitutions,
    sink: &mut JsonDirSink,
) -> Result<()> {
    let article_template = templates.load("news_article.json")?;
    let index_template = templates.load("news_index.json")?;
    let front_template = templates.load("front.json")?;

    let (pages, headlines) = article_pages(
        &feed.articles,
        &article_template,
        NEWS_FIRST_PAGE,
        NEWS_MAX_PAGES,
        subs,
    )?;
    for page in pages {
        export(page, sink)?;
    }
    export(index_page(&headlines, &index_template, NEWS_INDEX_PAGE, subs)?, sink)?;
    export(front_page(&headlines, &front_template, FRONT_PAGE, subs)?, sink)?;
    Ok(())
}

fn render_listings(
    feed: &FeedBundle,
    templates: &TemplateStore,
    subs: &Substitutions,
    sink: &mut JsonDirSink,
) -> Result<()> {
    let template = templates.load("listings.json")?;
    export(
        listing_page(&feed.programmes, &template, LISTINGS_PAGE, subs)?,
        sink,
    )?;
    Ok(())
}

fn render_standings(
    feed: &FeedBundle,
    templates: &TemplateStore,
    subs: &Substitutions,
    sink: &mut JsonDirSink,
) -> Result<()> {
    let template = templates.load("standings.json")?;
    // Position, club, points, goal difference, won/drawn/lost.
    let columns = vec![
        TableColumn::new(2, "position", Colour::Yellow).right_aligned(),
        TableColumn::new(13, "club", Colour::Cyan),
        TableColumn::new(3, "points", Colour::Yellow).right_aligned(),
        TableColumn::new(7, "goals", Colour::White),
        TableColumn::new(6, "record", Colour::White),
    ];
    export(
        table_page(&feed.standings, &columns, &template, STANDINGS_PAGE, subs)?,
        sink,
    )?;
    Ok(())
}
