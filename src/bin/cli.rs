//! zee CLI
//!
//! Search and browse Quran verses and Hadith records from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use zee::{
    config,
    error::{AppError, Result},
    models::{COLLECTIONS, Locale, TypeFilter},
    render,
    services::{HadithService, QuranService, SearchAggregator},
    utils::{self, http, url::search_href},
};

/// zee - Quran and Hadith search
#[derive(Parser, Debug)]
#[command(name = "zee", version, about = "Search the Quran and Hadith collections")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "zee.toml")]
    config: PathBuf,

    /// Interface language (en or ar)
    #[arg(short, long, default_value = "en", global = true)]
    locale: Locale,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search Quran verses and hadith by text
    Search {
        /// Search terms
        query: String,

        /// Restrict to one source: all, quran or hadith
        #[arg(short = 't', long = "type", default_value = "all")]
        filter: TypeFilter,

        /// Result page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Quran translation identifier (default from config)
        #[arg(long)]
        translation: Option<String>,

        /// Treat the query as a URL slug (dashes become spaces)
        #[arg(long)]
        slug: bool,
    },

    /// Show a single verse
    Verse {
        surah: u16,
        verse: u16,

        #[arg(long)]
        translation: Option<String>,
    },

    /// Show a whole surah with its translation
    Surah {
        surah: u16,

        #[arg(long)]
        translation: Option<String>,
    },

    /// Show a single hadith
    Hadith {
        /// Collection slug (e.g. bukhari)
        collection: String,

        /// Hadith number within the collection
        number: String,
    },

    /// List translations offered by the Quran provider
    Translations,

    /// List known hadith collections
    Collections,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load_config(&cli.config)?;
    let client = http::create_async_client(&config.http)?;
    let quran = Arc::new(QuranService::from_config(client.clone(), &config)?);
    let hadith = Arc::new(HadithService::from_config(client, &config)?);
    let locale = cli.locale;

    match cli.command {
        Command::Search {
            query,
            filter,
            page,
            translation,
            slug,
        } => {
            let query = if slug {
                utils::slug_to_query(&query)
            } else {
                query
            };

            let mut aggregator = SearchAggregator::from_config(quran, hadith, &config);
            if let Some(translation) = translation {
                aggregator = aggregator.with_translation(translation);
            }

            match aggregator
                .aggregate(&query, filter, page, config.search.page_size)
                .await
            {
                Ok(results) => {
                    let text = render::render_search_page(&results, &query, locale, |p| {
                        search_href(locale, &query, filter, p)
                    });
                    println!("{text}");
                }
                Err(error @ AppError::DualSourceFailure { .. }) => {
                    println!("{}", render::render_search_failure(&error, locale));
                    return Err(error);
                }
                Err(error) => return Err(error),
            }
        }

        Command::Verse {
            surah,
            verse,
            translation,
        } => {
            let translation =
                translation.unwrap_or_else(|| quran.default_translation().to_string());
            let result = quran.get_verse(surah, verse, &translation).await?;
            println!("{}", render::render_verse(&result, &translation, locale));
        }

        Command::Surah { surah, translation } => {
            let translation =
                translation.unwrap_or_else(|| quran.default_translation().to_string());
            let chapter = quran.get_chapter(surah, &translation).await?;
            println!("{}", render::render_chapter(&chapter, locale));
        }

        Command::Hadith { collection, number } => {
            match hadith.get_hadith(&collection, &number).await {
                Some(record) => println!("{}", render::render_hadith(&record, locale)),
                None => {
                    return Err(AppError::not_found(format!("hadith {collection}:{number}")));
                }
            }
        }

        Command::Translations => {
            for translation in quran.available_translations().await? {
                println!(
                    "{:<16} {:<4} {}",
                    translation.identifier, translation.language, translation.name
                );
            }
        }

        Command::Collections => {
            for collection in COLLECTIONS {
                println!(
                    "{:<12} {:<20} {}",
                    collection.slug, collection.name, collection.grade
                );
            }
        }

        Command::Validate => {
            log::info!(
                "✓ Config OK (quran: {}, hadith: {}, page size {})",
                config.quran.base_url,
                config.hadith.base_url,
                config.search.page_size
            );
        }
    }

    Ok(())
}
