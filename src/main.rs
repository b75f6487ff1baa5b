mod bookmark;
mod error;
mod fetch;
mod hasura;
mod normalize;
mod record;
mod reddit;
mod settings;
mod tables;
mod vimeo;

use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use bookmark::{BookmarkResponse, PageData, PageKind};
use hasura::literal::FieldValue;
use hasura::{HasuraClient, HttpTransport};
use record::Tweet;
use settings::Settings;
use tables::TableRef;

#[derive(Parser)]
#[command(name = "bookmarker", about = "Bookmark pages, podcasts, posts and videos into Hasura")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bookmark an article from supplied metadata
    Article {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        site: String,
        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Bookmark a comic from supplied metadata
    Comic {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        creator: String,
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Scrape a castro/overcast episode page and bookmark it
    Podcast {
        url: String,
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Bookmark a Reddit post
    Reddit {
        url: String,
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Bookmark a Vimeo video (needs VIMEO_KEY)
    Vimeo {
        url: String,
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Bookmark a tweet
    Tweet {
        #[arg(long)]
        tweet: String,
        #[arg(long)]
        user: String,
        #[arg(long)]
        url: String,
    },
    /// List rows of a table ("articles", "feeds.podcasts", "media.books", ...)
    Query {
        table: String,
        /// Column to order by (default: first column)
        #[arg(short, long)]
        order: Option<String>,
    },
    /// Case-insensitive search on one column
    Search {
        table: String,
        pattern: String,
        /// Column to match (default: first column)
        #[arg(short, long)]
        column: Option<String>,
    },
    /// Frequency of each value in a column, most common first
    Count { table: String, column: String },
    /// Tags registered for a schema/table
    Tags { schema: String, table: String },
    /// Set columns on one row by id
    Update {
        table: String,
        id: String,
        /// column=value (repeatable)
        #[arg(short, long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        /// Column to return from the updated row
        #[arg(short, long, default_value = "id")]
        returning: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load().context("Failed to read configuration")?;
    let http = settings.http_client()?;
    let client = HasuraClient::new(
        HttpTransport::new(&settings, http.clone()).context("Remote store is not configured")?,
    );

    let result = match cli.command {
        Commands::Article { title, url, author, site, tags } => {
            let page = PageData { title, url, tags, kind: PageKind::Article { author, site } };
            report(bookmark::bookmark_page(&client, page).await)
        }
        Commands::Comic { title, url, creator, tags } => {
            let page = PageData { title, url, tags, kind: PageKind::Comic { creator } };
            report(bookmark::bookmark_page(&client, page).await)
        }
        Commands::Podcast { url, tags } => {
            report(bookmark::bookmark_podcast(&client, &http, &url, tags).await)
        }
        Commands::Reddit { url, tags } => {
            report(bookmark::bookmark_reddit(&client, &http, &url, tags).await)
        }
        Commands::Vimeo { url, tags } => {
            let token = settings.vimeo_token()?;
            report(bookmark::bookmark_vimeo(&client, &http, token, &url, tags).await)
        }
        Commands::Tweet { tweet, user, url } => {
            report(bookmark::bookmark_tweet(&client, Tweet { tweet, user, url }).await)
        }
        Commands::Query { table, order } => {
            let table = resolve(&table)?;
            let order = order.unwrap_or_else(|| table.columns[0].to_string());
            let rows = client.query_items(&table, &order).await?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
            println!("\n{} rows", rows.len());
            Ok(())
        }
        Commands::Search { table, pattern, column } => {
            let table = resolve(&table)?;
            let column = column.unwrap_or_else(|| table.columns[0].to_string());
            let rows = client.search_items(&table, &pattern, &column).await?;
            if rows.is_empty() {
                println!("No matches.");
                return Ok(());
            }
            println!("{}", serde_json::to_string_pretty(&rows)?);
            Ok(())
        }
        Commands::Count { table, column } => {
            let table = resolve(&table)?;
            let counts = client.aggregate_count(&table, &column).await?;
            let width = counts.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
            for (value, n) in &counts {
                println!("{:<width$} | {:>5}", value, n, width = width);
            }
            println!("\n{} distinct values", counts.len());
            Ok(())
        }
        Commands::Tags { schema, table } => {
            let tags = client.query_tags(&schema, &table).await?;
            if tags.is_empty() {
                println!("No tags for {}.{}", schema, table);
            }
            for tag in tags {
                println!("{}", tag);
            }
            Ok(())
        }
        Commands::Update { table, id, set, returning } => {
            if set.is_empty() {
                bail!("Nothing to update: pass at least one --set column=value");
            }
            let table = resolve(&table)?;
            let fields: Vec<(&str, FieldValue)> = set
                .iter()
                .map(|(k, v)| (k.as_str(), FieldValue::from(v.as_str())))
                .collect();
            let value = client.update_item(&table, &id, &fields, &returning).await?;
            println!("{}: {}", returning, value);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn resolve(table: &str) -> anyhow::Result<TableRef> {
    TableRef::parse(table).with_context(|| format!("Unknown table: {}", table))
}

fn report(response: BookmarkResponse) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("expected column=value, got `{}`", s)),
    }
}
