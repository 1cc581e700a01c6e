use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{ArgGroup, Parser, Subcommand};
use std::sync::Arc;

use skyglass_client::config::{self, ExplorerConfig};
use skyglass_client::model::query::QueryOutcome;
use skyglass_client::module::{apod, epic, mars, neo, ViewStatus};
use skyglass_client::ExplorerContext;
use skyglass_common::{EpicFavorite, MarsFavorite};

#[derive(Parser)]
#[command(name = "skyglass", about = "Browse NASA open datasets from the terminal", version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Astronomy Picture of the Day over a date range
    Apod {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// Bookmark every picture (videos are skipped)
        #[arg(long)]
        favorite: bool,
    },
    /// Astronomy Picture of the Day for one date
    ApodDay {
        #[arg(long)]
        date: String,
    },
    /// Mars rover photos by Earth date or mission day
    #[command(group(ArgGroup::new("when").required(true).args(["date", "sol"])))]
    Mars {
        #[arg(long, default_value = "curiosity")]
        rover: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        sol: Option<f64>,
        /// Camera code, e.g. FHAZ; omit or ALL for every camera
        #[arg(long)]
        camera: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Toggle a photo from the results as favorite
        #[arg(long, value_name = "ID")]
        favorite: Option<u64>,
    },
    /// Near-Earth objects for the week starting at a date
    Neo {
        #[arg(long)]
        start: String,
        /// all, true (hazardous only) or false (non-hazardous only)
        #[arg(long, default_value = "all")]
        hazard: neo::HazardFilter,
    },
    /// EPIC Earth imagery; today's captures unless a date or --latest is given
    Epic {
        #[arg(long, conflicts_with = "latest")]
        date: Option<String>,
        #[arg(long)]
        latest: bool,
        /// Toggle a capture from the results as favorite
        #[arg(long, value_name = "IMAGE")]
        favorite: Option<String>,
    },
    /// Manage bookmarked images
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// Show every favorite, newest first
    List,
    /// Remove a favorite by the uid shown in `list`
    Remove { uid: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = ExplorerConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;

    // Initialize logging
    let _logging_guard = skyglass_client::logging::init_logging(&config.log_dir, "skyglass", &config.log_level)?;

    tracing::info!("skyglass starting...");

    let ctx = ExplorerContext::new(config)?;
    let result = run(&ctx, cli.command).await;
    ctx.shutdown();

    result
}

async fn run(ctx: &ExplorerContext, command: Command) -> Result<()> {
    match command {
        Command::Apod { start, end, favorite } => {
            let outcome = ctx.queries().refresh_apod_range(&start, &end).await;
            let Some(entries) = settle(&outcome, |e| e.is_empty())? else {
                return Ok(());
            };
            for entry in entries.iter() {
                println!("{}  [{}]  {}", entry.key(), entry.media_type.as_str(), entry.title);
                println!("            {}", entry.url);
            }
            if favorite {
                let mut added = 0;
                for candidate in apod::favorite_candidates(&entries) {
                    if ctx.favorites().add(candidate)? {
                        added += 1;
                    }
                }
                println!("Added {} new favorites", added);
            }
        }

        Command::ApodDay { date } => {
            let outcome = ctx.queries().refresh_apod_by_date(&date).await;
            if let Some(entry) = settle(&outcome, |_| false)? {
                println!("{}  {}", entry.key(), entry.title);
                if let Some(copyright) = &entry.copyright {
                    println!("(c) {}", copyright.trim());
                }
                println!("{}\n", entry.hdurl.as_deref().unwrap_or(&entry.url));
                println!("{}", entry.explanation);
            }
        }

        Command::Mars { rover, date, sol, camera, page, favorite } => {
            let rover: mars::Rover = rover.parse().map_err(anyhow::Error::msg)?;
            if let Some(code) = camera.as_deref().filter(|c| !c.eq_ignore_ascii_case("all")) {
                let code: mars::CameraCode = code.parse().map_err(anyhow::Error::msg)?;
                if !rover.supports(code) {
                    bail!("{} does not carry the {} camera", rover, code);
                }
            }

            let queries = ctx.queries();
            let outcome = match (date, sol) {
                (Some(date), _) => {
                    queries
                        .refresh_mars_by_earth_date(rover.as_str(), &date, camera.as_deref(), page)
                        .await
                }
                (None, Some(sol)) => {
                    queries
                        .refresh_mars_by_sol(rover.as_str(), sol, camera.as_deref(), page)
                        .await
                }
                (None, None) => QueryOutcome::NotReady,
            };
            let Some(photos) = settle(&outcome, |p| p.is_empty())? else {
                return Ok(());
            };

            for photo in &photos.photos {
                let star = if ctx.favorites().contains::<MarsFavorite>(&photo.id) { "*" } else { " " };
                println!(
                    "{} {:>8}  sol {:<5} {}  {:<8} {}",
                    star, photo.id, photo.sol, photo.earth_date, photo.camera.name, photo.img_src
                );
            }
            if mars::has_next_page(&photos) {
                println!("More photos available: --page {}", page.max(1) + 1);
            }

            if let Some(id) = favorite {
                let Some(photo) = photos.photos.iter().find(|p| p.id == id) else {
                    bail!("Photo {} is not on this page", id);
                };
                let now = ctx.favorites().toggle(MarsFavorite::from(photo))?;
                println!("Photo {} {}", id, if now { "added to favorites" } else { "removed from favorites" });
            }
        }

        Command::Neo { start, hazard } => {
            let Some(start) = chrono::NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d").ok() else {
                bail!("Invalid start date {:?}, expected YYYY-MM-DD", start);
            };
            let (start, end) = neo::week_range(start, Local::now().date_naive());
            let outcome = ctx
                .queries()
                .refresh_neo_feed(&start.to_string(), &end.to_string())
                .await;
            let Some(feed) = settle(&outcome, |f| f.is_empty())? else {
                return Ok(());
            };

            let rows = neo::rows(&feed, hazard);
            println!("{} objects between {} and {} ({} shown)", feed.element_count, start, end, rows.len());
            for row in rows {
                println!(
                    "{} {:<24} {:>14} km  {:>8} km/s  {}",
                    if row.hazardous { "!" } else { " " },
                    row.name,
                    row.miss_km.map_or("-".to_string(), |v| format!("{:.0}", v)),
                    row.velocity_kps.map_or("-".to_string(), |v| format!("{:.2}", v)),
                    row.approach_date.map_or("-".to_string(), |d| d.to_string()),
                );
            }
        }

        Command::Epic { date, latest, favorite } => {
            let queries = ctx.queries();
            let mut outcome = if latest {
                queries.refresh_epic_latest().await
            } else if let Some(date) = &date {
                queries.refresh_epic_by_date(date).await
            } else {
                queries.epic_today(Local::now().date_naive()).await
            };

            // Today's set is often not published yet; fall back to the latest one.
            let today_is_empty = !latest && date.is_none() && outcome.data().is_some_and(|d| d.is_empty());
            if today_is_empty {
                println!("No captures for today yet, showing the latest available set");
                outcome = queries.epic_latest().await;
            }

            let Some(images) = settle(&outcome, |i| i.is_empty())? else {
                return Ok(());
            };
            if let Some(day) = epic::display_day(&images) {
                println!("EPIC natural color, {}", day);
            }
            for image in images.iter() {
                let key = (image.date.clone(), image.image.clone());
                let star = if ctx.favorites().contains::<EpicFavorite>(&key) { "*" } else { " " };
                println!("{} {}  {}", star, image.date, ctx.endpoints().epic_image_url(&image.date, &image.image));
            }

            if let Some(name) = favorite {
                let Some(image) = images.iter().find(|i| i.image == name) else {
                    bail!("Image {} is not in this set", name);
                };
                let now = ctx.favorites().toggle(EpicFavorite::from(image))?;
                println!("{} {}", name, if now { "added to favorites" } else { "removed from favorites" });
            }
        }

        Command::Favorites { action } => match action {
            FavoritesAction::List => {
                let items = ctx.favorites().all_items(ctx.endpoints());
                if items.is_empty() {
                    println!("No favorites yet");
                }
                for item in items {
                    println!(
                        "{:<12} {:<44} {}",
                        item.date_label.as_deref().unwrap_or("-"),
                        item.uid,
                        item.title
                    );
                    println!("{:<12} {}", "", item.src);
                }
            }
            FavoritesAction::Remove { uid } => {
                if ctx.favorites().remove_by_uid(&uid)? {
                    println!("Removed {}", uid);
                } else {
                    println!("No favorite with uid {}", uid);
                }
            }
        },
    }

    Ok(())
}

/// Print the state of a settled query; returns the data only when there is some to show
fn settle<T>(outcome: &QueryOutcome<T>, is_empty: impl FnOnce(&T) -> bool) -> Result<Option<Arc<T>>> {
    match ViewStatus::classify(outcome, is_empty) {
        ViewStatus::Ready => Ok(outcome.data().cloned()),
        ViewStatus::NotReady => bail!("Incomplete or malformed search filters"),
        ViewStatus::Canceled => Ok(None),
        ViewStatus::Failed(message) => {
            if let Some(rate) = outcome.error().and_then(|e| e.rate_limit()) {
                tracing::warn!("Rate limit: {:?}", rate);
            }
            bail!(message)
        }
        status => {
            if let Some(message) = status.message() {
                println!("{}", message);
            }
            Ok(None)
        }
    }
}
