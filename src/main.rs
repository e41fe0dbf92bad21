use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use url::Url;

use podbrowse::api::DEFAULT_API_BASE;
use podbrowse::view::DEFAULT_PAGE_SIZE;
use podbrowse::{
    Directory, DirectoryOptions, NoopReporter, PodcastSummary, ProgressEvent, ProgressReporter,
    ReqwestClient, Route, SharedProgressReporter, SortOption, ViewAction, all_genres,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static PLAY: Emoji<'_, '_> = Emoji("▶️  ", "> ");

/// Browse the podcast directory
#[derive(Parser, Debug)]
#[command(name = "podbrowse")]
#[command(about = "Search, filter and inspect podcasts from the podcast directory")]
#[command(version)]
struct Args {
    /// Base URL of the podcast API
    #[arg(long, global = true, default_value = DEFAULT_API_BASE)]
    api_url: Url,

    /// Quiet mode - suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of the catalog
    List {
        /// Only podcasts whose title contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only podcasts in this genre id (see `genres`)
        #[arg(short, long)]
        genre: Option<u32>,

        /// Sort order: latest, oldest, title-asc, title-desc
        #[arg(long)]
        sort: Option<SortOption>,

        /// Page to show, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Podcasts per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show seasons and episodes of one podcast
    Show {
        /// Podcast id or route such as /podcast/10716
        target: String,

        /// Expand this season and list its episodes
        #[arg(short, long)]
        season: Option<u32>,
    },

    /// List the known genres
    Genres,
}

/// Progress reporter using an indicatif spinner per fetch
struct SpinnerReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl SpinnerReporter {
    fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start(&self, message: String) {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap();

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(message);
        bar.enable_steady_tick(std::time::Duration::from_millis(100));

        if let Some(previous) = self.spinner.lock().unwrap().replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn finish(&self) {
        if let Some(bar) = self.spinner.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }

    fn fail(&self, message: String) {
        match self.spinner.lock().unwrap().take() {
            Some(bar) => bar.abandon_with_message(message),
            None => eprintln!("{message}"),
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingCatalog { url } => {
                self.start(format!("{SEARCH}Fetching catalog: {}", url.cyan()));
            }

            ProgressEvent::CatalogLoaded { .. } => self.finish(),

            ProgressEvent::CatalogFailed { error } => {
                self.fail(format!("{FAILURE}{}", error.red()));
            }

            ProgressEvent::FetchingDetail { podcast_id } => {
                self.start(format!("{HEADPHONES}Loading seasons for {}", podcast_id.cyan()));
            }

            ProgressEvent::DetailLoaded { .. } => self.finish(),

            // The spinner belongs to the newer fetch
            ProgressEvent::DetailDiscarded { .. } => {}

            ProgressEvent::DetailFailed { error, .. } => {
                self.fail(format!("{FAILURE}{}", error.red()));
            }
        }
    }
}

#[derive(Serialize)]
struct PageOutput<'a> {
    page: usize,
    page_count: usize,
    total: usize,
    podcasts: Vec<&'a PodcastSummary>,
}

fn truncate_text(text: &str, max_len: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut.trim_end())
    }
}

fn print_podcast_card(podcast: &PodcastSummary) {
    println!(
        "{} {}",
        podcast.title.bold().green(),
        format!("({})", podcast.id).dimmed()
    );
    println!(
        "  {} • {} • Updated {}",
        podcast.genre_list().yellow(),
        podcast.seasons_label(),
        podcast.updated.cyan()
    );
    if !podcast.description.trim().is_empty() {
        println!("  {}", truncate_text(&podcast.description, 100).dimmed());
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "podbrowse=debug,warn"
    } else {
        "warn"
    };
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter.as_str())
        .with_target(false)
        .init();
}

fn parse_target(target: &str) -> Result<Route> {
    if target.starts_with('/') {
        target
            .parse()
            .with_context(|| format!("Invalid podcast route '{target}'"))
    } else {
        Ok(Route::Podcast(target.to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let json_output = matches!(args.command, Command::List { json: true, .. });
    let quiet = args.quiet || json_output;

    if !quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podbrowse".bold().magenta(),
            "- Podcast Directory".dimmed()
        );
    }

    let reporter: SharedProgressReporter = if quiet {
        NoopReporter::shared()
    } else {
        Arc::new(SpinnerReporter::new())
    };

    match args.command {
        Command::List {
            search,
            genre,
            sort,
            page,
            page_size,
            json,
        } => {
            let options = DirectoryOptions {
                api_base: args.api_url,
                page_size,
                ..Default::default()
            };
            let mut directory = Directory::new(ReqwestClient::new(), options, reporter);

            if !directory.load().await {
                bail!(
                    "{}",
                    directory.error().unwrap_or("Failed to load podcasts")
                );
            }

            if let Some(search) = search {
                directory.dispatch(ViewAction::SetSearch(search));
            }
            directory.dispatch(ViewAction::SetGenre(genre));
            directory.dispatch(ViewAction::SetSort(sort));
            directory.dispatch(ViewAction::SetPage(page));

            let displayed = directory.displayed_podcasts();
            let current_page = directory.view_state().current_page;

            if json {
                let output = PageOutput {
                    page: current_page,
                    page_count: directory.page_count(),
                    total: directory.filtered_podcasts().len(),
                    podcasts: displayed,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).context("Failed to encode page")?
                );
                return Ok(());
            }

            if let Some(message) = directory.no_results_message() {
                println!("{}", message.yellow());
                return Ok(());
            }

            for podcast in &displayed {
                print_podcast_card(podcast);
                println!();
            }

            if displayed.is_empty() {
                println!("{}", "Nothing on this page.".yellow());
            }

            println!(
                "Page {} of {} • {} podcasts",
                current_page.to_string().cyan(),
                directory.page_count().to_string().cyan(),
                directory.filtered_podcasts().len().to_string().cyan()
            );
        }

        Command::Show { target, season } => {
            let route = parse_target(&target)?;
            let options = DirectoryOptions {
                api_base: args.api_url,
                ..Default::default()
            };
            let mut directory = Directory::new(ReqwestClient::new(), options, reporter);

            directory.navigate(route.clone()).await;
            if !directory.load().await {
                bail!(
                    "{}",
                    directory.error().unwrap_or("Failed to load podcasts")
                );
            }

            let Some(podcast) = directory.selected_podcast().cloned() else {
                bail!("No podcast found for '{}'", route);
            };

            print_podcast_card(&podcast);
            if !podcast.description.trim().is_empty() {
                println!("\n{}", podcast.description.trim());
            }
            println!();

            if let Some(error) = directory.detail().error() {
                println!("{FAILURE}{}", error.red());
                return Ok(());
            }

            if let Some(number) = season
                && !directory.toggle_season(number)
            {
                println!("{}", format!("Season {number} not found").yellow());
            }

            for item in directory.detail().seasons() {
                println!(
                    "{} {} {}",
                    format!("S{}", item.number).cyan(),
                    item.title.bold(),
                    format!("({})", item.episodes_label()).dimmed()
                );
            }

            if let Some(expanded) = directory.detail().expanded_season() {
                println!("\n{}", expanded.title.bold().green());
                for episode in &expanded.episodes {
                    println!(
                        "  {} {}",
                        format!("Episode {}", episode.number).cyan(),
                        episode.title.bold()
                    );
                    println!(
                        "    {}",
                        truncate_text(episode.description_or_placeholder(), 120).dimmed()
                    );
                    println!("    {PLAY}{}", episode.file.underline());
                }
            }

            directory.close_full();
        }

        Command::Genres => {
            for genre in all_genres() {
                println!("{:>3}  {}", genre.id.to_string().cyan(), genre.title);
            }
        }
    }

    Ok(())
}
