use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use card_catalog::store::{CollectionRepo, NewProfile, SqliteRepo};
use card_catalog::view::{self, SortKey, ViewMode, ViewQuery};
use card_catalog::{config, dataset, db, search};

#[derive(Parser)]
#[command(version, about = "Card collection catalog CLI")]
struct Cli {
    /// Path to the config file (card_catalog.toml)
    #[arg(short, long, default_value = "card_catalog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Manage collector profiles
    Profile(ProfileCmd),
    /// Flip wanted/owned flags on cards
    Card(CardCmd),
    /// Render a catalog view for one profile
    Browse(BrowseCmd),
}

#[derive(Args)]
struct ProfileCmd {
    #[command(subcommand)]
    sub: ProfileSub,
}

#[derive(Subcommand)]
enum ProfileSub {
    /// Create a profile and print its id
    Create {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        age: i32,

        /// Optional portrait image file, stored as-is
        #[arg(long, value_name = "FILE")]
        portrait: Option<PathBuf>,
    },

    /// List all profiles in creation order
    List,

    /// Delete a profile and its card flags
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Args)]
struct CardCmd {
    #[command(subcommand)]
    sub: CardSub,
}

#[derive(Subcommand)]
enum CardSub {
    /// Mark a card wanted, or clear the flag with --off
    Want {
        /// Profile id the flag belongs to
        #[arg(long)]
        user: i64,

        /// Card key: the full-name string from the dataset
        #[arg(long)]
        card: String,

        /// Clear the flag instead of setting it
        #[arg(long)]
        off: bool,
    },

    /// Mark a card owned, or clear the flag with --off
    Own {
        /// Profile id the flag belongs to
        #[arg(long)]
        user: i64,

        /// Card key: the full-name string from the dataset
        #[arg(long)]
        card: String,

        /// Clear the flag instead of setting it
        #[arg(long)]
        off: bool,
    },

    /// Overwrite both flags at once; omitted flags are cleared
    Set {
        /// Profile id the flags belong to
        #[arg(long)]
        user: i64,

        /// Card key: the full-name string from the dataset
        #[arg(long)]
        card: String,

        /// Mark the card wanted
        #[arg(long)]
        wanted: bool,

        /// Mark the card owned
        #[arg(long)]
        owned: bool,
    },
}

#[derive(Args)]
struct BrowseCmd {
    /// Profile id whose flags annotate the catalog
    #[arg(long)]
    user: i64,

    /// Restrict to these "<year> - <set>" labels (repeatable)
    #[arg(long = "set", value_name = "LABEL")]
    sets: Vec<String>,

    /// Restrict to these illustrators (repeatable)
    #[arg(long)]
    illustrator: Vec<String>,

    /// Fuzzy text lookup, snapped to the closest catalog term
    #[arg(long)]
    query: Option<String>,

    /// Which slice to show: all, wishlist, or owned
    #[arg(long, default_value_t = ViewMode::All)]
    mode: ViewMode,

    /// Sort keys for the owned view: visual, color (repeatable)
    #[arg(long = "sort")]
    sort: Vec<SortKey>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    // 1) Config + database URL (env override wins)
    let cfg = config::load_config_path(&cli.config)?;
    let database_url = config::effective_database_url(&cfg);

    // 2) Schema up to date, then a tuned connection; every command hits the store
    db::migrate::run_sqlite(&database_url)?;
    let mut conn = db::connection::connect_sqlite(&database_url)?;
    let repo = SqliteRepo::new();

    match cli.cmd {
        Cmd::Profile(ProfileCmd { sub }) => match sub {
            ProfileSub::Create {
                first_name,
                last_name,
                age,
                portrait,
            } => {
                let portrait_bytes = match &portrait {
                    Some(path) => Some(
                        std::fs::read(path)
                            .with_context(|| format!("read portrait file {}", path.display()))?,
                    ),
                    None => None,
                };

                let id = repo.create_profile(
                    &mut conn,
                    &NewProfile {
                        first_name: &first_name,
                        last_name: &last_name,
                        age,
                        portrait: portrait_bytes.as_deref(),
                    },
                )?;
                println!("created profile {id}");
            }
            ProfileSub::List => {
                for profile in repo.list_profiles(&mut conn)? {
                    let portrait = if profile.portrait_bytes.is_some() {
                        "portrait"
                    } else {
                        "-"
                    };
                    println!(
                        "{:>4}  {} {} (age {})  {}",
                        profile.id, profile.first_name, profile.last_name, profile.age, portrait
                    );
                }
            }
            ProfileSub::Delete { id } => {
                repo.delete_profile(&mut conn, id)?;
                println!("deleted profile {id}");
            }
        },

        Cmd::Card(CardCmd { sub }) => match sub {
            CardSub::Want { user, card, off } => {
                ensure_profile_exists(&repo, &mut conn, user)?;
                repo.set_wanted(&mut conn, user, &card, !off)?;
                println!("wanted={} for {card:?}", !off);
            }
            CardSub::Own { user, card, off } => {
                ensure_profile_exists(&repo, &mut conn, user)?;
                repo.set_owned(&mut conn, user, &card, !off)?;
                println!("owned={} for {card:?}", !off);
            }
            CardSub::Set {
                user,
                card,
                wanted,
                owned,
            } => {
                ensure_profile_exists(&repo, &mut conn, user)?;
                repo.set_preference(&mut conn, user, &card, wanted, owned)?;
                println!("wanted={wanted} owned={owned} for {card:?}");
            }
        },

        Cmd::Browse(args) => browse(&cfg, &repo, &mut conn, args)?,
    }

    Ok(())
}

fn ensure_profile_exists(
    repo: &SqliteRepo,
    conn: &mut diesel::SqliteConnection,
    profile_id: i64,
) -> Result<()> {
    if repo.find_profile(conn, profile_id)?.is_none() {
        bail!("no profile with id {profile_id}");
    }
    Ok(())
}

fn browse(
    cfg: &config::AppConfig,
    repo: &SqliteRepo,
    conn: &mut diesel::SqliteConnection,
    args: BrowseCmd,
) -> Result<()> {
    // A vanished profile is a no-op, not an error.
    let Some(profile) = repo.find_profile(conn, args.user)? else {
        eprintln!("no profile with id {}; nothing to browse", args.user);
        return Ok(());
    };

    // 1) Load the dataset and publish the snapshot
    let (loaded, report) = dataset::load_dataset_path(&cfg.dataset_path)?;
    info!(
        rows = report.rows_loaded,
        duplicates = report.duplicate_keys_dropped,
        missing_year = report.rows_missing_year,
        "catalog dataset loaded"
    );
    dataset::install_catalog(loaded);
    let snap = dataset::snapshot();

    // 2) Annotate with this profile's flags
    let preferences = repo.preferences(conn, args.user)?;
    let cards = view::annotate(snap.entries(), &preferences);

    // 3) Snap free text onto the closest catalog term, then filter
    let mut query = ViewQuery {
        set_labels: args.sets,
        illustrators: args.illustrator,
        text: None,
        mode: args.mode,
    };
    if let Some(raw) = args.query.as_deref() {
        let pool = snap.search_pool();
        if let Some(matched) = search::approximate_match(raw, pool.iter().map(String::as_str)) {
            if matched != raw {
                println!("search: {raw:?} matched {matched:?}");
            }
            query.text = Some(matched.to_string());
        }
    }

    let mut cards = view::filter_cards(cards, &query);
    if query.mode == ViewMode::Owned {
        view::sort_for_collection(&mut cards, &args.sort);
    }

    // 4) One page of results
    let pages = view::page_count(cards.len(), cfg.page_size);
    if args.page < 1 || args.page > pages {
        bail!("page {} out of range (1..={pages})", args.page);
    }

    println!(
        "{} {}: {} card(s), page {}/{}",
        profile.first_name,
        profile.last_name,
        cards.len(),
        args.page,
        pages
    );
    for card in view::paginate(&cards, cfg.page_size, args.page) {
        let mut flags = String::new();
        if card.wanted {
            flags.push('w');
        }
        if card.owned {
            flags.push('o');
        }
        println!(
            "{:<2} {:<28} {:<24} {:>8}  {}",
            flags, card.entry.name, card.entry.set_label, card.entry.number, card.entry.illustrator
        );
    }

    Ok(())
}
