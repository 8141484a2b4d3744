//! CLI surface for notefeed.
//!
//! Thin handlers over the library: load cache, sync, project, render. The
//! feed itself goes to stdout; logging stays on stderr.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::remote::HttpActivityLog;
use crate::{Result, cache, config, core, paths, sync};

mod render;

#[derive(Parser, Debug)]
#[command(
    name = "nf",
    version,
    about = "Local mirror of a workspace activity feed",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Machine-readable JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Config file path (default: XDG config dir).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Errors only.
    #[arg(short = 'q', long, global = true, default_value_t = false)]
    pub quiet: bool,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default config if none exists and print the paths in use.
    Init,

    /// Fetch new activity from the remote and persist the cache.
    Sync,

    /// Show the activity feed, newest first.
    #[command(alias = "list")]
    Feed(FeedArgs),

    /// Show cache location and record counts.
    Status,
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Project from the cache without syncing first.
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Show at most this many entries.
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Only entries visible to the whole workspace.
    #[arg(long, default_value_t = false)]
    pub public: bool,
}

pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => handle_init(),
        Commands::Status => handle_status(cli.json),
        cmd => {
            let cfg = config::load(cli.config.as_deref())?;
            let ctx = Ctx {
                cfg,
                json: cli.json,
            };
            match cmd {
                Commands::Sync => handle_sync(&ctx),
                Commands::Feed(args) => handle_feed(&ctx, args),
                // Handled above.
                Commands::Init | Commands::Status => Ok(()),
            }
        }
    }
}

struct Ctx {
    cfg: config::Config,
    json: bool,
}

fn remote_client(cfg: &config::Config) -> Result<(HttpActivityLog, core::SpaceId)> {
    let space = config::space_id(cfg)?;
    let base_url = config::base_url(cfg)?;
    let token = config::token(cfg)?;
    let client = HttpActivityLog::new(
        base_url,
        token,
        Duration::from_secs(cfg.api.timeout_secs),
    );
    Ok((client, space))
}

/// One sync-and-persist cycle. The cache is this process's to mutate
/// exclusively for the duration; persistence only happens when the cycle
/// actually fetched something.
fn sync_cycle(ctx: &Ctx, cache: &mut cache::ActivityCache) -> Result<sync::SyncReport> {
    let (client, space) = remote_client(&ctx.cfg)?;
    let report = sync::sync(&client, &space, cache);
    if report.changed() {
        cache::save(&paths::cache_path(), cache)?;
    }
    Ok(report)
}

fn handle_init() -> Result<()> {
    let (path, created) = config::init(&config::Config::default())?;
    if created {
        println!("wrote {}", path.display());
    } else {
        println!("config already exists at {}", path.display());
    }
    println!("cache: {}", paths::cache_path().display());
    Ok(())
}

fn handle_sync(ctx: &Ctx) -> Result<()> {
    let mut cache = cache::load(&paths::cache_path())?;
    let report = sync_cycle(ctx, &mut cache)?;
    if ctx.json {
        println!("{}", render::render_sync_json(&report)?);
    } else {
        println!("{}", render::render_sync(&report));
    }
    Ok(())
}

fn handle_feed(ctx: &Ctx, args: FeedArgs) -> Result<()> {
    let mut cache = cache::load(&paths::cache_path())?;
    if !args.offline {
        sync_cycle(ctx, &mut cache)?;
    }

    let mut pages = core::project(&cache.records, &cache.activity_ids);
    if args.public {
        pages.retain(|p| p.permitted);
    }
    if let Some(limit) = args.limit {
        pages.truncate(limit);
    }

    if ctx.json {
        println!("{}", render::render_feed_json(&pages)?);
    } else {
        print!("{}", render::render_feed(&pages));
    }
    Ok(())
}

fn handle_status(json: bool) -> Result<()> {
    let path = paths::cache_path();
    let cache = cache::load(&path)?;
    if json {
        println!("{}", render::render_status_json(&path, &cache)?);
    } else {
        print!("{}", render::render_status(&path, &cache));
    }
    Ok(())
}
