//! CLI entry point for the fantasy basketball dashboard.
//!
//! `refresh` pulls the league from the fantasy API and writes the CSV
//! tables; the view subcommands render those tables, and `compare` queries
//! the NBA stats API directly.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use fantasy_hoops::analyzers::aggregate::latest_week;
use fantasy_hoops::analyzers::analyzer::refresh;
use fantasy_hoops::analyzers::comparison::{Mode, Period, compare_players};
use fantasy_hoops::analyzers::types::{MatchupResult, Standing, TeamLogo};
use fantasy_hoops::config::{DataSettings, LeagueSettings};
use fantasy_hoops::infra::nba::NbaStatsClient;
use fantasy_hoops::infra::yahoo::{YahooLeague, authenticate};
use fantasy_hoops::output::{DataFiles, read_season_stats, read_table};
use fantasy_hoops::report;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "fantasy_hoops")]
#[command(about = "Category rankings and matchups for a fantasy basketball league", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every week of the league and rewrite the CSV tables
    Refresh {
        #[command(flatten)]
        league: LeagueSettings,

        #[command(flatten)]
        data: DataSettings,
    },
    /// Show the weekly category leaderboard
    Leaderboard {
        /// Week to show (defaults to the latest stored week)
        #[arg(short, long)]
        week: Option<u32>,

        #[command(flatten)]
        data: DataSettings,
    },
    /// Show the league standings
    Standings {
        #[command(flatten)]
        data: DataSettings,
    },
    /// Show the current week's matchups
    Matchups {
        #[command(flatten)]
        data: DataSettings,
    },
    /// Chart the latest week's adjusted ranks
    FreeAgency {
        #[command(flatten)]
        data: DataSettings,
    },
    /// Compare active NBA players over a recent period
    Compare {
        /// Player full names, e.g. "LeBron James"
        #[arg(required = true, num_args = 2..=5)]
        players: Vec<String>,

        /// Number of days to look back, or "season"
        #[arg(short, long, default_value = "7")]
        period: Period,

        #[arg(short, long, value_enum, default_value_t = Mode::Average)]
        mode: Mode,

        /// Season of the game logs
        #[arg(long, env = "NBA_SEASON", default_value = "2024-25")]
        season: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/fantasy_hoops.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("fantasy_hoops.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Refresh { league, data } => {
            // Secrets are checked before the first request goes out.
            let source = league.keypair_source()?;
            let keypair = authenticate(&source).await?;
            let api = YahooLeague::connect(&keypair, league.league_key()).await?;

            let summary = refresh(&api, &data.data_dir).await?;
            println!(
                "Week {}: {} team-weeks, {} standings, {} matchups, {} logos written to {}",
                summary.current_week,
                summary.season_rows,
                summary.standings,
                summary.matchups,
                summary.logos,
                data.data_dir.display()
            );
        }
        Commands::Leaderboard { week, data } => {
            let rows = read_season_stats(&DataFiles::new(&data.data_dir).season)?;
            let Some(week) = week.or_else(|| latest_week(&rows)) else {
                bail!("No season data found; run `refresh` first");
            };
            println!("{}", report::render_leaderboard(&rows, week));
        }
        Commands::Standings { data } => {
            let files = DataFiles::new(&data.data_dir);
            let standings: Vec<Standing> = read_table(&files.standings)?;
            let logos: Vec<TeamLogo> = read_table(&files.logos)?;
            println!("{}", report::render_standings(&standings, &logos));
        }
        Commands::Matchups { data } => {
            let matchups: Vec<MatchupResult> =
                read_table(&DataFiles::new(&data.data_dir).matchups)?;
            println!("{}", report::render_matchups(&matchups));
        }
        Commands::FreeAgency { data } => {
            let rows = read_season_stats(&DataFiles::new(&data.data_dir).season)?;
            let Some(week) = latest_week(&rows) else {
                bail!("No season data found; run `refresh` first");
            };
            println!("{}", report::render_free_agency(&rows, week));
        }
        Commands::Compare {
            players,
            period,
            mode,
            season,
        } => {
            let api = NbaStatsClient::new(&season)?;
            let today = chrono::Local::now().date_naive();

            let summaries = compare_players(&api, &players, &season, period, mode, today).await?;
            if summaries.is_empty() {
                warn!(%period, "None of the players have games in this period");
                return Ok(());
            }

            info!(players = summaries.len(), %period, ?mode, "Comparison ready");
            println!("{period}");
            println!("{}", report::render_comparison(&summaries));
        }
    }

    Ok(())
}
