use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use valocoach::{
    analytics::match_summary,
    build_coach, build_stats_provider,
    chat::{ChatRole, SUGGESTED_QUESTIONS},
    config::{AppConfig, ConfigManager},
    utils, ChatSession, DashboardSession, LoadState, PlayerStats,
};

/// Valorant stats dashboard and coaching chat in the terminal
#[derive(Debug, Parser)]
#[command(name = "valocoach", version, about)]
struct Cli {
    /// Config file to use instead of the XDG default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (trace/debug/info/warn/error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct IdentityArgs {
    /// Player name (Riot ID `name#tag` for the henrik backend)
    #[arg(short, long)]
    username: Option<String>,

    /// One of NA, EU, AP, KR, BR
    #[arg(short, long)]
    region: Option<String>,
}

impl IdentityArgs {
    /// Command-line values win over config defaults
    fn resolve(&self, config: &AppConfig) -> (String, String) {
        let username = self
            .username
            .clone()
            .or_else(|| config.defaults.username.clone())
            .unwrap_or_default();
        let region = self
            .region
            .clone()
            .or_else(|| config.defaults.region.clone())
            .unwrap_or_default();
        (username, region)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the stats dashboard
    Stats {
        #[command(flatten)]
        identity: IdentityArgs,

        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start an interactive coaching chat
    Chat {
        #[command(flatten)]
        identity: IdentityArgs,
    },
    /// Ask the coach a single question
    Ask {
        #[command(flatten)]
        identity: IdentityArgs,

        message: String,
    },
    /// Inspect or reset the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    Path,
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path)?,
        None => ConfigManager::new()?,
    };
    let mut config = config_manager.load_config()?;
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }

    let _log_guard = utils::init_logging(&config.log)?;
    tracing::debug!("🎮 Starting valocoach");

    match cli.command {
        Command::Stats { identity, json } => run_stats(&config, &identity, json).await,
        Command::Chat { identity } => run_chat(&config, &identity).await,
        Command::Ask { identity, message } => run_ask(&config, &identity, &message).await,
        Command::Config { action } => run_config(&config_manager, &config, action),
    }
}

async fn run_stats(
    config: &AppConfig,
    args: &IdentityArgs,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let (username, region) = args.resolve(config);
    let provider = build_stats_provider(&config.provider)?;
    let mut session = match DashboardSession::open_for(&username, &region, provider.as_ref()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e.user_notice());
            return Ok(ExitCode::from(2));
        }
    };

    eprintln!("Loading stats for {}...", username);

    match session.load(provider.as_ref()).await {
        LoadState::Loaded(stats) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(stats).context("Failed to serialize stats")?
                );
            } else {
                print_dashboard(stats);
            }
            Ok(ExitCode::SUCCESS)
        }
        LoadState::Failed(notice) => {
            eprintln!("{}", notice);
            Ok(ExitCode::FAILURE)
        }
        LoadState::Loading => Ok(ExitCode::FAILURE),
    }
}

async fn run_chat(config: &AppConfig, args: &IdentityArgs) -> anyhow::Result<ExitCode> {
    let (username, region) = args.resolve(config);
    let session = match ChatSession::open(&username, &region) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::from(2));
        }
    };
    let coach = build_coach(&config.provider);

    if let Some(greeting) = session.transcript().last() {
        println!("coach> {}\n", greeting.content);
    }
    println!("Try asking:");
    for question in SUGGESTED_QUESTIONS {
        println!("  - {}", question);
    }
    println!("(type /quit to leave)\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            break;
        }

        match session.send(&line, coach.as_ref()).await {
            Ok(reply) => println!("coach> {}\n", reply),
            Err(e) => eprintln!("{}", e.user_notice()),
        }
    }

    let transcript = session.transcript();
    let sent = transcript
        .iter()
        .filter(|m| m.role == ChatRole::User)
        .count();
    tracing::info!(session_id = %session.id(), messages = sent, "👋 Chat session ended");

    Ok(ExitCode::SUCCESS)
}

async fn run_ask(
    config: &AppConfig,
    args: &IdentityArgs,
    message: &str,
) -> anyhow::Result<ExitCode> {
    let (username, region) = args.resolve(config);
    let session = match ChatSession::open(&username, &region) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::from(2));
        }
    };
    let coach = build_coach(&config.provider);

    match session.send(message, coach.as_ref()).await {
        Ok(reply) => {
            println!("{}", reply);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e.user_notice());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_config(
    manager: &ConfigManager,
    config: &AppConfig,
    action: ConfigAction,
) -> anyhow::Result<ExitCode> {
    match action {
        ConfigAction::Show => {
            print!(
                "{}",
                toml::to_string_pretty(config).context("Failed to serialize config")?
            );
        }
        ConfigAction::Path => println!("{}", manager.config_path().display()),
        ConfigAction::Reset => {
            manager.reset_config()?;
            println!("Configuration reset: {}", manager.config_path().display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_dashboard(stats: &PlayerStats) {
    println!(
        "{} [{}]  {}  (level {})",
        stats.username, stats.region, stats.rank, stats.level
    );
    println!("{}\n", match_summary(stats));

    println!(
        "K/D {:.2}  KAD {:.2}  HS% {}  KAST {}%  ACS {}  ADR {}  DDA/round {}",
        stats.kd_ratio,
        stats.kad_ratio,
        stats.headshot_percent,
        stats.kast,
        stats.acs,
        stats.adr,
        stats.dda_round
    );
    println!(
        "First bloods {}  Flawless rounds {}  Aces {}  Round win {}%\n",
        stats.first_bloods, stats.flawless_rounds, stats.aces, stats.round_win_percent
    );

    println!("Recent matches");
    for m in &stats.recent_matches {
        println!(
            "  {:<8} {:<10} {:<4} {}/{}/{}",
            m.date, m.map, m.result, m.kills, m.deaths, m.assists
        );
    }

    println!("\nAgents");
    for a in &stats.agent_stats {
        println!(
            "  {:<10} {:>3} matches  {:>5}% WR  {:>5} avg kills",
            a.agent, a.matches, a.win_rate, a.avg_kills
        );
    }

    println!("\nRoles");
    for r in &stats.role_stats {
        println!(
            "  {:<10} {:>5}% WR  KDA {:<5} {}",
            r.role, r.win_rate, r.kda, r.matches
        );
    }

    println!("\nWeapons");
    for w in &stats.weapon_stats {
        println!(
            "  {:<10} {:>4} kills  head {}%  body {}%  leg {}%",
            w.weapon, w.kills, w.head_percent, w.body_percent, w.leg_percent
        );
    }

    println!("\nMaps");
    for m in &stats.map_stats {
        println!("  {:<10} {:>5}% WR  {}", m.map, m.win_rate, m.matches);
    }
}
