use anyhow::Context;
use clap::Parser;
use golf_scorecard::adapters::StdinSource;
use golf_scorecard::config::toml_config::LogFormat;
use golf_scorecard::config::Command;
use golf_scorecard::core::session::run_session;
use golf_scorecard::core::ConfigProvider;
use golf_scorecard::utils::error::ErrorSeverity;
use golf_scorecard::utils::{logger, validation::Validate};
use golf_scorecard::{
    CliConfig, HoleSelection, JsonFileStore, NewRound, ScoreKeeper, ScorecardError, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = cli
        .resolve()
        .with_context(|| format!("Failed to load config file {:?}", cli.config))?;

    // 初始化日誌
    match config.log_format() {
        LogFormat::Json => logger::init_json_logger(config.log_level()),
        LogFormat::Compact => logger::init_cli_logger(cli.verbose, config.log_level()),
    }

    tracing::info!("Starting golf-scorecard");
    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store = JsonFileStore::new(config.data_dir().to_string());
    let keeper = ScoreKeeper::new(store);

    if let Err(e) = run(&keeper, &config, cli.command).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(
    keeper: &ScoreKeeper<JsonFileStore>,
    config: &TomlConfig,
    command: Command,
) -> Result<(), ScorecardError> {
    match command {
        Command::NewRound {
            name,
            players,
            tee_box,
            pars,
        } => {
            let round = keeper
                .start_round(NewRound {
                    name,
                    players,
                    pars: if pars.is_empty() {
                        config.default_pars()
                    } else {
                        pars
                    },
                    tee_box: tee_box.unwrap_or_else(|| config.default_tee_box()),
                })
                .await?;
            println!("{}", round.id);
        }
        Command::Rounds => {
            let rounds = keeper.rounds().await?;
            if rounds.is_empty() {
                println!("No rounds yet");
            }
            for round in rounds {
                println!(
                    "{}  {}  {}  {}",
                    round.id,
                    round.created_at.format("%a %b %-d %Y"),
                    round.display_name(),
                    round.players.join(", ")
                );
            }
        }
        Command::DeleteRound { round_id } => {
            keeper.remove_round(&round_id).await?;
            println!("🗑️  Deleted round {}", round_id);
        }
        Command::Record {
            round_id,
            hole,
            line,
        } => {
            let mut selection = HoleSelection::default();
            if let Some(hole) = hole {
                selection.select(hole)?;
            }
            let saved = keeper
                .record_line(&round_id, &line.join(" "), &mut selection)
                .await?;
            println!(
                "✅ Hole {}: {} strokes, {} putts, {} balls lost",
                saved.hole, saved.strokes, saved.putts, saved.balls_lost
            );
        }
        Command::Set(args) => {
            let mut selection = HoleSelection::default();
            selection.select(args.hole)?;
            let saved = keeper
                .record_full_form(&args.round_id, &mut selection, &args.entry())
                .await?;
            println!(
                "✅ Hole {} set: {} strokes, {} putts, {} balls lost",
                saved.hole, saved.strokes, saved.putts, saved.balls_lost
            );
        }
        Command::Card { round_id } => {
            let card = keeper.scorecard(&round_id).await?;
            print!("{}", card.render());
        }
        Command::Export { round_id, output } => {
            let csv = keeper.scorecard(&round_id).await?.to_csv()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    println!("📁 Scorecard saved to: {}", path);
                }
                None => print!("{}", csv),
            }
        }
        Command::Session { round_id } => {
            let mut source = StdinSource::new();
            let mut stdout = std::io::stdout();
            let report = run_session(keeper, &round_id, &mut source, &mut stdout).await?;
            tracing::info!(
                saved = report.saved,
                rejected = report.rejected,
                "session finished"
            );
        }
    }

    Ok(())
}
