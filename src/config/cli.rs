use crate::config::toml_config::TomlConfig;
use crate::core::merge::FullFormEntry;
use crate::domain::model::TeeBox;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "golf-scorecard")]
#[command(about = "Record per-hole golf stats from quick free-text or voice lines")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding saved rounds (overrides storage.data_dir)
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start a new round
    NewRound {
        #[arg(long)]
        name: Option<String>,

        /// Player name, repeat for each player
        #[arg(short, long = "player", required = true)]
        players: Vec<String>,

        #[arg(long)]
        tee_box: Option<TeeBox>,

        /// 18 comma-separated pars (defaults to the configured course)
        #[arg(long, value_delimiter = ',')]
        pars: Vec<u8>,
    },

    /// List saved rounds, newest first
    Rounds,

    /// Delete a round and all of its holes
    DeleteRound { round_id: String },

    /// Record one score line, e.g. `record <ROUND> hole 4 strokes 5 putts 2 fw`
    Record {
        round_id: String,

        /// Hole currently selected, used when the line names none
        #[arg(long)]
        hole: Option<u8>,

        #[arg(required = true, trailing_var_arg = true)]
        line: Vec<String>,
    },

    /// Overwrite every field of one hole
    Set(SetArgs),

    /// Print the scorecard for a round
    Card { round_id: String },

    /// Export a round as CSV
    Export {
        round_id: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Read score lines from stdin until 'quit'
    Session { round_id: String },
}

#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    pub round_id: String,

    #[arg(long)]
    pub hole: u8,

    #[arg(long)]
    pub strokes: u32,

    #[arg(long, default_value = "0")]
    pub putts: u32,

    #[arg(long)]
    pub within_100: bool,

    #[arg(long)]
    pub fairway: bool,

    #[arg(long)]
    pub gir: bool,

    #[arg(long)]
    pub hazard: bool,

    /// Total balls lost on the hole, not an increment
    #[arg(long, default_value = "0")]
    pub balls_lost: u32,
}

impl SetArgs {
    pub fn entry(&self) -> FullFormEntry {
        FullFormEntry {
            strokes: self.strokes,
            putts: self.putts,
            within_100: self.within_100,
            fairway: self.fairway,
            gir: self.gir,
            hazard: self.hazard,
            balls_lost: self.balls_lost,
        }
    }
}

impl CliConfig {
    /// Loads the TOML file if one was given and applies command line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        // 命令列參數優先於設定檔
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }

        Ok(config)
    }
}
