//! All the CLI arguments for the playground

/// Run one of the playground demos headlessly. Input events are read as JSON lines from STDIN
/// and frames are written as PNGs.
#[derive(clap::Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
#[non_exhaustive]
pub struct CliArgs {
    /// Name of the demo to run: `particles` or `physics`.
    #[arg(short, long, default_value = "particles")]
    pub demo: String,

    /// Path to a config file. Defaults to `playground.toml` in the user's config directory.
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Stop after this many frames have been rendered.
    #[arg(short, long)]
    pub frames: Option<u64>,

    /// Save the last rendered frame to this PNG file.
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,

    /// Save a numbered PNG every this many frames.
    #[arg(long)]
    pub snapshot_every: Option<u64>,

    /// Where numbered snapshots are saved.
    #[arg(long, default_value = ".")]
    pub snapshot_dir: std::path::PathBuf,

    /// Override the log level from the config.
    #[arg(long, value_enum)]
    pub log_level: Option<crate::config::main::LogLevel>,

    /// Override the log path from the config.
    #[arg(long)]
    pub log_path: Option<std::path::PathBuf>,

    /// Seed for reproducible randomness. Overrides the config.
    #[arg(long)]
    pub seed: Option<u64>,
}
