//! Main entrypoint for running the playground headlessly

use clap::Parser as _;
use color_eyre::eyre::{ContextCompat as _, Result};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, Layer as _};

use crate::cli_args::CliArgs;
use crate::config::main::Config;
use crate::playground::Playground;
use crate::render_loop::clock::FrameClock;

/// The environment variable for setting custom log filters.
const LOG_FILTER_ENV: &str = "PLAYGROUND_LOG";

/// How many protocol messages can be waiting before the input thread has to wait for the render
/// loop to catch up.
const PROTOCOL_CHANNEL_CAPACITY: usize = 1024;

/// Commands to control the various tasks/threads
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum Protocol {
    /// Parsed input from STDIN.
    Input(crate::input::Input),
    /// The entire application is exiting.
    End,
}

/// What happened during a session.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Summary {
    /// How many frames were rendered
    pub frames: u64,
    /// How many bodies were alive at the end
    pub population: usize,
    /// Every numbered snapshot that was saved
    pub snapshots: Vec<std::path::PathBuf>,
    /// Where the last frame was saved
    pub output: Option<std::path::PathBuf>,
    /// Where logs were written, if logging was enabled
    pub log_path: Option<std::path::PathBuf>,
}

/// Main entrypoint
pub async fn run() -> Result<Summary> {
    let cli_args = CliArgs::parse();
    let config = setup(&cli_args)?;
    let is_logging = setup_logging(&config)?;

    tracing::info!("Starting the playground");
    tracing::debug!("Loaded config: {config:?}");

    let stdin = std::io::BufReader::new(std::io::stdin());
    let mut summary = run_session(&config, &cli_args, stdin).await?;
    if is_logging {
        summary.log_path = Some(config.log_path);
    }

    tracing::trace!("Leaving the playground's main `run()` function");
    Ok(summary)
}

/// Load the config and apply any CLI overrides.
pub fn setup(cli_args: &CliArgs) -> Result<Config> {
    let mut config = Config::load(cli_args.config.clone())?;
    apply_cli_overrides(&mut config, cli_args);
    Ok(config)
}

/// CLI arguments take precedence over the config file.
pub fn apply_cli_overrides(config: &mut Config, cli_args: &CliArgs) {
    if let Some(level) = cli_args.log_level.clone() {
        config.log_level = level;
    }
    if let Some(path) = cli_args.log_path.clone() {
        config.log_path = path;
    }
    if cli_args.seed.is_some() {
        config.seed = cli_args.seed;
    }
}

/// Run one demo until it's told to stop, the frame limit is reached, or the user presses
/// Ctrl-C. Input events are read from `reader`, one JSON event per line.
pub async fn run_session<R>(config: &Config, cli_args: &CliArgs, reader: R) -> Result<Summary>
where
    R: std::io::BufRead + Send + 'static,
{
    let (protocol_tx, mut protocol_rx) = tokio::sync::mpsc::channel(PROTOCOL_CHANNEL_CAPACITY);
    let mut playground = Playground::new(&cli_args.demo, config)?;
    let mut clock = FrameClock::new(config.frame_rate);
    let mut summary = Summary::default();
    let mut is_input_open = true;

    let input_thread_handle = crate::input::start(reader, protocol_tx);

    #[expect(
        clippy::integer_division_remainder_used,
        reason = "This is caused by the `tokio::select!`"
    )]
    loop {
        tokio::select! {
            () = clock.sleep_until_next_frame_tick() => {
                if playground.vsync() > 0 {
                    save_snapshot(&playground, cli_args, &mut summary)?;
                }
                if cli_args.frames.is_some_and(|limit| playground.frames() >= limit) {
                    tracing::debug!("Frame limit reached");
                    break;
                }
            },
            maybe_message = protocol_rx.recv(), if is_input_open => {
                match maybe_message {
                    Some(Protocol::End) => break,
                    Some(Protocol::Input(input)) => playground.handle_input(input),
                    None => {
                        tracing::debug!("Input has finished");
                        is_input_open = false;
                    }
                }
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Ctrl-C received");
                break;
            }
        }
    }

    playground.dispose();

    if input_thread_handle.is_finished() {
        // The input thread doesn't listen to the protocol, and is normally blocked reading, so
        // we can only join it if it has already finished by itself.
        input_thread_handle
            .join()
            .map_err(|err| color_eyre::eyre::eyre!("Input handle: {err:?}"))??;
    }

    if let Some(path) = cli_args.output.clone() {
        save_frame(&playground, &path)?;
        summary.output = Some(path);
    }

    summary.frames = playground.frames();
    summary.population = playground.demo().population();
    tracing::info!(
        "Rendered {} frames, {} bodies alive",
        summary.frames,
        summary.population
    );
    Ok(summary)
}

/// Save a numbered snapshot if one is due.
fn save_snapshot(
    playground: &Playground,
    cli_args: &CliArgs,
    summary: &mut Summary,
) -> Result<()> {
    let Some(every) = cli_args.snapshot_every else {
        return Ok(());
    };

    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Snapshots are taken at a regular interval"
    )]
    let is_due = every > 0 && playground.frames() % every == 0;
    if !is_due {
        return Ok(());
    }

    std::fs::create_dir_all(&cli_args.snapshot_dir)?;
    let path = cli_args
        .snapshot_dir
        .join(format!("frame-{:06}.png", playground.frames()));
    save_frame(playground, &path)?;
    summary.snapshots.push(path);
    Ok(())
}

/// Save the current frame as a PNG.
fn save_frame(playground: &Playground, path: &std::path::Path) -> Result<()> {
    if !playground.surface().is_ready() {
        color_eyre::eyre::bail!("Can't save an empty surface to {}", path.display());
    }

    if let Some(directory) = path.parent() {
        if !directory.as_os_str().is_empty() {
            std::fs::create_dir_all(directory)?;
        }
    }
    playground.surface().save_png(path)
}

/// Tell the render loop to exit. Only call this from outside the async runtime, for example
/// from the input thread, as it waits for room in the channel.
///
/// We keep it in its own function because we need to handle the error separately. If the error
/// were to be bubbled with `?` as usual, there's a chance it would never be logged.
pub fn send_protocol_end(protocol_tx: &tokio::sync::mpsc::Sender<Protocol>) {
    tracing::debug!("Sending the protocol `End` message");
    let result = protocol_tx.blocking_send(Protocol::End);
    if let Err(error) = result {
        tracing::error!("{error:?}");
    }
}

/// Setup logging. Returns whether logs are being written.
pub fn setup_logging(config: &Config) -> Result<bool> {
    let are_log_filters_manually_set = std::env::var(LOG_FILTER_ENV).is_ok();
    let level_as_string = format!("{:?}", config.log_level).to_lowercase();

    let is_loggable = !matches!(config.log_level, crate::config::main::LogLevel::Off)
        || are_log_filters_manually_set;
    if !is_loggable {
        return Ok(false);
    }

    let directory = config
        .log_path
        .parent()
        .context("Couldn't get log path's parent")?;
    std::fs::create_dir_all(directory)?;
    let file = std::fs::File::create(&config.log_path)?;

    let filters = if are_log_filters_manually_set {
        tracing_subscriber::EnvFilter::builder()
            .with_default_directive("error".parse()?)
            .with_env_var(LOG_FILTER_ENV)
            .from_env_lossy()
    } else {
        tracing_subscriber::EnvFilter::builder()
            .with_default_directive("off".parse()?)
            .from_env_lossy()
            .add_directive(format!("playground={level_as_string}").parse()?)
            .add_directive(format!("tests={level_as_string}").parse()?)
    };

    let logfile_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_filter(filters);

    tracing_subscriber::registry().with(logfile_layer).try_init()?;
    Ok(true)
}

#[cfg(test)]
mod test {
    use super::*;

    fn cli_args(arguments: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("playground").chain(arguments.iter().copied()))
            .unwrap()
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = Config::default();
        apply_cli_overrides(
            &mut config,
            &cli_args(&["--seed", "3", "--log-level", "trace", "--log-path", "x.log"]),
        );
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.log_level, crate::config::main::LogLevel::Trace);
        assert_eq!(config.log_path, std::path::PathBuf::from("x.log"));
    }

    #[test]
    fn no_overrides_keeps_config() {
        let mut config = Config {
            seed: Some(9),
            ..Config::default()
        };
        apply_cli_overrides(&mut config, &cli_args(&[]));
        assert_eq!(config.seed, Some(9));
    }

    #[tokio::test]
    async fn session_stops_at_frame_limit() {
        let config = Config {
            frame_rate: 1000,
            width: 40.0,
            height: 30.0,
            seed: Some(5),
            ..Config::default()
        };
        let directory = tempfile::tempdir().unwrap();
        let output = directory.path().join("last.png");
        let snapshots = directory.path().join("snapshots");
        let arguments = cli_args(&[
            "--demo",
            "physics",
            "--frames",
            "6",
            "--snapshot-every",
            "3",
            "--snapshot-dir",
            snapshots.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);

        let summary = run_session(&config, &arguments, std::io::Cursor::new(Vec::new()))
            .await
            .unwrap();

        assert_eq!(summary.frames, 6);
        assert_eq!(summary.population, 8);
        assert_eq!(
            summary.snapshots,
            vec![
                snapshots.join("frame-000003.png"),
                snapshots.join("frame-000006.png")
            ]
        );
        assert!(output.exists());
        let image = image::open(&output).unwrap();
        assert_eq!((image.width(), image.height()), (40, 30));
    }

    #[tokio::test]
    async fn session_stops_on_end() {
        let config = Config {
            frame_rate: 1000,
            width: 40.0,
            height: 30.0,
            ..Config::default()
        };
        let input = std::io::Cursor::new(b"\"clear\"\n\"end\"\n".to_vec());
        let summary = run_session(&config, &cli_args(&[]), input).await.unwrap();
        assert!(summary.output.is_none());
    }

    #[tokio::test]
    async fn every_click_arrives_however_many_there_are() {
        let config = Config {
            frame_rate: 1000,
            width: 300.0,
            height: 200.0,
            seed: Some(5),
            running_on_start: false,
            ..Config::default()
        };
        let mut lines: String = (0..300)
            .cycle()
            .take(3000)
            .map(|x| format!("{{\"click\":{{\"x\":{x},\"y\":50}}}}\n"))
            .collect();
        lines.push_str("\"end\"\n");

        let summary = run_session(
            &config,
            &cli_args(&["--demo", "physics"]),
            std::io::Cursor::new(lines.into_bytes()),
        )
        .await
        .unwrap();

        assert_eq!(summary.population, 3008);
    }
}
