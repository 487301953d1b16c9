//! Just `main()`. Keep as small as possible.

use color_eyre::eyre::Result;

#[expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "It's our central place for communicating with the user on CLI"
)]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let result = playground::run::run().await;
    tracing::debug!("The playground is exiting");

    match result {
        Ok(summary) => {
            println!(
                "Rendered {} frames, {} bodies alive",
                summary.frames, summary.population
            );
            if let Some(output) = summary.output {
                println!("Last frame saved to {}", output.display());
            }
            if let Some(logpath) = summary.log_path {
                println!("Logs saved to {}", logpath.display());
            }
        }
        Err(error) => {
            tracing::error!("{error:?}");
            eprintln!("Error: {error:?}");
            #[expect(clippy::exit, reason = "Errors should give a failing exit code")]
            std::process::exit(1);
        }
    }

    Ok(())
}
