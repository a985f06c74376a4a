use mazewalk::{
    MazeConfig,
    app::{App, RunResult},
};
use tracing_subscriber::EnvFilter;

fn main() -> mazewalk::Result<()> {
    let config = match MazeConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!(
                "Usage: mazewalk [--cols N] [--rows N] [--seed N] [--manual] [--delay-ms N] [--log-dir PATH]"
            );
            std::process::exit(2);
        }
    };

    // The terminal is taken over by the maze, so logs go to a file
    let file_appender = tracing_appender::rolling::never(&config.log_dir, "mazewalk.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mazewalk=info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    tracing::info!("Starting with {:?}", config);

    let app = App::new(config);
    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;

    match result? {
        RunResult::Solved => println!("Maze solved! Goal reached."),
        RunResult::Unsolvable => println!("No path found to the goal."),
        RunResult::Canceled => println!("Canceled."),
    }
    Ok(())
}
