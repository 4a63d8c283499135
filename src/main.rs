use bronze_ingestor::{
    init_logging, ExitStatusLike, IngestLayout, RealFileSystem, Runner, TracingReporter,
};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();

    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            tracing::error!("Error: cannot resolve working directory: {err}");
            return ExitCode::from(ExitStatusLike::Error.as_code());
        }
    };

    let layout = IngestLayout::from_base(&cwd);
    let mut runner = Runner::new(layout, RealFileSystem, TracingReporter);
    let status = match runner.run() {
        Ok(summary) => summary.exit_status(),
        Err(_) => ExitStatusLike::Error,
    };
    ExitCode::from(status.as_code())
}
