use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = consolidate::cli::parse();
    match app::run(args) {
        Ok(stats) if stats.success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            consolidate::output::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
