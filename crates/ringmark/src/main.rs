use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    ringmark::cli::run()
}
