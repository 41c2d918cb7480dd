pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

/// Install logging for the process. Safe to call more than once.
pub fn init(verbose: bool) {
    infra::logging::init(verbose);
}
