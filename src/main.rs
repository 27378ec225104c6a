mod api;
mod app;
mod board;
mod cli;
mod constants;
mod domain;
mod images;
mod storage;

fn main() {
    if std::env::args().len() > 1 {
        cli::run_cli();
    } else if let Err(e) = app::run_ui() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
