#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use leasegate::cli::{Cli, default_log_path, init_tracing};
use leasegate::config::Config;
use leasegate::form::{EditModal, ModalMsg};
use leasegate::storage::load_seed;
use leasegate::submit::submit;
use leasegate::tui::App;

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if let Some(log_file) = default_log_path() {
        init_tracing(&cli.log_level, &log_file)?;
    }

    let config = Config::load(cli.config.as_deref())?;
    let seed = load_seed(&cli.seed)?;
    let mut outbox = cli.outbox(&config)?;

    let mut modal = EditModal::new(config.modal_settings()?);
    modal.apply(ModalMsg::Open {
        schema: cli.resource.into(),
        seed,
    });
    let mut app = App::new(modal);

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    result?;
    restore_result?;

    match app.take_committed() {
        Some(payload) => {
            submit(&payload, &mut outbox)?;
            println!("{}", serde_json::to_string(&payload)?);
        }
        None => tracing::info!("closed without committing"),
    }
    Ok(())
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
