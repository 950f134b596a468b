use std::sync::Arc;

use anyhow::Result;
use loginseam_auth::LoginOutcome;
use loginseam_core::config::AppConfig;

use crate::presenter::TerminalPresenter;
use crate::setup::{create_controller, create_services};

fn print_outcome(outcome: LoginOutcome, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "outcome": outcome }));
    } else {
        println!("{outcome}");
    }
}

pub async fn login(config: &AppConfig, permissions: Vec<String>, json: bool) -> Result<()> {
    let services = create_services(config);
    let presenter = Arc::new(TerminalPresenter::stdio());
    let controller = create_controller(config, &services, presenter, permissions)?;
    let outcome = controller.login().await;
    print_outcome(outcome, json);
    Ok(())
}

pub async fn run(config: &AppConfig) -> Result<()> {
    let services = create_services(config);
    let presenter = Arc::new(TerminalPresenter::stdio());
    let controller = create_controller(config, &services, presenter.clone(), Vec::new())?;

    eprintln!("Press Enter (or type `login`) to log in, `quit` to exit.");
    let mut attempts = 0u32;
    loop {
        let line = {
            let presenter = presenter.clone();
            tokio::task::spawn_blocking(move || presenter.read_line()).await??
        };
        match line.as_deref() {
            None | Some("quit") | Some("exit") => break,
            Some("") | Some("login") => {
                attempts += 1;
                let outcome = controller.login().await;
                print_outcome(outcome, false);
            }
            Some(other) => eprintln!("Unknown command: {other}"),
        }
    }
    tracing::info!("Session ended after {attempts} login attempts");
    Ok(())
}
