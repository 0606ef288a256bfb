use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use auth::config::AuthConfig;
use auth::error::{LoginError, RegisterError};
use auth::state::AuthState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting authentication demo");

    let config = AuthConfig::from_env()?;
    let state = AuthState::new(&config);

    // Restore a live session on startup, if any (there will be none on a
    // fresh process; state does not survive restarts)
    if let Some(session) = state.restore_session().await {
        println!("Welcome back, {}!", session.user.username);
    }

    println!("Commands: register, login, logout, session, help, quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(command) = read_line(&mut lines, "> ").await? else {
            break;
        };

        match command.trim() {
            "register" => handle_register(&state, &mut lines).await?,
            "login" => handle_login(&state, &mut lines).await?,
            "logout" => {
                state.logout().await;
                println!("Logged out successfully");
            }
            "session" => match state.restore_session().await {
                Some(session) => println!("{}", serde_json::to_string_pretty(&session)?),
                None => println!("Not logged in"),
            },
            "help" => println!("Commands: register, login, logout, session, help, quit"),
            "quit" | "exit" => break,
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }

    info!("Shutting down");
    Ok(())
}

async fn handle_register(state: &AuthState, lines: &mut Lines<BufReader<Stdin>>) -> Result<()> {
    let Some(username) = read_line(lines, "username: ").await? else {
        return Ok(());
    };
    let Some(email) = read_line(lines, "email: ").await? else {
        return Ok(());
    };
    let Some(password) = read_line(lines, "password: ").await? else {
        return Ok(());
    };
    let Some(confirm) = read_line(lines, "confirm password: ").await? else {
        return Ok(());
    };

    match state.register(&username, &email, &password, &confirm).await {
        Ok(user) => println!(
            "Account created for {} ({}). Please log in.",
            user.username, user.email
        ),
        Err(RegisterError::Invalid(errors)) => {
            for error in errors.iter() {
                println!("  {}: {}", error.field().label(), error);
            }
        }
        Err(RegisterError::Hash(error)) => return Err(error.into()),
    }

    Ok(())
}

async fn handle_login(state: &AuthState, lines: &mut Lines<BufReader<Stdin>>) -> Result<()> {
    let Some(username) = read_line(lines, "username: ").await? else {
        return Ok(());
    };
    let Some(password) = read_line(lines, "password: ").await? else {
        return Ok(());
    };

    match state.login(&username, &password).await {
        Ok(session) => println!(
            "Login successful! Session expires at {}",
            session.expires_at.format("%H:%M:%S")
        ),
        Err(error @ LoginError::Hash(_)) => return Err(error.into()),
        Err(error) => println!("{error}"),
    }

    Ok(())
}

/// Prompt and read one line; `None` when stdin is closed
///
/// Only the line ending is stripped; field-level trimming is the auth
/// layer's job (passwords are taken verbatim).
async fn read_line(lines: &mut Lines<BufReader<Stdin>>, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    Ok(lines
        .next_line()
        .await?
        .map(|line| line.trim_end_matches('\r').to_string()))
}
