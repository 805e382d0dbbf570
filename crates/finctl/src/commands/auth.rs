//! Authentication commands.
//!
//! Login stores the token and user in the session file; every later command
//! re-validates it on startup.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};

use finctl_core::types::{LoginRequest, RegisterRequest, Role};
use finctl_core::validation::{validate_login, validate_register};
use finctl_core::AuthState;

use crate::app::App;
use crate::cli::AuthAction;
use crate::commands::{print_json, reject};

/// Handle auth commands
pub async fn execute(action: AuthAction, app: &App) -> Result<()> {
    match action {
        AuthAction::Login { email, password } => login(app, email, password).await,
        AuthAction::Register { name, email, admin } => register(app, name, email, admin).await,
        AuthAction::Logout => logout(app),
        AuthAction::Status { json } => status(app, json),
        AuthAction::Refresh => refresh(app).await,
    }
}

fn prompt(label: &str, given: Option<String>) -> Result<String> {
    match given {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new().with_prompt(label).interact_text()?),
    }
}

async fn login(app: &App, email: Option<String>, password: Option<String>) -> Result<()> {
    if let Some(user) = app.session.current_user() {
        println!("{} Already logged in as {}", "✓".green(), user.email.cyan());
        println!("  Use {} to switch users.", "finctl auth logout".cyan());
        return Ok(());
    }

    let email = prompt("Email", email)?;
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let credentials = LoginRequest { email, password };
    validate_login(&credentials).map_err(reject)?;

    println!("{} Logging in...", "→".cyan());
    let response = app.session.login(&credentials).await?;

    println!(
        "{} Logged in as {} ({})",
        "✓".green(),
        response.user.name.bold(),
        response.user.email
    );
    Ok(())
}

async fn register(app: &App, name: Option<String>, email: Option<String>, admin: bool) -> Result<()> {
    let name = prompt("Name", name)?;
    let email = prompt("Email", email)?;
    let password = Password::new().with_prompt("Password").interact()?;
    let confirmation = Password::new().with_prompt("Confirm password").interact()?;

    let request = RegisterRequest {
        name,
        email,
        password,
        role: admin.then_some(Role::Admin),
    };
    validate_register(&request, &confirmation).map_err(reject)?;

    let response = app.session.register(&request).await?;

    println!(
        "{} {}",
        "✓".green(),
        response
            .message
            .as_deref()
            .unwrap_or("Account created successfully")
    );
    println!("  Run {} to continue.", "finctl auth login".cyan());
    Ok(())
}

fn logout(app: &App) -> Result<()> {
    if !app.session.is_authenticated() {
        println!("{} Not logged in.", "✗".red());
        return Ok(());
    }

    app.session.logout();
    println!("{} Logged out", "✓".green());
    Ok(())
}

fn status(app: &App, json: bool) -> Result<()> {
    let state = app.state();

    if json {
        return print_json(&serde_json::json!({
            "authenticated": state.is_authenticated(),
            "user": state.user(),
            "api": app.config.api.url,
        }));
    }

    println!("{}", "Session".cyan().bold());
    println!("{}", "─".repeat(40));
    println!("  API: {}", app.config.api.url);

    match state {
        AuthState::Authenticated(user) => {
            println!("  {} Logged in", "✓".green());
            println!("  Name:  {}", user.name.bold());
            println!("  Email: {}", user.email);
            let role = if user.is_admin() {
                user.role.yellow()
            } else {
                user.role.normal()
            };
            println!("  Role:  {}", role);
        }
        AuthState::Unauthenticated => {
            println!("  {} Not logged in", "✗".red());
            println!("  Run {} to log in.", "finctl auth login".cyan());
        }
    }
    Ok(())
}

async fn refresh(app: &App) -> Result<()> {
    app.require_login()?;

    let response = app.session.refresh_token().await?;
    println!("{} Token refreshed", "✓".green());
    if response.expires_in > 0 {
        println!("  Expires in {}s", response.expires_in);
    }
    Ok(())
}
