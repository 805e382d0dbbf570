//! Dashboard command: balances, card limits, this month and recent activity.

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use finctl_core::dashboard::{greeting, format_currency, DashboardSummary};
use finctl_core::types::TransactionType;
use finctl_core::view::ViewScope;

use crate::app::App;
use crate::commands::{print_json, truncate};
use crate::error::FinctlError;

pub async fn execute(json: bool, app: &App) -> Result<()> {
    app.require_login()?;

    let scope = ViewScope::new();
    let on_interrupt = scope.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.teardown();
        }
    });

    let spinner = (!json).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Loading dashboard...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let loaded = DashboardSummary::load(&app.api, &scope).await;
    watcher.abort();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let Some(dashboard) = loaded? else {
        return Err(FinctlError::Aborted.into());
    };

    if json {
        return print_json(&dashboard);
    }

    render(app, &dashboard);
    Ok(())
}

fn render(app: &App, d: &DashboardSummary) {
    let name = app.session.context().current_user_name();
    let first_name = name.split_whitespace().next().unwrap_or("there");
    println!(
        "{}, {}!",
        greeting(&Local::now()),
        first_name.bold()
    );
    println!();

    println!("{}", "Overview".cyan().bold());
    println!("{}", "─".repeat(48));
    println!(
        "  Total balance:   {:>18}  ({} accounts)",
        format_currency(d.total_balance).bold(),
        d.account_count
    );
    println!(
        "  Card limit:      {:>18}  ({} cards)",
        format_currency(d.total_limit),
        d.card_count
    );
    println!("  Limit used:      {:>18}", format_currency(d.used_limit));
    println!(
        "  Limit available: {:>18}",
        format_currency(d.available_limit)
    );
    println!();

    println!("{}", "This month".cyan().bold());
    println!("{}", "─".repeat(48));
    println!(
        "  Income:          {:>18}",
        format_currency(d.month_income).green()
    );
    println!(
        "  Expenses:        {:>18}",
        format_currency(d.month_expenses).red()
    );
    println!();

    println!("{}", "Recent transactions".cyan().bold());
    println!("{}", "─".repeat(48));
    if d.recent.is_empty() {
        println!("  No transactions yet.");
        return;
    }
    for t in &d.recent {
        let amount = match t.transaction_type {
            TransactionType::Receita => format!("+{}", format_currency(t.amount)).green(),
            TransactionType::Despesa => format!("-{}", format_currency(t.amount)).red(),
        };
        let source = t.account.as_deref().or(t.card.as_deref()).unwrap_or("-");
        println!(
            "  {}  {:<22} {:<14} {:>14}",
            t.date.format("%d/%m"),
            truncate(&t.description, 22),
            truncate(source, 14),
            amount
        );
    }
}
