//! Transaction commands.

use anyhow::Result;
use chrono::Local;
use colored::{ColoredString, Colorize};

use finctl_core::api::transactions::DEFAULT_SORT;
use finctl_core::dashboard::format_currency;
use finctl_core::types::{
    PageRequest, Transaction, TransactionFilter, TransactionRequest, TransactionType,
};
use finctl_core::validation::validate_transaction;

use crate::app::App;
use crate::cli::{PeriodArgs, TxAction, TxArgs, TxFilterArgs};
use crate::commands::{confirm_delete, page_footer, print_json, reject, truncate};

/// Handle transaction commands
pub async fn execute(action: TxAction, app: &App) -> Result<()> {
    app.require_login()?;

    match action {
        TxAction::List { page, filter, json } => list(app, page, filter, json).await,
        TxAction::Show { id } => show(app, id).await,
        TxAction::Create(args) => save(app, None, args).await,
        TxAction::Update { id, fields } => save(app, Some(id), fields).await,
        TxAction::Delete { id, yes } => delete(app, id, yes).await,
        TxAction::Summary { period } => summary(app, period).await,
        TxAction::Stats { period } => stats(app, period).await,
    }
}

pub(crate) fn request_from(args: TxArgs) -> TransactionRequest {
    TransactionRequest {
        description: args.description.trim().to_string(),
        amount: args.amount,
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        transaction_type: args.kind.into(),
        recurring: args.recurring,
        account_id: args.account,
        card_id: args.card,
    }
}

pub(crate) fn filter_from(args: TxFilterArgs) -> TransactionFilter {
    TransactionFilter {
        transaction_type: args.kind.map(Into::into),
        account_id: args.account,
        card_id: args.card,
        start_date: args.period.from,
        end_date: args.period.to,
        description: args.search.filter(|s| !s.trim().is_empty()),
        recurring: args.recurring.then_some(true),
    }
}

/// Income in green with a plus, expenses in red with a minus.
fn signed_amount(kind: TransactionType, amount: f64) -> ColoredString {
    let formatted = format_currency(amount.abs());
    match kind {
        TransactionType::Receita => format!("+{}", formatted).green(),
        TransactionType::Despesa => format!("-{}", formatted).red(),
    }
}

fn source(t: &Transaction) -> String {
    match (&t.account, &t.card) {
        (Some(account), _) => account.name.clone(),
        (None, Some(card)) => card.name.clone(),
        (None, None) => "-".to_string(),
    }
}

async fn list(app: &App, page: u32, filter: TxFilterArgs, json: bool) -> Result<()> {
    let service = app.api.transactions();
    let request = PageRequest::new(page, app.config.display.page_size, DEFAULT_SORT);

    let result = if filter.is_empty() {
        service.list_paged(&request).await?
    } else {
        service.filter(&filter_from(filter), &request).await?
    };

    if json {
        return print_json(&result.content);
    }

    if result.content.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    println!("{}", "Transactions".cyan().bold());
    println!(
        "{:>6}  {:<10}  {:<28} {:<18} {:>16}",
        "ID", "DATE", "DESCRIPTION", "ACCOUNT/CARD", "AMOUNT"
    );
    println!("{}", "─".repeat(84));
    for t in &result.content {
        let recurring = if t.recurring { " ↻" } else { "" };
        println!(
            "{:>6}  {:<10}  {:<28} {:<18} {:>16}{}",
            t.id,
            t.date,
            truncate(&t.description, 28),
            truncate(&source(t), 18),
            signed_amount(t.transaction_type, t.amount),
            recurring
        );
    }
    println!("{}", page_footer(&result).dimmed());
    Ok(())
}

async fn show(app: &App, id: i64) -> Result<()> {
    let t = app.api.transactions().get(id).await?;

    println!("{}", t.description.cyan().bold());
    println!("  ID:        {}", t.id);
    println!("  Type:      {}", t.transaction_type);
    println!("  Amount:    {}", signed_amount(t.transaction_type, t.amount));
    println!("  Date:      {}", t.date.format("%d/%m/%Y"));
    println!("  Recurring: {}", if t.recurring { "yes" } else { "no" });
    if let Some(account) = &t.account {
        println!("  Account:   {} ({})", account.name, account.id);
    }
    if let Some(card) = &t.card {
        println!("  Card:      {} ({})", card.name, card.id);
    }
    Ok(())
}

async fn save(app: &App, id: Option<i64>, args: TxArgs) -> Result<()> {
    let request = request_from(args);
    validate_transaction(&request).map_err(reject)?;

    let service = app.api.transactions();
    let t = match id {
        Some(id) => service.update(id, &request).await?,
        None => service.create(&request).await?,
    };

    let verb = if id.is_some() { "Updated" } else { "Recorded" };
    println!(
        "{} {} {} {} on {} ({})",
        "✓".green(),
        verb,
        t.description.bold(),
        signed_amount(t.transaction_type, t.amount),
        t.date,
        t.id
    );
    Ok(())
}

async fn delete(app: &App, id: i64, yes: bool) -> Result<()> {
    let service = app.api.transactions();
    let t = service.get(id).await?;
    confirm_delete(
        &format!("'{}' ({})", t.description, format_currency(t.amount)),
        yes,
    )?;

    service.delete(id).await?;
    println!("{} Deleted transaction {}", "✓".green(), t.id);
    Ok(())
}

async fn summary(app: &App, period: PeriodArgs) -> Result<()> {
    let summary = app
        .api
        .transactions()
        .summary(period.from, period.to)
        .await?;

    let heading = match &summary.period {
        Some(p) => format!("Summary {} → {}", p.start, p.end),
        None => "Summary".to_string(),
    };
    println!("{}", heading.cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "  Income:   {}",
        format_currency(summary.total_income).green()
    );
    println!(
        "  Expenses: {}",
        format_currency(summary.total_expenses).red()
    );
    let balance = format_currency(summary.balance).bold();
    println!(
        "  Balance:  {}",
        if summary.balance < 0.0 { balance.red() } else { balance }
    );
    Ok(())
}

async fn stats(app: &App, period: PeriodArgs) -> Result<()> {
    let stats = app
        .api
        .transactions()
        .statistics_by_type(period.from, period.to)
        .await?;

    if stats.is_empty() {
        println!("No transactions in this period.");
        return Ok(());
    }

    println!("{}", "By type".cyan().bold());
    for s in &stats {
        println!(
            "  {:<8} {:>5} × {:>16}",
            s.transaction_type.label(),
            s.count,
            signed_amount(s.transaction_type, s.total)
        );
    }
    Ok(())
}
