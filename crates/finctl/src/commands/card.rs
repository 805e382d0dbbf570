//! Credit card commands.

use anyhow::Result;
use colored::{ColoredString, Colorize};

use finctl_core::api::cards::DEFAULT_SORT;
use finctl_core::dashboard::format_currency;
use finctl_core::types::{Card, CardRequest, PageRequest};
use finctl_core::validation::validate_card;

use crate::app::App;
use crate::cli::{CardAction, CardArgs};
use crate::commands::{confirm_delete, page_footer, print_json, reject, truncate};
use crate::error::FinctlError;

/// Handle card commands
pub async fn execute(action: CardAction, app: &App) -> Result<()> {
    app.require_login()?;

    match action {
        CardAction::List {
            page,
            brand,
            search,
            json,
        } => list(app, page, brand, search, json).await,
        CardAction::Show { id } => show(app, id).await,
        CardAction::Create(args) => save(app, None, args).await,
        CardAction::Update { id, fields } => save(app, Some(id), fields).await,
        CardAction::Delete { id, yes } => delete(app, id, yes).await,
        CardAction::Usage => usage(app).await,
        CardAction::Due { days } => due(app, days).await,
    }
}

/// Build the request; the last digits stay local.
pub(crate) fn request_from(args: &CardArgs) -> CardRequest {
    CardRequest {
        name: args.name.trim().to_string(),
        brand: args.brand.clone(),
        total_limit: args.limit,
        closing_day: args.closing_day,
        due_day: args.due_day,
    }
}

/// Share of the limit in use, 0-100.
pub(crate) fn usage_percent(used: f64, total: f64) -> f64 {
    if total > 0.0 {
        (used / total * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn colored_percent(percent: f64) -> ColoredString {
    let text = format!("{:.0}%", percent);
    if percent >= 90.0 {
        text.red()
    } else if percent >= 70.0 {
        text.yellow()
    } else {
        text.green()
    }
}

async fn list(
    app: &App,
    page: Option<u32>,
    brand: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let service = app.api.cards();

    let (cards, footer) = match (search, brand, page) {
        (Some(name), _, _) => (service.search(&name).await?, None),
        (None, Some(brand), _) => (service.by_brand(&brand).await?, None),
        (None, None, Some(page)) => {
            let request = PageRequest::new(page, app.config.display.page_size, DEFAULT_SORT);
            let result = service.list_paged(&request).await?;
            let footer = page_footer(&result);
            (result.content, Some(footer))
        }
        (None, None, None) => (service.list().await?, None),
    };

    if json {
        return print_json(&cards);
    }

    if cards.is_empty() {
        println!("No cards found.");
        return Ok(());
    }

    println!("{}", "Cards".cyan().bold());
    println!(
        "{:>5}  {:<20} {:<16} {:>16} {:>16} {:>5} {:>4} {:>4}",
        "ID", "NAME", "BRAND", "LIMIT", "AVAILABLE", "USED", "CLS", "DUE"
    );
    println!("{}", "─".repeat(96));
    for card in &cards {
        print_row(card);
    }
    if let Some(footer) = footer {
        println!("{}", footer.dimmed());
    }
    Ok(())
}

fn print_row(card: &Card) {
    println!(
        "{:>5}  {:<20} {:<16} {:>16} {:>16} {:>5} {:>4} {:>4}",
        card.id,
        truncate(&card.name, 20),
        truncate(&card.brand, 16),
        format_currency(card.total_limit),
        format_currency(card.available_limit),
        colored_percent(usage_percent(card.used_limit, card.total_limit)),
        card.closing_day,
        card.due_day
    );
}

async fn show(app: &App, id: i64) -> Result<()> {
    let card = app.api.cards().get(id).await?;

    println!("{}", card.name.cyan().bold());
    println!("  ID:          {}", card.id);
    println!("  Brand:       {}", card.brand);
    println!("  Limit:       {}", format_currency(card.total_limit));
    println!(
        "  Used:        {} ({})",
        format_currency(card.used_limit),
        colored_percent(usage_percent(card.used_limit, card.total_limit))
    );
    println!(
        "  Available:   {}",
        format_currency(card.available_limit).bold()
    );
    println!("  Closing day: {}", card.closing_day);
    println!("  Due day:     {}", card.due_day);
    Ok(())
}

async fn save(app: &App, id: Option<i64>, args: CardArgs) -> Result<()> {
    let request = request_from(&args);
    validate_card(&request, args.last_digits.as_deref()).map_err(reject)?;

    let service = app.api.cards();
    if service.name_exists(&request.name, id).await? {
        return Err(FinctlError::InvalidInput(format!(
            "A card named '{}' already exists",
            request.name
        ))
        .into());
    }

    let card = match id {
        Some(id) => service.update(id, &request).await?,
        None => service.create(&request).await?,
    };

    let verb = if id.is_some() { "Updated" } else { "Created" };
    let suffix = args
        .last_digits
        .filter(|d| !d.is_empty())
        .map(|d| format!(" •••• {}", d))
        .unwrap_or_default();
    println!(
        "{} {} card {}{} ({})",
        "✓".green(),
        verb,
        card.name.bold(),
        suffix,
        card.id
    );
    Ok(())
}

async fn delete(app: &App, id: i64, yes: bool) -> Result<()> {
    let service = app.api.cards();
    let card = service.get(id).await?;
    confirm_delete(&format!("card '{}'", card.name), yes)?;

    service.delete(id).await?;
    println!("{} Deleted card {}", "✓".green(), card.name.bold());
    Ok(())
}

async fn usage(app: &App) -> Result<()> {
    let summary = app.api.cards().usage_summary().await?;

    println!("{}", "Card usage".cyan().bold());
    println!("{}", "─".repeat(40));
    println!("  Cards:     {}", summary.total_cards);
    println!("  Limit:     {}", format_currency(summary.total_limit));
    println!("  Used:      {}", format_currency(summary.used_limit));
    println!(
        "  Available: {}",
        format_currency(summary.available_limit).bold()
    );
    println!("  Usage:     {}", colored_percent(summary.usage_percent));
    Ok(())
}

async fn due(app: &App, days: u32) -> Result<()> {
    let cards = app.api.cards().due_within(days).await?;

    if cards.is_empty() {
        println!("{} No cards due in the next {} days", "✓".green(), days);
        return Ok(());
    }

    println!(
        "{}",
        format!("Due in the next {} days", days).yellow().bold()
    );
    for card in &cards {
        println!(
            "  {} {} (due day {}, {} used)",
            "→".cyan(),
            card.name.bold(),
            card.due_day,
            format_currency(card.used_limit)
        );
    }
    Ok(())
}
