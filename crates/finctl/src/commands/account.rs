//! Bank account commands.

use anyhow::Result;
use colored::Colorize;

use finctl_core::api::accounts::DEFAULT_SORT;
use finctl_core::dashboard::format_currency;
use finctl_core::types::{Account, AccountRequest, PageRequest};
use finctl_core::validation::validate_account;

use crate::app::App;
use crate::cli::{AccountAction, AccountArgs, AccountKind};
use crate::commands::{confirm_delete, page_footer, print_json, reject, truncate};
use crate::error::FinctlError;

/// Handle account commands
pub async fn execute(action: AccountAction, app: &App) -> Result<()> {
    app.require_login()?;

    match action {
        AccountAction::List {
            page,
            kind,
            search,
            json,
        } => list(app, page, kind, search, json).await,
        AccountAction::Show { id } => show(app, id).await,
        AccountAction::Create(args) => save(app, None, args).await,
        AccountAction::Update { id, fields } => save(app, Some(id), fields).await,
        AccountAction::Delete { id, yes } => delete(app, id, yes).await,
        AccountAction::Total => {
            let total = app.api.accounts().total_balance().await?;
            println!("Total balance: {}", format_currency(total).bold());
            Ok(())
        }
        AccountAction::Count => {
            println!("{}", app.api.accounts().count().await?);
            Ok(())
        }
    }
}

pub(crate) fn request_from(args: AccountArgs) -> AccountRequest {
    AccountRequest {
        name: args.name.trim().to_string(),
        account_type: args.kind.into(),
        initial_balance: args.balance,
        institution: args
            .institution
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty()),
    }
}

async fn list(
    app: &App,
    page: Option<u32>,
    kind: Option<AccountKind>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let service = app.api.accounts();

    let (accounts, footer) = match (search, kind, page) {
        (Some(name), _, _) => (service.search(&name).await?, None),
        (None, Some(kind), _) => (service.by_type(kind.into()).await?, None),
        (None, None, Some(page)) => {
            let request = PageRequest::new(page, app.config.display.page_size, DEFAULT_SORT);
            let result = service.list_paged(&request).await?;
            let footer = page_footer(&result);
            (result.content, Some(footer))
        }
        (None, None, None) => (service.list().await?, None),
    };

    if json {
        return print_json(&accounts);
    }

    if accounts.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }

    println!("{}", "Accounts".cyan().bold());
    println!(
        "{:>5}  {:<24} {:<11} {:<18} {:>16}",
        "ID", "NAME", "TYPE", "INSTITUTION", "BALANCE"
    );
    println!("{}", "─".repeat(78));
    for account in &accounts {
        print_row(account);
    }
    if let Some(footer) = footer {
        println!("{}", footer.dimmed());
    }
    Ok(())
}

fn print_row(account: &Account) {
    let balance = format_currency(account.current_balance);
    let balance = if account.current_balance < 0.0 {
        balance.red()
    } else {
        balance.normal()
    };
    println!(
        "{:>5}  {:<24} {:<11} {:<18} {:>16}",
        account.id,
        truncate(&account.name, 24),
        account.account_type.label(),
        truncate(account.institution.as_deref().unwrap_or("-"), 18),
        balance
    );
}

async fn show(app: &App, id: i64) -> Result<()> {
    let account = app.api.accounts().get(id).await?;

    println!("{}", account.name.cyan().bold());
    println!("  ID:              {}", account.id);
    println!("  Type:            {}", account.account_type);
    println!(
        "  Institution:     {}",
        account.institution.as_deref().unwrap_or("-")
    );
    println!(
        "  Initial balance: {}",
        format_currency(account.initial_balance)
    );
    println!(
        "  Current balance: {}",
        format_currency(account.current_balance).bold()
    );
    if let Some(created) = account.created_at.as_deref() {
        println!("  Created:         {}", created);
    }
    Ok(())
}

async fn save(app: &App, id: Option<i64>, args: AccountArgs) -> Result<()> {
    let request = request_from(args);
    validate_account(&request).map_err(reject)?;

    let service = app.api.accounts();
    if service.name_exists(&request.name, id).await? {
        return Err(FinctlError::InvalidInput(format!(
            "An account named '{}' already exists",
            request.name
        ))
        .into());
    }

    let account = match id {
        Some(id) => service.update(id, &request).await?,
        None => service.create(&request).await?,
    };

    let verb = if id.is_some() { "Updated" } else { "Created" };
    println!(
        "{} {} account {} ({})",
        "✓".green(),
        verb,
        account.name.bold(),
        account.id
    );
    Ok(())
}

async fn delete(app: &App, id: i64, yes: bool) -> Result<()> {
    let service = app.api.accounts();
    let account = service.get(id).await?;
    confirm_delete(&format!("account '{}'", account.name), yes)?;

    service.delete(id).await?;
    println!("{} Deleted account {}", "✓".green(), account.name.bold());
    Ok(())
}
