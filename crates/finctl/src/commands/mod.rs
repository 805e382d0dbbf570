//! Command implementations for finctl CLI.
//!
//! Each submodule implements the logic for a command group.

pub mod account;
pub mod auth;
pub mod card;
pub mod dashboard;
pub mod transaction;

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use serde::Serialize;

use finctl_core::types::Page;
use finctl_core::validation::ValidationErrors;

use crate::error::FinctlError;

/// Print each invalid field and turn the failure into a CLI error.
pub(crate) fn reject(errors: ValidationErrors) -> anyhow::Error {
    for e in &errors.errors {
        println!("  {} {}: {}", "✗".red(), e.field.yellow(), e.message);
    }
    FinctlError::InvalidInput(format!("{} field(s) rejected", errors.errors.len())).into()
}

/// Ask before destroying something unless `--yes` was given.
pub(crate) fn confirm_delete(what: &str, yes: bool) -> Result<()> {
    if yes {
        return Ok(());
    }
    let confirmed = Confirm::new()
        .with_prompt(format!("Delete {}?", what))
        .default(false)
        .interact()?;
    if confirmed {
        Ok(())
    } else {
        Err(FinctlError::Aborted.into())
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Footer shown under paged listings.
pub(crate) fn page_footer<T>(page: &Page<T>) -> String {
    let mut footer = format!(
        "Page {} of {} ({} total)",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    );
    if !page.last {
        footer.push_str(&format!(", next: --page {}", page.number + 1));
    }
    footer
}

/// Cut `s` to `width` characters, marking the cut with `…`.
pub(crate) fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, total_pages: u32, last: bool) -> Page<i64> {
        Page {
            content: vec![],
            total_elements: 23,
            total_pages,
            size: 10,
            number,
            first: number == 0,
            last,
        }
    }

    #[test]
    fn test_page_footer() {
        assert_eq!(
            page_footer(&page(0, 3, false)),
            "Page 1 of 3 (23 total), next: --page 1"
        );
        assert_eq!(page_footer(&page(2, 3, true)), "Page 3 of 3 (23 total)");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Supermercado São João", 10), "Supermerc…");
    }

    #[test]
    fn test_confirm_skipped_with_yes() {
        assert!(confirm_delete("account 1", true).is_ok());
    }
}
