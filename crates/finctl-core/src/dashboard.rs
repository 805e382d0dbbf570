//! Dashboard aggregation.
//!
//! Loads accounts, cards, the financial summary and the latest transactions in
//! one go and folds them into the figures shown on the dashboard.

use chrono::{NaiveDate, Timelike};
use serde::Serialize;

use crate::api::FinanceApi;
use crate::error::Result;
use crate::types::{Account, Card, FinancialSummary, PageRequest, Transaction, TransactionType};
use crate::view::ViewScope;

/// Transactions shown in the "recent" list
pub const RECENT_TRANSACTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentTransaction {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
    pub account: Option<String>,
    pub card: Option<String>,
}

impl From<&Transaction> for RecentTransaction {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id,
            description: t.description.clone(),
            amount: t.amount,
            date: t.date,
            transaction_type: t.transaction_type,
            account: t.account.as_ref().map(|a| a.name.clone()),
            card: t.card.as_ref().map(|c| c.name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_balance: f64,
    pub total_limit: f64,
    pub used_limit: f64,
    pub available_limit: f64,
    pub month_income: f64,
    pub month_expenses: f64,
    pub account_count: usize,
    pub card_count: usize,
    pub recent: Vec<RecentTransaction>,
}

impl DashboardSummary {
    pub fn build(
        accounts: &[Account],
        cards: &[Card],
        summary: Option<&FinancialSummary>,
        recent: &[Transaction],
    ) -> Self {
        let total_balance = accounts.iter().map(|a| a.current_balance).sum();
        let total_limit: f64 = cards.iter().map(|c| c.total_limit).sum();
        let used_limit: f64 = cards.iter().map(|c| c.used_limit).sum();

        Self {
            total_balance,
            total_limit,
            used_limit,
            available_limit: total_limit - used_limit,
            month_income: summary.map(|s| s.total_income).unwrap_or(0.0),
            month_expenses: summary.map(|s| s.total_expenses).unwrap_or(0.0),
            account_count: accounts.len(),
            card_count: cards.len(),
            recent: recent.iter().map(RecentTransaction::from).collect(),
        }
    }

    /// Load all dashboard data concurrently.
    ///
    /// Returns `Ok(None)` when `scope` was torn down before the data arrived.
    pub async fn load(api: &FinanceApi, scope: &ViewScope) -> Result<Option<Self>> {
        let accounts = api.accounts();
        let cards = api.cards();
        let transactions = api.transactions();
        let recent_page = PageRequest::new(0, RECENT_TRANSACTIONS, "data,desc");

        let fetch = async {
            tokio::try_join!(
                accounts.list(),
                cards.list(),
                transactions.summary(None, None),
                transactions.list_paged(&recent_page),
            )
        };

        match scope.run(fetch).await {
            None => Ok(None),
            Some(result) => {
                let (accounts, cards, summary, recent) = result?;
                Ok(Some(Self::build(
                    &accounts,
                    &cards,
                    Some(&summary),
                    &recent.content,
                )))
            }
        }
    }
}

/// Greeting for the given local time.
pub fn greeting<T: Timelike>(now: &T) -> &'static str {
    match now.hour() {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Format as Brazilian reais: `R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}R$ {},{:02}", if negative { "-" } else { "" }, grouped, frac)
}
