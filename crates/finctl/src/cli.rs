//! CLI argument definitions using clap derive macros.
//!
//! Command structure for the finance API: auth, accounts, cards,
//! transactions and the dashboard.

use chrono::NaiveDate;
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use finctl_core::types::{AccountType, CARD_BRANDS, TransactionType};

/// Personal finance CLI
///
/// Track bank accounts, credit cards and transactions against the finance API.
#[derive(Parser, Debug)]
#[command(name = "finctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Login, registration and session status
    Auth(AuthCommand),

    /// Bank accounts
    Account(AccountCommand),

    /// Credit cards
    Card(CardCommand),

    /// Income and expense transactions
    Tx(TxCommand),

    /// Balance, limits and recent activity
    Dashboard {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show version
    Version,
}

// ─────────────────────────────────────────────────────────────────────────────
// Authentication Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub action: AuthAction,
}

#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Log in and store the session
    Login {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "FINCTL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create a new user
    Register {
        /// Full name (prompted when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Register with the ADMIN role
        #[arg(long)]
        admin: bool,
    },

    /// Clear the stored session
    Logout,

    /// Show the current session
    Status {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Exchange the current token for a fresh one
    Refresh,
}

// ─────────────────────────────────────────────────────────────────────────────
// Account Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct AccountCommand {
    #[command(subcommand)]
    pub action: AccountAction,
}

#[derive(Subcommand, Debug)]
pub enum AccountAction {
    /// List accounts
    List {
        /// Page number (0-based); lists everything when omitted
        #[arg(short, long)]
        page: Option<u32>,

        /// Only accounts of this type
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<AccountKind>,

        /// Name search
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one account
    Show { id: i64 },

    /// Create an account
    Create(AccountArgs),

    /// Replace an account's fields
    Update {
        id: i64,
        #[command(flatten)]
        fields: AccountArgs,
    },

    /// Delete an account
    Delete {
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Sum of current balances
    Total,

    /// Number of accounts
    Count,
}

#[derive(Args, Debug, Clone)]
pub struct AccountArgs {
    /// Account name
    #[arg(long)]
    pub name: String,

    /// Account type
    #[arg(short = 't', long = "type", value_enum, default_value_t = AccountKind::Checking)]
    pub kind: AccountKind,

    /// Opening balance
    #[arg(long, default_value_t = 0.0)]
    pub balance: f64,

    /// Bank or institution
    #[arg(long)]
    pub institution: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Checking,
    Savings,
    Investment,
}

impl From<AccountKind> for AccountType {
    fn from(kind: AccountKind) -> Self {
        match kind {
            AccountKind::Checking => AccountType::Corrente,
            AccountKind::Savings => AccountType::Poupanca,
            AccountKind::Investment => AccountType::Investimento,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Card Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand, Debug)]
pub enum CardAction {
    /// List cards
    List {
        /// Page number (0-based); lists everything when omitted
        #[arg(short, long)]
        page: Option<u32>,

        /// Only cards of this brand
        #[arg(short, long, value_parser = PossibleValuesParser::new(CARD_BRANDS))]
        brand: Option<String>,

        /// Name search
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one card
    Show { id: i64 },

    /// Create a card
    Create(CardArgs),

    /// Replace a card's fields
    Update {
        id: i64,
        #[command(flatten)]
        fields: CardArgs,
    },

    /// Delete a card
    Delete {
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Limit usage across all cards
    Usage,

    /// Cards with a due date in the next N days
    Due {
        #[arg(default_value_t = 7)]
        days: u32,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CardArgs {
    /// Card name
    #[arg(long)]
    pub name: String,

    /// Card brand
    #[arg(long, value_parser = PossibleValuesParser::new(CARD_BRANDS))]
    pub brand: String,

    /// Total credit limit
    #[arg(long)]
    pub limit: f64,

    /// Statement closing day (1-31)
    #[arg(long)]
    pub closing_day: u8,

    /// Payment due day (1-31)
    #[arg(long)]
    pub due_day: u8,

    /// Last four digits, for display only (never sent)
    #[arg(long)]
    pub last_digits: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct TxCommand {
    #[command(subcommand)]
    pub action: TxAction,
}

#[derive(Subcommand, Debug)]
pub enum TxAction {
    /// List transactions (newest first)
    List {
        /// Page number (0-based)
        #[arg(short, long, default_value_t = 0)]
        page: u32,

        #[command(flatten)]
        filter: TxFilterArgs,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one transaction
    Show { id: i64 },

    /// Record a transaction
    Create(TxArgs),

    /// Replace a transaction's fields
    Update {
        id: i64,
        #[command(flatten)]
        fields: TxArgs,
    },

    /// Delete a transaction
    Delete {
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Income, expenses and balance for a period
    Summary {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Totals grouped by transaction type
    Stats {
        #[command(flatten)]
        period: PeriodArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TxFilterArgs {
    /// Only this type
    #[arg(short = 't', long = "type", value_enum)]
    pub kind: Option<TxKind>,

    /// Only this account
    #[arg(long)]
    pub account: Option<i64>,

    /// Only this card
    #[arg(long)]
    pub card: Option<i64>,

    #[command(flatten)]
    pub period: PeriodArgs,

    /// Description search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only recurring transactions
    #[arg(long)]
    pub recurring: bool,
}

impl TxFilterArgs {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.account.is_none()
            && self.card.is_none()
            && self.period.from.is_none()
            && self.period.to.is_none()
            && self.search.is_none()
            && !self.recurring
    }
}

#[derive(Args, Debug, Clone)]
pub struct TxArgs {
    /// What the money was for
    #[arg(long)]
    pub description: String,

    /// Amount (always positive; the type gives the direction)
    #[arg(long)]
    pub amount: f64,

    /// Income or expense
    #[arg(short = 't', long = "type", value_enum)]
    pub kind: TxKind,

    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Repeats every month
    #[arg(long)]
    pub recurring: bool,

    /// Account the money moves in or out of
    #[arg(long)]
    pub account: Option<i64>,

    /// Card the expense was charged to
    #[arg(long)]
    pub card: Option<i64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Income,
    Expense,
}

impl From<TxKind> for TransactionType {
    fn from(kind: TxKind) -> Self {
        match kind {
            TxKind::Income => TransactionType::Receita,
            TxKind::Expense => TransactionType::Despesa,
        }
    }
}
