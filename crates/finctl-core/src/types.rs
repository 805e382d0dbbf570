//! Shared types for finctl-core.
//!
//! These mirror the finance API's JSON payloads. Field names on the wire are
//! the backend's (Portuguese, camelCase); Rust names are English.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Users & Authentication
// ─────────────────────────────────────────────────────────────────────────────

/// Role name granting administrative access.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Authenticated user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "perfil")]
    pub role: String,
}

impl User {
    /// Check whether the user has a specific role.
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Check whether the user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

/// User roles accepted at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "usuario")]
    pub user: User,
    /// Token lifetime in seconds.
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "perfil", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "usuario", default)]
    pub user: Option<User>,
}

/// Refresh response. The backend does not echo the user back.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
    #[serde(rename = "usuario", default)]
    pub user: Option<User>,
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenValidation {
    pub valid: bool,
    #[serde(rename = "usuario", default)]
    pub user: Option<User>,
    #[serde(rename = "remainingTime", default)]
    pub remaining_time: Option<i64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Corrente,
    Poupanca,
    Investimento,
}

impl AccountType {
    /// Wire value, also used as a path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Corrente => "CORRENTE",
            AccountType::Poupanca => "POUPANCA",
            AccountType::Investimento => "INVESTIMENTO",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Corrente => "Checking",
            AccountType::Poupanca => "Savings",
            AccountType::Investimento => "Investment",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub account_type: AccountType,
    #[serde(rename = "saldoInicial")]
    pub initial_balance: f64,
    #[serde(rename = "instituicao", default)]
    pub institution: Option<String>,
    #[serde(rename = "usuarioId", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "dataCriacao", default)]
    pub created_at: Option<String>,
    #[serde(rename = "dataAtualizacao", default)]
    pub updated_at: Option<String>,
    /// Server-computed balance.
    #[serde(rename = "saldoAtual", default)]
    pub current_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub account_type: AccountType,
    #[serde(rename = "saldoInicial")]
    pub initial_balance: f64,
    #[serde(rename = "instituicao", skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Credit Cards
// ─────────────────────────────────────────────────────────────────────────────

/// Card brands offered by the card form.
pub const CARD_BRANDS: [&str; 9] = [
    "Visa",
    "Mastercard",
    "American Express",
    "Elo",
    "Hipercard",
    "Diners Club",
    "Discover",
    "JCB",
    "Outros",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    #[serde(rename = "nomeDoCartao")]
    pub name: String,
    #[serde(rename = "bandeira")]
    pub brand: String,
    #[serde(rename = "limiteTotal")]
    pub total_limit: f64,
    #[serde(rename = "diaDeFechamento")]
    pub closing_day: u8,
    #[serde(rename = "diaDeVencimento")]
    pub due_day: u8,
    #[serde(rename = "usuarioId", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "limiteUtilizado", default)]
    pub used_limit: f64,
    #[serde(rename = "limiteDisponivel", default)]
    pub available_limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRequest {
    #[serde(rename = "nomeDoCartao")]
    pub name: String,
    #[serde(rename = "bandeira")]
    pub brand: String,
    #[serde(rename = "limiteTotal")]
    pub total_limit: f64,
    #[serde(rename = "diaDeFechamento")]
    pub closing_day: u8,
    #[serde(rename = "diaDeVencimento")]
    pub due_day: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardUsageSummary {
    #[serde(rename = "totalCartoes")]
    pub total_cards: u64,
    #[serde(rename = "limiteTotal")]
    pub total_limit: f64,
    #[serde(rename = "limiteUtilizado")]
    pub used_limit: f64,
    #[serde(rename = "limiteDisponivel")]
    pub available_limit: f64,
    #[serde(rename = "percentualUtilizacao")]
    pub usage_percent: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Income
    Receita,
    /// Expense
    Despesa,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Receita => "RECEITA",
            TransactionType::Despesa => "DESPESA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Receita => "Income",
            TransactionType::Despesa => "Expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRef {
    pub id: i64,
    #[serde(rename = "nomeDoCartao")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "tipo")]
    pub transaction_type: TransactionType,
    #[serde(rename = "recorrente", default)]
    pub recurring: bool,
    #[serde(rename = "contaId", default)]
    pub account_id: Option<i64>,
    #[serde(rename = "cartaoId", default)]
    pub card_id: Option<i64>,
    #[serde(rename = "conta", default)]
    pub account: Option<AccountRef>,
    #[serde(rename = "cartao", default)]
    pub card: Option<CardRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "tipo")]
    pub transaction_type: TransactionType,
    #[serde(rename = "recorrente")]
    pub recurring: bool,
    #[serde(rename = "contaId", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(rename = "cartaoId", skip_serializing_if = "Option::is_none")]
    pub card_id: Option<i64>,
}

/// Optional filters for the transaction search endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub account_id: Option<i64>,
    pub card_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub recurring: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(rename = "inicio")]
    pub start: NaiveDate,
    #[serde(rename = "fim")]
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    #[serde(rename = "totalReceitas")]
    pub total_income: f64,
    #[serde(rename = "totalDespesas")]
    pub total_expenses: f64,
    #[serde(rename = "saldo")]
    pub balance: f64,
    #[serde(rename = "periodo", default)]
    pub period: Option<Period>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeStatistics {
    #[serde(rename = "tipo")]
    pub transaction_type: TransactionType,
    pub total: f64,
    #[serde(rename = "quantidade")]
    pub count: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Pagination
// ─────────────────────────────────────────────────────────────────────────────

/// Spring-style page envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(rename = "totalElements")]
    pub total_elements: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
    pub first: bool,
    pub last: bool,
}

/// Page request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: String,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 10;

    pub fn new(page: u32, size: u32, sort: impl Into<String>) -> Self {
        Self {
            page,
            size,
            sort: sort.into(),
        }
    }

    /// First page with the default size.
    pub fn first(sort: impl Into<String>) -> Self {
        Self::new(0, Self::DEFAULT_SIZE, sort)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregate responses (single-field JSON objects)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct TotalBalance {
    #[serde(rename = "saldoTotal")]
    pub total: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TotalLimit {
    #[serde(rename = "limiteTotal")]
    pub total: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Total<T> {
    pub total: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Exists {
    #[serde(rename = "existe")]
    pub exists: bool,
}
