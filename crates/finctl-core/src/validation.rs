//! Client-side form validation.
//!
//! Validators collect every failing field instead of stopping at the first
//! one, so a form can show all problems at once.

use std::fmt;
use thiserror::Error;

use crate::types::{AccountRequest, CardRequest, LoginRequest, RegisterRequest, TransactionRequest, TransactionType};

/// Minimum password length at login and registration
pub const MIN_PASSWORD_LEN: usize = 6;
/// Maximum password length at registration
pub const MAX_PASSWORD_LEN: usize = 50;
/// Name bounds for users, accounts and cards
pub const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=100;
pub const MAX_INSTITUTION_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 200;
pub const MIN_AMOUNT: f64 = 0.01;

/// A single invalid field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All invalid fields of a form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "Invalid form: {}", parts.join("; "))
    }
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether `field` failed validation.
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Characters allowed in the local part besides ASCII alphanumerics.
const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

/// Email check matching the web form rules: dot-separated atoms before the
/// `@`, hostname labels after it. A top-level domain is not required, so
/// `ana@localhost` passes.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.len() > 64 {
        return false;
    }

    let local_ok = local.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c))
    });
    let domain_ok = domain.split('.').all(|label| {
        (1..=63).contains(&label.len())
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    local_ok && domain_ok
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.trim().is_empty() {
        errors.push("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.push("email", "Enter a valid email");
    }
}

fn check_name(errors: &mut ValidationErrors, field: &'static str, name: &str) {
    let len = char_len(name.trim());
    if len == 0 {
        errors.push(field, "Name is required");
    } else if !NAME_LEN.contains(&len) {
        errors.push(
            field,
            format!(
                "Name must be between {} and {} characters",
                NAME_LEN.start(),
                NAME_LEN.end()
            ),
        );
    }
}

pub fn validate_login(req: &LoginRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_email(&mut errors, &req.email);
    if req.password.is_empty() {
        errors.push("senha", "Password is required");
    } else if char_len(&req.password) < MIN_PASSWORD_LEN {
        errors.push(
            "senha",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
    errors.into_result()
}

pub fn validate_register(req: &RegisterRequest, confirmation: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_name(&mut errors, "nome", &req.name);
    check_email(&mut errors, &req.email);

    let len = char_len(&req.password);
    if len == 0 {
        errors.push("senha", "Password is required");
    } else if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        errors.push(
            "senha",
            format!(
                "Password must be between {} and {} characters",
                MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
            ),
        );
    }

    if confirmation.is_empty() {
        errors.push("confirmarSenha", "Password confirmation is required");
    } else if confirmation != req.password {
        errors.push("confirmarSenha", "Passwords do not match");
    }
    errors.into_result()
}

pub fn validate_account(req: &AccountRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_name(&mut errors, "nome", &req.name);
    if !(req.initial_balance >= 0.0) {
        errors.push("saldoInicial", "Initial balance cannot be negative");
    }
    if let Some(ref institution) = req.institution {
        if char_len(institution) > MAX_INSTITUTION_LEN {
            errors.push(
                "instituicao",
                format!("Institution must be at most {} characters", MAX_INSTITUTION_LEN),
            );
        }
    }
    errors.into_result()
}

/// Validate a card form. `last_digits` is the optional "last four digits"
/// field, which is display-only and never sent to the server.
pub fn validate_card(req: &CardRequest, last_digits: Option<&str>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_name(&mut errors, "nomeDoCartao", &req.name);
    if req.brand.trim().is_empty() {
        errors.push("bandeira", "Brand is required");
    }
    if !(req.total_limit >= 0.0) {
        errors.push("limiteTotal", "Total limit cannot be negative");
    }
    for (field, day) in [
        ("diaDeFechamento", req.closing_day),
        ("diaDeVencimento", req.due_day),
    ] {
        if !(1..=31).contains(&day) {
            errors.push(field, "Day must be between 1 and 31");
        }
    }
    if let Some(digits) = last_digits.filter(|d| !d.is_empty()) {
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            errors.push("ultimosDigitos", "Must contain exactly 4 digits");
        }
    }
    errors.into_result()
}

/// Expenses need an account or a card; income needs an account.
pub fn validate_transaction(req: &TransactionRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let len = char_len(req.description.trim());
    if len == 0 {
        errors.push("descricao", "Description is required");
    } else if len > MAX_DESCRIPTION_LEN {
        errors.push(
            "descricao",
            format!("Description must be at most {} characters", MAX_DESCRIPTION_LEN),
        );
    }
    if !(req.amount >= MIN_AMOUNT) {
        errors.push("valor", format!("Amount must be at least {}", MIN_AMOUNT));
    }

    match req.transaction_type {
        TransactionType::Despesa => {
            if req.account_id.is_none() && req.card_id.is_none() {
                errors.push("contaId", "Select an account or a card");
            }
        }
        TransactionType::Receita => {
            if req.account_id.is_none() {
                errors.push("contaId", "Account is required");
            }
        }
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountType;
    use chrono::NaiveDate;

    fn transaction(kind: TransactionType) -> TransactionRequest {
        TransactionRequest {
            description: "Rent".into(),
            amount: 1500.0,
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            transaction_type: kind,
            recurring: true,
            account_id: None,
            card_id: None,
        }
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("ana@example"));
        assert!(is_valid_email("ana.lima+finance@mail.example.com"));
        assert!(!is_valid_email("ana@example."));
        assert!(!is_valid_email("ana@-example.com"));
        assert!(!is_valid_email(".ana@example.com"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn test_login() {
        let ok = LoginRequest {
            email: "ana@example.com".into(),
            password: "secret1".into(),
        };
        assert!(validate_login(&ok).is_ok());

        let bad = LoginRequest {
            email: "nope".into(),
            password: "123".into(),
        };
        let errors = validate_login(&bad).unwrap_err();
        assert!(errors.has("email"));
        assert!(errors.has("senha"));
    }

    #[test]
    fn test_register_password_mismatch() {
        let req = RegisterRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "secret1".into(),
            role: None,
        };
        assert!(validate_register(&req, "secret1").is_ok());

        let errors = validate_register(&req, "secret2").unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].message, "Passwords do not match");
    }

    #[test]
    fn test_register_password_too_long() {
        let req = RegisterRequest {
            name: "A".into(),
            email: "ana@example.com".into(),
            password: "x".repeat(51),
            role: None,
        };
        let errors = validate_register(&req, &req.password).unwrap_err();
        assert!(errors.has("nome"));
        assert!(errors.has("senha"));
    }

    #[test]
    fn test_account() {
        let mut req = AccountRequest {
            name: "Nubank".into(),
            account_type: AccountType::Corrente,
            initial_balance: 0.0,
            institution: None,
        };
        assert!(validate_account(&req).is_ok());

        req.initial_balance = -1.0;
        req.institution = Some("x".repeat(101));
        let errors = validate_account(&req).unwrap_err();
        assert!(errors.has("saldoInicial"));
        assert!(errors.has("instituicao"));
    }

    #[test]
    fn test_card() {
        let mut req = CardRequest {
            name: "Platinum".into(),
            brand: "Visa".into(),
            total_limit: 5000.0,
            closing_day: 3,
            due_day: 10,
        };
        assert!(validate_card(&req, Some("1234")).is_ok());
        assert!(validate_card(&req, Some("")).is_ok());

        req.due_day = 32;
        req.closing_day = 0;
        let errors = validate_card(&req, Some("12a4")).unwrap_err();
        assert!(errors.has("diaDeFechamento"));
        assert!(errors.has("diaDeVencimento"));
        assert!(errors.has("ultimosDigitos"));
    }

    #[test]
    fn test_expense_needs_account_or_card() {
        let mut req = transaction(TransactionType::Despesa);
        assert!(validate_transaction(&req).unwrap_err().has("contaId"));

        req.card_id = Some(2);
        assert!(validate_transaction(&req).is_ok());
    }

    #[test]
    fn test_income_needs_account() {
        let mut req = transaction(TransactionType::Receita);
        req.card_id = Some(2);
        assert!(validate_transaction(&req).unwrap_err().has("contaId"));

        req.account_id = Some(1);
        assert!(validate_transaction(&req).is_ok());
    }

    #[test]
    fn test_amount_minimum() {
        let mut req = transaction(TransactionType::Receita);
        req.account_id = Some(1);
        req.amount = 0.0;
        assert!(validate_transaction(&req).unwrap_err().has("valor"));
    }
}
