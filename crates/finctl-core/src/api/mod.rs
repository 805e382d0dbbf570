//! Resource services for the finance API.
//!
//! Thin wrappers over [`Pipeline`]: each method builds one request and decodes
//! the response. Business rules (balances, limits, aggregation) live on the
//! server.

pub mod accounts;
pub mod cards;
pub mod transactions;

pub use accounts::AccountService;
pub use cards::CardService;
pub use transactions::TransactionService;

use crate::client::{ApiRequest, Pipeline};
use crate::types::PageRequest;

/// Entry point bundling all resource services.
#[derive(Clone)]
pub struct FinanceApi {
    pipeline: Pipeline,
}

impl FinanceApi {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.pipeline.clone())
    }

    pub fn cards(&self) -> CardService {
        CardService::new(self.pipeline.clone())
    }

    pub fn transactions(&self) -> TransactionService {
        TransactionService::new(self.pipeline.clone())
    }
}

fn paged(request: ApiRequest, page: &PageRequest) -> ApiRequest {
    request
        .query("page", page.page)
        .query("size", page.size)
        .query("sort", &page.sort)
}
