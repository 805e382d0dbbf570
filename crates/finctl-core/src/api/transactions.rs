//! Income and expense transactions (`/transacoes`).

use chrono::NaiveDate;

use super::paged;
use crate::client::{ApiRequest, Pipeline};
use crate::error::Result;
use crate::types::{
    FinancialSummary, Page, PageRequest, Total, Transaction, TransactionFilter,
    TransactionRequest, TransactionType, TypeStatistics,
};

const BASE: &str = "/transacoes";

/// Default sort for paged transaction lists (newest first)
pub const DEFAULT_SORT: &str = "data,desc";

#[derive(Clone)]
pub struct TransactionService {
    pipeline: Pipeline,
}

/// Attach optional `dataInicio`/`dataFim` parameters.
fn period(request: ApiRequest, start: Option<NaiveDate>, end: Option<NaiveDate>) -> ApiRequest {
    request
        .query_opt("dataInicio", start)
        .query_opt("dataFim", end)
}

fn filtered(request: ApiRequest, filter: &TransactionFilter) -> ApiRequest {
    let request = request
        .query_opt("tipo", filter.transaction_type.map(|t| t.as_str()))
        .query_opt("contaId", filter.account_id)
        .query_opt("cartaoId", filter.card_id);
    period(request, filter.start_date, filter.end_date)
        .query_opt("descricao", filter.description.as_deref())
        .query_opt("recorrente", filter.recurring)
}

impl TransactionService {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub async fn create(&self, transaction: &TransactionRequest) -> Result<Transaction> {
        self.pipeline
            .call(ApiRequest::post(BASE).json(transaction)?)
            .await
    }

    pub async fn list(&self) -> Result<Vec<Transaction>> {
        self.pipeline.call(ApiRequest::get(BASE)).await
    }

    pub async fn list_paged(&self, page: &PageRequest) -> Result<Page<Transaction>> {
        let req = paged(ApiRequest::get(format!("{}/paginadas", BASE)), page);
        self.pipeline.call(req).await
    }

    pub async fn filter(
        &self,
        filter: &TransactionFilter,
        page: &PageRequest,
    ) -> Result<Page<Transaction>> {
        let req = paged(ApiRequest::get(format!("{}/filtrar", BASE)), page);
        self.pipeline.call(filtered(req, filter)).await
    }

    pub async fn get(&self, id: i64) -> Result<Transaction> {
        self.pipeline
            .call(ApiRequest::get(format!("{}/{}", BASE, id)))
            .await
    }

    pub async fn by_account(&self, account_id: i64) -> Result<Vec<Transaction>> {
        self.pipeline
            .call(ApiRequest::get(format!("{}/conta/{}", BASE, account_id)))
            .await
    }

    pub async fn by_card(&self, card_id: i64) -> Result<Vec<Transaction>> {
        self.pipeline
            .call(ApiRequest::get(format!("{}/cartao/{}", BASE, card_id)))
            .await
    }

    pub async fn by_type(&self, transaction_type: TransactionType) -> Result<Vec<Transaction>> {
        self.pipeline
            .call(ApiRequest::get(format!(
                "{}/tipo/{}",
                BASE,
                transaction_type.as_str()
            )))
            .await
    }

    pub async fn by_period(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
        let req = period(
            ApiRequest::get(format!("{}/periodo", BASE)),
            Some(start),
            Some(end),
        );
        self.pipeline.call(req).await
    }

    pub async fn recurring(&self) -> Result<Vec<Transaction>> {
        self.pipeline
            .call(ApiRequest::get(format!("{}/recorrentes", BASE)))
            .await
    }

    /// Description search.
    pub async fn search(&self, description: &str) -> Result<Vec<Transaction>> {
        let req = ApiRequest::get(format!("{}/buscar", BASE)).query("descricao", description);
        self.pipeline.call(req).await
    }

    pub async fn update(&self, id: i64, transaction: &TransactionRequest) -> Result<Transaction> {
        let req = ApiRequest::put(format!("{}/{}", BASE, id)).json(transaction)?;
        self.pipeline.call(req).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.pipeline
            .call_unit(ApiRequest::delete(format!("{}/{}", BASE, id)))
            .await
    }

    pub async fn total_income(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<f64> {
        let req = period(ApiRequest::get(format!("{}/total-receitas", BASE)), start, end);
        let resp: Total<f64> = self.pipeline.call(req).await?;
        Ok(resp.total)
    }

    pub async fn total_expenses(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<f64> {
        let req = period(ApiRequest::get(format!("{}/total-despesas", BASE)), start, end);
        let resp: Total<f64> = self.pipeline.call(req).await?;
        Ok(resp.total)
    }

    pub async fn summary(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<FinancialSummary> {
        let req = period(
            ApiRequest::get(format!("{}/resumo-financeiro", BASE)),
            start,
            end,
        );
        self.pipeline.call(req).await
    }

    pub async fn count(&self) -> Result<u64> {
        let resp: Total<u64> = self
            .pipeline
            .call(ApiRequest::get(format!("{}/contar", BASE)))
            .await?;
        Ok(resp.total)
    }

    pub async fn statistics_by_type(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<TypeStatistics>> {
        let req = period(
            ApiRequest::get(format!("{}/estatisticas-tipo", BASE)),
            start,
            end,
        );
        self.pipeline.call(req).await
    }
}
