//! Bank accounts (`/contas`).

use super::paged;
use crate::client::{ApiRequest, Pipeline};
use crate::error::Result;
use crate::types::{
    Account, AccountRequest, AccountType, Exists, Page, PageRequest, Total, TotalBalance,
};

const BASE: &str = "/contas";

/// Default sort for paged account lists
pub const DEFAULT_SORT: &str = "nome";

#[derive(Clone)]
pub struct AccountService {
    pipeline: Pipeline,
}

impl AccountService {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub async fn create(&self, account: &AccountRequest) -> Result<Account> {
        self.pipeline.call(ApiRequest::post(BASE).json(account)?).await
    }

    pub async fn list(&self) -> Result<Vec<Account>> {
        self.pipeline.call(ApiRequest::get(BASE)).await
    }

    pub async fn list_paged(&self, page: &PageRequest) -> Result<Page<Account>> {
        let req = paged(ApiRequest::get(format!("{}/paginadas", BASE)), page);
        self.pipeline.call(req).await
    }

    pub async fn get(&self, id: i64) -> Result<Account> {
        self.pipeline
            .call(ApiRequest::get(format!("{}/{}", BASE, id)))
            .await
    }

    pub async fn by_type(&self, account_type: AccountType) -> Result<Vec<Account>> {
        self.pipeline
            .call(ApiRequest::get(format!("{}/tipo/{}", BASE, account_type.as_str())))
            .await
    }

    pub async fn by_institution(&self, institution: &str) -> Result<Vec<Account>> {
        let req = ApiRequest::get(format!("{}/instituicao", BASE)).query("instituicao", institution);
        self.pipeline.call(req).await
    }

    /// Partial name search.
    pub async fn search(&self, name: &str) -> Result<Vec<Account>> {
        let req = ApiRequest::get(format!("{}/buscar", BASE)).query("nome", name);
        self.pipeline.call(req).await
    }

    pub async fn active(&self) -> Result<Vec<Account>> {
        self.pipeline
            .call(ApiRequest::get(format!("{}/ativas", BASE)))
            .await
    }

    pub async fn without_transactions(&self) -> Result<Vec<Account>> {
        self.pipeline
            .call(ApiRequest::get(format!("{}/sem-transacoes", BASE)))
            .await
    }

    pub async fn update(&self, id: i64, account: &AccountRequest) -> Result<Account> {
        let req = ApiRequest::put(format!("{}/{}", BASE, id)).json(account)?;
        self.pipeline.call(req).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.pipeline
            .call_unit(ApiRequest::delete(format!("{}/{}", BASE, id)))
            .await
    }

    /// Sum of all account balances.
    pub async fn total_balance(&self) -> Result<f64> {
        let resp: TotalBalance = self
            .pipeline
            .call(ApiRequest::get(format!("{}/saldo-total", BASE)))
            .await?;
        Ok(resp.total)
    }

    pub async fn count(&self) -> Result<u64> {
        let resp: Total<u64> = self
            .pipeline
            .call(ApiRequest::get(format!("{}/contar", BASE)))
            .await?;
        Ok(resp.total)
    }

    /// Whether another account already uses `name`.
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        let req = ApiRequest::get(format!("{}/verificar-nome", BASE))
            .query("nome", name)
            .query_opt("idExcluir", exclude_id);
        let resp: Exists = self.pipeline.call(req).await?;
        Ok(resp.exists)
    }
}
