//! Credit cards (`/cartoes`).

use super::paged;
use crate::client::{ApiRequest, Pipeline};
use crate::error::Result;
use crate::types::{
    Card, CardRequest, CardUsageSummary, Exists, Page, PageRequest, Total, TotalLimit,
};

const BASE: &str = "/cartoes";

/// Default sort for paged card lists
pub const DEFAULT_SORT: &str = "nomeDoCartao";

#[derive(Clone)]
pub struct CardService {
    pipeline: Pipeline,
}

impl CardService {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub async fn create(&self, card: &CardRequest) -> Result<Card> {
        self.pipeline.call(ApiRequest::post(BASE).json(card)?).await
    }

    pub async fn list(&self) -> Result<Vec<Card>> {
        self.pipeline.call(ApiRequest::get(BASE)).await
    }

    pub async fn list_paged(&self, page: &PageRequest) -> Result<Page<Card>> {
        let req = paged(ApiRequest::get(format!("{}/paginados", BASE)), page);
        self.pipeline.call(req).await
    }

    pub async fn get(&self, id: i64) -> Result<Card> {
        self.pipeline
            .call(ApiRequest::get(format!("{}/{}", BASE, id)))
            .await
    }

    pub async fn by_brand(&self, brand: &str) -> Result<Vec<Card>> {
        let req = ApiRequest::get(format!("{}/bandeira", BASE)).query("bandeira", brand);
        self.pipeline.call(req).await
    }

    /// Partial name search.
    pub async fn search(&self, name: &str) -> Result<Vec<Card>> {
        let req = ApiRequest::get(format!("{}/buscar", BASE)).query("nome", name);
        self.pipeline.call(req).await
    }

    pub async fn by_closing_day(&self, day: u8) -> Result<Vec<Card>> {
        let req = ApiRequest::get(format!("{}/dia-fechamento", BASE)).query("dia", day);
        self.pipeline.call(req).await
    }

    pub async fn by_due_day(&self, day: u8) -> Result<Vec<Card>> {
        let req = ApiRequest::get(format!("{}/dia-vencimento", BASE)).query("dia", day);
        self.pipeline.call(req).await
    }

    pub async fn update(&self, id: i64, card: &CardRequest) -> Result<Card> {
        let req = ApiRequest::put(format!("{}/{}", BASE, id)).json(card)?;
        self.pipeline.call(req).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.pipeline
            .call_unit(ApiRequest::delete(format!("{}/{}", BASE, id)))
            .await
    }

    /// Sum of all card limits.
    pub async fn total_limit(&self) -> Result<f64> {
        let resp: TotalLimit = self
            .pipeline
            .call(ApiRequest::get(format!("{}/limite-total", BASE)))
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

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        let req = ApiRequest::get(format!("{}/verificar-nome", BASE))
            .query("nome", name)
            .query_opt("idExcluir", exclude_id);
        let resp: Exists = self.pipeline.call(req).await?;
        Ok(resp.exists)
    }

    /// Cards whose due date falls within the next `days` days.
    pub async fn due_within(&self, days: u32) -> Result<Vec<Card>> {
        let req = ApiRequest::get(format!("{}/vencendo-em", BASE)).query("dias", days);
        self.pipeline.call(req).await
    }

    pub async fn usage_summary(&self) -> Result<CardUsageSummary> {
        self.pipeline
            .call(ApiRequest::get(format!("{}/resumo-utilizacao", BASE)))
            .await
    }
}
