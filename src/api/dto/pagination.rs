//! Pagination query parameters for the history endpoint.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Query parameters of `GET /api/transacoes/historico`.
///
/// Pages are 0-indexed. Range validation lives in the transfer engine so
/// out-of-range values surface as `PAGINACAO_INVALIDA`, not as a framework
/// rejection.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub size: Option<i64>,
}

impl HistoryParams {
    /// Applies defaults: page 0, size 10.
    pub fn page_and_size(&self) -> (i64, i64) {
        (self.page.unwrap_or(0), self.size.unwrap_or(10))
    }
}
