use serde::Serialize;

use crate::scheduling::catalog::{ProductItem, Recommendation};

#[derive(Serialize)]
pub struct NamedItem {
    pub id: u64,
    pub nome: String,
}

#[derive(Serialize)]
pub struct ModelYearItem {
    pub id: u64,
    pub ano: i32,
}

#[derive(Serialize)]
pub struct RecommendationItem {
    pub oleo: Option<ProductItem>,
    pub filtro: Option<ProductItem>,
    pub total: f64,
}

impl From<Recommendation> for RecommendationItem {
    fn from(rec: Recommendation) -> Self {
        Self {
            total: rec.total(),
            oleo: rec.oleo,
            filtro: rec.filtro,
        }
    }
}
