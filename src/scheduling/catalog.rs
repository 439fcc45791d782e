use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

pub const PRODUCT_KIND_OIL: &str = "oleo";
pub const PRODUCT_KIND_FILTER: &str = "filtro";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductItem {
    /// `None` for the generic fallback products.
    pub id: Option<u64>,
    pub nome: String,
    pub tipo: String,
    pub viscosidade: Option<String>,
    pub marca: Option<String>,
    pub preco: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub oleo: Option<ProductItem>,
    pub filtro: Option<ProductItem>,
}

impl Recommendation {
    pub fn total(&self) -> f64 {
        self.oleo.iter().chain(self.filtro.iter()).map(|p| p.preco).sum()
    }
}

/// Degraded default offered when a vehicle has no recommendation row.
pub fn generic_recommendation() -> Recommendation {
    Recommendation {
        oleo: Some(ProductItem {
            id: None,
            nome: "Óleo sintético 5W-30 (genérico)".to_string(),
            tipo: PRODUCT_KIND_OIL.to_string(),
            viscosidade: Some("5W-30".to_string()),
            marca: None,
            preco: 45.0,
        }),
        filtro: Some(ProductItem {
            id: None,
            nome: "Filtro de óleo (genérico)".to_string(),
            tipo: PRODUCT_KIND_FILTER.to_string(),
            viscosidade: None,
            marca: None,
            preco: 25.0,
        }),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct ProductSelection {
    #[serde(default)]
    pub oleo: bool,
    #[serde(default)]
    pub filtro: bool,
}

pub fn select_products(
    recommendation: &Recommendation,
    selection: ProductSelection,
) -> ServiceResult<Vec<ProductItem>> {
    if !selection.oleo && !selection.filtro {
        return Err(ServiceError::validation("Selecione ao menos um produto"));
    }

    let mut products = Vec::new();
    if selection.oleo {
        let oil = recommendation
            .oleo
            .clone()
            .ok_or_else(|| ServiceError::validation("Não há óleo recomendado para este veículo"))?;
        products.push(oil);
    }
    if selection.filtro {
        let filter = recommendation
            .filtro
            .clone()
            .ok_or_else(|| ServiceError::validation("Não há filtro recomendado para este veículo"))?;
        products.push(filter);
    }
    Ok(products)
}
