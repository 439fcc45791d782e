use serde::Deserialize;

#[derive(Deserialize)]
pub struct ListModelsRequest {
    pub marca_id: u64,
}

#[derive(Deserialize)]
pub struct ListModelYearsRequest {
    pub modelo_id: u64,
}

#[derive(Deserialize)]
pub struct RecommendationRequest {
    pub modelo_ano_id: u64,
}
