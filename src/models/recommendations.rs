#[derive(Queryable)]
pub struct RecommendationData {
    pub id: u64,
    pub modelo_ano_id: u64,
    pub oleo_id: Option<u64>,
    pub filtro_id: Option<u64>,
}
