#[derive(Queryable)]
pub struct ModelYearData {
    pub id: u64,
    pub modelo_id: u64,
    pub ano: i32,
}
