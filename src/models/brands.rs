#[derive(Queryable)]
pub struct BrandData {
    pub id: u64,
    pub nome: String,
}
