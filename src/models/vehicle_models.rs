#[derive(Queryable)]
pub struct VehicleModelData {
    pub id: u64,
    pub marca_id: u64,
    pub nome: String,
}
