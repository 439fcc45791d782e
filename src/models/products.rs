use crate::scheduling::catalog::ProductItem;

#[derive(Queryable)]
pub struct ProductData {
    pub id: u64,
    pub nome: String,
    pub tipo: String,
    pub viscosidade: Option<String>,
    pub marca: Option<String>,
    pub preco: f64,
}

impl From<ProductData> for ProductItem {
    fn from(data: ProductData) -> Self {
        ProductItem {
            id: Some(data.id),
            nome: data.nome,
            tipo: data.tipo,
            viscosidade: data.viscosidade,
            marca: data.marca,
            preco: data.preco,
        }
    }
}
