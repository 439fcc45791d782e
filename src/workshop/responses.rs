use serde::Serialize;

use crate::{models::workshops::WorkshopData, scheduling::locator::Located};

#[derive(Serialize)]
pub struct WorkshopItem {
    pub id: u64,
    pub nome: String,
    pub endereco: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub telefone: String,
    pub horario_abertura: String,
    pub horario_fechamento: String,
    pub dias_funcionamento: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl From<WorkshopData> for WorkshopItem {
    fn from(data: WorkshopData) -> Self {
        let coords = data.coordinates();
        Self {
            id: data.id,
            nome: data.nome,
            endereco: data.endereco,
            cidade: data.cidade,
            estado: data.estado,
            cep: data.cep,
            telefone: data.telefone,
            horario_abertura: data.horario_abertura,
            horario_fechamento: data.horario_fechamento,
            dias_funcionamento: data.dias_funcionamento,
            lat: coords.map(|c| c.lat),
            lng: coords.map(|c| c.lng),
        }
    }
}

#[derive(Serialize)]
pub struct RankedWorkshopItem {
    #[serde(flatten)]
    pub workshop: WorkshopItem,
    /// Kilometres from the requested point; `null` when the workshop has no
    /// usable coordinates.
    pub distancia: Option<f64>,
}
