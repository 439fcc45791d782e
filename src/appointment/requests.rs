use serde::Deserialize;

use crate::scheduling::catalog::ProductSelection;

#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    #[serde(default)]
    pub data_hora: String,
    pub oficina_id: u64,
    #[serde(default)]
    pub veiculo: String,
    pub modelo_ano_id: Option<u64>,
    #[serde(default)]
    pub produtos: ProductSelection,
    #[serde(default)]
    pub cliente_nome: String,
    pub cliente_cpf: Option<String>,
    #[serde(default)]
    pub cliente_telefone: String,
    #[serde(default)]
    pub cliente_email: String,
    pub usuario_id: Option<u64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Client-side total, only used to log disagreement with the server's.
    pub total_servico: Option<f64>,
}

#[derive(Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub motivo: String,
}

#[derive(Deserialize)]
pub struct MarkStatusRequest {
    pub status: String,
    pub divergencia: Option<String>,
    pub motivo: Option<String>,
}

#[derive(Deserialize)]
pub struct AssignProtocolRequest {
    #[serde(default)]
    pub protocolo: String,
}
