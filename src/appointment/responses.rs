use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{models::appointments::Appointment, scheduling::status::DisplayStatus, utils};

#[derive(Serialize)]
pub struct CreateAppointmentResponse {
    pub success: bool,
    pub codigo_confirmacao: String,
}

#[derive(Serialize)]
pub struct SweepResponse {
    pub success: bool,
    pub atualizados: usize,
}

#[derive(Serialize)]
pub struct AppointmentItem {
    pub id: u64,
    pub codigo_confirmacao: String,
    pub protocolo: Option<String>,
    pub usuario_id: Option<u64>,
    pub cliente_nome: String,
    pub cliente_cpf: Option<String>,
    pub cliente_telefone: String,
    pub cliente_email: String,
    pub oficina_id: u64,
    pub oficina_nome: String,
    pub oficina_endereco: String,
    pub oficina_telefone: String,
    pub veiculo: String,
    pub servicos: String,
    pub total_servico: f64,
    pub data_hora: String,
    pub status: String,
    pub status_exibicao: DisplayStatus,
    pub motivo_cancelamento: Option<String>,
    pub data_cancelamento: Option<String>,
    pub divergencia: Option<String>,
    pub data_divergencia: Option<String>,
    pub data_conclusao: Option<String>,
}

impl AppointmentItem {
    pub fn new(data: Appointment, now: NaiveDateTime) -> Self {
        let status_exibicao = data.display_status(now);
        Self {
            id: data.id,
            codigo_confirmacao: data.codigo_confirmacao,
            protocolo: data.protocolo,
            usuario_id: data.usuario_id,
            cliente_nome: data.cliente_nome,
            cliente_cpf: data.cliente_cpf,
            cliente_telefone: data.cliente_telefone,
            cliente_email: data.cliente_email,
            oficina_id: data.oficina_id,
            oficina_nome: data.oficina_nome,
            oficina_endereco: data.oficina_endereco,
            oficina_telefone: data.oficina_telefone,
            veiculo: data.veiculo,
            servicos: data.servicos,
            total_servico: data.total_servico,
            data_hora: utils::format_datetime_str(&data.data_hora),
            status: data.status,
            status_exibicao,
            motivo_cancelamento: data.motivo_cancelamento,
            data_cancelamento: utils::format_datetime_opt(&data.data_cancelamento),
            divergencia: data.divergencia,
            data_divergencia: utils::format_datetime_opt(&data.data_divergencia),
            data_conclusao: utils::format_datetime_opt(&data.data_conclusao),
        }
    }
}
