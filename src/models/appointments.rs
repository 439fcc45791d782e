use crate::{
    scheduling::{
        lifecycle::StatusUpdate,
        status::{derive_display_status, AppointmentStatus, DisplayStatus},
    },
    schema::agendamentos,
};
use chrono::NaiveDateTime;

#[derive(Queryable, Clone, Debug)]
pub struct Appointment {
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
    pub data_hora: NaiveDateTime,
    pub status: String,
    pub motivo_cancelamento: Option<String>,
    pub data_cancelamento: Option<NaiveDateTime>,
    pub divergencia: Option<String>,
    pub data_divergencia: Option<NaiveDateTime>,
    pub data_conclusao: Option<NaiveDateTime>,
    pub criado_em: NaiveDateTime,
}

impl Appointment {
    /// Rows written before the status enum existed may carry anything; those
    /// are treated as still pending.
    pub fn status(&self) -> AppointmentStatus {
        self.status.parse().unwrap_or_else(|_| {
            tracing::warn!(id = self.id, status = %self.status, "unknown stored status, reading as pendente");
            AppointmentStatus::Pendente
        })
    }

    pub fn display_status(&self, now: NaiveDateTime) -> DisplayStatus {
        derive_display_status(self.status(), self.data_hora, now)
    }
}

#[derive(Insertable)]
#[table_name = "agendamentos"]
pub struct NewAppointment {
    pub codigo_confirmacao: String,
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
    pub data_hora: NaiveDateTime,
    pub status: String,
    pub criado_em: NaiveDateTime,
}

#[derive(AsChangeset, Default)]
#[table_name = "agendamentos"]
pub struct UpdateAppointment {
    pub status: Option<String>,
    pub protocolo: Option<String>,
    pub motivo_cancelamento: Option<String>,
    pub data_cancelamento: Option<NaiveDateTime>,
    pub divergencia: Option<String>,
    pub data_divergencia: Option<NaiveDateTime>,
    pub data_conclusao: Option<NaiveDateTime>,
}

impl From<StatusUpdate> for UpdateAppointment {
    fn from(update: StatusUpdate) -> Self {
        UpdateAppointment {
            status: update.status.map(|s| s.as_str().to_string()),
            protocolo: update.protocolo,
            motivo_cancelamento: update.motivo_cancelamento,
            data_cancelamento: update.data_cancelamento,
            divergencia: update.divergencia,
            data_divergencia: update.data_divergencia,
            data_conclusao: update.data_conclusao,
        }
    }
}
