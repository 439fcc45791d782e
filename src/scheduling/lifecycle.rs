use chrono::NaiveDateTime;

use super::status::AppointmentStatus;
use crate::error::{ServiceError, ServiceResult};

const CODE_PREFIX: &str = "OS";
const CODE_MODULUS: i64 = 10_000_000_000;

/// Human-readable booking reference derived from the creation time. `bump`
/// is incremented by the caller until the code is unused.
pub fn confirmation_code(now: NaiveDateTime, bump: u32) -> String {
    let n = (now.timestamp_millis() + i64::from(bump)).rem_euclid(CODE_MODULUS);
    format!("{}{:010}", CODE_PREFIX, n)
}

/// Columns a status change writes. Untouched columns stay `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusUpdate {
    pub status: Option<AppointmentStatus>,
    pub motivo_cancelamento: Option<String>,
    pub data_cancelamento: Option<NaiveDateTime>,
    pub divergencia: Option<String>,
    pub data_divergencia: Option<NaiveDateTime>,
    pub data_conclusao: Option<NaiveDateTime>,
    pub protocolo: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct StatusMeta {
    pub motivo: Option<String>,
    pub divergencia: Option<String>,
}

fn required_text(value: Option<&str>, err: &str) -> ServiceResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ServiceError::validation(err)),
    }
}

pub fn plan_cancel(
    current: AppointmentStatus,
    motivo: &str,
    now: NaiveDateTime,
) -> ServiceResult<StatusUpdate> {
    let motivo = required_text(Some(motivo), "Informe o motivo do cancelamento")?;
    let status = current.transition(AppointmentStatus::Cancelado)?;
    Ok(StatusUpdate {
        status: Some(status),
        motivo_cancelamento: Some(motivo),
        data_cancelamento: Some(now),
        ..Default::default()
    })
}

/// Workshop-side status change. `protocolo` is the value currently stored on
/// the appointment.
pub fn plan_status_change(
    current: AppointmentStatus,
    protocolo: Option<&str>,
    next: AppointmentStatus,
    meta: &StatusMeta,
    now: NaiveDateTime,
) -> ServiceResult<StatusUpdate> {
    if next == AppointmentStatus::Cancelado {
        return plan_cancel(current, meta.motivo.as_deref().unwrap_or(""), now);
    }

    let status = current.transition(next)?;
    let mut update = StatusUpdate {
        status: Some(status),
        ..Default::default()
    };
    match status {
        AppointmentStatus::Divergencia => {
            update.divergencia = Some(required_text(
                meta.divergencia.as_deref(),
                "Descreva a divergência",
            )?);
            update.data_divergencia = Some(now);
        }
        AppointmentStatus::Concluido => {
            if protocolo.map_or(true, |p| p.trim().is_empty()) {
                return Err(ServiceError::conflict(
                    "Atribua um protocolo antes de concluir o agendamento",
                ));
            }
            update.data_conclusao = Some(now);
        }
        _ => {}
    }
    Ok(update)
}

pub fn plan_protocol(current: AppointmentStatus, protocolo: &str) -> ServiceResult<StatusUpdate> {
    let protocolo = required_text(Some(protocolo), "Protocolo não pode ser vazio")?;
    if current.is_terminal() {
        return Err(ServiceError::conflict(format!(
            "Agendamento já está {}, não pode ser alterado",
            current
        )));
    }
    Ok(StatusUpdate {
        protocolo: Some(protocolo),
        ..Default::default()
    })
}
