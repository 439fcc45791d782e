use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pendente,
    Agendado,
    Concluido,
    Cancelado,
    Divergencia,
    ForaPrazo,
}

use AppointmentStatus::*;

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pendente => "pendente",
            Agendado => "agendado",
            Concluido => "concluido",
            Cancelado => "cancelado",
            Divergencia => "divergencia",
            ForaPrazo => "fora_prazo",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Concluido | Cancelado)
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        match (self, next) {
            (Concluido, _) | (Cancelado, _) => false,
            (Pendente, Agendado) => true,
            (Agendado, Concluido) => true,
            (Divergencia, Agendado) | (Divergencia, Concluido) => true,
            (ForaPrazo, Concluido) => true,
            (Pendente, ForaPrazo) | (Agendado, ForaPrazo) | (Divergencia, ForaPrazo) => true,
            (from, Cancelado) | (from, Divergencia) => *from != next,
            _ => false,
        }
    }

    pub fn transition(self, next: AppointmentStatus) -> Result<AppointmentStatus, ServiceError> {
        if self.is_terminal() {
            return Err(ServiceError::conflict(format!(
                "Agendamento já está {}, não pode ser alterado",
                self
            )));
        }
        if !self.can_transition_to(next) {
            return Err(ServiceError::conflict(format!(
                "Transição de {} para {} não permitida",
                self, next
            )));
        }
        Ok(next)
    }

    /// Rows still waiting on the workshop; the expired sweep looks at these.
    pub fn awaiting_service() -> [AppointmentStatus; 2] {
        [Pendente, Agendado]
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendente" => Ok(Pendente),
            "agendado" | "confirmado" => Ok(Agendado),
            "concluido" | "concluído" => Ok(Concluido),
            "cancelado" => Ok(Cancelado),
            "divergencia" | "divergência" => Ok(Divergencia),
            "fora_prazo" => Ok(ForaPrazo),
            other => Err(ServiceError::validation(format!("Status desconhecido: {}", other))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DisplayStatus {
    Cancelled,
    Completed,
    Scheduled,
    PastDue,
}

/// What the customer sees for an appointment at `now`.
pub fn derive_display_status(
    status: AppointmentStatus,
    data_hora: NaiveDateTime,
    now: NaiveDateTime,
) -> DisplayStatus {
    match status {
        Cancelado => DisplayStatus::Cancelled,
        Concluido => DisplayStatus::Completed,
        ForaPrazo => DisplayStatus::PastDue,
        _ if data_hora < now => DisplayStatus::PastDue,
        _ => DisplayStatus::Scheduled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const ALL: [AppointmentStatus; 6] = [Pendente, Agendado, Concluido, Cancelado, Divergencia, ForaPrazo];

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd(2026, 5, 20).and_hms(12, 0, 0)
    }

    fn yesterday() -> NaiveDateTime {
        NaiveDate::from_ymd(2026, 5, 19).and_hms(9, 0, 0)
    }

    fn tomorrow() -> NaiveDateTime {
        NaiveDate::from_ymd(2026, 5, 21).and_hms(9, 0, 0)
    }

    #[test]
    fn past_unresolved_is_past_due() {
        assert_eq!(derive_display_status(Pendente, yesterday(), now()), DisplayStatus::PastDue);
        assert_eq!(derive_display_status(Agendado, yesterday(), now()), DisplayStatus::PastDue);
    }

    #[test]
    fn terminal_states_ignore_the_date() {
        for when in &[yesterday(), tomorrow()] {
            assert_eq!(derive_display_status(Concluido, *when, now()), DisplayStatus::Completed);
            assert_eq!(derive_display_status(Cancelado, *when, now()), DisplayStatus::Cancelled);
        }
    }

    #[test]
    fn future_open_is_scheduled() {
        assert_eq!(derive_display_status(Pendente, tomorrow(), now()), DisplayStatus::Scheduled);
        assert_eq!(derive_display_status(Divergencia, tomorrow(), now()), DisplayStatus::Scheduled);
    }

    #[test]
    fn stored_fora_prazo_is_past_due() {
        assert_eq!(derive_display_status(ForaPrazo, tomorrow(), now()), DisplayStatus::PastDue);
    }

    #[test]
    fn terminal_states_reject_everything() {
        for next in ALL.iter() {
            assert!(Cancelado.transition(*next).is_err());
            assert!(Concluido.transition(*next).is_err());
        }
    }

    #[test]
    fn happy_path() {
        let s = Pendente.transition(Agendado).unwrap();
        let s = s.transition(Concluido).unwrap();
        assert_eq!(s, Concluido);
    }

    #[test]
    fn side_branches_from_open_states() {
        for from in &[Pendente, Agendado, Divergencia, ForaPrazo] {
            assert!(from.can_transition_to(Cancelado), "{} -> cancelado", from);
        }
        for from in &[Pendente, Agendado, ForaPrazo] {
            assert!(from.can_transition_to(Divergencia), "{} -> divergencia", from);
        }
        assert!(!Divergencia.can_transition_to(Divergencia));
    }

    #[test]
    fn pending_cannot_skip_to_completed() {
        assert!(Pendente.transition(Concluido).is_err());
        assert!(Agendado.transition(Agendado).is_err());
        assert!(Agendado.transition(Pendente).is_err());
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("confirmado".parse::<AppointmentStatus>().unwrap(), Agendado);
        assert_eq!(" Concluido ".parse::<AppointmentStatus>().unwrap(), Concluido);
        assert_eq!("fora_prazo".parse::<AppointmentStatus>().unwrap(), ForaPrazo);
        assert!("arquivado".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn as_str_round_trips() {
        for s in ALL.iter() {
            assert_eq!(s.as_str().parse::<AppointmentStatus>().unwrap(), *s);
        }
    }
}
