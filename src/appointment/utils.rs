use chrono::NaiveDateTime;
use diesel::{
    expression::BoxableExpression, mysql::Mysql, prelude::*, query_builder::QueryFragment,
    query_dsl::methods::ExecuteDsl, sql_types::Bool,
};

use crate::{
    auth::utils::Session,
    error::{ServiceError, ServiceResult},
    models::appointments::{Appointment, UpdateAppointment},
    scheduling::status::AppointmentStatus,
    schema::agendamentos,
};

pub const SLOT_TAKEN: &str = "Horário indisponível para esta oficina";

type SweepScope = Box<dyn BoxableExpression<agendamentos::table, Mysql, SqlType = Bool>>;

pub fn load_appointment(conn: &MysqlConnection, id: u64) -> ServiceResult<Appointment> {
    agendamentos::table
        .filter(agendamentos::id.eq(id))
        .get_result::<Appointment>(conn)
        .optional()?
        .ok_or_else(|| ServiceError::not_found("Agendamento não encontrado"))
}

/// Customers may act on their own appointments, workshop admins on their
/// workshop's.
pub fn assert_can_manage(session: &Session, appointment: &Appointment) -> ServiceResult<()> {
    let owner = appointment.usuario_id == Some(session.user_id);
    let admin = session.is_workshop_admin() && session.oficina_id == Some(appointment.oficina_id);
    if owner || admin {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "Agendamento pertence a outro usuário".to_string(),
        ))
    }
}

pub fn assert_workshop_admin_of(session: &Session, appointment: &Appointment) -> ServiceResult<()> {
    if session.admin_workshop()? != appointment.oficina_id {
        return Err(ServiceError::Forbidden(
            "Agendamento pertence a outra oficina".to_string(),
        ));
    }
    Ok(())
}

/// Applies `update` only if the row still has the status it was read with,
/// so two concurrent changes can't both pass the transition check.
pub fn apply_update(
    conn: &MysqlConnection,
    appointment: &Appointment,
    update: UpdateAppointment,
) -> ServiceResult<()> {
    let rows = diesel::update(
        agendamentos::table
            .filter(agendamentos::id.eq(appointment.id))
            .filter(agendamentos::status.eq(&appointment.status)),
    )
    .set(&update)
    .execute(conn)?;

    if rows == 0 {
        return Err(ServiceError::conflict(
            "Agendamento foi alterado por outra operação, tente novamente",
        ));
    }
    Ok(())
}

/// A unique-key hit on insert means another booking took the slot first.
pub fn booking_insert_error(err: diesel::result::Error) -> ServiceError {
    match ServiceError::from(err) {
        ServiceError::Conflict(_) => ServiceError::conflict(SLOT_TAKEN),
        other => other,
    }
}

/// Marks past `pendente`/`agendado` rows as `fora_prazo`. Workshop admins
/// sweep their workshop, everyone else only their own appointments.
pub fn sweep_statement(
    session: &Session,
    now: NaiveDateTime,
) -> ServiceResult<impl ExecuteDsl<MysqlConnection> + QueryFragment<Mysql>> {
    let awaiting: Vec<&'static str> = AppointmentStatus::awaiting_service()
        .iter()
        .map(|s| s.as_str())
        .collect();
    let scope: SweepScope = if session.is_workshop_admin() {
        Box::new(agendamentos::oficina_id.eq(session.admin_workshop()?))
    } else {
        Box::new(agendamentos::usuario_id.eq(session.user_id))
    };

    Ok(diesel::update(
        agendamentos::table
            .filter(agendamentos::status.eq_any(awaiting))
            .filter(agendamentos::data_hora.lt(now))
            .filter(scope),
    )
    .set(agendamentos::status.eq(AppointmentStatus::ForaPrazo.as_str())))
}
