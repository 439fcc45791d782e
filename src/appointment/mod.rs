mod requests;
mod responses;
mod utils;

use crate::{
    auth::utils::{get_session, Session},
    catalog::find_recommendation,
    database::{self, assert},
    error::{ServiceError, ServiceResult},
    models::appointments::{Appointment, NewAppointment, UpdateAppointment},
    protocol::{DataResponse, MessageResponse, SimpleResponse},
    scheduling::{
        catalog::generic_recommendation,
        distance::Coordinates,
        draft::{BookingDraft, CustomerContact, NewBooking},
        lifecycle::{confirmation_code, plan_cancel, plan_protocol, plan_status_change, StatusMeta},
        status::AppointmentStatus,
    },
    workshop::{booked_times, open_slots},
    AppState,
};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use diesel::{prelude::*, query_dsl::methods::ExecuteDsl};

use self::{
    requests::*,
    responses::*,
    utils::{
        apply_update, assert_can_manage, assert_workshop_admin_of, booking_insert_error,
        load_appointment, sweep_statement, SLOT_TAKEN,
    },
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create)
        .service(list_for_user)
        .service(list_for_workshop)
        .service(sweep_expired)
        .service(cancel)
        .service(mark_status)
        .service(assign_protocol);
}

crate::api_funcs! {
    (post, create, "", (HttpRequest, web::Json<CreateAppointmentRequest>)),
    (get, list_for_user, "/usuario/{user_id}", (HttpRequest, web::Path<u64>)),
    (get, list_for_workshop, "/oficina", HttpRequest),
    (post, sweep_expired, "/atualizar_expirados", HttpRequest),
    (post, cancel, "/{id}/cancelar", (HttpRequest, web::Path<u64>, web::Json<CancelRequest>)),
    (post, mark_status, "/{id}/status", (HttpRequest, web::Path<u64>, web::Json<MarkStatusRequest>)),
    (post, assign_protocol, "/{id}/protocolo", (HttpRequest, web::Path<u64>, web::Json<AssignProtocolRequest>)),
}

const CODE_ATTEMPTS: u32 = 20;

async fn create_impl(
    state: web::Data<AppState>,
    info: (HttpRequest, web::Json<CreateAppointmentRequest>),
) -> ServiceResult<CreateAppointmentResponse> {
    let (req, info) = info;
    let info = info.into_inner();
    let session = get_session(&req, &state).await?;
    if let Some(usuario_id) = info.usuario_id {
        if usuario_id != session.user_id {
            return Err(ServiceError::Forbidden(
                "Não é possível agendar em nome de outro usuário".to_string(),
            ));
        }
    }

    let now = crate::utils::now();
    let data_hora = crate::utils::parse_datetime_str(&info.data_hora)?;

    let recommendation = match info.modelo_ano_id {
        Some(modelo_ano_id) => match find_recommendation(&state, modelo_ano_id).await {
            Ok(rec) => rec,
            Err(ServiceError::NotFound(_)) => generic_recommendation(),
            Err(err) => return Err(err),
        },
        None => generic_recommendation(),
    };

    let mut draft = BookingDraft::new()
        .with_vehicle(&info.veiculo)?
        .with_products(&recommendation, info.produtos)?;
    if let (Some(lat), Some(lng)) = (info.lat, info.lng) {
        let location =
            Coordinates::new(lat, lng).ok_or_else(|| ServiceError::validation("Coordenadas inválidas"))?;
        draft = draft.with_location(location);
    }

    let workshop = assert::assert_workshop(&state, info.oficina_id).await?;
    let offered = open_slots(&state, &workshop, data_hora.date(), now).await?;
    let booking = draft
        .with_workshop(workshop.snapshot())?
        .with_slot(data_hora, &offered)?
        .with_customer(CustomerContact {
            nome: info.cliente_nome,
            cpf: info.cliente_cpf,
            telefone: info.cliente_telefone,
            email: info.cliente_email,
        })?
        .finish()?;

    if let Some(client_total) = info.total_servico {
        if (client_total - booking.total()).abs() > 0.005 {
            tracing::warn!(
                client_total,
                server_total = booking.total(),
                "client total differs from computed total"
            );
        }
    }

    if let Some(location) = booking.location {
        tracing::debug!(lat = location.lat, lng = location.lng, "booking origin");
    }

    let user_id = session.user_id;
    let code = database::run(&state, move |conn| insert_booking(conn, booking, user_id, now)).await?;

    tracing::info!(codigo = %code, oficina_id = info.oficina_id, "appointment created");
    Ok(CreateAppointmentResponse {
        success: true,
        codigo_confirmacao: code,
    })
}

fn insert_booking(
    conn: &MysqlConnection,
    booking: NewBooking,
    user_id: u64,
    now: chrono::NaiveDateTime,
) -> ServiceResult<String> {
    use crate::schema::agendamentos;

    conn.transaction::<_, ServiceError, _>(|| {
        let taken = booked_times(conn, booking.workshop.id, booking.data_hora.date())?;
        if taken.contains(&booking.data_hora.time()) {
            return Err(ServiceError::conflict(SLOT_TAKEN));
        }

        let mut code = None;
        for bump in 0..CODE_ATTEMPTS {
            let candidate = confirmation_code(now, bump);
            let used = agendamentos::table
                .filter(agendamentos::codigo_confirmacao.eq(&candidate))
                .count()
                .get_result::<i64>(conn)?;
            if used == 0 {
                code = Some(candidate);
                break;
            }
        }
        let code = code.ok_or_else(|| {
            ServiceError::Unavailable("no free confirmation code".to_string())
        })?;

        let data = NewAppointment {
            codigo_confirmacao: code.clone(),
            usuario_id: Some(user_id),
            servicos: booking.services_description(),
            total_servico: booking.total(),
            cliente_nome: booking.customer.nome,
            cliente_cpf: booking.customer.cpf,
            cliente_telefone: booking.customer.telefone,
            cliente_email: booking.customer.email,
            oficina_id: booking.workshop.id,
            oficina_nome: booking.workshop.nome,
            oficina_endereco: booking.workshop.endereco,
            oficina_telefone: booking.workshop.telefone,
            veiculo: booking.vehicle,
            data_hora: booking.data_hora,
            status: AppointmentStatus::Pendente.as_str().to_string(),
            criado_em: now,
        };
        diesel::insert_into(agendamentos::table)
            .values(data)
            .execute(conn)
            .map_err(booking_insert_error)?;

        Ok(code)
    })
}

async fn list_for_user_impl(
    state: web::Data<AppState>,
    info: (HttpRequest, web::Path<u64>),
) -> ServiceResult<DataResponse<Vec<AppointmentItem>>> {
    use crate::schema::agendamentos;

    let (req, path) = info;
    let user_id = path.into_inner();
    let session = get_session(&req, &state).await?;
    if session.user_id != user_id {
        return Err(ServiceError::Forbidden(
            "Agendamentos de outro usuário".to_string(),
        ));
    }

    let appos = database::run(&state, move |conn| {
        Ok(agendamentos::table
            .filter(agendamentos::usuario_id.eq(user_id))
            .order(agendamentos::data_hora.desc())
            .get_results::<Appointment>(conn)?)
    })
    .await?;

    Ok(to_items(appos))
}

async fn list_for_workshop_impl(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> ServiceResult<DataResponse<Vec<AppointmentItem>>> {
    use crate::schema::agendamentos;

    let session = get_session(&req, &state).await?;
    let oficina_id = session.admin_workshop()?;

    let appos = database::run(&state, move |conn| {
        Ok(agendamentos::table
            .filter(agendamentos::oficina_id.eq(oficina_id))
            .order(agendamentos::data_hora.asc())
            .get_results::<Appointment>(conn)?)
    })
    .await?;

    Ok(to_items(appos))
}

fn to_items(appos: Vec<Appointment>) -> DataResponse<Vec<AppointmentItem>> {
    let now = crate::utils::now();
    DataResponse::ok(
        appos
            .into_iter()
            .map(|appo| AppointmentItem::new(appo, now))
            .collect(),
    )
}

async fn sweep_expired_impl(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> ServiceResult<SweepResponse> {
    let session = get_session(&req, &state).await?;
    let now = crate::utils::now();

    let atualizados = database::run(&state, move |conn| {
        let stmt = sweep_statement(&session, now)?;
        Ok(ExecuteDsl::execute(stmt, conn)?)
    })
    .await?;

    if atualizados > 0 {
        tracing::info!(atualizados, "expired appointments marked");
    }
    Ok(SweepResponse {
        success: true,
        atualizados,
    })
}

async fn cancel_impl(
    state: web::Data<AppState>,
    info: (HttpRequest, web::Path<u64>, web::Json<CancelRequest>),
) -> ServiceResult<MessageResponse> {
    let (req, path, body) = info;
    let id = path.into_inner();
    let motivo = body.into_inner().motivo;
    let session = get_session(&req, &state).await?;
    let now = crate::utils::now();

    database::run(&state, move |conn| {
        let appo = load_appointment(conn, id)?;
        assert_can_manage(&session, &appo)?;
        let update = plan_cancel(appo.status(), &motivo, now)?;
        apply_update(conn, &appo, update.into())
    })
    .await?;

    tracing::info!(id, "appointment cancelled");
    Ok(MessageResponse::ok("Agendamento cancelado com sucesso"))
}

async fn mark_status_impl(
    state: web::Data<AppState>,
    info: (HttpRequest, web::Path<u64>, web::Json<MarkStatusRequest>),
) -> ServiceResult<SimpleResponse> {
    let (req, path, body) = info;
    let id = path.into_inner();
    let body = body.into_inner();
    let next: AppointmentStatus = body.status.parse()?;
    let meta = StatusMeta {
        motivo: body.motivo,
        divergencia: body.divergencia,
    };
    let session = get_session(&req, &state).await?;
    let now = crate::utils::now();

    database::run(&state, move |conn| {
        let appo = load_appointment(conn, id)?;
        assert_workshop_admin_of(&session, &appo)?;
        let update = plan_status_change(appo.status(), appo.protocolo.as_deref(), next, &meta, now)?;
        apply_update(conn, &appo, update.into())
    })
    .await?;

    tracing::info!(id, status = %next, "appointment status changed");
    Ok(SimpleResponse::ok())
}

async fn assign_protocol_impl(
    state: web::Data<AppState>,
    info: (HttpRequest, web::Path<u64>, web::Json<AssignProtocolRequest>),
) -> ServiceResult<SimpleResponse> {
    let (req, path, body) = info;
    let id = path.into_inner();
    let protocolo = body.into_inner().protocolo;
    let session: Session = get_session(&req, &state).await?;

    database::run(&state, move |conn| {
        let appo = load_appointment(conn, id)?;
        assert_workshop_admin_of(&session, &appo)?;
        let update: UpdateAppointment = plan_protocol(appo.status(), &protocolo)?.into();
        apply_update(conn, &appo, update)
    })
    .await?;

    Ok(SimpleResponse::ok())
}
