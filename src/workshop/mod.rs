mod requests;
mod responses;

use crate::{
    database::{self, assert},
    error::{ServiceError, ServiceResult},
    models::workshops::WorkshopData,
    protocol::DataResponse,
    scheduling::{
        distance::Coordinates,
        locator::nearest_workshops,
        slots::{format_slots, generate_slots, is_open_on},
        status::AppointmentStatus,
    },
    AppState,
};
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::{
    mysql::Mysql,
    prelude::*,
    query_builder::QueryFragment,
    query_dsl::LoadQuery,
};

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    // "/proximas" must be registered before "/{id}"
    cfg.service(nearest)
        .service(list_workshops)
        .service(view_workshop)
        .service(list_slots);
}

crate::api_funcs! {
    (get, list_workshops, "", HttpRequest),
    (get, nearest, "/proximas", web::Query<NearestRequest>),
    (get, view_workshop, "/{id}", web::Path<u64>),
    (get, list_slots, "/{id}/horarios", (web::Path<u64>, web::Query<SlotsRequest>)),
}

async fn fetch_all(state: &web::Data<AppState>) -> ServiceResult<Vec<WorkshopData>> {
    use crate::schema::oficinas;

    database::run(state, |conn| {
        Ok(oficinas::table
            .order(oficinas::id.asc())
            .get_results::<WorkshopData>(conn)?)
    })
    .await
}

async fn list_workshops_impl(
    state: web::Data<AppState>,
    _req: HttpRequest,
) -> ServiceResult<DataResponse<Vec<WorkshopItem>>> {
    let workshops = fetch_all(&state).await?;
    Ok(DataResponse::ok(
        workshops.into_iter().map(WorkshopItem::from).collect(),
    ))
}

async fn view_workshop_impl(
    state: web::Data<AppState>,
    info: web::Path<u64>,
) -> ServiceResult<DataResponse<WorkshopItem>> {
    let workshop = assert::assert_workshop(&state, info.into_inner()).await?;
    Ok(DataResponse::ok(workshop.into()))
}

async fn nearest_impl(
    state: web::Data<AppState>,
    info: web::Query<NearestRequest>,
) -> ServiceResult<DataResponse<Vec<RankedWorkshopItem>>> {
    let origin = Coordinates::new(info.lat, info.lng)
        .ok_or_else(|| ServiceError::validation("Coordenadas inválidas"))?;

    let workshops = fetch_all(&state).await?;
    let ranked = nearest_workshops(origin, workshops)
        .into_iter()
        .map(|ranked| RankedWorkshopItem {
            workshop: ranked.item.into(),
            distancia: ranked.distance_km,
        })
        .collect();
    Ok(DataResponse::ok(ranked))
}

async fn list_slots_impl(
    state: web::Data<AppState>,
    info: (web::Path<u64>, web::Query<SlotsRequest>),
) -> ServiceResult<DataResponse<Vec<String>>> {
    let (path, query) = info;
    let date = crate::utils::parse_date_str(&query.data)?;
    let workshop = assert::assert_workshop(&state, path.into_inner()).await?;

    let slots = open_slots(&state, &workshop, date, crate::utils::now()).await?;
    Ok(DataResponse::ok(format_slots(&slots)))
}

/// Start times of the appointments still holding a slot at a workshop on
/// `date`.
fn booked_times_query(
    oficina_id: u64,
    date: NaiveDate,
) -> impl RunQueryDsl<MysqlConnection> + LoadQuery<MysqlConnection, NaiveDateTime> + QueryFragment<Mysql>
{
    use crate::schema::agendamentos;

    agendamentos::table
        .filter(agendamentos::oficina_id.eq(oficina_id))
        .filter(agendamentos::data_hora.between(date.and_hms(0, 0, 0), date.and_hms(23, 59, 59)))
        .filter(agendamentos::status.ne(AppointmentStatus::Cancelado.as_str()))
        .select(agendamentos::data_hora)
}

pub fn booked_times(
    conn: &MysqlConnection,
    oficina_id: u64,
    date: NaiveDate,
) -> ServiceResult<Vec<NaiveTime>> {
    let taken = booked_times_query(oficina_id, date).get_results::<NaiveDateTime>(conn)?;
    Ok(taken.into_iter().map(|at| at.time()).collect())
}

/// Slot generation for one workshop day, honouring its operating days.
pub fn workshop_slots(
    workshop: &WorkshopData,
    interval_minutes: u32,
    booked: &[NaiveTime],
    date: NaiveDate,
    now: NaiveDateTime,
) -> ServiceResult<Vec<NaiveTime>> {
    if !is_open_on(&workshop.dias_funcionamento, date) {
        return Ok(Vec::new());
    }
    generate_slots(
        &workshop.horario_abertura,
        &workshop.horario_fechamento,
        interval_minutes,
        booked,
        date,
        now,
    )
}

pub async fn open_slots(
    state: &web::Data<AppState>,
    workshop: &WorkshopData,
    date: NaiveDate,
    now: NaiveDateTime,
) -> ServiceResult<Vec<NaiveTime>> {
    let oficina_id = workshop.id;
    let booked = database::run(state, move |conn| booked_times(conn, oficina_id, date)).await?;
    workshop_slots(
        workshop,
        state.config.slot_interval_minutes,
        &booked,
        date,
        now,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    #[test]
    fn booked_times_reads_only_start_times() {
        let sql = debug_query::<Mysql, _>(&booked_times_query(3, NaiveDate::from_ymd(2026, 6, 1)))
            .to_string();
        assert!(
            sql.starts_with("SELECT `agendamentos`.`data_hora` FROM `agendamentos`"),
            "{}",
            sql
        );
        assert!(sql.contains("`status` != ?"), "{}", sql);
        assert!(sql.contains("\"cancelado\""), "{}", sql);
    }

    fn workshop(days: &str) -> WorkshopData {
        WorkshopData {
            id: 1,
            nome: "OilSmart Paulista".to_string(),
            endereco: "Av. Paulista, 1500".to_string(),
            cidade: "São Paulo".to_string(),
            estado: "SP".to_string(),
            cep: "01310-200".to_string(),
            telefone: "(11) 3287-2000".to_string(),
            horario_abertura: "08:00".to_string(),
            horario_fechamento: "12:00".to_string(),
            dias_funcionamento: days.to_string(),
            latitude: None,
            longitude: None,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd(2026, 3, 2).and_hms(7, 0, 0)
    }

    #[test]
    fn closed_day_has_no_slots() {
        // 2026-03-08 is a Sunday
        let sunday = NaiveDate::from_ymd(2026, 3, 8);
        let slots = workshop_slots(&workshop("seg-sex"), 60, &[], sunday, now()).unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn open_day_uses_workshop_hours() {
        let tuesday = NaiveDate::from_ymd(2026, 3, 3);
        let booked = [NaiveTime::from_hms(9, 0, 0)];
        let slots = workshop_slots(&workshop("seg-sex"), 60, &booked, tuesday, now()).unwrap();
        assert_eq!(format_slots(&slots), vec!["08:00", "10:00", "11:00"]);
    }
}
