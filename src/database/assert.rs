use actix_web::web;
use diesel::prelude::*;

use crate::{
    error::{ServiceError, ServiceResult},
    models::workshops::WorkshopData,
    AppState,
};

pub async fn assert_model_year(state: &web::Data<AppState>, modelo_ano_id: u64) -> ServiceResult<()> {
    use crate::schema::modelo_anos;

    let res = super::run(state, move |conn| {
        Ok(modelo_anos::table
            .filter(modelo_anos::id.eq(modelo_ano_id))
            .count()
            .get_result::<i64>(conn)?)
    })
    .await?;

    if res == 0 {
        return Err(ServiceError::not_found("Ano/modelo não encontrado"));
    }

    Ok(())
}

pub async fn assert_workshop(state: &web::Data<AppState>, oficina_id: u64) -> ServiceResult<WorkshopData> {
    use crate::schema::oficinas;

    super::run(state, move |conn| {
        oficinas::table
            .filter(oficinas::id.eq(oficina_id))
            .get_result::<WorkshopData>(conn)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("Oficina não encontrada"))
    })
    .await
}

pub fn assert_email_free(conn: &MysqlConnection, email: &str) -> ServiceResult<()> {
    use crate::schema::users;

    let res = users::table
        .filter(users::email.eq(email))
        .count()
        .get_result::<i64>(conn)?;
    if res > 0 {
        return Err(ServiceError::conflict("E-mail já cadastrado"));
    }

    Ok(())
}
