use actix_web::{http::header, web, HttpRequest};
use chrono::Duration;
use diesel::prelude::*;

use crate::{
    database,
    error::{ServiceError, ServiceResult},
    models::{
        user_logins::UserLoginData,
        users::{UserData, ROLE_WORKSHOP_ADMIN},
    },
    AppState,
};

/// The user behind a valid bearer token.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: u64,
    pub papel: String,
    pub oficina_id: Option<u64>,
}

impl Session {
    pub fn is_workshop_admin(&self) -> bool {
        self.papel == ROLE_WORKSHOP_ADMIN
    }

    /// The workshop this admin manages.
    pub fn admin_workshop(&self) -> ServiceResult<u64> {
        match (self.is_workshop_admin(), self.oficina_id) {
            (true, Some(id)) => Ok(id),
            (true, None) => Err(ServiceError::Forbidden(
                "Administrador sem oficina vinculada".to_string(),
            )),
            _ => Err(ServiceError::Forbidden(
                "Apenas administradores de oficina".to_string(),
            )),
        }
    }
}

pub fn bearer_token(req: &HttpRequest) -> ServiceResult<String> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ServiceError::Unauthorized("Você ainda não fez login".to_string()))?;

    match value.trim().strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ServiceError::Unauthorized(
            "Cabeçalho Authorization inválido".to_string(),
        )),
    }
}

pub async fn get_session(req: &HttpRequest, state: &web::Data<AppState>) -> ServiceResult<Session> {
    use crate::schema::{user_logins, users};

    let token = bearer_token(req)?;
    let ttl = Duration::seconds(state.config.session_ttl_secs);

    let data = database::run(state, move |conn| {
        Ok(user_logins::table
            .inner_join(users::table)
            .filter(user_logins::token.eq(token))
            .get_result::<(UserLoginData, UserData)>(conn)
            .optional()?)
    })
    .await?;

    match data {
        Some((login, user)) => {
            if crate::utils::now().signed_duration_since(login.login_time) <= ttl {
                Ok(Session {
                    user_id: user.id,
                    papel: user.papel,
                    oficina_id: user.oficina_id,
                })
            } else {
                Err(ServiceError::Unauthorized("Sessão expirada".to_string()))
            }
        }
        None => Err(ServiceError::Unauthorized("Você ainda não fez login".to_string())),
    }
}
