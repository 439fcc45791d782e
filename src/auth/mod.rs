mod requests;
mod responses;
pub mod utils;

use crate::{
    database::{self, assert},
    error::{ServiceError, ServiceResult},
    models::{
        user_logins::UserLoginData,
        users::{NewUser, UserData, ROLE_CUSTOMER},
    },
    protocol::SimpleResponse,
    utils::{generate_login_token, hash_password, is_valid_email, MIN_PASSWORD_LEN},
    AppState,
};
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use diesel::prelude::*;

use self::{requests::*, responses::*, utils::bearer_token};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login).service(logout);
}

crate::api_funcs! {
    (post, register, "/register", web::Json<RegisterRequest>),
    (post, login, "/login", web::Json<LoginRequest>),
    (post, logout, "/logout", HttpRequest),
}

async fn register_impl(
    state: web::Data<AppState>,
    info: web::Json<RegisterRequest>,
) -> ServiceResult<RegisterResponse> {
    use crate::schema::users;

    let info = info.into_inner();
    let nome = info.nome.trim().to_string();
    let email = info.email.trim().to_lowercase();
    if nome.is_empty() {
        return Err(ServiceError::validation("Nome é obrigatório"));
    }
    if !is_valid_email(&email) {
        return Err(ServiceError::validation("E-mail inválido"));
    }
    if info.senha.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::validation(format!(
            "A senha deve ter ao menos {} caracteres",
            MIN_PASSWORD_LEN
        )));
    }

    let user_id = database::run(&state, move |conn| {
        conn.transaction::<_, ServiceError, _>(|| {
            assert::assert_email_free(conn, &email)?;

            let data = NewUser {
                senha_hash: hash_password(&email, &info.senha),
                nome,
                email: email.clone(),
                papel: ROLE_CUSTOMER.to_string(),
            };
            diesel::insert_into(users::table)
                .values(data)
                .execute(conn)?;

            let id = users::table
                .filter(users::email.eq(&email))
                .select(users::id)
                .get_result::<u64>(conn)?;
            Ok(id)
        })
    })
    .await?;

    tracing::info!(user_id, "user registered");
    Ok(RegisterResponse {
        success: true,
        user_id,
    })
}

async fn login_impl(
    state: web::Data<AppState>,
    info: web::Json<LoginRequest>,
) -> ServiceResult<LoginResponse> {
    use crate::schema::{user_logins, users};

    let info = info.into_inner();
    let email = info.email.trim().to_lowercase();

    let (token, user) = database::run(&state, move |conn| {
        conn.transaction::<_, ServiceError, _>(|| {
            let hashed_password = hash_password(&email, &info.senha);
            let user = users::table
                .filter(users::email.eq(&email))
                .filter(users::senha_hash.eq(&hashed_password))
                .get_result::<UserData>(conn)
                .optional()?
                .ok_or_else(|| ServiceError::Unauthorized("E-mail ou senha incorretos".to_string()))?;

            let login_time = crate::utils::now();
            let token = generate_login_token();
            let token_data = UserLoginData {
                token: token.clone(),
                user_id: user.id,
                login_time,
            };
            diesel::insert_into(user_logins::table)
                .values(token_data)
                .execute(conn)?;

            Ok((token, user))
        })
    })
    .await?;

    tracing::info!(user_id = user.id, "user logged in");
    Ok(LoginResponse {
        success: true,
        token,
        user: UserItem {
            id: user.id,
            nome: user.nome,
            email: user.email,
            papel: user.papel,
            oficina_id: user.oficina_id,
        },
    })
}

async fn logout_impl(state: web::Data<AppState>, req: HttpRequest) -> ServiceResult<SimpleResponse> {
    use crate::schema::user_logins;

    let token = bearer_token(&req)?;
    database::run(&state, move |conn| {
        Ok(diesel::delete(user_logins::table.filter(user_logins::token.eq(token))).execute(conn)?)
    })
    .await?;

    Ok(SimpleResponse::ok())
}
