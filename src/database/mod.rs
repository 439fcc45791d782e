pub mod assert;

use crate::{error::ServiceResult, AppState};
use actix_web::web;
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use r2d2::PooledConnection;

pub type DbConn = PooledConnection<ConnectionManager<MysqlConnection>>;

pub fn get_db_conn(state: &web::Data<AppState>) -> ServiceResult<DbConn> {
    Ok(state.pool.get()?)
}

/// Runs `f` on the blocking pool with a pooled connection.
pub async fn run<F, T>(state: &web::Data<AppState>, f: F) -> ServiceResult<T>
where
    F: FnOnce(&MysqlConnection) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let conn = get_db_conn(state)?;
    let res = web::block(move || f(&*conn)).await?;
    Ok(res)
}
