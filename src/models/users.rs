use crate::schema::users;
use chrono::NaiveDateTime;

pub const ROLE_CUSTOMER: &str = "cliente";
pub const ROLE_WORKSHOP_ADMIN: &str = "oficina_admin";

#[derive(Queryable)]
pub struct UserData {
    pub id: u64,
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub papel: String,
    pub oficina_id: Option<u64>,
    pub criado_em: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub papel: String,
}
