use serde::Serialize;

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Serialize)]
pub struct UserItem {
    pub id: u64,
    pub nome: String,
    pub email: String,
    pub papel: String,
    pub oficina_id: Option<u64>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserItem,
}
