use serde::Deserialize;

#[derive(Deserialize)]
pub struct NearestRequest {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
pub struct SlotsRequest {
    pub data: String,
}
