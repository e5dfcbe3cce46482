use super::*;

#[get("/")]
pub fn get_index() -> &'static str {
    "LiveMap backend is running"
}

#[get("/health")]
pub fn get_health() -> Json<json::Health> {
    Json(json::Health {
        status: "ok".into(),
    })
}

#[get("/version")]
pub fn get_version(version: &State<Version>) -> &'static str {
    version.0
}
