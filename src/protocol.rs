use actix_web::{error::InternalError, HttpRequest, HttpResponse};
use serde::Serialize;
use std::fmt;

#[derive(Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub err: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            err: "".to_string(),
        }
    }

    pub fn err<S: ToString>(err: S) -> Self {
        Self {
            success: false,
            err: err.to_string(),
        }
    }
}

/// `{success, data}` envelope used by most read endpoints.
#[derive(Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok<S: ToString>(message: S) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Malformed JSON bodies, query strings and path segments get the same
/// `{success, err}` body as every other refusal.
pub fn reject_payload<E>(err: E, _req: &HttpRequest) -> actix_web::Error
where
    E: fmt::Debug + fmt::Display + 'static,
{
    let response = HttpResponse::BadRequest().json(SimpleResponse::err(&err));
    InternalError::from_response(err, response).into()
}

/// Declares actix handlers that delegate to `<name>_impl` and turn a
/// `ServiceError` into its HTTP response.
#[macro_export]
macro_rules! api_funcs {
    ( $( ( $method:ident, $func_name:ident, $url:expr, $extract:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[$method($url)]
                async fn $func_name(
                    state: web::Data<AppState>,
                    info: $extract,
                ) -> impl Responder {
                    match [<$func_name _impl>](state, info).await {
                        Ok(response) => HttpResponse::Ok().json(response),
                        Err(err) => {
                            if err.is_downstream() {
                                tracing::error!(
                                    handler = stringify!($func_name),
                                    transient = err.is_transient(),
                                    "request failed: {}",
                                    err.detail()
                                );
                            } else {
                                tracing::warn!(
                                    handler = stringify!($func_name),
                                    "request refused: {}",
                                    err
                                );
                            }
                            actix_web::ResponseError::error_response(&err)
                        }
                    }
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_carries_message() {
        let body = serde_json::to_value(SimpleResponse::err("Motivo obrigatório")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["err"], "Motivo obrigatório");
    }

    #[test]
    fn ok_body_omits_err() {
        let body = serde_json::to_value(SimpleResponse::ok()).unwrap();
        assert_eq!(body, serde_json::json!({ "success": true }));
    }

    #[test]
    fn data_response_wraps_payload() {
        let body = serde_json::to_value(DataResponse::ok(vec!["08:00", "09:00"])).unwrap();
        assert_eq!(body["data"][1], "09:00");
    }
}
