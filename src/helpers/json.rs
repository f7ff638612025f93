use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) list: Option<Vec<T>>,
}

pub struct JsonResponseBuilder<T>
where
    T: Serialize,
{
    id: Option<Uuid>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T: Serialize> Default for JsonResponseBuilder<T> {
    fn default() -> Self {
        Self {
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T: Serialize> JsonResponse<T> {
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl<T: Serialize> std::fmt::Display for JsonResponse<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&body)
    }
}

impl<T: Serialize> JsonResponseBuilder<T> {
    pub fn set_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn form(self, code: StatusCode, message: impl Into<String>) -> JsonResponse<T> {
        let message = {
            let msg: String = message.into();
            if !msg.trim().is_empty() {
                msg
            } else if code.is_success() {
                String::from("Success")
            } else {
                code.canonical_reason().unwrap_or("Error").to_string()
            }
        };

        JsonResponse {
            status: if code.is_success() { "OK" } else { "Error" }.to_string(),
            message,
            code: code.as_u16() as u32,
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    pub fn ok(self, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Ok().json(self.form(StatusCode::OK, message))
    }

    pub fn created(self, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Created().json(self.form(StatusCode::CREATED, message))
    }

    fn to_error(self, code: StatusCode, message: impl Into<String>) -> actix_web::Error {
        let payload = self.form(code, message);
        let cause = payload.to_string();
        InternalError::from_response(cause, HttpResponse::build(code).json(payload)).into()
    }

    pub fn bad_request(self, message: impl Into<String>) -> actix_web::Error {
        self.to_error(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(self, message: impl Into<String>) -> actix_web::Error {
        self.to_error(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(self, message: impl Into<String>) -> actix_web::Error {
        self.to_error(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(self, message: impl Into<String>) -> actix_web::Error {
        self.to_error(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(self, message: impl Into<String>) -> actix_web::Error {
        self.to_error(StatusCode::CONFLICT, message)
    }

    pub fn internal_server_error(self, message: impl Into<String>) -> actix_web::Error {
        self.to_error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}
