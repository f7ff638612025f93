use actix_web::dev::ServiceRequest;

// No credentials at all is a valid state: listings are viewer-scoped
// but public. Mutating handlers reject the missing identity themselves.
pub fn anonym(_req: &mut ServiceRequest) -> Result<bool, String> {
    Ok(true)
}
