use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::services::FlashService;

pub async fn take_flash(
    req: HttpRequest,
    service: web::Data<FlashService>,
    token: web::Path<String>,
) -> ActixResult<HttpResponse> {
    service.take_flash(&req, &token.into_inner()).await
}

// 提示消息读取后即失效
pub fn configure_flash_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/flash")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/{token}").route(web::get().to(take_flash))),
    );
}
