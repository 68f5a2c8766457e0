use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::bulk::requests::{
    BulkAssignStudentsRequest, BulkAssignTeacherRequest, BulkDeleteKind, BulkDeleteRequest,
    BulkRemoveStudentsRequest,
};
use crate::services::BulkService;

pub async fn assign_teacher(
    req: HttpRequest,
    service: web::Data<BulkService>,
    body: web::Json<BulkAssignTeacherRequest>,
) -> ActixResult<HttpResponse> {
    service.assign_teacher(&req, body.into_inner()).await
}

pub async fn assign_students(
    req: HttpRequest,
    service: web::Data<BulkService>,
    body: web::Json<BulkAssignStudentsRequest>,
) -> ActixResult<HttpResponse> {
    service.assign_students(&req, body.into_inner()).await
}

pub async fn remove_students(
    req: HttpRequest,
    service: web::Data<BulkService>,
    body: web::Json<BulkRemoveStudentsRequest>,
) -> ActixResult<HttpResponse> {
    service.remove_students(&req, body.into_inner()).await
}

pub async fn delete(
    req: HttpRequest,
    service: web::Data<BulkService>,
    kind: web::Path<BulkDeleteKind>,
    body: web::Json<BulkDeleteRequest>,
) -> ActixResult<HttpResponse> {
    service
        .delete(&req, kind.into_inner(), body.into_inner())
        .await
}

// 配置路由，所有批量接口统一返回 BulkResult 与提示消息令牌
pub fn configure_bulk_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/bulk")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/assign-teacher").route(web::post().to(assign_teacher)))
            .service(web::resource("/assign-students").route(web::post().to(assign_students)))
            .service(web::resource("/remove-students").route(web::post().to(remove_students)))
            .service(web::resource("/delete/{kind}").route(web::post().to(delete))),
    );
}
