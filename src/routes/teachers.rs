use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherQueryParams, UpdateTeacherRequest,
};
use crate::services::TeacherService;
use crate::utils::SafeTeacherIdI64;

// HTTP处理程序
pub async fn list_teachers(
    req: HttpRequest,
    service: web::Data<TeacherService>,
    query: web::Query<TeacherQueryParams>,
) -> ActixResult<HttpResponse> {
    service.list_teachers(&req, query.into_inner()).await
}

pub async fn create_teacher(
    req: HttpRequest,
    service: web::Data<TeacherService>,
    teacher_data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    service.create_teacher(&req, teacher_data.into_inner()).await
}

pub async fn get_teacher(
    req: HttpRequest,
    service: web::Data<TeacherService>,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    service.get_teacher(&req, teacher_id.0).await
}

pub async fn update_teacher(
    req: HttpRequest,
    service: web::Data<TeacherService>,
    teacher_id: SafeTeacherIdI64,
    update_data: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    service
        .update_teacher(&req, teacher_id.0, update_data.into_inner())
        .await
}

pub async fn delete_teacher(
    req: HttpRequest,
    service: web::Data<TeacherService>,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    service.delete_teacher(&req, teacher_id.0).await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_teachers))
                    .route(web::post().to(create_teacher)),
            )
            .service(
                // 删除教师会清空其负责班级的教师
                web::resource("/{teacher_id}")
                    .route(web::get().to(get_teacher))
                    .route(web::put().to(update_teacher))
                    .route(web::delete().to(delete_teacher)),
            ),
    );
}
