use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::students::requests::{
    CreateStudentRequest, StudentQueryParams, UpdateStudentRequest, UpdateStudentStatusRequest,
};
use crate::services::StudentService;
use crate::utils::SafeStudentIdI64;

// HTTP处理程序
pub async fn list_students(
    req: HttpRequest,
    service: web::Data<StudentService>,
    query: web::Query<StudentQueryParams>,
) -> ActixResult<HttpResponse> {
    service.list_students(&req, query.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    service: web::Data<StudentService>,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    service.create_student(&req, student_data.into_inner()).await
}

pub async fn get_student(
    req: HttpRequest,
    service: web::Data<StudentService>,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    service.get_student(&req, student_id.0).await
}

pub async fn update_student(
    req: HttpRequest,
    service: web::Data<StudentService>,
    student_id: SafeStudentIdI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    service
        .update_student(&req, student_id.0, update_data.into_inner())
        .await
}

pub async fn update_student_status(
    req: HttpRequest,
    service: web::Data<StudentService>,
    student_id: SafeStudentIdI64,
    status_data: web::Json<UpdateStudentStatusRequest>,
) -> ActixResult<HttpResponse> {
    service
        .update_student_status(&req, student_id.0, status_data.into_inner())
        .await
}

pub async fn delete_student(
    req: HttpRequest,
    service: web::Data<StudentService>,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    service.delete_student(&req, student_id.0).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(
                web::resource("/{student_id}")
                    .route(web::get().to(get_student))
                    .route(web::put().to(update_student))
                    .route(web::delete().to(delete_student)),
            )
            .service(
                web::resource("/{student_id}/status").route(web::put().to(update_student_status)),
            ),
    );
}
