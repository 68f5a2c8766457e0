use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::classes::requests::{
    AssignTeacherRequest, ClassQueryParams, CreateClassRequest, UpdateClassRequest,
};
use crate::services::ClassService;
use crate::utils::{SafeClassIdI64, SafeStudentIdI64};

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    service: web::Data<ClassService>,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    service.list_classes(&req, query.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    service: web::Data<ClassService>,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    service.create_class(&req, class_data.into_inner()).await
}

pub async fn get_class(
    req: HttpRequest,
    service: web::Data<ClassService>,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    service.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    service: web::Data<ClassService>,
    class_id: SafeClassIdI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    service
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn delete_class(
    req: HttpRequest,
    service: web::Data<ClassService>,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    service.delete_class(&req, class_id.0).await
}

pub async fn assign_teacher(
    req: HttpRequest,
    service: web::Data<ClassService>,
    class_id: SafeClassIdI64,
    assign_data: web::Json<AssignTeacherRequest>,
) -> ActixResult<HttpResponse> {
    service
        .assign_teacher(&req, class_id.0, assign_data.into_inner())
        .await
}

pub async fn unassign_teacher(
    req: HttpRequest,
    service: web::Data<ClassService>,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    service.unassign_teacher(&req, class_id.0).await
}

pub async fn list_members(
    req: HttpRequest,
    service: web::Data<ClassService>,
    class_id: SafeClassIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    service
        .list_members(&req, class_id.0, query.into_inner())
        .await
}

pub async fn assign_student(
    req: HttpRequest,
    service: web::Data<ClassService>,
    class_id: SafeClassIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    service
        .assign_student(&req, class_id.0, student_id.0)
        .await
}

pub async fn remove_student(
    req: HttpRequest,
    service: web::Data<ClassService>,
    class_id: SafeClassIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    service
        .remove_student(&req, class_id.0, student_id.0)
        .await
}

// 配置路由
pub fn configure_class_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(create_class)),
            )
            .service(
                web::resource("/{class_id}")
                    .route(web::get().to(get_class))
                    .route(web::put().to(update_class))
                    .route(web::delete().to(delete_class)),
            )
            .service(
                // 班级教师：PUT 分配（覆盖原教师），DELETE 清空
                web::resource("/{class_id}/teacher")
                    .route(web::put().to(assign_teacher))
                    .route(web::delete().to(unassign_teacher)),
            )
            .service(web::resource("/{class_id}/students").route(web::get().to(list_members)))
            .service(
                web::resource("/{class_id}/students/{student_id}")
                    .route(web::put().to(assign_student))
                    .route(web::delete().to(remove_student)),
            ),
    );
}
