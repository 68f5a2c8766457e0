pub mod teachers;

pub mod classes;

pub mod students;

pub mod bulk;

pub mod flash;

pub use bulk::configure_bulk_routes;
pub use classes::configure_class_routes;
pub use flash::configure_flash_routes;
pub use students::configure_student_routes;
pub use teachers::configure_teacher_routes;

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::engine::NoopMembershipHook;
    use crate::models::actors::entities::ActorRole;
    use crate::runtime::lifetime::startup::ServiceContext;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::jwt::JwtUtils;
    use crate::utils::{json_error_handler, query_error_handler};

    async fn context() -> ServiceContext {
        let storage = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
        ServiceContext::assemble(
            storage,
            Arc::new(MokaCacheWrapper::new(100, 60)),
            Arc::new(NoopMembershipHook),
            10,
            60,
        )
    }

    fn jwt() -> JwtUtils {
        JwtUtils::new("route-test-secret", chrono::Duration::minutes(5))
    }

    fn bearer(role: ActorRole, actor_id: i64) -> (&'static str, String) {
        let token = jwt().generate_access_token(actor_id, &role).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    macro_rules! app {
        ($ctx:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(web::Data::new(jwt()))
                    .app_data($ctx.teachers.clone())
                    .app_data($ctx.classes.clone())
                    .app_data($ctx.students.clone())
                    .app_data($ctx.bulk.clone())
                    .app_data($ctx.flash.clone())
                    .configure(configure_teacher_routes)
                    .configure(configure_class_routes)
                    .configure(configure_student_routes)
                    .configure(configure_bulk_routes)
                    .configure(configure_flash_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_requests_without_token_are_rejected() {
        let ctx = context().await;
        let app = app!(ctx);

        let req = test::TestRequest::get().uri("/api/v1/classes").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_bulk_assign_teacher_publishes_flash_once() {
        let ctx = context().await;
        let app = app!(ctx);
        let admin = bearer(ActorRole::Admin, 1);

        let req = test::TestRequest::post()
            .uri("/api/v1/teachers")
            .insert_header(admin.clone())
            .set_json(json!({ "display_name": "Ada Lovelace" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let teacher_id = body["data"]["id"].as_i64().unwrap();

        let mut class_ids = Vec::new();
        for name in ["Algebra", "Geometry"] {
            let req = test::TestRequest::post()
                .uri("/api/v1/classes")
                .insert_header(admin.clone())
                .set_json(json!({ "name": name }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: Value = test::read_body_json(resp).await;
            class_ids.push(body["data"]["id"].as_i64().unwrap());
        }
        class_ids.push(999);

        let req = test::TestRequest::post()
            .uri("/api/v1/bulk/assign-teacher")
            .insert_header(admin.clone())
            .set_json(json!({ "teacher_id": teacher_id, "class_ids": class_ids }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], json!(5001));
        assert_eq!(body["data"]["result"]["success_count"], json!(2));
        assert_eq!(body["data"]["result"]["failure_count"], json!(1));
        assert_eq!(body["data"]["result"]["item_results"]["999"], json!("not_found"));
        let token = body["data"]["flash_token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/classes/{}", class_ids[0]))
            .insert_header(admin.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["teacher_id"], json!(teacher_id));

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/flash/{token}"))
            .insert_header(admin.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["level"], json!("warning"));

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/flash/{token}"))
            .insert_header(admin)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_viewer_cannot_bulk_delete() {
        let ctx = context().await;
        let app = app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/bulk/delete/classes")
            .insert_header(bearer(ActorRole::Viewer, 3))
            .set_json(json!({ "ids": [1, 2] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_membership_endpoints_report_status() {
        let ctx = context().await;
        let app = app!(ctx);
        let staff = bearer(ActorRole::Staff, 2);
        let admin = bearer(ActorRole::Admin, 1);

        let req = test::TestRequest::post()
            .uri("/api/v1/classes")
            .insert_header(admin.clone())
            .set_json(json!({ "name": "Chemistry" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let class_id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/students")
            .insert_header(admin)
            .set_json(json!({ "name": "Grace" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let student_id = body["data"]["id"].as_i64().unwrap();

        let uri = format!("/api/v1/classes/{class_id}/students/{student_id}");
        for expected in [true, false] {
            let req = test::TestRequest::put()
                .uri(&uri)
                .insert_header(staff.clone())
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["data"]["changed"], json!(expected));
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/classes/{class_id}/students"))
            .insert_header(staff.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(staff)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_non_numeric_path_id_is_bad_request() {
        let ctx = context().await;
        let app = app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/v1/teachers/abc")
            .insert_header(bearer(ActorRole::Admin, 1))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
