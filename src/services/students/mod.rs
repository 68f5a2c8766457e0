pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::engine::AssignmentEngine;
use crate::models::students::requests::{
    CreateStudentRequest, StudentQueryParams, UpdateStudentRequest, UpdateStudentStatusRequest,
};

pub struct StudentService {
    engine: Arc<AssignmentEngine>,
}

impl StudentService {
    pub fn new(engine: Arc<AssignmentEngine>) -> Self {
        Self { engine }
    }

    pub(crate) fn engine(&self) -> &AssignmentEngine {
        &self.engine
    }

    // 获取学生列表
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    // 创建学生
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student_data).await
    }

    // 根据ID获取学生
    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    // 更新学生信息
    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update_data: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update_data).await
    }

    // 更新学生状态
    pub async fn update_student_status(
        &self,
        request: &HttpRequest,
        student_id: i64,
        status_data: UpdateStudentStatusRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student_status(self, request, student_id, status_data).await
    }

    // 删除学生（级联删除成员关系）
    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }
}
