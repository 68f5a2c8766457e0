pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;
pub mod teacher;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::engine::AssignmentEngine;
use crate::models::classes::requests::{
    AssignTeacherRequest, ClassQueryParams, CreateClassRequest, UpdateClassRequest,
};
use crate::models::PaginationQuery;

pub struct ClassService {
    engine: Arc<AssignmentEngine>,
}

impl ClassService {
    pub fn new(engine: Arc<AssignmentEngine>) -> Self {
        Self { engine }
    }

    pub(crate) fn engine(&self) -> &AssignmentEngine {
        &self.engine
    }

    // 获取班级列表
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    // 创建班级
    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    // 获取班级信息
    pub async fn get_class(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, update_data).await
    }

    // 删除班级（级联删除成员关系）
    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }

    // 分配教师
    pub async fn assign_teacher(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assign_data: AssignTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        teacher::assign_teacher(self, request, class_id, assign_data).await
    }

    // 清空教师
    pub async fn unassign_teacher(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        teacher::unassign_teacher(self, request, class_id).await
    }

    // 列出班级成员
    pub async fn list_members(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        members::list_members(self, request, class_id, query).await
    }

    // 学生加入班级
    pub async fn assign_student(
        &self,
        request: &HttpRequest,
        class_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::assign_student(self, request, class_id, student_id).await
    }

    // 学生移出班级
    pub async fn remove_student(
        &self,
        request: &HttpRequest,
        class_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::remove_student(self, request, class_id, student_id).await
    }
}
