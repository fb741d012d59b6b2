//! Department management.

use anyhow::anyhow;
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, to_bson};
use service_core::error::AppError;
use validator::Validate;

use crate::db::MongoDb;
use crate::dtos::{CreateDepartmentRequest, UpdateDepartmentRequest};
use crate::models::{AuthClaims, Department, Status};
use crate::services::access::require_permission;

#[derive(Clone)]
pub struct DepartmentService {
    db: MongoDb,
}

impl DepartmentService {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        req: CreateDepartmentRequest,
        au: &AuthClaims,
    ) -> Result<Department, AppError> {
        req.validate()?;
        require_permission(au, "CanCreateDepartment")?;

        let department = Department::new(au.organization.clone(), req.name);
        self.db.departments().insert_one(&department, None).await?;
        tracing::info!(department = %department.id, organization = %department.organization, "department created");

        Ok(department)
    }

    pub async fn find_all(&self, au: &AuthClaims) -> Result<Vec<Department>, AppError> {
        require_permission(au, "CanReadDepartment")?;

        let filter = doc! {
            "organization": &au.organization,
            "status": Status::Active.as_str(),
        };
        Ok(self
            .db
            .departments()
            .find(filter, None)
            .await?
            .try_collect()
            .await?)
    }

    pub async fn get_by_id(&self, id: &str, au: &AuthClaims) -> Result<Department, AppError> {
        require_permission(au, "CanReadDepartment")?;

        self.db
            .departments()
            .find_one(
                doc! { "id": id, "organization": &au.organization },
                None,
            )
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow!("department not found")))
    }

    pub async fn update(
        &self,
        id: &str,
        req: UpdateDepartmentRequest,
        au: &AuthClaims,
    ) -> Result<Department, AppError> {
        require_permission(au, "CanUpdateDepartment")?;

        let mut current = self.get_by_id(id, au).await?;

        if !req.name.is_empty() {
            current.name = req.name;
        }
        current.updated_at = Utc::now();

        self.db
            .departments()
            .update_one(
                doc! { "id": &current.id },
                doc! { "$set": {
                    "name": &current.name,
                    "updated_at": to_bson(&current.updated_at).map_err(anyhow::Error::new)?,
                }},
                None,
            )
            .await?;

        Ok(current)
    }

    pub async fn delete(&self, id: &str, au: &AuthClaims) -> Result<(), AppError> {
        require_permission(au, "CanDeleteDepartment")?;

        self.db
            .departments()
            .delete_one(doc! { "id": id }, None)
            .await?;
        tracing::info!(department = %id, "department deleted");

        Ok(())
    }
}
