//! Organization management.

use anyhow::anyhow;
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, to_bson};
use service_core::error::AppError;

use crate::db::MongoDb;
use crate::dtos::UpdateOrganizationRequest;
use crate::models::{AuthClaims, Organization};
use crate::services::access::{is_granted, require_permission};

#[derive(Clone)]
pub struct OrganizationService {
    db: MongoDb,
}

impl OrganizationService {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<Organization>, AppError> {
        Ok(self
            .db
            .organizations()
            .find(doc! {}, None)
            .await?
            .try_collect()
            .await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Organization, AppError> {
        self.db
            .organizations()
            .find_one(doc! { "id": id }, None)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow!("organization not found")))
    }

    pub async fn update(
        &self,
        id: &str,
        req: UpdateOrganizationRequest,
        au: &AuthClaims,
    ) -> Result<Organization, AppError> {
        // Superusers and org admins pass; everyone else needs the
        // explicit grant.
        if !au.is_superuser && !au.is_org_admin && !is_granted("CanUpdateOrganization", au) {
            return Err(AppError::Unauthorized(anyhow!("permission not granted")));
        }

        let mut current = self.get_by_id(id).await?;

        if au.organization != current.id {
            return Err(AppError::Unauthorized(anyhow!("unauthorized request")));
        }

        if !req.name.is_empty() {
            current.name = req.name;
        }
        if !req.website.is_empty() {
            current.website = req.website;
        }
        current.updated_at = Utc::now();

        self.db
            .organizations()
            .update_one(
                doc! { "id": &current.id },
                doc! { "$set": {
                    "name": &current.name,
                    "website": &current.website,
                    "updated_at": to_bson(&current.updated_at).map_err(anyhow::Error::new)?,
                }},
                None,
            )
            .await?;

        Ok(current)
    }

    pub async fn delete(&self, id: &str, au: &AuthClaims) -> Result<(), AppError> {
        require_permission(au, "CanDeleteOrganization")?;

        self.db
            .organizations()
            .delete_one(doc! { "id": id }, None)
            .await?;
        tracing::info!(organization = %id, "organization deleted");

        Ok(())
    }
}
