//! User management.
//!
//! Assignment composition on create/update: a non-empty role list first
//! replaces the user's roles, departments and permissions with the
//! role-derived values; the department and permission passes then
//! re-resolve whichever list is non-empty at that point. Last write wins -
//! explicit grants only survive when no roles were submitted alongside
//! them.

use anyhow::anyhow;
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, to_bson};
use service_core::error::AppError;
use validator::Validate;

use crate::db::MongoDb;
use crate::dtos::{CreateUserRequest, UpdatePasswordRequest, UpdateUserRequest};
use crate::models::{AuthClaims, SanitizedUser, Status, User};
use crate::services::access::require_permission;
use crate::services::RoleDepartmentAggregator;
use crate::utils::{hash_password, Password};

/// Recompute a user's assignment sets from its requested references.
///
/// This is the create-path composition; the update path runs the same
/// blocks against the stored record.
pub async fn resolve_user_assignments(
    aggregator: &RoleDepartmentAggregator,
    user: &mut User,
) -> Result<(), AppError> {
    if !user.roles.is_empty() {
        let (roles, departments, permissions) = aggregator.assign_user_roles(user).await?;
        user.roles = roles;
        user.departments = departments;
        user.permissions = permissions;
    }

    if !user.departments.is_empty() {
        let departments = aggregator.assign_user_departments(user).await?;
        user.departments = departments;
    }

    if !user.permissions.is_empty() {
        let permissions = aggregator.assign_user_permissions(user).await?;
        user.permissions = permissions;
    }

    Ok(())
}

#[derive(Clone)]
pub struct UserService {
    db: MongoDb,
    aggregator: RoleDepartmentAggregator,
}

impl UserService {
    pub fn new(db: MongoDb, aggregator: RoleDepartmentAggregator) -> Self {
        Self { db, aggregator }
    }

    pub async fn create(
        &self,
        req: CreateUserRequest,
        au: &AuthClaims,
    ) -> Result<SanitizedUser, AppError> {
        req.validate()?;
        require_permission(au, "CanCreateUser")?;

        let email = req.email.trim().to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(AppError::BadRequest(anyhow!("email already registered")));
        }

        let password_hash = hash_password(&Password::new(req.password))?;
        let mut user = User::new(
            au.organization.clone(),
            req.first_name,
            req.last_name,
            email,
            password_hash.into_string(),
        );
        user.roles = req.roles;
        user.departments = req.departments;
        user.permissions = req.permissions;

        resolve_user_assignments(&self.aggregator, &mut user).await?;

        self.db.users().insert_one(&user, None).await?;
        tracing::info!(user = %user.id, organization = %user.organization, "user created");

        Ok(user.sanitized())
    }

    pub async fn find_all(&self, au: &AuthClaims) -> Result<Vec<SanitizedUser>, AppError> {
        require_permission(au, "CanReadUser")?;

        let filter = doc! {
            "organization": &au.organization,
            "status": Status::Active.as_str(),
        };
        let users: Vec<User> = self.db.users().find(filter, None).await?.try_collect().await?;

        Ok(users.iter().map(User::sanitized).collect())
    }

    pub async fn get_by_id(&self, id: &str, au: &AuthClaims) -> Result<User, AppError> {
        require_permission(au, "CanReadUser")?;

        let user = self
            .db
            .users()
            .find_one(doc! { "id": id }, None)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow!("user not found")))?;

        if !au.is_superuser && user.organization != au.organization {
            return Err(AppError::Unauthorized(anyhow!("unauthorized request")));
        }

        Ok(user)
    }

    pub async fn update(
        &self,
        id: &str,
        req: UpdateUserRequest,
        au: &AuthClaims,
    ) -> Result<SanitizedUser, AppError> {
        require_permission(au, "CanUpdateUser")?;

        let mut current = self.get_by_id(id, au).await?;

        // The working copy carries the requested references under the
        // stored organization, which the aggregator resolves against.
        let mut incoming = current.clone();
        incoming.roles = req.roles;
        incoming.departments = req.departments;
        incoming.permissions = req.permissions;

        if !req.first_name.is_empty() {
            current.first_name = req.first_name;
        }
        if !req.last_name.is_empty() {
            current.last_name = req.last_name;
        }
        if !req.email.is_empty() {
            let email = req.email.trim().to_lowercase();
            if email != current.email {
                if self.find_by_email(&email).await?.is_some() {
                    return Err(AppError::BadRequest(anyhow!("email already registered")));
                }
                current.email = email;
            }
        }

        if !incoming.roles.is_empty() {
            let (roles, departments, permissions) =
                self.aggregator.assign_user_roles(&incoming).await?;
            incoming.roles = roles;
            incoming.departments = departments;
            incoming.permissions = permissions;
            current.roles = incoming.roles.clone();
        }

        if !incoming.departments.is_empty() {
            current.departments = self.aggregator.assign_user_departments(&incoming).await?;
        }

        if !incoming.permissions.is_empty() {
            current.permissions = self.aggregator.assign_user_permissions(&incoming).await?;
        }

        current.updated_at = Utc::now();
        self.store_update(&current).await?;

        Ok(current.sanitized())
    }

    pub async fn update_password(
        &self,
        id: &str,
        req: UpdatePasswordRequest,
        au: &AuthClaims,
    ) -> Result<SanitizedUser, AppError> {
        req.validate()?;

        let mut current = self.get_by_id(id, au).await?;

        // Only org admins may change someone else's password.
        if !au.is_org_admin && au.id != current.id {
            return Err(AppError::Unauthorized(anyhow!("unauthorized request")));
        }

        let password_hash = hash_password(&Password::new(req.password))?;
        current.password = password_hash.into_string();
        current.updated_at = Utc::now();

        self.db
            .users()
            .update_one(
                doc! { "id": &current.id },
                doc! { "$set": {
                    "password": &current.password,
                    "updated_at": to_bson(&current.updated_at).map_err(anyhow::Error::new)?,
                }},
                None,
            )
            .await?;

        Ok(current.sanitized())
    }

    pub async fn delete(&self, id: &str, au: &AuthClaims) -> Result<(), AppError> {
        require_permission(au, "CanDeleteUser")?;

        self.db.users().delete_one(doc! { "id": id }, None).await?;
        tracing::info!(user = %id, "user deleted");

        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .db
            .users()
            .find_one(doc! { "email": email }, None)
            .await?)
    }

    async fn store_update(&self, user: &User) -> Result<(), AppError> {
        let update = doc! { "$set": {
            "first_name": &user.first_name,
            "last_name": &user.last_name,
            "email": &user.email,
            "roles": to_bson(&user.roles).map_err(anyhow::Error::new)?,
            "departments": to_bson(&user.departments).map_err(anyhow::Error::new)?,
            "permissions": to_bson(&user.permissions).map_err(anyhow::Error::new)?,
            "updated_at": to_bson(&user.updated_at).map_err(anyhow::Error::new)?,
        }};

        self.db
            .users()
            .update_one(doc! { "id": &user.id }, update, None)
            .await?;

        Ok(())
    }
}
