//! Login and registration.

use anyhow::anyhow;
use mongodb::bson::doc;
use service_core::error::AppError;
use validator::Validate;

use crate::db::MongoDb;
use crate::dtos::{LoginRequest, RegisterSuperuserRequest, RegistrationRequest, ValueToken};
use crate::models::{AuthClaims, Organization, SanitizedUser, User};
use crate::services::TokenCodec;
use crate::utils::{hash_password, verify_password, Password, PasswordHashString};

#[derive(Clone)]
pub struct AuthService {
    db: MongoDb,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(db: MongoDb, codec: TokenCodec) -> Self {
        Self { db, codec }
    }

    /// Verify credentials and issue a fresh token for the user.
    pub async fn login(&self, req: LoginRequest) -> Result<ValueToken, AppError> {
        req.validate()?;

        let email = req.email.trim().to_lowercase();
        let user = self
            .db
            .users()
            .find_one(doc! { "email": &email }, None)
            .await?
            .ok_or_else(|| AppError::Unauthorized(anyhow!("invalid credentials")))?;

        verify_password(
            &Password::new(req.password),
            &PasswordHashString::new(user.password.clone()),
        )
        .map_err(|_| AppError::Unauthorized(anyhow!("invalid credentials")))?;

        let claims = AuthClaims::from(&user);
        let token = self.codec.encode(&claims)?;
        tracing::info!(user = %user.id, organization = %user.organization, "login succeeded");

        Ok(ValueToken { value_token: token })
    }

    /// Register a new organization together with its first org-admin
    /// user.
    pub async fn register_org(&self, req: RegistrationRequest) -> Result<Organization, AppError> {
        req.validate()?;

        let email = req.email.trim().to_lowercase();
        if self.email_taken(&email).await? {
            return Err(AppError::BadRequest(anyhow!("email already registered")));
        }

        let organization = Organization::new(req.org_name, req.website);

        let password_hash = hash_password(&Password::new(req.password))?;
        let mut admin = User::new(
            organization.id.clone(),
            req.first_name,
            req.last_name,
            email,
            password_hash.into_string(),
        );
        admin.is_org_admin = true;

        self.db
            .organizations()
            .insert_one(&organization, None)
            .await?;
        self.db.users().insert_one(&admin, None).await?;
        tracing::info!(organization = %organization.id, admin = %admin.id, "organization registered");

        Ok(organization)
    }

    /// Register a superuser account outside any organization.
    pub async fn register_superuser(
        &self,
        req: RegisterSuperuserRequest,
    ) -> Result<SanitizedUser, AppError> {
        req.validate()?;

        let email = req.email.trim().to_lowercase();
        if self.email_taken(&email).await? {
            return Err(AppError::BadRequest(anyhow!("email already registered")));
        }

        let password_hash = hash_password(&Password::new(req.password))?;
        let mut superuser = User::new(
            String::new(),
            req.first_name,
            req.last_name,
            email,
            password_hash.into_string(),
        );
        superuser.is_superuser = true;

        self.db.users().insert_one(&superuser, None).await?;
        tracing::info!(user = %superuser.id, "superuser registered");

        Ok(superuser.sanitized())
    }

    async fn email_taken(&self, email: &str) -> Result<bool, AppError> {
        Ok(self
            .db
            .users()
            .find_one(doc! { "email": email }, None)
            .await?
            .is_some())
    }
}
