//! Request and response shapes for the HTTP surface.

pub mod auth;
pub mod department;
pub mod organization;
pub mod role;
pub mod user;

pub use auth::{LoginRequest, RegisterSuperuserRequest, RegistrationRequest, ValueToken};
pub use department::{CreateDepartmentRequest, UpdateDepartmentRequest};
pub use organization::UpdateOrganizationRequest;
pub use role::{CreateRoleRequest, UpdateRoleRequest};
pub use user::{CreateUserRequest, UpdatePasswordRequest, UpdateUserRequest};
