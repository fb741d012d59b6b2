use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, message = "Department name is required"))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDepartmentRequest {
    #[serde(default)]
    pub name: String,
}
