use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrganizationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub website: String,
}
