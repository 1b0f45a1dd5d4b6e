use reqwest::Method;

use super::InventoryApi;
use crate::error::ApiResult;
use crate::models::{NewUser, Role, UserRecord, UserUpdate};

impl InventoryApi {
    pub async fn users(&self) -> ApiResult<Vec<UserRecord>> {
        self.get_json("/api/usuarios", "users").await
    }

    /// Accounts are created through the register endpoint
    pub async fn create_user(&self, user: &NewUser) -> ApiResult<()> {
        self.execute(
            Method::POST,
            "/api/auth/register",
            Some(user),
            "Failed to create user",
        )
        .await?;
        log::info!("Created user {} ({})", user.username, user.role);
        Ok(())
    }

    pub async fn update_user_role(&self, user_id: u64, role: Role) -> ApiResult<()> {
        self.execute(
            Method::PUT,
            &format!("/api/usuarios/{user_id}"),
            Some(&UserUpdate { role }),
            "Failed to update user",
        )
        .await
    }

    pub async fn delete_user(&self, user_id: u64) -> ApiResult<()> {
        self.delete(&format!("/api/usuarios/{user_id}"), "Failed to delete user")
            .await
    }
}
