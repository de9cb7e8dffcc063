use reqwest::Method;

use retailinv_auth::UserAccount;
use retailinv_core::UserId;

use super::ApiClient;
use crate::error::SessionResult;

impl ApiClient {
    fn users_url(&self) -> String {
        format!("{}/admin/users", self.config.users_url)
    }

    pub async fn list_users(&self) -> SessionResult<Vec<UserAccount>> {
        let mut users: Vec<UserAccount> = self.get_json(self.users_url(), "list users").await?;
        for user in &mut users {
            user.password = None;
        }
        Ok(users)
    }

    pub async fn create_user(&self, user: &UserAccount) -> SessionResult<UserAccount> {
        user.validate()?;
        let mut created: UserAccount = self
            .send_json(Method::POST, self.users_url(), user, "create user")
            .await?;
        created.password = None;
        tracing::info!(user_id = ?created.id, role = %created.role, "user created");
        Ok(created)
    }

    pub async fn update_user(&self, id: UserId, user: &UserAccount) -> SessionResult<UserAccount> {
        user.validate()?;
        let url = format!("{}/{}", self.users_url(), id);
        let mut updated: UserAccount = self.send_json(Method::PUT, url, user, "update user").await?;
        updated.password = None;
        Ok(updated)
    }

    pub async fn delete_user(&self, id: UserId) -> SessionResult<()> {
        self.delete(format!("{}/{}", self.users_url(), id), "delete user")
            .await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}
