use crate::{APIResponse, BaseClient};
use reminder_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub notification_address: Option<String>,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn signup(&self, input: SignupInput) -> APIResponse<signup::APIResponse> {
        let body = signup::RequestBody {
            name: input.name,
            email: input.email,
            password: input.password,
            role: input.role,
            notification_address: input.notification_address,
        };

        self.base.post(body, "signup", StatusCode::CREATED).await
    }

    pub async fn login(&self, email: String, password: String) -> APIResponse<login::APIResponse> {
        let body = login::RequestBody { email, password };

        self.base.post(body, "login", StatusCode::OK).await
    }
}
