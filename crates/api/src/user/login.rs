use crate::error::ReminderError;
use crate::shared::{
    auth::{issue_token, verify_password},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_api_structs::dtos::UserDTO;
use reminder_api_structs::login::*;
use reminder_domain::User;
use reminder_infra::ReminderContext;
use tracing::error;

pub async fn login_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderError> {
    let body = body.0;
    let usecase = LoginUseCase {
        email: body.email,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                token: res.token,
                user: UserDTO::new(res.user),
            })
        })
        .map_err(ReminderError::from)
}

#[derive(Debug)]
pub struct LoginUseCase {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub token: String,
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound,
    InvalidCredentials,
    InternalError,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound => Self::NotFound("User not found".into()),
            UseCaseError::InvalidCredentials => Self::InvalidCredentials,
            UseCaseError::InternalError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoginUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "Login";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let user = match ctx.repos.users.find_by_email(&self.email).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound),
        };

        // A stored hash bcrypt cannot read is treated like a wrong password
        let is_match = match verify_password(self.password.clone(), user.password.clone()).await
        {
            Ok(is_match) => is_match,
            Err(e) => {
                error!("Unable to verify password of user: {}. Error: {:?}", user.id, e);
                false
            }
        };
        if !is_match {
            return Err(UseCaseError::InvalidCredentials);
        }

        let token = issue_token(&user.id, &ctx.config.jwt_secret, ctx.config.jwt_expiry_secs)
            .map_err(|_| UseCaseError::InternalError)?;

        Ok(UseCaseRes { token, user })
    }
}
