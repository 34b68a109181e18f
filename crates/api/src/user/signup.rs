use crate::error::ReminderError;
use crate::shared::{
    auth::hash_password,
    guard::Guard,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_api_structs::signup::*;
use reminder_api_structs::MessageResponse;
use reminder_domain::User;
use reminder_infra::{InsertUserError, ReminderContext};

pub async fn signup_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderError> {
    let body = body.0;
    Guard::against_blank("email", &body.email)?;
    Guard::against_blank("password", &body.password)?;

    let usecase = SignupUseCase {
        name: body.name,
        email: body.email,
        password: body.password,
        role: body.role,
        notification_address: body.notification_address,
    };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Created().json(MessageResponse::new("User created successfully")))
        .map_err(ReminderError::from)
}

#[derive(Debug)]
pub struct SignupUseCase {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub notification_address: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    UserAlreadyExists,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UserAlreadyExists => Self::AlreadyExists("User already exists".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SignupUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "Signup";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find_by_email(&self.email).await.is_some() {
            return Err(UseCaseError::UserAlreadyExists);
        }

        let password_hash = hash_password(self.password.clone())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut user = User::new(
            self.name.clone(),
            self.email.clone(),
            password_hash,
            self.role.clone(),
        );
        user.notification_address = self.notification_address.clone();

        ctx.repos
            .users
            .insert(&user)
            .await
            .map(|_| user)
            .map_err(|e| match e {
                // Lost a race against a concurrent signup with the same email
                InsertUserError::DuplicateEmail(_) => UseCaseError::UserAlreadyExists,
                InsertUserError::Storage(_) => UseCaseError::StorageError,
            })
    }
}
