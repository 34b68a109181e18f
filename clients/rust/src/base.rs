use reminder_api_structs::MessageResponse;
use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub(crate) struct BaseClient {
    address: String,
    client: Client,
}

#[derive(Debug, Clone, PartialEq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    InternalError,
    UnexpectedStatusCode(StatusCode),
}

#[derive(Debug, Clone)]
pub struct APIError {
    pub variant: APIErrorVariant,
    /// The message returned by the server, if any
    pub message: String,
}

impl APIError {
    fn new(variant: APIErrorVariant) -> Self {
        Self {
            variant,
            message: String::new(),
        }
    }
}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            client: Client::new(),
        }
    }

    fn get_client(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.address, path);
        self.client.request(method, url)
    }

    async fn check_status_code(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> Result<Response, APIError> {
        let status = res.status();
        if status == expected_status_code {
            return Ok(res);
        }

        let variant = match status {
            StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
            StatusCode::INTERNAL_SERVER_ERROR => APIErrorVariant::InternalError,
            _ => APIErrorVariant::UnexpectedStatusCode(status),
        };
        let message = res
            .json::<MessageResponse>()
            .await
            .map(|body| body.message)
            .unwrap_or_default();
        Err(APIError { variant, message })
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Result<Response, reqwest::Error>,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = res.map_err(|_| APIError::new(APIErrorVariant::Network))?;
        let res = self.check_status_code(res, expected_status_code).await?;
        res.json::<T>()
            .await
            .map_err(|_| APIError::new(APIErrorVariant::MalformedResponse))
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.get_client(Method::GET, path).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.get_client(Method::POST, path).json(&body).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post_multipart<T: for<'de> Deserialize<'de>>(
        &self,
        form: Form,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .get_client(Method::POST, path)
            .multipart(form)
            .send()
            .await;
        self.handle_api_response(res, expected_status_code).await
    }
}
