use dispo_api_structs::apply_gesture::RejectionResponse;
use dispo_domain::RejectReason;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnprocessableEntity,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub message: String,
    /// Why the server refused a gesture, set on `UnprocessableEntity` only
    pub rejection: Option<RejectReason>,
}

pub type APIResponse<T> = Result<T, APIError>;

pub(crate) struct BaseClient {
    address: String,
    client: Client,
    token: Option<String>,
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            client: Client::new(),
            token: None,
        }
    }

    /// Bearer token sent along to the admin routes
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.address, path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn handle_api_response<T: DeserializeOwned>(
        &self,
        res: Result<Response, reqwest::Error>,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = res.map_err(|e| APIError {
            variant: APIErrorVariant::Network,
            message: e.to_string(),
            rejection: None,
        })?;

        let status = res.status();
        if status != expected_status_code {
            let variant = match status {
                StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
                StatusCode::UNAUTHORIZED => APIErrorVariant::Unauthorized,
                StatusCode::FORBIDDEN => APIErrorVariant::Forbidden,
                StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
                StatusCode::CONFLICT => APIErrorVariant::Conflict,
                StatusCode::UNPROCESSABLE_ENTITY => APIErrorVariant::UnprocessableEntity,
                _ => APIErrorVariant::UnexpectedStatusCode,
            };
            let message = res.text().await.unwrap_or_default();
            let rejection = match variant {
                APIErrorVariant::UnprocessableEntity => {
                    serde_json::from_str::<RejectionResponse>(&message)
                        .ok()
                        .map(|body| body.reason)
                }
                _ => None,
            };
            return Err(APIError {
                variant,
                message,
                rejection,
            });
        }

        res.json::<T>().await.map_err(|e| APIError {
            variant: APIErrorVariant::MalformedResponse,
            message: e.to_string(),
            rejection: None,
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .authorize(self.client.get(&self.url(&path)))
            .send()
            .await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .authorize(self.client.delete(&self.url(&path)))
            .send()
            .await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.post_with_headers(body, path, &[], expected_status_code)
            .await
    }

    pub async fn post_with_headers<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        headers: &[(&str, &str)],
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let mut req = self.authorize(self.client.post(&self.url(&path))).json(&body);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        let res = req.send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn put<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .authorize(self.client.put(&self.url(&path)))
            .json(&body)
            .send()
            .await;
        self.handle_api_response(res, expected_status_code).await
    }
}
