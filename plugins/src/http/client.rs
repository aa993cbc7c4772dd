use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use trainconf_core::api::ProjectIdentifier;

use super::error::ApiHttpError;

async fn read_body(method: &Method, url: &str, resp: reqwest::Response) -> anyhow::Result<String> {
    resp.text()
        .await
        .map_err(|err| ApiHttpError::transport(method.clone(), url, err).into())
}

async fn parse_json_response<T: DeserializeOwned>(
    method: Method,
    url: &str,
    resp: reqwest::Response,
) -> anyhow::Result<T> {
    let status = resp.status();
    let body = read_body(&method, url, resp).await?;

    if !status.is_success() {
        return Err(ApiHttpError::status(method, url, status, &body).into());
    }

    serde_json::from_str::<T>(&body)
        .map_err(|err| ApiHttpError::decode(method, url, &body, err).into())
}

async fn ensure_success(method: Method, url: &str, resp: reqwest::Response) -> anyhow::Result<()> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }

    let body = read_body(&method, url, resp).await?;
    Err(ApiHttpError::status(method, url, status, &body).into())
}

/// JSON over HTTP with optional bearer auth.
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: String, api_key: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
        })
    }

    /// `{base}/api/v1/organizations/{org}/workspaces/{ws}/projects/{id}/{suffix}`
    pub fn project_url(&self, project: &ProjectIdentifier, suffix: &str) -> String {
        format!(
            "{}/api/v1/organizations/{}/workspaces/{}/projects/{}/{}",
            self.base_url,
            project.organization_id,
            project.workspace_id,
            project.project_id,
            suffix.trim_start_matches('/')
        )
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<T> {
        tracing::debug!(
            target: "trainconf.http",
            stage = "http.get.in",
            url = %url,
            params = query.len()
        );
        let req = self.http.get(url).query(query);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| ApiHttpError::transport(Method::GET, url, err))?;
        let status = resp.status();
        let v = parse_json_response(Method::GET, url, resp).await?;
        tracing::debug!(target: "trainconf.http", stage = "http.get.out", status = %status);
        Ok(v)
    }

    /// Sends `body` with `method`; any 2xx counts as success and the
    /// response body is not read.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> anyhow::Result<()> {
        tracing::debug!(
            target: "trainconf.http",
            stage = "http.send.in",
            method = %method,
            url = %url
        );
        let req = self
            .http
            .request(method.clone(), url)
            .query(query)
            .json(body);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| ApiHttpError::transport(method.clone(), url, err))?;
        let status = resp.status();
        ensure_success(method, url, resp).await?;
        tracing::debug!(target: "trainconf.http", stage = "http.send.out", status = %status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::{json, Value};

    fn project() -> ProjectIdentifier {
        ProjectIdentifier::new("o", "w", "p")
    }

    #[test]
    fn test_project_url() {
        let client = HttpClient::new("https://host/".to_string(), String::new(), 1_000).unwrap();
        assert_eq!(
            client.project_url(&project(), "/configuration"),
            "https://host/api/v1/organizations/o/workspaces/w/projects/p/configuration"
        );
    }

    #[tokio::test]
    async fn test_get_json_with_query() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock(
                "GET",
                "/api/v1/organizations/o/workspaces/w/projects/p/training_configuration",
            )
            .match_query(Matcher::UrlEncoded("task_id".into(), "t1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"task_id":"t1"}"#)
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), String::new(), 1_000).unwrap();
        let url = client.project_url(&project(), "training_configuration");
        let value: Value = client
            .get_json(&url, &[("task_id", "t1".to_string())])
            .await
            .unwrap();
        assert_eq!(value["task_id"], "t1");
    }

    #[tokio::test]
    async fn test_get_json_decode_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/v1/organizations/o/workspaces/w/projects/p/configuration")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), String::new(), 1_000).unwrap();
        let url = client.project_url(&project(), "configuration");
        let err = client.get_json::<Value>(&url, &[]).await.unwrap_err();
        let api_err = err
            .downcast_ref::<ApiHttpError>()
            .expect("expected ApiHttpError");
        assert!(matches!(api_err, ApiHttpError::Decode { method, .. } if *method == Method::GET));
        assert_eq!(api_err.status_code(), None);
    }

    #[tokio::test]
    async fn test_send_json_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock(
                "PATCH",
                "/api/v1/organizations/o/workspaces/w/projects/p/project_configuration",
            )
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), String::new(), 1_000).unwrap();
        let url = client.project_url(&project(), "project_configuration");
        let err = client
            .send_json(Method::PATCH, &url, &[], &json!({"task_configs": []}))
            .await
            .unwrap_err();
        let api_err = err
            .downcast_ref::<ApiHttpError>()
            .expect("expected ApiHttpError");
        assert_eq!(
            api_err.status_code(),
            Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
        );
        assert_eq!(
            api_err.endpoint(),
            "/api/v1/organizations/o/workspaces/w/projects/p/project_configuration"
        );
        assert!(api_err.to_string().starts_with("PATCH "));
        assert!(api_err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_auth_header_included_when_api_key_set() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/v1/organizations/o/workspaces/w/projects/p/configuration")
            .match_header("authorization", "Bearer secret-token")
            .with_status(204)
            .create_async()
            .await;

        let client =
            HttpClient::new(server.url(), "secret-token".to_string(), 1_000).unwrap();
        let url = client.project_url(&project(), "configuration");
        client
            .send_json(Method::POST, &url, &[], &json!({}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_auth_header_absent_when_api_key_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/v1/organizations/o/workspaces/w/projects/p/configuration")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = HttpClient::new(server.url(), "  ".to_string(), 1_000).unwrap();
        let url = client.project_url(&project(), "configuration");
        client.get_json::<Value>(&url, &[]).await.unwrap();
    }
}
