//! OAuth token exchange logic.
//!
//! Handles exchanging authorization codes for access tokens.

use super::OAuthProviderConfig;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::Value;

/// Exchange authorization code for access token
///
/// The provider's JSON response is returned untouched so it can be stored
/// and handed to the client exactly as issued.
///
/// # Returns
/// * `Ok(Value)` - Token response (access token, refresh token, expiry, ...)
/// * `Err` - Transport failure, non-2xx status or non-JSON body
pub async fn exchange_code_for_token(
    client: &Client,
    provider: &OAuthProviderConfig,
    code: &str,
) -> Result<Value> {
    let form_data = [
        ("grant_type", "authorization_code"),
        ("client_id", provider.client_id.as_str()),
        ("client_secret", provider.client_secret.as_str()),
        ("redirect_uri", provider.redirect_uri.as_str()),
        ("code", code),
    ];

    tracing::debug!("Exchanging authorization code for token at {}", provider.token_url);

    // `form` sets Content-Type: application/x-www-form-urlencoded
    let response = client
        .post(&provider.token_url)
        .header("Accept", "application/json")
        .form(&form_data)
        .send()
        .await
        .context("Failed to send token exchange request")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        return Err(anyhow!(
            "Token exchange failed with status {}: {}",
            status,
            body
        ));
    }

    let token_response: Value = response
        .json()
        .await
        .context("Failed to parse token response")?;

    tracing::debug!(
        "Token exchange successful, has_refresh_token={}",
        token_response.get("refresh_token").is_some()
    );

    Ok(token_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn provider(token_url: String) -> OAuthProviderConfig {
        OAuthProviderConfig {
            auth_url: "https://example.com/oauth/authorize".to_string(),
            token_url,
            scopes: vec!["oauth".to_string()],
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:8000/callback".to_string(),
        }
    }

    #[tokio::test]
    async fn test_exchange_posts_form_and_returns_raw_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/v1/token")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("client_id".into(), "client".into()),
                Matcher::UrlEncoded("client_secret".into(), "secret".into()),
                Matcher::UrlEncoded(
                    "redirect_uri".into(),
                    "http://localhost:8000/callback".into(),
                ),
                Matcher::UrlEncoded("code".into(), "the_code".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token":"at","refresh_token":"rt","expires_in":1800,"token_type":"bearer"}"#,
            )
            .create_async()
            .await;

        let config = provider(format!("{}/oauth/v1/token", server.url()));
        let token = exchange_code_for_token(&Client::new(), &config, "the_code")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(token["access_token"], "at");
        assert_eq!(token["refresh_token"], "rt");
        assert_eq!(token["expires_in"], 1800);
    }

    #[tokio::test]
    async fn test_exchange_fails_on_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth/v1/token")
            .with_status(400)
            .with_body(r#"{"status":"BAD_AUTH_CODE"}"#)
            .create_async()
            .await;

        let config = provider(format!("{}/oauth/v1/token", server.url()));
        let err = exchange_code_for_token(&Client::new(), &config, "bad")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("BAD_AUTH_CODE"));
    }
}
