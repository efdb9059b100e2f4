use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::QueryError;

/// Sends a GET and decodes the body as JSON whatever the status code, since
/// providers put their error envelopes in non-2xx bodies.
pub async fn make_request(
    client: &Client,
    url: &str,
    api_key: Option<&str>,
) -> Result<Value, QueryError> {
    let mut request = client.get(url);
    if let Some(api_key) = api_key {
        request = request.bearer_auth(api_key);
    }

    let (status, text) = send(request).await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(data) => Ok(data),
        Err(err) if status.is_success() => Err(QueryError::Decode(err)),
        Err(_) => Err(QueryError::Upstream(format!("Request failed: {}", status))),
    }
}

pub async fn make_text_request(
    client: &Client,
    url: &str,
    params: &[(&str, &str)],
) -> Result<String, QueryError> {
    let (status, text) = send(client.get(url).query(params)).await?;

    if !status.is_success() {
        return Err(QueryError::Upstream(format!("Request failed: {}", status)));
    }

    Ok(text)
}

async fn send(request: RequestBuilder) -> Result<(reqwest::StatusCode, String), QueryError> {
    let res = request.send().await?;
    let status = res.status();
    let text = res.text().await?;

    Ok((status, text))
}

pub fn parse_response_array<T>(data: Value, error_msg: &str) -> Result<Vec<T>, QueryError>
where
    T: DeserializeOwned,
{
    match data {
        Value::Array(items) => {
            let result: Vec<T> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect();

            if result.is_empty() {
                Err(QueryError::NoData(error_msg.to_string()))
            } else {
                Ok(result)
            }
        }
        _ => Err(QueryError::Upstream(String::from(
            "Unexpected API response format: not an array",
        ))),
    }
}

pub fn parse_response_object<T>(data: Value) -> Result<T, QueryError>
where
    T: DeserializeOwned,
{
    match data {
        Value::Object(obj) => Ok(serde_json::from_value(Value::Object(obj))?),
        _ => Err(QueryError::Upstream(String::from(
            "Unexpected API response format: not an object",
        ))),
    }
}
