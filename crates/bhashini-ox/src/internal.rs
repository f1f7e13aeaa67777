use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{BhashiniRequestError, error::parse_error_response};

const USER_ID_HEADER: &str = "userID";
const API_KEY_HEADER: &str = "ulcaApiKey";

/// Sends JSON bodies with the Bhashini credential headers
pub(crate) struct BhashiniRequestHelper<'a> {
    client: &'a reqwest::Client,
    user_id: &'a str,
    api_key: &'a str,
    inference_api_key: Option<&'a str>,
}

impl<'a> BhashiniRequestHelper<'a> {
    pub(crate) fn new(
        client: &'a reqwest::Client,
        user_id: &'a str,
        api_key: &'a str,
        inference_api_key: Option<&'a str>,
    ) -> Self {
        Self {
            client,
            user_id,
            api_key,
            inference_api_key,
        }
    }

    /// POST `body` to `url` and return the response JSON untouched.
    ///
    /// Non-2xx statuses become `RemoteServiceError`; a 2xx body that is not
    /// JSON becomes `MalformedResponse`.
    pub(crate) async fn post_json<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Value, BhashiniRequestError> {
        let mut req = self
            .client
            .post(url)
            .header(USER_ID_HEADER, self.user_id)
            .header(API_KEY_HEADER, self.api_key)
            .header(ACCEPT, "*/*")
            .header(CONTENT_TYPE, "application/json")
            .json(body);

        if let Some(key) = self.inference_api_key {
            req = req.header(AUTHORIZATION, key);
        }

        debug!(url = %url, "sending Bhashini request");
        let res = req.send().await?;
        let status = res.status();
        let bytes = res.bytes().await?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Bhashini request failed");
            return Err(parse_error_response(status, bytes));
        }

        serde_json::from_slice::<Value>(&bytes).map_err(|e| {
            warn!(url = %url, error = %e, "Bhashini response is not JSON");
            BhashiniRequestError::MalformedResponse(format!("response is not valid JSON: {e}"))
        })
    }
}
