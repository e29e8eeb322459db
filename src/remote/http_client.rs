use super::*;

impl ApiClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach `X-User-Id` when an identity is held. A request sent without
    /// one simply draws a 401 from the server.
    pub(super) fn authed(
        &self,
        req: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.user_id {
            Some(id) => req.header(USER_ID_HEADER, id),
            None => req,
        }
    }

    /// Surface a non-success response as an error, preferring the server's
    /// `{"error": ...}` body text over the bare status code.
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        if let Ok(body) = resp.json::<ErrorBody>() {
            anyhow::bail!("{}: {}", label, body.error);
        }
        anyhow::bail!("{}: server returned {}", label, status);
    }
}
