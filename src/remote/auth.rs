//! Registration and login. Neither carries the identity header.

use super::*;

impl ApiClient {
    pub fn register(&self, email: &str, password: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.url("/register"))
            .json(&Credentials { email, password })
            .send()
            .context("register request")?;

        let _ = self.ensure_ok(resp, "register")?;
        Ok(())
    }

    /// Exchange credentials for the opaque user id that becomes the active
    /// identity.
    pub fn login(&self, email: &str, password: &str) -> Result<String> {
        let resp = self
            .client
            .post(self.url("/login"))
            .json(&Credentials { email, password })
            .send()
            .context("login request")?;

        let out: LoginResponse = self
            .ensure_ok(resp, "login")?
            .json()
            .context("parse login response")?;
        Ok(out.user_id)
    }
}
