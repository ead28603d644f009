//! Resolution of the `@me` token to the authenticated user's login.

use crate::error::{QueryError, QueryResult};
use crate::filter::FilterOptions;
use crate::lookup::ViewerLookup;

/// The token standing for the authenticated user.
pub const ME_TOKEN: &str = "@me";

/// Replaces `@me` with the viewer's login on one host.
///
/// The login is fetched on the first `@me` seen and cached for the life of
/// the replacer, so an instance makes at most one successful remote call. A
/// failed lookup leaves the cache empty and a later call may try again.
///
/// Methods take `&mut self`; share an instance across tasks only behind a
/// lock.
pub struct MeReplacer<'a> {
    client: &'a dyn ViewerLookup,
    host: String,
    login: Option<String>,
}

impl<'a> MeReplacer<'a> {
    pub fn new(client: &'a dyn ViewerLookup, host: impl Into<String>) -> Self {
        Self {
            client,
            host: host.into(),
            login: None,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    async fn current_login(&mut self) -> QueryResult<String> {
        if let Some(login) = &self.login {
            tracing::trace!(host = %self.host, "using cached viewer login");
            return Ok(login.clone());
        }

        tracing::debug!(host = %self.host, "resolving @me");
        let login = self
            .client
            .current_login(&self.host)
            .await
            .map_err(|source| QueryError::resolution("`@me` to your user handle", source))?;
        self.login = Some(login.clone());
        Ok(login)
    }

    /// Returns `handle`, or the viewer's login when `handle` is `@me`.
    pub async fn replace(&mut self, handle: &str) -> QueryResult<String> {
        if handle == ME_TOKEN {
            self.current_login().await
        } else {
            Ok(handle.to_string())
        }
    }

    /// Replaces every `@me` in `handles`, keeping order.
    ///
    /// On failure no partially replaced list is returned.
    pub async fn replace_slice(&mut self, handles: &[String]) -> QueryResult<Vec<String>> {
        let mut replaced = Vec::with_capacity(handles.len());
        for handle in handles {
            replaced.push(self.replace(handle).await?);
        }
        Ok(replaced)
    }

    /// Returns a copy of `options` with `@me` replaced in the assignee,
    /// author and mention fields.
    pub async fn replace_filter(&mut self, options: &FilterOptions) -> QueryResult<FilterOptions> {
        let mut resolved = options.clone();
        for field in [
            &mut resolved.assignee,
            &mut resolved.author,
            &mut resolved.mention,
        ] {
            if let Some(handle) = field.as_deref() {
                *field = Some(self.replace(handle).await?);
            }
        }
        Ok(resolved)
    }
}
