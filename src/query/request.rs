use crate::context::DataContext;
use crate::node::{DataSource, HttpMethod};
use crate::template;

/// A fully interpolated request the host's network layer can execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl DataSource {
    /// Interpolates the URL, header values and body against `ctx`.
    ///
    /// Returns `None` when the URL cannot be evaluated. Headers whose value
    /// fails are left out, and a failing body becomes `None`.
    pub fn request(&self, ctx: &DataContext<'_>) -> Option<DataRequest> {
        let Some(url) = template::evaluate(&self.url, ctx) else {
            tracing::debug!(url = %self.url, "data source URL could not be interpolated");
            return None;
        };

        let headers = self
            .headers
            .iter()
            .filter_map(|header| {
                template::evaluate(&header.value, ctx).map(|value| (header.key.clone(), value))
            })
            .collect();
        let body = self
            .http_body
            .as_deref()
            .and_then(|body| template::evaluate(body, ctx));

        Some(DataRequest {
            method: self.http_method,
            url,
            headers,
            body,
        })
    }
}
