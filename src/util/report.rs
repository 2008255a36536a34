use std::error::Error;

use crate::client::error::{ClientError, HttpError};
use crate::orchestrator::error::ProcessError;

/// Console rendering of a failed script run.
///
/// LCD errors print the status, the headers and either the `code` / `message`
/// pair of the body or the raw body. Anything else prints its error chain.
pub fn render_error(err: &ProcessError) -> String {
    match err {
        ProcessError::ClientError(ClientError::Http(e)) => render_http_error(e),
        other => error_chain(other),
    }
}

pub fn render_http_error(e: &HttpError) -> String {
    let mut out = format!("{}\n", e.status);
    for (name, value) in &e.headers {
        out.push_str(&format!("{}: {}\n", name, value));
    }

    match e.lcd_status() {
        Some(status) => out.push_str(&format!(
            "Code={} Message={} \n",
            status.code, status.message
        )),
        None => out.push_str(&e.body),
    }
    out
}

fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        out.push_str(&format!(": {}", e));
        source = e.source();
    }
    out
}
