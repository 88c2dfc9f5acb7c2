/*!
Static files of the browser client.

Only the files of a fixed allow-list are served, each with a fixed content type:

| Path                  | File             |
|-----------------------|------------------|
| `/`, `/index.html`    | `index.html`     |
| `/default.css`        | `default.css`    |
| `/favicon.ico`        | `favicon.ico`    |
| `/otter_step.js`      | `otter_step.js`  |

Any query string is ignored.
A path outside of the allow-list, or a file which cannot be read, is `404 Not Found`.
*/

use std::path::Path;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::misc::log::targets::{self};

/// A file of the allow-list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Asset {
    pub file: &'static str,
    pub content_type: &'static str,
}

const INDEX: Asset = Asset {
    file: "index.html",
    content_type: "text/html; charset=utf-8",
};

/// The asset at `path`, if any.
pub fn lookup(path: &str) -> Option<Asset> {
    let path = match path.split_once('?') {
        Some((path, _query)) => path,
        None => path,
    };

    match path {
        "/" | "/index.html" => Some(INDEX),

        "/default.css" => Some(Asset {
            file: "default.css",
            content_type: "text/css; charset=utf-8",
        }),

        "/favicon.ico" => Some(Asset {
            file: "favicon.ico",
            content_type: "image/x-icon",
        }),

        "/otter_step.js" => Some(Asset {
            file: "otter_step.js",
            content_type: "application/javascript; charset=utf-8",
        }),

        _ => None,
    }
}

/// The plain text response to a path outside of the allow-list.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

/// The response to a `GET` of `path`, with files read from `www`.
pub async fn get(www: &Path, path: &str) -> Response {
    let Some(asset) = lookup(path) else {
        log::debug!(target: targets::SERVER, "No asset at {path}");
        return not_found();
    };

    match tokio::fs::read(www.join(asset.file)).await {
        Ok(body) => ([(header::CONTENT_TYPE, asset.content_type)], body).into_response(),

        Err(e) => {
            log::warn!(target: targets::SERVER, "Failed to read {}: {e}", asset.file);
            not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list() {
        assert_eq!(lookup("/"), Some(INDEX));
        assert_eq!(lookup("/index.html"), Some(INDEX));
        assert_eq!(lookup("/?reload=1"), Some(INDEX));
        assert_eq!(lookup("/default.css").map(|a| a.file), Some("default.css"));
        assert_eq!(lookup("/favicon.ico").map(|a| a.content_type), Some("image/x-icon"));
        assert_eq!(lookup("/otter_step.js").map(|a| a.file), Some("otter_step.js"));

        assert_eq!(lookup("/../Cargo.toml"), None);
        assert_eq!(lookup("/index.htm"), None);
        assert_eq!(lookup("index.html"), None);
        assert_eq!(lookup("/www/index.html"), None);
    }

    #[tokio::test]
    async fn served_files() {
        let www = Path::new(env!("CARGO_MANIFEST_DIR")).join("www");

        let script = get(&www, "/otter_step.js").await;
        assert_eq!(script.status(), StatusCode::OK);
        assert_eq!(
            script.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/javascript; charset=utf-8"
        );

        let body = axum::body::to_bytes(not_found().into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"404 Not Found");
    }

    #[tokio::test]
    async fn missing_files() {
        let www = Path::new("a directory which does not exist");
        assert_eq!(get(www, "/").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get(www, "/secret").await.status(), StatusCode::NOT_FOUND);
    }
}
