//! Blocking HTTP implementation of the content backend.

use crate::backend::credentials::CredentialSource;
use crate::backend::interface::{classify_save_status, ContentBackend};
use crate::config::ClientConfig;
use crate::content::persist::UpdatePayload;
use crate::error::{CoreError, CoreResult};
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};
use ureq::Agent;

const USER_AGENT: &str = concat!("content_core/", env!("CARGO_PKG_VERSION"));

pub struct HttpContentBackend<C: CredentialSource> {
    config: ClientConfig,
    credentials: C,
    agent: Agent,
}

impl<C: CredentialSource> HttpContentBackend<C> {
    pub fn new(config: ClientConfig, credentials: C) -> Self {
        let agent = agent(&config);
        Self {
            config,
            credentials,
            agent,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Agent with native TLS and one global timeout covering the whole request.
fn agent(config: &ClientConfig) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(config.timeout()))
        .build()
        .into()
}

impl<C: CredentialSource> ContentBackend for HttpContentBackend<C> {
    fn update_content(&self, id: &str, payload: &UpdatePayload) -> CoreResult<()> {
        let url = self.config.content_url(id)?;
        let body = serde_json::to_vec(payload)?;

        let mut req = self
            .agent
            .put(url.as_str())
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json");
        match self.credentials.bearer_token() {
            Some(token) => req = req.header("Authorization", format!("Bearer {}", token)),
            None => log::warn!("no bearer token available; sending update for {} unauthenticated", id),
        }

        match req.send(&body[..]) {
            Ok(resp) => {
                let status = resp.status().as_u16();
                if (200..300).contains(&status) {
                    Ok(())
                } else {
                    Err(classify_save_status(status))
                }
            }
            Err(ureq::Error::StatusCode(status)) => Err(classify_save_status(status)),
            Err(e) => Err(CoreError::save_failure(None, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::credentials::StaticToken;
    use crate::content::mapper::normalize;
    use crate::content::model::{Channel, RawContentRecord};
    use crate::content::persist::to_update_request;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    /// Serve one request on loopback, reply with `status_line`, hand back the raw request text.
    fn serve_once(status_line: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
                let done = line == "\r\n" || line.is_empty();
                head.push_str(&line);
                if done {
                    break;
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                status_line
            );
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            format!("{}{}", head, String::from_utf8_lossy(&body))
        });
        (base, handle)
    }

    fn payload() -> UpdatePayload {
        let raw = RawContentRecord::from_value(serde_json::json!({"id": "c1", "tweet": "Hi"}))
            .unwrap();
        let mut model = normalize(Some(&raw)).unwrap();
        model.set_channel_text(Channel::Tweet, "Hello");
        to_update_request(&model)
    }

    fn backend<C: CredentialSource>(base: &str, credentials: C) -> HttpContentBackend<C> {
        let config = ClientConfig::new(base, Duration::from_secs(5)).unwrap();
        HttpContentBackend::new(config, credentials)
    }

    #[test]
    fn success_sends_put_with_bearer_and_json_body() {
        let (base, server) = serve_once("204 No Content");
        let b = backend(&base, StaticToken("t0k".to_string()));
        b.update_content("c1", &payload()).unwrap();

        let request = server.join().unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("PUT /content/c1 HTTP/1.1"));
        assert!(lower.contains("authorization: bearer t0k"));
        assert!(request.ends_with(r#"{"tweet":"Hello"}"#));
    }

    #[test]
    fn unauthorized_without_token_is_save_failure() {
        let (base, server) = serve_once("401 Unauthorized");
        let b = backend(&base, StaticToken(String::new()));
        let err = b.update_content("c1", &payload()).unwrap_err();
        assert!(matches!(err, CoreError::SaveFailure { status: Some(401), .. }));

        let request = server.join().unwrap();
        assert!(!request.to_ascii_lowercase().contains("authorization:"));
    }

    #[test]
    fn server_error_keeps_status() {
        let (base, server) = serve_once("500 Internal Server Error");
        let b = backend(&base, StaticToken("t0k".to_string()));
        let err = b.update_content("c1", &payload()).unwrap_err();
        assert_eq!(err.to_string(), "save failed (HTTP 500): backend error");
        server.join().unwrap();
    }

    #[test]
    fn unreachable_backend_has_no_status() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let b = backend(&base, StaticToken("t0k".to_string()));
        let err = b.update_content("c1", &payload()).unwrap_err();
        assert!(matches!(err, CoreError::SaveFailure { status: None, .. }));
    }
}
