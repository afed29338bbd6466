// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use renderdeck_server::{build_router, AppState, ServerConfig};
use std::net::SocketAddr;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const BOUNDARY: &str = "renderdeck-test-boundary";

pub struct RawResponse {
    pub status: u16,
    pub head: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf8 body")
    }
}

pub fn config_for(data_root: &Path) -> ServerConfig {
    ServerConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        data_root: data_root.to_path_buf(),
        ..ServerConfig::default()
    }
}

pub async fn spawn_app(state: AppState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

pub async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: &[u8],
) -> RawResponse {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\nContent-Length: {}\r\n",
        body.len()
    );
    for (name, value) in headers {
        req.push_str(&format!("{name}: {value}\r\n"));
    }
    req.push_str("\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request head");
    stream.write_all(body).await.expect("write request body");
    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .expect("read response");
    let split = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("http response separator");
    let head = String::from_utf8(response[..split].to_vec()).expect("utf8 head");
    let body = response[split + 4..].to_vec();
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    RawResponse { status, head, body }
}

pub async fn get(addr: SocketAddr, path: &str) -> RawResponse {
    send_raw(addr, "GET", path, &[], b"").await
}

pub async fn send_json(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: &serde_json::Value,
) -> RawResponse {
    let bytes = serde_json::to_vec(body).expect("encode body");
    send_raw(
        addr,
        method,
        path,
        &[("Content-Type", "application/json")],
        &bytes,
    )
    .await
}

pub enum Part<'a> {
    File(&'a str, &'a [u8]),
    Text(&'a str, &'a str),
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File(name, bytes) => {
                out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{name}.bin\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(bytes);
            }
            Part::Text(name, value) => {
                out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    out
}

/// A complete upload; `overrides` replace the default text value of a field.
pub fn full_upload(overrides: &[(&str, &str)]) -> Vec<u8> {
    let value = |name: &str, default: &'static str| -> String {
        overrides
            .iter()
            .find(|(k, _)| *k == name)
            .map_or(default.to_string(), |(_, v)| (*v).to_string())
    };
    let depth = value("depthCorrectionFactor", "0.5");
    let sx = value("scaleX", "1");
    let sy = value("scaleY", "2.5");
    let sz = value("scaleZ", "-3");
    multipart_body(&[
        Part::File("thumbnail", b"\xff\xd8\xffjpeg"),
        Part::File("cameras", b"cam 1\n"),
        Part::File("images", b"img 1\n"),
        Part::File("bundle", b"bundle-bytes"),
        Part::Text("depthCorrectionFactor", &depth),
        Part::Text("scaleX", &sx),
        Part::Text("scaleY", &sy),
        Part::Text("scaleZ", &sz),
    ])
}

pub async fn upload(addr: SocketAddr, body: &[u8]) -> RawResponse {
    let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
    send_raw(
        addr,
        "POST",
        "/renderings",
        &[("Content-Type", content_type.as_str())],
        body,
    )
    .await
}
