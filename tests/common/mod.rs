//! Shared test fixtures for the Pasar SDK integration tests.
//!
//! Provides sample API payloads and `serve_once()`, a one-shot local HTTP
//! stub standing in for the SP2KP export endpoint.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use pasar_sdk::{PriceEntry, VariantPrices};

/// Two commodities over Mon 2024-03-04 .. Wed 2024-03-06. Cabe Merah has no
/// price on 2024-03-05.
pub fn sample_variants() -> Vec<VariantPrices> {
    vec![
        VariantPrices {
            variant_id: Some(52),
            variant: "Beras Medium".into(),
            daftar_harga: vec![
                PriceEntry::new("2024-03-06", 1200),
                PriceEntry::new("2024-03-04", 1000),
                PriceEntry::new("2024-03-05", 1100),
            ],
        },
        VariantPrices {
            variant_id: Some(9),
            variant: "Cabe Merah".into(),
            daftar_harga: vec![
                PriceEntry::new("2024-03-04", 45000),
                PriceEntry::new("2024-03-06", 40000),
            ],
        },
    ]
}

pub fn sample_response_json() -> String {
    serde_json::json!({
        "status": "success",
        "message": "OK",
        "data": [
            {
                "variant_id": 52,
                "variant": "Beras Medium",
                "daftarHarga": [
                    {"date": "2024-03-04", "harga": 1000},
                    {"date": "2024-03-05", "harga": "1100"},
                    {"date": "2024-03-06", "harga": 1200}
                ]
            },
            {
                "variant_id": "9",
                "variant": "Cabe Merah",
                "daftarHarga": [
                    {"date": "2024-03-04", "harga": 45000},
                    {"date": "2024-03-06", "harga": 40000.0}
                ]
            }
        ]
    })
    .to_string()
}

/// A stub server that answers exactly one request.
pub struct StubServer {
    pub url: String,
    handle: JoinHandle<String>,
}

impl StubServer {
    /// Wait for the request to be served and return its raw text.
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

/// Bind an ephemeral port and answer the first request with `status` and
/// a JSON `body`.
pub fn serve_once(status: u16, body: &str) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/export", listener.local_addr().unwrap());
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let request = read_request(&mut stream);

        let reason = if status == 200 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });

    StubServer { url, handle }
}

/// An address nothing is listening on.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/export")
}

fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            return String::from_utf8_lossy(&buf).into_owned();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok());

    loop {
        let done = match content_length {
            Some(len) => buf.len() >= header_end + len,
            None => buf.ends_with(b"0\r\n\r\n"),
        };
        if done {
            break;
        }
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
