//! Common test utilities for integration tests

use std::io::{Cursor, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Builds an in-memory ZIP archive with the given entries.
#[allow(dead_code)]
pub fn build_zip(files: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::FileOptions;
    use zip::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in files {
        if name.ends_with('/') {
            zip.add_directory(name.trim_end_matches('/'), options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
    }

    zip.finish().unwrap().into_inner()
}

/// Archive laid out like `defoldsdk_headers.zip`, plus entries that must be skipped.
#[allow(dead_code)]
pub fn sample_sdk_archive() -> Vec<u8> {
    build_zip(&[
        ("defoldsdk/sdk/include/dmsdk/", b"".as_slice()),
        ("defoldsdk/sdk/include/dmsdk/a.h", SAMPLE_HEADER),
        ("defoldsdk/sdk/include/dmsdk/sub/b.h", b"#pragma once\r\nint b;\r\n".as_slice()),
        ("other/file.txt", b"not a header".as_slice()),
    ])
}

#[allow(dead_code)]
pub const SAMPLE_HEADER: &[u8] = b"#ifndef A_H\n#define A_H\nstatic const char k[] = \"\\xff\\x00\";\n#endif\n";

/// Collects every file below `root` as a sorted list of relative paths.
#[allow(dead_code)]
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Minimal HTTP/1.1 server answering every request with one canned response.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn start(status: u16, body: Vec<u8>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();
        let body = Arc::new(body);

        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                let seen = seen.clone();
                let body = body.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    loop {
                        let n = socket.read(&mut chunk).await.unwrap_or(0);
                        if n == 0 {
                            break;
                        }
                        buf.extend_from_slice(&chunk[..n]);
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }

                    let request = String::from_utf8_lossy(&buf);
                    let path = request
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or_default()
                        .to_string();
                    seen.lock().unwrap().push(path);

                    let reason = if status == 200 { "OK" } else { "Error" };
                    let head = format!(
                        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nContent-Type: application/zip\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    let _ = socket.write_all(head.as_bytes()).await;
                    let _ = socket.write_all(&body).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { addr, requests }
    }

    pub fn host(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn request_paths(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
