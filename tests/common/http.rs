use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub enum Reply {
  Json(u16, String),
  Stall(Duration),
}

/// One-request-per-connection HTTP server on a random local port.
///
/// `handler` receives the request line (`GET /path?query HTTP/1.1`).
pub struct LocalServer {
  pub base_url: String,
  pub requests: Arc<Mutex<Vec<String>>>,
}

impl LocalServer {
  pub async fn start<H>(handler: H) -> LocalServer
  where
    H: Fn(&str) -> Reply + Send + Sync + 'static,
  {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);

    let seen = requests.clone();
    tokio::spawn(async move {
      loop {
        let Ok((mut socket, _)) = listener.accept().await else {
          return;
        };
        let handler = handler.clone();
        let seen = seen.clone();
        tokio::spawn(async move {
          let mut head = Vec::new();
          let mut buf = [0u8; 1024];
          while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
              Ok(0) | Err(_) => return,
              Ok(n) => head.extend_from_slice(&buf[..n]),
            }
          }
          let head = String::from_utf8_lossy(&head).to_string();
          let request_line = head.lines().next().unwrap_or_default().to_string();
          seen.lock().unwrap().push(request_line.clone());

          match (handler.as_ref())(&request_line) {
            Reply::Json(status, body) => {
              let reason = if status == 200 { "OK" } else { "Error" };
              let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
              );
              let _ = socket.write_all(response.as_bytes()).await;
              let _ = socket.shutdown().await;
            }
            Reply::Stall(duration) => tokio::time::sleep(duration).await,
          }
        });
      }
    });

    LocalServer { base_url, requests }
  }

  pub fn requests(&self) -> Vec<String> {
    self.requests.lock().unwrap().clone()
  }
}
