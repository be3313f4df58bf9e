use article_mark::{
    error::{Error, Result},
    export::{ExportContext, Exporter},
    model::ArticleRecord,
    service::Generator,
};
use std::{
    cell::RefCell,
    env,
    io::{Read, Write},
    net::TcpListener,
    path::PathBuf,
    rc::Rc,
    thread::{self, JoinHandle},
};

pub fn test_dir() -> PathBuf {
    env::current_dir()
        .expect("Unable to get working directory")
        .join("data")
}

#[allow(dead_code)] // Avoid a false positive on the dead code analysis.
pub fn mars() -> ArticleRecord {
    ArticleRecord::load(test_dir().join("mars.json")).expect("fixture should load")
}

/// Records what it was asked to export instead of writing anywhere.
#[allow(dead_code)] // Avoid a false positive on the dead code analysis.
#[derive(Clone, Default)]
pub struct TestExporter(Rc<RefCell<Option<(String, String)>>>);

impl TestExporter {
    #[allow(dead_code)] // Avoid a false positive on the dead code analysis.
    pub fn markdown(&self) -> String {
        self.take().0
    }

    #[allow(dead_code)] // Avoid a false positive on the dead code analysis.
    pub fn filename(&self) -> String {
        self.take().1
    }

    #[allow(dead_code)] // Avoid a false positive on the dead code analysis.
    fn take(&self) -> (String, String) {
        self.0.borrow_mut().take().expect("result was not set")
    }
}

impl Exporter for TestExporter {
    fn name(&self) -> &str {
        "test_exporter"
    }

    fn export(&self, ctx: &ExportContext<'_>) -> Result<()> {
        *self.0.borrow_mut() = Some((ctx.markdown.clone(), ctx.filename.clone()));

        Ok(())
    }
}

/// Answers every topic with the same article, or fails when it has none.
#[allow(dead_code)] // Avoid a false positive on the dead code analysis.
pub struct StubGenerator(pub Option<ArticleRecord>);

impl Generator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    fn generate(&self, topic: &str) -> Result<ArticleRecord> {
        match &self.0 {
            Some(article) => Ok(ArticleRecord {
                title: Some(String::from(topic)),
                ..article.clone()
            }),
            None => Err(Error::msg("service unavailable")),
        }
    }
}

/// Serve a single HTTP request on a local port.
///
/// Returns the endpoint URL and a handle yielding the raw request body.
#[allow(dead_code)] // Avoid a false positive on the dead code analysis.
pub fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("should bind");
    let endpoint = format!(
        "http://{}/generate-article",
        listener.local_addr().expect("should have an address")
    );
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("should accept");
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];

        let body_start = loop {
            let read = stream.read(&mut chunk).expect("should read");
            assert!(read > 0, "connection closed before headers");
            request.extend_from_slice(&chunk[..read]);

            if let Some(end) = find(&request, b"\r\n\r\n") {
                break end + 4;
            }
        };

        let headers = String::from_utf8_lossy(&request[..body_start]).to_lowercase();
        let length: usize = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map(|value| value.trim().parse().expect("should be a number"))
            .unwrap_or(0);

        while request.len() < body_start + length {
            let read = stream.read(&mut chunk).expect("should read");
            assert!(read > 0, "connection closed before body");
            request.extend_from_slice(&chunk[..read]);
        }

        stream
            .write_all(response.as_bytes())
            .expect("should respond");

        String::from_utf8_lossy(&request[body_start..body_start + length]).into_owned()
    });

    (endpoint, handle)
}

#[allow(dead_code)] // Avoid a false positive on the dead code analysis.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
