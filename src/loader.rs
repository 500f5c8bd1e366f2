use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

/// Raw text content plus display name for one side of a comparison.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub generation: u64,
    pub left: PathBuf,
    pub right: PathBuf,
}

/// Both documents or neither: the diff never runs on partial data.
#[derive(Debug)]
pub struct FetchResult {
    pub generation: u64,
    pub documents: Result<(LoadedDocument, LoadedDocument), String>,
}

/// Background loader for comparison document pairs.
///
/// Requests carry a generation counter; the app drops results older than its
/// latest request, so a slow read can never clobber a newer comparison.
pub struct DocumentWorker {
    request_tx: mpsc::UnboundedSender<FetchRequest>,
    result_rx: mpsc::UnboundedReceiver<FetchResult>,
}

impl DocumentWorker {
    pub fn new() -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<FetchRequest>();
        let (result_tx, result_rx) = mpsc::unbounded_channel::<FetchResult>();

        tokio::spawn(async move {
            while let Some(request) = request_rx.recv().await {
                let tx = result_tx.clone();
                tokio::spawn(async move {
                    // Both reads issued concurrently; completion waits on both.
                    let (left, right) = tokio::join!(
                        load_document(&request.left),
                        load_document(&request.right)
                    );
                    let documents = match (left, right) {
                        (Ok(l), Ok(r)) => Ok((l, r)),
                        (Err(e), _) | (_, Err(e)) => Err(e),
                    };
                    let _ = tx.send(FetchResult {
                        generation: request.generation,
                        documents,
                    });
                });
            }
        });

        Self {
            request_tx,
            result_rx,
        }
    }

    pub fn request(&self, req: FetchRequest) {
        let _ = self.request_tx.send(req);
    }

    pub fn try_recv(&mut self) -> Option<FetchResult> {
        self.result_rx.try_recv().ok()
    }
}

async fn load_document(path: &Path) -> Result<LoadedDocument, String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("{}: {e}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(LoadedDocument { file_name, content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("specdiff-test-{}-{name}", std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_loads_both_documents() {
        let left = temp_file("left.yaml", "openapi: 3.0.0\n");
        let right = temp_file("right.yaml", "openapi: 3.1.0\n");

        let mut worker = DocumentWorker::new();
        worker.request(FetchRequest {
            generation: 1,
            left: left.clone(),
            right: right.clone(),
        });

        let result = loop {
            if let Some(r) = worker.try_recv() {
                break r;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        };

        assert_eq!(result.generation, 1);
        let (l, r) = result.documents.unwrap();
        assert_eq!(l.content, "openapi: 3.0.0\n");
        assert_eq!(r.content, "openapi: 3.1.0\n");
        assert_eq!(l.file_name, format!("specdiff-test-{}-left.yaml", std::process::id()));

        let _ = std::fs::remove_file(left);
        let _ = std::fs::remove_file(right);
    }

    #[tokio::test]
    async fn test_missing_file_fails_the_pair() {
        let left = temp_file("only.yaml", "a\n");

        let mut worker = DocumentWorker::new();
        worker.request(FetchRequest {
            generation: 3,
            left: left.clone(),
            right: PathBuf::from("/nonexistent/specdiff/other.yaml"),
        });

        let result = loop {
            if let Some(r) = worker.try_recv() {
                break r;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        };

        // One good document is not enough; the whole fetch reports the error.
        assert!(result.documents.is_err());

        let _ = std::fs::remove_file(left);
    }
}
