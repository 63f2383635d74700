use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::app::domain::session::LoadTicket;
use crate::app::infrastructure::error::{AppError, Result};

/// Where example source text comes from.
pub trait SampleSource: Send + Sync {
    /// Text of `sample.<key>.txt`, where `key` is a lowercased language name.
    fn fetch(&self, key: &str) -> Result<String>;
}

pub fn sample_file_name(key: &str) -> String {
    format!("sample.{}.txt", key)
}

/// Samples compiled into the binary.
pub struct BundledSamples;

const BUNDLED: &[(&str, &str)] = &[
    ("javascript", include_str!("../../../samples/sample.javascript.txt")),
    ("jsx", include_str!("../../../samples/sample.jsx.txt")),
    ("typescript", include_str!("../../../samples/sample.typescript.txt")),
    ("json", include_str!("../../../samples/sample.json.txt")),
    ("html", include_str!("../../../samples/sample.html.txt")),
    ("css", include_str!("../../../samples/sample.css.txt")),
    ("python", include_str!("../../../samples/sample.python.txt")),
    ("markdown", include_str!("../../../samples/sample.markdown.txt")),
    ("xml", include_str!("../../../samples/sample.xml.txt")),
    ("sql", include_str!("../../../samples/sample.sql.txt")),
    ("mysql", include_str!("../../../samples/sample.mysql.txt")),
    ("pgsql", include_str!("../../../samples/sample.pgsql.txt")),
    ("java", include_str!("../../../samples/sample.java.txt")),
    ("rust", include_str!("../../../samples/sample.rust.txt")),
    ("cpp", include_str!("../../../samples/sample.cpp.txt")),
    ("php", include_str!("../../../samples/sample.php.txt")),
    ("go", include_str!("../../../samples/sample.go.txt")),
    ("ruby", include_str!("../../../samples/sample.ruby.txt")),
    ("shell", include_str!("../../../samples/sample.shell.txt")),
    ("lua", include_str!("../../../samples/sample.lua.txt")),
    ("yaml", include_str!("../../../samples/sample.yaml.txt")),
];

impl BundledSamples {
    pub fn keys() -> impl Iterator<Item = &'static str> {
        BUNDLED.iter().map(|(key, _)| *key)
    }
}

impl SampleSource for BundledSamples {
    fn fetch(&self, key: &str) -> Result<String> {
        BUNDLED
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| text.to_string())
            .ok_or_else(|| AppError::SampleUnavailable(key.to_string()))
    }
}

/// Samples read from a directory on disk.
pub struct DirectorySamples {
    root: PathBuf,
}

impl DirectorySamples {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SampleSource for DirectorySamples {
    fn fetch(&self, key: &str) -> Result<String> {
        let path = self.root.join(sample_file_name(key));
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AppError::SampleUnavailable(key.to_string()),
            _ => AppError::Io(e),
        })
    }
}

/// Tries each source in order; the first hit wins.
pub struct LayeredSamples {
    layers: Vec<Box<dyn SampleSource>>,
}

impl LayeredSamples {
    pub fn new(layers: Vec<Box<dyn SampleSource>>) -> Self {
        Self { layers }
    }
}

impl SampleSource for LayeredSamples {
    fn fetch(&self, key: &str) -> Result<String> {
        let mut last_err = AppError::SampleUnavailable(key.to_string());
        for layer in &self.layers {
            match layer.fetch(key) {
                Ok(text) => return Ok(text),
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }
}

/// Fetches samples off the UI thread.
#[derive(Clone)]
pub struct SampleLoader {
    source: Arc<dyn SampleSource>,
}

impl SampleLoader {
    pub fn new(source: Arc<dyn SampleSource>) -> Self {
        Self { source }
    }

    /// Bundled samples, overridden by `dir` when given.
    pub fn from_settings(dir: Option<PathBuf>) -> Self {
        let source: Arc<dyn SampleSource> = match dir {
            Some(dir) => Arc::new(LayeredSamples::new(vec![
                Box::new(DirectorySamples::new(dir)),
                Box::new(BundledSamples),
            ])),
            None => Arc::new(BundledSamples),
        };
        Self::new(source)
    }

    #[cfg(test)]
    pub(crate) fn fetch_blocking(&self, ticket: &LoadTicket) -> Result<String> {
        self.source.fetch(&ticket.sample_key())
    }

    /// Fetch on a worker thread and hand the outcome to `done` there. If no
    /// thread can be started, `done` runs on the caller with the spawn error.
    pub fn request<F>(&self, ticket: LoadTicket, done: F)
    where
        F: FnOnce(LoadTicket, Result<String>) + Send + 'static,
    {
        self.request_with(ticket, done, |name, job| {
            thread::Builder::new().name(name).spawn(job).map(|_| ())
        });
    }

    fn request_with<F, S>(&self, ticket: LoadTicket, done: F, spawn: S)
    where
        F: FnOnce(LoadTicket, Result<String>) + Send + 'static,
        S: FnOnce(String, Box<dyn FnOnce() + Send>) -> io::Result<()>,
    {
        let name = format!("sample-{}", ticket.token.0);
        let pending = Arc::new(Mutex::new(Some((ticket, done))));

        let source = Arc::clone(&self.source);
        let worker_pending = Arc::clone(&pending);
        let job: Box<dyn FnOnce() + Send> = Box::new(move || {
            if let Some((ticket, done)) = take_pending(&worker_pending) {
                let result = source.fetch(&ticket.sample_key());
                done(ticket, result);
            }
        });

        if let Err(e) = spawn(name, job) {
            log::error!("Could not start sample fetch: {}", e);
            if let Some((ticket, done)) = take_pending(&pending) {
                done(ticket, Err(AppError::Io(e)));
            }
        }
    }
}

fn take_pending<T>(slot: &Mutex<Option<T>>) -> Option<T> {
    match slot.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::language::LanguageRegistry;
    use crate::app::domain::session::RequestToken;
    use std::sync::mpsc;
    use std::time::Duration;

    fn ticket(language: &str) -> LoadTicket {
        LoadTicket {
            token: RequestToken(1),
            language: language.to_string(),
        }
    }

    #[test]
    fn test_sample_file_name() {
        assert_eq!(sample_file_name("rust"), "sample.rust.txt");
    }

    #[test]
    fn test_bundled_keys_are_registered_languages() {
        let registry = LanguageRegistry::new();
        for key in BundledSamples::keys() {
            assert!(registry.lookup(key).is_some(), "{} is not a language", key);
        }
    }

    #[test]
    fn test_bundled_javascript_exists() {
        let text = BundledSamples.fetch("javascript").unwrap();
        assert!(!text.is_empty());
    }

    #[test]
    fn test_bundled_missing_sample() {
        let err = BundledSamples.fetch("swift").unwrap_err();
        assert!(matches!(err, AppError::SampleUnavailable(ref k) if k == "swift"));
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sample.go.txt"), "package main\n").unwrap();
        let source = DirectorySamples::new(dir.path());

        assert_eq!(source.fetch("go").unwrap(), "package main\n");
        assert!(matches!(source.fetch("tcl"), Err(AppError::SampleUnavailable(_))));
    }

    #[test]
    fn test_layered_prefers_first_layer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sample.javascript.txt"), "custom();").unwrap();
        let source = LayeredSamples::new(vec![
            Box::new(DirectorySamples::new(dir.path())),
            Box::new(BundledSamples),
        ]);

        assert_eq!(source.fetch("javascript").unwrap(), "custom();");
        assert!(source.fetch("rust").unwrap().contains("fn "));
        assert!(source.fetch("vb").is_err());
    }

    #[test]
    fn test_loader_lowercases_key() {
        let loader = SampleLoader::from_settings(None);
        assert!(loader.fetch_blocking(&ticket("JavaScript")).is_ok());
    }

    #[test]
    fn test_request_reports_on_worker() {
        let loader = SampleLoader::from_settings(None);
        let (tx, rx) = mpsc::channel();
        loader.request(ticket("python"), move |ticket, result| {
            let _ = tx.send((ticket, result.is_ok()));
        });
        let (ticket, ok) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(ticket.language, "python");
        assert!(ok);
    }

    #[test]
    fn test_spawn_failure_still_reports() {
        let loader = SampleLoader::from_settings(None);
        let (tx, rx) = mpsc::channel();
        loader.request_with(
            ticket("rust"),
            move |ticket, result| {
                let _ = tx.send((ticket, result));
            },
            |_, _| Err(io::Error::other("no threads left")),
        );

        let (ticket, result) = rx.try_recv().unwrap();
        assert_eq!(ticket.language, "rust");
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_fetch_failure_on_worker_reports_error() {
        let loader = SampleLoader::from_settings(None);
        let (tx, rx) = mpsc::channel();
        loader.request(ticket("swift"), move |_, result| {
            let _ = tx.send(result);
        });
        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(result, Err(AppError::SampleUnavailable(_))));
    }
}
