use crate::client::{ApiRequest, ApiResponse, HttpBackend};
use crate::error::{FactoryError, Result};
use reqwest::{Method, StatusCode};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A repository with one commit and no remote.
pub(crate) fn create_test_repo() -> TempDir {
    create_repo(None)
}

/// A repository with one commit and an `origin` remote at `remote_url`.
pub(crate) fn create_test_repo_with_remote(remote_url: &str) -> TempDir {
    create_repo(Some(remote_url))
}

fn create_repo(remote_url: Option<&str>) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    if let Some(url) = remote_url {
        git(path, &["remote", "add", "origin", url]);
    }

    temp_dir
}

fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

struct Route {
    method: Method,
    url: String,
    responses: VecDeque<ApiResponse>,
}

/// HTTP backend that answers from a script and records every request.
///
/// Routes match on method and URL with the query string removed. Responses
/// queued on a route are served in order; the last one repeats forever.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    routes: RefCell<Vec<Route>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method url`.
    pub(crate) fn respond(self, method: Method, url: &str, status: u16, body: &str) -> Self {
        let response = ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.as_bytes().to_vec(),
        };
        {
            let mut routes = self.routes.borrow_mut();
            match routes
                .iter_mut()
                .find(|route| route.method == method && route.url == url)
            {
                Some(route) => route.responses.push_back(response),
                None => routes.push(Route {
                    method,
                    url: url.to_string(),
                    responses: VecDeque::from([response]),
                }),
            }
        }
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// Number of requests sent to `method url`, ignoring query strings.
    pub(crate) fn count(&self, method: &Method, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| &request.method == method && strip_query(&request.url) == url)
            .count()
    }
}

impl HttpBackend for ScriptedBackend {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.borrow_mut().push(request.clone());

        let url = strip_query(&request.url);
        let mut routes = self.routes.borrow_mut();
        let route = routes
            .iter_mut()
            .find(|route| route.method == request.method && route.url == url)
            .ok_or_else(|| {
                FactoryError::Transport(format!(
                    "no scripted response for {} {}",
                    request.method, request.url
                ))
            })?;

        let response = if route.responses.len() > 1 {
            route.responses.pop_front()
        } else {
            route.responses.front().cloned()
        };
        response.ok_or_else(|| FactoryError::Transport("empty script".to_string()))
    }
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
