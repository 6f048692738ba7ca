//! In-memory backend and uploader fakes for state-layer tests.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{MemoApi, SettingsUpdate};
use crate::error::{Error, Result};
use crate::models::{Memo, MemoId};
use crate::upload::{UploadFile, Uploader};

#[derive(Debug, Default)]
struct Backend {
    password: String,
    memos: Vec<Memo>,
    next_id: i64,
    verify_calls: usize,
    list_calls: usize,
    fail_verify: bool,
    fail_list: bool,
    fail_write: bool,
}

/// Behaves like the memo backend, with one-shot failure switches.
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    backend: Arc<Mutex<Backend>>,
}

fn transport_failure(operation: &'static str) -> Error {
    Error::Status {
        operation,
        status: 503,
        body: "unavailable".to_string(),
    }
}

impl FakeApi {
    pub fn with_password(password: &str) -> Self {
        let api = Self::default();
        api.lock().password = password.to_string();
        api.lock().next_id = 100;
        api
    }

    fn lock(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().expect("fake backend lock")
    }

    pub fn seed(&self, memos: Vec<Memo>) {
        self.lock().memos = memos;
    }

    pub fn memos(&self) -> Vec<Memo> {
        self.lock().memos.clone()
    }

    pub fn password(&self) -> String {
        self.lock().password.clone()
    }

    pub fn verify_calls(&self) -> usize {
        self.lock().verify_calls
    }

    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    pub fn fail_next_verify(&self) {
        self.lock().fail_verify = true;
    }

    pub fn fail_next_list(&self) {
        self.lock().fail_list = true;
    }

    pub fn fail_next_write(&self) {
        self.lock().fail_write = true;
    }

    fn take_write_failure(&self, operation: &'static str) -> Result<()> {
        let mut backend = self.lock();
        if std::mem::take(&mut backend.fail_write) {
            return Err(transport_failure(operation));
        }
        Ok(())
    }
}

impl MemoApi for FakeApi {
    async fn verify_password(&self, password: &str) -> Result<bool> {
        let mut backend = self.lock();
        backend.verify_calls += 1;
        if std::mem::take(&mut backend.fail_verify) {
            return Err(transport_failure("Verify password"));
        }
        Ok(backend.password == password)
    }

    async fn list_memos(&self) -> Result<Vec<Memo>> {
        let mut backend = self.lock();
        backend.list_calls += 1;
        if std::mem::take(&mut backend.fail_list) {
            return Err(transport_failure("List memos"));
        }
        Ok(backend.memos.clone())
    }

    async fn create_memo(&self, title: &str, content: &str) -> Result<()> {
        self.take_write_failure("Create memo")?;
        let mut backend = self.lock();
        backend.next_id += 1;
        let id = backend.next_id;
        backend.memos.push(Memo::new(id, title, content));
        Ok(())
    }

    async fn update_memo(&self, id: &MemoId, title: &str, content: &str) -> Result<()> {
        self.take_write_failure("Update memo")?;
        let mut backend = self.lock();
        let memo = backend
            .memos
            .iter_mut()
            .find(|memo| &memo.id == id)
            .ok_or_else(|| transport_failure("Update memo"))?;
        memo.title = title.to_string();
        memo.content = content.to_string();
        Ok(())
    }

    async fn delete_memo(&self, id: &MemoId) -> Result<()> {
        self.take_write_failure("Delete memo")?;
        self.lock().memos.retain(|memo| &memo.id != id);
        Ok(())
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()> {
        self.take_write_failure("Update settings")?;
        if let Some(password) = &update.password {
            self.lock().password.clone_from(password);
        }
        Ok(())
    }
}

/// Returns a fixed URL, or always fails.
#[derive(Debug, Clone)]
pub struct FakeUploader {
    url: Option<String>,
}

impl FakeUploader {
    pub fn succeeding(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
        }
    }

    pub const fn failing() -> Self {
        Self { url: None }
    }
}

impl Uploader for FakeUploader {
    async fn upload(&self, _file: UploadFile) -> Result<String> {
        self.url
            .clone()
            .ok_or_else(|| Error::Upload("upload service unavailable".to_string()))
    }
}
