//! Async front end for [`DocumentPipeline`].
//!
//! Generation is CPU-bound and synchronous, so each call runs on tokio's
//! blocking pool. If the task panics or is aborted the caller gets
//! [`Error::Cancelled`]; the document lived inside the task and was never
//! marked generated.

use crate::error::{Error, Result};
use crate::pipeline::{DocumentPipeline, FileReceipt, GenerationOutput};
use crate::render::Renderer;
use crate::request::DocumentRequest;
use crate::style::Style;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::{self, JoinError};

/// Shares one pipeline across async tasks.
#[derive(Debug)]
pub struct AsyncPipeline<R: Renderer + 'static> {
    inner: Arc<DocumentPipeline<R>>,
}

impl<R: Renderer + 'static> Clone for AsyncPipeline<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Renderer + 'static> AsyncPipeline<R> {
    pub fn new(pipeline: DocumentPipeline<R>) -> Self {
        Self {
            inner: Arc::new(pipeline),
        }
    }

    /// Get the wrapped pipeline.
    pub fn pipeline(&self) -> &DocumentPipeline<R> {
        &self.inner
    }

    /// Generate a document into memory on the blocking pool.
    pub async fn execute(&self, request: DocumentRequest) -> Result<GenerationOutput> {
        self.execute_with_style(request, None).await
    }

    /// Generate a document into memory using an explicit base style.
    pub async fn execute_with_style(
        &self,
        request: DocumentRequest,
        base: Option<Style>,
    ) -> Result<GenerationOutput> {
        let pipeline = Arc::clone(&self.inner);
        task::spawn_blocking(move || pipeline.execute_with_style(&request, base.as_ref()))
            .await
            .map_err(cancelled)?
    }

    /// Generate a document into `dir` on the blocking pool.
    pub async fn execute_to_file(
        &self,
        request: DocumentRequest,
        dir: impl Into<PathBuf>,
    ) -> Result<FileReceipt> {
        self.execute_to_file_with_style(request, dir, None).await
    }

    /// Generate a document into `dir` using an explicit base style.
    pub async fn execute_to_file_with_style(
        &self,
        request: DocumentRequest,
        dir: impl Into<PathBuf>,
        base: Option<Style>,
    ) -> Result<FileReceipt> {
        let pipeline = Arc::clone(&self.inner);
        let dir = dir.into();
        task::spawn_blocking(move || {
            pipeline.execute_to_file_with_style(&request, &dir, base.as_ref())
        })
        .await
        .map_err(cancelled)?
    }

    /// Generate many documents; results keep input order.
    pub async fn execute_batch(
        &self,
        requests: Vec<DocumentRequest>,
    ) -> Result<Vec<Result<GenerationOutput>>> {
        let pipeline = Arc::clone(&self.inner);
        task::spawn_blocking(move || pipeline.execute_batch(&requests))
            .await
            .map_err(cancelled)
    }
}

fn cancelled(err: JoinError) -> Error {
    if err.is_panic() {
        Error::Cancelled("generation task panicked".to_string())
    } else {
        Error::Cancelled(err.to_string())
    }
}
