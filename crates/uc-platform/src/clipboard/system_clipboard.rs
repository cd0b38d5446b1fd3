//! System clipboard adapter backed by `clipboard-rs`.
//!
//! All clipboard calls happen on one dedicated OS thread that owns the
//! `ClipboardContext` for the life of the process. Some backends (X11) only
//! serve a written selection while the context that wrote it is alive, and
//! some contexts are not `Send`, so the context never leaves that thread.
//! Async callers talk to it through a request channel and wait for the reply
//! with a timeout; a stuck clipboard owner turns into `ClipboardError::Timeout`.

use std::time::Duration;

use async_trait::async_trait;
use clipboard_rs::common::RustImage;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat, RustImageData};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};
use uc_core::ports::{ClipboardError, ClipboardPort};
use uc_core::ClipboardContent;

enum Request {
    Read(oneshot::Sender<Result<Option<ClipboardContent>, ClipboardError>>),
    Write(
        ClipboardContent,
        oneshot::Sender<Result<(), ClipboardError>>,
    ),
}

pub struct SystemClipboard {
    requests: mpsc::UnboundedSender<Request>,
    timeout: Duration,
}

impl SystemClipboard {
    /// Start the clipboard thread. Creation errors of the underlying context
    /// are reported on every later call instead of failing here.
    pub fn new(timeout: Duration) -> std::io::Result<Self> {
        let (requests, rx) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("uc-clipboard".into())
            .spawn(move || serve(rx))?;
        Ok(Self { requests, timeout })
    }

    async fn call<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T, ClipboardError>>) -> Request,
    ) -> Result<T, ClipboardError> {
        let (tx, rx) = oneshot::channel();
        self.requests
            .send(make(tx))
            .map_err(|_| ClipboardError::Backend("clipboard thread stopped".into()))?;

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(ClipboardError::Backend("clipboard thread dropped request".into())),
            Err(_) => Err(ClipboardError::Timeout),
        }
    }
}

#[async_trait]
impl ClipboardPort for SystemClipboard {
    async fn read_current(&self) -> Result<Option<ClipboardContent>, ClipboardError> {
        self.call(Request::Read).await
    }

    async fn write_content(&self, content: ClipboardContent) -> Result<(), ClipboardError> {
        self.call(|tx| Request::Write(content, tx)).await
    }
}

fn backend_err(e: impl std::fmt::Display) -> ClipboardError {
    ClipboardError::Backend(e.to_string())
}

fn serve(mut rx: mpsc::UnboundedReceiver<Request>) {
    let ctx = match ClipboardContext::new() {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            error!(error = %e, "failed to open system clipboard");
            None
        }
    };

    while let Some(request) = rx.blocking_recv() {
        match request {
            Request::Read(reply) => {
                let result = match &ctx {
                    Some(ctx) => read(ctx),
                    None => Err(ClipboardError::Backend("clipboard unavailable".into())),
                };
                let _ = reply.send(result);
            }
            Request::Write(content, reply) => {
                let result = match &ctx {
                    Some(ctx) => write(ctx, content),
                    None => Err(ClipboardError::Backend("clipboard unavailable".into())),
                };
                let _ = reply.send(result);
            }
        }
    }
    debug!("clipboard thread stopped");
}

/// Text wins over image when both are present.
fn read(ctx: &ClipboardContext) -> Result<Option<ClipboardContent>, ClipboardError> {
    if ctx.has(ContentFormat::Text) {
        match ctx.get_text() {
            Ok(text) if !text.is_empty() => return Ok(Some(ClipboardContent::text(text))),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "failed to read clipboard text"),
        }
    }

    if ctx.has(ContentFormat::Image) {
        let image = ctx.get_image().map_err(backend_err)?;
        let png = image.to_png().map_err(backend_err)?;
        let bytes = png.get_bytes().to_vec();
        if !bytes.is_empty() {
            return Ok(Some(ClipboardContent::image(bytes)));
        }
    }

    Ok(None)
}

fn write(ctx: &ClipboardContext, content: ClipboardContent) -> Result<(), ClipboardError> {
    match content {
        ClipboardContent::Text(text) => ctx.set_text(text).map_err(backend_err),
        ClipboardContent::Image(bytes) => {
            let image = RustImageData::from_bytes(&bytes)
                .map_err(|e| ClipboardError::Unsupported(e.to_string()))?;
            ctx.set_image(image).map_err(backend_err)
        }
    }
}
