// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use remould_app::ImageRequestId;
use remould_tui::{AppRuntime, ImageReadEvent, InternalEvent};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::{debug, warn};

/// Reads room photos from the local filesystem.
#[derive(Debug, Clone)]
pub struct FsRuntime {
    max_image_size: u64,
}

impl FsRuntime {
    pub fn new(max_image_size: u64) -> Self {
        Self { max_image_size }
    }
}

impl AppRuntime for FsRuntime {
    fn read_image(&mut self, source: &str) -> Result<String> {
        read_image_data_uri(&resolve_source(source), self.max_image_size)
    }

    fn spawn_image_read(
        &mut self,
        request_id: ImageRequestId,
        source: &str,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let path = resolve_source(source);
        let max_image_size = self.max_image_size;
        thread::Builder::new()
            .name(format!("image-read-{}", request_id.get()))
            .spawn(move || {
                let event = match read_image_data_uri(&path, max_image_size) {
                    Ok(data_uri) => ImageReadEvent::Loaded {
                        request_id,
                        data_uri,
                    },
                    Err(error) => {
                        warn!(request = request_id.get(), %error, "image read failed");
                        ImageReadEvent::Failed {
                            request_id,
                            error: format!("{error:#}"),
                        }
                    }
                };
                let _ = tx.send(InternalEvent::ImageRead(event));
            })
            .context("spawn image reader thread")?;
        Ok(())
    }
}

/// Expands a leading `~/` to the home directory.
fn resolve_source(source: &str) -> PathBuf {
    let trimmed = source.trim();
    if let Some(rest) = trimmed.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(trimmed)
}

pub fn image_mime_type(path: &Path) -> Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| {
            anyhow!(
                "{} has no file extension -- choose a png, jpeg, gif, webp, bmp or svg image and retry",
                path.display()
            )
        })?;

    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        other => bail!(
            "{} is not an image (.{other}) -- choose a png, jpeg, gif, webp, bmp or svg image and retry",
            path.display()
        ),
    };
    Ok(mime)
}

pub fn read_image_data_uri(path: &Path, max_image_size: u64) -> Result<String> {
    let mime = image_mime_type(path)?;
    let metadata =
        fs::metadata(path).with_context(|| format!("read image {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a file -- choose an image file and retry", path.display());
    }
    if metadata.len() > max_image_size {
        bail!(
            "image is {} bytes but max allowed is {}; shrink the file and retry",
            metadata.len(),
            max_image_size
        );
    }

    let data = fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    debug!(path = %path.display(), bytes = data.len(), mime, "image read");
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(&data)))
}
