use crate::core::variants::VariantPipeline;
use crate::core::{ConfigProvider, ContentHandle, ContentResolver, Storage, VariantPaths, VariantReport};
use crate::utils::error::{Result, VariantError};
use crate::utils::monitor::ResourceMonitor;
use std::path::PathBuf;
use std::sync::Arc;

/// Runs the pipeline off the async executor, one blocking worker per call.
pub struct VariantEngine<R: ContentResolver, S: Storage, C: ConfigProvider> {
    pipeline: Arc<VariantPipeline<R, S, C>>,
    monitor: ResourceMonitor,
}

impl<R, S, C> VariantEngine<R, S, C>
where
    R: ContentResolver + 'static,
    S: Storage + 'static,
    C: ConfigProvider + 'static,
{
    pub fn new(pipeline: VariantPipeline<R, S, C>) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: VariantPipeline<R, S, C>, monitor_enabled: bool) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            monitor: ResourceMonitor::new(monitor_enabled),
        }
    }

    pub fn monitor(&self) -> &ResourceMonitor {
        &self.monitor
    }

    pub async fn derive(&self, handle: ContentHandle) -> Result<VariantReport> {
        tracing::info!(%handle, "Deriving image variants");
        let pipeline = Arc::clone(&self.pipeline);
        let task_handle = handle.clone();
        let result = tokio::task::spawn_blocking(move || pipeline.derive(&task_handle))
            .await
            .map_err(|e| VariantError::TaskFailed {
                message: e.to_string(),
            })
            .and_then(|inner| inner);
        self.monitor.log_stats("derive");

        match &result {
            Ok(report) => tracing::info!(
                %handle,
                original = %report.paths.original,
                preview = %report.paths.preview,
                "Image variants ready"
            ),
            Err(e) => tracing::warn!(%handle, kind = ?e.kind(), "Image variants failed: {}", e),
        }
        result
    }

    /// Empty `VariantPaths` instead of an error; the failure is only logged.
    pub async fn derive_or_empty(&self, handle: ContentHandle) -> VariantPaths {
        self.derive(handle)
            .await
            .map(|report| report.paths)
            .unwrap_or_else(|_| VariantPaths::empty())
    }

    /// Handles are processed one after another, never concurrently.
    pub async fn derive_all(&self, handles: Vec<ContentHandle>) -> Vec<Result<VariantReport>> {
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(self.derive(handle).await);
        }
        results
    }

    pub async fn copy_video(&self, handle: ContentHandle) -> Result<PathBuf> {
        tracing::info!(%handle, "Copying video to cache");
        let pipeline = Arc::clone(&self.pipeline);
        let task_handle = handle.clone();
        let result = tokio::task::spawn_blocking(move || pipeline.copy_video(&task_handle))
            .await
            .map_err(|e| VariantError::TaskFailed {
                message: e.to_string(),
            })
            .and_then(|inner| inner);
        self.monitor.log_stats("copy_video");

        if let Err(e) = &result {
            tracing::warn!(%handle, kind = ?e.kind(), "Video copy failed: {}", e);
        }
        result
    }

    /// Cached path, or an empty string when the copy failed.
    pub async fn copy_video_or_empty(&self, handle: ContentHandle) -> String {
        self.copy_video(handle)
            .await
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
