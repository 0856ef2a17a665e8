//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::info;

/// Create the given directory (and parents) if it is missing.
pub async fn ensure_dir(dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(dir).await.is_ok() {
        return Ok(());
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {dir}: {e}"))?;
    info!(%dir, "created missing directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_dir_creates_nested_path() -> anyhow::Result<()> {
        let base = std::env::temp_dir().join(format!("recall_env_{}", uuid::Uuid::new_v4()));
        let nested = base.join("uploads").join("pictures");
        let nested_str = nested.to_string_lossy().to_string();

        ensure_dir(&nested_str).await?;
        assert!(tokio::fs::metadata(&nested).await?.is_dir());
        // second call is a no-op
        ensure_dir(&nested_str).await?;

        let _ = tokio::fs::remove_dir_all(&base).await;
        Ok(())
    }
}
