use crate::options::PageOrderContext;
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Count the pages of a PDF document
pub async fn load_pdf_page_count(path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let count = tokio::task::spawn_blocking(move || {
        Document::load_mem(&bytes).map(|doc| doc.get_pages().len())
    })
    .await??;
    log::debug!("{}: {} page(s)", path.display(), count);
    Ok(count)
}

/// Build a context from PDF files, in the order given
pub async fn load_context(paths: &[impl AsRef<Path>], grid: GridShape) -> Result<PageOrderContext> {
    if paths.is_empty() {
        return Err(PageOrderError::NoFiles);
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let page_count = load_pdf_page_count(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(SourceFile::new(name, page_count));
    }

    Ok(PageOrderContext::new(files, grid))
}
