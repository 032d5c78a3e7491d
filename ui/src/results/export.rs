use dioxus::prelude::*;

use api::ReportFile;

use crate::results::orchestrator::ReportStatus;

#[component]
pub fn ReportPanel(status: ReportStatus, on_generate: EventHandler<()>) -> Element {
    let busy = matches!(status, ReportStatus::Working);

    let feedback = match &status {
        ReportStatus::Idle => None,
        ReportStatus::Working => Some((
            "results-card__meta".to_string(),
            "Preparing report…".to_string(),
        )),
        ReportStatus::Done(message) => Some((
            "results-card__meta results-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ReportStatus::Failed(notice) => Some((
            "results-card__meta results-card__meta--error".to_string(),
            format!("⚠️ {notice}"),
        )),
    };

    rsx! {
        section { class: "results-card results-export",
            div { class: "results-card__header",
                h2 { "Report" }
            }
            p { "Download a PDF summary with the tables and chart above." }

            div { class: "results-export__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy,
                    onclick: move |_| on_generate.call(()),
                    "Generate PDF Report"
                }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", role: "status", "{message}" }
            }
        }
    }
}

/// Hands a generated report to the user.
///
/// Returns the saved path on targets that write to disk, `None` when the
/// browser took over the download.
pub(crate) async fn deliver_report(file: &ReportFile) -> Result<Option<String>, String> {
    let mime = file.content_type.as_deref().unwrap_or("application/pdf");
    download_bytes(&file.filename, mime, &file.bytes).await
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: &[u8],
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let dir = crate::core::platform::reports_dir()?;
        let path = write_report(&dir, filename, bytes)?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

/// Writes `bytes` into `dir`, keeping only the final component of `filename`.
///
/// The report only appears under its name once fully written; a failed write
/// leaves nothing behind.
#[cfg(not(target_arch = "wasm32"))]
fn write_report(
    dir: &std::path::Path,
    filename: &str,
    bytes: &[u8],
) -> Result<std::path::PathBuf, String> {
    use std::io::Write;

    write_complete(dir, filename, |file| file.write_all(bytes))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_complete<F>(
    dir: &std::path::Path,
    filename: &str,
    fill: F,
) -> Result<std::path::PathBuf, String>
where
    F: FnOnce(&mut std::fs::File) -> std::io::Result<()>,
{
    use std::fs;

    let name = std::path::Path::new(filename)
        .file_name()
        .ok_or_else(|| format!("Unusable report filename: {filename}"))?;
    fs::create_dir_all(dir).map_err(|err| err.to_string())?;
    let path = dir.join(name);
    let mut partial_name = name.to_os_string();
    partial_name.push(".part");
    let partial = dir.join(partial_name);

    let written = fs::File::create(&partial).and_then(|mut file| {
        fill(&mut file)?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|()| fs::rename(&partial, &path)) {
        fs::remove_file(&partial).ok();
        tracing::warn!(path = %path.display(), %err, "report write failed");
        return Err(err.to_string());
    }
    Ok(path)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ll97-report-{tag}-{}", std::process::id()))
    }

    #[test]
    fn report_is_written_under_its_filename() {
        let dir = scratch_dir("write");
        let path = write_report(&dir, "ll97_report_Main_St.pdf", b"%PDF").unwrap();
        assert_eq!(path, dir.join("ll97_report_Main_St.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn directory_components_are_stripped() {
        let dir = scratch_dir("strip");
        let path = write_report(&dir, "../../etc/evil.pdf", b"%PDF").unwrap();
        assert_eq!(path, dir.join("evil.pdf"));
        std::fs::remove_dir_all(&dir).ok();

        assert!(write_report(&dir, "..", b"%PDF").is_err());
    }

    #[test]
    fn failed_write_leaves_no_file_behind() {
        use std::io::Write;

        let dir = scratch_dir("partial");
        let result = write_complete(&dir, "ll97_report.pdf", |file| {
            file.write_all(b"%PDF-1.7 half")?;
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        });

        assert_eq!(result.unwrap_err(), "disk full");
        let leftovers: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn rewrite_replaces_previous_report() {
        let dir = scratch_dir("replace");
        write_report(&dir, "ll97_report.pdf", b"old").unwrap();
        let path = write_report(&dir, "ll97_report.pdf", b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        assert!(!dir.join("ll97_report.pdf.part").exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
