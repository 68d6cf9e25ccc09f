use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, error, info};
use std::path::Path;

use crate::AppState;

fn error_text(message: String) -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type("text/plain; charset=utf-8")
        .body(message)
}

fn attachment(path: &Path) -> ContentDisposition {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| crate::config::DEFAULT_OUTPUT_FILE.to_string());
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename)],
    }
}

/// Generate Form 'A' and send it back as a download.
#[utoipa::path(
    get,
    path = "/",
    tag = "Form A",
    responses(
        (status = 200, description = "Form A mediation application as a .docx attachment"),
        (status = 500, description = "Plain-text error naming the attempted output path", body = String, content_type = "text/plain")
    )
)]
pub async fn download_form(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    info!("Executing download_form handler");

    let generator = state.generator.clone();
    let path = generator.destination().to_path_buf();

    match web::block(move || generator.generate()).await {
        Ok(Ok(rendered)) => {
            debug!(
                "Generated {} ({} bytes, {} rows)",
                rendered.path.display(),
                rendered.size,
                rendered.rows
            );
        }
        Ok(Err(e)) => {
            error!("Form generation failed for {}: {}", path.display(), e);
            return error_text(format!(
                "Error: form was not generated ({}). Path: {}",
                e,
                path.display()
            ));
        }
        Err(e) => {
            error!("Form generation task failed: {}", e);
            return error_text(format!("Error: {}. Path: {}", e, path.display()));
        }
    }

    if !path.exists() {
        error!("Generated form missing at {}", path.display());
        return error_text(format!(
            "Error: File was not generated. Path: {}",
            path.display()
        ));
    }

    match NamedFile::open_async(&path).await {
        Ok(file) => file
            .set_content_disposition(attachment(&path))
            .into_response(&req),
        Err(e) => {
            error!("Failed to open generated form {}: {}", path.display(), e);
            error_text(format!("Error: {}", e))
        }
    }
}

/// Configure the download route.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(download_form)));
}
