use actix_web::{http::StatusCode, middleware, web, App, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ScheduleRequest;
use crate::display::ScheduleTable;
use crate::error::{AppError, AssignError};
use crate::export::{write_csv, xlsx_bytes};
use crate::parser::{dedupe_names, parse_roster, RosterFormat};
use crate::schedule::plan_schedule;

#[derive(Deserialize)]
pub struct RosterQuery {
    format: Option<String>,
}

#[derive(Serialize)]
pub struct RosterResponse {
    names: Vec<String>,
    count: usize,
}

/// Body of an assignment request: grid settings plus the names to draw from
#[derive(Deserialize)]
pub struct AssignRequest {
    #[serde(flatten)]
    request: ScheduleRequest,
    names: Vec<String>,
}

#[derive(Serialize)]
pub struct AssignResponse {
    success: bool,
    reused: bool,
    table: ScheduleTable,
}

fn error_response(err: &AppError) -> HttpResponse {
    let status = match err {
        AppError::Assign(AssignError::InsufficientUniqueNames { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "kind": err.kind(),
        "error": err.to_string(),
    }))
}

/// Runs the engine for one request with its own random source
fn generate_table(body: AssignRequest) -> Result<(ScheduleTable, bool), AppError> {
    let AssignRequest { request, names } = body;
    let roster = dedupe_names(names.into_iter().map(|n| n.trim().to_string()));
    let mut rng = request.rng();
    let plan = plan_schedule(&request, &roster, &mut rng)?;
    Ok((ScheduleTable::from_assignment(&plan.assignment), plan.reused))
}

/// Generates off the async worker; failures come back as a ready response
async fn generate_blocking(
    body: AssignRequest,
) -> Result<Result<(ScheduleTable, bool), HttpResponse>> {
    let generated = web::block(move || generate_table(body)).await?;
    Ok(generated.map_err(|e| {
        warn!(kind = e.kind(), error = %e, "assignment failed");
        error_response(&e)
    }))
}

// Names upload endpoint
async fn upload_roster(
    query: web::Query<RosterQuery>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let format = RosterFormat::from_extension(query.format.as_deref().unwrap_or("txt"));
    let parsed = format.and_then(|format| parse_roster(body.as_ref(), format));

    match parsed {
        Ok(names) if names.is_empty() => Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"error": "No names found in the file."}))),
        Ok(names) => Ok(HttpResponse::Ok().json(RosterResponse { count: names.len(), names })),
        Err(e) => {
            warn!(error = %e, "rejected roster upload");
            Ok(HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})))
        }
    }
}

// Schedule generation endpoint
async fn assign_schedule(body: web::Json<AssignRequest>) -> Result<HttpResponse> {
    match generate_blocking(body.into_inner()).await? {
        Ok((table, reused)) => Ok(HttpResponse::Ok().json(AssignResponse {
            success: true,
            reused,
            table,
        })),
        Err(response) => Ok(response),
    }
}

// Same as assign_schedule, but hands the result straight to the CSV exporter
async fn assign_schedule_csv(body: web::Json<AssignRequest>) -> Result<HttpResponse> {
    let (table, _) = match generate_blocking(body.into_inner()).await? {
        Ok(generated) => generated,
        Err(response) => return Ok(response),
    };

    let mut csv_body = Vec::new();
    if let Err(e) = write_csv(&mut csv_body, &table) {
        return Ok(error_response(&AppError::Export(e)));
    }

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", "attachment; filename=\"assignment.csv\""))
        .body(csv_body))
}

// Spreadsheet download of a freshly generated schedule
async fn assign_schedule_xlsx(body: web::Json<AssignRequest>) -> Result<HttpResponse> {
    let (table, _) = match generate_blocking(body.into_inner()).await? {
        Ok(generated) => generated,
        Err(response) => return Ok(response),
    };

    let xlsx_body = match xlsx_bytes(&table) {
        Ok(bytes) => bytes,
        Err(e) => return Ok(error_response(&AppError::Export(e))),
    };

    Ok(HttpResponse::Ok()
        .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        .insert_header(("Content-Disposition", "attachment; filename=\"assignment.xlsx\""))
        .body(xlsx_body))
}

async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/roster", web::post().to(upload_roster))
        .route("/api/assign", web::post().to(assign_schedule))
        .route("/api/assign/csv", web::post().to(assign_schedule_csv))
        .route("/api/assign/xlsx", web::post().to(assign_schedule_xlsx));
}

pub async fn start_server(port: u16) -> std::io::Result<()> {
    info!(port, "starting web server");

    HttpServer::new(|| {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
