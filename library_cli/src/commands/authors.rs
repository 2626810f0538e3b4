use anyhow::Result;
use clap::Args;
use library_lib::library_api::types::AuthorForCreation;
use library_lib::{ApiResponse, AuthorsQuery, Query};
use uuid::Uuid;

use super::{parse_body, BodyArgs, Service};

#[derive(Args)]
pub struct AuthorsArgs {
    /// Comma-separated fields to return (e.g. id,lastName)
    #[arg(long)]
    pub fields: Option<String>,

    /// Search first name, last name and genre
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by genre (exact, case-insensitive)
    #[arg(long)]
    pub genre: Option<String>,

    /// Page number
    #[arg(long, default_value = "1", allow_negative_numbers = true)]
    pub page: i64,

    /// Results per page (defaults to the configured page size)
    #[arg(long, allow_negative_numbers = true)]
    pub page_size: Option<i64>,
}

#[derive(Args)]
pub struct AuthorArgs {
    /// Author ID
    pub id: Uuid,

    /// Comma-separated fields to return
    #[arg(long)]
    pub fields: Option<String>,
}

#[derive(Args)]
pub struct AuthorIdArgs {
    /// Author ID
    pub id: Uuid,
}

#[derive(Args)]
pub struct CreateAuthorArgs {
    #[command(flatten)]
    pub body: BodyArgs,
}

pub fn list(args: &AuthorsArgs, service: &Service, accept: Option<&str>) -> ApiResponse {
    // A page size of 0 is replaced by the configured default.
    let mut query = AuthorsQuery::default()
        .with_page(args.page)
        .with_page_size(args.page_size.unwrap_or(0));

    if let Some(fields) = &args.fields {
        query = query.with_fields(fields);
    }
    if let Some(search) = &args.search {
        query = query.with_search(search);
    }
    if let Some(genre) = &args.genre {
        query = query.with_genre(genre);
    }

    ApiResponse::from_result(service.get_authors(&query, accept))
}

pub fn show(args: &AuthorArgs, service: &Service, accept: Option<&str>) -> ApiResponse {
    ApiResponse::from_result(service.get_author(args.id, args.fields.as_deref(), accept))
}

pub fn create(args: &CreateAuthorArgs, service: &Service, accept: Option<&str>) -> Result<ApiResponse> {
    let result = parse_body::<AuthorForCreation>(args.body.read_text()?)
        .and_then(|body| service.create_author(body, accept));
    Ok(ApiResponse::from_result(result))
}

pub fn block(args: &AuthorIdArgs, service: &Service) -> ApiResponse {
    ApiResponse::from_result(service.block_author_creation(args.id))
}

pub fn delete(args: &AuthorIdArgs, service: &Service) -> ApiResponse {
    ApiResponse::from_result(service.delete_author(args.id))
}
