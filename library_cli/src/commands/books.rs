use anyhow::Result;
use clap::Args;
use library_lib::library_api::types::{BookForCreation, BookForUpdate};
use library_lib::patch::PatchDocument;
use library_lib::ApiResponse;
use uuid::Uuid;

use super::{parse_body, BodyArgs, Service};

#[derive(Args)]
pub struct BooksArgs {
    /// Author ID
    pub author_id: Uuid,
}

#[derive(Args)]
pub struct BookArgs {
    /// Author ID
    pub author_id: Uuid,

    /// Book ID
    pub id: Uuid,
}

#[derive(Args)]
pub struct CreateBookArgs {
    /// Author ID
    pub author_id: Uuid,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Args)]
pub struct UpdateBookArgs {
    /// Author ID
    pub author_id: Uuid,

    /// Book ID
    pub id: Uuid,

    #[command(flatten)]
    pub body: BodyArgs,
}

pub fn list(args: &BooksArgs, service: &Service, accept: Option<&str>) -> ApiResponse {
    ApiResponse::from_result(service.get_books_for_author(args.author_id, accept))
}

pub fn show(args: &BookArgs, service: &Service, accept: Option<&str>) -> ApiResponse {
    ApiResponse::from_result(service.get_book_for_author(args.author_id, args.id, accept))
}

pub fn create(args: &CreateBookArgs, service: &Service, accept: Option<&str>) -> Result<ApiResponse> {
    let result = parse_body::<BookForCreation>(args.body.read_text()?)
        .and_then(|body| service.create_book_for_author(args.author_id, body, accept));
    Ok(ApiResponse::from_result(result))
}

pub fn update(args: &UpdateBookArgs, service: &Service, accept: Option<&str>) -> Result<ApiResponse> {
    let result = parse_body::<BookForUpdate>(args.body.read_text()?)
        .and_then(|body| service.update_book_for_author(args.author_id, args.id, body, accept));
    Ok(ApiResponse::from_result(result))
}

pub fn patch(args: &UpdateBookArgs, service: &Service, accept: Option<&str>) -> Result<ApiResponse> {
    let result = parse_body::<PatchDocument>(args.body.read_text()?).and_then(|patch| {
        service.partially_update_book_for_author(args.author_id, args.id, patch, accept)
    });
    Ok(ApiResponse::from_result(result))
}

pub fn delete(args: &BookArgs, service: &Service) -> ApiResponse {
    ApiResponse::from_result(service.delete_book_for_author(args.author_id, args.id))
}
