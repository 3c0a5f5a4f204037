//! Extractors whose rejections go through [`AppError`], so malformed paths,
//! query strings and bodies get the same JSON error envelope as every other
//! failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::utils::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
