//! JSON body, query and path extractors whose rejections use the API error body.
//!
//! Malformed JSON, unknown enum values and missing required fields all
//! surface as `400 VALIDATION_ERROR` instead of axum's plain-text defaults.

use axum::extract::{FromRequest, FromRequestParts};

use crate::http::error::AppError;

/// `axum::Json` with [`AppError`] rejections.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with [`AppError`] rejections.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `axum::extract::Path` with [`AppError`] rejections.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
