//! Invoice form handlers.
//!
//! ```text
//! POST /dashboard/invoices              customerId=c1&amount=12.50&status=paid
//! POST /dashboard/invoices/{id}         customerId=c1&amount=12.50&status=paid
//! POST /dashboard/invoices/{id}/delete
//! ```
//!
//! Successful create and update answer `303 See Other` so the browser
//! follows up with a GET of the listing. Rejections carry the form state:
//! `422` when fields failed validation, `500` when the write failed.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, InvoiceFormInput, InvoiceFormState, InvoiceId, Redirect};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body shared by create and update.
///
/// Unknown fields (for example a stale `date` input) are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFormRequest {
    /// Customer the invoice is issued to.
    #[schema(example = "3958dc9e-712f-4377-85e9-fec4b6a6442a")]
    pub customer_id: Option<String>,
    /// Amount in dollars.
    #[schema(example = "12.50")]
    pub amount: Option<String>,
    /// `pending` or `paid`.
    #[schema(example = "pending")]
    pub status: Option<String>,
}

impl From<InvoiceFormRequest> for InvoiceFormInput {
    fn from(value: InvoiceFormRequest) -> Self {
        Self {
            customer_id: value.customer_id,
            amount: value.amount,
            status: value.status,
        }
    }
}

fn parse_invoice_id(raw: String) -> Result<InvoiceId, Error> {
    InvoiceId::new(raw).map_err(|err| Error::invalid_request(format!("invalid invoice id: {err}")))
}

fn see_other(redirect: &Redirect) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, redirect.location().as_str()))
        .finish()
}

fn rejected(state: InvoiceFormState) -> HttpResponse {
    let status = if state.has_field_errors() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    HttpResponse::build(status).json(state)
}

/// Create an invoice dated today.
#[utoipa::path(
    post,
    path = "/dashboard/invoices",
    request_body(
        content = InvoiceFormRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Created; redirect to the listing", headers(("Location" = String))),
        (status = 401, description = "Login required", body = Error),
        (status = 422, description = "Field validation failed", body = InvoiceFormState),
        (status = 500, description = "Database write failed", body = InvoiceFormState)
    ),
    tags = ["invoices"],
    operation_id = "createInvoice"
)]
#[post("/invoices")]
pub async fn create_invoice(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<InvoiceFormRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let response = match state.invoices.create(form.into_inner().into()).await {
        Ok(redirect) => see_other(&redirect),
        Err(form_state) => rejected(form_state),
    };
    Ok(response)
}

/// Overwrite customer, amount and status of an invoice.
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}",
    params(("id" = String, Path, description = "Invoice identifier")),
    request_body(
        content = InvoiceFormRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Updated; redirect to the listing", headers(("Location" = String))),
        (status = 400, description = "Malformed invoice id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 422, description = "Field validation failed", body = InvoiceFormState),
        (status = 500, description = "Database write failed", body = InvoiceFormState)
    ),
    tags = ["invoices"],
    operation_id = "updateInvoice"
)]
#[post("/invoices/{id}")]
pub async fn update_invoice(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<InvoiceFormRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let id = parse_invoice_id(path.into_inner())?;
    let response = match state.invoices.update(&id, form.into_inner().into()).await {
        Ok(redirect) => see_other(&redirect),
        Err(form_state) => rejected(form_state),
    };
    Ok(response)
}

/// Delete an invoice.
///
/// Success has no body and no redirect; the listing that issued the request
/// refreshes itself.
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}/delete",
    params(("id" = String, Path, description = "Invoice identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed invoice id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Database write failed", body = InvoiceFormState)
    ),
    tags = ["invoices"],
    operation_id = "deleteInvoice"
)]
#[post("/invoices/{id}/delete")]
pub async fn delete_invoice(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let id = parse_invoice_id(path.into_inner())?;
    let response = match state.invoices.delete(&id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(form_state) => rejected(form_state),
    };
    Ok(response)
}

#[cfg(test)]
#[path = "invoices_tests.rs"]
mod tests;
