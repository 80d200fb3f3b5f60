//! OpenAPI document. The `*Doc` types mirror the wire shapes for schema generation only.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct MessageResponseDoc { pub message: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorBodyDoc { pub error: String, pub message: String }

#[derive(Serialize, ToSchema)]
pub enum ServiceStatusDoc {
    Active,
    #[serde(rename = "Exp_soon")]
    ExpSoon,
    Expired,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordDoc {
    pub id: String,
    pub ref_no: String,
    pub employee: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub package_name: String,
    pub ser_number: String,
    pub vendor: String,
    pub status: ServiceStatusDoc,
    /// Free text, usually `DD/MM/YYYY`.
    pub expires: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordInputDoc {
    pub ref_no: String,
    pub employee: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub package_name: String,
    pub ser_number: String,
    pub vendor: String,
    /// Ignored on create; on update an absent status means `Active`.
    pub status: Option<ServiceStatusDoc>,
    pub expires: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpecDoc {
    pub employee: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub service_type: Option<Vec<String>>,
    pub vendor: Option<Vec<String>>,
    /// Status names; unknown values simply match nothing.
    pub status: Option<Vec<String>>,
    pub package_name: Option<Vec<String>>,
    pub ser_number: Option<String>,
    pub ref_no: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub search_query: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummaryDoc { pub total: usize, pub active: usize, pub expiring_soon: usize, pub expired: usize }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterFacetsDoc {
    pub employee: Vec<String>,
    #[serde(rename = "type")]
    pub service_type: Vec<String>,
    pub vendor: Vec<String>,
    pub package_name: Vec<String>,
    pub status: Vec<ServiceStatusDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::get_one,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::services::enable,
        crate::routes::services::disable,
        crate::routes::services::filter_list,
        crate::routes::services::summary,
        crate::routes::services::facets,
        crate::routes::services::export_csv,
        crate::routes::services::export_html,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponseDoc,
            ErrorBodyDoc,
            ServiceStatusDoc,
            ServiceRecordDoc,
            ServiceRecordInputDoc,
            FilterSpecDoc,
            StatusSummaryDoc,
            FilterFacetsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "services"),
        (name = "export")
    )
)]
pub struct ApiDoc;
