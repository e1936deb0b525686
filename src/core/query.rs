use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::models::application::ApplicationStatus;
use crate::core::parse::{parse_date_only, parse_numeric_id};
use crate::error::Error;

pub const APPLICATIONS_PAGE_SIZE: i64 = 20;

/// Wire name of the free-text search parameter.
pub const SEARCH_PARAM_NAME: &str = "q";

/// Raw query parameters of the applications list view, exactly as they came
/// in. Everything is an optional string until normalization has run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListParams {
    pub program_id: Option<String>,
    pub page: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    #[serde(rename = "q")]
    pub search: Option<String>,
}

/// Canonical filter/pagination state derived from [RawListParams]. The
/// `*_input_value` fields carry the raw (possibly swapped) date strings for
/// redisplay in the form inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedListParams {
    pub program_id: Option<i64>,
    pub page: i64,
    pub status: Option<ApplicationStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub date_from_input_value: Option<String>,
    pub date_to_input_value: Option<String>,
    pub search: Option<String>,
}

impl NormalizedListParams {
    pub fn to_query_params(&self) -> ListQueryParams {
        ListQueryParams {
            program_id: self.program_id,
            page: Some(self.page),
            status: self.status,
            date_from: self.date_from_input_value.clone(),
            date_to: self.date_to_input_value.clone(),
            search: self.search.clone(),
        }
    }
}

/// Parameter set accepted by [build_list_query_string]. Field order is the
/// serialization order of the query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Turns raw request parameters into the canonical list state. Invalid
/// filter values degrade to "absent" instead of erroring; a reversed date
/// range is swapped, raw strings included, so the UI shows the corrected
/// order.
pub fn normalize_list_params(raw: &RawListParams, selected_program_id: Option<i64>) -> NormalizedListParams {
    let page = parse_numeric_id(raw.page.as_deref()).filter(|p| *p >= 1).unwrap_or(1);
    let status = raw.status.as_deref().and_then(|s| s.parse::<ApplicationStatus>().ok());
    let mut date_from = parse_date_only(raw.date_from.as_deref());
    let mut date_to = parse_date_only(raw.date_to.as_deref());
    let mut date_from_raw = raw.date_from.clone();
    let mut date_to_raw = raw.date_to.clone();
    if let (Some(from), Some(to)) = (date_from, date_to) {
        if from > to {
            std::mem::swap(&mut date_from, &mut date_to);
            std::mem::swap(&mut date_from_raw, &mut date_to_raw);
        }
    }
    let search = raw
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);
    NormalizedListParams {
        program_id: selected_program_id,
        page,
        status,
        date_from,
        date_to,
        date_from_input_value: if date_from.is_some() { date_from_raw } else { None },
        date_to_input_value: if date_to.is_some() { date_to_raw } else { None },
        search,
    }
}

pub fn clamp_page(page: i64, total_pages: i64) -> i64 {
    if total_pages <= 0 {
        return 1;
    }
    page.clamp(1, total_pages)
}

/// Serializes list parameters back into a query string, dropping defaults:
/// page 1 and absent/empty values are omitted. Normalizing the parsed result
/// reproduces the same state.
pub fn build_list_query_string(params: &ListQueryParams) -> Result<String, Error> {
    let params = ListQueryParams {
        program_id: params.program_id,
        page: params.page.filter(|p| *p > 1),
        status: params.status,
        date_from: params.date_from.clone().filter(|v| !v.is_empty()),
        date_to: params.date_to.clone().filter(|v| !v.is_empty()),
        search: params.search.clone().filter(|v| !v.is_empty()),
    };
    Ok(serde_urlencoded::to_string(&params)?)
}

pub fn applications_list_path(query: &str) -> String {
    if query.is_empty() {
        "/applications".into()
    } else {
        format!("/applications?{}", query)
    }
}
