//! Selection-based operations.
//!
//! Hash selections are split into batches by the orchestrator. Tag selections
//! are resolved server-side and need a single call (reads page through
//! [`TinyccClient::read_page`]).

use super::core::TinyccClient;
use super::paging::PageParams;
use crate::transport::ApiRequest;
use crate::types::{AggregatedResponse, Selection};
use crate::{Error, ErrorContext, Result};
use serde_json::{json, Map, Value};

const URLS: &str = "urls";
const STATS: &str = "stats";

fn ensure_selected(selection: &Selection) -> Result<()> {
    if selection.is_empty() {
        return Err(Error::validation_with_context(
            "URLs not selected",
            ErrorContext::new()
                .with_field_path("selection")
                .with_details(format!("empty {} selection", selection.kind())),
        ));
    }
    Ok(())
}

fn shorten_entry(long_url: &str, defaults: Option<&Value>) -> Value {
    let mut entry = Map::new();
    entry.insert("long_url".to_string(), Value::String(long_url.to_string()));
    if let Some(Value::Object(extra)) = defaults {
        for (k, v) in extra {
            entry.insert(k.clone(), v.clone());
        }
    }
    Value::Object(entry)
}

impl TinyccClient {
    /// Shorten many long URLs. `defaults` (an object) is merged into every entry
    /// and wins over `long_url`.
    pub async fn mass_shorten(
        &self,
        long_urls: &[String],
        defaults: Option<&Value>,
    ) -> Result<AggregatedResponse> {
        if long_urls.is_empty() {
            return Err(Error::validation_with_context(
                "No URLs to shorten",
                ErrorContext::new().with_field_path("long_urls"),
            ));
        }
        self.orchestrator
            .run(
                long_urls,
                |portion: Vec<String>| {
                    let urls: Vec<Value> = portion
                        .iter()
                        .map(|u| shorten_entry(u, defaults))
                        .collect();
                    self.call_batch(ApiRequest::post(URLS).with_body(json!({ "urls": urls })))
                },
                Some(URLS),
            )
            .await
    }

    /// Read the selected URLs.
    ///
    /// `params` only applies to tag selections, which are read page by page.
    pub async fn read(
        &self,
        selection: &Selection,
        params: PageParams,
    ) -> Result<AggregatedResponse> {
        ensure_selected(selection)?;
        match selection {
            Selection::Hashes(hashes) => {
                self.orchestrator
                    .run(
                        hashes,
                        |portion: Vec<String>| {
                            self.call_batch(
                                ApiRequest::get(URLS).with_query("hashes", portion.join(",")),
                            )
                        },
                        Some(URLS),
                    )
                    .await
            }
            Selection::Tags(tags) => {
                self.read_page(params.with_query("tags", tags.join(","))).await
            }
        }
    }

    /// Apply the same edit to every selected URL.
    pub async fn edit(&self, selection: &Selection, data: &Value) -> Result<AggregatedResponse> {
        ensure_selected(selection)?;
        let body = json!({ "urls": [data] });
        match selection {
            Selection::Hashes(hashes) => {
                self.orchestrator
                    .run(
                        hashes,
                        |portion: Vec<String>| {
                            self.call_batch(
                                ApiRequest::patch(URLS)
                                    .with_query("hashes", portion.join(","))
                                    .with_body(body.clone()),
                            )
                        },
                        Some(URLS),
                    )
                    .await
            }
            Selection::Tags(tags) => Ok(self
                .call_single(
                    ApiRequest::patch(URLS)
                        .with_query("tags", tags.join(","))
                        .with_body(body),
                    Some(URLS),
                )
                .await),
        }
    }

    /// Delete the selected URLs. The response carries no collection.
    pub async fn delete(&self, selection: &Selection) -> Result<AggregatedResponse> {
        self.delete_selected(URLS, selection).await
    }

    /// Reset click statistics of the selected URLs.
    pub async fn reset_stats(&self, selection: &Selection) -> Result<AggregatedResponse> {
        self.delete_selected(STATS, selection).await
    }

    async fn delete_selected(
        &self,
        resource: &'static str,
        selection: &Selection,
    ) -> Result<AggregatedResponse> {
        ensure_selected(selection)?;
        match selection {
            Selection::Hashes(hashes) => {
                self.orchestrator
                    .run(
                        hashes,
                        |portion: Vec<String>| {
                            let request = ApiRequest::delete(resource)
                                .with_query("hashes", portion.join(","));
                            self.call_batch(request)
                        },
                        None,
                    )
                    .await
            }
            Selection::Tags(tags) => Ok(self
                .call_single(
                    ApiRequest::delete(resource).with_query("tags", tags.join(",")),
                    None,
                )
                .await),
        }
    }
}
