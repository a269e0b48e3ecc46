mod document;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Document)]
// ============================================================================

/// Derive macro that implements `ballapp::Document` for a struct.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Document)]
/// #[document(collection = "teams")]
/// struct Team {
///     #[document(id)]
///     pub id: Option<String>,
///     pub name: String,
///     #[document(created_at)]
///     pub created_at: Timestamp,
/// }
/// ```
///
/// - `#[document(collection = "...")]` sets the collection name.
///   If omitted, defaults to the lowerCamelCase struct name + "s".
/// - `#[document(id)]` marks the `Option<String>` field holding the store-assigned id.
///   If omitted, defaults to a field named `id`.
/// - `#[document(created_at)]` marks the `Timestamp` field used for recency ordering.
///   If omitted, defaults to a field named `created_at`.
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    document::derive_document(input)
}
