mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

// ============================================================================
// #[derive(Record)] derive macro
// ============================================================================

/// Derive macro for the `Record` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(collection = "electronics")]
/// struct ElectronicItem {
///     #[record(id)]
///     pub sku: i64,
///     pub name: String,
///     pub quantity: u32,
///     pub brand: String,
/// }
/// ```
///
/// - `#[record(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[record(id)]`, `#[record(name)]` and `#[record(quantity)]` mark the
///   fields backing each accessor. Unmarked roles fall back to fields named
///   `id`, `name` and `quantity`.
///
/// The id field must be a `RecordId` and the quantity field a `Quantity`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::derive_record(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
