//! Upstream payload normalization.
//!
//! The catalog API is loose about field names; every field is looked up
//! through an ordered list of known variants.

use serde_json::Value;
use url::Url;

use super::types::{CatalogSource, CrawledProduct, ProductMetadata};
use crate::error::{Error, Result};
use crate::tools::classify::normalize_image_url;
use crate::tools::clean::{clean_text, first_field, value_as_f64, value_as_string, value_as_u64};

/// Shown when an upstream row carries no image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300?text=No+Image";

const ITEM_PATHS: &[&[&str]] = &[
    &["products"],
    &["items"],
    &["data"],
    &["data", "products"],
    &["data", "items"],
    &["result", "items"],
];

const ID_KEYS: &[&str] = &[
    "id",
    "productId",
    "product_id",
    "itemNo",
    "item_no",
    "goodsNo",
    "no",
];
const NAME_KEYS: &[&str] = &[
    "name",
    "productName",
    "product_name",
    "title",
    "itemName",
    "goodsName",
];
const PRICE_KEYS: &[&str] = &[
    "price",
    "salePrice",
    "sale_price",
    "supplyPrice",
    "supply_price",
    "wholesalePrice",
];
const IMAGE_KEYS: &[&str] = &[
    "image",
    "imageUrl",
    "image_url",
    "thumbnail",
    "thumbnailUrl",
    "img",
    "mainImage",
    "images",
];
const URL_KEYS: &[&str] = &["url", "link", "productUrl", "product_url", "detailUrl"];
const SUPPLIER_KEYS: &[&str] = &[
    "supplier",
    "supplierName",
    "seller",
    "sellerName",
    "vendor",
    "shopName",
];
const CATEGORY_KEYS: &[&str] = &["category", "categoryName", "category_name"];
const STOCK_KEYS: &[&str] = &["stock", "stockQty", "quantity", "inventory"];
const DESCRIPTION_KEYS: &[&str] = &["description", "summary", "desc"];
const RATING_KEYS: &[&str] = &["rating", "ratingAvg", "score"];
const REVIEW_KEYS: &[&str] = &["reviewCount", "review_count", "reviews"];
const DELIVERY_KEYS: &[&str] = &["deliveryFee", "delivery_fee", "shippingFee", "shipping_fee"];
const MOQ_KEYS: &[&str] = &["minOrderQty", "min_order_qty", "moq", "minimumOrder"];

/// Locate the item array in a search payload.
pub(crate) fn find_items(payload: &Value) -> Option<&Vec<Value>> {
    if let Value::Array(items) = payload {
        return Some(items);
    }
    ITEM_PATHS.iter().find_map(|path| {
        path.iter()
            .try_fold(payload, |node, key| node.get(*key))
            .and_then(Value::as_array)
    })
}

/// Map a whole payload. Rows without a usable name are dropped.
pub(crate) fn map_products(
    payload: &Value,
    source: CatalogSource,
    page: u32,
) -> Result<Vec<CrawledProduct>> {
    let items = find_items(payload)
        .ok_or_else(|| Error::Parse("no product list in search response".into()))?;
    let origin = Url::parse(source.origin()).ok();

    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| map_product(item, source, origin.as_ref(), page, idx))
        .collect())
}

fn map_product(
    item: &Value,
    source: CatalogSource,
    origin: Option<&Url>,
    page: u32,
    idx: usize,
) -> Option<CrawledProduct> {
    let name = first_field(item, NAME_KEYS, value_as_string)
        .map(|n| clean_text(&n))
        .filter(|n| !n.is_empty())?;

    let raw_id = first_field(item, ID_KEYS, value_as_string);
    let id = match &raw_id {
        Some(raw) => format!("{}_{}", source.key(), raw),
        None => format!("{}_p{}_{}", source.key(), page, idx),
    };

    let image = first_field(item, IMAGE_KEYS, image_ref)
        .and_then(|raw| normalize_image_url(&raw, origin))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    let url = first_field(item, URL_KEYS, value_as_string)
        .and_then(|raw| normalize_image_url(&raw, origin))
        .or_else(|| raw_id.as_deref().map(|raw| source.product_url(raw)))
        .unwrap_or_else(|| source.origin().to_string());

    let metadata = ProductMetadata {
        rating: first_field(item, RATING_KEYS, value_as_f64),
        review_count: first_field(item, REVIEW_KEYS, value_as_u64),
        delivery_fee: first_field(item, DELIVERY_KEYS, value_as_u64),
        min_order_qty: first_field(item, MOQ_KEYS, value_as_u64),
        ..ProductMetadata::default()
    };

    Some(CrawledProduct {
        id,
        name,
        price: first_field(item, PRICE_KEYS, value_as_u64).unwrap_or(0),
        image,
        url,
        supplier: first_field(item, SUPPLIER_KEYS, value_as_string)
            .unwrap_or_else(|| source.label().to_string()),
        category: first_field(item, CATEGORY_KEYS, value_as_string).unwrap_or_default(),
        stock: first_field(item, STOCK_KEYS, value_as_string).unwrap_or_default(),
        description: first_field(item, DESCRIPTION_KEYS, value_as_string)
            .map(|d| clean_text(&d))
            .unwrap_or_default(),
        source,
        metadata: (!metadata.is_empty()).then_some(metadata),
    })
}

/// Image fields come as a string, a list of strings, or `{ "url": .. }`.
fn image_ref(value: &Value) -> Option<String> {
    match value {
        Value::Array(list) => list.iter().find_map(image_ref),
        Value::Object(_) => value.get("url").and_then(value_as_string),
        other => value_as_string(other),
    }
}
