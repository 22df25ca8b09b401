//! # Resource Paths & Routing
//!
//! Logical addresses for product data and the table that matches them.
//!
//! ## Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  /products          → ResourcePath::Products     (whole collection)     │
//! │  /products/{id}     → ResourcePath::Product(id)  (single row)           │
//! │  anything else      → no match (caller reports UnknownResource)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`Router`] is built once at startup and handed to whoever needs to
//! resolve paths. It is immutable after construction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::PRODUCTS_SEGMENT;

/// Content type of the product collection.
pub const CONTENT_LIST_TYPE: &str = "vnd.stockroom.dir/products";

/// Content type of a single product.
pub const CONTENT_ITEM_TYPE: &str = "vnd.stockroom.item/products";

// =============================================================================
// Resource Path
// =============================================================================

/// A resolved resource address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourcePath {
    /// The whole product collection.
    Products,
    /// One product by id.
    Product(i64),
}

impl ResourcePath {
    /// Returns the product id for item paths.
    pub fn id(&self) -> Option<i64> {
        match self {
            ResourcePath::Products => None,
            ResourcePath::Product(id) => Some(*id),
        }
    }

    /// Returns true for the collection path.
    pub fn is_collection(&self) -> bool {
        matches!(self, ResourcePath::Products)
    }

    /// Content type describing what this path returns.
    pub fn content_type(&self) -> &'static str {
        match self {
            ResourcePath::Products => CONTENT_LIST_TYPE,
            ResourcePath::Product(_) => CONTENT_ITEM_TYPE,
        }
    }

    /// Whether a change at `self` invalidates data read from `other`.
    ///
    /// A collection-wide change affects every path; an item change affects
    /// the collection and that same item.
    pub fn affects(&self, other: &ResourcePath) -> bool {
        match (self, other) {
            (ResourcePath::Products, _) | (_, ResourcePath::Products) => true,
            (ResourcePath::Product(a), ResourcePath::Product(b)) => a == b,
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourcePath::Products => write!(f, "/{}", PRODUCTS_SEGMENT),
            ResourcePath::Product(id) => write!(f, "/{}/{}", PRODUCTS_SEGMENT, id),
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// What a routing entry resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Products,
    ProductById,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `#` in a pattern: a non-negative decimal integer.
    Number,
}

#[derive(Debug, Clone)]
struct Route {
    segments: Vec<Segment>,
    kind: RouteKind,
}

/// Immutable path-matching table.
///
/// ## Example
/// ```rust
/// use stockroom_core::resource::{ResourcePath, Router};
///
/// let router = Router::standard();
/// assert_eq!(router.route("/products"), Some(ResourcePath::Products));
/// assert_eq!(router.route("/products/7"), Some(ResourcePath::Product(7)));
/// assert_eq!(router.route("/suppliers"), None);
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Starts an empty routing table.
    pub fn builder() -> RouterBuilder {
        RouterBuilder { routes: Vec::new() }
    }

    /// The application's table: `products` and `products/#`.
    pub fn standard() -> Self {
        Router::builder()
            .add(PRODUCTS_SEGMENT, RouteKind::Products)
            .add(&format!("{}/#", PRODUCTS_SEGMENT), RouteKind::ProductById)
            .build()
    }

    /// Resolves a path, returning `None` when no entry matches.
    ///
    /// A single leading and a single trailing `/` are ignored.
    pub fn route(&self, path: &str) -> Option<ResourcePath> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let parts: Vec<&str> = trimmed.split('/').collect();

        self.routes
            .iter()
            .find_map(|route| Self::match_route(route, &parts))
    }

    fn match_route(route: &Route, parts: &[&str]) -> Option<ResourcePath> {
        if route.segments.len() != parts.len() {
            return None;
        }

        let mut number = None;
        for (segment, part) in route.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Number => {
                    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                        return None;
                    }
                    number = Some(part.parse::<i64>().ok()?);
                }
            }
        }

        match route.kind {
            RouteKind::Products => Some(ResourcePath::Products),
            RouteKind::ProductById => number.map(ResourcePath::Product),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Router::standard()
    }
}

/// Builder for [`Router`].
#[derive(Debug)]
pub struct RouterBuilder {
    routes: Vec<Route>,
}

impl RouterBuilder {
    /// Adds a pattern such as `"products/#"`.
    pub fn add(mut self, pattern: &str, kind: RouteKind) -> Self {
        let segments = pattern
            .trim_matches('/')
            .split('/')
            .map(|s| match s {
                "#" => Segment::Number,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();
        self.routes.push(Route { segments, kind });
        self
    }

    pub fn build(self) -> Router {
        Router {
            routes: self.routes,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_routes() {
        let router = Router::standard();
        assert_eq!(router.route("/products"), Some(ResourcePath::Products));
        assert_eq!(router.route("products/"), Some(ResourcePath::Products));
        assert_eq!(router.route("/products/42"), Some(ResourcePath::Product(42)));
        assert_eq!(router.route("/products/0/"), Some(ResourcePath::Product(0)));
    }

    #[test]
    fn test_unknown_paths() {
        let router = Router::standard();
        for path in [
            "",
            "/",
            "/product",
            "/products/abc",
            "/products/-1",
            "/products//1",
            "/products/1/extra",
            "/products/99999999999999999999",
        ] {
            assert_eq!(router.route(path), None, "path {:?} should not match", path);
        }
    }

    #[test]
    fn test_display_matches_routes() {
        let router = Router::standard();
        for path in [ResourcePath::Products, ResourcePath::Product(5)] {
            assert_eq!(router.route(&path.to_string()), Some(path));
        }
        assert_eq!(ResourcePath::Product(5).to_string(), "/products/5");
    }

    #[test]
    fn test_affects() {
        let all = ResourcePath::Products;
        let one = ResourcePath::Product(1);
        let two = ResourcePath::Product(2);

        assert!(all.affects(&one));
        assert!(one.affects(&all));
        assert!(one.affects(&one));
        assert!(!one.affects(&two));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ResourcePath::Products.content_type(), CONTENT_LIST_TYPE);
        assert_eq!(ResourcePath::Product(3).content_type(), CONTENT_ITEM_TYPE);
    }

    #[test]
    fn test_custom_table_without_item_route() {
        let router = Router::builder().add("products", RouteKind::Products).build();
        assert_eq!(router.route("/products/1"), None);
    }
}
