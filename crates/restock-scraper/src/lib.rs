pub mod collection;
pub mod dom;
pub mod embedded;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod template;

pub use collection::{collection_url, parse_collection_items, Brand, CollectionItem};
pub use error::ScrapeError;
pub use fetch::{FetcherConfig, HttpFetcher};
pub use pipeline::{CollectionScraper, ProductScraper};
pub use render::ChromeRenderer;
pub use source::PageAcquirer;
pub use template::{ImageConvention, TemplateProfile};
