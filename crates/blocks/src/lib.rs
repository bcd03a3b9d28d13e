//! Block composition domain module.
//!
//! A catalog (or the profile page) is an ordered list of typed content blocks.
//! This crate holds the block model, its typed payloads, and the ordering
//! operations over a page's block list, implemented purely as deterministic
//! domain logic (no IO, no storage).

pub mod block;
pub mod content;
pub mod list;
pub mod navigation;

pub use block::{Block, BlockRecord};
pub use content::{
    AboutData, BannerData, BlockContent, BlockType, CallToActionData, CategoriesData, ContactData,
    CoverData, DividerData, DividerStyle, FaqData, FaqItem, FeaturedProductsData, GalleryData,
    GalleryImage, ImageData, LocationData, OpeningHoursData, OpeningHoursEntry, ProductGridData,
    SocialLink, SocialLinksData, SpacerData, Testimonial, TestimonialsData, TextAlign, TextData,
    VideoData,
};
pub use list::{BlockList, DuplicateAnchor, Duplicated, SortAssignment};
pub use navigation::{NavigationItem, derive_anchor};
