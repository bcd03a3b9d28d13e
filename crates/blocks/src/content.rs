//! Block kinds and their typed payloads.
//!
//! The payload shape is determined by the block type. On the wire a block's
//! content is adjacently tagged (`{"type": "...", "data": {...}}`), and every
//! payload field has a default so `{}` is a valid payload for any kind.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};

use vitrine_core::{DomainError, DomainResult, ProductId};

/// The fixed set of block kinds a page can be composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Cover,
    About,
    Text,
    Image,
    Gallery,
    Video,
    ProductGrid,
    FeaturedProducts,
    Categories,
    Testimonials,
    Faq,
    Contact,
    SocialLinks,
    Location,
    OpeningHours,
    CallToAction,
    Banner,
    Divider,
    Spacer,
}

impl BlockType {
    pub const ALL: [BlockType; 19] = [
        BlockType::Cover,
        BlockType::About,
        BlockType::Text,
        BlockType::Image,
        BlockType::Gallery,
        BlockType::Video,
        BlockType::ProductGrid,
        BlockType::FeaturedProducts,
        BlockType::Categories,
        BlockType::Testimonials,
        BlockType::Faq,
        BlockType::Contact,
        BlockType::SocialLinks,
        BlockType::Location,
        BlockType::OpeningHours,
        BlockType::CallToAction,
        BlockType::Banner,
        BlockType::Divider,
        BlockType::Spacer,
    ];

    /// Stable wire name (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Cover => "cover",
            BlockType::About => "about",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Gallery => "gallery",
            BlockType::Video => "video",
            BlockType::ProductGrid => "product_grid",
            BlockType::FeaturedProducts => "featured_products",
            BlockType::Categories => "categories",
            BlockType::Testimonials => "testimonials",
            BlockType::Faq => "faq",
            BlockType::Contact => "contact",
            BlockType::SocialLinks => "social_links",
            BlockType::Location => "location",
            BlockType::OpeningHours => "opening_hours",
            BlockType::CallToAction => "call_to_action",
            BlockType::Banner => "banner",
            BlockType::Divider => "divider",
            BlockType::Spacer => "spacer",
        }
    }

    /// Human-readable name shown in the editor and used for navigation entries
    /// that have neither a label nor a title.
    pub fn label(self) -> &'static str {
        match self {
            BlockType::Cover => "Capa",
            BlockType::About => "Sobre",
            BlockType::Text => "Texto",
            BlockType::Image => "Imagem",
            BlockType::Gallery => "Galeria",
            BlockType::Video => "Vídeo",
            BlockType::ProductGrid => "Produtos",
            BlockType::FeaturedProducts => "Destaques",
            BlockType::Categories => "Categorias",
            BlockType::Testimonials => "Depoimentos",
            BlockType::Faq => "Perguntas frequentes",
            BlockType::Contact => "Contato",
            BlockType::SocialLinks => "Redes sociais",
            BlockType::Location => "Localização",
            BlockType::OpeningHours => "Horários",
            BlockType::CallToAction => "Chamada",
            BlockType::Banner => "Banner",
            BlockType::Divider => "Divisor",
            BlockType::Spacer => "Espaço",
        }
    }
}

impl core::fmt::Display for BlockType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown block type '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    #[default]
    Line,
    Dots,
    Wave,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverData {
    pub title: String,
    pub subtitle: String,
    pub image_url: Option<String>,
    pub overlay: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutData {
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextData {
    pub title: String,
    pub body: String,
    pub align: TextAlign,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageData {
    pub image_url: Option<String>,
    pub caption: String,
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryImage {
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryData {
    pub title: String,
    pub images: Vec<GalleryImage>,
    pub columns: u8,
}

impl Default for GalleryData {
    fn default() -> Self {
        Self {
            title: String::new(),
            images: Vec::new(),
            columns: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoData {
    pub title: String,
    pub url: Option<String>,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductGridData {
    pub title: String,
    /// Empty means "all products of the catalog owner".
    pub product_ids: Vec<ProductId>,
    pub columns: u8,
    pub show_prices: bool,
}

impl Default for ProductGridData {
    fn default() -> Self {
        Self {
            title: "Produtos".to_string(),
            product_ids: Vec::new(),
            columns: 2,
            show_prices: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturedProductsData {
    pub title: String,
    pub product_ids: Vec<ProductId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesData {
    pub title: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub author: String,
    pub quote: String,
    /// 1..=5 stars when present.
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialsData {
    pub title: String,
    pub items: Vec<Testimonial>,
}

impl Default for TestimonialsData {
    fn default() -> Self {
        Self {
            title: "Depoimentos".to_string(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqData {
    pub title: String,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactData {
    pub title: String,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Default for ContactData {
    fn default() -> Self {
        Self {
            title: "Contato".to_string(),
            whatsapp: None,
            email: None,
            phone: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub network: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinksData {
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationData {
    pub title: String,
    pub address: String,
    pub map_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHoursEntry {
    pub day: String,
    pub opens: String,
    pub closes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHoursData {
    pub title: String,
    pub entries: Vec<OpeningHoursEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallToActionData {
    pub title: String,
    pub button_label: String,
    pub button_url: Option<String>,
}

impl Default for CallToActionData {
    fn default() -> Self {
        Self {
            title: String::new(),
            button_label: "Saiba mais".to_string(),
            button_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerData {
    pub text: String,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividerData {
    pub style: DividerStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacerData {
    /// Height in CSS pixels.
    pub height: u16,
}

impl Default for SpacerData {
    fn default() -> Self {
        Self { height: 48 }
    }
}

/// Typed block content: one case per block kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum BlockContent {
    Cover(CoverData),
    About(AboutData),
    Text(TextData),
    Image(ImageData),
    Gallery(GalleryData),
    Video(VideoData),
    ProductGrid(ProductGridData),
    FeaturedProducts(FeaturedProductsData),
    Categories(CategoriesData),
    Testimonials(TestimonialsData),
    Faq(FaqData),
    Contact(ContactData),
    SocialLinks(SocialLinksData),
    Location(LocationData),
    OpeningHours(OpeningHoursData),
    CallToAction(CallToActionData),
    Banner(BannerData),
    Divider(DividerData),
    Spacer(SpacerData),
}

impl BlockContent {
    /// Content a freshly added block of the given kind starts with.
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Cover => BlockContent::Cover(CoverData::default()),
            BlockType::About => BlockContent::About(AboutData::default()),
            BlockType::Text => BlockContent::Text(TextData::default()),
            BlockType::Image => BlockContent::Image(ImageData::default()),
            BlockType::Gallery => BlockContent::Gallery(GalleryData::default()),
            BlockType::Video => BlockContent::Video(VideoData::default()),
            BlockType::ProductGrid => BlockContent::ProductGrid(ProductGridData::default()),
            BlockType::FeaturedProducts => {
                BlockContent::FeaturedProducts(FeaturedProductsData::default())
            }
            BlockType::Categories => BlockContent::Categories(CategoriesData::default()),
            BlockType::Testimonials => BlockContent::Testimonials(TestimonialsData::default()),
            BlockType::Faq => BlockContent::Faq(FaqData::default()),
            BlockType::Contact => BlockContent::Contact(ContactData::default()),
            BlockType::SocialLinks => BlockContent::SocialLinks(SocialLinksData::default()),
            BlockType::Location => BlockContent::Location(LocationData::default()),
            BlockType::OpeningHours => BlockContent::OpeningHours(OpeningHoursData::default()),
            BlockType::CallToAction => BlockContent::CallToAction(CallToActionData::default()),
            BlockType::Banner => BlockContent::Banner(BannerData::default()),
            BlockType::Divider => BlockContent::Divider(DividerData::default()),
            BlockType::Spacer => BlockContent::Spacer(SpacerData::default()),
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Cover(_) => BlockType::Cover,
            BlockContent::About(_) => BlockType::About,
            BlockContent::Text(_) => BlockType::Text,
            BlockContent::Image(_) => BlockType::Image,
            BlockContent::Gallery(_) => BlockType::Gallery,
            BlockContent::Video(_) => BlockType::Video,
            BlockContent::ProductGrid(_) => BlockType::ProductGrid,
            BlockContent::FeaturedProducts(_) => BlockType::FeaturedProducts,
            BlockContent::Categories(_) => BlockType::Categories,
            BlockContent::Testimonials(_) => BlockType::Testimonials,
            BlockContent::Faq(_) => BlockType::Faq,
            BlockContent::Contact(_) => BlockType::Contact,
            BlockContent::SocialLinks(_) => BlockType::SocialLinks,
            BlockContent::Location(_) => BlockType::Location,
            BlockContent::OpeningHours(_) => BlockType::OpeningHours,
            BlockContent::CallToAction(_) => BlockType::CallToAction,
            BlockContent::Banner(_) => BlockType::Banner,
            BlockContent::Divider(_) => BlockType::Divider,
            BlockContent::Spacer(_) => BlockType::Spacer,
        }
    }

    /// The block's own heading, if its kind has one and it is set.
    pub fn display_title(&self) -> Option<&str> {
        let title = match self {
            BlockContent::Cover(d) => d.title.as_str(),
            BlockContent::About(d) => d.title.as_str(),
            BlockContent::Text(d) => d.title.as_str(),
            BlockContent::Image(d) => d.caption.as_str(),
            BlockContent::Gallery(d) => d.title.as_str(),
            BlockContent::Video(d) => d.title.as_str(),
            BlockContent::ProductGrid(d) => d.title.as_str(),
            BlockContent::FeaturedProducts(d) => d.title.as_str(),
            BlockContent::Categories(d) => d.title.as_str(),
            BlockContent::Testimonials(d) => d.title.as_str(),
            BlockContent::Faq(d) => d.title.as_str(),
            BlockContent::Contact(d) => d.title.as_str(),
            BlockContent::Location(d) => d.title.as_str(),
            BlockContent::OpeningHours(d) => d.title.as_str(),
            BlockContent::CallToAction(d) => d.title.as_str(),
            BlockContent::Banner(d) => d.text.as_str(),
            BlockContent::SocialLinks(_) | BlockContent::Divider(_) | BlockContent::Spacer(_) => "",
        };
        let title = title.trim();
        (!title.is_empty()).then_some(title)
    }

    /// Rebuild typed content from a persisted `(type, data)` pair.
    ///
    /// A `null` payload yields the kind's defaults.
    pub fn from_parts(block_type: BlockType, data: JsonValue) -> DomainResult<Self> {
        if data.is_null() {
            return Ok(Self::default_for(block_type));
        }
        serde_json::from_value(json!({ "type": block_type.as_str(), "data": data })).map_err(|e| {
            DomainError::validation(format!("invalid '{block_type}' block payload: {e}"))
        })
    }

    /// The untagged payload, as persisted in the `data` column.
    pub fn to_data(&self) -> JsonValue {
        match serde_json::to_value(self) {
            Ok(JsonValue::Object(mut tagged)) => tagged
                .remove("data")
                .unwrap_or_else(|| JsonValue::Object(Map::new())),
            _ => JsonValue::Object(Map::new()),
        }
    }
}
