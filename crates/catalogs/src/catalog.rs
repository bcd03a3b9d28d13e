use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitrine_core::{CatalogId, DomainError, DomainResult, Entity, UserId};

use crate::theme::ThemeOverrides;

/// Appended to the title of a duplicated catalog.
pub const COPY_TITLE_SUFFIX: &str = " (cópia)";

/// Publication state of a catalog page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogStatus {
    #[default]
    Rascunho,
    Publicado,
}

/// A catalog page (`catalogs` row).
///
/// `slug` is unique per owner; the three publish flags are independent and no
/// combination of them is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: CatalogId,
    pub user_id: UserId,
    pub title: String,
    pub slug: String,
    pub status: CatalogStatus,
    #[serde(rename = "link_ativo")]
    pub link_active: bool,
    #[serde(rename = "no_perfil")]
    pub on_profile: bool,
    pub cover: Option<String>,
    #[serde(default)]
    pub theme: ThemeOverrides,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single-field update applied atomically by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogPatch {
    Status(CatalogStatus),
    LinkActive(bool),
    OnProfile(bool),
}

impl Catalog {
    /// Trimmed title, rejected when blank.
    pub fn validate_title(title: &str) -> DomainResult<&str> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("catalog title cannot be empty"));
        }
        Ok(title)
    }

    /// A new draft catalog, unlinked and off the profile.
    pub fn new(
        id: CatalogId,
        user_id: UserId,
        title: &str,
        slug: String,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let title = Self::validate_title(title)?;
        if slug.is_empty() {
            return Err(DomainError::validation("catalog slug cannot be empty"));
        }
        Ok(Self {
            id,
            user_id,
            title: title.to_string(),
            slug,
            status: CatalogStatus::Rascunho,
            link_active: false,
            on_profile: false,
            cover: None,
            theme: ThemeOverrides::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Copy for `duplicate`: same content settings, never the publish state.
    pub fn duplicate_as(&self, id: CatalogId, slug: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: self.user_id,
            title: format!("{}{}", self.title, COPY_TITLE_SUFFIX),
            slug,
            status: CatalogStatus::Rascunho,
            link_active: false,
            on_profile: false,
            cover: self.cover.clone(),
            theme: self.theme.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == CatalogStatus::Publicado
    }

    /// Published with an active public link.
    pub fn is_publicly_reachable(&self) -> bool {
        self.is_published() && self.link_active
    }

    /// Shown on the owner's public profile page.
    pub fn listed_on_profile(&self) -> bool {
        self.is_publicly_reachable() && self.on_profile
    }

    pub fn apply(&mut self, patch: CatalogPatch, now: DateTime<Utc>) {
        match patch {
            CatalogPatch::Status(status) => self.status = status,
            CatalogPatch::LinkActive(active) => self.link_active = active,
            CatalogPatch::OnProfile(on_profile) => self.on_profile = on_profile,
        }
        self.updated_at = now;
    }
}

impl Entity for Catalog {
    type Id = CatalogId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, slug: &str) -> Catalog {
        Catalog::new(CatalogId::new(), UserId::new(), title, slug.to_string(), Utc::now()).unwrap()
    }

    #[test]
    fn new_catalog_is_an_unlinked_draft() {
        let catalog = draft("  Menu  ", "menu");
        assert_eq!(catalog.title, "Menu");
        assert_eq!(catalog.status, CatalogStatus::Rascunho);
        assert!(!catalog.link_active);
        assert!(!catalog.on_profile);
        assert!(!catalog.is_publicly_reachable());
    }

    #[test]
    fn new_catalog_rejects_blank_title() {
        let err = Catalog::new(CatalogId::new(), UserId::new(), "  ", "x".to_string(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(Catalog::validate_title("  Menu \n").unwrap(), "Menu");
    }

    #[test]
    fn patches_touch_a_single_field() {
        let mut catalog = draft("Menu", "menu");
        let before = catalog.clone();

        catalog.apply(CatalogPatch::Status(CatalogStatus::Publicado), Utc::now());
        assert!(catalog.is_published());
        assert_eq!(catalog.link_active, before.link_active);
        assert_eq!(catalog.on_profile, before.on_profile);

        catalog.apply(CatalogPatch::LinkActive(true), Utc::now());
        assert!(catalog.is_publicly_reachable());
        assert!(!catalog.listed_on_profile());

        catalog.apply(CatalogPatch::OnProfile(true), Utc::now());
        assert!(catalog.listed_on_profile());
    }

    #[test]
    fn published_without_link_is_allowed() {
        let mut catalog = draft("Menu", "menu");
        catalog.apply(CatalogPatch::Status(CatalogStatus::Publicado), Utc::now());
        catalog.apply(CatalogPatch::LinkActive(false), Utc::now());
        assert!(catalog.is_published());
        assert!(!catalog.is_publicly_reachable());
    }

    #[test]
    fn duplicate_never_inherits_publish_state() {
        let mut source = draft("Menu", "menu");
        source.cover = Some("https://cdn.example/capa.jpg".to_string());
        source.theme.primary_color = Some("#aa3300".to_string());
        for patch in [
            CatalogPatch::Status(CatalogStatus::Publicado),
            CatalogPatch::LinkActive(true),
            CatalogPatch::OnProfile(true),
        ] {
            source.apply(patch, Utc::now());
        }

        let copy = source.duplicate_as(CatalogId::new(), "menu-copia".to_string(), Utc::now());
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.user_id, source.user_id);
        assert_eq!(copy.title, "Menu (cópia)");
        assert_eq!(copy.slug, "menu-copia");
        assert_eq!(copy.status, CatalogStatus::Rascunho);
        assert!(!copy.link_active);
        assert!(!copy.on_profile);
        assert_eq!(copy.cover, source.cover);
        assert_eq!(copy.theme, source.theme);
    }

    #[test]
    fn record_uses_persisted_field_names() {
        let catalog = draft("Menu", "menu");
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["status"], "rascunho");
        assert_eq!(json["link_ativo"], false);
        assert_eq!(json["no_perfil"], false);
    }
}
