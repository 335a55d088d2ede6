//! Store — shared across Menus, OCRMenus, and Orders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
#[sqlx(type_name = "int2")]
pub enum PartnerTier {
    NonPartner = 0,
    Partner = 1,
    Vip = 2,
}

impl From<i16> for PartnerTier {
    fn from(v: i16) -> Self {
        match v {
            1 => PartnerTier::Partner,
            2 => PartnerTier::Vip,
            _ => PartnerTier::NonPartner,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Store {
    pub id: i64,
    pub store_name: String,
    pub partner_level: i16,
    pub place_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub review_text: Option<String>,
    /// Up to five curated dish names (VIP tier only, spec §3).
    pub top_dishes: Vec<String>,
}

impl Store {
    pub fn is_partner(&self) -> bool {
        self.partner_level >= PartnerTier::Partner as i16
    }
}

pub const DEFAULT_STORE_NAME: &str = "未命名店家";
