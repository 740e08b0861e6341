//! License tiers and their delivery bundles.
//!
//! A beat carries up to three license tiers, one per [`LicenseType`]. The
//! tier implies what the buyer receives: the basic tier delivers a tagged
//! MP3, the premium tier adds the lossless WAV, and the exclusive tier
//! delivers the full multitrack stems and is sellable at most once.

use serde::{Deserialize, Serialize};

/// The closed set of purchasable license tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    Basic,
    Premium,
    Exclusive,
}

/// What a license tier delivers to the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Compressed audio only.
    Mp3,
    /// Compressed plus lossless audio.
    Mp3Wav,
    /// Full multitrack stems.
    Stems,
}

impl LicenseType {
    /// The delivery bundle implied by this tier.
    pub fn delivery(self) -> Delivery {
        match self {
            LicenseType::Basic => Delivery::Mp3,
            LicenseType::Premium => Delivery::Mp3Wav,
            LicenseType::Exclusive => Delivery::Stems,
        }
    }

    /// Whether this tier may be sold at most once.
    pub fn is_single_sale(self) -> bool {
        matches!(self, LicenseType::Exclusive)
    }

    /// Storage / wire representation (`basic`, `premium`, `exclusive`).
    pub fn as_str(self) -> &'static str {
        match self {
            LicenseType::Basic => "basic",
            LicenseType::Premium => "premium",
            LicenseType::Exclusive => "exclusive",
        }
    }

    /// Parse the storage representation back into a tier.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(LicenseType::Basic),
            "premium" => Some(LicenseType::Premium),
            "exclusive" => Some(LicenseType::Exclusive),
            _ => None,
        }
    }

    /// Human-readable display name used in generated copy.
    pub fn display_name(self) -> &'static str {
        match self {
            LicenseType::Basic => "Basic",
            LicenseType::Premium => "Premium",
            LicenseType::Exclusive => "Exclusive",
        }
    }

    /// Fallback line-item description when a tier has no custom terms.
    pub fn default_description(self) -> String {
        format!("{} license for musical use", self.display_name())
    }
}

impl Delivery {
    /// Storage representation (`mp3`, `mp3_wav`, `stems`).
    pub fn as_str(self) -> &'static str {
        match self {
            Delivery::Mp3 => "mp3",
            Delivery::Mp3Wav => "mp3_wav",
            Delivery::Stems => "stems",
        }
    }
}

/// Sale state of a license tier.
///
/// Non-exclusive tiers stay `Available` forever. Exclusive tiers transition
/// `Available -> Reserved` when a checkout begins and `Reserved -> Sold`
/// when the payment is confirmed; a lapsed reservation is retaken by the
/// next buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleState {
    Available,
    Reserved,
    Sold,
}

impl SaleState {
    pub fn as_str(self) -> &'static str {
        match self {
            SaleState::Available => "available",
            SaleState::Reserved => "reserved",
            SaleState::Sold => "sold",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(SaleState::Available),
            "reserved" => Some(SaleState::Reserved),
            "sold" => Some(SaleState::Sold),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_bundles_match_tiers() {
        assert_eq!(LicenseType::Basic.delivery(), Delivery::Mp3);
        assert_eq!(LicenseType::Premium.delivery(), Delivery::Mp3Wav);
        assert_eq!(LicenseType::Exclusive.delivery(), Delivery::Stems);
    }

    #[test]
    fn only_exclusive_is_single_sale() {
        assert!(LicenseType::Exclusive.is_single_sale());
        assert!(!LicenseType::Basic.is_single_sale());
        assert!(!LicenseType::Premium.is_single_sale());
    }

    #[test]
    fn parse_round_trips() {
        for tier in [
            LicenseType::Basic,
            LicenseType::Premium,
            LicenseType::Exclusive,
        ] {
            assert_eq!(LicenseType::parse(tier.as_str()), Some(tier));
        }
        assert_eq!(LicenseType::parse("platinum"), None);
    }

    #[test]
    fn default_description_names_the_tier() {
        assert_eq!(
            LicenseType::Premium.default_description(),
            "Premium license for musical use"
        );
    }

    #[test]
    fn sale_state_parse_round_trips() {
        for state in [SaleState::Available, SaleState::Reserved, SaleState::Sold] {
            assert_eq!(SaleState::parse(state.as_str()), Some(state));
        }
        assert_eq!(SaleState::parse("pending"), None);
    }
}
