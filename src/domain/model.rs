use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CURRENCY: &str = "BDT";
pub const CURRENCY_SYMBOL: &str = "৳";

/// Parcel dimensions in centimeters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub l: f64,
    pub w: f64,
    pub h: f64,
}

impl Dimensions {
    pub fn new(l: f64, w: f64, h: f64) -> Self {
        Self { l, w, h }
    }

    pub fn cubic_cm(&self) -> f64 {
        self.l * self.w * self.h
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLevel {
    #[default]
    Standard,
    Express,
}

impl ServiceLevel {
    /// Unknown labels fall back to standard.
    pub fn from_label(label: &str) -> Self {
        match label {
            "express" => ServiceLevel::Express,
            _ => ServiceLevel::Standard,
        }
    }
}

/// Everything the pricing engine reads. Built per request, never stored on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelQuote {
    pub weight_kg: f64,
    pub dims: Dimensions,
    pub service: ServiceLevel,
    pub insured: bool,
    pub declared_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_fee: f64,
    pub per_kg: f64,
    pub charge_weight: f64,
    pub volumetric_kg: f64,
    pub volume_surcharge: f64,
    pub service_multiplier: f64,
    pub insurance_fee: f64,
    pub subtotal: f64,
    pub total: f64,
}

impl PriceBreakdown {
    /// JSON has no encoding for NaN or infinity, so a breakdown is only
    /// reportable or storable when every field is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.base_fee,
            self.per_kg,
            self.charge_weight,
            self.volumetric_kg,
            self.volume_surcharge,
            self.service_multiplier,
            self.insurance_fee,
            self.subtotal,
            self.total,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub total: f64,
    pub breakdown: PriceBreakdown,
    pub currency: String,
    pub currency_symbol: String,
}

impl Pricing {
    pub fn is_finite(&self) -> bool {
        self.total.is_finite() && self.breakdown.is_finite()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelStatus {
    #[default]
    Created,
}

/// A parcel booking ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParcel {
    pub user_id: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub weight_kg: f64,
    pub dims: Dimensions,
    pub service: ServiceLevel,
    pub insured: bool,
    pub declared_value: f64,
    pub notes: String,
    pub pricing: PriceBreakdown,
    pub tentative_price: f64,
    pub currency: String,
    pub currency_symbol: String,
    pub status: ParcelStatus,
    pub created_at: DateTime<Utc>,
}

impl NewParcel {
    pub fn new(
        user_id: String,
        pickup_address: String,
        delivery_address: String,
        notes: String,
        quote: &ParcelQuote,
        pricing: &Pricing,
    ) -> Self {
        Self {
            user_id,
            pickup_address,
            delivery_address,
            weight_kg: quote.weight_kg,
            dims: quote.dims,
            service: quote.service,
            insured: quote.insured,
            declared_value: quote.declared_value,
            notes,
            pricing: pricing.breakdown,
            tentative_price: pricing.total,
            currency: pricing.currency.clone(),
            currency_symbol: pricing.currency_symbol.clone(),
            status: ParcelStatus::Created,
            created_at: Utc::now(),
        }
    }

    /// True when every number in the record survives a JSON round trip.
    pub fn is_finite(&self) -> bool {
        [
            self.weight_kg,
            self.dims.l,
            self.dims.w,
            self.dims.h,
            self.declared_value,
            self.tentative_price,
        ]
        .iter()
        .all(|value| value.is_finite())
            && self.pricing.is_finite()
    }
}

/// A persisted parcel, as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRecord {
    pub id: String,
    #[serde(flatten)]
    pub parcel: NewParcel,
}
