//! Parcel price computation.
//!
//! The price is a flat base fee plus a per-kilogram rate applied to the charge
//! weight (the larger of actual and volumetric weight), a flat surcharge for
//! bulky parcels, a service multiplier, and an optional insurance fee added
//! after the multiplier.

use crate::domain::model::{
    ParcelQuote, PriceBreakdown, Pricing, ServiceLevel, CURRENCY, CURRENCY_SYMBOL,
};

pub const BASE_FEE: f64 = 30.0;
pub const PER_KG: f64 = 12.0;
/// Cubic centimeters billed as one kilogram.
pub const VOLUMETRIC_DIVISOR: f64 = 5000.0;
pub const MIN_CHARGE_WEIGHT_KG: f64 = 0.1;
pub const BULKY_VOLUME_M3: f64 = 0.5;
pub const BULKY_SURCHARGE: f64 = 100.0;
pub const EXPRESS_MULTIPLIER: f64 = 1.5;
pub const STANDARD_MULTIPLIER: f64 = 1.0;
pub const INSURANCE_RATE: f64 = 0.02;
pub const MIN_INSURANCE_FEE: f64 = 5.0;

const CUBIC_CM_PER_M3: f64 = 1_000_000.0;

/// Rounds to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn service_multiplier(service: ServiceLevel) -> f64 {
    match service {
        ServiceLevel::Express => EXPRESS_MULTIPLIER,
        ServiceLevel::Standard => STANDARD_MULTIPLIER,
    }
}

/// Volume in cubic centimeters. A product that is not a number (an overflowed
/// side times a zero side) bills as an unbounded volume, so it fails the same
/// way an overflowing volume does instead of pricing at the weight floor.
pub fn billable_volume_cm3(quote: &ParcelQuote) -> f64 {
    let volume = quote.dims.cubic_cm();
    if volume.is_nan() {
        f64::INFINITY
    } else {
        volume
    }
}

pub fn volumetric_weight(quote: &ParcelQuote) -> f64 {
    billable_volume_cm3(quote) / VOLUMETRIC_DIVISOR
}

pub fn volume_surcharge(quote: &ParcelQuote) -> f64 {
    let volume_m3 = billable_volume_cm3(quote) / CUBIC_CM_PER_M3;
    if volume_m3 > BULKY_VOLUME_M3 {
        BULKY_SURCHARGE
    } else {
        0.0
    }
}

pub fn insurance_fee(quote: &ParcelQuote) -> f64 {
    if quote.insured {
        MIN_INSURANCE_FEE.max(INSURANCE_RATE * quote.declared_value)
    } else {
        0.0
    }
}

/// Prices a parcel. Never fails; inputs are expected to be normalized already.
///
/// Display fields are rounded from their raw values, and `total` is derived
/// from the unrounded subtotal so rounding happens once. Inputs large enough
/// to overflow produce a non-finite result; callers check
/// [`Pricing::is_finite`] before answering.
pub fn compute_price(quote: &ParcelQuote) -> Pricing {
    let volumetric_kg = volumetric_weight(quote);
    let charge_weight = quote
        .weight_kg
        .max(volumetric_kg)
        .max(MIN_CHARGE_WEIGHT_KG);
    let multiplier = service_multiplier(quote.service);
    let surcharge = volume_surcharge(quote);
    let insurance = insurance_fee(quote);

    let subtotal = BASE_FEE + PER_KG * charge_weight + surcharge;
    let total = round2(subtotal * multiplier + insurance);

    Pricing {
        total,
        currency: CURRENCY.to_string(),
        currency_symbol: CURRENCY_SYMBOL.to_string(),
        breakdown: PriceBreakdown {
            base_fee: BASE_FEE,
            per_kg: PER_KG,
            charge_weight: round2(charge_weight),
            volumetric_kg: round2(volumetric_kg),
            volume_surcharge: surcharge,
            service_multiplier: multiplier,
            insurance_fee: insurance,
            subtotal: round2(subtotal),
            total,
        },
    }
}
