//! Minor-unit currency arithmetic and the marketplace fee.
//!
//! License prices are stored as integers in the currency's minor unit. The
//! subdivision is a per-currency lookup rather than a flat 100: most
//! currencies use 2 decimals, a handful use 0 or 3. Unknown ISO 4217 codes
//! fall back to 2 decimals.

/// Marketplace commission in basis points (10%).
pub const MARKETPLACE_FEE_BPS: i64 = 1_000;

/// Minor units per major unit for an ISO 4217 currency code.
///
/// The code is matched case-insensitively; unknown codes return 100.
pub fn minor_unit_factor(currency: &str) -> i64 {
    match currency.to_ascii_uppercase().as_str() {
        // 0-decimal currencies.
        "CLP" | "JPY" | "KRW" | "PYG" | "VND" | "ISK" | "UGX" | "XAF" | "XOF" => 1,
        // 3-decimal currencies.
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 1_000,
        _ => 100,
    }
}

/// Convert a minor-unit price to major units for the processor's line item.
///
/// A stored price of `35000` in ARS becomes `350.00`.
pub fn to_major_units(price_minor_units: i64, currency: &str) -> f64 {
    price_minor_units as f64 / minor_unit_factor(currency) as f64
}

/// The platform commission for a given price, in minor units.
///
/// Computed as 10% of the price, rounded half-up to the nearest integer.
/// Pure integer arithmetic: `12345` yields `1235`, `150000` yields `15000`.
pub fn marketplace_fee(price_minor_units: i64) -> i64 {
    (price_minor_units * MARKETPLACE_FEE_BPS + 5_000) / 10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_is_ten_percent_rounded() {
        assert_eq!(marketplace_fee(150_000), 15_000);
        assert_eq!(marketplace_fee(12_345), 1_235);
        assert_eq!(marketplace_fee(20_000), 2_000);
        assert_eq!(marketplace_fee(0), 0);
        // Exactly on the half boundary rounds up.
        assert_eq!(marketplace_fee(5), 1);
        assert_eq!(marketplace_fee(4), 0);
    }

    #[test]
    fn two_decimal_currencies_divide_by_100() {
        assert_eq!(to_major_units(35_000, "ARS"), 350.0);
        assert_eq!(to_major_units(35_000, "USD"), 350.0);
        // Unknown codes fall back to 100.
        assert_eq!(to_major_units(35_000, "ZZZ"), 350.0);
    }

    #[test]
    fn zero_decimal_currencies_are_not_divided() {
        assert_eq!(minor_unit_factor("JPY"), 1);
        assert_eq!(to_major_units(35_000, "CLP"), 35_000.0);
    }

    #[test]
    fn three_decimal_currencies_divide_by_1000() {
        assert_eq!(minor_unit_factor("KWD"), 1_000);
        assert_eq!(to_major_units(35_000, "TND"), 35.0);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(minor_unit_factor("jpy"), 1);
        assert_eq!(minor_unit_factor("ars"), 100);
    }
}
