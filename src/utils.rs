use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, B256, U256};
use chrono::DateTime;
use color_eyre::eyre::{Result, WrapErr};

/// Truncate a B256 hash to "0xabcd...ef12" format
pub fn truncate_hash(hash: &B256) -> String {
    let s = format!("{hash}");
    if s.len() > 14 {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s
    }
}

/// Truncate an address to "0xabcd...ef12" format
pub fn truncate_address(addr: &Address) -> String {
    let s = format!("{addr}");
    if s.len() > 14 {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s
    }
}

/// Format a wei amount in the display unit without losing precision,
/// e.g. 15000000000000000 -> "0.015".
pub fn format_price(wei: U256) -> String {
    format_u256_as_decimal(wei, 18)
}

/// Format a U256 value as decimal with given decimals.
/// Trailing zeros of the fraction are trimmed; whole amounts have no fraction.
pub fn format_u256_as_decimal(value: U256, decimals: u8) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        return format!("{whole}");
    }

    let remainder_str = format!("{remainder}");
    let padded = format!("{:0>width$}", remainder_str, width = decimals as usize);
    let trimmed = padded.trim_end_matches('0');
    format!("{whole}.{trimmed}")
}

/// Convert a display-unit price ("0.015") to wei.
pub fn to_wei(price: &str) -> Result<U256> {
    parse_ether(price.trim()).wrap_err_with(|| format!("Invalid price '{price}'"))
}

/// Format a Unix timestamp as a datetime string
pub fn format_timestamp(timestamp: u64) -> String {
    DateTime::from_timestamp(timestamp as i64, 0)
        .map(|dt| dt.format("%b %d, %Y %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_fraction() {
        assert_eq!(format_price(U256::from(15_000_000_000_000_000u64)), "0.015");
    }

    #[test]
    fn test_format_price_whole() {
        assert_eq!(format_price(U256::from(2_000_000_000_000_000_000u64)), "2");
        assert_eq!(format_price(U256::ZERO), "0");
    }

    #[test]
    fn test_format_price_keeps_all_digits() {
        assert_eq!(format_price(U256::from(1u64)), "0.000000000000000001");
        assert_eq!(
            format_price(U256::from(1_234_567_891_000_000_000u64)),
            "1.234567891"
        );
    }

    #[test]
    fn test_to_wei() {
        assert_eq!(to_wei("0.015").unwrap(), U256::from(15_000_000_000_000_000u64));
        assert_eq!(to_wei(" 1 ").unwrap(), U256::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_to_wei_rejects_garbage() {
        assert!(to_wei("cheap").is_err());
    }

    #[test]
    fn test_price_survives_conversion() {
        let wei = U256::from(7_250_000_000_000_000u64);
        assert_eq!(to_wei(&format_price(wei)).unwrap(), wei);
    }

    #[test]
    fn test_truncate_address() {
        let addr: Address = "0x8Ad48B3394729D5Af73a02548B2F3297b232EDe3".parse().unwrap();
        assert_eq!(truncate_address(&addr), "0x8Ad48B...EDe3");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "Jan 01, 1970 00:00:00 UTC");
    }
}
