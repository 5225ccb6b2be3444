//! # Shared Utility Functions
//!
//! Display helpers used by the web front end.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Keep the first N and last M characters of an address
//! - [`truncate_address`] - `format_address` with the `0x1234...abcd` layout
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
//! assert_eq!(format_address(address, 6, 4), "0x5FbD...0aa3");
//! ```

/// Format an address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is not longer than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
/// assert_eq!(format_address(addr, 6, 4), "0x7099...79C8");
/// assert_eq!(format_address(addr, 10, 6), "0x70997970...dc79C8");
/// assert_eq!(format_address("0x1234", 6, 4), "0x1234");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len || !address.is_ascii() {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// `0x` plus four hex digits, then the last four.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// assert_eq!(truncate_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"), "0xf39F...2266");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
        assert_eq!(format_address(addr, 6, 4), "0x5FbD...0aa3");
        assert_eq!(format_address(addr, 2, 2), "0x...a3");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("0x12", 6, 4), "0x12");
        assert_eq!(format_address("", 6, 4), "");
    }

    #[test]
    fn test_format_address_non_ascii_untouched() {
        assert_eq!(format_address("ЁЁЁЁЁЁЁЁЁЁЁЁ", 2, 2), "ЁЁЁЁЁЁЁЁЁЁЁЁ");
    }

    #[test]
    fn test_truncate_address() {
        let addr = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
        assert_eq!(truncate_address(addr), "0x7099...79C8");
    }
}
