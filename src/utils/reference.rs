use chrono::{Datelike, Utc};
use rand::Rng;

/// Generate a human-readable reference number like `QT-2026-48271`.
/// Uniqueness is ultimately enforced by the unique column constraint; the
/// random suffix just makes collisions unlikely on the first try.
pub fn generate_reference(prefix: &str) -> String {
    let year = Utc::now().year();
    let suffix: u32 = rand::thread_rng().gen_range(10000..100000);
    format!("{}-{}-{}", prefix, year, suffix)
}

pub const QUOTE_PREFIX: &str = "QT";
pub const BOOKING_PREFIX: &str = "BK";
pub const INVOICE_PREFIX: &str = "INV";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_has_prefix_year_and_suffix() {
        let reference = generate_reference(QUOTE_PREFIX);
        let parts: Vec<&str> = reference.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "QT");
        assert!(parts[1].parse::<i32>().is_ok());
        assert_eq!(parts[2].len(), 5);
    }
}
