pub mod app_loop;
pub mod seed;
pub mod settings;
pub mod settings_file;

pub const APP_NAME: &str = "Lanoir Kingdom";

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_snapshot_hash_is_16_hex_digits() {
        assert_eq!(format_snapshot_hash(0), "0x0000000000000000");
        assert_eq!(format_snapshot_hash(255), "0x00000000000000ff");
        assert_eq!(format_snapshot_hash(u64::MAX), "0xffffffffffffffff");
        assert_eq!(format_snapshot_hash(0xDEADBEEF), "0x00000000deadbeef");
    }
}
