pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Largest unit with a magnitude of at least one, two decimals, trailing
    /// zeros dropped: 1024 -> "1 KB", 1536 -> "1.5 KB".
    pub fn format_size(size: u64) -> String {
        const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

        if size == 0 {
            return "0 Bytes".to_string();
        }

        let mut value = size as f64;
        let mut unit_index = 0;
        while value >= 1024.0 && unit_index < UNITS.len() - 1 {
            value /= 1024.0;
            unit_index += 1;
        }

        let rounded = format!("{:.2}", value);
        let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
        format!("{} {}", trimmed, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "0 Bytes")]
    #[case(1, "1 Bytes")]
    #[case(512, "512 Bytes")]
    #[case(1023, "1023 Bytes")]
    #[case(1024, "1 KB")]
    #[case(1536, "1.5 KB")]
    #[case(1_048_576, "1 MB")]
    #[case(2_621_440, "2.5 MB")]
    #[case(10_000_000, "9.54 MB")]
    #[case(1_073_741_824, "1 GB")]
    #[case(1_099_511_627_776, "1 TB")]
    fn formats_sizes(#[case] size: u64, #[case] expected: &str) {
        assert_eq!(FileSizeUtils::format_size(size), expected);
    }
}
