//! Test utilities for format round-trip testing

use crate::RsdkFormat;
use std::fmt::Debug;

/// Test round-trip with existing binary data
///
/// Verifies that binary data can be parsed, rebuilt, and reparsed
/// to produce equivalent results.
pub fn test_round_trip_with_data<T>(data: &[u8]) -> Result<(), Box<dyn std::error::Error>>
where
    T: RsdkFormat + PartialEq + Debug,
{
    let parsed = T::parse(data)?;
    let rebuilt = parsed.build()?;
    let reparsed = T::parse(&rebuilt)?;

    if parsed != reparsed {
        return Err(format!(
            "Round-trip with data failed:\nParsed: {:?}\nReparsed: {:?}",
            parsed, reparsed
        )
        .into());
    }

    Ok(())
}

/// Test that parsing invalid data fails appropriately
pub fn test_invalid_data_rejected<T>(invalid_data: &[u8]) -> Result<(), Box<dyn std::error::Error>>
where
    T: RsdkFormat,
{
    match T::parse(invalid_data) {
        Ok(_) => Err("Expected parsing to fail for invalid data, but it succeeded".into()),
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::DataFile;

    #[test]
    fn test_invalid_data_rejected_utility() {
        test_invalid_data_rejected::<DataFile>(b"RSDKv5\x00\x00").expect("Should reject");
        test_invalid_data_rejected::<DataFile>(b"").expect("Should reject");
        assert!(test_invalid_data_rejected::<DataFile>(b"RSDKvB\x00\x00").is_err());
    }

    #[test]
    fn test_round_trip_with_data_utility() {
        test_round_trip_with_data::<DataFile>(b"RSDKvB\x00\x00")
            .expect("Empty data file should round-trip");
    }
}
